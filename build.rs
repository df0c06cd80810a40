//! Build script for the Text Extractor desktop shell.
//!
//! Only the `desktop` feature needs Tauri codegen; the library and the
//! headless CLI build without a webview toolchain.

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
