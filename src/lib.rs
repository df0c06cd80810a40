//! Text Extractor — upload an image, OCR it, copy the text.
//!
//! The library holds all behavior. Front ends are thin:
//!   - `run()` (feature `desktop`) — Tauri webview shell, commands in commands.rs
//!   - `src/bin/extract.rs`        — headless command line over headless.rs
//!
//! Domains:
//!   - session.rs    — pure session state + transitions
//!   - controller.rs — async workflow over the session
//!   - ocr/          — engine contract + Tesseract adapter
//!   - clipboard.rs  — clipboard contract + arboard adapter

pub mod clipboard;
#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod handle;
pub mod headless;
pub mod ocr;
pub mod session;

pub use clipboard::{Clipboard, SystemClipboard};
pub use config::OcrConfig;
pub use controller::WorkflowController;
pub use handle::ImageHandle;
pub use ocr::{OcrEngine, TesseractEngine};
pub use session::{CopyOutcome, ExtractOutcome, Phase, SessionView};

/// Controller type the desktop app manages as Tauri state.
#[cfg(feature = "desktop")]
pub type DesktopController = WorkflowController<TesseractEngine, SystemClipboard>;

/// Entry point — called by the desktop binary.
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Arc;
    use tauri::{Emitter, Manager};

    // Load .env.local → .env from the project root.
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    config::load_dotenv(manifest_dir);

    env_logger::init();

    let result = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            commands::get_session,
            commands::choose_image,
            commands::upload_image,
            commands::extract_text,
            commands::reset_session,
            commands::copy_text,
        ])
        .setup(|app| {
            log::info!("Text Extractor starting up");

            let config = OcrConfig::from_env();
            let engine = TesseractEngine::new(&config);

            let handle = app.handle().clone();
            let controller = DesktopController::new(engine, SystemClipboard::new())
                .with_language(config.language.clone())
                .with_progress_listener(Arc::new(move |progress: ocr::Progress| {
                    if let Err(e) = handle.emit("ocr-progress", &progress) {
                        log::warn!("[OCR] Failed to emit progress: {}", e);
                    }
                }));
            app.manage(controller);

            log::info!("Session ready (language: {})", config.language);
            Ok(())
        })
        .run(tauri::generate_context!());

    if let Err(e) = result {
        log::error!("Error running Text Extractor: {}", e);
        std::process::exit(1);
    }
}
