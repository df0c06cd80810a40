//! Clipboard collaborator.
//!
//! Uses arboard for native clipboard access. The write happens on a
//! blocking worker so the async caller never stalls on X11/Wayland.

use crate::error::ClipboardError;
use async_trait::async_trait;

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The host system clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text.as_str())
                .map_err(|e| ClipboardError::Write(e.to_string()))?;
            log::info!("[CLIPBOARD] Copied {} chars", text.len());
            Ok(())
        })
        .await
        .map_err(|e| ClipboardError::Write(e.to_string()))?
    }
}
