//! Error types for the extraction workflow.
//!
//! Recognition and clipboard failures are both recovered inside the
//! controller. Only clipboard failures ever reach the user, as a status line.

use std::path::PathBuf;

/// The OCR engine rejected the image or could not run at all.
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("OCR engine not available: {0}")]
    EngineUnavailable(String),

    #[error("failed to start OCR engine: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("OCR engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR engine exited with {code:?}: {stderr}")]
    EngineFailed { code: Option<i32>, stderr: String },

    #[error("OCR timed out after {0}s")]
    Timeout(u64),
}

/// Writing to the system clipboard failed.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Loading a user-selected file into an image handle failed.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A one-shot headless extraction did not produce usable text.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("text extraction failed for {} ({outcome:?})", path.display())]
    Extraction {
        path: PathBuf,
        outcome: crate::session::ExtractOutcome,
    },

    #[error("no text recognized in {}", path.display())]
    NoText { path: PathBuf },
}
