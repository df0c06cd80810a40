//! OCR domain — the engine contract the controller depends on.
//!
//! Recognition itself is always external. The controller only knows
//! `OcrEngine::recognize` and the shape of its result.

mod tesseract;

pub use tesseract::TesseractEngine;

use crate::error::RecognitionError;
use crate::handle::ImageHandle;
use async_trait::async_trait;
use serde::Serialize;

/// One progress report from an engine.
///
/// `progress` runs from 0.0 to 1.0 within the current `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub status: String,
    pub progress: f32,
}

impl Progress {
    pub fn new(status: impl Into<String>, progress: f32) -> Self {
        Self {
            status: status.into(),
            progress: progress.clamp(0.0, 1.0),
        }
    }
}

/// Callback an engine calls while it works. It may borrow from the
/// caller's stack; it only has to outlive the `recognize` call.
pub type ProgressFn<'a> = dyn Fn(Progress) + Send + Sync + 'a;

/// What an engine hands back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    pub text: String,
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    /// Whether the engine can run on this machine at all.
    async fn is_available(&self) -> bool;

    /// Recognize the text in `image`.
    async fn recognize(
        &self,
        image: &ImageHandle,
        language: &str,
        progress: &ProgressFn<'_>,
    ) -> Result<Recognition, RecognitionError>;
}
