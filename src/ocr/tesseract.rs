//! Tesseract OCR via the `tesseract` command-line tool.
//!
//! Image bytes go in on stdin and text comes back on stdout, so no temp
//! files are involved. The child is killed if the call times out or the
//! future is dropped.

use super::{OcrEngine, Progress, ProgressFn, Recognition};
use crate::config::OcrConfig;
use crate::error::RecognitionError;
use crate::handle::ImageHandle;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

const BINARY_NAME: &str = "tesseract";

pub struct TesseractEngine {
    binary: Option<PathBuf>,
    page_seg_mode: u8,
    timeout: std::time::Duration,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Self {
        let binary = match &config.tesseract_path {
            Some(path) => Some(path.clone()),
            None => which::which(BINARY_NAME).ok(),
        };
        match &binary {
            Some(path) => log::info!("[OCR] Using tesseract at {}", path.display()),
            None => log::warn!("[OCR] tesseract not found on PATH"),
        }
        Self {
            binary,
            page_seg_mode: config.page_seg_mode,
            timeout: config.timeout,
        }
    }

    fn binary(&self) -> Result<&Path, RecognitionError> {
        self.binary.as_deref().ok_or_else(|| {
            RecognitionError::EngineUnavailable(format!(
                "'{}' not found; install it or set TESSERACT_PATH",
                BINARY_NAME
            ))
        })
    }

    async fn run(&self, binary: &Path, bytes: &[u8], language: &str) -> Result<String, RecognitionError> {
        let mut child = tokio::process::Command::new(binary)
            .args(["stdin", "stdout", "-l", language, "--psm"])
            .arg(self.page_seg_mode.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(RecognitionError::Spawn)?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            RecognitionError::Io(std::io::Error::other("no stdin for tesseract"))
        })?;

        // Feed stdin while collecting output so neither pipe can stall.
        let feed = async move {
            stdin.write_all(bytes).await?;
            stdin.shutdown().await
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            return Err(RecognitionError::EngineFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        // A successful exit means the image was read even if the pipe
        // reported a late error on close.
        if let Err(e) = fed {
            log::debug!("[OCR] stdin closed early: {}", e);
        }

        Ok(strip_page_separator(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

/// The CLI ends each page with a form feed; drop the final one.
fn strip_page_separator(mut text: String) -> String {
    if text.ends_with('\u{c}') {
        text.pop();
    }
    text
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        BINARY_NAME
    }

    async fn is_available(&self) -> bool {
        let Ok(binary) = self.binary() else {
            return false;
        };
        tokio::process::Command::new(binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn recognize(
        &self,
        image: &ImageHandle,
        language: &str,
        progress: &ProgressFn<'_>,
    ) -> Result<Recognition, RecognitionError> {
        let binary = self.binary()?;
        progress(Progress::new("loading tesseract", 0.0));

        let start = std::time::Instant::now();
        progress(Progress::new("recognizing text", 0.5));
        let text = tokio::time::timeout(self.timeout, self.run(binary, image.bytes(), language))
            .await
            .map_err(|_| RecognitionError::Timeout(self.timeout.as_secs()))??;
        progress(Progress::new("recognizing text", 1.0));

        log::info!(
            "[OCR] tesseract ({}) read {} chars from {} in {}ms",
            language,
            text.chars().count(),
            image.name(),
            start.elapsed().as_millis()
        );
        Ok(Recognition { text })
    }
}
