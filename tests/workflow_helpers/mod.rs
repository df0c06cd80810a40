//! Shared fakes for workflow tests: a scripted OCR engine and an
//! in-memory clipboard.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use text_extractor_lib::error::{ClipboardError, RecognitionError};
use text_extractor_lib::ocr::{Progress, ProgressFn, Recognition};
use text_extractor_lib::{Clipboard, ImageHandle, OcrEngine};
use tokio::sync::Notify;

/// Lets a test hold an in-flight recognition open.
#[derive(Default)]
pub struct Gate {
    pub started: Notify,
    pub release: Notify,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// Record of one `recognize` call.
#[derive(Debug, Clone)]
pub struct Call {
    pub image_name: String,
    pub language: String,
}

/// Engine that replays scripted results in order.
pub struct FakeEngine {
    script: Mutex<VecDeque<Result<String, String>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    gate: Option<Arc<Gate>>,
}

impl FakeEngine {
    pub fn new(script: Vec<Result<&str, &str>>) -> Self {
        Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn gated(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OcrEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn recognize(
        &self,
        image: &ImageHandle,
        language: &str,
        progress: &ProgressFn<'_>,
    ) -> Result<Recognition, RecognitionError> {
        self.calls.lock().unwrap().push(Call {
            image_name: image.name().to_string(),
            language: language.to_string(),
        });
        progress(Progress::new("recognizing text", 0.0));

        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()));
        progress(Progress::new("recognizing text", 1.0));

        next.map(|text| Recognition { text })
            .map_err(|stderr| RecognitionError::EngineFailed { code: Some(1), stderr })
    }
}

/// Clipboard that records writes, or fails every write.
#[derive(Clone, Default)]
pub struct FakeClipboard {
    pub written: Arc<Mutex<Vec<String>>>,
    fail: bool,
    gate: Option<Arc<Gate>>,
}

impl FakeClipboard {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Hold every write open until `gate.release` fires.
    pub fn gated(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn contents(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
        if self.fail {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn image(name: &str) -> ImageHandle {
    ImageHandle::from_bytes(name, format!("bytes of {}", name).into_bytes())
}
