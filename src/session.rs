//! Session state — the single source of truth for one open interface.
//!
//! Everything here is pure: no I/O, no async. The controller takes the
//! lock, calls one transition, releases the lock, and does the slow work
//! (OCR, clipboard) outside it.

use crate::handle::ImageHandle;
use serde::Serialize;

pub const COPY_SUCCESS: &str = "Copied to clipboard!";
pub const COPY_FAILURE: &str = "Failed to copy text.";

/// UI phase derived from the session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    ImageLoaded,
    Extracting,
    TextShown,
}

/// Proof that an extraction was started, tagged with the generation it
/// belongs to. Only the matching generation may write its result back.
#[derive(Debug)]
#[must_use]
pub struct ExtractTicket {
    generation: u64,
    image: ImageHandle,
}

impl ExtractTicket {
    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A copy in progress: the text being written and the generation it was
/// taken from.
#[derive(Debug)]
#[must_use]
pub struct CopyTicket {
    generation: u64,
    text: String,
}

impl CopyTicket {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Why an extraction could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractRejected {
    NoImage,
    Busy,
}

/// Result of one `extract` call, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractOutcome {
    /// Nothing uploaded yet.
    NoImage,
    /// Another extraction is still running.
    Busy,
    Completed,
    /// Engine failed; logged, state back to non-busy.
    Failed,
    /// Image was reset or replaced while the engine ran; result dropped.
    Stale,
}

impl From<ExtractRejected> for ExtractOutcome {
    fn from(rejected: ExtractRejected) -> Self {
        match rejected {
            ExtractRejected::NoImage => ExtractOutcome::NoImage,
            ExtractRejected::Busy => ExtractOutcome::Busy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CopyOutcome {
    NoText,
    Copied,
    Failed,
    /// Image was reset or replaced while the clipboard write ran.
    Stale,
}

#[derive(Debug, Default)]
pub struct SessionState {
    image: Option<ImageHandle>,
    extracted_text: Option<String>,
    busy: bool,
    copy_status: Option<String>,
    /// Bumped by upload and reset. Extractions and copies from an older
    /// generation are stale.
    generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn extracted_text(&self) -> Option<&str> {
        self.extracted_text.as_deref()
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn copy_status(&self) -> Option<&str> {
        self.copy_status.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        if self.busy {
            Phase::Extracting
        } else if self.extracted_text.is_some() {
            Phase::TextShown
        } else if self.image.is_some() {
            Phase::ImageLoaded
        } else {
            Phase::Idle
        }
    }

    /// Replace the current image. Text, copy status and any in-flight
    /// extraction belong to the old image and are dropped.
    pub fn upload(&mut self, image: ImageHandle) {
        self.generation += 1;
        self.image = Some(image);
        self.extracted_text = None;
        self.copy_status = None;
        self.busy = false;
    }

    /// Start an extraction of the current image.
    pub fn begin_extract(&mut self) -> Result<ExtractTicket, ExtractRejected> {
        let image = self.image.clone().ok_or(ExtractRejected::NoImage)?;
        if self.busy {
            return Err(ExtractRejected::Busy);
        }
        self.busy = true;
        Ok(ExtractTicket {
            generation: self.generation,
            image,
        })
    }

    /// Apply the engine's result. Failures leave the text untouched.
    pub fn finish_extract<E>(&mut self, ticket: ExtractTicket, result: Result<String, E>) -> ExtractOutcome {
        if ticket.generation != self.generation {
            return ExtractOutcome::Stale;
        }
        self.busy = false;
        match result {
            Ok(text) => {
                self.extracted_text = Some(text);
                self.copy_status = None;
                ExtractOutcome::Completed
            }
            Err(_) => ExtractOutcome::Failed,
        }
    }

    /// Give up on an extraction that will never finish (its future was
    /// dropped). Only clears `busy` if nothing has superseded it.
    pub fn abandon_extract(&mut self, ticket: ExtractTicket) {
        if ticket.generation == self.generation {
            self.busy = false;
        }
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.image = None;
        self.extracted_text = None;
        self.busy = false;
        self.copy_status = None;
    }

    /// Start a copy of the current text, if there is any.
    pub fn begin_copy(&self) -> Option<CopyTicket> {
        self.extracted_text.clone().map(|text| CopyTicket {
            generation: self.generation,
            text,
        })
    }

    /// Record a clipboard outcome. The last call wins, but a result from
    /// before a reset or upload is dropped.
    pub fn finish_copy<E>(&mut self, ticket: CopyTicket, result: &Result<(), E>) -> CopyOutcome {
        if ticket.generation != self.generation {
            return CopyOutcome::Stale;
        }
        match result {
            Ok(()) => {
                self.copy_status = Some(COPY_SUCCESS.to_string());
                CopyOutcome::Copied
            }
            Err(_) => {
                self.copy_status = Some(COPY_FAILURE.to_string());
                CopyOutcome::Failed
            }
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase(),
            image: self.image.as_ref().map(ImageView::from),
            extracted_text: self.extracted_text.clone(),
            busy: self.busy,
            copy_status: self.copy_status.clone(),
        }
    }
}

/// Snapshot of the session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: Phase,
    pub image: Option<ImageView>,
    pub extracted_text: Option<String>,
    pub busy: bool,
    pub copy_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub byte_len: usize,
    pub data_url: String,
}

impl From<&ImageHandle> for ImageView {
    fn from(handle: &ImageHandle) -> Self {
        Self {
            id: handle.id().to_string(),
            name: handle.name().to_string(),
            mime_type: handle.mime_type().to_string(),
            byte_len: handle.bytes().len(),
            data_url: handle.data_url(),
        }
    }
}
