//! Workflow controller — upload, extract, reset, copy.
//!
//! Owns the session and the two external collaborators. The session lock
//! is only held for a transition, never across an engine or clipboard
//! await, so `reset` and `upload` stay responsive while OCR runs.

use crate::clipboard::Clipboard;
use crate::config::DEFAULT_LANGUAGE;
use crate::error::ImageError;
use crate::handle::ImageHandle;
use crate::ocr::{OcrEngine, Progress};
use crate::session::{CopyOutcome, ExtractOutcome, ExtractTicket, SessionState, SessionView};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Receives engine progress, e.g. to forward it to the page.
pub type ProgressListener = Arc<dyn Fn(Progress) + Send + Sync>;

pub struct WorkflowController<E, C> {
    session: Mutex<SessionState>,
    engine: E,
    clipboard: C,
    language: String,
    progress_listener: Option<ProgressListener>,
}

impl<E: OcrEngine, C: Clipboard> WorkflowController<E, C> {
    pub fn new(engine: E, clipboard: C) -> Self {
        Self {
            session: Mutex::new(SessionState::new()),
            engine,
            clipboard,
            language: DEFAULT_LANGUAGE.to_string(),
            progress_listener: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_progress_listener(mut self, listener: ProgressListener) -> Self {
        self.progress_listener = Some(listener);
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn session(&self) -> MutexGuard<'_, SessionState> {
        lock_session(&self.session)
    }

    pub fn view(&self) -> SessionView {
        self.session().view()
    }

    /// Store a new image, replacing and releasing the previous one.
    pub fn upload(&self, image: ImageHandle) -> SessionView {
        log::info!(
            "[SESSION] Upload {} ({}, {} bytes)",
            image.name(),
            image.mime_type(),
            image.bytes().len()
        );
        let mut session = self.session();
        session.upload(image);
        session.view()
    }

    /// Read `path` and upload it. A read failure leaves the session as is.
    pub fn upload_path(&self, path: &Path) -> Result<SessionView, ImageError> {
        let image = ImageHandle::open(path)?;
        Ok(self.upload(image))
    }

    /// Run the OCR engine on the current image.
    ///
    /// Engine failures are logged and swallowed; the caller only sees
    /// `ExtractOutcome::Failed`.
    pub async fn extract(&self) -> ExtractOutcome {
        let ticket = match self.session().begin_extract() {
            Ok(ticket) => ticket,
            Err(rejected) => {
                log::debug!("[SESSION] Extract ignored: {:?}", rejected);
                return rejected.into();
            }
        };

        let image = ticket.image().clone();
        // Clears `busy` if this future is dropped before the engine returns.
        let pending = PendingExtract {
            session: &self.session,
            ticket: Some(ticket),
        };
        log::info!(
            "[OCR] Extracting {} with {} ({})",
            image.name(),
            self.engine.name(),
            self.language
        );

        let listener = self.progress_listener.clone();
        let on_progress = move |progress: Progress| {
            log::debug!("[OCR] {} {:.0}%", progress.status, progress.progress * 100.0);
            if let Some(listener) = &listener {
                listener(progress);
            }
        };

        let start = std::time::Instant::now();
        let result = self
            .engine
            .recognize(&image, &self.language, &on_progress)
            .await
            .map(|recognition| recognition.text);
        if let Err(e) = &result {
            log::error!("[OCR] Recognition failed for {}: {}", image.name(), e);
        }

        let outcome = pending.finish(result);
        match outcome {
            ExtractOutcome::Stale => {
                log::warn!("[SESSION] Discarded extraction of {}: image was reset or replaced", image.name())
            }
            _ => log::info!(
                "[SESSION] Extraction {:?} in {}ms",
                outcome,
                start.elapsed().as_millis()
            ),
        }
        outcome
    }

    /// Drop the image, text and status.
    pub fn reset(&self) -> SessionView {
        log::info!("[SESSION] Reset");
        let mut session = self.session();
        session.reset();
        session.view()
    }

    /// Copy the extracted text to the clipboard and record the outcome.
    pub async fn copy_to_clipboard(&self) -> CopyOutcome {
        let Some(ticket) = self.session().begin_copy() else {
            return CopyOutcome::NoText;
        };

        let result = self.clipboard.write_text(ticket.text()).await;
        if let Err(e) = &result {
            log::warn!("[CLIPBOARD] {}", e);
        }
        let outcome = self.session().finish_copy(ticket, &result);
        if outcome == CopyOutcome::Stale {
            log::info!("[SESSION] Dropped copy status: session was reset or replaced");
        }
        outcome
    }
}

/// An extraction whose ticket must go back to the session exactly once,
/// either with a result or, if the future is dropped, abandoned.
struct PendingExtract<'a> {
    session: &'a Mutex<SessionState>,
    ticket: Option<ExtractTicket>,
}

impl PendingExtract<'_> {
    fn finish<E>(mut self, result: Result<String, E>) -> ExtractOutcome {
        let session = self.session;
        match self.ticket.take() {
            Some(ticket) => lock_session(session).finish_extract(ticket, result),
            None => ExtractOutcome::Stale,
        }
    }
}

impl Drop for PendingExtract<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            log::warn!("[SESSION] Extraction of {} cancelled", ticket.image().name());
            lock_session(self.session).abandon_extract(ticket);
        }
    }
}

// A poisoned lock only means a panic elsewhere mid-transition; every
// transition leaves the state consistent, so keep using it.
fn lock_session(session: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    session.lock().unwrap_or_else(|e| e.into_inner())
}
