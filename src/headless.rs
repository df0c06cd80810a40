//! One-shot extraction for the command line: upload a file, extract,
//! optionally copy, and decide whether the run succeeded.

use crate::clipboard::Clipboard;
use crate::controller::WorkflowController;
use crate::error::RunError;
use crate::ocr::OcrEngine;
use crate::session::{CopyOutcome, ExtractOutcome, SessionView};
use std::path::Path;

/// Run the whole workflow on `path` once.
///
/// Succeeds only when the engine completed and produced non-blank text.
/// A failed copy is logged and reported through `copy_status`, not as an
/// error, so the recognized text is still returned.
pub async fn extract_file<E: OcrEngine, C: Clipboard>(
    controller: &WorkflowController<E, C>,
    path: &Path,
    copy: bool,
) -> Result<SessionView, RunError> {
    controller.upload_path(path)?;

    let outcome = controller.extract().await;
    if outcome != ExtractOutcome::Completed {
        return Err(RunError::Extraction {
            path: path.to_path_buf(),
            outcome,
        });
    }

    let has_text = controller
        .view()
        .extracted_text
        .is_some_and(|text| !text.trim().is_empty());
    if !has_text {
        return Err(RunError::NoText {
            path: path.to_path_buf(),
        });
    }

    if copy {
        match controller.copy_to_clipboard().await {
            CopyOutcome::Copied => {}
            CopyOutcome::Failed => log::warn!("[CLIPBOARD] Copy failed"),
            outcome @ (CopyOutcome::NoText | CopyOutcome::Stale) => {
                log::debug!("[CLIPBOARD] Copy skipped: {:?}", outcome)
            }
        }
    }

    Ok(controller.view())
}
