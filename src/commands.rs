//! Tauri command handlers.
//!
//! Thin wrappers that bridge frontend invoke() calls to the controller.
//! Every command returns the updated session view so the page can
//! re-render from a single source of truth.

use crate::handle::IMAGE_EXTENSIONS;
use crate::session::SessionView;
use crate::DesktopController;
use tauri_plugin_dialog::DialogExt;

/// Tauri command: current session, for the initial render.
#[tauri::command]
pub fn get_session(state: tauri::State<'_, DesktopController>) -> SessionView {
    state.view()
}

/// Tauri command: show the native file picker (images only) and upload
/// the chosen file. Cancelling leaves the session unchanged.
#[tauri::command]
pub async fn choose_image(
    app: tauri::AppHandle,
    state: tauri::State<'_, DesktopController>,
) -> Result<SessionView, String> {
    let picked = await_dialog(|done| {
        app.dialog()
            .file()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file(done)
    })
    .await?;

    let Some(file) = picked else {
        log::info!("[SESSION] File picker cancelled");
        return Ok(state.view());
    };
    let path = file.into_path().map_err(|e| e.to_string())?;
    state.upload_path(&path).map_err(|e| e.to_string())
}

/// Callback handed to a native dialog; called once with the user's choice.
type DialogCallback<T> = Box<dyn FnOnce(Option<T>) + Send>;

/// Show a callback-style dialog and await its answer without parking a
/// runtime thread. The dialog dropping its callback counts as an error.
async fn await_dialog<T, F>(show: F) -> Result<Option<T>, String>
where
    T: Send + 'static,
    F: FnOnce(DialogCallback<T>),
{
    let (tx, rx) = tokio::sync::oneshot::channel();
    show(Box::new(move |picked| {
        let _ = tx.send(picked);
    }));
    rx.await.map_err(|_| "file dialog closed without an answer".to_string())
}

/// Tauri command: upload an image by path (drag-and-drop, recent files).
#[tauri::command]
pub fn upload_image(
    state: tauri::State<'_, DesktopController>,
    path: String,
) -> Result<SessionView, String> {
    state
        .upload_path(std::path::Path::new(&path))
        .map_err(|e| e.to_string())
}

/// Tauri command: run OCR on the current image.
///
/// Recognition failures are not errors here: they are logged and the page
/// simply gets the non-busy view back.
#[tauri::command]
pub async fn extract_text(
    state: tauri::State<'_, DesktopController>,
) -> Result<SessionView, String> {
    let outcome = state.extract().await;
    log::debug!("[SESSION] extract_text -> {:?}", outcome);
    Ok(state.view())
}

/// Tauri command: clear image, text and copy status.
#[tauri::command]
pub fn reset_session(state: tauri::State<'_, DesktopController>) -> SessionView {
    state.reset()
}

/// Tauri command: copy the extracted text to the system clipboard.
#[tauri::command]
pub async fn copy_text(
    state: tauri::State<'_, DesktopController>,
) -> Result<SessionView, String> {
    state.copy_to_clipboard().await;
    Ok(state.view())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dialog_answer_from_another_thread_is_awaited() {
        let picked = await_dialog(|done| {
            std::thread::spawn(move || done(Some("scan.png".to_string())));
        })
        .await;
        assert_eq!(picked, Ok(Some("scan.png".to_string())));
    }

    #[tokio::test]
    async fn cancelled_dialog_yields_none() {
        let picked: Result<Option<String>, String> = await_dialog(|done| done(None)).await;
        assert_eq!(picked, Ok(None));
    }

    #[tokio::test]
    async fn dropped_callback_is_an_error() {
        let picked: Result<Option<String>, String> = await_dialog(drop).await;
        assert!(picked.is_err());
    }
}
