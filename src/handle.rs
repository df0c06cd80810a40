//! Image resource handles.
//!
//! An `ImageHandle` wraps the bytes of a user-selected file so the page can
//! display it and the OCR engine can consume it. Content is never decoded
//! here: a corrupt or non-image file is accepted and fails later at the
//! engine boundary.

use crate::error::ImageError;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

/// Extensions offered by the file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "pbm", "pgm", "ppm",
];

const FALLBACK_MIME: &str = "application/octet-stream";

/// Cheap-to-clone reference to a loaded image. Dropping the last clone
/// releases the bytes.
#[derive(Clone)]
pub struct ImageHandle {
    inner: Arc<ImageData>,
}

struct ImageData {
    id: String,
    name: String,
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl ImageHandle {
    /// Wrap in-memory bytes. `name` is whatever the user picked, for display.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let digest = Sha256::digest(&bytes);
        let id: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
        let mime_type = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(FALLBACK_MIME);

        Self {
            inner: Arc::new(ImageData {
                id,
                name: name.into(),
                mime_type,
                bytes,
            }),
        }
    }

    /// Read a file from disk into a handle.
    pub fn open(path: &Path) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_bytes(name, bytes))
    }

    /// Short content digest, stable for identical bytes.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// MIME type sniffed from magic bytes.
    pub fn mime_type(&self) -> &'static str {
        self.inner.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.inner.bytes
    }

    /// `data:` URL the webview can use as an `<img src>`.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.inner.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.inner.bytes)
        )
    }

    /// True if both handles refer to the same loaded resource.
    pub fn same_resource(&self, other: &ImageHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHandle")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("mime_type", &self.inner.mime_type)
            .field("len", &self.inner.bytes.len())
            .finish()
    }
}
