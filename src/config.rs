//! Engine configuration from the environment.
//!
//! Values come from process env vars, optionally seeded from `.env.local`
//! or `.env` in a directory the front end picks. Bad values are logged and
//! replaced by defaults rather than failing startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Language passed to the engine when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "eng";
/// Tesseract "fully automatic page segmentation, but no OSD".
pub const DEFAULT_PSM: u8 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const MAX_PSM: u8 = 13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    pub language: String,
    /// Explicit engine binary. `None` means look it up on PATH.
    pub tesseract_path: Option<PathBuf>,
    pub page_seg_mode: u8,
    pub timeout: Duration,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            tesseract_path: None,
            page_seg_mode: DEFAULT_PSM,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OcrConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let language = match lookup("OCR_LANGUAGE").map(|l| l.trim().to_string()) {
            Some(lang) if !lang.is_empty() => lang,
            _ => defaults.language,
        };

        let tesseract_path = lookup("TESSERACT_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let page_seg_mode = match lookup("OCR_PSM") {
            None => defaults.page_seg_mode,
            Some(raw) => match raw.trim().parse::<u8>() {
                Ok(psm) if psm <= MAX_PSM => psm,
                _ => {
                    log::warn!("[CONFIG] Invalid OCR_PSM {:?}, using {}", raw, DEFAULT_PSM);
                    defaults.page_seg_mode
                }
            },
        };

        let timeout = match lookup("OCR_TIMEOUT_SECS") {
            None => defaults.timeout,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "[CONFIG] Invalid OCR_TIMEOUT_SECS {:?}, using {}",
                        raw,
                        DEFAULT_TIMEOUT_SECS
                    );
                    defaults.timeout
                }
            },
        };

        Self {
            language,
            tesseract_path,
            page_seg_mode,
            timeout,
        }
    }
}

/// Load `.env.local` → `.env` from `dir`. The first file found wins.
///
/// Runs before the logger exists, so it reports on stderr.
pub fn load_dotenv(dir: &Path) {
    'env_load: for env_file in [".env.local", ".env"] {
        let path = dir.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break 'env_load;
        }
    }
}
