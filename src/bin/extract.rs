//! Headless front end: upload one image, extract, print, optionally copy.
//! Exits non-zero when nothing readable was recognized.
//!
//! Usage:
//!   extract <image>                 Print recognized text
//!   extract <image> --lang deu      Override OCR_LANGUAGE
//!   extract <image> --copy          Also copy the text to the clipboard
//!   extract <image> --json          Print the session view as JSON

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use text_extractor_lib::{
    headless, OcrConfig, OcrEngine, SystemClipboard, TesseractEngine, WorkflowController,
};

#[derive(Debug, Parser)]
#[command(name = "extract", version, about = "Extract text from an image with OCR")]
struct Args {
    /// Image file to read.
    image: PathBuf,

    /// Tesseract language code (overrides OCR_LANGUAGE).
    #[arg(short, long)]
    lang: Option<String>,

    /// Copy the extracted text to the system clipboard.
    #[arg(short, long)]
    copy: bool,

    /// Print the full session view as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Ok(cwd) = std::env::current_dir() {
        text_extractor_lib::config::load_dotenv(&cwd);
    }
    env_logger::init();

    let args = Args::parse();
    let config = OcrConfig::from_env();
    let language = args.lang.unwrap_or_else(|| config.language.clone());

    let engine = TesseractEngine::new(&config);
    if !engine.is_available().await {
        eprintln!("tesseract is not available; install it or set TESSERACT_PATH");
        return ExitCode::FAILURE;
    }

    let controller = WorkflowController::new(engine, SystemClipboard::new()).with_language(language);

    let view = match headless::extract_file(&controller, &args.image, args.copy).await {
        Ok(view) => view,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode session: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", view.extracted_text.as_deref().unwrap_or_default());
        if let Some(status) = &view.copy_status {
            eprintln!("{}", status);
        }
    }

    ExitCode::SUCCESS
}
