//! Image to text, through an external OCR engine.

pub mod tesseract;

pub use tesseract::TesseractCli;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),
    #[error("OCR engine '{command}' could not be started: {source}")]
    EngineUnavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("OCR engine failed (exit code {code:?}): {stderr}")]
    Failed { code: Option<i32>, stderr: String },
    #[error("I/O error while running OCR: {0}")]
    Io(#[from] std::io::Error),
}

/// Every OCR backend implements this.
pub trait OcrEngine {
    /// Recognised text, or `None` when the engine found nothing to read.
    fn image_to_text(&self, image: &Path, language_hint: &str) -> Result<Option<String>, OcrError>;
}
