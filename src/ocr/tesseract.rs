//! Runs the `tesseract` command-line binary: `tesseract <image> stdout -l <lang>`.

use super::{OcrEngine, OcrError};
use crate::config::OcrConfig;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.tesseract_cmd.clone())
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::from_config(&OcrConfig::default())
    }
}

impl OcrEngine for TesseractCli {
    #[instrument(skip(self), fields(command = %self.command))]
    fn image_to_text(&self, image: &Path, language_hint: &str) -> Result<Option<String>, OcrError> {
        if !image.is_file() {
            return Err(OcrError::ImageNotFound(image.to_path_buf()));
        }

        let mut command = Command::new(&self.command);
        command.arg(image).arg("stdout");
        if !language_hint.trim().is_empty() {
            command.arg("-l").arg(language_hint.trim());
        }

        let output = command.output().map_err(|source| match source.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => OcrError::EngineUnavailable {
                command: self.command.clone(),
                source,
            },
            _ => OcrError::Io(source),
        })?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.chars().count(), "OCR finished");
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}
