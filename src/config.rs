//! Runtime settings: an optional TOML file, then `ALEKSBOT_*` environment overrides.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const ENV_MAX_INPUT_LENGTH: &str = "ALEKSBOT_MAX_INPUT_LENGTH";
pub const ENV_MAX_EXPONENT: &str = "ALEKSBOT_MAX_EXPONENT";
pub const ENV_TESSERACT_CMD: &str = "ALEKSBOT_TESSERACT_CMD";
pub const ENV_OCR_LANG: &str = "ALEKSBOT_OCR_LANG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

// ------------------------------------------------------------------
// 1. Configuration structs
// ------------------------------------------------------------------
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub algebra: AlgebraConfig,
    pub ocr: OcrConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Longer inputs are rejected before any processing, in characters.
    pub max_input_length: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AlgebraConfig {
    /// Largest `|n|` accepted in `x**n`.
    pub max_exponent: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OcrConfig {
    pub tesseract_cmd: String,
    pub language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_input_length: 10000,
        }
    }
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        Self { max_exponent: 64 }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            language: "spa+eng".to_string(),
        }
    }
}

// ------------------------------------------------------------------
// 2. Loading
// ------------------------------------------------------------------
impl Config {
    /// File (when given), then process environment, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup`, keyed by the `ENV_*` names.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_INPUT_LENGTH) {
            self.pipeline.max_input_length = parse_number(ENV_MAX_INPUT_LENGTH, value)?;
        }
        if let Some(value) = lookup(ENV_MAX_EXPONENT) {
            self.algebra.max_exponent = parse_number(ENV_MAX_EXPONENT, value)?;
        }
        if let Some(value) = lookup(ENV_TESSERACT_CMD) {
            self.ocr.tesseract_cmd = value;
        }
        if let Some(value) = lookup(ENV_OCR_LANG) {
            self.ocr.language = value;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // 3. Validation
    // ------------------------------------------------------------------
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.max_input_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pipeline.max_input_length",
                value: "0".to_string(),
            });
        }
        if self.algebra.max_exponent == 0 {
            return Err(ConfigError::InvalidValue {
                key: "algebra.max_exponent",
                value: "0".to_string(),
            });
        }
        if self.ocr.tesseract_cmd.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ocr.tesseract_cmd",
                value: self.ocr.tesseract_cmd.clone(),
            });
        }
        if self.ocr.language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ocr.language",
                value: self.ocr.language.clone(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pipeline.max_input_length, 10000);
        assert_eq!(config.algebra.max_exponent, 64);
        assert_eq!(config.ocr.tesseract_cmd, "tesseract");
        assert_eq!(config.ocr.language, "spa+eng");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[algebra]\nmax_exponent = 12\n\n[ocr]\nlanguage = \"spa\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.algebra.max_exponent, 12);
        assert_eq!(config.ocr.language, "spa");
        assert_eq!(config.ocr.tesseract_cmd, "tesseract");
        assert_eq!(config.pipeline.max_input_length, 10000);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[algebra\nmax_exponent = ").unwrap();
        assert!(matches!(Config::from_file(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                (ENV_MAX_INPUT_LENGTH, " 500 "),
                (ENV_TESSERACT_CMD, "/opt/tesseract/bin/tesseract"),
                (ENV_OCR_LANG, "eng"),
            ]))
            .unwrap();
        assert_eq!(config.pipeline.max_input_length, 500);
        assert_eq!(config.algebra.max_exponent, 64);
        assert_eq!(config.ocr.tesseract_cmd, "/opt/tesseract/bin/tesseract");
        assert_eq!(config.ocr.language, "eng");
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup_from(&[(ENV_MAX_EXPONENT, "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: ENV_MAX_EXPONENT, ref value } if value == "lots"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.algebra.max_exponent = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ocr.language = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
