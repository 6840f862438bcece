//! Reads OCR'd or typed Spanish math exercises and explains them.

pub mod algebra;
pub mod config;
pub mod engine;
pub mod ocr;
pub mod postprocessing;
pub mod preprocessing;

pub use config::Config;
pub use engine::{interpret, Interpreter};
pub use postprocessing::Report;
