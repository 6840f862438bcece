//! Subcommands and their flags.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Explain a math exercise given as text
    Explain(ExplainArgs),

    /// Read an image with the OCR engine
    Ocr(OcrArgs),

    /// Print the usage guide
    Guide,
}

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Exercise text; read from stdin when neither this nor --file is given
    pub text: Option<String>,

    /// Read the exercise from a file
    #[arg(long, short, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct OcrArgs {
    /// Image file (PNG, JPG, BMP...)
    pub image: PathBuf,

    /// Language hint for the OCR engine, e.g. "spa+eng"
    #[arg(long)]
    pub lang: Option<String>,

    /// Interpret the recognised text right away
    #[arg(long)]
    pub explain: bool,
}
