//! Command-line surface: routes arguments to the library, prints reports.

pub mod commands;

use aleksbot_lib::config::Config;
use aleksbot_lib::engine::Interpreter;
use aleksbot_lib::ocr::{OcrEngine, TesseractCli};
use aleksbot_lib::postprocessing::Report;
use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, ExplainArgs, OcrArgs};
use std::fs;
use std::io::{self, Read};
use tracing::{info, warn};

const GUIDE: &str = "\
Cómo usar AleksBot:

1. Para explicar un ejercicio escrito:
   - aleksbot explain \"Factorizar: y^2 - 9\"
   - También puedes leerlo de un archivo con --file, o pasarlo por la entrada estándar.

2. Para reconocer una imagen (PNG, JPG, etc.):
   - Guarda la captura de pantalla como archivo.
   - aleksbot ocr captura.png
   - Agrega --explain para resolver el texto reconocido de una vez.

3. Verifica la información que el programa leyó de la imagen:
   - Si ves signos, números o expresiones mal leídas, corrige el texto a mano
     y vuelve a ejecutar aleksbot explain con el texto corregido.

4. Con --json el resultado se imprime en formato JSON.";

#[derive(Parser, Debug)]
#[command(
    name = "aleksbot",
    version,
    about = "Explains Spanish math exercises read from text or images."
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "ALEKSBOT_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config =
            Config::load(self.config.as_deref()).context("Failed to load configuration")?;
        match &self.command {
            Commands::Explain(args) => self.run_explain(&config, args),
            Commands::Ocr(args) => self.run_ocr(&config, args),
            Commands::Guide => {
                println!("{}", GUIDE);
                Ok(())
            }
        }
    }

    fn run_explain(&self, config: &Config, args: &ExplainArgs) -> Result<()> {
        let text = match (&args.text, &args.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read standard input")?;
                buffer
            }
        };
        let report = Interpreter::from_config(config).interpret(&text);
        self.print(&report)
    }

    fn run_ocr(&self, config: &Config, args: &OcrArgs) -> Result<()> {
        let engine = TesseractCli::from_config(&config.ocr);
        let language = args.lang.as_deref().unwrap_or(&config.ocr.language);
        let recognised = engine
            .image_to_text(&args.image, language)
            .with_context(|| format!("Failed to read {}", args.image.display()))?;

        let Some(text) = recognised else {
            warn!(image = %args.image.display(), "OCR produced no text");
            println!("No se detectó texto en la imagen.");
            return Ok(());
        };
        info!(chars = text.chars().count(), "OCR finished");

        let report = args
            .explain
            .then(|| Interpreter::from_config(config).interpret(&text));
        if self.json {
            let value = serde_json::json!({ "text": text, "report": report });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        println!("Texto reconocido:\n{}", text.trim_end());
        if let Some(report) = report {
            println!("\n{}", report);
        }
        Ok(())
    }

    fn print(&self, report: &Report) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{}", report);
        }
        Ok(())
    }
}
