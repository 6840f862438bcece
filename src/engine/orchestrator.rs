//! High-level coordinator: raw text → intent → numbers or algebra → report.

use super::adapter::solve_or_derive;
use crate::algebra::{AlgebraBackend, SymbolicBackend};
use crate::config::Config;
use crate::postprocessing::{assemble, Evidence, Report};
use crate::preprocessing::{Cleaner, Intent, LineSelector, Tokenizer};
use tracing::{info, instrument};

pub struct Interpreter<B = SymbolicBackend> {
    backend: B,
    max_input_length: usize,
}

impl Interpreter<SymbolicBackend> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SymbolicBackend::new(config.algebra.max_exponent),
            config.pipeline.max_input_length,
        )
    }
}

impl Default for Interpreter<SymbolicBackend> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<B: AlgebraBackend> Interpreter<B> {
    pub fn new(backend: B, max_input_length: usize) -> Self {
        Self {
            backend,
            max_input_length,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Interprets one text blob. Every failure ends up inside the report.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub fn interpret(&self, text: &str) -> Report {
        if text.trim().is_empty() {
            return Report::EmptyInput;
        }
        let length = text.chars().count();
        if length > self.max_input_length {
            return Report::InputTooLong {
                length,
                max: self.max_input_length,
            };
        }

        let intent = Intent::classify(text);
        info!(%intent, "classified input");

        let evidence = match intent {
            Intent::Statistic(statistic) => Evidence::Statistic {
                statistic,
                numbers: Tokenizer::extract_numbers(text),
            },
            Intent::Algebra(action) => {
                let line = LineSelector::select(text);
                if Cleaner::normalize(&line).is_empty() {
                    return Report::NoExpression;
                }
                Evidence::Algebra {
                    action,
                    outcome: solve_or_derive(&self.backend, &line),
                }
            }
        };
        assemble(evidence)
    }
}

/// Interprets `text` with the built-in backend and default limits.
pub fn interpret(text: &str) -> Report {
    Interpreter::<SymbolicBackend>::default().interpret(text)
}
