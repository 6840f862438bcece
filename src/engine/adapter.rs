//! Runs the candidate line through the algebra backend.

use crate::algebra::{AlgebraBackend, SolutionSet};
use crate::preprocessing::Cleaner;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// The backend rejected the line or could not finish with it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ParseFailure {
    pub original: String,
    pub cleaned: String,
    pub message: String,
}

/// Canonical renderings of an expression, all computed up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionForms {
    pub parsed: String,
    pub simplified: String,
    pub expanded: String,
    pub factored: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationForms {
    /// `left - right`, to be read as `difference = 0`.
    pub difference: String,
    pub free_symbols: Vec<String>,
    /// First free symbol; `None` when there is none.
    pub variable: Option<String>,
    pub solutions: SolutionSet<String>,
}

impl EquationForms {
    /// The variable was a guess: zero or several symbols to pick from.
    pub fn is_ambiguous(&self) -> bool {
        self.free_symbols.len() != 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedForms {
    Expression(ExpressionForms),
    Equation(EquationForms),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    pub original: String,
    pub cleaned: String,
    pub forms: DerivedForms,
}

/// Parses `line` as an equation (split on the first `=`) or an expression.
#[instrument(skip(backend))]
pub fn solve_or_derive<B: AlgebraBackend>(backend: &B, line: &str) -> Result<Derived, ParseFailure> {
    let cleaned = Cleaner::normalize(line);
    let failure = |err: B::Error| {
        debug!(%err, "backend rejected the line");
        ParseFailure {
            original: line.to_string(),
            cleaned: cleaned.clone(),
            message: err.to_string(),
        }
    };

    let forms = match cleaned.split_once('=') {
        Some((lhs, rhs)) => {
            DerivedForms::Equation(derive_equation(backend, lhs, rhs).map_err(failure)?)
        }
        None => DerivedForms::Expression(derive_expression(backend, &cleaned).map_err(failure)?),
    };

    Ok(Derived {
        original: line.to_string(),
        cleaned,
        forms,
    })
}

fn derive_expression<B: AlgebraBackend>(
    backend: &B,
    text: &str,
) -> Result<ExpressionForms, B::Error> {
    let parsed = backend.parse(text)?;
    Ok(ExpressionForms {
        parsed: backend.render(&parsed),
        simplified: backend.render(&backend.simplify(&parsed)?),
        expanded: backend.render(&backend.expand(&parsed)?),
        factored: backend.render(&backend.factor(&parsed)?),
    })
}

fn derive_equation<B: AlgebraBackend>(
    backend: &B,
    lhs: &str,
    rhs: &str,
) -> Result<EquationForms, B::Error> {
    let left = backend.parse(lhs)?;
    let right = backend.parse(rhs)?;
    let difference = backend.subtract(&left, &right)?;
    let free_symbols = backend.free_symbols(&difference);
    let variable = free_symbols.first().cloned();

    if free_symbols.len() != 1 {
        warn!(symbols = ?free_symbols, "equation variable is ambiguous");
    }

    let solutions = match &variable {
        Some(var) => backend.solve(&difference, var)?.map(ToString::to_string),
        None if backend.is_zero(&difference) => SolutionSet::All,
        None => SolutionSet::Finite(Vec::new()),
    };

    Ok(EquationForms {
        difference: backend.render(&difference),
        free_symbols,
        variable,
        solutions,
    })
}
