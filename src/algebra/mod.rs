//! Built-in computer-algebra backend.
//!
//! The pipeline only talks to [`AlgebraBackend`]. [`SymbolicBackend`] implements it
//! with exact rational arithmetic over multivariate polynomials, which is enough for
//! the school-level exercises the bot reads: products of sums, quotients, integer
//! powers, and equations of degree one or two.

pub mod expr;
pub mod factor;
pub mod parser;
pub mod poly;
pub mod rational;
pub mod solve;
pub mod univariate;

pub use expr::Expr;
pub use factor::{FactoredForm, Factorization};
pub use poly::{Monomial, Polynomial};
pub use rational::RationalFunction;
pub use solve::{Root, SolutionSet, Surd};

use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Expression is empty")]
    EmptyExpression,
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("Unexpected token '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Exponent must be an integer: {0}")]
    NonIntegerExponent(String),
    #[error("Exponent {exponent} exceeds the maximum of {max}")]
    ExponentTooLarge { exponent: String, max: u32 },
    #[error("Expression {expression} is too large to expand")]
    ExpressionTooLarge { expression: String },
    #[error("Cannot solve a degree {degree} equation in {variable}")]
    Unsolvable { variable: String, degree: u32 },
}

/// Capabilities the interpretation pipeline needs from a CAS.
pub trait AlgebraBackend {
    type Expr: Clone + fmt::Debug;
    type Solution: Clone + fmt::Debug + fmt::Display;
    type Error: std::error::Error;

    fn parse(&self, text: &str) -> Result<Self::Expr, Self::Error>;
    fn simplify(&self, expr: &Self::Expr) -> Result<Self::Expr, Self::Error>;
    fn expand(&self, expr: &Self::Expr) -> Result<Self::Expr, Self::Error>;
    fn factor(&self, expr: &Self::Expr) -> Result<Self::Expr, Self::Error>;
    /// `lhs - rhs`, used to move an equation to the form `expr = 0`.
    fn subtract(&self, lhs: &Self::Expr, rhs: &Self::Expr) -> Result<Self::Expr, Self::Error>;
    /// Free symbols in the backend's enumeration order.
    fn free_symbols(&self, expr: &Self::Expr) -> Vec<String>;
    fn is_zero(&self, expr: &Self::Expr) -> bool;
    /// Solves `expr = 0` for `variable`.
    fn solve(
        &self,
        expr: &Self::Expr,
        variable: &str,
    ) -> Result<SolutionSet<Self::Solution>, Self::Error>;
    /// Canonical string form (`**` powers, explicit `*`).
    fn render(&self, expr: &Self::Expr) -> String;
}

#[derive(Clone, Debug, PartialEq)]
enum Form {
    /// As written, with implicit products made explicit.
    Tree(Expr),
    /// Expanded numerator over expanded denominator.
    Canonical,
    Factored(FactoredForm),
}

/// A value together with the shape it should be printed in.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbolic {
    value: RationalFunction,
    form: Form,
}

impl Symbolic {
    pub fn value(&self) -> &RationalFunction {
        &self.value
    }

    fn canonical(value: RationalFunction) -> Self {
        Self {
            value,
            form: Form::Canonical,
        }
    }
}

impl fmt::Display for Symbolic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.form {
            Form::Tree(tree) => write!(f, "{}", tree),
            Form::Canonical => write!(f, "{}", self.value),
            Form::Factored(factored) => write!(f, "{}", factored),
        }
    }
}

/// Operators in a canonical rendering, `**` counted once.
fn operation_count(rendered: &str) -> usize {
    rendered
        .replace("**", "^")
        .chars()
        .filter(|c| matches!(c, '+' | '-' | '*' | '/' | '^'))
        .count()
}

#[derive(Clone, Debug)]
pub struct SymbolicBackend {
    max_exponent: u32,
}

impl SymbolicBackend {
    pub const DEFAULT_MAX_EXPONENT: u32 = 64;

    pub fn new(max_exponent: u32) -> Self {
        Self { max_exponent }
    }
}

impl Default for SymbolicBackend {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_EXPONENT)
    }
}

impl AlgebraBackend for SymbolicBackend {
    type Expr = Symbolic;
    type Solution = Root;
    type Error = BackendError;

    fn parse(&self, text: &str) -> Result<Symbolic, BackendError> {
        let tree = parser::parse(text)?;
        let value = tree.evaluate(self.max_exponent)?;
        Ok(Symbolic {
            value,
            form: Form::Tree(tree),
        })
    }

    fn simplify(&self, expr: &Symbolic) -> Result<Symbolic, BackendError> {
        let expanded = self.expand(expr)?;
        let factored = self.factor(expr)?;
        let (e, f) = (
            operation_count(&expanded.to_string()),
            operation_count(&factored.to_string()),
        );
        debug!(expanded = e, factored = f, "simplify: comparing forms");
        Ok(if f < e { factored } else { expanded })
    }

    fn expand(&self, expr: &Symbolic) -> Result<Symbolic, BackendError> {
        Ok(Symbolic::canonical(expr.value.clone()))
    }

    fn factor(&self, expr: &Symbolic) -> Result<Symbolic, BackendError> {
        Ok(Symbolic {
            value: expr.value.clone(),
            form: Form::Factored(FactoredForm::of(&expr.value)),
        })
    }

    fn subtract(&self, lhs: &Symbolic, rhs: &Symbolic) -> Result<Symbolic, BackendError> {
        Ok(Symbolic::canonical(lhs.value.sub(&rhs.value)?))
    }

    fn free_symbols(&self, expr: &Symbolic) -> Vec<String> {
        expr.value.symbols().into_iter().collect()
    }

    fn is_zero(&self, expr: &Symbolic) -> bool {
        expr.value.is_zero()
    }

    fn solve(&self, expr: &Symbolic, variable: &str) -> Result<SolutionSet<Root>, BackendError> {
        solve::solve(&expr.value, variable)
    }

    fn render(&self, expr: &Symbolic) -> String {
        expr.to_string()
    }
}
