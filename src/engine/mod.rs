//! Public façade for the engine layer.

pub mod adapter;
pub mod orchestrator;
pub mod stats;

pub use adapter::{solve_or_derive, Derived, DerivedForms, ParseFailure};
pub use orchestrator::{interpret, Interpreter};

#[cfg(test)]
mod tests;
