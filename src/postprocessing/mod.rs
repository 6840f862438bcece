//! Turns derived forms into what the user reads.

pub mod formatter;
pub mod report;

pub use formatter::prettify;
pub use report::{assemble, Evidence, Form, Report};
