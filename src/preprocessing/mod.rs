pub mod cleaner;
pub mod router;
pub mod selector;
pub mod tokenizer;

pub use cleaner::Cleaner;
pub use router::{Action, Intent, Statistic, ACTION_RULES, STATISTIC_RULES};
pub use selector::LineSelector;
pub use tokenizer::Tokenizer;

#[cfg(test)]
mod tests;
