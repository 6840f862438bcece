use num_bigint::BigInt;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static SIGNED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]+").expect("integer pattern is valid"));

pub struct Tokenizer;

impl Tokenizer {
    /// Signed integer literals in order of appearance, duplicates kept.
    ///
    /// Runs over the raw text. Literals of any length are kept exactly.
    pub fn extract_numbers(text: &str) -> Vec<BigInt> {
        let numbers: Vec<BigInt> = SIGNED_INTEGER
            .find_iter(text)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        debug!(count = numbers.len(), "extracted integer literals");
        numbers
    }
}
