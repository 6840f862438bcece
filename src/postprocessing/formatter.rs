//! Compact display form of canonical algebra output (`5*y**2` -> `5y^2`).

use once_cell::sync::Lazy;
use regex::Regex;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("prettify pattern is valid")
}

static DIGIT_TIMES_LETTER: Lazy<Regex> = Lazy::new(|| pattern(r"([0-9])\*([a-zA-Z])"));
static LETTER_TIMES_LETTER: Lazy<Regex> = Lazy::new(|| pattern(r"([a-zA-Z])\*([a-zA-Z])"));
static TIMES_OPEN_PAREN: Lazy<Regex> = Lazy::new(|| pattern(r"([a-zA-Z0-9)])\*\("));
static CLOSE_PAREN_TIMES: Lazy<Regex> = Lazy::new(|| pattern(r"\)\*([a-zA-Z0-9])"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| pattern(r"\s+"));

/// Removes the `*` signs the rules allow, until none is left to remove.
fn collapse_products(s: &str) -> String {
    let mut current = s.to_string();
    loop {
        let next = {
            let s = DIGIT_TIMES_LETTER.replace_all(&current, "${1}${2}");
            let s = LETTER_TIMES_LETTER.replace_all(&s, "${1}${2}");
            let s = TIMES_OPEN_PAREN.replace_all(&s, "${1}(");
            let s = CLOSE_PAREN_TIMES.replace_all(&s, ")${1}");
            s.into_owned()
        };
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Lexical rewrite only: digits, letters and the operators other than `*`
/// come out in the same order they went in.
pub fn prettify(internal: &str) -> String {
    let powers = internal.replace("**", "^");
    let collapsed = collapse_products(&powers);
    WHITESPACE.replace_all(&collapsed, " ").trim().to_string()
}
