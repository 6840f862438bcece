//! OCR artifact correction and operator normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// A glyph the OCR engine tends to read instead of a digit.
struct Confusion {
    glyphs: &'static [char],
    digit: char,
    /// What the next non-space character must be for the fix to apply.
    followed_by: fn(&char) -> bool,
}

/// Applied in this order; each pass sees the output of the previous one.
const CONFUSIONS: [Confusion; 3] = [
    Confusion {
        glyphs: &['S'],
        digit: '5',
        followed_by: char::is_ascii_alphanumeric,
    },
    Confusion {
        glyphs: &['l', 'I'],
        digit: '1',
        followed_by: char::is_ascii_digit,
    },
    Confusion {
        glyphs: &['O', 'o'],
        digit: '0',
        followed_by: char::is_ascii_digit,
    },
];

/// Anything outside ASCII letters, digits, operators and plain spaces.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-zA-Z+\-*/().= ]").expect("whitelist pattern is valid"));

pub struct Cleaner;

impl Cleaner {
    /// Reinterprets OCR-ambiguous glyphs that start a token (or follow `(`) and
    /// are followed by the kind of character a number would be.
    ///
    /// Passes repeat until nothing changes, so the result is stable under a
    /// second call. Every replacement maps one character to one character.
    pub fn correct_ocr(text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        loop {
            let mut changed = false;
            for confusion in &CONFUSIONS {
                changed |= Self::apply(&mut chars, confusion);
            }
            if !changed {
                return chars.into_iter().collect();
            }
        }
    }

    fn apply(chars: &mut [char], confusion: &Confusion) -> bool {
        let hits: Vec<usize> = (0..chars.len())
            .filter(|&i| confusion.glyphs.contains(&chars[i]))
            .filter(|&i| i == 0 || chars[i - 1].is_whitespace() || chars[i - 1] == '(')
            .filter(|&i| {
                chars[i + 1..]
                    .iter()
                    .find(|c| !c.is_whitespace())
                    .map_or(false, confusion.followed_by)
            })
            .collect();
        for &i in &hits {
            chars[i] = confusion.digit;
        }
        !hits.is_empty()
    }

    /// Maps typographic dashes and the division sign to ASCII, and `^` to `**`.
    pub fn normalize_symbols(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\u{2212}' | '\u{2013}' | '\u{2014}' => out.push('-'),
                '\u{00f7}' => out.push('/'),
                '^' => out.push_str("**"),
                other => out.push(other),
            }
        }
        out
    }

    /// Full normalization: OCR fixes, symbol mapping, whitelist filter, trim.
    pub fn normalize(text: &str) -> String {
        let corrected = Self::correct_ocr(text);
        let mapped = Self::normalize_symbols(&corrected);
        DISALLOWED.replace_all(&mapped, "").trim().to_string()
    }
}
