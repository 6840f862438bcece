//! Picks the line of an OCR dump that holds the exercise.

use super::cleaner::Cleaner;
use tracing::debug;

const MATH_OPERATORS: &[char] = &['+', '-', '*', '/', '=', '(', ')'];

/// Characters allowed to trail an instruction word (`Resuelve,`).
const WORD_PUNCTUATION: &[char] = &[',', ';', '.', ':'];

/// Characters that make the previous word an operand rather than prose.
const OPERAND_FOLLOWERS: &[char] = &['+', '-', '*', '/', '=', '^', ')'];

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{b}' | '\u{c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

pub struct LineSelector;

impl LineSelector {
    /// A line with at least one digit and one operator, `=` or parenthesis.
    pub fn looks_mathematical(line: &str) -> bool {
        line.chars().any(|c| c.is_ascii_digit()) && line.contains(MATH_OPERATORS)
    }

    /// Returns the last mathematical line, else the last non-empty line, else `""`.
    ///
    /// OCR fixes are applied first. On a mathematical line, an instruction in
    /// front of the expression (`Factorizar: ...`, `Resuelve 2x + 4 = 10`) is
    /// dropped; the decision is made on the uncorrected text so words like
    /// `Simplifique` are recognised.
    pub fn select(text: &str) -> String {
        let corrected = Cleaner::correct_ocr(text);
        // Corrections are char-for-char, so both splits line up.
        let lines: Vec<(&str, &str)> = text
            .split(is_line_break)
            .zip(corrected.split(is_line_break))
            .map(|(raw, fixed)| (raw.trim(), fixed.trim()))
            .filter(|(_, fixed)| !fixed.is_empty())
            .collect();

        let chosen = lines
            .iter()
            .rev()
            .find(|(_, fixed)| Self::looks_mathematical(fixed))
            .or_else(|| lines.last());
        let (raw, fixed) = match chosen {
            Some(pair) => *pair,
            None => return String::new(),
        };

        if !Self::looks_mathematical(fixed) {
            return fixed.to_string();
        }
        let skip = Self::prompt_length(raw);
        let candidate: String = fixed.chars().skip(skip).collect();
        let candidate = candidate.trim().to_string();
        debug!(line = fixed, candidate = %candidate, "selected candidate line");
        candidate
    }

    /// Number of leading characters of `line` that form an instruction.
    fn prompt_length(line: &str) -> usize {
        let chars: Vec<char> = line.chars().collect();
        let mut start = match chars.iter().rposition(|&c| c == ':') {
            Some(colon) if chars[colon + 1..].iter().any(|c| !c.is_whitespace()) => colon + 1,
            _ => 0,
        };

        loop {
            let word_start = start + chars[start..].iter().take_while(|c| c.is_whitespace()).count();
            let word_len = chars[word_start..]
                .iter()
                .take_while(|c| !c.is_whitespace())
                .count();
            let word_end = word_start + word_len;
            let next = chars[word_end..].iter().find(|c| !c.is_whitespace());
            let word = chars[word_start..word_end]
                .iter()
                .collect::<String>();
            let word = word.trim_end_matches(WORD_PUNCTUATION);

            let is_prose = word.chars().count() >= 2
                && word.chars().all(char::is_alphabetic)
                && next.map_or(false, |c| !OPERAND_FOLLOWERS.contains(c));
            if !is_prose {
                return start;
            }
            start = word_end;
        }
    }
}
