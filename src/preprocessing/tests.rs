use super::*;
use num_bigint::BigInt;

#[test]
fn test_ocr_correction() {
    assert_eq!(Cleaner::correct_ocr("Sy + l2"), "5y + 12");
    assert_eq!(Cleaner::correct_ocr("(Sy - I0)"), "(5y - 10)");
    assert_eq!(Cleaner::correct_ocr("O2 + o 3"), "02 + 0 3");
    // Glyphs inside a word are left alone.
    assert_eq!(Cleaner::correct_ocr("xS2 + al3"), "xS2 + al3");
    // `l` before a letter is a variable, not a one.
    assert_eq!(Cleaner::correct_ocr("l + x"), "l + x");
}

#[test]
fn test_ocr_correction_reaches_a_fixpoint() {
    // The `I` only precedes a digit once the `O` has been fixed.
    assert_eq!(Cleaner::correct_ocr("I O5"), "1 05");
}

#[test]
fn test_normalize_symbols() {
    assert_eq!(Cleaner::normalize_symbols("x\u{2212}1 \u{2013} 2 \u{2014} 3"), "x-1 - 2 - 3");
    assert_eq!(Cleaner::normalize_symbols("6 \u{00f7} 2"), "6 / 2");
    assert_eq!(Cleaner::normalize_symbols("y^2"), "y**2");
}

#[test]
fn test_normalize_filters_and_trims() {
    assert_eq!(Cleaner::normalize("  Sy + l2  "), "5y + 12");
    assert_eq!(Cleaner::normalize("y^2 \u{2212} 9;"), "y**2 - 9");
    assert_eq!(Cleaner::normalize("¿2x + 3x - 5?"), "2x + 3x - 5");
    assert_eq!(Cleaner::normalize(""), "");
}

#[test]
fn test_normalize_drops_non_ascii_letters_and_punctuation() {
    assert_eq!(Cleaner::normalize("½x + é2; ñ"), "x + 2");
    assert_eq!(Cleaner::normalize("a\tb\nc"), "abc");
    assert_eq!(Cleaner::normalize("{x, y} = [1]"), "x y = 1");
}

#[test]
fn test_normalize_is_idempotent_on_whitelisted_text() {
    let samples = [
        "5y + 12",
        "Sy + l2",
        "I O5 = x",
        "(5y + 3z)(y - 7z)",
        "o o o 1",
        "  S S S a  ",
    ];
    for sample in samples {
        let once = Cleaner::normalize(sample);
        assert_eq!(Cleaner::normalize(&once), once, "input: {sample:?}");
    }
}

#[test]
fn test_select_prefers_last_mathematical_line() {
    let text = "Ejercicio 4\n\n  2x + 1 = 3  \nLuego factorizar:\ny^2 - 9\nBuena suerte";
    assert_eq!(LineSelector::select(text), "y^2 - 9");
}

#[test]
fn test_select_falls_back_to_last_non_empty_line() {
    let text = "hola\n\nsin numeros aqui\n   \n";
    assert_eq!(LineSelector::select(text), "sin numeros aqui");
    assert_eq!(LineSelector::select("uno\ndos"), "dos");
    assert_eq!(LineSelector::select("  \n \n"), "");
    assert_eq!(LineSelector::select(""), "");
}

#[test]
fn test_select_drops_instructions() {
    assert_eq!(LineSelector::select("Simplifique: 2x + 3x - 5"), "2x + 3x - 5");
    assert_eq!(LineSelector::select("Factorizar: y^2 - 9"), "y^2 - 9");
    assert_eq!(LineSelector::select("Resuelve 2x + 4 = 10"), "2x + 4 = 10");
    assert_eq!(
        LineSelector::select("Calcula la expresión (x+1)^2"),
        "(x+1)^2"
    );
}

#[test]
fn test_select_keeps_leading_variables() {
    assert_eq!(LineSelector::select("Sy + l2"), "5y + 12");
    assert_eq!(LineSelector::select("ab = 2"), "ab = 2");
}

#[test]
fn test_looks_mathematical() {
    assert!(LineSelector::looks_mathematical("2x + 1"));
    assert!(LineSelector::looks_mathematical("(3)"));
    assert!(!LineSelector::looks_mathematical("x + y"));
    assert!(!LineSelector::looks_mathematical("Ejercicio 4"));
}

#[test]
fn test_statistics_checked_in_order() {
    assert_eq!(
        Intent::classify("Calcula la moda y la media de 1, 2"),
        Intent::Statistic(Statistic::Mode)
    );
    assert_eq!(
        Intent::classify("El PROMEDIO de 4 y 6"),
        Intent::Statistic(Statistic::Mean)
    );
    // `mediana` contains `media`.
    assert_eq!(
        Intent::classify("la mediana de 1, 2, 3"),
        Intent::Statistic(Statistic::Mean)
    );
    assert_eq!(
        Intent::classify("Encuentra el rango: 3, 9"),
        Intent::Statistic(Statistic::Range)
    );
    assert_eq!(
        Intent::classify("Factorizar la moda"),
        Intent::Statistic(Statistic::Mode)
    );
}

#[test]
fn test_action_priority() {
    assert_eq!(
        Intent::classify("Factorizar y luego simplifique: x^2 - 1"),
        Intent::Algebra(Action::Factor)
    );
    assert_eq!(
        Intent::classify("Simplificar o expandir (x+1)^2"),
        Intent::Algebra(Action::Expand)
    );
    assert_eq!(
        Intent::classify("Reescriba sin paréntesis: 2(x + 1)"),
        Intent::Algebra(Action::Expand)
    );
    assert_eq!(
        Intent::classify("Simplifique: 2x + 3x - 5"),
        Intent::Algebra(Action::Simplify)
    );
    assert_eq!(Intent::classify("2x + 3"), Intent::Algebra(Action::None));
}

#[test]
fn test_keywords_are_accent_sensitive() {
    assert_eq!(
        Intent::classify("reescriba sin parentesis 2(x+1)"),
        Intent::Algebra(Action::None)
    );
}

#[test]
fn test_rules_are_ordered() {
    let actions: Vec<Action> = ACTION_RULES.iter().map(|(_, a)| *a).collect();
    assert_eq!(actions, vec![Action::Factor, Action::Expand, Action::Simplify]);
    let stats: Vec<Statistic> = STATISTIC_RULES.iter().map(|(_, s)| *s).collect();
    assert_eq!(
        stats,
        vec![
            Statistic::Mode,
            Statistic::Mean,
            Statistic::Median,
            Statistic::Range
        ]
    );
}

fn ints(values: &[i64]) -> Vec<BigInt> {
    values.iter().copied().map(BigInt::from).collect()
}

#[test]
fn test_extract_numbers() {
    assert_eq!(
        Tokenizer::extract_numbers("Calcula la moda de 2, 3, 3, 5, 7"),
        ints(&[2, 3, 3, 5, 7])
    );
    assert_eq!(Tokenizer::extract_numbers("de -4 a 10-3"), ints(&[-4, 10, -3]));
    assert!(Tokenizer::extract_numbers("sin datos").is_empty());
}

#[test]
fn test_extract_numbers_beyond_machine_integers() {
    let big: BigInt = "99999999999999999999999".parse().unwrap();
    assert_eq!(
        Tokenizer::extract_numbers("99999999999999999999999 y 4"),
        vec![big.clone(), BigInt::from(4)]
    );
    assert_eq!(Tokenizer::extract_numbers("-99999999999999999999999"), vec![-big]);
}
