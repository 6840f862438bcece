use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Mode,
    Mean,
    Median,
    Range,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Expand,
    Factor,
    Simplify,
    #[default]
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Intent {
    Statistic(Statistic),
    Algebra(Action),
}

/// Checked top to bottom, first hit wins. `media` also matches `mediana`,
/// so median texts are only reachable when they avoid that substring.
pub const STATISTIC_RULES: &[(&[&str], Statistic)] = &[
    (&["moda"], Statistic::Mode),
    (&["media", "promedio"], Statistic::Mean),
    (&["mediana"], Statistic::Median),
    (&["rango"], Statistic::Range),
];

/// Checked top to bottom: factor > expand > simplify.
pub const ACTION_RULES: &[(&[&str], Action)] = &[
    (&["factorizar", "factores", "factorice"], Action::Factor),
    (
        &[
            "multiplicar",
            "expanda",
            "expandir",
            "reescribir sin paréntesis",
            "reescriba sin paréntesis",
        ],
        Action::Expand,
    ),
    (&["simplificar", "simplifique"], Action::Simplify),
];

fn first_match<T: Copy>(rules: &[(&[&str], T)], lowered: &str) -> Option<T> {
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, value)| *value)
}

impl Statistic {
    pub fn detect(text: &str) -> Option<Self> {
        first_match(STATISTIC_RULES, &text.to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Statistic::Mode => "MODA",
            Statistic::Mean => "MEDIA",
            Statistic::Median => "MEDIANA",
            Statistic::Range => "RANGO",
        }
    }

    /// Noun with its article, as used in "calcular la moda".
    pub fn with_article(&self) -> &'static str {
        match self {
            Statistic::Mode => "la moda",
            Statistic::Mean => "la media",
            Statistic::Median => "la mediana",
            Statistic::Range => "el rango",
        }
    }
}

impl Action {
    pub fn detect(text: &str) -> Self {
        first_match(ACTION_RULES, &text.to_lowercase()).unwrap_or_default()
    }
}

impl Intent {
    /// Keyword classification over the whole text; statistics win over algebra.
    pub fn classify(text: &str) -> Self {
        match Statistic::detect(text) {
            Some(statistic) => Intent::Statistic(statistic),
            None => Intent::Algebra(Action::detect(text)),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Statistic(s) => write!(f, "statistic/{:?}", s),
            Intent::Algebra(a) => write!(f, "algebra/{:?}", a),
        }
    }
}
