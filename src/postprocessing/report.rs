//! Final report: what was detected, every derived form, and the headline answer.

use super::formatter::prettify;
use crate::algebra::SolutionSet;
use crate::engine::adapter::{Derived, DerivedForms, EquationForms, ExpressionForms, ParseFailure};
use crate::engine::stats::{self, serialize_integer, serialize_integers, Modes, Number};
use crate::preprocessing::{Action, Statistic};
use num_bigint::BigInt;
use serde::Serialize;
use std::fmt;

/// Canonical backend rendering next to its display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Form {
    pub internal: String,
    pub pretty: String,
}

impl Form {
    pub fn new(internal: String) -> Self {
        let pretty = prettify(&internal);
        Self { internal, pretty }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticValue {
    Mode(Modes),
    Mean(Number),
    Median(Number),
    Range(#[serde(serialize_with = "serialize_integer")] BigInt),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticReport {
    #[serde(serialize_with = "serialize_integers")]
    pub data: Vec<BigInt>,
    pub value: StatisticValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpressionReport {
    pub final_answer: String,
    pub action: Action,
    pub original: String,
    pub parsed: String,
    pub simplified: Form,
    pub expanded: Form,
    pub factored: Form,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquationReport {
    pub final_answer: String,
    pub original: String,
    pub difference: Form,
    pub variable: Option<String>,
    pub free_symbols: Vec<String>,
    pub solutions: SolutionSet<String>,
    /// Zero or several free symbols; `variable` is only a best guess.
    pub ambiguous_variable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    EmptyInput,
    InputTooLong { length: usize, max: usize },
    NoUsableNumbers { statistic: Statistic },
    Statistic(StatisticReport),
    NoExpression,
    ParseFailure(ParseFailure),
    Expression(ExpressionReport),
    Equation(EquationReport),
}

/// What the pipeline gathered for the classified intent.
#[derive(Debug, Clone)]
pub enum Evidence {
    Statistic {
        statistic: Statistic,
        numbers: Vec<BigInt>,
    },
    Algebra {
        action: Action,
        outcome: Result<Derived, ParseFailure>,
    },
}

pub fn assemble(evidence: Evidence) -> Report {
    match evidence {
        Evidence::Statistic { statistic, numbers } => assemble_statistic(statistic, numbers),
        Evidence::Algebra { outcome: Err(failure), .. } => Report::ParseFailure(failure),
        Evidence::Algebra {
            action,
            outcome: Ok(derived),
        } => match derived.forms {
            DerivedForms::Expression(forms) => {
                Report::Expression(expression_report(action, derived.original, forms))
            }
            DerivedForms::Equation(forms) => {
                Report::Equation(equation_report(derived.original, forms))
            }
        },
    }
}

fn assemble_statistic(statistic: Statistic, numbers: Vec<BigInt>) -> Report {
    let value = match statistic {
        Statistic::Mode => stats::mode(&numbers).map(StatisticValue::Mode),
        Statistic::Mean => stats::mean(&numbers).map(StatisticValue::Mean),
        Statistic::Median => stats::median(&numbers).map(StatisticValue::Median),
        Statistic::Range => stats::range(&numbers).map(StatisticValue::Range),
    };
    match value {
        Some(value) => Report::Statistic(StatisticReport {
            data: numbers,
            value,
        }),
        None => Report::NoUsableNumbers { statistic },
    }
}

fn expression_report(action: Action, original: String, forms: ExpressionForms) -> ExpressionReport {
    let simplified = Form::new(forms.simplified);
    let expanded = Form::new(forms.expanded);
    let factored = Form::new(forms.factored);
    let final_answer = match action {
        Action::Expand => expanded.pretty.clone(),
        Action::Factor => factored.pretty.clone(),
        Action::Simplify | Action::None => simplified.pretty.clone(),
    };
    ExpressionReport {
        final_answer,
        action,
        original,
        parsed: forms.parsed,
        simplified,
        expanded,
        factored,
    }
}

fn equation_report(original: String, forms: EquationForms) -> EquationReport {
    let ambiguous_variable = forms.is_ambiguous();
    let difference = Form::new(forms.difference);
    EquationReport {
        final_answer: format!("{} = 0", difference.pretty),
        original,
        difference,
        variable: forms.variable,
        free_symbols: forms.free_symbols,
        solutions: forms.solutions,
        ambiguous_variable,
    }
}

impl StatisticValue {
    fn statistic(&self) -> Statistic {
        match self {
            StatisticValue::Mode(_) => Statistic::Mode,
            StatisticValue::Mean(_) => Statistic::Mean,
            StatisticValue::Median(_) => Statistic::Median,
            StatisticValue::Range(_) => Statistic::Range,
        }
    }

    fn answer(&self) -> String {
        match self {
            StatisticValue::Mode(modes) => list(&modes.values),
            StatisticValue::Mean(n) | StatisticValue::Median(n) => n.to_string(),
            StatisticValue::Range(n) => n.to_string(),
        }
    }
}

fn list<T: fmt::Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

impl Report {
    /// The headline answer, when the report has one.
    pub fn final_answer(&self) -> Option<String> {
        match self {
            Report::Expression(r) => Some(r.final_answer.clone()),
            Report::Equation(r) => Some(r.final_answer.clone()),
            Report::Statistic(r) => Some(r.value.answer()),
            _ => None,
        }
    }

    /// Whether the pipeline produced an answer rather than an explanation of why not.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Report::Statistic(_) | Report::Expression(_) | Report::Equation(_)
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::EmptyInput => write!(f, "No hay texto para analizar."),
            Report::InputTooLong { length, max } => write!(
                f,
                "El texto es demasiado largo ({} caracteres, máximo {}).",
                length, max
            ),
            Report::NoUsableNumbers { statistic } => write!(
                f,
                "No encontré números para calcular {}.",
                statistic.with_article()
            ),
            Report::NoExpression => write!(
                f,
                "No pude encontrar una expresión matemática clara en el texto."
            ),
            Report::ParseFailure(failure) => write!(
                f,
                "No pude interpretar la expresión.\nExpresión original: {}\nExpresión limpiada: {}\nError: {}",
                failure.original, failure.cleaned, failure.message
            ),
            Report::Statistic(r) => write!(f, "{}", r),
            Report::Expression(r) => write!(f, "{}", r),
            Report::Equation(r) => write!(f, "{}", r),
        }
    }
}

impl fmt::Display for StatisticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Problema: {}", self.value.statistic().label())?;
        writeln!(f, "Datos: {}", list(&self.data))?;
        match &self.value {
            StatisticValue::Mode(modes) => {
                writeln!(f, "Moda(s): {}", list(&modes.values))?;
                write!(f, "Frecuencia: {}", modes.frequency)
            }
            StatisticValue::Mean(n) => write!(f, "Media: {}", n),
            StatisticValue::Median(n) => write!(f, "Mediana: {}", n),
            StatisticValue::Range(n) => write!(f, "Rango: {}", n),
        }
    }
}

impl fmt::Display for ExpressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Respuesta final: {}\n", self.final_answer)?;
        writeln!(f, "Expresión detectada:\n{}\n", self.original)?;
        writeln!(f, "Interpretación interna:\n{}\n", self.parsed)?;
        let forms = [
            ("Simplificada", &self.simplified),
            ("Expandida", &self.expanded),
            ("Factorizada", &self.factored),
        ];
        for (i, (label, form)) in forms.iter().enumerate() {
            writeln!(f, "{} (forma interna):\n{}\n", label, form.internal)?;
            write!(f, "{} (bonita):\n{}", label, form.pretty)?;
            if i + 1 < forms.len() {
                write!(f, "\n\n")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for EquationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Respuesta final: {}\n", self.final_answer)?;
        writeln!(f, "Ecuación detectada:\n{}\n", self.original)?;
        writeln!(f, "Forma interna:\n{} = 0\n", self.difference.internal)?;
        writeln!(f, "Forma bonita:\n{} = 0\n", self.difference.pretty)?;
        match &self.variable {
            Some(var) => writeln!(f, "Variable: {}\n", var)?,
            None => writeln!(f, "Variable: (ninguna)\n")?,
        }
        write!(f, "Solución(es): {}", self.solutions)?;
        if self.ambiguous_variable {
            match (&self.variable, self.free_symbols.len()) {
                (Some(var), n) => write!(
                    f,
                    "\n\nAviso: la ecuación tiene {} variables libres ({}); se resolvió para {}.",
                    n,
                    self.free_symbols.join(", "),
                    var
                )?,
                (None, _) => write!(f, "\n\nAviso: la ecuación no tiene variables libres.")?,
            }
        }
        Ok(())
    }
}
