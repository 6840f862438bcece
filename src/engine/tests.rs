use super::adapter::{EquationForms, ExpressionForms};
use super::stats::{self, Number};
use super::*;
use crate::algebra::{AlgebraBackend, SolutionSet, SymbolicBackend};
use crate::postprocessing::Report;
use num_bigint::BigInt;

fn derive(line: &str) -> Result<Derived, ParseFailure> {
    solve_or_derive(&SymbolicBackend::default(), line)
}

fn equation(line: &str) -> EquationForms {
    match derive(line).unwrap().forms {
        DerivedForms::Equation(forms) => forms,
        other => panic!("expected an equation, got {other:?}"),
    }
}

#[test]
fn test_expression_forms_are_all_computed() {
    let derived = derive("2x + 3x - 5").unwrap();
    assert_eq!(derived.original, "2x + 3x - 5");
    assert_eq!(derived.cleaned, "2x + 3x - 5");
    assert_eq!(
        derived.forms,
        DerivedForms::Expression(ExpressionForms {
            parsed: "2*x + 3*x - 5".into(),
            simplified: "5*x - 5".into(),
            expanded: "5*x - 5".into(),
            factored: "5*(x - 1)".into(),
        })
    );
}

#[test]
fn test_line_is_normalized_before_parsing() {
    let derived = derive("y^2 \u{2212} 9").unwrap();
    assert_eq!(derived.cleaned, "y**2 - 9");
    assert_eq!(derived.original, "y^2 \u{2212} 9");
}

#[test]
fn test_equation_with_single_variable() {
    let forms = equation("2x + 4 = 10");
    assert_eq!(forms.difference, "2*x - 6");
    assert_eq!(forms.free_symbols, vec!["x"]);
    assert_eq!(forms.variable.as_deref(), Some("x"));
    assert_eq!(forms.solutions, SolutionSet::Finite(vec!["3".to_string()]));
    assert!(!forms.is_ambiguous());
}

#[test]
fn test_equation_with_several_symbols_picks_first_alphabetically() {
    let forms = equation("y + x = 3");
    assert_eq!(forms.free_symbols, vec!["x", "y"]);
    assert_eq!(forms.variable.as_deref(), Some("x"));
    assert_eq!(forms.solutions, SolutionSet::Finite(vec!["-y + 3".to_string()]));
    assert!(forms.is_ambiguous());
}

#[test]
fn test_equation_without_symbols() {
    let forms = equation("5 = 5");
    assert_eq!(forms.variable, None);
    assert_eq!(forms.solutions, SolutionSet::All);
    assert!(forms.is_ambiguous());

    let forms = equation("2 = 3");
    assert_eq!(forms.solutions, SolutionSet::Finite(Vec::new()));
}

#[test]
fn test_only_first_equals_splits() {
    let failure = derive("2x = = 3").unwrap_err();
    assert_eq!(failure.original, "2x = = 3");
    assert!(failure.message.contains("Unexpected character '='"), "{}", failure.message);
}

#[test]
fn test_parse_failure_carries_both_texts() {
    let failure = derive("(x + 1 ;").unwrap_err();
    assert_eq!(failure.original, "(x + 1 ;");
    assert_eq!(failure.cleaned, "(x + 1");
    assert_eq!(failure.message, "Unexpected end of expression");
}

#[derive(Debug, thiserror::Error)]
#[error("backend offline")]
struct Offline;

/// A backend that rejects everything.
struct Refusing;

impl AlgebraBackend for Refusing {
    type Expr = ();
    type Solution = String;
    type Error = Offline;

    fn parse(&self, _: &str) -> Result<(), Offline> {
        Err(Offline)
    }
    fn simplify(&self, _: &()) -> Result<(), Offline> {
        Err(Offline)
    }
    fn expand(&self, _: &()) -> Result<(), Offline> {
        Err(Offline)
    }
    fn factor(&self, _: &()) -> Result<(), Offline> {
        Err(Offline)
    }
    fn subtract(&self, _: &(), _: &()) -> Result<(), Offline> {
        Err(Offline)
    }
    fn free_symbols(&self, _: &()) -> Vec<String> {
        Vec::new()
    }
    fn is_zero(&self, _: &()) -> bool {
        false
    }
    fn solve(&self, _: &(), _: &str) -> Result<SolutionSet<String>, Offline> {
        Err(Offline)
    }
    fn render(&self, _: &()) -> String {
        String::new()
    }
}

#[test]
fn test_backend_errors_become_parse_failures() {
    let failure = solve_or_derive(&Refusing, "x + 1").unwrap_err();
    assert_eq!(failure.message, "backend offline");

    let interpreter = Interpreter::new(Refusing, 100);
    match interpreter.interpret("Simplifique: x + 1") {
        Report::ParseFailure(failure) => assert_eq!(failure.cleaned, "x + 1"),
        other => panic!("unexpected report: {other:?}"),
    }
}

#[test]
fn test_interpreter_limits() {
    let interpreter = Interpreter::new(SymbolicBackend::default(), 10);
    assert_eq!(interpreter.interpret("   \n\t"), Report::EmptyInput);
    assert_eq!(
        interpreter.interpret("2x + 3x - 5 + 1"),
        Report::InputTooLong {
            length: 15,
            max: 10
        }
    );
    assert_eq!(interpreter.interpret("¿¿??"), Report::NoExpression);
}

fn ints(values: &[i64]) -> Vec<BigInt> {
    values.iter().copied().map(BigInt::from).collect()
}

fn integer(n: i64) -> Option<Number> {
    Some(Number::Integer(BigInt::from(n)))
}

#[test]
fn test_mode() {
    let modes = stats::mode(&ints(&[2, 3, 3, 5, 7])).unwrap();
    assert_eq!(modes.values, ints(&[3]));
    assert_eq!(modes.frequency, 2);

    let tied = stats::mode(&ints(&[1, 2, 2, 1, 3])).unwrap();
    assert_eq!(tied.values, ints(&[1, 2]));
    assert_eq!(tied.frequency, 2);

    assert!(stats::mode(&[]).is_none());
}

#[test]
fn test_mode_of_values_beyond_machine_integers() {
    let big: BigInt = "99999999999999999999".parse().unwrap();
    let numbers = vec![big.clone(), big.clone(), BigInt::from(1)];
    let modes = stats::mode(&numbers).unwrap();
    assert_eq!(modes.values, vec![big]);
    assert_eq!(modes.frequency, 2);
    assert_eq!(
        serde_json::to_value(&modes).unwrap(),
        serde_json::json!({ "values": ["99999999999999999999"], "frequency": 2 })
    );
}

#[test]
fn test_mean() {
    assert_eq!(stats::mean(&ints(&[2, 4])), integer(3));
    assert_eq!(stats::mean(&ints(&[1, 2])), Some(Number::Decimal(1.5)));
    assert_eq!(stats::mean(&ints(&[-3, 0])), Some(Number::Decimal(-1.5)));
    assert_eq!(
        stats::mean(&ints(&[1, 2, 2])).map(|n| n.to_string()),
        Some("1.6666666666666667".to_string())
    );
    assert!(stats::mean(&[]).is_none());
}

#[test]
fn test_median() {
    assert_eq!(stats::median(&ints(&[3, 1, 2])), integer(2));
    assert_eq!(stats::median(&ints(&[4, 1, 3, 2])), Some(Number::Decimal(2.5)));
    assert_eq!(stats::median(&ints(&[1, 3])), integer(2));
    assert!(stats::median(&[]).is_none());
}

#[test]
fn test_range() {
    assert_eq!(stats::range(&ints(&[5, -2, 9])), Some(BigInt::from(11)));
    assert_eq!(
        stats::range(&ints(&[i64::MIN, i64::MAX])),
        Some(BigInt::from(i64::MAX) - BigInt::from(i64::MIN))
    );
    assert!(stats::range(&[]).is_none());
}
