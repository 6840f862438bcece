use aleksbot_lib::config::Config;
use aleksbot_lib::engine::stats::Number;
use aleksbot_lib::postprocessing::report::StatisticValue;
use aleksbot_lib::{interpret, Interpreter, Report};
use num_bigint::BigInt;

#[test]
fn simplify_instruction() {
    let report = interpret("Simplifique: 2x + 3x - 5");
    assert_eq!(report.final_answer().as_deref(), Some("5x - 5"));
    match report {
        Report::Expression(r) => {
            assert_eq!(r.original, "2x + 3x - 5");
            assert_eq!(r.parsed, "2*x + 3*x - 5");
            assert_eq!(r.factored.pretty, "5(x - 1)");
        }
        other => panic!("unexpected report: {other:?}"),
    }
}

#[test]
fn factor_instruction() {
    let report = interpret("Factorizar: y^2 - 9");
    assert_eq!(report.final_answer().as_deref(), Some("(y - 3)(y + 3)"));
}

#[test]
fn expand_instruction() {
    let report = interpret("Expandir (x+1)^2");
    assert_eq!(report.final_answer().as_deref(), Some("x^2 + 2x + 1"));
}

#[test]
fn linear_equation() {
    let report = interpret("Resuelve: 2x + 4 = 10");
    match &report {
        Report::Equation(r) => {
            assert_eq!(r.variable.as_deref(), Some("x"));
            assert_eq!(r.solutions.to_string(), "[3]");
            assert!(!r.ambiguous_variable);
        }
        other => panic!("unexpected report: {other:?}"),
    }
    assert_eq!(report.final_answer().as_deref(), Some("2x - 6 = 0"));
}

#[test]
fn quadratic_equation_with_surds() {
    match interpret("x^2 - 2 = 0") {
        Report::Equation(r) => assert_eq!(r.solutions.to_string(), "[-sqrt(2), sqrt(2)]"),
        other => panic!("unexpected report: {other:?}"),
    }
}

#[test]
fn mode_of_listed_data() {
    let report = interpret("Calcula la moda de los datos: 2, 3, 3, 5, 7");
    assert_eq!(
        report.to_string(),
        "Problema: MODA\nDatos: [2, 3, 3, 5, 7]\nModa(s): [3]\nFrecuencia: 2"
    );
}

#[test]
fn statistic_without_numbers() {
    assert_eq!(
        interpret("¿Cuál es la moda?").to_string(),
        "No encontré números para calcular la moda."
    );
}

#[test]
fn range_keeps_negative_numbers() {
    let report = interpret("Encuentra el rango: 4, 10, -2");
    assert_eq!(report.final_answer().as_deref(), Some("12"));
}

#[test]
fn median_wording_is_read_as_mean() {
    match interpret("¿Cuál es la mediana de 1, 2, 3, 10?") {
        Report::Statistic(r) => assert_eq!(r.value, StatisticValue::Mean(Number::Integer(BigInt::from(4)))),
        other => panic!("unexpected report: {other:?}"),
    }
}

#[test]
fn mode_of_numbers_beyond_machine_integers() {
    let report = interpret("moda de 99999999999999999999, 99999999999999999999, 1");
    assert_eq!(
        report.to_string(),
        "Problema: MODA\n\
         Datos: [99999999999999999999, 99999999999999999999, 1]\n\
         Moda(s): [99999999999999999999]\n\
         Frecuencia: 2"
    );
}

#[test]
fn statistics_win_over_algebra() {
    let report = interpret("Simplifique la moda de 1, 1, 2");
    assert!(matches!(report, Report::Statistic(_)), "{report:?}");
}

#[test]
fn empty_input() {
    assert_eq!(interpret(""), Report::EmptyInput);
    assert_eq!(interpret("  \n  "), Report::EmptyInput);
    assert_eq!(interpret("").to_string(), "No hay texto para analizar.");
}

#[test]
fn ocr_confusions_are_repaired() {
    match interpret("Sy + l2") {
        Report::Expression(r) => {
            assert_eq!(r.original, "5y + 12");
            assert_eq!(r.final_answer, "5y + 12");
        }
        other => panic!("unexpected report: {other:?}"),
    }
}

#[test]
fn last_mathematical_line_of_an_ocr_dump() {
    let text = "Pregunta 3\nFactorizar: y^2 - 9\nRespuesta:";
    assert_eq!(interpret(text).final_answer().as_deref(), Some("(y - 3)(y + 3)"));
}

#[test]
fn unparsable_expression() {
    let report = interpret("Simplifique: 2x + (3");
    assert_eq!(
        report.to_string(),
        "No pude interpretar la expresión.\n\
         Expresión original: 2x + (3\n\
         Expresión limpiada: 2x + (3\n\
         Error: Unexpected end of expression"
    );
}

#[test]
fn configured_length_limit() {
    let mut config = Config::default();
    config.pipeline.max_input_length = 5;
    let interpreter = Interpreter::from_config(&config);
    assert_eq!(
        interpreter.interpret("x + 1 + 2").to_string(),
        "El texto es demasiado largo (9 caracteres, máximo 5)."
    );
}

#[test]
fn reports_serialize_to_json() {
    let json = serde_json::to_value(interpret("Factorizar: y^2 - 9")).unwrap();
    assert_eq!(json["kind"], "expression");
    assert_eq!(json["final_answer"], "(y - 3)(y + 3)");
    assert_eq!(json["expanded"]["pretty"], "y^2 - 9");

    let json = serde_json::to_value(interpret("Resuelve: 2x + 4 = 10")).unwrap();
    assert_eq!(json["kind"], "equation");
    assert_eq!(json["variable"], "x");
    assert_eq!(json["solutions"]["values"][0], "3");
}

#[test]
fn factoring_with_large_coefficients_finishes() {
    let report = interpret("Factorizar: 720720x^2 + x - 963761198400");
    assert_eq!(
        report.final_answer().as_deref(),
        Some("720720x^2 + x - 963761198400")
    );
}

#[test]
fn quadratic_with_large_prime_radicand() {
    match interpret("Resuelve: x^2 = 1000000000000000000000000000057") {
        Report::Equation(r) => assert_eq!(
            r.solutions.to_string(),
            "[-sqrt(1000000000000000000000000000057), sqrt(1000000000000000000000000000057)]"
        ),
        other => panic!("unexpected report: {other:?}"),
    }
}

#[test]
fn oversized_powers_are_reported() {
    for text in [
        "Simplifique: (((2^64)^64)^64)^64",
        "Simplifique: ((x+y+z)^64)^64",
    ] {
        match interpret(text) {
            Report::ParseFailure(failure) => {
                assert!(failure.message.ends_with("is too large to expand"), "{failure:?}")
            }
            other => panic!("unexpected report for {text}: {other:?}"),
        }
    }
}

#[test]
fn shared_factors_in_two_symbols_cancel() {
    let report = interpret("Simplifique: (x^2 - y^2)/(x^2 + x*y - 2y^2)");
    assert_eq!(report.final_answer().as_deref(), Some("(x + y)/(x + 2y)"));
}
