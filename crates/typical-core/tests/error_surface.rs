use typical_core::errors::{ErrorInfo, TypicalError};
use typical_core::serde::from_json_slice;

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("function", "average")
        .with_context("parameter", "x")
}

#[test]
fn argument_error_surface() {
    let err = TypicalError::Argument(sample_info("argument-mismatch", "bad x"));
    assert_eq!(err.info().code, "argument-mismatch");
    assert_eq!(err.info().context_value("parameter"), Some("x"));
    assert!(err.is_contract_violation());
}

#[test]
fn return_error_surface() {
    let err = TypicalError::Return(sample_info("return-mismatch", "bad result"));
    assert_eq!(err.info().code, "return-mismatch");
    assert!(err.is_contract_violation());
}

#[test]
fn call_error_is_not_a_contract_violation() {
    let err = TypicalError::call("missing-argument", "missing x");
    assert_eq!(err.info().code, "missing-argument");
    assert!(!err.is_contract_violation());
}

#[test]
fn display_includes_context_and_hint() {
    let info = ErrorInfo::new("E001", "problem")
        .with_context("function", "f")
        .with_hint("pass an int");
    let err = TypicalError::Config(info);
    assert_eq!(
        err.to_string(),
        "config error: problem (code: E001) | context: [function=f] | hint: pass an int"
    );
}

#[test]
fn errors_round_trip_through_json() {
    let err = TypicalError::Argument(sample_info("argument-mismatch", "bad x"));
    let bytes = serde_json::to_vec(&err).expect("serialize");
    let decoded: TypicalError = from_json_slice(&bytes).expect("deserialize");
    assert_eq!(decoded, err);
}
