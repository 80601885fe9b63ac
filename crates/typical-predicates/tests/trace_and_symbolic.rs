mod common;

use std::collections::BTreeMap;

use typical_core::errors::TypicalError;
use typical_core::serde::from_json_slice;
use typical_core::{exactly, Kind, NdArray, Range, Value};
use typical_predicates::{is_symbolic, is_trace_data, symbols, symbolic, trace_data, Expr};

use common::{entries, junk, pair, symbolic_scalars};

fn trace(x: Value, y: Value, name: Option<&str>) -> Value {
    let mut items = vec![("x", x), ("y", y)];
    if let Some(name) = name {
        items.push(("name", Value::from(name)));
    }
    entries(items)
}

#[test]
fn trace_data_rejects_junk() {
    let mut rejected = junk();
    rejected.extend([
        pair(true, 49.3),
        entries(vec![("r", pair(f64::NEG_INFINITY, 4.3))]),
        trace(Value::list([]), Value::from(Range::between(1, 4)), Some("bs")),
        entries(vec![
            ("y", Value::from(Range::between(1, 4))),
            ("name", Value::from("bs")),
        ]),
        trace(
            Value::from(Range::to(2)),
            Value::from(Range::between(1, 4)),
            Some("bs"),
        ),
        trace(
            Value::from(Range::between(12, 15)),
            Value::from(Range::between(1, 4)),
            None,
        ),
        trace(Value::from(Range::to(3)), Value::from("abc"), Some("")),
    ]);
    for value in rejected {
        assert!(!is_trace_data(&value), "{value}");
    }
}

#[test]
fn trace_data_accepts_plottable_dicts() {
    let accepted = [
        trace(
            Value::list([
                Value::Float(98375.4),
                Value::from("sdfdfs".len()),
                Value::Int(21),
            ]),
            Value::from(Range::between(1, 4)),
            Some("random data"),
        ),
        trace(
            Value::list([Value::Int(0), Value::Int(0), Value::Int(0)]),
            Value::from(Range::between(1, 4)),
            Some(""),
        ),
        trace(
            Value::from(NdArray::from_vec(vec![0.5, 1.5, 2.5])),
            Value::from(NdArray::arange(3)),
            Some("arrays"),
        ),
    ];
    for value in accepted {
        assert!(is_trace_data(&value), "{value}");
    }
    assert_eq!(trace_data().to_string(), "trace_data");
}

#[test]
fn trace_data_rejects_non_finite_points() {
    let value = trace(
        Value::list([Value::Int(0), Value::Float(f64::NAN)]),
        Value::list([Value::Int(1), Value::Int(2)]),
        Some("gap"),
    );
    assert!(!is_trace_data(&value));
}

#[test]
fn symbolic_accepts_numbers_and_expressions() {
    for value in symbolic_scalars() {
        assert!(is_symbolic(&value), "{value}");
    }
    let [x, y]: [Expr; 2] = symbols("x y").try_into().expect("two symbols");
    let mixed = Value::list([Value::from(x), Value::Int(2), Value::from(y.pow(2))]);
    assert!(symbolic().accepts(&mixed));
}

#[test]
fn symbolic_rejects_non_numeric_values() {
    for value in [
        Value::None,
        Value::from("x"),
        Value::Type(Kind::Float),
        Value::list([Value::from(Expr::symbol("x")), Value::None]),
    ] {
        assert!(!is_symbolic(&value), "{value}");
    }
}

#[test]
fn expressions_are_opaque_values() {
    let expr = Value::from(Expr::symbol("x") * Expr::symbol("y"));
    assert_eq!(expr.kind(), Kind::Named("Expr"));
    assert_eq!(expr.kind().to_string(), "Expr");
    assert!(!expr.is_iterable());
    assert_eq!(expr, Value::from(Expr::symbol("x") * Expr::symbol("y")));
    assert_ne!(expr, Value::from(Expr::symbol("x")));
    assert_eq!(Value::from(Expr::number(2.0)).as_f64(), Some(2.0));
}

#[test]
fn nan_expressions_match_themselves() {
    let value = Value::from(Expr::number(f64::NAN) * Expr::symbol("x"));
    assert!(exactly(value.clone()).accepts(&value));
    assert_eq!(value, value.clone());
}

#[test]
fn expression_helpers() {
    let [x, y, z]: [Expr; 3] = symbols("x y z").try_into().expect("three symbols");
    let expr = 4.5 * z.pow(x.clone()) + Expr::func("cos", vec![y]);
    assert_eq!(
        expr.free_symbols().into_iter().collect::<Vec<_>>(),
        vec!["x", "y", "z"]
    );
    let bindings: BTreeMap<String, f64> =
        [("x".to_string(), 2.0), ("y".to_string(), 0.0), ("z".to_string(), 3.0)]
            .into_iter()
            .collect();
    assert_eq!(expr.evaluate(&bindings), Some(41.5));
    assert!(Expr::number(1.0).is_number());
    assert!(!x.is_number());
}

#[test]
fn expressions_round_trip_through_json() -> Result<(), TypicalError> {
    let [x, y]: [Expr; 2] = symbols("x y").try_into().expect("two symbols");
    let expr = (x + Expr::number(1.0)).pow(y);
    let bytes = serde_json::to_vec(&expr).expect("serialize");
    let decoded: Expr = from_json_slice(&bytes)?;
    assert_eq!(decoded, expr);
    Ok(())
}
