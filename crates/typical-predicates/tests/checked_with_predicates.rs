mod common;

use typical_core::{checks, one_of, Checked, EnforcementPolicy, Signature, TypicalError, Value};
use typical_predicates::{bounds, finite, numeric, scalar, specifications, symbolic, Expr};

use common::{entries, pair};

fn inverse() -> Checked {
    let signature = Signature::new("f").param("x", numeric()).returns(finite());
    checks(signature, |args| {
        let x = args.require(0, "x")?.as_f64().unwrap_or(f64::NAN);
        Ok(Value::Float(1.0 / x))
    })
}

#[test]
fn numeric_argument_and_finite_result() {
    assert_eq!(inverse().call_with([Value::Int(5)]).expect("call"), Value::Float(0.2));

    let err = inverse().call_with([Value::from("abc")]).unwrap_err();
    assert!(matches!(err, TypicalError::Argument(_)));
    assert_eq!(err.info().message, "'f' accepts (x:numeric), but was given x=str");

    let err = inverse().call_with([Value::Int(0)]).unwrap_err();
    assert!(matches!(err, TypicalError::Return(_)));
    assert_eq!(err.info().message, "'f' returns finite, but result is float");
}

#[test]
fn warn_policy_returns_non_finite_result() {
    let tolerant = inverse().with_policy(EnforcementPolicy::warn_only());
    let result = tolerant.call_with([Value::Int(0)]).expect("call");
    assert_eq!(result, Value::Float(f64::INFINITY));
}

#[test]
fn optimizer_entry_point_validates_specifications() {
    let signature = Signature::new("minimize")
        .param("specs", specifications())
        .param("start", one_of([scalar(), bounds()]))
        .returns(symbolic());
    let minimize = checks(signature, |args| {
        let Some(Value::Dict(specs)) = args.get(0) else {
            return Err(TypicalError::call("specs-shape", "specs must be a dict"));
        };
        let lowest = specs
            .values()
            .filter_map(|bound| match bound {
                Value::Tuple(ends) => ends.first().and_then(Value::as_f64),
                _ => None,
            })
            .fold(f64::INFINITY, f64::min);
        Ok(Value::Float(lowest))
    });

    let specs = entries(vec![("a", pair(-2, 345)), ("b", pair(0.5, 1.5))]);
    let result = minimize
        .call_with([specs.clone(), Value::Float(0.0)])
        .expect("call");
    assert_eq!(result, Value::Float(-2.0));

    let infinite = entries(vec![("a", pair(f64::NEG_INFINITY, 1))]);
    let err = minimize
        .call_with([infinite, Value::Float(0.0)])
        .unwrap_err();
    assert_eq!(err.info().context_value("parameter"), Some("specs"));
    assert_eq!(err.info().context_value("expected"), Some("specifications"));

    let err = minimize
        .call_with([specs, Value::list([Value::Int(1), Value::Int(2)])])
        .unwrap_err();
    assert_eq!(err.info().context_value("expected"), Some("one_of(scalar, bounds)"));
}

#[test]
fn symbolic_results_pass_return_checks() {
    let signature = Signature::new("square").param("x", symbolic()).returns(symbolic());
    let square = checks(signature, |args| match args.require(0, "x")? {
        Value::Object(_) => {
            let expr = args
                .require(0, "x")?
                .downcast_object::<Expr>()
                .cloned()
                .ok_or_else(|| TypicalError::call("not-expr", "expected an expression"))?;
            Ok(Value::from(expr.pow(2)))
        }
        other => Ok(Value::Float(other.as_f64().unwrap_or_default().powi(2))),
    });
    let result = square
        .call_with([Value::from(Expr::symbol("t"))])
        .expect("call");
    assert_eq!(result.to_string(), "t**2");
    assert_eq!(square.call_with([Value::Int(3)]).expect("call"), Value::Float(9.0));
    assert!(square.call_with([Value::None]).is_err());
}
