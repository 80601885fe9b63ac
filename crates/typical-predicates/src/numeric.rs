use typical_core::{Checker, Value};

use crate::{all_elements, decorated};

fn numeric_scalar(value: &Value) -> bool {
    value.as_f64().is_some()
}

// Text never converts, even when it spells a number.
fn finite_scalar(value: &Value) -> bool {
    match value {
        Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Object(_) => {
            value.as_f64().is_some_and(f64::is_finite)
        }
        Value::List(items) | Value::Tuple(items) => items.iter().all(finite_scalar),
        Value::Range(_) => true,
        Value::Array(array) => array.flat().iter().all(|x| x.is_finite()),
        _ => false,
    }
}

/// Whether the value, or each of its elements, coerces to a float.
///
/// Dictionaries are judged on their values and arrays on their flat
/// elements. Numeric text counts, so `"12"` is numeric while `"1.5"` is not
/// (its `'.'` character does not convert).
pub fn is_numeric(value: &Value) -> bool {
    all_elements(value, numeric_scalar)
}

/// Whether the value, or each of its elements, is made of finite numbers.
/// Empty containers are vacuously finite.
pub fn is_finite(value: &Value) -> bool {
    all_elements(value, finite_scalar)
}

/// Checker form of [`is_numeric`].
pub fn numeric() -> Checker {
    decorated("numeric", is_numeric)
}

/// Checker form of [`is_finite`].
pub fn finite() -> Checker {
    decorated("finite", is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_scalar_recurses_through_sequences() {
        let nested = Value::list([
            Value::tuple([Value::Int(1), Value::Float(2.0)]),
            Value::list([]),
        ]);
        assert!(finite_scalar(&nested));
        let poisoned = Value::list([Value::Int(1), Value::from("2")]);
        assert!(!finite_scalar(&poisoned));
    }

    #[test]
    fn numeric_scalar_accepts_numeric_text() {
        assert!(numeric_scalar(&Value::from(" 42 ")));
        assert!(!numeric_scalar(&Value::from("forty-two")));
    }
}
