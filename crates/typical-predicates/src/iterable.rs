use typical_core::{Checker, Value};

use crate::decorated;

/// Whether the value has exactly one element: arrays of size one, other
/// iterables of length one, and every non-iterable value.
pub fn is_scalar(value: &Value) -> bool {
    match value {
        Value::Array(array) if array.ndim() > 0 => array.size() == 1,
        other if other.is_iterable() => other.len() == Some(1),
        _ => true,
    }
}

/// Checker form of [`is_scalar`].
pub fn scalar() -> Checker {
    decorated("scalar", is_scalar)
}
