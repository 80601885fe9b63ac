use typical_core::{Checker, Dict, NdArray, Value};

use crate::decorated;
use crate::numeric::{is_finite, is_numeric};

fn bounds_pair(lower: &Value, upper: &Value) -> bool {
    is_numeric(lower) && is_numeric(upper) && lower.le(upper)
}

fn bounds_tuple(value: &Value) -> bool {
    match value {
        Value::Tuple(ends) => match ends.as_slice() {
            [lower, upper] => bounds_pair(lower, upper),
            _ => false,
        },
        _ => false,
    }
}

fn bounds_dict(dict: &Dict) -> bool {
    !dict.is_empty() && dict.values().all(bounds_tuple)
}

fn bounds_array(array: &NdArray) -> bool {
    array.ndim() == 2
        && array.shape()[1] == 2
        && array
            .flat()
            .chunks(2)
            .all(|row| bounds_pair(&Value::Float(row[0]), &Value::Float(row[1])))
}

/// Whether the value describes lower/upper bounds.
///
/// Accepted layouts:
///
/// * a `(lower, upper)` tuple of numerics with `lower <= upper`;
/// * a non-empty dictionary whose values are all such tuples;
/// * a two-column 2-D array whose rows are all such pairs.
pub fn is_bounds(value: &Value) -> bool {
    match value {
        Value::Tuple(_) => bounds_tuple(value),
        Value::Dict(dict) => bounds_dict(dict),
        Value::Array(array) => bounds_array(array),
        _ => false,
    }
}

/// Whether the value is a bounds dictionary whose ends are all finite.
pub fn is_specifications(value: &Value) -> bool {
    let Value::Dict(dict) = value else {
        return false;
    };
    bounds_dict(dict)
        && dict.values().all(|bound| match bound {
            Value::Tuple(ends) => ends.iter().all(is_finite),
            _ => false,
        })
}

/// Checker form of [`is_bounds`].
pub fn bounds() -> Checker {
    decorated("bounds", is_bounds)
}

/// Checker form of [`is_specifications`].
pub fn specifications() -> Checker {
    decorated("specifications", is_specifications)
}
