#![deny(missing_docs)]
#![doc = "Domain predicates for typical, exposed as ready-made checkers."]

use typical_core::{checks, Checker, Kind, Signature, Value};

/// Array and sequence shape predicates.
pub mod iterable;
/// Numeric and finiteness predicates.
pub mod numeric;
/// Bounds and optimization specification predicates.
pub mod optimization;
/// Plotting data predicates.
pub mod plottable;
/// Symbolic expressions and the predicate recognizing them.
pub mod symbolic;

pub use iterable::{is_scalar, scalar};
pub use numeric::{finite, is_finite, is_numeric, numeric};
pub use optimization::{bounds, is_bounds, is_specifications, specifications};
pub use plottable::{is_trace_data, trace_data};
pub use symbolic::{is_symbolic, symbols, symbolic, Expr};

/// Builds a checker from a plain test, routed through a checked callable
/// whose result must be a `bool`.
pub(crate) fn decorated(name: &'static str, test: fn(&Value) -> bool) -> Checker {
    let signature = Signature::new(name).unchecked("x").returns(Kind::Bool);
    let checked = checks(signature, move |args| {
        let value = args.require(0, "x")?;
        Ok(Value::Bool(test(value)))
    });
    Checker::from(checked)
}

/// Applies `base` to every element: dictionary values, flat array
/// elements, or the items of other iterables. Non-iterables are tested
/// directly.
pub(crate) fn all_elements(value: &Value, base: fn(&Value) -> bool) -> bool {
    match value {
        Value::Dict(dict) => dict.values().all(base),
        Value::Array(array) => array.flat().iter().all(|&x| base(&Value::Float(x))),
        other => match other.items() {
            Some(items) => items.iter().all(base),
            None => base(other),
        },
    }
}
