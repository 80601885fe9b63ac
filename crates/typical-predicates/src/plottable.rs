use typical_core::{Checker, Value};

use crate::decorated;
use crate::numeric::is_finite;

// Length of a plottable series: a non-empty iterable of finite items.
fn series_len(series: Option<&Value>) -> Option<usize> {
    let series = series?;
    if !series.is_iterable() || !series.truthy() {
        return None;
    }
    let items = series.items()?;
    items.iter().all(is_finite).then_some(items.len())
}

/// Whether the value is a trace: a dictionary with a `name` entry and
/// non-empty `x` and `y` series of equal length whose items are finite.
pub fn is_trace_data(value: &Value) -> bool {
    let Value::Dict(dict) = value else {
        return false;
    };
    match (series_len(dict.get_str("x")), series_len(dict.get_str("y"))) {
        (Some(x_len), Some(y_len)) => x_len == y_len && dict.contains_str("name"),
        _ => false,
    }
}

/// Checker form of [`is_trace_data`].
pub fn trace_data() -> Checker {
    decorated("trace_data", is_trace_data)
}
