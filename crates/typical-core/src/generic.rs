//! Generic checkers and the combinators that build checkers from checkers.

use std::sync::Arc;

use crate::checker::Checker;
use crate::value::Value;

fn describe(name: &str, checkers: &[Checker]) -> String {
    let inner: Vec<String> = checkers.iter().map(ToString::to_string).collect();
    format!("{name}({})", inner.join(", "))
}

/// Accepts every value.
pub fn anything() -> Checker {
    Checker::predicate("anything", |_| true)
}

/// Accepts only [`Value::None`].
pub fn nothing() -> Checker {
    Checker::predicate("nothing", Value::is_none)
}

/// Accepts values that support sequential traversal.
pub fn iterable() -> Checker {
    Checker::predicate("iterable", Value::is_iterable)
}

/// Accepts values structurally equal to `expected`.
pub fn exactly(expected: impl Into<Value>) -> Checker {
    let expected = expected.into();
    let name = format!("exactly({expected})");
    Checker::predicate(name, move |value| *value == expected)
}

/// Accepts a value when at least one checker does; no checkers never accept.
pub fn one_of<I>(checkers: I) -> Checker
where
    I: IntoIterator,
    I::Item: Into<Checker>,
{
    let checkers: Arc<[Checker]> = checkers.into_iter().map(Into::into).collect();
    let name = describe("one_of", &checkers);
    Checker::fallible(name, move |value| {
        for checker in checkers.iter() {
            if checker.evaluate(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    })
}

/// Accepts a value when every checker does; no checkers always accept.
pub fn all_of<I>(checkers: I) -> Checker
where
    I: IntoIterator,
    I::Item: Into<Checker>,
{
    let checkers: Arc<[Checker]> = checkers.into_iter().map(Into::into).collect();
    let name = describe("all_of", &checkers);
    Checker::fallible(name, move |value| {
        for checker in checkers.iter() {
            if !checker.evaluate(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}
