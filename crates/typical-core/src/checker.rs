//! Checker values and the evaluation primitive.

use std::fmt;
use std::sync::Arc;

use crate::errors::TypicalError;
use crate::function::{Arguments, Callable};
use crate::value::{Kind, Value};

type PredicateFn = dyn Fn(&Value) -> Result<bool, TypicalError> + Send + Sync;

/// Named unary predicate shared between clones.
#[derive(Clone)]
pub struct Predicate {
    name: Arc<str>,
    func: Arc<PredicateFn>,
}

impl Predicate {
    /// Wraps a fallible predicate under a display name.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, TypicalError> + Send + Sync + 'static,
    {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            func: Arc::new(func),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the predicate.
    pub fn test(&self, value: &Value) -> Result<bool, TypicalError> {
        (self.func)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

/// Validation criterion for a single value.
#[derive(Debug, Clone)]
pub enum Checker {
    /// Instance-of match against a type descriptor.
    Type(Kind),
    /// Boolean predicate.
    Predicate(Predicate),
    /// Annotation that is neither a type nor callable; always passes.
    Inert(String),
}

impl Checker {
    /// Total predicate checker.
    pub fn predicate<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Checker::Predicate(Predicate::new(name, move |value| Ok(func(value))))
    }

    /// Predicate checker whose evaluation may fail; failures propagate to
    /// the caller of [`Checker::evaluate`].
    pub fn fallible<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, TypicalError> + Send + Sync + 'static,
    {
        Checker::Predicate(Predicate::new(name, func))
    }

    /// Inert annotation retained for display.
    pub fn inert(description: impl Into<String>) -> Self {
        Checker::Inert(description.into())
    }

    /// Evaluates the checker against one value.
    pub fn evaluate(&self, value: &Value) -> Result<bool, TypicalError> {
        check(value, self)
    }

    /// Total form of [`Checker::evaluate`]: an evaluation error counts as rejection.
    pub fn accepts(&self, value: &Value) -> bool {
        self.evaluate(value).unwrap_or(false)
    }
}

/// Evaluation primitive: type checkers test membership, predicates are
/// called, inert annotations pass.
pub fn check(value: &Value, checker: &Checker) -> Result<bool, TypicalError> {
    match checker {
        Checker::Type(kind) => Ok(kind.matches(value)),
        Checker::Predicate(predicate) => predicate.test(value),
        Checker::Inert(_) => Ok(true),
    }
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checker::Type(kind) => write!(f, "{kind}"),
            Checker::Predicate(predicate) => f.write_str(predicate.name()),
            Checker::Inert(description) => f.write_str(description),
        }
    }
}

impl From<Kind> for Checker {
    fn from(kind: Kind) -> Self {
        Checker::Type(kind)
    }
}

impl From<Predicate> for Checker {
    fn from(predicate: Predicate) -> Self {
        Checker::Predicate(predicate)
    }
}

impl From<Callable> for Checker {
    fn from(callable: Callable) -> Self {
        let name = callable.name().to_string();
        Checker::fallible(name, move |value| {
            callable
                .call(&Arguments::single(value.clone()))
                .map(|result| result.truthy())
        })
    }
}

impl From<Value> for Checker {
    fn from(value: Value) -> Self {
        match value {
            Value::Type(kind) => Checker::Type(kind),
            Value::Function(callable) => Checker::from(callable),
            other => Checker::Inert(other.to_string()),
        }
    }
}
