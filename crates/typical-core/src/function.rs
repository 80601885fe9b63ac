//! Callables and the per-invocation argument binding.

use std::fmt;
use std::sync::Arc;

use crate::errors::{ErrorInfo, TypicalError};
use crate::value::Value;

/// Result of invoking a [`Callable`].
pub type CallResult = Result<Value, TypicalError>;

type CallFn = dyn Fn(&Arguments) -> CallResult + Send + Sync;

/// Arguments supplied to one invocation: positional values followed by
/// named keyword values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
}

impl Arguments {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional-only argument list.
    pub fn positional<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keywords: Vec::new(),
        }
    }

    /// A single positional argument.
    pub fn single(value: Value) -> Self {
        Self::positional([value])
    }

    /// Appends a positional argument.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Adds (or replaces) a keyword argument.
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.keywords.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.keywords.push((name, value)),
        }
        self
    }

    /// Positional arguments in call order.
    pub fn args(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword arguments in call order.
    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }

    /// Positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Keyword argument called `name`.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Resolves a parameter by position first, then by keyword name.
    pub fn require(&self, index: usize, name: &str) -> Result<&Value, TypicalError> {
        self.get(index)
            .or_else(|| self.keyword(name))
            .ok_or_else(|| {
                TypicalError::Call(
                    ErrorInfo::new(
                        "missing-argument",
                        format!("missing required argument `{name}`"),
                    )
                    .with_context("parameter", name)
                    .with_context("position", index.to_string()),
                )
            })
    }
}

/// Shared, named, immutable function value.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<CallFn>,
}

impl Callable {
    /// Wraps a closure under the given display name.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Arguments) -> CallResult + Send + Sync + 'static,
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

    /// Invokes the callable.
    pub fn call(&self, args: &Arguments) -> CallResult {
        (self.func)(args)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
