//! Structured error types shared across typical crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`TypicalError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (function, parameter, expected checker, ...).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Looks up a context entry.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

/// Canonical error type for checked calls and their configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum TypicalError {
    /// A declared parameter checker rejected the supplied argument.
    #[error("argument contract violation: {0}")]
    Argument(ErrorInfo),
    /// The declared return checker rejected the produced result.
    #[error("return contract violation: {0}")]
    Return(ErrorInfo),
    /// The wrapped callable failed on its own.
    #[error("call error: {0}")]
    Call(ErrorInfo),
    /// Enforcement policy errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl TypicalError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            TypicalError::Argument(info)
            | TypicalError::Return(info)
            | TypicalError::Call(info)
            | TypicalError::Config(info)
            | TypicalError::Serde(info) => info,
        }
    }

    /// Whether the error reports a parameter or return contract violation.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, TypicalError::Argument(_) | TypicalError::Return(_))
    }

    /// Shorthand for a [`TypicalError::Call`] raised from inside a wrapped callable.
    pub fn call(code: impl Into<String>, message: impl Into<String>) -> Self {
        TypicalError::Call(ErrorInfo::new(code, message))
    }
}
