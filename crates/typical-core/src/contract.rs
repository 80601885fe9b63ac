//! Call-time contract enforcement.
//!
//! A [`Signature`] is the annotation map of a callable: its name, its ordered
//! parameters with optional checkers and an optional return checker.
//! [`Checked`] wraps a callable with a signature and validates every
//! invocation under an [`EnforcementPolicy`].
//!
//! Binding rules:
//!
//! * positional arguments pair with parameters in declaration order and the
//!   pairing stops at the shorter of the two lists;
//! * parameters without a checker are never checked;
//! * keyword arguments are only checked when the policy enables
//!   `check_keywords`;
//! * a signature without any checker turns the wrapper into a pass-through.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::checker::{check, Checker};
use crate::errors::{ErrorInfo, TypicalError};
use crate::function::{Arguments, CallResult, Callable};
use crate::policy::{EnforcementPolicy, ValidationOrder, ViolationMode};
use crate::value::Value;

/// One declared parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    checker: Option<Checker>,
}

impl Parameter {
    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared checker, if any.
    pub fn checker(&self) -> Option<&Checker> {
        self.checker.as_ref()
    }
}

/// Declared argument and return contracts of a callable.
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    parameters: Vec<Parameter>,
    returns: Option<Checker>,
}

impl Signature {
    /// Starts a signature for the named function.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            returns: None,
        }
    }

    /// Declares a checked parameter.
    pub fn param(mut self, name: impl Into<String>, checker: impl Into<Checker>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            checker: Some(checker.into()),
        });
        self
    }

    /// Declares a parameter without a checker.
    pub fn unchecked(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            checker: None,
        });
        self
    }

    /// Declares the return checker.
    pub fn returns(mut self, checker: impl Into<Checker>) -> Self {
        self.returns = Some(checker.into());
        self
    }

    /// Function name used in violation messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|param| param.name == name)
    }

    /// Declared return checker.
    pub fn return_checker(&self) -> Option<&Checker> {
        self.returns.as_ref()
    }

    /// Whether any parameter or the return slot carries a checker.
    pub fn is_annotated(&self) -> bool {
        self.returns.is_some() || self.parameters.iter().any(|param| param.checker.is_some())
    }
}

fn argument_violation(
    function: &str,
    parameter: &str,
    checker: &Checker,
    value: &Value,
) -> TypicalError {
    let actual = value.kind().to_string();
    let message =
        format!("'{function}' accepts ({parameter}:{checker}), but was given {parameter}={actual}");
    TypicalError::Argument(
        ErrorInfo::new("argument-mismatch", message)
            .with_context("function", function)
            .with_context("parameter", parameter)
            .with_context("expected", checker.to_string())
            .with_context("actual", actual),
    )
}

fn return_violation(function: &str, checker: &Checker, value: &Value) -> TypicalError {
    let actual = value.kind().to_string();
    let message = format!("'{function}' returns {checker}, but result is {actual}");
    TypicalError::Return(
        ErrorInfo::new("return-mismatch", message)
            .with_context("function", function)
            .with_context("expected", checker.to_string())
            .with_context("actual", actual),
    )
}

/// A callable wrapped with its signature and enforcement policy.
#[derive(Debug, Clone)]
pub struct Checked {
    signature: Arc<Signature>,
    policy: EnforcementPolicy,
    func: Callable,
}

impl Checked {
    /// Wraps a closure; the callable takes the signature's name.
    pub fn new<F>(signature: Signature, func: F) -> Self
    where
        F: Fn(&Arguments) -> CallResult + Send + Sync + 'static,
    {
        let callable = Callable::new(signature.name().to_string(), func);
        Self::wrap(signature, callable)
    }

    /// Wraps an existing callable value.
    pub fn wrap(signature: Signature, func: Callable) -> Self {
        Self {
            signature: Arc::new(signature),
            policy: EnforcementPolicy::default(),
            func,
        }
    }

    /// Replaces the enforcement policy.
    pub fn with_policy(mut self, policy: EnforcementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Declared contracts.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Active enforcement policy.
    pub fn policy(&self) -> &EnforcementPolicy {
        &self.policy
    }

    /// Invokes the wrapped callable and enforces the declared contracts.
    pub fn call(&self, args: &Arguments) -> CallResult {
        if !self.policy.enabled || !self.signature.is_annotated() {
            return self.func.call(args);
        }
        trace!(
            function = self.signature.name(),
            order = ?self.policy.order,
            positional = args.args().len(),
            "checking call"
        );
        match self.policy.order {
            ValidationOrder::BeforeCall => {
                self.check_arguments(args)?;
                let result = self.func.call(args)?;
                self.check_result(&result)?;
                Ok(result)
            }
            ValidationOrder::AfterCall => {
                let result = self.func.call(args)?;
                self.check_arguments(args)?;
                self.check_result(&result)?;
                Ok(result)
            }
        }
    }

    /// Shorthand for calling with positional arguments only.
    pub fn call_with<I: IntoIterator<Item = Value>>(&self, values: I) -> CallResult {
        self.call(&Arguments::positional(values))
    }

    /// Converts the wrapper into a callable value that keeps enforcing.
    pub fn into_callable(self) -> Callable {
        let name = self.signature.name().to_string();
        Callable::new(name, move |args| self.call(args))
    }

    fn check_arguments(&self, args: &Arguments) -> Result<(), TypicalError> {
        for (param, value) in self.signature.parameters().iter().zip(args.args()) {
            if let Some(checker) = param.checker() {
                self.check_argument(param.name(), checker, value)?;
            }
        }
        if self.policy.check_keywords {
            for (name, value) in args.keywords() {
                if let Some(checker) = self.signature.parameter(name).and_then(Parameter::checker) {
                    self.check_argument(name, checker, value)?;
                }
            }
        }
        Ok(())
    }

    fn check_argument(
        &self,
        parameter: &str,
        checker: &Checker,
        value: &Value,
    ) -> Result<(), TypicalError> {
        if check(value, checker)? {
            return Ok(());
        }
        self.escalate(argument_violation(
            self.signature.name(),
            parameter,
            checker,
            value,
        ))
    }

    fn check_result(&self, result: &Value) -> Result<(), TypicalError> {
        let Some(checker) = self.signature.return_checker() else {
            return Ok(());
        };
        if check(result, checker)? {
            return Ok(());
        }
        self.escalate(return_violation(self.signature.name(), checker, result))
    }

    fn escalate(&self, violation: TypicalError) -> Result<(), TypicalError> {
        match self.policy.on_violation {
            ViolationMode::Raise => {
                debug!(error = %violation, "contract violation");
                Err(violation)
            }
            ViolationMode::Warn => {
                warn!(error = %violation, "contract violation tolerated");
                Ok(())
            }
        }
    }
}

/// Wraps `func` so that every call is validated against `signature`.
pub fn checks<F>(signature: Signature, func: F) -> Checked
where
    F: Fn(&Arguments) -> CallResult + Send + Sync + 'static,
{
    Checked::new(signature, func)
}

impl From<Checked> for Callable {
    fn from(checked: Checked) -> Self {
        checked.into_callable()
    }
}

impl From<Checked> for Checker {
    fn from(checked: Checked) -> Self {
        Checker::from(checked.into_callable())
    }
}

impl From<Checked> for Value {
    fn from(checked: Checked) -> Self {
        Value::Function(checked.into_callable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn unannotated_signature_is_not_annotated() {
        let signature = Signature::new("f").unchecked("x").unchecked("y");
        assert!(!signature.is_annotated());
        assert!(Signature::new("g").returns(Kind::Int).is_annotated());
    }

    #[test]
    fn violation_messages_follow_call_shape() {
        let err = argument_violation("average", "x", &Checker::from(Kind::Int), &Value::Float(5.5));
        assert_eq!(
            err.info().message,
            "'average' accepts (x:int), but was given x=float"
        );
        let err = return_violation("average", &Checker::from(Kind::Float), &Value::Int(15));
        assert_eq!(err.info().message, "'average' returns float, but result is int");
    }
}
