//! Enforcement policy for checked callables, loadable from YAML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, TypicalError};
use crate::serde::{from_yaml_slice, to_yaml_string};

/// When parameter checkers run relative to the wrapped call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationOrder {
    /// Check parameters first and never invoke the callable on a violation.
    #[default]
    BeforeCall,
    /// Invoke the callable first, then check parameters and the result.
    AfterCall,
}

/// What happens once a checker rejects a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationMode {
    /// Fail the call with the violation.
    #[default]
    Raise,
    /// Log the violation and let the call proceed.
    Warn,
}

/// Enforcement policy applied by [`crate::contract::Checked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementPolicy {
    /// Ordering of parameter checks relative to the call.
    #[serde(default)]
    pub order: ValidationOrder,
    /// Reaction to a rejected value.
    #[serde(default)]
    pub on_violation: ViolationMode,
    /// Also check keyword arguments against same-named parameters.
    #[serde(default)]
    pub check_keywords: bool,
    /// Disabled policies turn checked callables into pass-throughs.
    #[serde(default = "EnforcementPolicy::default_enabled")]
    pub enabled: bool,
}

impl EnforcementPolicy {
    const fn default_enabled() -> bool {
        true
    }

    /// Call first, check afterwards, positional arguments only.
    pub fn after_call() -> Self {
        Self {
            order: ValidationOrder::AfterCall,
            ..Self::default()
        }
    }

    /// Same as the default policy but violations are only logged.
    pub fn warn_only() -> Self {
        Self {
            on_violation: ViolationMode::Warn,
            ..Self::default()
        }
    }

    /// Turns enforcement off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for EnforcementPolicy {
    fn default() -> Self {
        Self {
            order: ValidationOrder::default(),
            on_violation: ViolationMode::default(),
            check_keywords: false,
            enabled: Self::default_enabled(),
        }
    }
}

/// Loads an enforcement policy from the provided YAML path.
pub fn load_policy(path: &Path) -> Result<EnforcementPolicy, TypicalError> {
    let bytes = fs::read(path).map_err(|err| {
        TypicalError::Config(
            ErrorInfo::new("policy-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_yaml_slice(&bytes)
}

/// Writes an enforcement policy as YAML to the provided path.
pub fn save_policy(path: &Path, policy: &EnforcementPolicy) -> Result<(), TypicalError> {
    let yaml = to_yaml_string(policy)?;
    fs::write(path, yaml).map_err(|err| {
        TypicalError::Config(
            ErrorInfo::new("policy-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
