#![deny(missing_docs)]
#![doc = "Checker values, combinators, and call-time contract enforcement for typical."]

/// Dense numeric arrays.
pub mod array;
/// Checker values and the evaluation primitive.
pub mod checker;
/// Signatures and checked callables.
pub mod contract;
/// Structured error types.
pub mod errors;
/// Callables and argument binding.
pub mod function;
/// Generic checkers and combinators.
pub mod generic;
/// Enforcement policy configuration.
pub mod policy;
/// Canonical JSON and YAML helpers.
pub mod serde;
/// Runtime values.
pub mod value;

pub use array::NdArray;
pub use checker::{check, Checker, Predicate};
pub use contract::{checks, Checked, Parameter, Signature};
pub use errors::{ErrorInfo, TypicalError};
pub use function::{Arguments, CallResult, Callable};
pub use generic::{all_of, anything, exactly, iterable, nothing, one_of};
pub use policy::{load_policy, save_policy, EnforcementPolicy, ValidationOrder, ViolationMode};
pub use value::{Dict, Kind, Object, Range, Value};
