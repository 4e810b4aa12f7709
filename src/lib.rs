//! Validator Chain: ordered validation steps that accumulate failures
//!
//! A [`Validator`] runs a list of user-supplied checks against one input, in
//! the order they were added, and collects every failure into a
//! [`ValidationResult`]. Steps, or the whole validator, can be marked
//! break-on-failure to stop a run at the first failing step.
//!
//! # Core Concepts
//!
//! - **Result**: ordered failure records with success/failure predicates
//! - **Validator**: ordered steps plus a validator-level break flag
//! - **Step**: one check function plus its own break flag
//! - **Conditional validator**: picks a validator from a value derived from the input
//!
//! Nested validators are flattened: their failures land in the parent result
//! at the position of the delegating step.
//!
//! # Example
//!
//! ```rust
//! use validator_chain::{ValidationResult, Validator};
//!
//! let mut name_rules = Validator::<String>::new();
//! name_rules
//!     .add_step(|name: &String| name.is_empty().then_some("name is empty"))
//!     .set_break_on_failure()
//!     .add_predicate(|name: &String| name.len() <= 8, "name is too long");
//!
//! let mut validator = Validator::<String>::new();
//! validator
//!     .add_predicate(|name: &String| name.is_ascii(), "name is not ascii")
//!     .add_sub_validator(name_rules);
//!
//! let result: ValidationResult = validator.validate(&"Bartholomew".to_string());
//! assert_eq!(result.failure_messages(), vec!["name is too long"]);
//!
//! let result = validator.validate(&String::new());
//! assert_eq!(result.render(), "name is empty");
//! ```

pub mod conditional;
pub mod result;
pub mod validator;

// Re-export commonly used types
pub use conditional::{ConditionalValidator, DispatchError};
pub use result::{Failure, FailureMessage, ValidationResult, FAILURE_DELIMITER};
pub use validator::{CheckFailure, ConfigurationError, Step, StepHandle, Validate, Validator};
