//! Dispatch errors for conditional validators.

use thiserror::Error;

/// Failures reported when a conditional validator cannot pick a validator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No validator found for condition")]
    NoValidatorForCondition,

    #[error("No condition defined")]
    MissingCondition,
}
