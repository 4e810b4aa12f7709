//! Errors raised by the validator itself rather than by its checks.

use thiserror::Error;

/// Failures that describe a misconfigured validator.
///
/// These are recorded into the returned result like any other failure; they
/// are never returned as `Err`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No validation steps defined")]
    NoStepsDefined,
}
