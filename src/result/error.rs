//! Error type backing plain-message failures.

use thiserror::Error;

/// A failure that carries nothing but a human-readable message.
///
/// Created by [`ValidationResult::add_failure_message`](super::ValidationResult::add_failure_message)
/// and by checks that return a `&str` or `String`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FailureMessage(pub String);

impl FailureMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
