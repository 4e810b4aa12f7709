//! Accumulated outcome of a validation run.
//!
//! A [`ValidationResult`] is an ordered list of [`Failure`] records. An empty
//! result is a success; anything else is a failure. Records keep the order in
//! which they were added, which for a validator run is the order in which the
//! failing steps executed.
//!
//! # Example
//!
//! ```rust
//! use validator_chain::result::ValidationResult;
//!
//! let mut result = ValidationResult::new();
//! result.add_failure_message("error-01");
//! result.add_failure_message("   ");
//! result.add_failure_message("error-02");
//!
//! assert!(result.is_failure());
//! assert_eq!(result.failure_messages(), vec!["error-01", "error-02"]);
//! assert_eq!(result.render(), "error-01;error-02");
//! ```

mod error;
mod failure;

pub use error::FailureMessage;
pub use failure::Failure;

use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Separator placed between messages by [`ValidationResult::render`].
pub const FAILURE_DELIMITER: &str = ";";

/// Ordered collection of failures produced by one validation run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[must_use]
pub struct ValidationResult {
    #[serde(default)]
    failures: Vec<Failure>,
}

impl ValidationResult {
    /// Create an empty (successful) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result holding exactly one failure.
    pub fn with_failure(failure: Failure) -> Self {
        Self {
            failures: vec![failure],
        }
    }

    /// Append a message failure. Empty or whitespace-only messages are ignored.
    pub fn add_failure_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.trim().is_empty() {
            return;
        }
        self.failures.push(Failure::from_message(message));
    }

    /// Append a failure as-is. Passing `None` is a no-op.
    ///
    /// ```rust
    /// use validator_chain::result::{Failure, ValidationResult};
    ///
    /// let mut result = ValidationResult::new();
    /// result.add_failure(None::<Failure>);
    /// assert!(result.is_success());
    ///
    /// result.add_failure(Failure::from_message("surname is empty"));
    /// assert_eq!(result.len(), 1);
    /// ```
    pub fn add_failure(&mut self, failure: impl Into<Option<Failure>>) {
        if let Some(failure) = failure.into() {
            self.failures.push(failure);
        }
    }

    /// Append every failure of `other`, keeping each record intact.
    pub fn merge(&mut self, other: ValidationResult) {
        self.failures.extend(other.failures);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Failures in insertion order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Rendered message of every failure, in insertion order.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failures.iter().map(Failure::message).collect()
    }

    /// All messages joined with [`FAILURE_DELIMITER`]; empty when successful.
    pub fn render(&self) -> String {
        self.failure_messages().join(FAILURE_DELIMITER)
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Failure> {
        self.failures.iter()
    }

    /// `Ok(())` on success, otherwise the result itself as the error.
    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Convert into an accumulating `stillwater` validation.
    pub fn into_validation(self) -> Validation<(), NonEmptyVec<Failure>> {
        let mut failures = self.failures.into_iter();
        match failures.next() {
            None => Validation::Success(()),
            Some(head) => Validation::Failure(NonEmptyVec::new(head, failures.collect())),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ValidationResult {}

impl Extend<Failure> for ValidationResult {
    fn extend<I: IntoIterator<Item = Failure>>(&mut self, iter: I) {
        self.failures.extend(iter);
    }
}

impl FromIterator<Failure> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = Failure>>(iter: I) -> Self {
        Self {
            failures: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationResult {
    type Item = Failure;
    type IntoIter = std::vec::IntoIter<Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a Failure;
    type IntoIter = std::slice::Iter<'a, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}
