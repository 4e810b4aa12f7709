//! A single recorded failure.

use super::error::FailureMessage;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// One failure record inside a [`ValidationResult`](super::ValidationResult).
///
/// A failure wraps the error value it was created from. Cloning shares that
/// value, so the original error object can always be recovered through
/// [`Failure::downcast_ref`].
///
/// # Example
///
/// ```rust
/// use validator_chain::result::{Failure, FailureMessage};
///
/// let failure = Failure::from_error(FailureMessage::new("age should be over 17"));
///
/// assert_eq!(failure.message(), "age should be over 17");
/// assert!(failure.downcast_ref::<FailureMessage>().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Failure {
    inner: Arc<dyn Error + Send + Sync + 'static>,
}

impl Failure {
    /// Wrap an arbitrary error value, keeping it intact.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Create a failure holding only a message.
    ///
    /// The message is stored verbatim, even when blank.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::from_error(FailureMessage::new(message))
    }

    /// The rendered message of the wrapped error.
    pub fn message(&self) -> String {
        self.inner.to_string()
    }

    /// The wrapped error value.
    pub fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Borrow the wrapped error as a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Returns true if both failures share the same underlying error object.
    pub fn ptr_eq(&self, other: &Failure) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::from_message(message)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::from_message(message)
    }
}

impl From<FailureMessage> for Failure {
    fn from(message: FailureMessage) -> Self {
        Self::from_error(message)
    }
}

// Failures travel as their message; the concrete error type does not survive.
impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message())
    }
}

impl<'de> Deserialize<'de> for Failure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Failure::from_message)
    }
}
