//! Validator selection by a value derived from the input.
//!
//! A [`ConditionalValidator`] computes a condition value from each input and
//! runs the validator registered for that value, falling back to a default
//! validator when nothing matches.
//!
//! # Example
//!
//! ```rust
//! use validator_chain::{ConditionalValidator, Validator};
//!
//! struct Order {
//!     country: &'static str,
//!     amount: u32,
//! }
//!
//! let mut domestic = Validator::<Order>::new();
//! domestic.add_predicate(|o: &Order| o.amount <= 1_000, "domestic limit exceeded");
//!
//! let mut fallback = Validator::<Order>::new();
//! fallback.add_predicate(|o: &Order| o.amount <= 100, "foreign limit exceeded");
//!
//! let mut validator = ConditionalValidator::new();
//! validator
//!     .set_condition(|o: &Order| o.country)
//!     .register_validator("ES", domestic)
//!     .set_default_validator(fallback);
//!
//! let result = validator.validate(&Order { country: "ES", amount: 500 });
//! assert!(result.is_success());
//!
//! let result = validator.validate(&Order { country: "FR", amount: 500 });
//! assert_eq!(result.render(), "foreign limit exceeded");
//! ```

mod error;

pub use error::DispatchError;

use crate::result::{Failure, ValidationResult};
use crate::validator::Validate;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, warn};

/// Type alias for boxed condition functions
pub type ConditionFn<C, T> = Box<dyn Fn(&T) -> C + Send + Sync>;

/// Type alias for validators stored by a conditional validator
pub type BoxedValidator<T> = Box<dyn Validate<T> + Send + Sync>;

/// Runs one of several validators, chosen by a condition value.
///
/// Condition values are matched by equality, so `C` must be `Eq + Hash`.
pub struct ConditionalValidator<C, T> {
    validators: HashMap<C, BoxedValidator<T>>,
    default_validator: Option<BoxedValidator<T>>,
    condition: Option<ConditionFn<C, T>>,
}

impl<C: Eq + Hash, T> ConditionalValidator<C, T> {
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
            default_validator: None,
            condition: None,
        }
    }

    /// Set the function deriving the condition value from an input.
    pub fn set_condition<F>(&mut self, condition: F) -> &mut Self
    where
        F: Fn(&T) -> C + Send + Sync + 'static,
    {
        self.condition = Some(Box::new(condition));
        self
    }

    /// Associate `validator` with `condition`, replacing any earlier one.
    pub fn register_validator<V>(&mut self, condition: C, validator: V) -> &mut Self
    where
        V: Validate<T> + Send + Sync + 'static,
    {
        if self.validators.insert(condition, Box::new(validator)).is_some() {
            debug!("replaced validator registered for condition");
        }
        self
    }

    /// Set the validator used when no registered condition matches.
    pub fn set_default_validator<V>(&mut self, validator: V) -> &mut Self
    where
        V: Validate<T> + Send + Sync + 'static,
    {
        self.default_validator = Some(Box::new(validator));
        self
    }

    /// Number of registered condition values.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn has_default(&self) -> bool {
        self.default_validator.is_some()
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    /// Run the validator selected for `input`.
    ///
    /// The selected validator's result is returned unchanged. Without a
    /// match or a default, the result holds a single
    /// [`DispatchError::NoValidatorForCondition`] failure.
    pub fn validate(&self, input: &T) -> ValidationResult {
        let Some(condition) = &self.condition else {
            warn!("conditional validator has no condition defined");
            return ValidationResult::with_failure(Failure::from_error(
                DispatchError::MissingCondition,
            ));
        };

        if let Some(validator) = self.validators.get(&condition(input)) {
            return validator.validate(input);
        }

        match &self.default_validator {
            Some(validator) => {
                debug!("no validator registered for condition, using default");
                validator.validate(input)
            }
            None => {
                warn!("no validator registered for condition and no default set");
                ValidationResult::with_failure(Failure::from_error(
                    DispatchError::NoValidatorForCondition,
                ))
            }
        }
    }
}

impl<C: Eq + Hash, T> Validate<T> for ConditionalValidator<C, T> {
    fn validate(&self, input: &T) -> ValidationResult {
        ConditionalValidator::validate(self, input)
    }
}

impl<C: Eq + Hash, T> Default for ConditionalValidator<C, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, T> fmt::Debug for ConditionalValidator<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalValidator")
            .field("validators", &self.validators.len())
            .field("has_default", &self.default_validator.is_some())
            .field("has_condition", &self.condition.is_some())
            .finish()
    }
}
