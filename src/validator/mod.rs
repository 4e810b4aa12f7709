//! Step-based validator.
//!
//! A [`Validator`] owns an ordered list of [`Step`]s. Running it executes the
//! steps in the order they were appended and collects every failure into a
//! [`ValidationResult`]. A run stops early after a failing step when either
//! that step or the whole validator is marked break-on-failure.
//!
//! # Example
//!
//! ```rust
//! use validator_chain::Validator;
//!
//! struct Customer {
//!     name: String,
//!     surname: String,
//!     age: u32,
//! }
//!
//! let mut validator = Validator::<Customer>::new();
//! validator.add_predicate(|c: &Customer| !c.name.is_empty(), "name is empty");
//! validator.add_predicate(|c: &Customer| !c.surname.is_empty(), "surname is empty");
//! validator.add_predicate(|c: &Customer| c.age > 17, "age should be over 17");
//!
//! let customer = Customer {
//!     name: "John".to_string(),
//!     surname: String::new(),
//!     age: 15,
//! };
//!
//! let result = validator.validate(&customer);
//! assert_eq!(result.render(), "surname is empty;age should be over 17");
//!
//! validator.set_break_on_failure();
//! let result = validator.validate(&customer);
//! assert_eq!(result.render(), "surname is empty");
//! ```

mod error;
mod step;

pub use error::ConfigurationError;
pub use step::{CheckFn, Step, StepHandle};

use crate::result::{Failure, FailureMessage, ValidationResult};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Error payload returned by a failing check.
#[derive(Clone, Debug)]
pub enum CheckFailure {
    /// A single failure, recorded as-is.
    Failure(Failure),

    /// Outcome of a nested validator. Its failures are flattened into the
    /// parent result at the position of the delegating step.
    Nested(ValidationResult),
}

impl CheckFailure {
    pub fn message(message: impl Into<String>) -> Self {
        CheckFailure::Failure(Failure::from_message(message))
    }

    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        CheckFailure::Failure(Failure::from_error(error))
    }
}

impl From<&str> for CheckFailure {
    fn from(message: &str) -> Self {
        CheckFailure::message(message)
    }
}

impl From<String> for CheckFailure {
    fn from(message: String) -> Self {
        CheckFailure::message(message)
    }
}

impl From<FailureMessage> for CheckFailure {
    fn from(message: FailureMessage) -> Self {
        CheckFailure::error(message)
    }
}

impl From<Failure> for CheckFailure {
    fn from(failure: Failure) -> Self {
        CheckFailure::Failure(failure)
    }
}

impl From<ValidationResult> for CheckFailure {
    fn from(result: ValidationResult) -> Self {
        CheckFailure::Nested(result)
    }
}

/// Anything that can validate a `T` and report the outcome.
///
/// Implemented by [`Validator`] and
/// [`ConditionalValidator`](crate::conditional::ConditionalValidator), so
/// either can be nested inside the other.
pub trait Validate<T> {
    fn validate(&self, input: &T) -> ValidationResult;
}

impl<T, V: Validate<T> + ?Sized> Validate<T> for &V {
    fn validate(&self, input: &T) -> ValidationResult {
        (**self).validate(input)
    }
}

impl<T, V: Validate<T> + ?Sized> Validate<T> for Box<V> {
    fn validate(&self, input: &T) -> ValidationResult {
        (**self).validate(input)
    }
}

impl<T, V: Validate<T> + ?Sized> Validate<T> for Arc<V> {
    fn validate(&self, input: &T) -> ValidationResult {
        (**self).validate(input)
    }
}

/// Ordered chain of validation steps for inputs of type `T`.
///
/// Configure fully, then call [`validate`](Validator::validate) as often as
/// needed. Runs never mutate the validator.
pub struct Validator<T> {
    steps: Vec<Step<T>>,
    break_on_failure: bool,
}

impl<T> Validator<T> {
    /// Create a validator with no steps and break-on-failure off.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            break_on_failure: false,
        }
    }

    /// Stop every run at its first failing step.
    pub fn set_break_on_failure(&mut self) -> &mut Self {
        self.break_on_failure = true;
        self
    }

    pub fn breaks_on_failure(&self) -> bool {
        self.break_on_failure
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step against `input`, in append order.
    ///
    /// A validator without steps reports a single
    /// [`ConfigurationError::NoStepsDefined`] failure.
    pub fn validate(&self, input: &T) -> ValidationResult {
        if self.steps.is_empty() {
            warn!("validator has no steps defined");
            return ValidationResult::with_failure(Failure::from_error(
                ConfigurationError::NoStepsDefined,
            ));
        }

        let mut result = ValidationResult::new();

        for (index, step) in self.steps.iter().enumerate() {
            trace!(step = index, "running validation step");

            let Some(failure) = step.run(input) else {
                continue;
            };

            let before = result.len();
            match failure {
                CheckFailure::Failure(failure) => {
                    // a result passed as a plain error is flattened too
                    if let Some(nested) = failure.downcast_ref::<ValidationResult>() {
                        result.extend(nested.iter().cloned());
                    } else {
                        result.add_failure(failure);
                    }
                }
                CheckFailure::Nested(nested) => result.merge(nested),
            }
            debug!(
                step = index,
                recorded = result.len() - before,
                "validation step failed"
            );

            if step.break_on_failure || self.break_on_failure {
                debug!(
                    step = index,
                    step_flag = step.break_on_failure,
                    validator_flag = self.break_on_failure,
                    "stopping validation after failed step"
                );
                return result;
            }
        }

        result
    }
}

impl<T: 'static> Validator<T> {
    /// Append a check. `None` means the step passed.
    ///
    /// The check may return anything convertible into a [`CheckFailure`]:
    /// a message, a [`Failure`], or a whole [`ValidationResult`].
    pub fn add_step<F, E>(&mut self, check: F) -> StepHandle<'_, T>
    where
        F: Fn(&T) -> Option<E> + Send + Sync + 'static,
        E: Into<CheckFailure> + 'static,
    {
        self.push_step(Step::new(Box::new(move |input: &T| {
            check(input).map(Into::into)
        })))
    }

    /// Append several checks at once, returning the handle of the last one.
    ///
    /// With no checks at all, a single step that always passes is appended.
    pub fn add_steps<I, F, E>(&mut self, checks: I) -> StepHandle<'_, T>
    where
        I: IntoIterator<Item = F>,
        F: Fn(&T) -> Option<E> + Send + Sync + 'static,
        E: Into<CheckFailure> + 'static,
    {
        let before = self.steps.len();
        for check in checks {
            let _ = self.add_step(check);
        }
        if self.steps.len() == before {
            return self.add_noop_step();
        }
        let index = self.steps.len() - 1;
        StepHandle::new(self, index)
    }

    /// Append a step that always passes.
    pub fn add_noop_step(&mut self) -> StepHandle<'_, T> {
        self.push_step(Step::noop())
    }

    /// Append a step failing with `message` whenever `predicate` is false.
    pub fn add_predicate<F>(&mut self, predicate: F, message: impl Into<String>) -> StepHandle<'_, T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        self.add_step(move |input: &T| {
            if predicate(input) {
                None
            } else {
                Some(CheckFailure::message(message.clone()))
            }
        })
    }

    /// Append a step delegating to another validator.
    ///
    /// When the nested run fails, its failures are flattened into this
    /// validator's result in place of the step.
    pub fn add_sub_validator<V>(&mut self, nested: V) -> StepHandle<'_, T>
    where
        V: Validate<T> + Send + Sync + 'static,
    {
        self.add_step(move |input: &T| {
            let result = nested.validate(input);
            result.is_failure().then_some(CheckFailure::Nested(result))
        })
    }

    fn push_step(&mut self, step: Step<T>) -> StepHandle<'_, T> {
        self.steps.push(step);
        let index = self.steps.len() - 1;
        StepHandle::new(self, index)
    }
}

impl<T> Validate<T> for Validator<T> {
    fn validate(&self, input: &T) -> ValidationResult {
        Validator::validate(self, input)
    }
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("steps", &self.steps)
            .field("break_on_failure", &self.break_on_failure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Customer {
        name: String,
        surname: String,
        age: u32,
    }

    fn customer(name: &str, surname: &str, age: u32) -> Customer {
        Customer {
            name: name.to_string(),
            surname: surname.to_string(),
            age,
        }
    }

    fn customer_validator() -> Validator<Customer> {
        let mut validator = Validator::new();
        validator.add_predicate(|c: &Customer| !c.name.is_empty(), "name is empty");
        validator.add_predicate(|c: &Customer| !c.surname.is_empty(), "surname is empty");
        validator.add_predicate(|c: &Customer| c.age > 17, "age should be over 17");
        validator
    }

    fn failing(message: &'static str) -> impl Fn(&u8) -> Option<&'static str> + Send + Sync {
        move |_| Some(message)
    }

    fn passing(_: &u8) -> Option<&'static str> {
        None
    }

    #[test]
    fn new_validator_has_no_steps_and_no_break() {
        let validator = Validator::<u8>::new();

        assert!(!validator.breaks_on_failure());
        assert!(validator.is_empty());
        assert_eq!(validator.len(), 0);
    }

    #[test]
    fn set_break_on_failure_is_chainable() {
        let mut validator = Validator::<u8>::new();
        validator.set_break_on_failure().add_step(passing);

        assert!(validator.breaks_on_failure());
        assert_eq!(validator.len(), 1);
    }

    #[test]
    fn add_step_grows_the_chain() {
        let mut validator = Validator::<u8>::new();
        let _ = validator.add_step(passing);
        assert_eq!(validator.len(), 1);

        let _ = validator.add_step(passing);
        assert_eq!(validator.len(), 2);
        assert!(validator.steps().iter().all(|s| !s.breaks_on_failure()));
    }

    #[test]
    fn empty_validator_reports_missing_steps() {
        let result = Validator::<u8>::new().validate(&1);

        assert_eq!(result.failure_messages(), vec!["No validation steps defined"]);
        assert_eq!(
            result.failures()[0].downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::NoStepsDefined)
        );
    }

    #[test]
    fn all_passing_steps_yield_success() {
        let result = customer_validator().validate(&customer("John", "Smith", 30));
        assert!(result.is_success());
    }

    #[test]
    fn failing_step_yields_failure() {
        let mut validator = Validator::<u8>::new();
        let _ = validator.add_step(failing("error-step-01"));

        let result = validator.validate(&0);
        assert!(result.is_failure());
        assert_eq!(result.render(), "error-step-01");
    }

    #[test]
    fn failures_follow_step_order() {
        let result = customer_validator().validate(&customer("", "", 15));

        assert_eq!(
            result.failure_messages(),
            vec!["name is empty", "surname is empty", "age should be over 17"]
        );
    }

    #[test]
    fn validator_break_stops_at_first_failure() {
        let mut validator = Validator::<u8>::new();
        validator
            .set_break_on_failure()
            .add_step(passing)
            .add_step(failing("A"))
            .add_step(failing("B"));

        let result = validator.validate(&0);
        assert_eq!(result.failure_messages(), vec!["A"]);
    }

    #[test]
    fn step_break_stops_after_that_step() {
        let mut validator = Validator::<u8>::new();
        validator
            .add_step(failing("A"))
            .add_step(failing("B"))
            .set_break_on_failure()
            .add_step(failing("C"));

        let result = validator.validate(&0);
        assert_eq!(result.failure_messages(), vec!["A", "B"]);
    }

    #[test]
    fn step_break_on_passing_step_does_not_stop() {
        let mut validator = Validator::<u8>::new();
        validator
            .add_step(passing)
            .set_break_on_failure()
            .add_step(failing("A"));

        assert_eq!(validator.validate(&0).failure_messages(), vec!["A"]);
    }

    #[test]
    fn steps_after_a_break_never_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut validator = Validator::<u8>::new();
        validator
            .add_step(failing("stop"))
            .set_break_on_failure()
            .add_step(move |_: &u8| {
                counter.fetch_add(1, Ordering::SeqCst);
                None::<&str>
            });

        let _ = validator.validate(&0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handle_reports_step_index() {
        let mut validator = Validator::<u8>::new();
        assert_eq!(validator.add_step(passing).index(), 0);
        assert_eq!(validator.add_step(passing).add_step(passing).index(), 2);
    }

    #[test]
    fn handle_only_marks_its_own_step() {
        let mut validator = Validator::<u8>::new();
        let _ = validator.add_step(passing);
        let _ = validator.add_step(passing).set_break_on_failure();
        let _ = validator.add_step(passing);

        let flags: Vec<bool> = validator
            .steps()
            .iter()
            .map(Step::breaks_on_failure)
            .collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn handle_releases_the_validator() {
        let mut validator = Validator::<u8>::new();
        validator
            .add_step(failing("A"))
            .set_break_on_failure()
            .validator()
            .set_break_on_failure();

        assert!(validator.breaks_on_failure());
        assert!(validator.steps()[0].breaks_on_failure());
    }

    #[test]
    fn add_steps_appends_each_check() {
        fn first(_: &u8) -> Option<&'static str> {
            Some("first")
        }
        fn third(_: &u8) -> Option<&'static str> {
            Some("third")
        }

        let mut validator = Validator::<u8>::new();
        let checks: Vec<fn(&u8) -> Option<&'static str>> = vec![first, passing, third];

        let handle = validator.add_steps(checks);
        assert_eq!(handle.index(), 2);

        assert_eq!(validator.len(), 3);
        assert_eq!(validator.validate(&0).render(), "first;third");
    }

    #[test]
    fn add_steps_without_checks_installs_noop() {
        let mut validator = Validator::<u8>::new();
        let none: Vec<fn(&u8) -> Option<&'static str>> = Vec::new();
        let _ = validator.add_steps(none);

        assert_eq!(validator.len(), 1);
        assert!(validator.validate(&0).is_success());
    }

    #[test]
    fn sub_validator_failures_are_flattened() {
        let mut nested = Validator::<u8>::new();
        nested.add_step(failing("X")).add_step(failing("Y"));

        let mut validator = Validator::<u8>::new();
        let _ = validator.add_sub_validator(nested);

        let result = validator.validate(&0);
        assert_eq!(result.len(), 2);
        assert_eq!(result.failure_messages(), vec!["X", "Y"]);
    }

    #[test]
    fn results_wrapped_as_errors_are_flattened() {
        fn nested_xy() -> ValidationResult {
            let mut nested = ValidationResult::new();
            nested.add_failure_message("X");
            nested.add_failure_message("Y");
            nested
        }

        let mut through_error = Validator::<u8>::new();
        let _ = through_error.add_step(|_: &u8| Some(CheckFailure::error(nested_xy())));
        assert_eq!(through_error.validate(&0).failure_messages(), vec!["X", "Y"]);

        let mut through_failure = Validator::<u8>::new();
        let _ = through_failure.add_step(|_: &u8| Some(Failure::from_error(nested_xy())));
        assert_eq!(through_failure.validate(&0).failure_messages(), vec!["X", "Y"]);
    }

    #[test]
    fn wrapped_result_keeps_original_records() {
        let nested: ValidationResult = vec![Failure::from("X")].into_iter().collect();
        let original = nested.failures()[0].clone();

        let mut validator = Validator::<u8>::new();
        let _ = validator.add_step(move |_: &u8| Some(Failure::from_error(nested.clone())));

        let result = validator.validate(&0);
        assert_eq!(result.len(), 1);
        assert!(result.failures()[0].ptr_eq(&original));
    }

    #[test]
    fn sub_validator_failures_land_in_step_position() {
        let mut nested = Validator::<u8>::new();
        nested.add_step(failing("X")).add_step(failing("Y"));

        let mut validator = Validator::<u8>::new();
        validator
            .add_step(failing("A"))
            .add_sub_validator(nested)
            .add_step(failing("B"));

        assert_eq!(validator.validate(&0).render(), "A;X;Y;B");
    }

    #[test]
    fn passing_sub_validator_adds_nothing() {
        let mut nested = Validator::<u8>::new();
        let _ = nested.add_step(passing);

        let mut validator = Validator::<u8>::new();
        validator.add_sub_validator(nested).add_step(failing("A"));

        assert_eq!(validator.validate(&0).failure_messages(), vec!["A"]);
    }

    #[test]
    fn sub_validator_step_honours_break_flag() {
        let mut nested = Validator::<u8>::new();
        nested.add_step(failing("X")).add_step(failing("Y"));

        let mut validator = Validator::<u8>::new();
        validator
            .add_sub_validator(nested)
            .set_break_on_failure()
            .add_step(failing("never"));

        assert_eq!(validator.validate(&0).render(), "X;Y");
    }

    #[test]
    fn shared_sub_validator_through_arc() {
        let mut nested = Validator::<u8>::new();
        let _ = nested.add_step(|v: &u8| (*v > 10).then_some("too large"));
        let nested = Arc::new(nested);

        let mut first = Validator::<u8>::new();
        let _ = first.add_sub_validator(Arc::clone(&nested));
        let mut second = Validator::<u8>::new();
        let _ = second.add_sub_validator(nested);

        assert_eq!(first.validate(&11).render(), "too large");
        assert!(second.validate(&3).is_success());
    }

    #[test]
    fn nested_empty_validator_reports_missing_steps() {
        let mut validator = Validator::<u8>::new();
        let _ = validator.add_sub_validator(Validator::<u8>::new());

        assert_eq!(
            validator.validate(&0).failure_messages(),
            vec!["No validation steps defined"]
        );
    }

    #[test]
    fn custom_errors_are_preserved() {
        let mut validator = Validator::<u8>::new();
        let _ = validator.add_step(|v: &u8| {
            (*v == 0).then(|| CheckFailure::error(FailureMessage::new("zero")))
        });

        let result = validator.validate(&0);
        assert_eq!(
            result.failures()[0].downcast_ref::<FailureMessage>(),
            Some(&FailureMessage::new("zero"))
        );
    }

    #[test]
    fn returned_failures_are_recorded_verbatim() {
        let shared = Failure::from_message("shared failure");
        let returned = shared.clone();

        let mut validator = Validator::<u8>::new();
        let _ = validator.add_step(move |_: &u8| Some(returned.clone()));

        let result = validator.validate(&0);
        assert!(result.failures()[0].ptr_eq(&shared));
    }

    #[test]
    fn validate_is_repeatable() {
        let validator = customer_validator();
        let input = customer("", "Smith", 12);

        let first = validator.validate(&input);
        let second = validator.validate(&input);

        assert_eq!(first.failure_messages(), second.failure_messages());
        assert_eq!(validator.len(), 3);
    }

    #[test]
    fn validator_is_shareable_across_threads() {
        let validator = Arc::new(customer_validator());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let validator = Arc::clone(&validator);
                std::thread::spawn(move || validator.validate(&customer("John", "", 10 + i)))
            })
            .collect();

        for handle in handles {
            let result = handle.join().unwrap();
            assert_eq!(result.render(), "surname is empty;age should be over 17");
        }
    }
}
