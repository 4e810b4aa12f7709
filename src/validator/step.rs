//! Validation steps and the handle returned when appending one.

use super::{CheckFailure, Validate, Validator};

/// Type alias for boxed step check functions
pub type CheckFn<T> = Box<dyn Fn(&T) -> Option<CheckFailure> + Send + Sync>;

/// One registered check plus its own break-on-failure flag.
pub struct Step<T> {
    check: CheckFn<T>,
    pub(crate) break_on_failure: bool,
}

impl<T: 'static> Step<T> {
    pub(crate) fn new(check: CheckFn<T>) -> Self {
        Self {
            check,
            break_on_failure: false,
        }
    }

    /// A step that always succeeds.
    pub(crate) fn noop() -> Self {
        Self::new(Box::new(|_: &T| None))
    }
}

impl<T> Step<T> {
    /// Run the check against `input`.
    pub fn run(&self, input: &T) -> Option<CheckFailure> {
        (self.check)(input)
    }

    pub fn breaks_on_failure(&self) -> bool {
        self.break_on_failure
    }
}

impl<T> std::fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("break_on_failure", &self.break_on_failure)
            .finish_non_exhaustive()
    }
}

/// Handle to a step just appended to a [`Validator`].
///
/// The handle borrows the validator mutably and addresses the step by index,
/// so the step can be marked break-on-failure, or further steps appended,
/// without exposing the step storage.
///
/// ```rust
/// use validator_chain::Validator;
///
/// let mut validator = Validator::<u32>::new();
/// validator
///     .add_step(|age: &u32| (*age == 0).then_some("age is missing"))
///     .set_break_on_failure()
///     .add_step(|age: &u32| (*age <= 17).then_some("age should be over 17"));
///
/// let result = validator.validate(&0);
/// assert_eq!(result.failure_messages(), vec!["age is missing"]);
/// ```
pub struct StepHandle<'a, T> {
    validator: &'a mut Validator<T>,
    index: usize,
}

impl<'a, T: 'static> StepHandle<'a, T> {
    pub(crate) fn new(validator: &'a mut Validator<T>, index: usize) -> Self {
        Self { validator, index }
    }

    /// Stop the run after this step if it fails.
    pub fn set_break_on_failure(self) -> Self {
        self.validator.steps[self.index].break_on_failure = true;
        self
    }

    /// Position of the step in its validator.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Append another step to the same validator.
    pub fn add_step<F, E>(self, check: F) -> StepHandle<'a, T>
    where
        F: Fn(&T) -> Option<E> + Send + Sync + 'static,
        E: Into<CheckFailure> + 'static,
    {
        self.validator.add_step(check)
    }

    /// Append a predicate step to the same validator.
    pub fn add_predicate<F>(self, predicate: F, message: impl Into<String>) -> StepHandle<'a, T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validator.add_predicate(predicate, message)
    }

    /// Append a sub-validator step to the same validator.
    pub fn add_sub_validator<V>(self, nested: V) -> StepHandle<'a, T>
    where
        V: Validate<T> + Send + Sync + 'static,
    {
        self.validator.add_sub_validator(nested)
    }

    /// Release the handle and get the validator back.
    pub fn validator(self) -> &'a mut Validator<T> {
        self.validator
    }
}
