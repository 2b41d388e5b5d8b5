//! Traits for validator polymorphism.
//!
//! This module provides the [`Validate`] trait that every coercer and
//! combinator implements, plus the type-erased [`ValueValidator`] used
//! wherever validators with different output types live side by side.

use stillwater::Validation;

use crate::error::AggregateError;
use crate::path::Path;
use crate::value::Value;

/// A validator that coerces untyped input into typed output.
///
/// `Validate` is the seam every piece of this crate composes through.
/// A validator receives the raw [`Value`] together with the path it was
/// found at, and either produces its typed `Output` or an
/// [`AggregateError`] carrying every flaw found below that point.
///
/// The `Send + Sync` bounds allow validators to be shared across
/// threads and boxed into trait objects.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, Validate, Value};
///
/// let age = Schema::int().min(0);
/// let result = age.check(&Value::from("42"));
/// assert_eq!(result.into_result().ok(), Some(42));
/// ```
pub trait Validate: Send + Sync {
    /// The typed output produced on success.
    type Output;

    /// Validates a value found at `at`.
    ///
    /// Returns `Validation::Success` with the coerced output, or
    /// `Validation::Failure` with accumulated flaws. Composite
    /// validators keep going after the first flaw so the failure lists
    /// everything wrong below `at`.
    fn validate(&self, value: &Value, at: &Path) -> Validation<Self::Output, AggregateError>;

    /// Validates a value and returns the result as a [`Value`].
    ///
    /// This is what lets validators with different output types be
    /// stored uniformly inside mappings and sequences, where every
    /// item's result becomes a `Value` again.
    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError>;

    /// Validates a root value.
    ///
    /// Shorthand for [`Validate::validate`] at [`Path::root`], which is
    /// how whole payloads enter a validator.
    fn check(&self, value: &Value) -> Validation<Self::Output, AggregateError> {
        self.validate(value, &Path::root())
    }
}

/// A type-erased validator producing [`Value`] output.
///
/// `ValueValidator` erases the `Output` type so that heterogeneous
/// validators can be collected behind one trait object, which is how
/// mapping schemas store their per-field validators. Any type that
/// implements [`Validate`] automatically implements `ValueValidator`.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, ValueValidator};
///
/// let validators: Vec<Box<dyn ValueValidator>> = vec![
///     Box::new(Schema::text().min_len(1)),
///     Box::new(Schema::int().min(0)),
/// ];
/// ```
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the result as a [`Value`].
    fn validate_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError>;
}

/// Blanket implementation of `ValueValidator` for all `Validate` types.
impl<S: Validate> ValueValidator for S {
    fn validate_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate_to_value(value, at)
    }
}

/// The identity validator: accepts anything and returns it unchanged.
///
/// Useful as the item validator of a split when the tokens themselves
/// are the desired output.
///
/// # Example
///
/// ```rust
/// use tamiz::{Ident, Validate, Value};
///
/// let result = Ident.check(&Value::from("anything"));
/// assert_eq!(result.into_result().ok(), Some(Value::from("anything")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Ident;

impl Validate for Ident {
    type Output = Value;

    fn validate(&self, value: &Value, _at: &Path) -> Validation<Self::Output, AggregateError> {
        Validation::Success(value.clone())
    }

    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate(value, at)
    }
}
