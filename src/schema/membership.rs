//! Closed-set membership validation.

use stillwater::Validation;

use crate::error::{AggregateError, Flaw, Invalid};
use crate::path::Path;
use crate::value::Value;

use super::traits::Validate;

/// Accepts only values from a closed set.
///
/// Comparison is strict value equality: `1` and `1.0` are different
/// values, and `'1'` matches neither. Chain a coercer in front when
/// the input arrives as text.
///
/// The rejection message quotes both sides, e.g.
/// `'bar' not in ['boo', 'foo']`.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, Validate, Value};
///
/// let status = Schema::one_of(["new", "open", "done"]);
/// assert!(status.check(&Value::from("open")).is_success());
/// assert!(status.check(&Value::from("stale")).is_failure());
/// ```
#[derive(Debug, Clone)]
pub struct OneOf {
    allowed: Vec<Value>,
}

impl OneOf {
    /// Creates a membership validator over the given values.
    pub fn new<I, T>(allowed: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validate for OneOf {
    type Output = Value;

    fn validate(&self, value: &Value, at: &Path) -> Validation<Self::Output, AggregateError> {
        if self.allowed.iter().any(|allowed| allowed == value) {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(AggregateError::single(Flaw::new(
                at.clone(),
                Invalid::Membership {
                    value: value.repr(),
                    allowed: Value::Seq(self.allowed.clone()).repr(),
                },
            )))
        }
    }

    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate(value, at)
    }
}
