//! Text and byte-string coercion.
//!
//! This module provides [`Str`] and [`Bytes`], which move input across
//! the text/bytes boundary using a configurable [`Encoding`], plus the
//! length and pattern constraints that apply to decoded text.

use regex::Regex;
use stillwater::Validation;

use crate::error::{AggregateError, Flaw, Invalid};
use crate::path::Path;
use crate::value::Value;

use super::traits::Validate;

/// How byte strings and text convert into each other.
///
/// The closed set keeps decoding dependency-free: `Utf8` covers the
/// web, `Latin1` maps bytes to the first 256 code points, and
/// `Disabled` switches conversion off entirely so byte strings pass
/// through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8, the default.
    #[default]
    Utf8,
    /// ISO-8859-1. Decoding never fails; encoding fails above U+00FF.
    Latin1,
    /// No conversion. [`Str`] passes byte strings through unchanged.
    Disabled,
}

impl Encoding {
    fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
            Encoding::Disabled => "none",
        }
    }
}

/// A constraint applied to coerced text.
#[derive(Clone)]
enum TextConstraint {
    MinLength { min: usize },
    MaxLength { max: usize },
    Pattern { regex: Regex, pattern_str: String },
}

/// Coerces input to text.
///
/// Text passes through, byte strings are decoded with the configured
/// [`Encoding`], and anything else is stringified. With
/// [`Encoding::Disabled`] byte strings skip decoding (and the text
/// constraints) and come back as bytes, which is why the output is a
/// [`Value`] rather than a `String`.
///
/// Constraint violations accumulate rather than short-circuiting, so a
/// value can be reported as both too short and failing the pattern.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, Validate, Value};
///
/// let name = Schema::text().min_len(3).max_len(20);
/// let result = name.check(&Value::Bytes(b"ada".to_vec()));
/// assert_eq!(result.into_result().ok(), Some(Value::from("ada")));
/// ```
#[derive(Clone)]
pub struct Str {
    encoding: Encoding,
    constraints: Vec<TextConstraint>,
}

impl Str {
    /// Creates a text coercer that decodes byte strings as UTF-8.
    pub fn new() -> Self {
        Self {
            encoding: Encoding::Utf8,
            constraints: Vec::new(),
        }
    }

    /// Sets the encoding used to decode byte strings.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Adds a minimum length constraint, counted in Unicode scalar
    /// values.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.push(TextConstraint::MinLength { min });
        self
    }

    /// Adds a maximum length constraint, counted in Unicode scalar
    /// values.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints.push(TextConstraint::MaxLength { max });
        self
    }

    /// Adds a regex pattern constraint.
    ///
    /// Returns an error if the pattern itself does not compile.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tamiz::{Schema, Validate, Value};
    ///
    /// let slug = Schema::text().pattern(r"^[a-z-]+$").unwrap();
    /// assert!(slug.check(&Value::from("some-slug")).is_success());
    /// assert!(slug.check(&Value::from("Not A Slug")).is_failure());
    /// ```
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(TextConstraint::Pattern {
            regex,
            pattern_str: pattern.to_string(),
        });
        Ok(self)
    }
}

impl Default for Str {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for Str {
    type Output = Value;

    fn validate(&self, value: &Value, at: &Path) -> Validation<Self::Output, AggregateError> {
        let text = match value {
            Value::Text(s) => s.clone(),
            Value::Bytes(b) => match self.encoding {
                Encoding::Disabled => return Validation::Success(Value::Bytes(b.clone())),
                Encoding::Latin1 => b.iter().map(|&x| x as char).collect(),
                Encoding::Utf8 => match String::from_utf8(b.clone()) {
                    Ok(s) => s,
                    Err(e) => {
                        let position = e.utf8_error().valid_up_to();
                        let byte = e.as_bytes()[position];
                        return Validation::Failure(AggregateError::single(Flaw::new(
                            at.clone(),
                            Invalid::Decode {
                                encoding: Encoding::Utf8.name(),
                                byte,
                                position,
                            },
                        )));
                    }
                },
            },
            other => other.stringify(),
        };

        // Collect all constraint violations
        let flaws: Vec<Flaw> = self
            .constraints
            .iter()
            .filter_map(|c| check_text_constraint(c, &text, at))
            .collect();

        if flaws.is_empty() {
            Validation::Success(Value::Text(text))
        } else {
            Validation::Failure(AggregateError::from_flaws(Value::Null, flaws))
        }
    }

    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate(value, at)
    }
}

/// Checks a single constraint and returns a flaw if it fails.
fn check_text_constraint(constraint: &TextConstraint, text: &str, at: &Path) -> Option<Flaw> {
    match constraint {
        TextConstraint::MinLength { min } => {
            let len = text.chars().count();
            if len < *min {
                Some(Flaw::new(
                    at.clone(),
                    Invalid::TooShort {
                        min: *min,
                        got: len,
                    },
                ))
            } else {
                None
            }
        }
        TextConstraint::MaxLength { max } => {
            let len = text.chars().count();
            if len > *max {
                Some(Flaw::new(
                    at.clone(),
                    Invalid::TooLong {
                        max: *max,
                        got: len,
                    },
                ))
            } else {
                None
            }
        }
        TextConstraint::Pattern { regex, pattern_str } => {
            if !regex.is_match(text) {
                Some(Flaw::new(
                    at.clone(),
                    Invalid::Pattern {
                        pattern: pattern_str.clone(),
                    },
                ))
            } else {
                None
            }
        }
    }
}

/// Coerces input to a byte string.
///
/// Byte strings pass through, text is encoded with the configured
/// [`Encoding`], and anything else is stringified first. With
/// [`Encoding::Disabled`] text still encodes as UTF-8; disabling only
/// changes how [`Str`] treats bytes.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, Validate, Value};
///
/// let raw = Schema::bytes();
/// let result = raw.check(&Value::from("aaa"));
/// assert_eq!(result.into_result().ok(), Some(b"aaa".to_vec()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bytes {
    encoding: Encoding,
}

impl Bytes {
    /// Creates a byte-string coercer that encodes text as UTF-8.
    pub fn new() -> Self {
        Self {
            encoding: Encoding::Utf8,
        }
    }

    /// Sets the encoding used to encode text.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl Validate for Bytes {
    type Output = Vec<u8>;

    fn validate(&self, value: &Value, at: &Path) -> Validation<Self::Output, AggregateError> {
        let text = match value {
            Value::Bytes(b) => return Validation::Success(b.clone()),
            Value::Text(s) => s.clone(),
            other => other.stringify(),
        };

        match self.encoding {
            Encoding::Latin1 => {
                let mut out = Vec::with_capacity(text.len());
                for (position, c) in text.chars().enumerate() {
                    if (c as u32) < 256 {
                        out.push(c as u8);
                    } else {
                        return Validation::Failure(AggregateError::single(Flaw::new(
                            at.clone(),
                            Invalid::Encode {
                                encoding: Encoding::Latin1.name(),
                                character: c,
                                position,
                            },
                        )));
                    }
                }
                Validation::Success(out)
            }
            Encoding::Utf8 | Encoding::Disabled => Validation::Success(text.into_bytes()),
        }
    }

    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate(value, at).map(Value::Bytes)
    }
}
