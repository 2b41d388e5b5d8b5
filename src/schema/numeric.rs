//! Integer and float coercion.
//!
//! This module provides [`Int`] and [`Float`], the numeric coercers.
//! Both accept already-numeric input as well as text and bytes, parsed
//! the way dynamic-language `int()` / `float()` calls parse them, so
//! rejection messages stay familiar to clients of ported services.

use stillwater::Validation;

use crate::error::{AggregateError, Flaw, Invalid};
use crate::path::Path;
use crate::value::Value;

use super::traits::Validate;

/// A constraint applied to coerced integers.
#[derive(Debug, Clone)]
enum IntConstraint {
    Min { value: i64 },
    Max { value: i64 },
}

/// Coerces input to `i64`.
///
/// Integers and booleans pass through, floats truncate toward zero,
/// and text or bytes are parsed in the configured base. Parsing
/// follows `int()` semantics: surrounding whitespace and a leading
/// sign are fine, underscores may group digits, and base `0` infers
/// the base from a `0x` / `0o` / `0b` prefix. Constraint violations
/// are accumulated, so a value can report being both out of range and
/// whatever else is wrong with it.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, Validate, Value};
///
/// let int = Schema::int();
/// assert_eq!(int.check(&Value::from("10")).into_result().ok(), Some(10));
///
/// let hex = Schema::int().base(16);
/// assert_eq!(hex.check(&Value::from("10")).into_result().ok(), Some(16));
/// ```
#[derive(Debug, Clone)]
pub struct Int {
    base: u32,
    constraints: Vec<IntConstraint>,
}

impl Int {
    /// Creates an integer coercer with base 10.
    pub fn new() -> Self {
        Self {
            base: 10,
            constraints: Vec::new(),
        }
    }

    /// Sets the base used when parsing text or bytes.
    ///
    /// Base `0` infers the base from the literal's prefix. Values
    /// outside `0` and `2..=36` make every validation fail with a
    /// `base` flaw rather than panicking.
    pub fn base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    /// Requires the coerced value to be at least `value`.
    pub fn min(mut self, value: i64) -> Self {
        self.constraints.push(IntConstraint::Min { value });
        self
    }

    /// Requires the coerced value to be at most `value`.
    pub fn max(mut self, value: i64) -> Self {
        self.constraints.push(IntConstraint::Max { value });
        self
    }

    fn coerce(&self, value: &Value, at: &Path) -> Result<i64, Flaw> {
        if self.base != 0 && !(2..=36).contains(&self.base) {
            return Err(Flaw::new(at.clone(), Invalid::BadBase));
        }
        match value {
            Value::Int(n) => Ok(*n),
            Value::Bool(b) => Ok(*b as i64),
            Value::Float(x) => {
                let t = x.trunc();
                // -(i64::MIN as f64) is 2^63 exactly; the cast below is
                // lossless inside [-2^63, 2^63).
                if x.is_nan() || x.is_infinite() {
                    Err(Flaw::new(
                        at.clone(),
                        Invalid::FloatToInt {
                            literal: value.repr(),
                        },
                    ))
                } else if t < i64::MIN as f64 || t >= -(i64::MIN as f64) {
                    Err(Flaw::new(
                        at.clone(),
                        Invalid::Overflow {
                            literal: value.repr(),
                        },
                    ))
                } else {
                    Ok(t as i64)
                }
            }
            Value::Text(s) => self.parse_literal(s, value, at),
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => self.parse_literal(s, value, at),
                Err(_) => Err(Flaw::new(
                    at.clone(),
                    Invalid::IntLiteral {
                        base: self.base,
                        literal: value.repr(),
                    },
                )),
            },
            other => Err(Flaw::new(
                at.clone(),
                Invalid::Mismatch {
                    expected: "integer",
                    got: other.kind(),
                },
            )),
        }
    }

    fn parse_literal(&self, text: &str, value: &Value, at: &Path) -> Result<i64, Flaw> {
        match parse_int(text, self.base) {
            Ok(n) => Ok(n),
            Err(ParseFail::Literal) => Err(Flaw::new(
                at.clone(),
                Invalid::IntLiteral {
                    base: self.base,
                    literal: value.repr(),
                },
            )),
            Err(ParseFail::Overflow) => Err(Flaw::new(
                at.clone(),
                Invalid::Overflow {
                    literal: value.repr(),
                },
            )),
        }
    }
}

impl Default for Int {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for Int {
    type Output = i64;

    fn validate(&self, value: &Value, at: &Path) -> Validation<Self::Output, AggregateError> {
        let n = match self.coerce(value, at) {
            Ok(n) => n,
            Err(flaw) => return Validation::Failure(AggregateError::single(flaw)),
        };

        // Collect all constraint violations
        let flaws: Vec<Flaw> = self
            .constraints
            .iter()
            .filter_map(|c| check_int_constraint(c, n, at))
            .collect();

        if flaws.is_empty() {
            Validation::Success(n)
        } else {
            Validation::Failure(AggregateError::from_flaws(Value::Null, flaws))
        }
    }

    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate(value, at).map(Value::Int)
    }
}

/// Checks a single constraint and returns a flaw if it fails.
fn check_int_constraint(constraint: &IntConstraint, value: i64, at: &Path) -> Option<Flaw> {
    match constraint {
        IntConstraint::Min { value: min } => {
            if value < *min {
                Some(Flaw::new(
                    at.clone(),
                    Invalid::TooSmall {
                        min: *min,
                        got: value,
                    },
                ))
            } else {
                None
            }
        }
        IntConstraint::Max { value: max } => {
            if value > *max {
                Some(Flaw::new(
                    at.clone(),
                    Invalid::TooLarge {
                        max: *max,
                        got: value,
                    },
                ))
            } else {
                None
            }
        }
    }
}

enum ParseFail {
    Literal,
    Overflow,
}

/// Parses an integer literal with `int()` semantics.
///
/// Accumulates into the negative range so `i64::MIN` parses without
/// overflowing on negation.
fn parse_int(text: &str, base: u32) -> Result<i64, ParseFail> {
    let s = text.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let bytes = s.as_bytes();
    let mut effective = base;
    let mut digits = s;
    if bytes.len() >= 2 && bytes[0] == b'0' {
        let marked = match bytes[1].to_ascii_lowercase() {
            b'x' => 16,
            b'o' => 8,
            b'b' => 2,
            _ => 0,
        };
        if marked != 0 && (base == 0 || base == marked) {
            digits = &s[2..];
            // a single underscore may follow the prefix, as in 0x_ff
            digits = digits.strip_prefix('_').unwrap_or(digits);
            effective = marked;
        }
    }
    if effective == 0 {
        // Unprefixed base 0 is decimal, but leading zeros are
        // ambiguous and rejected unless the whole literal is zero.
        effective = 10;
        if digits.len() > 1
            && digits.starts_with('0')
            && !digits.bytes().all(|b| b == b'0' || b == b'_')
        {
            return Err(ParseFail::Literal);
        }
    }

    let mut acc: i64 = 0;
    let mut prev_underscore = true; // also rejects an empty literal
    for c in digits.chars() {
        if c == '_' {
            if prev_underscore {
                return Err(ParseFail::Literal);
            }
            prev_underscore = true;
            continue;
        }
        let d = match c.to_digit(effective) {
            Some(d) => d as i64,
            None => return Err(ParseFail::Literal),
        };
        prev_underscore = false;
        acc = acc
            .checked_mul(effective as i64)
            .and_then(|a| a.checked_sub(d))
            .ok_or(ParseFail::Overflow)?;
    }
    if prev_underscore {
        return Err(ParseFail::Literal);
    }

    if negative {
        Ok(acc)
    } else {
        acc.checked_neg().ok_or(ParseFail::Overflow)
    }
}

/// Coerces input to `f64`.
///
/// Floats pass through, integers and booleans widen, and text or bytes
/// parse with `float()` semantics, including `inf` / `nan` spellings
/// and digit-grouping underscores.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, Validate, Value};
///
/// let float = Schema::float();
/// assert_eq!(float.check(&Value::from("2.5")).into_result().ok(), Some(2.5));
/// assert_eq!(float.check(&Value::Int(3)).into_result().ok(), Some(3.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl Float {
    /// Creates a float coercer.
    pub fn new() -> Self {
        Float
    }
}

impl Validate for Float {
    type Output = f64;

    fn validate(&self, value: &Value, at: &Path) -> Validation<Self::Output, AggregateError> {
        let reject = |literal: String| {
            Validation::Failure(AggregateError::single(Flaw::new(
                at.clone(),
                Invalid::FloatLiteral { literal },
            )))
        };
        match value {
            Value::Float(x) => Validation::Success(*x),
            Value::Int(n) => Validation::Success(*n as f64),
            Value::Bool(b) => Validation::Success(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => match parse_float(s) {
                Some(x) => Validation::Success(x),
                None => reject(value.repr()),
            },
            Value::Bytes(b) => match std::str::from_utf8(b).ok().and_then(parse_float) {
                Some(x) => Validation::Success(x),
                None => reject(value.repr()),
            },
            other => Validation::Failure(AggregateError::single(Flaw::new(
                at.clone(),
                Invalid::Mismatch {
                    expected: "float",
                    got: other.kind(),
                },
            ))),
        }
    }

    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate(value, at).map(Value::Float)
    }
}

/// Parses a float literal with `float()` semantics.
fn parse_float(text: &str) -> Option<f64> {
    let cleaned = strip_digit_underscores(text.trim())?;
    cleaned.parse::<f64>().ok()
}

/// Removes digit-grouping underscores, rejecting any underscore that
/// does not sit between two digits.
fn strip_digit_underscores(s: &str) -> Option<String> {
    if !s.contains('_') {
        return Some(s.to_string());
    }
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && i + 1 < chars.len()
                && chars[i + 1].is_ascii_digit();
            if !between_digits {
                return None;
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}
