//! Leaf validation failure reasons.

use thiserror::Error;

/// Why a single value was rejected.
///
/// Coercion messages deliberately mirror the wording of the dynamic
/// runtimes most input crosses (`invalid literal for int() with base
/// 10: 'foo'`), so that services migrating existing clients keep
/// byte-identical error payloads.
///
/// # Example
///
/// ```
/// use tamiz::Invalid;
///
/// let err = Invalid::IntLiteral { base: 10, literal: "'foo'".to_string() };
/// assert_eq!(err.to_string(), "invalid literal for int() with base 10: 'foo'");
/// assert_eq!(err.code(), "coercion");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Invalid {
    /// Text or bytes that do not parse as an integer in the given base.
    /// `literal` is the quoted form of the rejected input.
    #[error("invalid literal for int() with base {base}: {literal}")]
    IntLiteral { base: u32, literal: String },

    /// An integer base outside `0` and `2..=36`.
    #[error("int() base must be >= 2 and <= 36, or 0")]
    BadBase,

    /// A float with no integral interpretation (NaN, infinite, or out
    /// of `i64` range).
    #[error("cannot convert float {literal} to integer")]
    FloatToInt { literal: String },

    /// A numeric literal whose value does not fit in `i64`.
    #[error("integer value out of range for i64: {literal}")]
    Overflow { literal: String },

    /// Text or bytes that do not parse as a float.
    #[error("could not convert string to float: {literal}")]
    FloatLiteral { literal: String },

    /// Bytes that cannot be decoded with the configured encoding.
    #[error("'{encoding}' codec can't decode byte 0x{byte:02x} in position {position}")]
    Decode {
        encoding: &'static str,
        byte: u8,
        position: usize,
    },

    /// Text that cannot be encoded with the configured encoding.
    #[error("'{encoding}' codec can't encode character '{character}' in position {position}")]
    Encode {
        encoding: &'static str,
        character: char,
        position: usize,
    },

    /// A required field that was absent from its mapping.
    #[error("Required item")]
    Required,

    /// A value outside a closed set of allowed values. Both sides are
    /// stored pre-quoted.
    #[error("{value} not in {allowed}")]
    Membership { value: String, allowed: String },

    /// Input of a kind the schema cannot work with at all.
    #[error("expected {expected}, got {got}")]
    Mismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// An integer below the configured minimum.
    #[error("must be at least {min}, got {got}")]
    TooSmall { min: i64, got: i64 },

    /// An integer above the configured maximum.
    #[error("must be at most {max}, got {got}")]
    TooLarge { max: i64, got: i64 },

    /// Text shorter than the configured minimum length.
    #[error("length must be at least {min}, got {got}")]
    TooShort { min: usize, got: usize },

    /// Text longer than the configured maximum length.
    #[error("length must be at most {max}, got {got}")]
    TooLong { max: usize, got: usize },

    /// Text that does not match the configured pattern.
    #[error("must match pattern '{pattern}'")]
    Pattern { pattern: String },

    /// A payload that could not be parsed at all (e.g. malformed JSON).
    /// Carries the parser's own message verbatim.
    #[error("{message}")]
    Payload { message: String },
}

impl Invalid {
    /// Machine-readable code naming the failure family.
    ///
    /// Constraint codes follow the usual `min_value` / `max_length`
    /// naming; every coercion failure shares the `coercion` code so
    /// callers can group them without matching on message text.
    pub fn code(&self) -> &'static str {
        match self {
            Invalid::IntLiteral { .. }
            | Invalid::FloatToInt { .. }
            | Invalid::FloatLiteral { .. }
            | Invalid::Decode { .. }
            | Invalid::Encode { .. } => "coercion",
            Invalid::BadBase => "base",
            Invalid::Overflow { .. } => "overflow",
            Invalid::Required => "required",
            Invalid::Membership { .. } => "membership",
            Invalid::Mismatch { .. } => "invalid_type",
            Invalid::TooSmall { .. } => "min_value",
            Invalid::TooLarge { .. } => "max_value",
            Invalid::TooShort { .. } => "min_length",
            Invalid::TooLong { .. } => "max_length",
            Invalid::Pattern { .. } => "pattern",
            Invalid::Payload { .. } => "payload",
        }
    }
}
