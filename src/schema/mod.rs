//! Validators and their factory.
//!
//! This module provides the coercers and combinators of the crate.
//! Each validator coerces input toward its output type, applies its
//! constraints, and accumulates every flaw it finds rather than
//! short-circuiting on the first one.
//!
//! # Example
//!
//! ```rust
//! use tamiz::{Schema, Validate, Value};
//!
//! let schema = Schema::int().min(0).max(120);
//!
//! let result = schema.check(&Value::from("42"));
//! assert!(result.is_success());
//! ```

mod map;
mod membership;
mod numeric;
mod split;
mod text;
mod traits;

pub use map::MapSchema;
pub use membership::OneOf;
pub use numeric::{Float, Int};
pub use split::Split;
pub use text::{Bytes, Encoding, Str};
pub use traits::{Ident, Validate, ValueValidator};

/// Entry point for creating validators.
///
/// `Schema` provides factory methods for every coercer and combinator.
/// Each returned validator supports further configuration through a
/// builder pattern.
///
/// # Example
///
/// ```rust
/// use tamiz::Schema;
///
/// // A text validator with length constraints
/// let name = Schema::text().min_len(1).max_len(100);
///
/// // A mapping pulling two typed fields out of a payload
/// let schema = Schema::map()
///     .field("name", name)
///     .field("age", Schema::int().min(0));
/// ```
pub struct Schema;

impl Schema {
    /// Creates an integer coercer.
    ///
    /// Accepts integers, booleans, floats (truncated toward zero), and
    /// text or bytes parsed in the configured base.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tamiz::{Schema, Validate, Value};
    ///
    /// let schema = Schema::int().min(0).max(100);
    ///
    /// assert!(schema.check(&Value::from("50")).is_success());
    /// assert!(schema.check(&Value::Int(-5)).is_failure());
    /// ```
    pub fn int() -> Int {
        Int::new()
    }

    /// Creates a float coercer.
    ///
    /// Accepts floats, integers, booleans, and text or bytes parsed as
    /// decimal floats.
    pub fn float() -> Float {
        Float::new()
    }

    /// Creates a text coercer.
    ///
    /// Byte strings decode with the configured encoding; other input
    /// stringifies. Use builder methods for length and pattern
    /// constraints.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tamiz::{Schema, Validate, Value};
    ///
    /// let schema = Schema::text().min_len(5);
    ///
    /// assert!(schema.check(&Value::from("hello")).is_success());
    /// assert!(schema.check(&Value::from("hi")).is_failure());
    /// ```
    pub fn text() -> Str {
        Str::new()
    }

    /// Creates a byte-string coercer.
    ///
    /// Text encodes with the configured encoding; other input
    /// stringifies first.
    pub fn bytes() -> Bytes {
        Bytes::new()
    }

    /// Creates a membership validator over a closed set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tamiz::{Schema, Validate, Value};
    ///
    /// let schema = Schema::one_of([1, 2]);
    /// assert!(schema.check(&Value::Int(3)).is_failure());
    /// ```
    pub fn one_of<I, T>(allowed: I) -> OneOf
    where
        I: IntoIterator<Item = T>,
        T: Into<crate::value::Value>,
    {
        OneOf::new(allowed)
    }

    /// Creates a splitter running `item` over every token.
    ///
    /// Splits on `","` by default and strips tokens; see [`Split`] for
    /// the other modes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tamiz::{Schema, Validate, Value};
    ///
    /// let schema = Schema::split(Schema::int());
    /// let result = schema.check(&Value::from("1, 2"));
    /// assert_eq!(
    ///     result.into_result().ok(),
    ///     Some(vec![Value::Int(1), Value::Int(2)])
    /// );
    /// ```
    pub fn split<V: Validate>(item: V) -> Split<V> {
        Split::new(item)
    }

    /// Creates a splitter that returns the tokens themselves.
    pub fn tokens() -> Split<Ident> {
        Split::tokens()
    }

    /// Creates a mapping schema with no fields.
    ///
    /// Use [`MapSchema::field`] and [`MapSchema::optional`] to declare
    /// what to pull out of the payload.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tamiz::{Schema, Validate, Value};
    /// use indexmap::IndexMap;
    ///
    /// let schema = Schema::map()
    ///     .field("name", Schema::text().min_len(1))
    ///     .optional("email", Schema::text());
    ///
    /// let mut payload = IndexMap::new();
    /// payload.insert("name".to_string(), Value::from("Ada"));
    ///
    /// let result = schema.check(&Value::Map(payload));
    /// assert!(result.is_success());
    ///
    /// // Missing required field produces a flaw
    /// let result = schema.check(&Value::Map(IndexMap::new()));
    /// assert!(result.is_failure());
    /// ```
    pub fn map() -> MapSchema {
        MapSchema::new()
    }
}
