//! # Tamiz
//!
//! A coercing validation library that accumulates ALL validation
//! errors, turning the loosely-typed payloads requests arrive with
//! (query strings, form bodies, JSON) into typed values with
//! comprehensive feedback rather than short-circuiting on the first
//! failure.
//!
//! ## Overview
//!
//! Validators here do two jobs at once: they *coerce* (text to
//! integers, bytes to text, tokens out of a delimited string) and they
//! *validate* (required fields, bounds, closed sets). When a composite
//! fails, every flaw below it is collected into one failure through
//! stillwater's `Validation` type, together with the partial clean
//! output of everything that did succeed.
//!
//! ## Core Types
//!
//! - [`Value`]: The dynamic payload model every source normalizes into
//! - [`Path`]: Where in a nested payload a value came from (e.g. `users[0].email`)
//! - [`Flaw`] / [`AggregateError`]: One located failure, and the non-empty
//!   collection of them plus partial clean output
//! - [`Schema`]: Entry point for creating validators
//! - [`Pipeline`]: Staged request validation from raw context to typed fields
//!
//! ## Example
//!
//! ```rust
//! use tamiz::source::parse_query;
//! use tamiz::{Schema, Validate};
//!
//! let schema = Schema::map()
//!     .field("boo", Schema::int())
//!     .field("tags", Schema::split(Schema::one_of(["a", "b"])));
//!
//! // Coerces and validates in one pass
//! let result = schema.check(&parse_query("boo=5&tags=a,b"));
//! assert!(result.is_success());
//!
//! // Every flaw is reported, not just the first
//! let result = schema.check(&parse_query("boo=x&tags=a,z"));
//! assert!(result.is_failure());
//! ```

pub mod error;
pub mod path;
pub mod pipeline;
pub mod schema;
pub mod source;
pub mod value;

pub use error::{AggregateError, Flaw, Invalid};
pub use path::{Path, Segment};
pub use pipeline::{bad_request, Pipeline};
pub use schema::{
    Bytes, Encoding, Float, Ident, Int, MapSchema, OneOf, Schema, Split, Str, Validate,
    ValueValidator,
};
pub use value::{merge, Value};

/// Type alias for validation results using AggregateError
pub type ValidationResult<T> = stillwater::Validation<T, AggregateError>;
