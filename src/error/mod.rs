//! Error types for validation failures.
//!
//! This module provides the leaf failure reasons ([`Invalid`]), single
//! located failures ([`Flaw`]), and the accumulated failure payload
//! ([`AggregateError`]) that carries every flaw plus the partial clean
//! output gathered before validation gave up.

mod aggregate;
mod invalid;

pub use aggregate::{AggregateError, Flaw};
pub use invalid::Invalid;
