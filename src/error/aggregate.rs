//! Accumulated validation failures with partial output.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use stillwater::prelude::*;

use crate::error::Invalid;
use crate::path::Path;
use crate::value::{merge, Value};

/// A single located failure: where it happened and why.
///
/// # Example
///
/// ```rust
/// use tamiz::{Flaw, Invalid, Path};
///
/// let flaw = Flaw::new(Path::from_key("age"), Invalid::Required);
/// assert_eq!(flaw.to_string(), "age: Required item");
/// assert_eq!(flaw.code(), "required");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Flaw {
    /// The path of the value that failed.
    pub path: Path,
    /// Why it failed.
    pub error: Invalid,
}

impl Flaw {
    /// Creates a flaw at the given path.
    pub fn new(path: Path, error: Invalid) -> Self {
        Self { path, error }
    }

    /// Machine-readable code of the underlying failure.
    pub fn code(&self) -> &'static str {
        self.error.code()
    }
}

impl Display for Flaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.error)
        } else {
            write!(f, "{}: {}", self.path, self.error)
        }
    }
}

impl std::error::Error for Flaw {}

// Flaw is Send + Sync since all fields are owned types. The assertions
// keep that true if the types change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Flaw>();
    assert_sync::<Flaw>();
};

/// A non-empty collection of flaws plus the partial clean output.
///
/// `AggregateError` wraps a `NonEmptyVec<Flaw>` so a failure always
/// carries at least one flaw, which is what `Validation<T, AggregateError>`
/// requires of its failure side. Composite schemas additionally record
/// the values that *did* validate in [`AggregateError::clean`], with
/// failed positions holding `Value::Null`, so callers can inspect how
/// far a payload got.
///
/// # Combining errors
///
/// `AggregateError` implements `Semigroup`, so failures from
/// independent validations can be merged:
///
/// ```rust
/// use tamiz::{AggregateError, Flaw, Invalid, Path};
/// use stillwater::prelude::*;
///
/// let a = AggregateError::single(Flaw::new(Path::from_key("name"), Invalid::Required));
/// let b = AggregateError::single(Flaw::new(Path::from_key("age"), Invalid::Required));
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateError {
    clean: Value,
    flaws: NonEmptyVec<Flaw>,
}

impl AggregateError {
    /// Creates an `AggregateError` holding a single flaw and no clean
    /// output.
    pub fn single(flaw: Flaw) -> Self {
        Self {
            clean: Value::Null,
            flaws: NonEmptyVec::singleton(flaw),
        }
    }

    /// Creates an `AggregateError` from the clean output gathered so
    /// far and the flaws that stopped validation.
    ///
    /// # Panics
    ///
    /// Panics if `flaws` is empty.
    pub fn from_flaws(clean: Value, flaws: Vec<Flaw>) -> Self {
        Self {
            clean,
            flaws: NonEmptyVec::from_vec(flaws).expect("AggregateError requires at least one flaw"),
        }
    }

    /// The partial output assembled before validation failed.
    ///
    /// For leaf failures this is `Value::Null`. For mappings it holds
    /// the fields that validated; for sequences, the items, with
    /// `Value::Null` at each failed position.
    pub fn clean(&self) -> &Value {
        &self.clean
    }

    /// Consumes the error and returns the partial output.
    pub fn into_clean(self) -> Value {
        self.clean
    }

    /// Returns the number of flaws.
    pub fn len(&self) -> usize {
        self.flaws.len()
    }

    /// Returns false since this collection is guaranteed non-empty.
    ///
    /// This method exists for API consistency but always returns false.
    pub fn is_empty(&self) -> bool {
        false // NonEmptyVec is never empty
    }

    /// Iterates over the flaws in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Flaw> {
        self.flaws.iter()
    }

    /// Returns the first flaw.
    pub fn first(&self) -> &Flaw {
        self.flaws.head()
    }

    /// Returns all flaws at the specified path.
    pub fn at_path(&self, path: &Path) -> Vec<&Flaw> {
        self.flaws.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all flaws with the specified code.
    pub fn with_code(&self, code: &str) -> Vec<&Flaw> {
        self.flaws.iter().filter(|e| e.code() == code).collect()
    }

    /// Consumes the error and returns the flaws as a plain `Vec`.
    pub fn into_flaws(self) -> Vec<Flaw> {
        self.flaws.into_vec()
    }

    /// Flattens the flaws into `path -> message` pairs, in report
    /// order. Root-level flaws are keyed `(root)`.
    ///
    /// This is the shape HTTP error payloads serialize under
    /// `"details"`.
    pub fn details(&self) -> IndexMap<String, String> {
        let mut out = IndexMap::new();
        for flaw in self.flaws.iter() {
            let key = if flaw.path.is_root() {
                "(root)".to_string()
            } else {
                flaw.path.to_string()
            };
            out.insert(key, flaw.error.to_string());
        }
        out
    }
}

impl Semigroup for AggregateError {
    fn combine(self, other: Self) -> Self {
        AggregateError {
            clean: merge(self.clean, other.clean),
            flaws: self.flaws.combine(other.flaws),
        }
    }
}

impl Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, flaw) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, flaw)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

impl IntoIterator for AggregateError {
    type Item = Flaw;
    type IntoIter = std::vec::IntoIter<Flaw>;

    fn into_iter(self) -> Self::IntoIter {
        self.flaws.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a AggregateError {
    type Item = &'a Flaw;
    type IntoIter = Box<dyn Iterator<Item = &'a Flaw> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.flaws.iter())
    }
}

// AggregateError is Send + Sync since it only contains owned data.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<AggregateError>();
    assert_sync::<AggregateError>();
};
