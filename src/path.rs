//! Location paths for values inside nested input.
//!
//! This module provides [`Path`] and [`Segment`] for naming where in a
//! nested payload a value came from, e.g. `filters[2].name`. Every flaw
//! reported by a schema carries the path of the offending value.

use std::fmt::{self, Display};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A mapping key (e.g. `age`, `user`).
    Key(String),
    /// A sequence index (e.g. `[0]`, `[42]`).
    Index(usize),
}

impl Segment {
    /// Creates a key segment.
    pub fn key(name: impl Into<String>) -> Self {
        Segment::Key(name.into())
    }

    /// Creates an index segment.
    pub fn index(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

/// A location inside a nested payload.
///
/// Paths are built incrementally as composite schemas descend into
/// their input, and render like `users[0].email`.
///
/// # Example
///
/// ```rust
/// use tamiz::Path;
///
/// let path = Path::root().push_key("users").push_index(0).push_key("email");
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path naming the whole payload.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path holding a single key segment.
    pub fn from_key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Key(name.into())],
        }
    }

    /// Creates a path holding a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![Segment::Index(idx)],
        }
    }

    /// Returns a new path with a key segment appended.
    ///
    /// The original path is left untouched.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// The original path is left untouched.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Returns true if this path has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
