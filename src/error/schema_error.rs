//! Validation failure types.
//!
//! [`SchemaError`] is one failed rule, child, refinement or transform;
//! [`SchemaErrors`] is the non-empty list a failed parse converts into.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single validation failure.
///
/// Errors are never deduplicated: two failing rules on the same value give
/// two errors with the same path.
///
/// # Example
///
/// ```rust
/// use validex::{JsonPath, SchemaError};
///
/// let error = SchemaError::new(JsonPath::root().push_field("email"), "not an email")
///     .with_code("email");
///
/// assert_eq!(error.to_string(), "email: not an email");
/// assert_eq!(error.code, "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Location of the offending value.
    pub path: JsonPath,
    /// Human-readable description.
    pub message: String,
    /// Machine-readable kind, e.g. `invalid_type` or `min_length`.
    pub code: String,
}

impl SchemaError {
    /// Creates an error with the generic `custom` code.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "custom".to_string(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty, ordered collection of [`SchemaError`]s.
///
/// This is the failure side of [`SafeParseResult::into_result`] and
/// [`SafeParseResult::into_validation`]. It implements `Semigroup`, so error
/// lists from independent parses concatenate in order:
///
/// ```rust
/// use validex::{JsonPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let name = SchemaErrors::single(SchemaError::new(JsonPath::root().push_field("name"), "missing"));
/// let age = SchemaErrors::single(SchemaError::new(JsonPath::root().push_field("age"), "negative"));
///
/// let all = name.combine(age);
/// assert_eq!(all.len(), 2);
/// assert_eq!(all.first().message, "missing");
/// ```
///
/// [`SafeParseResult::into_result`]: crate::SafeParseResult::into_result
/// [`SafeParseResult::into_validation`]: crate::SafeParseResult::into_validation
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Wraps a list of errors, or returns `None` if it is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = errors.next()?;
        Some(errors.fold(Self::single(head), |acc, error| {
            acc.combine(Self::single(error))
        }))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// All errors located exactly at `path`.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// All errors carrying `code`.
    pub fn with_code(&self, code: &str) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
