//! The outcome of a parse.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::ValidationResult;

/// The outcome of [`SchemaLike::parse`](crate::SchemaLike::parse).
///
/// Success is derived from the error list, so a result is successful exactly
/// when it carries no errors. On failure [`value`](Self::value) is the
/// original input, not a partially validated one; read it only to echo the
/// input back.
///
/// # Example
///
/// ```rust
/// use validex::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let result = Schema::string().min_len(5).max_len(2).safe_parse(&json!("abc"));
///
/// assert!(!result.is_success());
/// assert_eq!(result.errors().len(), 2);
/// assert_eq!(result.value(), &json!("abc"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SafeParseResult<T = Value> {
    value: T,
    errors: Vec<SchemaError>,
}

impl<T> SafeParseResult<T> {
    /// A successful result carrying the validated value.
    pub fn success(value: T) -> Self {
        Self {
            value,
            errors: Vec::new(),
        }
    }

    /// A result carrying `errors`; successful if `errors` is empty.
    pub fn from_errors(value: T, errors: Vec<SchemaError>) -> Self {
        Self { value, errors }
    }

    /// A failed result with exactly one error.
    pub fn failure(input: T, error: SchemaError) -> Self {
        Self {
            value: input,
            errors: vec![error],
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_failure(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<SchemaError>) {
        (self.value, self.errors)
    }

    /// Maps the value, keeping the errors.
    pub fn map<U, F>(self, f: F) -> SafeParseResult<U>
    where
        F: FnOnce(T) -> U,
    {
        SafeParseResult {
            value: f(self.value),
            errors: self.errors,
        }
    }

    /// `Ok(value)` on success, otherwise every error.
    pub fn into_result(self) -> Result<T, SchemaErrors> {
        match SchemaErrors::from_vec(self.errors) {
            None => Ok(self.value),
            Some(errors) => Err(errors),
        }
    }

    /// Converts into stillwater's accumulating `Validation`, so parse results
    /// can be combined applicatively with other validations.
    pub fn into_validation(self) -> ValidationResult<T> {
        match self.into_result() {
            Ok(value) => Validation::Success(value),
            Err(errors) => Validation::Failure(errors),
        }
    }
}
