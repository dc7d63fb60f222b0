//! The contract every schema implements.
//!
//! [`SchemaLike`] provides `parse` plus the universal combinators. Each
//! combinator wraps the receiver in a new [`Schema`] node; the receiver is
//! moved in and never mutated, so a schema kept through `clone()` is
//! unaffected.

use std::fmt::Display;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;
use crate::path::JsonPath;
use crate::result::SafeParseResult;

use super::combinators::{
    DefaultSchema, OptionalSchema, RefineOptions, RefineSchema, TransformSchema,
};
use super::Schema;

/// A node of the schema tree.
///
/// Implemented by every variant struct and by [`Schema`] itself, so the
/// combinators are available everywhere:
///
/// ```rust
/// use validex::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let name = Schema::string()
///     .transform(|v| json!(v.as_str().unwrap_or_default().trim()))
///     .refine(|v| v != "admin", "name is reserved")
///     .default("anonymous");
///
/// assert_eq!(name.safe_parse(&json!("  ada ")).into_value(), json!("ada"));
/// assert_eq!(name.safe_parse(&json!(null)).into_value(), json!("anonymous"));
/// assert!(name.safe_parse(&json!(" admin")).is_failure());
/// ```
pub trait SchemaLike: Clone + Send + Sync + Into<Schema> {
    /// Validates `value`, reporting errors relative to `path`.
    ///
    /// Never panics on invalid data: every failure is an entry in the
    /// returned error list.
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult;

    /// [`parse`](Self::parse) from the root path.
    fn safe_parse(&self, value: &Value) -> SafeParseResult {
        let result = self.parse(value, &JsonPath::root());
        tracing::trace!(
            success = result.is_success(),
            errors = result.errors().len(),
            "safe_parse finished"
        );
        result
    }

    /// Validates `value`, then deserializes the validated value into `T`.
    ///
    /// ```rust
    /// use validex::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let ports = Schema::array(Schema::number().int().min(1.0).max(65535.0)).non_empty();
    /// let parsed: Vec<u16> = ports.parse_into(&json!([80, 443])).unwrap();
    /// assert_eq!(parsed, vec![80, 443]);
    /// ```
    fn parse_into<T: DeserializeOwned>(&self, value: &Value) -> Result<T, ParseError> {
        let validated = self.safe_parse(value).into_result()?;
        Ok(serde_json::from_value(validated)?)
    }

    fn into_schema(self) -> Schema {
        self.into()
    }

    /// Accepts null (or an absent object field) as `null`; anything else
    /// goes to the wrapped schema.
    fn optional(self) -> Schema {
        Schema::Optional(OptionalSchema::new(self.into()))
    }

    /// Replaces null (or an absent object field) with `value`. The default
    /// itself is not validated.
    fn default(self, value: impl Into<Value>) -> Schema {
        Schema::Default(DefaultSchema::new(self.into(), value.into()))
    }

    /// Adds a whole-value check that runs only after the wrapped schema
    /// succeeds.
    ///
    /// `options` is a message, or a [`RefineOptions`] with a relative error
    /// path and a message (fixed or computed from the value).
    fn refine<F>(self, check: F, options: impl Into<RefineOptions>) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Schema::Refine(RefineSchema::new(self.into(), Arc::new(check), options.into()))
    }

    /// Maps a successfully validated value to a normalized one of the same
    /// shape, e.g. trimming a string.
    fn transform<F>(self, f: F) -> Schema
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Schema::Transform(TransformSchema::new(
            self.into(),
            Arc::new(move |v: Value| -> Result<Value, String> { Ok(f(v)) }),
        ))
    }

    /// Like [`transform`](Self::transform), but `f` may fail; an `Err` is
    /// reported as a single error at the current path.
    fn try_transform<F, E>(self, f: F) -> Schema
    where
        F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
        E: Display,
    {
        Schema::Transform(TransformSchema::new(
            self.into(),
            Arc::new(move |v: Value| f(v).map_err(|e| e.to_string())),
        ))
    }
}
