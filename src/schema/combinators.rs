//! Wrapper nodes that alter the result of an inner schema.
//!
//! - [`OptionalSchema`]: null passes as null
//! - [`DefaultSchema`]: null is replaced by a fixed value
//! - [`RefineSchema`]: a whole-value check after the inner schema succeeds
//! - [`TransformSchema`]: a normalization applied after the inner schema succeeds
//!
//! They are built through the [`SchemaLike`] combinator methods rather than
//! directly.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::refinement::catch_callback;
use crate::result::SafeParseResult;

use super::traits::SchemaLike;
use super::Schema;

type CheckFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type MessageFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;
type TransformFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// Wraps a schema so that null short-circuits to success.
#[derive(Clone)]
pub struct OptionalSchema {
    inner: Arc<Schema>,
}

impl OptionalSchema {
    pub(crate) fn new(inner: Schema) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl SchemaLike for OptionalSchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        if value.is_null() {
            return SafeParseResult::success(Value::Null);
        }
        self.inner.parse(value, path)
    }
}

impl From<OptionalSchema> for Schema {
    fn from(schema: OptionalSchema) -> Self {
        Schema::Optional(schema)
    }
}

/// Wraps a schema so that null is replaced by a default value.
#[derive(Clone)]
pub struct DefaultSchema {
    inner: Arc<Schema>,
    default: Value,
}

impl DefaultSchema {
    pub(crate) fn new(inner: Schema, default: Value) -> Self {
        Self {
            inner: Arc::new(inner),
            default,
        }
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

impl SchemaLike for DefaultSchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        if value.is_null() {
            return SafeParseResult::success(self.default.clone());
        }
        self.inner.parse(value, path)
    }
}

impl From<DefaultSchema> for Schema {
    fn from(schema: DefaultSchema) -> Self {
        Schema::Default(schema)
    }
}

/// Message reported by a failed refinement.
#[derive(Clone)]
pub enum RefineMessage {
    Fixed(String),
    Computed(MessageFn),
}

impl RefineMessage {
    fn render(&self, value: &Value) -> String {
        match self {
            RefineMessage::Fixed(message) => message.clone(),
            RefineMessage::Computed(f) => f(value),
        }
    }
}

impl fmt::Debug for RefineMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefineMessage::Fixed(message) => f.debug_tuple("Fixed").field(message).finish(),
            RefineMessage::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Message and location of a [`refine`](SchemaLike::refine) failure.
///
/// A plain string converts into options with the error at the refined
/// value's own path.
///
/// ```rust
/// use validex::{JsonPath, RefineOptions, Schema, SchemaLike};
/// use serde_json::json;
///
/// let passwords = Schema::object()
///     .field("password", Schema::string())
///     .field("confirm", Schema::string())
///     .refine(
///         |v| v["password"] == v["confirm"],
///         RefineOptions::message("passwords do not match")
///             .path(JsonPath::from_segments(["confirm"])),
///     );
///
/// let result = passwords.safe_parse(&json!({"password": "a", "confirm": "b"}));
/// assert_eq!(result.errors()[0].path.to_string(), "confirm");
/// ```
#[derive(Clone, Debug)]
pub struct RefineOptions {
    message: RefineMessage,
    path: JsonPath,
}

impl RefineOptions {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: RefineMessage::Fixed(message.into()),
            path: JsonPath::root(),
        }
    }

    /// Computes the message from the rejected value.
    pub fn message_with<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self {
            message: RefineMessage::Computed(Arc::new(f)),
            path: JsonPath::root(),
        }
    }

    /// Path of the error, relative to the refined value.
    pub fn path(mut self, path: JsonPath) -> Self {
        self.path = path;
        self
    }
}

impl From<&str> for RefineOptions {
    fn from(message: &str) -> Self {
        RefineOptions::message(message)
    }
}

impl From<String> for RefineOptions {
    fn from(message: String) -> Self {
        RefineOptions::message(message)
    }
}

/// Wraps a schema with a whole-value check.
#[derive(Clone)]
pub struct RefineSchema {
    inner: Arc<Schema>,
    check: CheckFn,
    options: RefineOptions,
}

impl RefineSchema {
    pub(crate) fn new(inner: Schema, check: CheckFn, options: RefineOptions) -> Self {
        Self {
            inner: Arc::new(inner),
            check,
            options,
        }
    }
}

impl SchemaLike for RefineSchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        let result = self.inner.parse(value, path);
        if result.is_failure() {
            return result;
        }

        let error = match catch_callback(|| (self.check)(result.value())) {
            Ok(true) => return result,
            Ok(false) => SchemaError::new(
                path.join(&self.options.path),
                self.options.message.render(result.value()),
            ),
            Err(panic) => {
                let message = panic.unwrap_or_else(|| "Refinement failed".to_string());
                tracing::debug!(path = %path, error = %message, "refinement check panicked");
                SchemaError::new(path.clone(), message)
            }
        };
        SafeParseResult::failure(value.clone(), error)
    }
}

impl From<RefineSchema> for Schema {
    fn from(schema: RefineSchema) -> Self {
        Schema::Refine(schema)
    }
}

/// Wraps a schema with a normalization step.
#[derive(Clone)]
pub struct TransformSchema {
    inner: Arc<Schema>,
    transform: TransformFn,
}

impl TransformSchema {
    pub(crate) fn new(inner: Schema, transform: TransformFn) -> Self {
        Self {
            inner: Arc::new(inner),
            transform,
        }
    }
}

impl SchemaLike for TransformSchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        let result = self.inner.parse(value, path);
        if result.is_failure() {
            return result;
        }

        let message = match catch_callback(|| (self.transform)(result.into_value())) {
            Ok(Ok(transformed)) => return SafeParseResult::success(transformed),
            Ok(Err(message)) => message,
            Err(panic) => panic.unwrap_or_else(|| "Transform failed".to_string()),
        };
        tracing::debug!(path = %path, error = %message, "transform failed");
        SafeParseResult::failure(
            value.clone(),
            SchemaError::new(path.clone(), message).with_code("transform"),
        )
    }
}

impl From<TransformSchema> for Schema {
    fn from(schema: TransformSchema) -> Self {
        Schema::Transform(schema)
    }
}
