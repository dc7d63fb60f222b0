//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects against
//! a [`Shape`] of named child schemas, with a configurable policy for keys
//! the shape does not declare and whole-object refinements.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::refinement::{RefinementContext, Refinements};
use crate::result::SafeParseResult;
use crate::rules::{checks, messages};

use super::traits::SchemaLike;
use super::{narrow, type_mismatch, Schema};

/// Field name to child schema, in declaration order.
pub type Shape = IndexMap<String, Schema>;

/// How to handle input keys not declared in the shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Drop them from the output.
    #[default]
    Strip,
    /// Copy them into the output unvalidated.
    Passthrough,
    /// Report one `unrecognized_key` error per key.
    Strict,
}

/// A schema for validating JSON objects.
///
/// Every declared field is validated, in declaration order, and all field
/// errors are accumulated. An absent field is validated as `null`, so it
/// passes only through `optional()` or `default(..)`; an absent optional
/// field stays absent in the output.
///
/// # Example
///
/// ```rust
/// use validex::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::number().int().positive())
///     .field("email", Schema::string().email().optional());
///
/// let result = schema.safe_parse(&json!({"name": "Alice", "age": 30, "admin": true}));
/// assert!(result.is_success());
/// assert_eq!(result.into_value(), json!({"name": "Alice", "age": 30}));
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    shape: Arc<Shape>,
    unknown_keys: UnknownKeys,
    refinements: Refinements<Map<String, Value>>,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::from_shape(Shape::new())
    }

    pub fn from_shape(shape: Shape) -> Self {
        Self {
            shape: Arc::new(shape),
            unknown_keys: UnknownKeys::Strip,
            refinements: Refinements::new(),
            type_error_message: None,
        }
    }

    /// Declares a field.
    ///
    /// Declaring an existing name replaces its schema and keeps its position.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        Arc::make_mut(&mut self.shape).insert(name.into(), schema.into());
        self
    }

    /// Adds every field of `other`'s shape, replacing same-named fields.
    /// The policy and refinements of `self` are kept.
    pub fn extend(mut self, other: &ObjectSchema) -> Self {
        let shape = Arc::make_mut(&mut self.shape);
        for (name, schema) in other.shape.iter() {
            shape.insert(name.clone(), schema.clone());
        }
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    pub fn strip(self) -> Self {
        self.unknown_keys(UnknownKeys::Strip)
    }

    pub fn passthrough(self) -> Self {
        self.unknown_keys(UnknownKeys::Passthrough)
    }

    pub fn strict(self) -> Self {
        self.unknown_keys(UnknownKeys::Strict)
    }

    /// Registers a whole-object check.
    ///
    /// Callbacks run in registration order, against the validated object,
    /// and only when every field passed. They share one
    /// [`RefinementContext`]; any error recorded there fails the parse.
    ///
    /// ```rust
    /// use validex::{JsonPath, Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let order = Schema::object()
    ///     .field("quantity", Schema::number().int().positive())
    ///     .field("unit_price", Schema::number().non_negative())
    ///     .field("total", Schema::number().non_negative())
    ///     .super_refine(|order, ctx| {
    ///         let get = |k: &str| order[k].as_f64().unwrap_or_default();
    ///         if get("quantity") * get("unit_price") != get("total") {
    ///             ctx.add_error(JsonPath::from_segments(["total"]), "total must equal quantity * unit_price");
    ///         }
    ///     });
    ///
    /// assert!(order.safe_parse(&json!({"quantity": 5, "unit_price": 10, "total": 50})).is_success());
    /// assert!(order.safe_parse(&json!({"quantity": 5, "unit_price": 10, "total": 40})).is_failure());
    /// ```
    pub fn super_refine<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Map<String, Value>, &mut RefinementContext) + Send + Sync + 'static,
    {
        self.refinements.push(callback);
        self
    }

    /// Sets a custom message for the type mismatch (value not an object).
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        let obj = match narrow(value, checks::is_object, Value::as_object) {
            Some(o) => o,
            None => {
                return type_mismatch(
                    value,
                    path,
                    self.type_error_message.as_deref(),
                    messages::object,
                )
            }
        };

        let missing = Value::Null;
        let mut errors = Vec::new();
        let mut validated = Map::new();

        for (name, schema) in self.shape.iter() {
            let input = obj.get(name);
            let (field_value, field_errors) = schema
                .parse(input.unwrap_or(&missing), &path.push_field(name))
                .into_parts();

            if !field_errors.is_empty() {
                errors.extend(field_errors);
            } else if input.is_some() || !field_value.is_null() {
                validated.insert(name.clone(), field_value);
            }
        }

        for (key, field_value) in obj {
            if self.shape.contains_key(key) {
                continue;
            }
            match self.unknown_keys {
                UnknownKeys::Strip => {}
                UnknownKeys::Passthrough => {
                    validated.insert(key.clone(), field_value.clone());
                }
                UnknownKeys::Strict => errors.push(
                    SchemaError::new(path.push_field(key), messages::unrecognized_key(key))
                        .with_code("unrecognized_key"),
                ),
            }
        }

        if !errors.is_empty() {
            return SafeParseResult::from_errors(value.clone(), errors);
        }

        let refinement_errors = self.refinements.run(&validated, path);
        if refinement_errors.is_empty() {
            SafeParseResult::success(Value::Object(validated))
        } else {
            SafeParseResult::from_errors(value.clone(), refinement_errors)
        }
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}
