//! Schema definitions for validation.
//!
//! A schema is a tree of [`Schema`] nodes. Leaf nodes (string, number)
//! check a scalar, composite nodes (object, array, union) recurse into their
//! children with the child's location appended to the path, and wrapper
//! nodes (optional, default, refine, transform) alter the result of the
//! schema they wrap.
//!
//! # Example
//!
//! ```rust
//! use validex::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let schema = Schema::object().field(
//!     "items",
//!     Schema::array(Schema::object().field("name", Schema::string())),
//! );
//!
//! let result = schema.safe_parse(&json!({"items": [{"name": 1}, {"name": "ok"}]}));
//! assert_eq!(result.errors()[0].path.to_string(), "items[0].name");
//! ```

mod array;
mod combinators;
mod numeric;
mod object;
mod string;
mod traits;
mod union;

use serde_json::Value;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::result::SafeParseResult;

pub use array::ArraySchema;
pub use combinators::{
    DefaultSchema, OptionalSchema, RefineMessage, RefineOptions, RefineSchema, TransformSchema,
};
pub use numeric::NumberSchema;
pub use object::{ObjectSchema, Shape, UnknownKeys};
pub use string::StringSchema;
pub use traits::SchemaLike;
pub use union::UnionSchema;

/// A node of a schema tree, one case per kind.
///
/// Nodes are usually built through the factory functions and chain
/// methods; every variant struct converts into a `Schema` with `into()` or
/// [`SchemaLike::into_schema`]. Cloning is cheap: children are shared.
#[derive(Clone)]
pub enum Schema {
    String(StringSchema),
    Number(NumberSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
    Union(UnionSchema),
    Optional(OptionalSchema),
    Default(DefaultSchema),
    Refine(RefineSchema),
    Transform(TransformSchema),
}

impl Schema {
    /// Creates a new string schema.
    ///
    /// ```rust
    /// use validex::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().min_len(5);
    ///
    /// assert!(schema.safe_parse(&json!("hello")).is_success());
    /// assert!(schema.safe_parse(&json!("hi")).is_failure());
    /// ```
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a new number schema, accepting integers and floats alike.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates an object schema with no fields; add them with
    /// [`ObjectSchema::field`].
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates an object schema from a complete shape.
    ///
    /// ```rust
    /// use validex::{Schema, SchemaLike, Shape};
    /// use serde_json::json;
    ///
    /// let mut shape = Shape::new();
    /// shape.insert("id".to_string(), Schema::number().int().into());
    /// shape.insert("tags".to_string(), Schema::array(Schema::string()).into());
    ///
    /// let schema = Schema::object_from(shape);
    /// assert!(schema.safe_parse(&json!({"id": 1, "tags": []})).is_success());
    /// ```
    pub fn object_from(shape: Shape) -> ObjectSchema {
        ObjectSchema::from_shape(shape)
    }

    /// Creates an array schema whose elements must match `item_schema`.
    pub fn array(item_schema: impl Into<Schema>) -> ArraySchema {
        ArraySchema::new(item_schema)
    }

    /// Creates a union; the first member that accepts the value wins.
    ///
    /// Members of different kinds are converted with
    /// [`into_schema`](SchemaLike::into_schema) first, or chained with
    /// [`UnionSchema::or`].
    pub fn union<I, S>(members: I) -> UnionSchema
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        UnionSchema::new(members)
    }

    /// Name of the schema kind, as used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::String(_) => "string",
            Schema::Number(_) => "number",
            Schema::Object(_) => "object",
            Schema::Array(_) => "array",
            Schema::Union(_) => "union",
            Schema::Optional(_) => "optional",
            Schema::Default(_) => "default",
            Schema::Refine(_) => "refine",
            Schema::Transform(_) => "transform",
        }
    }
}

impl SchemaLike for Schema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        match self {
            Schema::String(s) => s.parse(value, path),
            Schema::Number(s) => s.parse(value, path),
            Schema::Object(s) => s.parse(value, path),
            Schema::Array(s) => s.parse(value, path),
            Schema::Union(s) => s.parse(value, path),
            Schema::Optional(s) => s.parse(value, path),
            Schema::Default(s) => s.parse(value, path),
            Schema::Refine(s) => s.parse(value, path),
            Schema::Transform(s) => s.parse(value, path),
        }
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Schema::{}", self.kind())
    }
}

/// The typed view of `value` when `is_kind` accepts it.
pub(crate) fn narrow<'v, R>(
    value: &'v Value,
    is_kind: fn(&Value) -> bool,
    view: fn(&'v Value) -> Option<R>,
) -> Option<R> {
    if is_kind(value) {
        view(value)
    } else {
        None
    }
}

/// Single `invalid_type` failure. Value-level rules never run after it.
pub(crate) fn type_mismatch(
    value: &Value,
    path: &JsonPath,
    custom_message: Option<&str>,
    default_message: fn(&Value) -> String,
) -> SafeParseResult {
    let message = custom_message
        .map(str::to_string)
        .unwrap_or_else(|| default_message(value));
    SafeParseResult::failure(
        value.clone(),
        SchemaError::new(path.clone(), message).with_code("invalid_type"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_matches_variant() {
        let schemas: Vec<Schema> = vec![
            Schema::string().into(),
            Schema::number().into(),
            Schema::object().into(),
            Schema::array(Schema::number()).into(),
        ];
        let inputs = [json!("s"), json!(1), json!({}), json!([])];

        for (schema, input) in schemas.iter().zip(inputs.iter()) {
            assert!(schema.safe_parse(input).is_success(), "{:?}", schema);
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Schema::string().into_schema().kind(), "string");
        assert_eq!(Schema::number().optional().kind(), "optional");
        assert_eq!(Schema::union(Vec::<Schema>::new()).into_schema().kind(), "union");
        assert_eq!(format!("{:?}", Schema::string().default("x")), "Schema::default");
    }

    #[test]
    fn test_narrow_follows_the_kind_predicate() {
        use crate::rules::checks;

        assert_eq!(narrow(&json!("a"), checks::is_string, Value::as_str), Some("a"));
        assert_eq!(narrow(&json!(1), checks::is_string, Value::as_str), None);
        assert_eq!(narrow(&json!(2.5), checks::is_number, Value::as_f64), Some(2.5));
        assert!(narrow(&json!([]), checks::is_object, Value::as_object).is_none());
        assert!(narrow(&json!(null), checks::is_array, Value::as_array).is_none());
    }

    #[test]
    fn test_type_mismatch_prefers_custom_message() {
        let path = JsonPath::root().push_field("x");
        let result = type_mismatch(&json!(1), &path, Some("nope"), |_| "default".to_string());
        assert_eq!(result.errors()[0].message, "nope");
        assert_eq!(result.errors()[0].path, path);

        let result = type_mismatch(&json!(1), &path, None, crate::rules::messages::string);
        assert_eq!(result.errors()[0].message, "Expected 1 to be a string");
        assert_eq!(result.errors()[0].code, "invalid_type");
    }
}
