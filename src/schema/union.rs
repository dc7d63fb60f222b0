//! Union schema: the first matching member wins.

use std::sync::Arc;

use serde_json::Value;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::result::SafeParseResult;

use super::traits::SchemaLike;
use super::Schema;

/// A schema that accepts a value if any member schema does.
///
/// Members are tried in declaration order and the first success is returned
/// as-is, even when a later member would also match. When every member
/// fails, the errors of all members are reported, in member order.
///
/// # Example
///
/// ```rust
/// use validex::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let id = Schema::union([Schema::number().into_schema(), Schema::string().into_schema()]);
///
/// assert!(id.safe_parse(&json!("5")).is_success());
/// assert_eq!(id.safe_parse(&json!(true)).errors().len(), 2);
/// ```
#[derive(Clone)]
pub struct UnionSchema {
    members: Arc<Vec<Schema>>,
}

impl UnionSchema {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self {
            members: Arc::new(members.into_iter().map(Into::into).collect()),
        }
    }

    /// Appends a member, tried after the existing ones.
    pub fn or(mut self, member: impl Into<Schema>) -> Self {
        Arc::make_mut(&mut self.members).push(member.into());
        self
    }

    pub fn members(&self) -> &[Schema] {
        &self.members
    }
}

impl SchemaLike for UnionSchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        if self.members.is_empty() {
            return SafeParseResult::failure(
                value.clone(),
                SchemaError::new(path.clone(), "Expected at least one union member to match")
                    .with_code("invalid_union"),
            );
        }

        let mut errors = Vec::new();
        for member in self.members.iter() {
            let result = member.parse(value, path);
            if result.is_success() {
                return result;
            }
            errors.extend(result.into_parts().1);
        }
        SafeParseResult::from_errors(value.clone(), errors)
    }
}

impl From<UnionSchema> for Schema {
    fn from(schema: UnionSchema) -> Self {
        Schema::Union(schema)
    }
}
