//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating JSON arrays with
//! element validation and length constraints.

use std::sync::Arc;

use serde_json::Value;

use crate::path::JsonPath;
use crate::refinement::{RefinementContext, Refinements};
use crate::result::SafeParseResult;
use crate::rules::{checks, messages, override_last, run_rules, Rule};

use super::traits::SchemaLike;
use super::{narrow, type_mismatch, Schema};

/// A schema for validating arrays where every element matches one schema.
///
/// Length rules run first, against the whole array, and report at the
/// array's own path. Every element is then validated with its index appended
/// to the path. All of these errors are accumulated; `super_refine`
/// callbacks run only when there are none.
///
/// # Example
///
/// ```rust
/// use validex::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string().min_len(1)).min_len(1).max_len(3);
///
/// assert!(schema.safe_parse(&json!(["a", "b"])).is_success());
///
/// let result = schema.safe_parse(&json!(["a", "", "c", ""]));
/// let paths: Vec<_> = result.errors().iter().map(|e| e.path.to_string()).collect();
/// assert_eq!(paths, vec!["", "[1]", "[3]"]);
/// ```
#[derive(Clone)]
pub struct ArraySchema {
    item_schema: Arc<Schema>,
    rules: Vec<Rule<[Value]>>,
    refinements: Refinements<[Value]>,
    type_error_message: Option<String>,
}

impl ArraySchema {
    pub fn new(item_schema: impl Into<Schema>) -> Self {
        Self {
            item_schema: Arc::new(item_schema.into()),
            rules: Vec::new(),
            refinements: Refinements::new(),
            type_error_message: None,
        }
    }

    pub fn item_schema(&self) -> &Schema {
        &self.item_schema
    }

    pub fn rule(mut self, rule: Rule<[Value]>) -> Self {
        self.rules.push(rule);
        self
    }

    /// At least `min` elements.
    pub fn min_len(self, min: usize) -> Self {
        self.rule(Rule::new(
            "min_length",
            move |items: &[Value]| checks::min_len(items, min),
            move |items: &[Value]| messages::min_items(items, min),
        ))
    }

    /// At most `max` elements.
    pub fn max_len(self, max: usize) -> Self {
        self.rule(Rule::new(
            "max_length",
            move |items: &[Value]| checks::max_len(items, max),
            move |items: &[Value]| messages::max_items(items, max),
        ))
    }

    pub fn non_empty(self) -> Self {
        self.rule(Rule::new(
            "non_empty",
            |items: &[Value]| checks::non_empty_slice(items),
            |items: &[Value]| messages::non_empty_items(items),
        ))
    }

    /// Registers a check over the validated elements; see
    /// [`ObjectSchema::super_refine`](super::ObjectSchema::super_refine).
    pub fn super_refine<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[Value], &mut RefinementContext) + Send + Sync + 'static,
    {
        self.refinements.push(callback);
        self
    }

    /// Sets a custom error message for the most recent rule, or for the type
    /// mismatch if no rule has been added.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if self.rules.is_empty() {
            self.type_error_message = Some(message);
        } else {
            override_last(&mut self.rules, message);
        }
        self
    }
}

impl SchemaLike for ArraySchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        let items = match narrow(value, checks::is_array, Value::as_array) {
            Some(items) => items,
            None => {
                return type_mismatch(
                    value,
                    path,
                    self.type_error_message.as_deref(),
                    messages::array,
                )
            }
        };

        let mut errors = run_rules(&self.rules, items.as_slice(), path);
        let mut validated = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let (item_value, item_errors) = self
                .item_schema
                .parse(item, &path.push_index(index))
                .into_parts();
            if item_errors.is_empty() {
                validated.push(item_value);
            } else {
                errors.extend(item_errors);
            }
        }

        if !errors.is_empty() {
            return SafeParseResult::from_errors(value.clone(), errors);
        }

        let refinement_errors = self.refinements.run(validated.as_slice(), path);
        if refinement_errors.is_empty() {
            SafeParseResult::success(Value::Array(validated))
        } else {
            SafeParseResult::from_errors(value.clone(), refinement_errors)
        }
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Schema::Array(schema)
    }
}
