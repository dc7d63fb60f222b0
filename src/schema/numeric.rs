//! Number schema validation.
//!
//! [`NumberSchema`] accepts any JSON number. Rules compare the value as an
//! `f64`; the validated output is the original number, untouched.

use serde_json::Value;

use crate::path::JsonPath;
use crate::result::SafeParseResult;
use crate::rules::{checks, messages, override_last, run_rules, Rule};

use super::traits::SchemaLike;
use super::{narrow, type_mismatch, Schema};

/// A schema for validating numeric values.
///
/// # Example
///
/// ```rust
/// use validex::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::number().int().min(0.0).max(100.0);
///
/// assert!(schema.safe_parse(&json!(50)).is_success());
/// assert!(schema.safe_parse(&json!(-5)).is_failure());
/// assert!(schema.safe_parse(&json!(1.5)).is_failure());
/// ```
///
/// `multiple_of` compares the raw floating-point remainder with zero, so
/// `0.3` is not a multiple of `0.1`.
#[derive(Clone)]
pub struct NumberSchema {
    rules: Vec<Rule<f64>>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            type_error_message: None,
        }
    }

    pub fn rule(mut self, rule: Rule<f64>) -> Self {
        self.rules.push(rule);
        self
    }

    fn predicate(
        self,
        code: &'static str,
        check: fn(f64) -> bool,
        message: fn(f64) -> String,
    ) -> Self {
        self.rule(Rule::new(
            code,
            move |n: &f64| check(*n),
            move |n: &f64| message(*n),
        ))
    }

    /// No fractional part.
    pub fn int(self) -> Self {
        self.predicate("int", checks::is_integer, messages::int)
    }

    /// Strictly greater than zero.
    pub fn positive(self) -> Self {
        self.predicate("positive", checks::is_positive, messages::positive)
    }

    /// Strictly less than zero.
    pub fn negative(self) -> Self {
        self.predicate("negative", checks::is_negative, messages::negative)
    }

    pub fn non_positive(self) -> Self {
        self.predicate("non_positive", checks::is_non_positive, messages::non_positive)
    }

    pub fn non_negative(self) -> Self {
        self.predicate("non_negative", checks::is_non_negative, messages::non_negative)
    }

    pub fn finite(self) -> Self {
        self.predicate("finite", checks::is_finite, messages::finite)
    }

    /// An integer within `±(2^53 - 1)`.
    pub fn safe(self) -> Self {
        self.predicate("safe", checks::is_safe_integer, messages::safe)
    }

    pub fn multiple_of(self, multiple: f64) -> Self {
        self.rule(Rule::new(
            "multiple_of",
            move |n: &f64| checks::is_multiple_of(*n, multiple),
            move |n: &f64| messages::multiple_of(*n, multiple),
        ))
    }

    /// Inclusive lower bound.
    pub fn min(self, min: f64) -> Self {
        self.rule(Rule::new(
            "min_value",
            move |n: &f64| *n >= min,
            move |n: &f64| messages::min_value(*n, min),
        ))
    }

    /// Inclusive upper bound.
    pub fn max(self, max: f64) -> Self {
        self.rule(Rule::new(
            "max_value",
            move |n: &f64| *n <= max,
            move |n: &f64| messages::max_value(*n, max),
        ))
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

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        let n = match narrow(value, checks::is_number, Value::as_f64) {
            Some(n) => n,
            None => {
                return type_mismatch(
                    value,
                    path,
                    self.type_error_message.as_deref(),
                    messages::number,
                )
            }
        };

        SafeParseResult::from_errors(value.clone(), run_rules(&self.rules, &n, path))
    }
}

impl From<NumberSchema> for Schema {
    fn from(schema: NumberSchema) -> Self {
        Schema::Number(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codes(result: &SafeParseResult) -> Vec<&str> {
        result.errors().iter().map(|e| e.code.as_str()).collect()
    }

    #[test]
    fn test_accepts_integers_and_floats() {
        let schema = NumberSchema::new();
        assert_eq!(schema.safe_parse(&json!(3)).into_value(), json!(3));
        assert_eq!(schema.safe_parse(&json!(-2.5)).into_value(), json!(-2.5));
        assert_eq!(
            schema.safe_parse(&json!(u64::MAX)).into_value(),
            json!(u64::MAX)
        );
    }

    #[test]
    fn test_rejects_non_numbers() {
        let schema = NumberSchema::new();
        let result = schema.safe_parse(&json!("5"));

        assert_eq!(codes(&result), vec!["invalid_type"]);
        assert_eq!(result.errors()[0].message, "Expected \"5\" to be a number");
        assert!(schema.safe_parse(&json!(null)).is_failure());
        assert!(schema.safe_parse(&json!(true)).is_failure());
    }

    #[test]
    fn test_type_gate_skips_rules() {
        let exploding = Rule::new(
            "boom",
            |_: &f64| panic!("rule must not run on a non-number"),
            |_: &f64| String::new(),
        );
        let result = NumberSchema::new().rule(exploding).safe_parse(&json!([]));
        assert_eq!(codes(&result), vec!["invalid_type"]);
    }

    #[test]
    fn test_int() {
        let schema = NumberSchema::new().int();
        assert!(schema.safe_parse(&json!(4)).is_success());
        assert!(schema.safe_parse(&json!(4.0)).is_success());
        assert_eq!(codes(&schema.safe_parse(&json!(4.5))), vec!["int"]);
    }

    #[test]
    fn test_sign_rules() {
        assert!(NumberSchema::new().positive().safe_parse(&json!(0)).is_failure());
        assert!(NumberSchema::new().negative().safe_parse(&json!(-1)).is_success());
        assert!(NumberSchema::new().non_positive().safe_parse(&json!(0)).is_success());
        assert!(NumberSchema::new().non_negative().safe_parse(&json!(-0.5)).is_failure());
    }

    #[test]
    fn test_bounds_accumulate() {
        let schema = NumberSchema::new().min(10.0).max(5.0).int();
        let result = schema.safe_parse(&json!(7.5));

        assert_eq!(codes(&result), vec!["min_value", "max_value", "int"]);
        assert_eq!(result.value(), &json!(7.5));
    }

    #[test]
    fn test_multiple_of() {
        let schema = NumberSchema::new().multiple_of(5.0);
        assert!(schema.safe_parse(&json!(15)).is_success());

        let result = schema.safe_parse(&json!(7));
        assert_eq!(result.errors()[0].message, "Expected 7 to be a multiple of 5");
    }

    #[test]
    fn test_safe_and_finite() {
        let schema = NumberSchema::new().finite().safe();
        assert!(schema.safe_parse(&json!(9_007_199_254_740_991_i64)).is_success());
        assert_eq!(
            codes(&schema.safe_parse(&json!(9_007_199_254_740_993_i64))),
            vec!["safe"]
        );
        assert_eq!(codes(&schema.safe_parse(&json!(0.5))), vec!["safe"]);
    }

    #[test]
    fn test_messages_render_large_numbers_compactly() {
        let result = NumberSchema::new().safe().safe_parse(&json!(1e300));
        assert_eq!(result.errors()[0].message, "Expected 1e300 to be a safe integer");

        let result = NumberSchema::new().max(0.5).safe_parse(&json!(3));
        assert_eq!(result.errors()[0].message, "Expected 3 to be at most 0.5");
    }

    #[test]
    fn test_custom_messages() {
        let schema = NumberSchema::new()
            .error("age must be a number")
            .min(18.0)
            .error("must be an adult");

        assert_eq!(
            schema.safe_parse(&json!("x")).errors()[0].message,
            "age must be a number"
        );
        assert_eq!(
            schema.safe_parse(&json!(12)).errors()[0].message,
            "must be an adult"
        );
    }
}
