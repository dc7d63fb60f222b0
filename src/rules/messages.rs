//! Default error messages.
//!
//! Every template names the offending value, rendered as JSON, and the
//! parameter of the violated constraint where there is one.

use serde_json::{Number, Value};

use super::checks::MAX_SAFE_INTEGER;

fn quote(value: &str) -> String {
    Value::from(value).to_string()
}

/// Renders a number the way it would appear in JSON: integral values without
/// a fraction, large or small magnitudes in exponent form.
fn render_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return format!("{}", value as i64);
    }
    Number::from_f64(value)
        .map(|n| n.to_string())
        .unwrap_or_else(|| value.to_string())
}

fn render_items(items: &[Value]) -> String {
    Value::Array(items.to_vec()).to_string()
}

pub fn string(value: &Value) -> String {
    format!("Expected {} to be a string", value)
}

pub fn number(value: &Value) -> String {
    format!("Expected {} to be a number", value)
}

pub fn object(value: &Value) -> String {
    format!("Expected {} to be an object", value)
}

pub fn array(value: &Value) -> String {
    format!("Expected {} to be an array", value)
}

pub fn min_length(value: &str, len: usize) -> String {
    format!("Expected {} to be at least {} characters long", quote(value), len)
}

pub fn max_length(value: &str, len: usize) -> String {
    format!("Expected {} to be at most {} characters long", quote(value), len)
}

pub fn length(value: &str, len: usize) -> String {
    format!("Expected {} to be {} characters long", quote(value), len)
}

pub fn regex(value: &str, pattern: &str) -> String {
    format!("Expected {} to match the pattern '{}'", quote(value), pattern)
}

pub fn email(value: &str) -> String {
    format!("Expected {} to be a valid email address", quote(value))
}

pub fn url(value: &str) -> String {
    format!("Expected {} to be a valid URL", quote(value))
}

pub fn starts_with(value: &str, prefix: &str) -> String {
    format!("Expected {} to start with {}", quote(value), quote(prefix))
}

pub fn ends_with(value: &str, suffix: &str) -> String {
    format!("Expected {} to end with {}", quote(value), quote(suffix))
}

pub fn non_empty(value: &str) -> String {
    format!("Expected {} to be non-empty", quote(value))
}

pub fn int(value: f64) -> String {
    format!("Expected {} to be an integer", render_number(value))
}

pub fn positive(value: f64) -> String {
    format!("Expected {} to be positive", render_number(value))
}

pub fn negative(value: f64) -> String {
    format!("Expected {} to be negative", render_number(value))
}

pub fn non_positive(value: f64) -> String {
    format!("Expected {} to be non-positive", render_number(value))
}

pub fn non_negative(value: f64) -> String {
    format!("Expected {} to be non-negative", render_number(value))
}

pub fn multiple_of(value: f64, multiple: f64) -> String {
    format!("Expected {} to be a multiple of {}", render_number(value), render_number(multiple))
}

pub fn finite(value: f64) -> String {
    format!("Expected {} to be finite", render_number(value))
}

pub fn safe(value: f64) -> String {
    format!("Expected {} to be a safe integer", render_number(value))
}

pub fn min_value(value: f64, min: f64) -> String {
    format!("Expected {} to be at least {}", render_number(value), render_number(min))
}

pub fn max_value(value: f64, max: f64) -> String {
    format!("Expected {} to be at most {}", render_number(value), render_number(max))
}

pub fn min_items(items: &[Value], len: usize) -> String {
    format!(
        "Expected {} to contain at least {} items, got {}",
        render_items(items),
        len,
        items.len()
    )
}

pub fn max_items(items: &[Value], len: usize) -> String {
    format!(
        "Expected {} to contain at most {} items, got {}",
        render_items(items),
        len,
        items.len()
    )
}

pub fn non_empty_items(items: &[Value]) -> String {
    format!("Expected {} to be non-empty", render_items(items))
}

pub fn unrecognized_key(key: &str) -> String {
    format!("Unrecognized key {}", quote(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_messages_render_json() {
        assert_eq!(string(&json!(42)), "Expected 42 to be a string");
        assert_eq!(number(&json!("5")), "Expected \"5\" to be a number");
        assert_eq!(object(&json!(null)), "Expected null to be an object");
        assert_eq!(array(&json!({"a": 1})), "Expected {\"a\":1} to be an array");
    }

    #[test]
    fn test_rule_messages_mention_parameter() {
        assert_eq!(
            min_length("ab", 5),
            "Expected \"ab\" to be at least 5 characters long"
        );
        assert_eq!(multiple_of(7.0, 5.0), "Expected 7 to be a multiple of 5");
        assert_eq!(min_value(1.5, 2.0), "Expected 1.5 to be at least 2");
        assert!(starts_with("abc", "x").contains("\"x\""));
    }

    #[test]
    fn test_number_messages_render_json_numbers() {
        assert_eq!(safe(1e300), "Expected 1e300 to be a safe integer");
        assert_eq!(int(0.25), "Expected 0.25 to be an integer");
        assert_eq!(positive(-0.0), "Expected 0 to be positive");
        assert_eq!(finite(f64::INFINITY), "Expected inf to be finite");
        assert_eq!(max_value(12.0, 1e-7), "Expected 12 to be at most 1e-7");
    }

    #[test]
    fn test_item_messages() {
        let items = vec![json!(1)];
        assert_eq!(
            min_items(&items, 2),
            "Expected [1] to contain at least 2 items, got 1"
        );
        assert_eq!(non_empty_items(&[]), "Expected [] to be non-empty");
    }
}
