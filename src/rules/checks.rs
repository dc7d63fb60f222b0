//! Pure predicates behind the built-in rules.
//!
//! Lengths count Unicode scalar values, not bytes.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Largest integer an `f64` represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const URL_PATTERN: &str = r"^(https?://)?([\w.-]+)\.[a-z]{2,}(:[0-9]+)?(/[^\s]*)?$";

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// Non-null record; arrays do not count.
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn length(value: &str, len: usize) -> bool {
    char_len(value) == len
}

pub fn min(value: &str, len: usize) -> bool {
    char_len(value) >= len
}

pub fn max(value: &str, len: usize) -> bool {
    char_len(value) <= len
}

pub fn starts_with(value: &str, prefix: &str) -> bool {
    value.starts_with(prefix)
}

pub fn ends_with(value: &str, suffix: &str) -> bool {
    value.ends_with(suffix)
}

pub fn matches_regex(value: &str, regex: &Regex) -> bool {
    regex.is_match(value)
}

pub fn non_empty(value: &str) -> bool {
    !value.is_empty()
}

pub fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

pub fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(URL_PATTERN).expect("url pattern is a valid regex"))
}

pub fn is_email(value: &str) -> bool {
    matches_regex(value, email_regex())
}

pub fn is_url(value: &str) -> bool {
    matches_regex(value, url_regex())
}

pub fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

pub fn is_positive(value: f64) -> bool {
    value > 0.0
}

pub fn is_negative(value: f64) -> bool {
    value < 0.0
}

pub fn is_non_positive(value: f64) -> bool {
    value <= 0.0
}

pub fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Remainder equality with zero. No rounding is applied, so `0.3` is not a
/// multiple of `0.1` under IEEE-754 arithmetic.
pub fn is_multiple_of(value: f64, multiple: f64) -> bool {
    value % multiple == 0.0
}

pub fn is_finite(value: f64) -> bool {
    value.is_finite()
}

pub fn is_safe_integer(value: f64) -> bool {
    is_integer(value) && value.abs() <= MAX_SAFE_INTEGER
}

pub fn min_len<T>(value: &[T], len: usize) -> bool {
    value.len() >= len
}

pub fn max_len<T>(value: &[T], len: usize) -> bool {
    value.len() <= len
}

pub fn non_empty_slice<T>(value: &[T]) -> bool {
    !value.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_runtime_tags() {
        assert!(is_string(&json!("x")));
        assert!(!is_string(&json!(1)));
        assert!(is_number(&json!(1.5)));
        assert!(is_array(&json!([])));
        assert!(is_object(&json!({})));
        assert!(!is_object(&json!([])));
        assert!(!is_object(&json!(null)));
    }

    #[test]
    fn test_lengths_count_chars() {
        assert!(length("日本語", 3));
        assert!(min("🎉🎊", 2));
        assert!(!max("hello", 4));
    }

    #[test]
    fn test_email() {
        assert!(is_email("user@example.com"));
        assert!(!is_email("user@example"));
        assert!(!is_email("us er@example.com"));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn test_url() {
        assert!(is_url("https://example.com"));
        assert!(is_url("example.org/path?q=1"));
        assert!(is_url("http://api.example.io:8080/v1"));
        assert!(!is_url("not a url"));
        assert!(!is_url("ftp://example.com"));
    }

    #[test]
    fn test_integer_and_safe() {
        assert!(is_integer(4.0));
        assert!(!is_integer(4.5));
        assert!(!is_integer(f64::INFINITY));
        assert!(is_safe_integer(MAX_SAFE_INTEGER));
        assert!(!is_safe_integer(MAX_SAFE_INTEGER + 2.0));
    }

    #[test]
    fn test_signs() {
        assert!(is_positive(1.0) && !is_positive(0.0));
        assert!(is_negative(-1.0) && !is_negative(0.0));
        assert!(is_non_positive(0.0) && !is_non_positive(0.1));
        assert!(is_non_negative(0.0) && !is_non_negative(-0.1));
    }

    #[test]
    fn test_multiple_of_uses_raw_remainder() {
        assert!(is_multiple_of(10.0, 5.0));
        assert!(!is_multiple_of(7.0, 5.0));
        assert!(is_multiple_of(1.5, 0.5));
        assert!(!is_multiple_of(10.0, 0.0));
    }

    #[test]
    fn test_finite() {
        assert!(is_finite(1e308));
        assert!(!is_finite(f64::NAN));
        assert!(!is_finite(f64::NEG_INFINITY));
    }

    #[test]
    fn test_slice_lengths() {
        let items = [1, 2, 3];
        assert!(min_len(&items, 3));
        assert!(!max_len(&items, 2));
        assert!(non_empty_slice(&items));
        assert!(!non_empty_slice::<i32>(&[]));
    }
}
