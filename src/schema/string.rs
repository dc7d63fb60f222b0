//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length, affix, pattern and format constraints.

use regex::Regex;
use serde_json::Value;

use crate::path::JsonPath;
use crate::result::SafeParseResult;
use crate::rules::{checks, messages, override_last, run_rules, Rule};

use super::traits::SchemaLike;
use super::{narrow, type_mismatch, Schema};

/// A schema for validating string values.
///
/// A non-string input fails with a single `invalid_type` error and no rule
/// runs. Otherwise every rule runs in the order it was added and all
/// violations are reported.
///
/// # Example
///
/// ```rust
/// use validex::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .min_len(3)
///     .max_len(20)
///     .regex(r"^[a-z]+$")
///     .unwrap();
///
/// let result = schema.safe_parse(&json!("AB"));
/// // too short AND pattern mismatch
/// assert_eq!(result.errors().len(), 2);
/// ```
#[derive(Clone)]
pub struct StringSchema {
    rules: Vec<Rule<str>>,
    type_error_message: Option<String>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds a caller-built rule.
    pub fn rule(mut self, rule: Rule<str>) -> Self {
        self.rules.push(rule);
        self
    }

    /// The string must have at least `min` characters (Unicode scalar values).
    ///
    /// ```rust
    /// use validex::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().min_len(5);
    /// assert!(schema.safe_parse(&json!("hello")).is_success());
    /// assert!(schema.safe_parse(&json!("hi")).is_failure());
    /// ```
    pub fn min_len(self, min: usize) -> Self {
        self.rule(Rule::new(
            "min_length",
            move |s: &str| checks::min(s, min),
            move |s: &str| messages::min_length(s, min),
        ))
    }

    /// The string must have at most `max` characters (Unicode scalar values).
    pub fn max_len(self, max: usize) -> Self {
        self.rule(Rule::new(
            "max_length",
            move |s: &str| checks::max(s, max),
            move |s: &str| messages::max_length(s, max),
        ))
    }

    /// The string must have exactly `len` characters.
    pub fn length(self, len: usize) -> Self {
        self.rule(Rule::new(
            "length",
            move |s: &str| checks::length(s, len),
            move |s: &str| messages::length(s, len),
        ))
    }

    pub fn non_empty(self) -> Self {
        self.rule(Rule::new("non_empty", checks::non_empty, messages::non_empty))
    }

    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let shown = prefix.clone();
        self.rule(Rule::new(
            "starts_with",
            move |s: &str| checks::starts_with(s, &prefix),
            move |s: &str| messages::starts_with(s, &shown),
        ))
    }

    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let shown = suffix.clone();
        self.rule(Rule::new(
            "ends_with",
            move |s: &str| checks::ends_with(s, &suffix),
            move |s: &str| messages::ends_with(s, &shown),
        ))
    }

    /// Adds a regex pattern constraint.
    ///
    /// Returns an error if `pattern` does not compile.
    ///
    /// ```rust
    /// use validex::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().regex(r"^\d+$").unwrap();
    /// assert!(schema.safe_parse(&json!("12345")).is_success());
    /// assert!(schema.safe_parse(&json!("abc")).is_failure());
    ///
    /// assert!(Schema::string().regex("(unclosed").is_err());
    /// ```
    pub fn regex(self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(self.regex_with(regex))
    }

    /// Adds an already compiled pattern constraint.
    pub fn regex_with(self, regex: Regex) -> Self {
        let pattern = regex.as_str().to_string();
        self.rule(Rule::new(
            "pattern",
            move |s: &str| checks::matches_regex(s, &regex),
            move |s: &str| messages::regex(s, &pattern),
        ))
    }

    pub fn email(self) -> Self {
        self.rule(Rule::new("email", checks::is_email, messages::email))
    }

    /// Like [`email`](Self::email), with a caller-supplied pattern.
    pub fn email_with(self, regex: Regex) -> Self {
        self.rule(Rule::new(
            "email",
            move |s: &str| checks::matches_regex(s, &regex),
            messages::email,
        ))
    }

    pub fn url(self) -> Self {
        self.rule(Rule::new("url", checks::is_url, messages::url))
    }

    /// Like [`url`](Self::url), with a caller-supplied pattern.
    pub fn url_with(self, regex: Regex) -> Self {
        self.rule(Rule::new(
            "url",
            move |s: &str| checks::matches_regex(s, &regex),
            messages::url,
        ))
    }

    /// Sets a custom error message for the most recent rule.
    ///
    /// If no rules have been added yet, this sets the type error message
    /// (used when the value is not a string).
    ///
    /// ```rust
    /// use validex::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string()
    ///     .min_len(5)
    ///     .error("username must be at least 5 characters");
    ///
    /// let result = schema.safe_parse(&json!("hi"));
    /// assert_eq!(result.errors()[0].message, "username must be at least 5 characters");
    /// ```
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

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    fn parse(&self, value: &Value, path: &JsonPath) -> SafeParseResult {
        let s = match narrow(value, checks::is_string, Value::as_str) {
            Some(s) => s,
            None => {
                return type_mismatch(
                    value,
                    path,
                    self.type_error_message.as_deref(),
                    messages::string,
                )
            }
        };

        SafeParseResult::from_errors(value.clone(), run_rules(&self.rules, s, path))
    }
}

impl From<StringSchema> for Schema {
    fn from(schema: StringSchema) -> Self {
        Schema::String(schema)
    }
}
