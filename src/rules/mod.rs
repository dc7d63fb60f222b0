//! Value-level rules attached to schemas.
//!
//! A [`Rule`] pairs a pure predicate with a message formatter. Chain methods
//! such as `min_len` or `positive` build rules from the predicates in
//! [`checks`] and the templates in [`messages`]; callers can attach their
//! own with `.rule(...)`.

pub mod checks;
pub mod messages;

use std::fmt;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::path::JsonPath;

type CheckFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type MessageFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A named predicate plus the message reported when it fails.
///
/// `check` must be pure: it may only look at the candidate value and the
/// parameters captured when the rule was built.
///
/// # Example
///
/// ```rust
/// use validex::{Rule, Schema, SchemaLike};
/// use serde_json::json;
///
/// let no_spaces = Rule::new(
///     "no_spaces",
///     |s: &str| !s.contains(' '),
///     |s: &str| format!("Expected {:?} to contain no spaces", s),
/// );
/// let slug = Schema::string().rule(no_spaces);
///
/// let result = slug.safe_parse(&json!("two words"));
/// assert_eq!(result.errors()[0].code, "no_spaces");
/// ```
pub struct Rule<T: ?Sized> {
    code: &'static str,
    check: CheckFn<T>,
    message: MessageFn<T>,
}

impl<T: ?Sized + 'static> Rule<T> {
    pub fn new<C, M>(code: &'static str, check: C, message: M) -> Self
    where
        C: Fn(&T) -> bool + Send + Sync + 'static,
        M: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            code,
            check: Arc::new(check),
            message: Arc::new(message),
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Replaces the formatter with a fixed message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = Arc::new(move |_: &T| message.clone());
        self
    }

    /// Runs the predicate; returns the error to report if it fails.
    pub fn evaluate(&self, value: &T, path: &JsonPath) -> Option<SchemaError> {
        if (self.check)(value) {
            None
        } else {
            Some(SchemaError::new(path.clone(), (self.message)(value)).with_code(self.code))
        }
    }
}

impl<T: ?Sized> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            code: self.code,
            check: Arc::clone(&self.check),
            message: Arc::clone(&self.message),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("code", &self.code).finish()
    }
}

/// Runs every rule in order and collects every failure.
pub(crate) fn run_rules<T: ?Sized + 'static>(
    rules: &[Rule<T>],
    value: &T,
    path: &JsonPath,
) -> Vec<SchemaError> {
    rules
        .iter()
        .filter_map(|rule| rule.evaluate(value, path))
        .collect()
}

/// Overrides the message of the last rule; `false` if there is none.
pub(crate) fn override_last<T: ?Sized + 'static>(
    rules: &mut Vec<Rule<T>>,
    message: String,
) -> bool {
    match rules.pop() {
        Some(last) => {
            rules.push(last.with_message(message));
            true
        }
        None => false,
    }
}
