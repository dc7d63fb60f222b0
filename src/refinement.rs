//! Error accumulation for whole-value checks.
//!
//! Object and array schemas run their `super_refine` callbacks only once the
//! value is otherwise fully valid. Each parse of such a node creates one
//! [`RefinementContext`] rooted at the node's path, hands it to every
//! callback in registration order, and discards it afterwards.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::SchemaError;
use crate::path::JsonPath;

/// Mutable error sink passed to `super_refine` callbacks.
///
/// Paths given to [`add_error`](Self::add_error) are relative to the value
/// being refined; the context prefixes them with the node's own location.
///
/// # Example
///
/// ```rust
/// use validex::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let range = Schema::object()
///     .field("start", Schema::number())
///     .field("end", Schema::number())
///     .super_refine(|value, ctx| {
///         if value["start"].as_f64() > value["end"].as_f64() {
///             ctx.add_error(JsonPath::from_segments(["start"]), "start must not exceed end");
///         }
///     });
///
/// let result = range.safe_parse(&json!({"start": 5, "end": 1}));
/// assert_eq!(result.errors().len(), 1);
/// assert_eq!(result.errors()[0].path.to_string(), "start");
/// ```
#[derive(Debug)]
pub struct RefinementContext {
    path: JsonPath,
    errors: Vec<SchemaError>,
}

impl RefinementContext {
    pub(crate) fn new(path: JsonPath) -> Self {
        Self {
            path,
            errors: Vec::new(),
        }
    }

    /// Location of the value being refined.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Records an error at `path`, relative to the refined value.
    pub fn add_error(&mut self, path: JsonPath, message: impl Into<String>) {
        self.errors
            .push(SchemaError::new(self.path.join(&path), message));
    }

    /// Records a fully built error as-is; its path is not prefixed.
    pub fn add_issue(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    pub(crate) fn into_errors(self) -> Vec<SchemaError> {
        self.errors
    }
}

type RefineFn<T> = Arc<dyn Fn(&T, &mut RefinementContext) + Send + Sync>;

/// Ordered `super_refine` callbacks of one schema node.
pub(crate) struct Refinements<T: ?Sized> {
    callbacks: Vec<RefineFn<T>>,
}

impl<T: ?Sized> Refinements<T> {
    pub(crate) fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub(crate) fn push<F>(&mut self, callback: F)
    where
        F: Fn(&T, &mut RefinementContext) + Send + Sync + 'static,
    {
        self.callbacks.push(Arc::new(callback));
    }

    /// Runs every callback against one shared context.
    ///
    /// A panicking callback contributes a single error at `path` and the
    /// remaining callbacks still run.
    pub(crate) fn run(&self, value: &T, path: &JsonPath) -> Vec<SchemaError> {
        let mut ctx = RefinementContext::new(path.clone());
        for callback in &self.callbacks {
            if let Err(panic) = catch_callback(|| callback(value, &mut ctx)) {
                let message = panic.unwrap_or_else(|| "Refinement failed".to_string());
                tracing::debug!(path = %path, error = %message, "super_refine callback panicked");
                ctx.add_issue(SchemaError::new(path.clone(), message));
            }
        }
        ctx.into_errors()
    }
}

impl<T: ?Sized> Clone for Refinements<T> {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Refinements<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Refinements({})", self.callbacks.len())
    }
}

/// Runs a user callback, turning a panic into its message.
///
/// Callbacks are user code running mid-parse; a panic in one is reported
/// as a validation error instead of unwinding through `parse`.
pub(crate) fn catch_callback<R>(f: impl FnOnce() -> R) -> Result<R, Option<String>> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> Option<String> {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        Some((*message).to_string())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_error_prefixes_node_path() {
        let mut ctx = RefinementContext::new(JsonPath::root().push_field("range"));
        ctx.add_error(JsonPath::from_segments(["start"]), "too late");

        assert!(ctx.has_errors());
        assert_eq!(ctx.errors()[0].path.to_string(), "range.start");
        assert_eq!(ctx.errors()[0].code, "custom");
    }

    #[test]
    fn test_add_issue_keeps_path() {
        let mut ctx = RefinementContext::new(JsonPath::root().push_field("range"));
        ctx.add_issue(SchemaError::new(JsonPath::root(), "whole document").with_code("doc"));

        let errors = ctx.into_errors();
        assert!(errors[0].path.is_root());
        assert_eq!(errors[0].code, "doc");
    }

    #[test]
    fn test_fresh_context_is_empty() {
        let ctx = RefinementContext::new(JsonPath::root());
        assert!(!ctx.has_errors());
        assert!(ctx.path().is_root());
    }

    #[test]
    fn test_refinements_share_one_context() {
        let mut refinements: Refinements<i64> = Refinements::new();
        refinements.push(|n, ctx| {
            if *n < 0 {
                ctx.add_error(JsonPath::root(), "negative");
            }
        });
        refinements.push(|_, ctx| {
            if ctx.has_errors() {
                ctx.add_error(JsonPath::from_segments(["twice"]), "seen earlier error");
            }
        });

        let errors = refinements.run(&-1, &JsonPath::root().push_field("n"));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].path.to_string(), "n.twice");
        assert!(refinements.run(&1, &JsonPath::root()).is_empty());
    }

    #[test]
    fn test_refinements_fold_panics() {
        let mut refinements: Refinements<str> = Refinements::new();
        refinements.push(|_, _| panic!("lookup failed"));
        refinements.push(|_, ctx| ctx.add_error(JsonPath::root(), "still runs"));

        let errors = refinements.run("x", &JsonPath::root());
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["lookup failed", "still runs"]);
    }

    #[test]
    fn test_catch_callback_returns_value() {
        assert_eq!(catch_callback(|| 7), Ok(7));
    }

    #[test]
    fn test_catch_callback_reports_panic_message() {
        let static_msg = catch_callback(|| -> i32 { panic!("boom") });
        assert_eq!(static_msg, Err(Some("boom".to_string())));

        let formatted = catch_callback(|| -> i32 { panic!("bad {}", 42) });
        assert_eq!(formatted, Err(Some("bad 42".to_string())));
    }
}
