//! # Validex
//!
//! Runtime validation for JSON-like values. A schema is built once from
//! factory functions and chain methods, then checks untrusted input and
//! returns either the validated value or every error found, each with the
//! exact location of the offending value.
//!
//! ## Overview
//!
//! Validation never panics on invalid data and never stops at the first
//! problem within a node: every violated rule, every failing field and every
//! failing element is reported. Refinements (cross-field checks) run only
//! once the value is otherwise valid.
//!
//! ## Core Types
//!
//! - [`Schema`]: a node of the schema tree, plus the factory functions
//! - [`SchemaLike`]: `parse`/`safe_parse` and the universal combinators
//! - [`SafeParseResult`]: the value plus the list of errors
//! - [`SchemaError`]: one error with its [`JsonPath`], message and code
//! - [`SchemaErrors`]: a non-empty collection of errors
//! - [`RefinementContext`]: the error sink given to `super_refine` callbacks
//!
//! ## Example
//!
//! ```rust
//! use validex::{JsonPath, Schema, SchemaLike};
//! use serde_json::json;
//!
//! let signup = Schema::object()
//!     .field("email", Schema::string().email())
//!     .field("password", Schema::string().min_len(8))
//!     .field("age", Schema::number().int().min(13.0).optional())
//!     .super_refine(|form, ctx| {
//!         if form["password"] == form["email"] {
//!             ctx.add_error(JsonPath::from_segments(["password"]), "password must differ from email");
//!         }
//!     });
//!
//! let result = signup.safe_parse(&json!({"email": "ada@example.com", "password": "short"}));
//! assert!(result.is_failure());
//! assert_eq!(result.errors()[0].path.to_string(), "password");
//! assert_eq!(result.errors()[0].code, "min_length");
//! ```

pub mod error;
pub mod path;
pub mod refinement;
pub mod result;
pub mod rules;
pub mod schema;

pub use error::{ParseError, SchemaError, SchemaErrors};
pub use path::{JsonPath, PathSegment};
pub use refinement::RefinementContext;
pub use result::SafeParseResult;
pub use rules::Rule;
pub use schema::{
    ArraySchema, DefaultSchema, NumberSchema, ObjectSchema, OptionalSchema, RefineMessage,
    RefineOptions, RefineSchema, Schema, SchemaLike, Shape, StringSchema, TransformSchema,
    UnionSchema, UnknownKeys,
};

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
