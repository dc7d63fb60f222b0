//! Error types for validation failures.
//!
//! Data-dependent failures are always reported as [`SchemaError`] values,
//! never as panics. [`ParseError`] adds the one failure that happens after
//! validation: deserializing a valid value into a Rust type.

mod parse_error;
mod schema_error;

pub use parse_error::ParseError;
pub use schema_error::{SchemaError, SchemaErrors};
