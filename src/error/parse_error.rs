use thiserror::Error;

use super::SchemaErrors;

/// Failure of [`SchemaLike::parse_into`](crate::SchemaLike::parse_into).
#[derive(Debug, Error)]
pub enum ParseError {
    /// The value did not satisfy the schema.
    #[error("{0}")]
    Invalid(SchemaErrors),

    /// The value was valid but does not deserialize into the requested type.
    #[error("validated value does not fit the target type: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl ParseError {
    /// The validation errors, if this is a validation failure.
    pub fn schema_errors(&self) -> Option<&SchemaErrors> {
        match self {
            ParseError::Invalid(errors) => Some(errors),
            ParseError::Deserialize(_) => None,
        }
    }
}

impl From<SchemaErrors> for ParseError {
    fn from(errors: SchemaErrors) -> Self {
        ParseError::Invalid(errors)
    }
}
