//! Error types for user-defined types.

use cqlmodel_columns::ColumnError;
use thiserror::Error;

/// Result type for user-type operations.
pub type UserTypeResult<T> = Result<T, UserTypeError>;

/// Errors that can occur while declaring, building, or registering user types.
#[derive(Debug, Error)]
pub enum UserTypeError {
    /// The type declaration itself is invalid (reserved or duplicate field
    /// name). Raised only while building a definition.
    #[error("invalid user type definition: {0}")]
    Definition(String),

    /// A supplied field name is not declared on the type.
    #[error("unknown field '{field}' for user type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    /// Conversion or validation failure raised by a column, unchanged.
    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error("registration failed: {0}")]
    Registration(String),

    #[error("invalid settings: {0}")]
    Config(String),
}

impl UserTypeError {
    pub(crate) fn definition(message: impl Into<String>) -> Self {
        Self::Definition(message.into())
    }

    pub(crate) fn unknown_field(type_name: &str, field: &str) -> Self {
        Self::UnknownField {
            type_name: type_name.to_string(),
            field: field.to_string(),
        }
    }
}
