//! Error types for column conversion and validation.

use thiserror::Error;

/// Result type for column operations.
pub type ColumnResult<T> = Result<T, ColumnError>;

/// Errors raised by a column while converting or validating a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// Raw input could not be converted to the column's value type.
    #[error("{column} - {message}")]
    Conversion { column: String, message: String },

    /// A value failed the column's validation rules.
    #[error("{column} - {message}")]
    Validation { column: String, message: String },
}

impl ColumnError {
    pub fn conversion(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn validation(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Name of the column that raised the error.
    pub fn column(&self) -> &str {
        match self {
            Self::Conversion { column, .. } | Self::Validation { column, .. } => column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_column_and_message() {
        let err = ColumnError::validation("zip", "None values are not allowed");
        assert_eq!(err.to_string(), "zip - None values are not allowed");
        assert_eq!(err.column(), "zip");
    }
}
