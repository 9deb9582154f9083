//! Core value types for cqlmodel.
//!
//! This crate defines the dynamically-typed cell value that flows between
//! user-defined type instances, their columns, and the database driver:
//! - [`Value`] — one cell (scalar, collection, or nested user-defined type row)
//!
//! Absence of a value is always modelled as `Option<Value>::None`, never as a
//! type-specific zero value.

mod value;

pub use value::Value;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in value operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
