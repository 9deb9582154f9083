//! Column declarations for cqlmodel user-defined types.
//!
//! A column is the declaration of one field: where it sits in the declared
//! order, what it is called on the wire, how it is defaulted, and how raw
//! input is converted and validated.
//!
//! - [`Column`] — the contract every field declaration implements
//! - [`ColumnOptions`] / [`DefaultValue`] — the shared declaration metadata
//! - [`ValueManager`] — per-instance holder of one field's value
//! - Scalar columns: [`Text`], [`Ascii`], [`Integer`], [`BigInt`], [`Boolean`],
//!   [`Double`], [`UuidColumn`], [`Timestamp`], [`Blob`]
//! - Container columns: [`List`], [`Set`], [`Map`]

#[macro_use]
mod macros;

mod column;
mod container;
mod error;
mod options;
mod scalar;
mod value_manager;

pub use column::Column;
pub use container::{List, Map, Set, MAX_COLLECTION_LEN};
pub use error::{ColumnError, ColumnResult};
pub use options::{next_position, ColumnOptions, DefaultValue};
pub use scalar::{Ascii, BigInt, Blob, Boolean, Double, Integer, Text, Timestamp, UuidColumn};
pub use value_manager::ValueManager;
