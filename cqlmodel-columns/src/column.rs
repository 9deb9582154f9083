//! The field declaration contract.

use cqlmodel_types::Value;
use std::fmt;

use crate::{ColumnError, ColumnOptions, ColumnResult, ValueManager};

/// A field declaration on a user-defined type.
///
/// Implementors supply conversion and validation; everything else (ordering,
/// wire naming, defaults) comes from [`ColumnOptions`] through the provided
/// methods.
pub trait Column: fmt::Debug + Send + Sync {
    /// CQL type name of the column, e.g. `"text"` or `"list<int>"`.
    fn kind(&self) -> String;

    fn options(&self) -> &ColumnOptions;

    fn options_mut(&mut self) -> &mut ColumnOptions;

    /// Converts raw input into the stored value.
    ///
    /// Called with `Some` for every supplied value, and with `None` as well
    /// for container columns so they can produce an empty collection.
    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        Ok(raw)
    }

    /// Validates and normalizes a value before persistence.
    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        self.check_required(value)
    }

    /// Container columns convert even absent input.
    fn is_container(&self) -> bool {
        false
    }

    /// Creates the per-instance holder for this column's value.
    fn value_manager(&self, initial: Option<Value>) -> ValueManager {
        ValueManager::new(initial)
    }

    fn position(&self) -> usize {
        self.options().position
    }

    /// Declared name; empty until the column is registered on a type.
    fn column_name(&self) -> &str {
        self.options().column_name.as_deref().unwrap_or("")
    }

    fn set_column_name(&mut self, name: &str) {
        self.options_mut().column_name = Some(name.to_string());
    }

    /// Wire name: the `db_field` override, else the declared name.
    fn db_field_name(&self) -> &str {
        let options = self.options();
        options
            .db_field
            .as_deref()
            .or(options.column_name.as_deref())
            .unwrap_or("")
    }

    fn has_default(&self) -> bool {
        self.options().default.is_some()
    }

    fn get_default(&self) -> Option<Value> {
        self.options().default.get()
    }

    fn is_required(&self) -> bool {
        self.options().required
    }

    /// Rejects `None` for required columns; passes everything else through.
    fn check_required(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        if value.is_none() && self.is_required() {
            return Err(ColumnError::validation(
                self.label(),
                "None values are not allowed",
            ));
        }
        Ok(value)
    }

    /// Name used in error messages.
    fn label(&self) -> String {
        match self.column_name() {
            "" => self.kind(),
            name => name.to_string(),
        }
    }
}
