//! A column holding another user type.
//!
//! Conversion keeps only the fields present in the input row; validation
//! re-decodes that row, fills the nested defaults and emits every field.

use cqlmodel_columns::{Column, ColumnError, ColumnOptions, ColumnResult, DefaultValue};
use cqlmodel_types::Value;
use std::sync::Arc;

use crate::{UserTypeDefinition, UserTypeError, UserTypeInstance};

/// Builds the column error variant for a failure in this column.
type ErrorKind = fn(String, String) -> ColumnError;

/// Nests a user type inside another as a frozen row value.
///
/// Values are [`Value::Udt`] rows keyed by the nested type's wire names.
/// Conversion and validation run the nested type's own pipeline.
#[derive(Debug)]
pub struct UserDefinedType {
    options: ColumnOptions,
    definition: Arc<UserTypeDefinition>,
}

impl UserDefinedType {
    #[must_use]
    pub fn new(definition: &Arc<UserTypeDefinition>) -> Self {
        Self {
            options: ColumnOptions::new(),
            definition: Arc::clone(definition),
        }
    }

    #[must_use]
    pub fn position(mut self, position: usize) -> Self {
        self.options.position = position;
        self
    }

    #[must_use]
    pub fn db_field(mut self, name: impl Into<String>) -> Self {
        self.options.db_field = Some(name.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, default: impl Into<DefaultValue>) -> Self {
        self.options.default = default.into();
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.options.required = required;
        self
    }

    pub fn definition(&self) -> &Arc<UserTypeDefinition> {
        &self.definition
    }

    /// Decodes a row into an instance of the nested type. Column errors from
    /// nested fields pass through; anything else is reported against this
    /// column through `wrap`.
    fn instance(&self, value: Value, wrap: ErrorKind) -> ColumnResult<UserTypeInstance> {
        match value {
            Value::Udt(row) => UserTypeInstance::from_wire(&self.definition, row)
                .map_err(|e| self.column_error(e, wrap)),
            other => Err(wrap(
                self.label(),
                format!("{other} is not a {} value", self.definition.type_name()),
            )),
        }
    }

    fn column_error(&self, err: UserTypeError, wrap: ErrorKind) -> ColumnError {
        match err {
            UserTypeError::Column(inner) => inner,
            other => wrap(self.label(), other.to_string()),
        }
    }
}

impl Column for UserDefinedType {
    fn kind(&self) -> String {
        format!("frozen<{}>", self.definition.type_name())
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        let instance = self.instance(raw, |c, m| ColumnError::conversion(c, m))?;
        Ok(Some(instance.to_explicit_udt_value()))
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        let Some(value) = self.check_required(value)? else {
            return Ok(None);
        };
        let wrap: ErrorKind = |c, m| ColumnError::validation(c, m);
        let mut instance = self.instance(value, wrap)?;
        instance
            .validate()
            .map_err(|e| self.column_error(e, wrap))?;
        Ok(Some(instance.to_udt_value()))
    }
}
