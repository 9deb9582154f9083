//! Container column declarations.
//!
//! Containers always convert, even absent input, so an instance never holds
//! "no value" for a collection field: it holds an empty collection instead.
//! Elements are converted and validated by the element column.

use cqlmodel_types::Value;

use crate::{Column, ColumnError, ColumnOptions, ColumnResult};

/// Largest collection the database accepts.
pub const MAX_COLLECTION_LEN: usize = 65535;

fn convert_element(
    owner: &dyn Column,
    element: &dyn Column,
    raw: Value,
) -> ColumnResult<Value> {
    element.to_value(Some(raw))?.ok_or_else(|| {
        ColumnError::conversion(owner.label(), "collection elements may not be None")
    })
}

fn validate_element(
    owner: &dyn Column,
    element: &dyn Column,
    value: Value,
) -> ColumnResult<Value> {
    element.validate(Some(value))?.ok_or_else(|| {
        ColumnError::validation(owner.label(), "collection elements may not be None")
    })
}

fn check_collection_len(owner: &dyn Column, value: &Value) -> ColumnResult<()> {
    match value.collection_len() {
        Some(len) if len > MAX_COLLECTION_LEN => Err(ColumnError::validation(
            owner.label(),
            format!("{} items exceed the collection limit of {MAX_COLLECTION_LEN}", len),
        )),
        _ => Ok(()),
    }
}

// ── List ─────────────────────────────────────────────────────────

/// Ordered collection; accepts list or set input.
#[derive(Debug)]
pub struct List {
    options: ColumnOptions,
    element: Box<dyn Column>,
}

column_builder!(List);

impl List {
    #[must_use]
    pub fn new(element: impl Column + 'static) -> Self {
        Self {
            options: ColumnOptions::new(),
            element: Box::new(element),
        }
    }

    fn elements(&self, value: Value) -> Result<Vec<Value>, String> {
        match value {
            Value::List(items) | Value::Set(items) => Ok(items),
            other => Err(format!("{other} is not a list")),
        }
    }
}

impl Column for List {
    fn kind(&self) -> String {
        format!("list<{}>", self.element.kind())
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn is_container(&self) -> bool {
        true
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        let Some(raw) = raw else {
            return Ok(Some(Value::List(Vec::new())));
        };
        let items = self
            .elements(raw)
            .map_err(|m| ColumnError::conversion(self.label(), m))?;
        let converted = items
            .into_iter()
            .map(|v| convert_element(self, self.element.as_ref(), v))
            .collect::<ColumnResult<Vec<_>>>()?;
        Ok(Some(Value::List(converted)))
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        let Some(value) = self.check_required(value)? else {
            return Ok(None);
        };
        check_collection_len(self, &value)?;
        let items = self
            .elements(value)
            .map_err(|m| ColumnError::validation(self.label(), m))?;
        let validated = items
            .into_iter()
            .map(|v| validate_element(self, self.element.as_ref(), v))
            .collect::<ColumnResult<Vec<_>>>()?;
        Ok(Some(Value::List(validated)))
    }
}

// ── Set ──────────────────────────────────────────────────────────

/// Unordered unique collection; list input is deduplicated.
#[derive(Debug)]
pub struct Set {
    options: ColumnOptions,
    element: Box<dyn Column>,
}

column_builder!(Set);

impl Set {
    #[must_use]
    pub fn new(element: impl Column + 'static) -> Self {
        Self {
            options: ColumnOptions::new(),
            element: Box::new(element),
        }
    }

    fn elements(&self, value: Value) -> Result<Vec<Value>, String> {
        match value {
            Value::List(items) | Value::Set(items) => Ok(items),
            other => Err(format!("{other} is not a set")),
        }
    }
}

impl Column for Set {
    fn kind(&self) -> String {
        format!("set<{}>", self.element.kind())
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn is_container(&self) -> bool {
        true
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        let Some(raw) = raw else {
            return Ok(Some(Value::Set(Vec::new())));
        };
        let items = self
            .elements(raw)
            .map_err(|m| ColumnError::conversion(self.label(), m))?;
        let converted = items
            .into_iter()
            .map(|v| convert_element(self, self.element.as_ref(), v))
            .collect::<ColumnResult<Vec<_>>>()?;
        Ok(Some(Value::set(converted)))
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        let Some(value) = self.check_required(value)? else {
            return Ok(None);
        };
        check_collection_len(self, &value)?;
        let items = self
            .elements(value)
            .map_err(|m| ColumnError::validation(self.label(), m))?;
        let validated = items
            .into_iter()
            .map(|v| validate_element(self, self.element.as_ref(), v))
            .collect::<ColumnResult<Vec<_>>>()?;
        Ok(Some(Value::set(validated)))
    }
}

// ── Map ──────────────────────────────────────────────────────────

/// Key/value collection with unique keys.
#[derive(Debug)]
pub struct Map {
    options: ColumnOptions,
    key: Box<dyn Column>,
    value: Box<dyn Column>,
}

column_builder!(Map);

impl Map {
    #[must_use]
    pub fn new(key: impl Column + 'static, value: impl Column + 'static) -> Self {
        Self {
            options: ColumnOptions::new(),
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    fn entries(&self, value: Value) -> Result<Vec<(Value, Value)>, String> {
        match value {
            Value::Map(entries) => Ok(entries),
            other => Err(format!("{other} is not a map")),
        }
    }
}

impl Column for Map {
    fn kind(&self) -> String {
        format!("map<{}, {}>", self.key.kind(), self.value.kind())
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn is_container(&self) -> bool {
        true
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        let Some(raw) = raw else {
            return Ok(Some(Value::Map(Vec::new())));
        };
        let entries = self
            .entries(raw)
            .map_err(|m| ColumnError::conversion(self.label(), m))?;
        let converted = entries
            .into_iter()
            .map(|(k, v)| -> ColumnResult<(Value, Value)> {
                Ok((
                    convert_element(self, self.key.as_ref(), k)?,
                    convert_element(self, self.value.as_ref(), v)?,
                ))
            })
            .collect::<ColumnResult<Vec<_>>>()?;
        Ok(Some(Value::map(converted)))
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        let Some(value) = self.check_required(value)? else {
            return Ok(None);
        };
        check_collection_len(self, &value)?;
        let entries = self
            .entries(value)
            .map_err(|m| ColumnError::validation(self.label(), m))?;
        let validated = entries
            .into_iter()
            .map(|(k, v)| -> ColumnResult<(Value, Value)> {
                Ok((
                    validate_element(self, self.key.as_ref(), k)?,
                    validate_element(self, self.value.as_ref(), v)?,
                ))
            })
            .collect::<ColumnResult<Vec<_>>>()?;
        Ok(Some(Value::map(validated)))
    }
}
