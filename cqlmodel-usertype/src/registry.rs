//! Ordered field registry of a user-defined type.

use cqlmodel_columns::Column;
use std::collections::HashMap;

/// The fields of one user type, in declared-position order, plus the
/// wire-name to declared-name translation table.
///
/// Built once by [`crate::UserTypeBuilder`] and read-only afterwards.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: Vec<(String, Box<dyn Column>)>,
    index: HashMap<String, usize>,
    db_map: HashMap<String, String>,
}

impl FieldRegistry {
    pub(crate) fn insert(&mut self, name: String, column: Box<dyn Column>) {
        self.index.insert(name.clone(), self.fields.len());
        self.fields.push((name, column));
    }

    /// Rebuilds the wire-name map. A wire name used by more than one field
    /// maps to the last of them.
    pub(crate) fn build_db_map(&mut self) {
        self.db_map = self
            .fields
            .iter()
            .map(|(name, column)| (column.db_field_name().to_string(), name.clone()))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Column> {
        self.index.get(name).map(|&i| self.fields[i].1.as_ref())
    }

    /// Registry slot of a declared field.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Fields in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Column)> {
        self.fields
            .iter()
            .map(|(name, column)| (name.as_str(), column.as_ref()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Wire name → declared name.
    pub fn db_map(&self) -> &HashMap<String, String> {
        &self.db_map
    }

    /// Declared name for a wire (database) column name.
    pub fn declared_name(&self, db_field: &str) -> Option<&str> {
        self.db_map.get(db_field).map(String::as_str)
    }
}
