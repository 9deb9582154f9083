//! Instances of a user-defined type.

use cqlmodel_columns::ValueManager;
use cqlmodel_types::Value;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::warn;

use crate::{UnknownFieldPolicy, UserTypeDefinition, UserTypeError, UserTypeResult};

/// One value of a user-defined type.
///
/// Holds a [`ValueManager`] per declared field, in registry order. Values
/// are not validated on construction or assignment; call
/// [`UserTypeInstance::validate`] before persisting.
#[derive(Debug, Clone)]
pub struct UserTypeInstance {
    definition: Arc<UserTypeDefinition>,
    values: Vec<ValueManager>,
}

impl UserTypeInstance {
    /// Constructs an instance from (declared name, value) pairs.
    ///
    /// Every declared field gets a value manager. Supplied values, and every
    /// container field, go through the column's conversion; other fields
    /// start as `None`. A field is explicit iff its name was supplied, even
    /// when the supplied value is `None`.
    ///
    /// Names the type does not declare are handled per the definition's
    /// [`UnknownFieldPolicy`]. Conversion errors are returned unchanged.
    pub fn new<K, I>(definition: &Arc<UserTypeDefinition>, values: I) -> UserTypeResult<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Option<Value>)>,
    {
        let registry = definition.registry();
        let mut supplied: HashMap<String, Option<Value>> = HashMap::new();
        for (name, value) in values {
            let name = name.into();
            if !registry.contains(&name) {
                check_unknown(definition, &name)?;
                continue;
            }
            supplied.insert(name, value);
        }

        let mut managers = Vec::with_capacity(registry.len());
        for (name, column) in registry.iter() {
            let explicit = supplied.contains_key(name);
            let raw = supplied.remove(name).flatten();
            let value = if raw.is_some() || column.is_container() {
                column.to_value(raw)?
            } else {
                None
            };
            let mut manager = column.value_manager(value);
            if explicit {
                manager.set_explicit(true);
            }
            managers.push(manager);
        }

        Ok(Self {
            definition: Arc::clone(definition),
            values: managers,
        })
    }

    /// Constructs an instance from a database row keyed by wire names.
    pub fn from_wire<I>(definition: &Arc<UserTypeDefinition>, row: I) -> UserTypeResult<Self>
    where
        I: IntoIterator<Item = (String, Option<Value>)>,
    {
        let registry = definition.registry();
        let mut translated = Vec::new();
        for (db_field, value) in row {
            match registry.declared_name(&db_field) {
                Some(name) => translated.push((name.to_string(), value)),
                None => check_unknown(definition, &db_field)?,
            }
        }
        Self::new(definition, translated)
    }

    pub fn definition(&self) -> &Arc<UserTypeDefinition> {
        &self.definition
    }

    pub fn type_name(&self) -> &str {
        self.definition.type_name()
    }

    fn slot(&self, name: &str) -> UserTypeResult<usize> {
        self.definition
            .registry()
            .position_of(name)
            .ok_or_else(|| UserTypeError::unknown_field(self.definition.type_name(), name))
    }

    /// Current value of a field.
    pub fn get(&self, name: &str) -> UserTypeResult<Option<&Value>> {
        let slot = self.slot(name)?;
        Ok(self.values[slot].value())
    }

    /// Assigns a field. No conversion or validation happens here.
    pub fn set(&mut self, name: &str, value: Option<Value>) -> UserTypeResult<()> {
        let slot = self.slot(name)?;
        self.values[slot].set(value);
        Ok(())
    }

    pub fn is_explicit(&self, name: &str) -> UserTypeResult<bool> {
        let slot = self.slot(name)?;
        Ok(self.values[slot].is_explicit())
    }

    pub fn value_manager(&self, name: &str) -> UserTypeResult<&ValueManager> {
        let slot = self.slot(name)?;
        Ok(&self.values[slot])
    }

    /// (declared name, value) for every field in declared order.
    pub fn iter_values(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.definition
            .registry()
            .names()
            .zip(self.values.iter().map(ValueManager::value))
    }

    /// Fields whose value differs from the last persisted baseline.
    pub fn changed_fields(&self) -> Vec<&str> {
        self.definition
            .registry()
            .names()
            .zip(&self.values)
            .filter(|(_, manager)| manager.changed())
            .map(|(name, _)| name)
            .collect()
    }

    /// Fills defaults and validates every field in declared order.
    ///
    /// A field that is `None`, was not supplied explicitly, and has a default
    /// receives the default first. The column's validated (possibly
    /// normalized) value is written back. Stops at the first failing field;
    /// later fields are left untouched.
    pub fn validate(&mut self) -> UserTypeResult<()> {
        let definition = Arc::clone(&self.definition);
        for ((_, column), manager) in definition.registry().iter().zip(self.values.iter_mut()) {
            let mut value = manager.value().cloned();
            if value.is_none() && !manager.is_explicit() && column.has_default() {
                value = column.get_default();
            }
            let validated = column.validate(value)?;
            manager.set(validated);
        }
        Ok(())
    }

    /// (wire name, value) pairs in declared order.
    pub fn to_wire(&self) -> Vec<(String, Option<Value>)> {
        self.definition
            .registry()
            .iter()
            .zip(&self.values)
            .map(|((_, column), manager)| {
                (column.db_field_name().to_string(), manager.value().cloned())
            })
            .collect()
    }

    /// The instance as a nested-row cell value.
    pub fn to_udt_value(&self) -> Value {
        Value::Udt(self.to_wire())
    }

    /// Like [`UserTypeInstance::to_udt_value`], but only explicit fields are
    /// emitted, so decoding the row again leaves absent fields defaultable.
    pub(crate) fn to_explicit_udt_value(&self) -> Value {
        let row = self
            .definition
            .registry()
            .iter()
            .zip(&self.values)
            .filter(|(_, manager)| manager.is_explicit())
            .map(|((_, column), manager)| {
                (column.db_field_name().to_string(), manager.value().cloned())
            })
            .collect();
        Value::Udt(row)
    }

    /// Marks every current value as the persisted baseline, so
    /// [`UserTypeInstance::changed_fields`] starts out empty again.
    pub fn mark_persisted(&mut self) {
        for manager in &mut self.values {
            manager.reset_previous_value();
        }
    }
}

/// Applies the unknown-field policy: an error under `Reject`, a warning
/// under `Ignore`.
fn check_unknown(definition: &UserTypeDefinition, name: &str) -> UserTypeResult<()> {
    match definition.settings().unknown_fields {
        UnknownFieldPolicy::Reject => Err(UserTypeError::unknown_field(definition.type_name(), name)),
        UnknownFieldPolicy::Ignore => {
            warn!(
                "Ignoring unknown field {} for user type {}",
                name,
                definition.type_name()
            );
            Ok(())
        }
    }
}

impl PartialEq for UserTypeInstance {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.definition, &other.definition) {
            return false;
        }

        let keys: HashSet<&str> = self.definition.registry().names().collect();
        let other_keys: HashSet<&str> = other.definition.registry().names().collect();
        if keys != other_keys {
            return false;
        }

        other_keys
            .iter()
            .all(|name| self.get(name).ok().flatten() == other.get(name).ok().flatten())
    }
}

impl Eq for UserTypeInstance {}

impl Hash for UserTypeInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.definition.type_name().hash(state);
        for (name, value) in self.iter_values() {
            name.hash(state);
            value.hash(state);
        }
    }
}
