//! Registration of user types with the database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::{UserTypeDefinition, UserTypeError, UserTypeResult};

/// The database-side registration hook.
///
/// Drivers implement this to map a keyspace-qualified type name to a
/// definition so rows of that type can be decoded into instances.
/// Registering the same arguments twice must be safe.
pub trait Connection: Send + Sync {
    fn register_udt(
        &self,
        keyspace: &str,
        type_name: &str,
        definition: Arc<UserTypeDefinition>,
    ) -> UserTypeResult<()>;
}

type KeyspaceTypes = HashMap<String, HashMap<String, Arc<UserTypeDefinition>>>;

/// In-memory registry of user types per keyspace.
#[derive(Debug, Default)]
pub struct UdtRegistry {
    types: RwLock<KeyspaceTypes>,
}

impl UdtRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The definition registered under `keyspace.type_name`.
    pub fn lookup(
        &self,
        keyspace: &str,
        type_name: &str,
    ) -> UserTypeResult<Option<Arc<UserTypeDefinition>>> {
        let types = self
            .types
            .read()
            .map_err(|e| UserTypeError::Registration(e.to_string()))?;
        Ok(types
            .get(keyspace)
            .and_then(|by_name| by_name.get(type_name))
            .cloned())
    }

    /// Type names registered in `keyspace`, sorted.
    pub fn type_names(&self, keyspace: &str) -> UserTypeResult<Vec<String>> {
        let types = self
            .types
            .read()
            .map_err(|e| UserTypeError::Registration(e.to_string()))?;
        let mut names: Vec<String> = types
            .get(keyspace)
            .map(|by_name| by_name.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }
}

impl Connection for UdtRegistry {
    fn register_udt(
        &self,
        keyspace: &str,
        type_name: &str,
        definition: Arc<UserTypeDefinition>,
    ) -> UserTypeResult<()> {
        if keyspace.is_empty() {
            return Err(UserTypeError::Registration(format!(
                "no keyspace given for user type {type_name}"
            )));
        }
        if type_name.is_empty() {
            return Err(UserTypeError::Registration(format!(
                "empty type name in keyspace {keyspace}"
            )));
        }

        let mut types = self
            .types
            .write()
            .map_err(|e| UserTypeError::Registration(e.to_string()))?;
        let by_name = types.entry(keyspace.to_string()).or_default();

        match by_name.get(type_name) {
            Some(existing) if Arc::ptr_eq(existing, &definition) => {
                debug!("User type {}.{} already registered", keyspace, type_name);
                return Ok(());
            }
            Some(_) => {
                warn!(
                    "Replacing user type {}.{} with a different definition",
                    keyspace, type_name
                );
            }
            None => {
                info!("Registered user type {}.{}", keyspace, type_name);
            }
        }
        by_name.insert(type_name.to_string(), definition);
        Ok(())
    }
}
