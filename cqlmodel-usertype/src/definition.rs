//! User type declaration: the builder, the immutable definition, and
//! canonical type-name derivation.

use cqlmodel_columns::Column;
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::{
    Connection, FieldRegistry, UnknownFieldPolicy, UserTypeError, UserTypeResult,
    UserTypeSettings,
};

/// Longest type name the database accepts.
pub const MAX_TYPE_NAME_LEN: usize = 48;

/// Member names of the user-type API. A field may not use any of them.
pub const RESERVED_MEMBERS: &[&str] = &[
    "changed_fields",
    "definition",
    "from_wire",
    "get",
    "is_explicit",
    "iter_values",
    "register_for_keyspace",
    "set",
    "to_udt_value",
    "to_wire",
    "type_name",
    "validate",
    "value_manager",
];

/// Derives the canonical database name of a user type.
///
/// An explicit override is only lowercased. Otherwise camel-case boundaries
/// in `name` become underscores (`FooBar` → `Foo_Bar`), the result is cut to
/// its last [`MAX_TYPE_NAME_LEN`] characters, lowercased, and stripped of
/// leading underscores. Truncation keeps the suffix, so two long names that
/// share an ending derive the same identifier.
pub fn derive_type_name(name: &str, override_name: Option<&str>) -> String {
    if let Some(explicit) = override_name.filter(|n| !n.is_empty()) {
        return explicit.to_lowercase();
    }

    let mut snake = String::with_capacity(name.len() + 8);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if prev.is_some_and(|p| p.is_ascii_lowercase()) && c.is_ascii_uppercase() {
            snake.push('_');
        }
        snake.push(c);
        prev = Some(c);
    }

    let len = snake.chars().count();
    let tail: String = snake
        .chars()
        .skip(len.saturating_sub(MAX_TYPE_NAME_LEN))
        .collect();
    tail.to_lowercase().trim_start_matches('_').to_string()
}

/// Collects field declarations for a new user type.
///
/// ```ignore
/// let point = UserTypeDefinition::builder("GeoPoint")
///     .field("lat", Double::new().required(true))
///     .field("lon", Double::new().required(true))
///     .build()?;
/// assert_eq!(point.type_name(), "geo_point");
/// ```
#[derive(Debug)]
pub struct UserTypeBuilder {
    name: String,
    type_name: Option<String>,
    fields: Vec<(String, Box<dyn Column>)>,
    settings: UserTypeSettings,
}

impl UserTypeBuilder {
    /// Sets the database type name instead of deriving it.
    #[must_use]
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    #[must_use]
    pub fn field(self, name: impl Into<String>, column: impl Column + 'static) -> Self {
        self.boxed_field(name, Box::new(column))
    }

    #[must_use]
    pub fn boxed_field(mut self, name: impl Into<String>, column: Box<dyn Column>) -> Self {
        self.fields.push((name.into(), column));
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: UserTypeSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.settings.unknown_fields = policy;
        self
    }

    /// Builds the definition.
    ///
    /// Fields are ordered by declared position. Any field whose name is
    /// reserved, empty, or declared twice fails the whole build with
    /// [`UserTypeError::Definition`].
    pub fn build(self) -> UserTypeResult<Arc<UserTypeDefinition>> {
        if self.name.is_empty() {
            return Err(UserTypeError::definition("user type name must not be empty"));
        }

        let mut fields = self.fields;
        fields.sort_by_key(|(_, column)| column.position());

        let mut registry = FieldRegistry::default();
        for (name, mut column) in fields {
            if name.is_empty() {
                return Err(UserTypeError::definition(format!(
                    "user type '{}' declares a field with an empty name",
                    self.name
                )));
            }
            if RESERVED_MEMBERS.contains(&name.as_str()) {
                return Err(UserTypeError::definition(format!(
                    "field '{name}' conflicts with built-in attribute/method"
                )));
            }
            if registry.contains(&name) {
                return Err(UserTypeError::definition(format!(
                    "field '{name}' is declared more than once"
                )));
            }
            column.set_column_name(&name);
            registry.insert(name, column);
        }
        registry.build_db_map();

        debug!(
            "Built user type {} with {} fields",
            self.name,
            registry.len()
        );

        Ok(Arc::new(UserTypeDefinition {
            name: self.name,
            type_name_override: self.type_name,
            registry,
            settings: self.settings,
            canonical_name: OnceLock::new(),
        }))
    }
}

/// An immutable user-type declaration.
///
/// Shared as `Arc<UserTypeDefinition>`; instances point back to it and two
/// instances are only comparable when they share the same definition.
#[derive(Debug)]
pub struct UserTypeDefinition {
    name: String,
    type_name_override: Option<String>,
    registry: FieldRegistry,
    settings: UserTypeSettings,
    canonical_name: OnceLock<String>,
}

impl UserTypeDefinition {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> UserTypeBuilder {
        UserTypeBuilder {
            name: name.into(),
            type_name: None,
            fields: Vec::new(),
            settings: UserTypeSettings::default(),
        }
    }

    /// The name the type was declared with.
    pub fn declared_name(&self) -> &str {
        &self.name
    }

    /// Canonical database name, derived on first use and cached.
    pub fn type_name(&self) -> &str {
        self.canonical_name.get_or_init(|| {
            let derived = derive_type_name(&self.name, self.type_name_override.as_deref());
            debug!("Derived type name {} for {}", derived, self.name);
            derived
        })
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &UserTypeSettings {
        &self.settings
    }

    /// Registers this type with `connection` under `keyspace`, using the
    /// canonical type name.
    pub fn register_for_keyspace(
        self: &Arc<Self>,
        keyspace: &str,
        connection: &dyn Connection,
    ) -> UserTypeResult<()> {
        connection.register_udt(keyspace, self.type_name(), Arc::clone(self))
    }
}
