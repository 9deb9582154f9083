//! Declarative user-defined types (UDTs) for a column-oriented database.
//!
//! A UDT is declared once, at program initialization, as a set of named,
//! positioned columns. From there:
//! - [`UserTypeBuilder`] orders the columns, rejects reserved names and builds
//!   the immutable [`UserTypeDefinition`] with its [`FieldRegistry`]
//! - [`UserTypeDefinition::type_name`] derives the canonical database name
//! - [`UserTypeInstance`] holds one [`ValueManager`] per field, tracks which
//!   values were supplied explicitly and fills defaults during validation
//! - [`Connection`] registers a definition under a keyspace; [`UdtRegistry`]
//!   is the in-memory implementation
//! - [`UserDefinedType`] nests one UDT inside another as a column
//!
//! ```ignore
//! let address = UserTypeDefinition::builder("Address")
//!     .field("street", Text::new().required(true))
//!     .field("zipcode", Integer::new().db_field("zip"))
//!     .build()?;
//!
//! let mut home = UserTypeInstance::new(&address, [("street", Some("Main St".into()))])?;
//! home.validate()?;
//! address.register_for_keyspace("app", &connection)?;
//! ```

mod connection;
mod definition;
mod error;
mod instance;
mod nested;
mod registry;
mod settings;

pub use cqlmodel_columns::ValueManager;
pub use connection::{Connection, UdtRegistry};
pub use definition::{
    derive_type_name, UserTypeBuilder, UserTypeDefinition, MAX_TYPE_NAME_LEN, RESERVED_MEMBERS,
};
pub use error::{UserTypeError, UserTypeResult};
pub use instance::UserTypeInstance;
pub use nested::UserDefinedType;
pub use registry::FieldRegistry;
pub use settings::{UnknownFieldPolicy, UserTypeSettings};
