//! Declaration metadata shared by every column.

use cqlmodel_types::Value;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

static POSITION_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Returns the next declaration position.
///
/// Every column takes a position from this process-wide counter when it is
/// constructed, so columns declared earlier sort first unless a position is
/// assigned explicitly.
pub fn next_position() -> usize {
    POSITION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// How a column fills in a value that was never supplied.
#[derive(Clone, Default)]
pub enum DefaultValue {
    #[default]
    None,
    /// A fixed value, cloned on each use.
    Value(Value),
    /// Called on each use (e.g. a fresh UUID per instance).
    Callable(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    pub fn callable(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self::Callable(Arc::new(f))
    }

    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Produces the default, or `None` when the column has no default.
    pub fn get(&self) -> Option<Value> {
        match self {
            Self::None => None,
            Self::Value(v) => Some(v.clone()),
            Self::Callable(f) => Some(f()),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Callable(_) => write!(f, "Callable(..)"),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

/// Metadata carried by every column declaration.
#[derive(Debug, Clone)]
pub struct ColumnOptions {
    /// Declared ordinal; registries are ordered by ascending position.
    pub position: usize,
    /// Wire (database) name override.
    pub db_field: Option<String>,
    /// Declared name, tagged when the column is registered on a type.
    pub column_name: Option<String>,
    pub default: DefaultValue,
    pub required: bool,
}

impl ColumnOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: next_position(),
            db_field: None,
            column_name: None,
            default: DefaultValue::None,
            required: false,
        }
    }
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self::new()
    }
}
