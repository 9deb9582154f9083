//! Dynamically-typed cell values.
//!
//! A [`Value`] is what a column converts raw input into and what the database
//! driver ultimately reads and writes. Collections keep their elements in a
//! `Vec` so the wire order is explicit; sets and maps are normalized (sorted,
//! deduplicated) by their constructors.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

use crate::Result;

/// A single cell value.
///
/// `Value` is totally ordered and hashable so it can key sets and maps.
/// Doubles compare by [`f64::total_cmp`] after folding `-0.0` into `0.0`, so
/// signed zeros are equal while NaNs still compare equal to themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Boolean(bool),
    Int(i32),
    BigInt(i64),
    Double(f64),
    Text(String),
    Uuid(Uuid),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    Blob(Vec<u8>),
    List(Vec<Value>),
    /// Sorted and deduplicated; build with [`Value::set`].
    Set(Vec<Value>),
    /// Sorted by key with unique keys; build with [`Value::map`].
    Map(Vec<(Value, Value)>),
    /// A nested user-defined type row as (wire name, value) pairs.
    Udt(Vec<(String, Option<Value>)>),
}

impl Value {
    /// Builds a normalized set value.
    #[must_use]
    pub fn set(mut items: Vec<Value>) -> Self {
        items.sort();
        items.dedup();
        Value::Set(items)
    }

    /// Builds a normalized map value. On duplicate keys the last entry wins.
    #[must_use]
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        let mut normalized: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match normalized.binary_search_by(|(k, _)| k.cmp(&key)) {
                Ok(idx) => normalized[idx].1 = value,
                Err(idx) => normalized.insert(idx, (key, value)),
            }
        }
        Value::Map(normalized)
    }

    /// Parses a UUID from its textual form.
    pub fn parse_uuid(s: &str) -> Result<Self> {
        Ok(Value::Uuid(Uuid::parse_str(s)?))
    }

    /// Returns the CQL-style type name, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
            Value::Uuid(_) => "uuid",
            Value::Timestamp(_) => "timestamp",
            Value::Blob(_) => "blob",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Udt(_) => "udt",
        }
    }

    /// Whether this value is a list, set, or map.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::List(_) | Value::Set(_) | Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of `Int`, `BigInt`, and `Timestamp` values.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(i64::from(*n)),
            Value::BigInt(n) | Value::Timestamp(n) => Some(*n),
            _ => None,
        }
    }

    /// Floating point view of any numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            Value::Int(n) => Some(f64::from(*n)),
            Value::BigInt(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Elements of a list or set.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_udt(&self) -> Option<&[(String, Option<Value>)]> {
        match self {
            Value::Udt(row) => Some(row),
            _ => None,
        }
    }

    /// Number of elements in a collection; `None` for scalars.
    pub fn collection_len(&self) -> Option<usize> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Boolean(_) => 0,
            Value::Int(_) => 1,
            Value::BigInt(_) => 2,
            Value::Double(_) => 3,
            Value::Text(_) => 4,
            Value::Uuid(_) => 5,
            Value::Timestamp(_) => 6,
            Value::Blob(_) => 7,
            Value::List(_) => 8,
            Value::Set(_) => 9,
            Value::Map(_) => 10,
            Value::Udt(_) => 11,
        }
    }
}

/// Maps `-0.0` to `0.0`; every other double is returned unchanged.
fn unsigned_zero(d: f64) -> f64 {
    if d == 0.0 { 0.0 } else { d }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::BigInt(a), Value::BigInt(b)) => a.cmp(b),
            (Value::Double(a), Value::Double(b)) => {
                unsigned_zero(*a).total_cmp(&unsigned_zero(*b))
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            (Value::Udt(a), Value::Udt(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Boolean(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::BigInt(n) | Value::Timestamp(n) => n.hash(state),
            Value::Double(d) => unsigned_zero(*d).to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Uuid(u) => u.hash(state),
            Value::Blob(bytes) => bytes.hash(state),
            Value::List(items) | Value::Set(items) => items.hash(state),
            Value::Map(entries) => entries.hash(state),
            Value::Udt(row) => row.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Text(s) => write!(f, "'{s}'"),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::Timestamp(ms) => write!(f, "{ms}ms"),
            Value::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Value::List(items) => write_seq(f, "[", items, "]"),
            Value::Set(items) => write_seq(f, "{", items, "}"),
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Udt(row) => {
                write!(f, "{{")?;
                for (i, (name, v)) in row.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match v {
                        Some(v) => write!(f, "{name}: {v}")?,
                        None => write!(f, "{name}: null")?,
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::BigInt(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}
