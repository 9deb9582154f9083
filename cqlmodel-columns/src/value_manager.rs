//! Per-instance, per-field value holder.

use cqlmodel_types::Value;

/// Holds one field's value on one instance.
///
/// Tracks whether the value was supplied by the caller (`explicit`) and the
/// value it held when last persisted, so callers can tell what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueManager {
    value: Option<Value>,
    previous_value: Option<Value>,
    explicit: bool,
}

impl ValueManager {
    #[must_use]
    pub fn new(initial: Option<Value>) -> Self {
        Self {
            previous_value: initial.clone(),
            value: initial,
            explicit: false,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn set(&mut self, value: Option<Value>) {
        self.value = value;
    }

    pub fn delete(&mut self) {
        self.value = None;
    }

    /// Whether the caller supplied this value, as opposed to leaving it to
    /// be defaulted.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    pub fn set_explicit(&mut self, explicit: bool) {
        self.explicit = explicit;
    }

    pub fn previous_value(&self) -> Option<&Value> {
        self.previous_value.as_ref()
    }

    pub fn changed(&self) -> bool {
        self.value != self.previous_value
    }

    /// The value was present and has since been removed.
    pub fn deleted(&self) -> bool {
        self.value.is_none() && self.previous_value.is_some()
    }

    /// Marks the current value as the persisted baseline.
    pub fn reset_previous_value(&mut self) {
        self.previous_value = self.value.clone();
    }
}
