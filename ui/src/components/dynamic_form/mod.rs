//! Browser renderer for composed control trees
//!
//! The control tree is recomposed only when the shape of the data changes
//! (append/remove). Leaves read their value and errors from the store signal
//! directly, so typing never rebuilds the surrounding DOM.

use leptos::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

use studio_forms::adapters::form_store::{FormStore, InMemoryFormStore};
use studio_forms::domain::FieldPath;
use studio_forms::form::ArrayControl;

pub mod array_field;
pub mod control;
pub mod fields;
pub mod form;
pub mod raw_view;

pub use form::DynamicForm;

/// Reactive handles shared by every control of one form
#[derive(Clone, Copy)]
pub struct FormState {
    pub store: RwSignal<InMemoryFormStore>,
    /// Bumped whenever elements are added or removed
    pub structure: RwSignal<u64>,
    /// Collapse state keyed by array store key
    pub collapsed: RwSignal<HashMap<String, bool>>,
}

impl FormState {
    pub fn new(values: Value) -> Self {
        Self {
            store: RwSignal::new(InMemoryFormStore::from_values(values)),
            structure: RwSignal::new(0),
            collapsed: RwSignal::new(HashMap::new()),
        }
    }

    pub fn value(&self, path: &FieldPath) -> Value {
        self.store
            .with(|s| s.get(path))
            .unwrap_or(Value::Null)
    }

    /// Stored value, or `fallback` when the slot is missing or null
    pub fn resolved(&self, path: &FieldPath, fallback: Option<&Value>) -> Value {
        match self.value(path) {
            Value::Null => fallback.cloned().unwrap_or(Value::Null),
            value => value,
        }
    }

    pub fn set_value(&self, path: &FieldPath, value: Value) {
        self.store.update(|s| s.set(path, value));
    }

    pub fn errors(&self, path: &FieldPath) -> Vec<String> {
        self.store.with(|s| s.errors(path))
    }

    pub fn append(&self, array: &ArrayControl) {
        let mut new_path = None;
        self.store.update(|s| new_path = Some(array.append(s)));
        if let Some(path) = new_path {
            log::debug!("Appended {}", path);
        }
        self.structure.update(|v| *v += 1);
    }

    pub fn remove(&self, array: &ArrayControl, index: usize) {
        let mut result = Ok(Value::Null);
        self.store.update(|s| result = array.remove(s, index));
        match result {
            Ok(_) => self.structure.update(|v| *v += 1),
            Err(e) => log::warn!("Failed to remove element {}: {}", index, e),
        }
    }

    pub fn is_collapsed(&self, key: &str, initial: bool) -> bool {
        self.collapsed
            .with(|c| c.get(key).copied())
            .unwrap_or(initial)
    }

    pub fn toggle_collapsed(&self, key: String, initial: bool) {
        self.collapsed.update(|c| {
            let current = c.get(&key).copied().unwrap_or(initial);
            c.insert(key, !current);
        });
    }
}
