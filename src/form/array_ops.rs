//! Append/remove on array values in the store

use serde_json::Value;

use super::defaults::synthesize_default;
use crate::adapters::form_store::FormStore;
use crate::domain::{FieldPath, SchemaNode};
use crate::error::{FormError, Result};

/// Write a synthesized element after the last one and return its path.
///
/// A missing or non-array value at `array_path` becomes a one-element array.
pub fn append(store: &mut dyn FormStore, array_path: &FieldPath, item_schema: &SchemaNode) -> FieldPath {
    let item = synthesize_default(item_schema);

    let mut elements = match store.get(array_path) {
        Some(Value::Array(existing)) => existing,
        _ => Vec::new(),
    };
    let index = elements.len();
    elements.push(item);
    store.set(array_path, Value::Array(elements));

    tracing::debug!("Appended element {} to '{}'", index, array_path);
    array_path.push_index(index)
}

/// Delete the element at `index`; later elements shift down by one.
///
/// Errors recorded at or after `index` are dropped because their paths no
/// longer point at the same element.
pub fn remove(store: &mut dyn FormStore, array_path: &FieldPath, index: usize) -> Result<Value> {
    let len = match store.get(array_path) {
        Some(Value::Array(existing)) => existing.len(),
        _ => return Err(FormError::NotAnArray(array_path.to_store_key())),
    };
    if index >= len {
        return Err(FormError::IndexOutOfRange {
            path: array_path.to_store_key(),
            index,
            len,
        });
    }

    let removed = store
        .delete(&array_path.push_index(index))
        .unwrap_or(Value::Null);

    for idx in index..len {
        store.clear_errors(&array_path.push_index(idx));
    }

    tracing::debug!("Removed element {} from '{}'", index, array_path);
    Ok(removed)
}
