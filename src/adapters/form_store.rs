use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::{FieldPath, Segment};
use crate::error::{FormError, Result};

/// Key/value state the form is bound to.
///
/// The host owns the store; the engine reads values and errors and only
/// writes when an array grows or shrinks.
pub trait FormStore {
    /// Current value at `path` (the root path addresses the whole document)
    fn get(&self, path: &FieldPath) -> Option<Value>;

    /// Write a value, creating intermediate objects/arrays as needed
    fn set(&mut self, path: &FieldPath, value: Value);

    /// Remove the value at `path`. Array elements after it shift down by one.
    fn delete(&mut self, path: &FieldPath) -> Option<Value>;

    /// Error messages attached to `path`
    fn errors(&self, path: &FieldPath) -> Vec<String>;

    /// Replace the errors attached to `path` (empty clears them)
    fn set_errors(&mut self, path: &FieldPath, errors: Vec<String>);

    /// Drop errors at `prefix` and everything underneath it
    fn clear_errors(&mut self, prefix: &FieldPath);

    /// Every path that currently carries errors
    fn error_paths(&self) -> Vec<FieldPath>;

    /// Length of the array at `path`, 0 when absent or not an array
    fn array_len(&self, path: &FieldPath) -> usize {
        self.get(path)
            .and_then(|v| v.as_array().map(Vec::len))
            .unwrap_or(0)
    }
}

/// Store backed by a nested JSON document and a key → errors map
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemoryFormStore {
    values: Value,
    errors: BTreeMap<String, Vec<String>>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Value) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    /// The whole value document
    pub fn values(&self) -> &Value {
        &self.values
    }

    /// All errors keyed by dotted path
    pub fn all_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl FormStore for InMemoryFormStore {
    fn get(&self, path: &FieldPath) -> Option<Value> {
        lookup(&self.values, path).cloned()
    }

    fn set(&mut self, path: &FieldPath, value: Value) {
        *slot_mut(&mut self.values, path) = value;
    }

    fn delete(&mut self, path: &FieldPath) -> Option<Value> {
        let last = path.last()?.clone();
        let parent = lookup_mut(&mut self.values, &path.parent())?;
        match (parent, last) {
            (Value::Object(map), Segment::Property(name)) => map.remove(&name),
            (Value::Object(map), Segment::Index(idx)) => map.remove(&idx.to_string()),
            (Value::Array(arr), Segment::Index(idx)) if idx < arr.len() => Some(arr.remove(idx)),
            (Value::Array(arr), Segment::Property(name)) => match name.parse::<usize>() {
                Ok(idx) if idx < arr.len() => Some(arr.remove(idx)),
                _ => None,
            },
            _ => None,
        }
    }

    fn errors(&self, path: &FieldPath) -> Vec<String> {
        self.errors
            .get(&path.to_store_key())
            .cloned()
            .unwrap_or_default()
    }

    fn set_errors(&mut self, path: &FieldPath, errors: Vec<String>) {
        let key = path.to_store_key();
        if errors.is_empty() {
            self.errors.remove(&key);
        } else {
            self.errors.insert(key, errors);
        }
    }

    fn clear_errors(&mut self, prefix: &FieldPath) {
        self.errors
            .retain(|key, _| !FieldPath::parse(key).starts_with(prefix));
    }

    fn error_paths(&self) -> Vec<FieldPath> {
        self.errors.keys().map(|k| FieldPath::parse(k)).collect()
    }
}

fn lookup<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match (segment, current) {
            (Segment::Property(name), Value::Object(map)) => map.get(name)?,
            (Segment::Index(idx), Value::Object(map)) => map.get(&idx.to_string())?,
            (Segment::Index(idx), Value::Array(arr)) => arr.get(*idx)?,
            (Segment::Property(name), Value::Array(arr)) => arr.get(name.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn lookup_mut<'a>(root: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match (segment, current) {
            (Segment::Property(name), Value::Object(map)) => map.get_mut(name)?,
            (Segment::Index(idx), Value::Object(map)) => map.get_mut(&idx.to_string())?,
            (Segment::Index(idx), Value::Array(arr)) => arr.get_mut(*idx)?,
            (Segment::Property(name), Value::Array(arr)) => {
                arr.get_mut(name.parse::<usize>().ok()?)?
            }
            _ => return None,
        };
    }
    Some(current)
}

fn slot_mut<'a>(root: &'a mut Value, path: &FieldPath) -> &'a mut Value {
    let mut current = root;
    for segment in path.segments() {
        current = match segment {
            Segment::Index(idx) if !current.is_object() => {
                let arr = ensure_array(current);
                if arr.len() <= *idx {
                    arr.resize(*idx + 1, Value::Null);
                }
                &mut arr[*idx]
            }
            Segment::Index(idx) => ensure_object(current)
                .entry(idx.to_string())
                .or_insert(Value::Null),
            Segment::Property(name) => ensure_object(current)
                .entry(name.clone())
                .or_insert(Value::Null),
        };
    }
    current
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

fn ensure_array(value: &mut Value) -> &mut Vec<Value> {
    if !value.is_array() {
        *value = Value::Array(Vec::new());
    }
    match value {
        Value::Array(arr) => arr,
        _ => unreachable!("value was just replaced with an array"),
    }
}

/// Attach server-side errors to the same per-path slots client rules use.
///
/// `payload` is an object keyed by dotted path whose values are a message
/// or a list of messages. Returns the number of paths updated.
pub fn apply_external_errors(store: &mut dyn FormStore, payload: &Value) -> Result<usize> {
    let entries = payload.as_object().ok_or_else(|| {
        FormError::InvalidErrorPayload("expected an object keyed by field path".to_string())
    })?;

    let mut applied = 0;
    for (key, messages) in entries {
        let messages: Vec<String> = match messages {
            Value::String(msg) => vec![msg.clone()],
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            other => {
                return Err(FormError::InvalidErrorPayload(format!(
                    "errors for '{}' must be a string or list, got {}",
                    key, other
                )))
            }
        };

        let path = FieldPath::parse(key);
        let mut merged = store.errors(&path);
        for msg in messages {
            if !merged.contains(&msg) {
                merged.push(msg);
            }
        }
        store.set_errors(&path, merged);
        applied += 1;
    }

    tracing::debug!("Applied external errors to {} paths", applied);
    Ok(applied)
}
