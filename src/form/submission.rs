//! Submission events handed back to the host

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dispatcher::{classify, NodeClass};
use crate::adapters::form_store::FormStore;
use crate::config::FormSettings;
use crate::domain::{Document, FieldPath, SchemaNode};
use crate::error::{FormError, Result};

/// A payload submitted with a named transition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub document: String,
    pub transition: String,
    pub payload: Value,
}

/// Build the submission for `transition` from the current store.
///
/// Object forms submit the store snapshot restricted to the schema's shape
/// (hidden fields included). Raw documents and forms whose root is not an
/// object submit the value under the configured raw key.
pub fn build_submission(
    document: &Document,
    store: &dyn FormStore,
    transition: &str,
    settings: &FormSettings,
) -> Result<Submission> {
    if !document.has_transition(transition) {
        return Err(FormError::UnknownTransition {
            document: document.id.clone(),
            transition: transition.to_string(),
        });
    }

    let snapshot = store.get(&FieldPath::root());
    let payload = if document.content_kind().is_raw() {
        wrap_raw(&settings.raw_key, snapshot.unwrap_or(Value::Null))
    } else if classify(&document.schema) != NodeClass::Object {
        wrap_raw(
            &settings.raw_key,
            restrict_to_schema(&document.schema, snapshot.as_ref()),
        )
    } else {
        restrict_to_schema(&document.schema, snapshot.as_ref())
    };

    tracing::info!(
        "Submitting document '{}' with transition '{}'",
        document.id,
        transition
    );
    Ok(Submission {
        document: document.id.clone(),
        transition: transition.to_string(),
        payload,
    })
}

fn wrap_raw(key: &str, value: Value) -> Value {
    let mut wrapped = Map::new();
    wrapped.insert(key.to_string(), value);
    Value::Object(wrapped)
}

/// Keep only the parts of `value` the schema describes.
///
/// Missing or null values fall back to the schema `default`, the same way
/// composed leaves resolve them. Objects without declared properties are
/// passed through unchanged.
pub fn restrict_to_schema(schema: &SchemaNode, value: Option<&Value>) -> Value {
    let value = value
        .filter(|v| !v.is_null())
        .or(schema.default.as_ref());

    match (classify(schema), value) {
        (NodeClass::Object, Some(Value::Object(obj))) if schema.properties.is_empty() => {
            Value::Object(obj.clone())
        }
        (NodeClass::Object, None) | (NodeClass::Object, Some(Value::Object(_))) => {
            let empty = Map::new();
            let obj = match value {
                Some(Value::Object(obj)) => obj,
                _ => &empty,
            };
            let mut out = Map::new();
            for (name, prop) in &schema.properties {
                let child = restrict_to_schema(prop, obj.get(name));
                if obj.contains_key(name) || carries_data(&child) {
                    out.insert(name.clone(), child);
                }
            }
            Value::Object(out)
        }
        (NodeClass::Array, Some(Value::Array(items))) => match schema.items.as_deref() {
            Some(item_schema) => Value::Array(
                items
                    .iter()
                    .map(|item| restrict_to_schema(item_schema, Some(item)))
                    .collect(),
            ),
            None => Value::Array(items.clone()),
        },
        (_, Some(other)) => other.clone(),
        (_, None) => Value::Null,
    }
}

/// Absent keys only appear in the payload when a default filled them
fn carries_data(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::form_store::InMemoryFormStore;
    use serde_json::json;

    fn document(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_object_payload_restricted_to_schema() {
        let doc = document(json!({
            "id": "deploy",
            "transitions": ["approve"],
            "schema": {
                "type": "object",
                "properties": {
                    "comment": { "type": "string" },
                    "token": { "type": "string", "hidden": true },
                    "steps": {
                        "type": "array",
                        "items": { "type": "object", "properties": { "name": { "type": "string" } } }
                    }
                }
            }
        }));
        let store = InMemoryFormStore::from_values(json!({
            "comment": "ok",
            "token": "t-1",
            "stray": 1,
            "steps": [{ "name": "build", "extra": true }]
        }));

        let submission = build_submission(&doc, &store, "approve", &FormSettings::default()).unwrap();
        assert_eq!(submission.transition, "approve");
        assert_eq!(
            submission.payload,
            json!({ "comment": "ok", "token": "t-1", "steps": [{ "name": "build" }] })
        );
    }

    #[test]
    fn test_defaults_fill_missing_values() {
        let doc = document(json!({
            "id": "ticket",
            "schema": {
                "type": "object",
                "properties": {
                    "priority": { "type": "string", "default": "normal" },
                    "owner": { "type": "string", "default": "ops" },
                    "note": { "type": "string" },
                    "meta": {
                        "type": "object",
                        "properties": { "source": { "type": "string", "default": "web" } }
                    },
                    "extra": { "type": "object", "properties": { "x": { "type": "string" } } }
                }
            }
        }));
        let store = InMemoryFormStore::from_values(json!({ "owner": null, "note": "hi" }));

        let submission = build_submission(&doc, &store, "submit", &FormSettings::default()).unwrap();
        assert_eq!(
            submission.payload,
            json!({
                "priority": "normal",
                "owner": "ops",
                "note": "hi",
                "meta": { "source": "web" }
            })
        );
    }

    #[test]
    fn test_non_object_root_wrapped() {
        let doc = document(json!({
            "id": "tags",
            "schema": { "type": "array", "items": { "type": "string" } },
            "values": ["a"]
        }));
        let store = InMemoryFormStore::from_values(doc.values.clone());
        let submission = build_submission(&doc, &store, "submit", &FormSettings::default()).unwrap();
        assert_eq!(submission.payload, json!({ "raw": ["a"] }));

        let doc = document(json!({ "id": "count", "schema": { "type": "integer", "default": 3 } }));
        let store = InMemoryFormStore::new();
        let submission = build_submission(&doc, &store, "submit", &FormSettings::default()).unwrap();
        assert_eq!(submission.payload, json!({ "raw": 3 }));
    }

    #[test]
    fn test_raw_payload_wrapped() {
        let doc = document(json!({ "id": "notes", "contentKind": "markdown" }));
        let store = InMemoryFormStore::from_values(json!("# notes"));

        let submission = build_submission(&doc, &store, "save", &FormSettings::default()).unwrap();
        assert_eq!(submission.payload, json!({ "raw": "# notes" }));
    }

    #[test]
    fn test_unknown_transition_rejected() {
        let doc = document(json!({ "id": "deploy", "transitions": ["approve"] }));
        let store = InMemoryFormStore::new();
        let err = build_submission(&doc, &store, "archive", &FormSettings::default()).unwrap_err();
        assert!(matches!(err, FormError::UnknownTransition { .. }));
    }

    #[test]
    fn test_free_form_object_passes_through() {
        let schema = SchemaNode::from_value(&json!({ "type": "object" })).unwrap();
        let value = json!({ "anything": [1, 2] });
        assert_eq!(restrict_to_schema(&schema, Some(&value)), value);
        assert_eq!(restrict_to_schema(&schema, None), json!({}));
    }
}
