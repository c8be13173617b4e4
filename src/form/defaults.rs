//! Zero values for newly appended array elements

use serde_json::{json, Map, Value};

use crate::domain::{SchemaNode, SchemaType};

/// Structurally valid starting value for a schema node.
///
/// An explicit `default` is returned verbatim. Otherwise objects recurse over
/// their properties and every other type gets its zero value. Each call
/// builds a fresh value.
pub fn synthesize_default(schema: &SchemaNode) -> Value {
    if let Some(default) = &schema.default {
        return default.clone();
    }

    match schema.schema_type() {
        Some(SchemaType::Object) => {
            let mut obj = Map::new();
            for (name, prop) in &schema.properties {
                obj.insert(name.clone(), synthesize_default(prop));
            }
            Value::Object(obj)
        }
        Some(SchemaType::Array) => Value::Array(Vec::new()),
        Some(SchemaType::String) => Value::String(String::new()),
        Some(SchemaType::Number) | Some(SchemaType::Integer) => json!(0),
        Some(SchemaType::Boolean) => Value::Bool(false),
        Some(SchemaType::Null) | None => Value::String(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(value: Value) -> SchemaNode {
        SchemaNode::from_value(&value).unwrap()
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(synthesize_default(&schema(json!({ "type": "string" }))), json!(""));
        assert_eq!(synthesize_default(&schema(json!({ "type": "integer" }))), json!(0));
        assert_eq!(synthesize_default(&schema(json!({ "type": "number" }))), json!(0));
        assert_eq!(synthesize_default(&schema(json!({ "type": "boolean" }))), json!(false));
        assert_eq!(synthesize_default(&schema(json!({ "type": "array" }))), json!([]));
        assert_eq!(synthesize_default(&schema(json!({}))), json!(""));
        assert_eq!(synthesize_default(&schema(json!({ "type": "null" }))), json!(""));
    }

    #[test]
    fn test_object_respects_property_defaults() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "qty": { "type": "integer", "default": 1 },
                "note": { "type": "string" },
                "flags": { "type": "array", "items": { "type": "boolean" } },
                "meta": {
                    "type": "object",
                    "properties": { "urgent": { "type": "boolean" } }
                }
            }
        }));

        assert_eq!(
            synthesize_default(&node),
            json!({ "qty": 1, "note": "", "flags": [], "meta": { "urgent": false } })
        );
    }

    #[test]
    fn test_default_is_not_recursed() {
        let node = schema(json!({
            "type": "object",
            "default": { "custom": true },
            "properties": { "other": { "type": "string" } }
        }));
        assert_eq!(synthesize_default(&node), json!({ "custom": true }));
    }

    #[test]
    fn test_results_are_independent() {
        let node = schema(json!({
            "type": "object",
            "properties": { "tags": { "type": "array" } }
        }));

        let mut first = synthesize_default(&node);
        let second = synthesize_default(&node);
        assert_eq!(first, second);

        first["tags"].as_array_mut().unwrap().push(json!("x"));
        assert_eq!(second, json!({ "tags": [] }));
        assert_ne!(first, second);
    }
}
