//! Host-side evaluation of leaf rule sets

use serde::Serialize;
use std::collections::BTreeMap;

use super::composer::ControlNode;
use crate::adapters::form_store::FormStore;

/// Outcome of one validation pass
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Failing messages keyed by store key
    pub errors: BTreeMap<String, Vec<String>>,
    pub checked: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn invalid_paths(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }
}

/// Evaluate every enabled leaf against its displayed value and write the
/// results into the store's error slots, replacing earlier messages.
pub fn validate_tree(tree: &ControlNode, store: &mut dyn FormStore) -> ValidationReport {
    let mut report = ValidationReport::default();

    for leaf in tree.leaves() {
        let path = leaf.store_path();
        if leaf.disabled {
            store.set_errors(&path, Vec::new());
            continue;
        }

        let failures = leaf.rules.evaluate(Some(&leaf.value));
        report.checked += 1;
        if !failures.is_empty() {
            report.errors.insert(path.to_store_key(), failures.clone());
        }
        store.set_errors(&path, failures);
    }

    tracing::debug!(
        "Validated {} fields, {} invalid",
        report.checked,
        report.errors.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::form_store::InMemoryFormStore;
    use crate::domain::{FieldPath, SchemaNode};
    use crate::form::composer::{compose, ResolutionContext};
    use serde_json::json;

    #[test]
    fn test_validate_writes_errors() {
        let schema = SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "retries": { "type": "integer", "maximum": 3 },
                "locked": { "type": "string", "disabled": true }
            },
            "required": ["name", "locked"]
        }))
        .unwrap();
        let mut store = InMemoryFormStore::from_values(json!({ "retries": 5 }));
        store.set_errors(&FieldPath::parse("locked"), vec!["stale".to_string()]);

        let tree = compose(&schema, None, None, ResolutionContext::default(), false, &store);
        let report = validate_tree(&tree, &mut store);

        assert!(!report.is_valid());
        assert_eq!(report.checked, 2);
        assert_eq!(report.invalid_paths(), vec!["name", "retries"]);
        assert_eq!(store.errors(&FieldPath::parse("name")), vec!["This field is required"]);
        assert_eq!(store.errors(&FieldPath::parse("retries")), vec!["Must be at most 3"]);
        assert!(store.errors(&FieldPath::parse("locked")).is_empty());

        store.set(&FieldPath::parse("name"), json!("nightly"));
        store.set(&FieldPath::parse("retries"), json!(2));
        let tree = compose(&schema, None, None, ResolutionContext::default(), false, &store);
        assert!(validate_tree(&tree, &mut store).is_valid());
        assert!(!store.has_errors());
    }
}
