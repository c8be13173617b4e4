//! Presentation overlay mirroring the schema tree

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Optional UI overrides for the schema node at the same path.
///
/// Every field is optional; a missing hint means "use the schema".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiHintNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    #[serde(default, alias = "readOnly", skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Explicit property order for objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,
    /// Initial collapse state for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, UiHintNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<UiHintNode>>,
}

impl UiHintNode {
    pub fn property(&self, name: &str) -> Option<&UiHintNode> {
        self.properties.get(name)
    }

    pub fn item(&self) -> Option<&UiHintNode> {
        self.items.as_deref()
    }

    /// `description`, falling back to `help`
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().or(self.help.as_deref())
    }
}
