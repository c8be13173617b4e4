//! Document envelope handed to the form engine by the host

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use super::schema::SchemaNode;
use super::ui_hints::UiHintNode;
use crate::error::{FormError, Result};

/// Declared content kind of a document payload
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Walk the schema and render a form
    #[default]
    Object,
    Markdown,
    Json,
    Yaml,
}

impl ContentKind {
    /// Whether the payload is shown through a raw content viewer
    pub fn is_raw(&self) -> bool {
        !matches!(self, ContentKind::Object)
    }
}

/// A payload plus everything needed to render it as a form
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_kind: Option<ContentKind>,
    #[serde(default)]
    pub schema: SchemaNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiHintNode>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub view_only: bool,
    #[serde(default)]
    pub values: Value,
    /// Named transitions the document may be submitted with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<String>,
}

impl Document {
    pub fn content_kind(&self) -> ContentKind {
        self.content_kind.unwrap_or_default()
    }

    pub fn has_transition(&self, name: &str) -> bool {
        self.transitions.is_empty() || self.transitions.iter().any(|t| t == name)
    }

    /// Load a document from a JSON, YAML or TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &ext).map_err(|reason| FormError::DocumentParse {
            path: path.display().to_string(),
            reason,
        })
    }

    /// Parse document text in the given format (`json`, `yaml`/`yml`, `toml`)
    pub fn parse(content: &str, format: &str) -> std::result::Result<Self, String> {
        match format {
            "json" => serde_json::from_str(content).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            "toml" => toml::from_str(content).map_err(|e| e.to_string()),
            other => Err(format!("unsupported format '{}'", other)),
        }
    }
}

/// Load a standalone values file (JSON or YAML)
pub fn load_values(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        other => Err(FormError::UnsupportedFormat(other.unwrap_or("").to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_document() {
        let yaml = r#"
id: approval
contentKind: object
viewOnly: true
transitions: [approve, reject]
schema:
  type: object
  properties:
    comment:
      type: string
values:
  comment: looks good
"#;
        let doc = Document::parse(yaml, "yaml").unwrap();
        assert_eq!(doc.id, "approval");
        assert!(doc.view_only);
        assert_eq!(doc.content_kind(), ContentKind::Object);
        assert!(doc.has_transition("approve"));
        assert!(!doc.has_transition("archive"));
        assert_eq!(doc.values["comment"], "looks good");
    }

    #[test]
    fn test_missing_content_kind_is_object() {
        let doc = Document::parse(r#"{ "schema": { "type": "string" } }"#, "json").unwrap();
        assert_eq!(doc.content_kind(), ContentKind::Object);
        assert!(doc.has_transition("anything"));
    }

    #[test]
    fn test_unsupported_format() {
        assert!(Document::parse("", "ini").is_err());
    }
}
