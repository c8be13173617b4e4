//! Schema tree consumed from the backend

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Primitive type names a schema node may declare
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl SchemaType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(SchemaType::String),
            "number" => Some(SchemaType::Number),
            "integer" => Some(SchemaType::Integer),
            "boolean" => Some(SchemaType::Boolean),
            "object" => Some(SchemaType::Object),
            "array" => Some(SchemaType::Array),
            "null" => Some(SchemaType::Null),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::Null => "null",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SchemaType::Number | SchemaType::Integer)
    }
}

/// Raw `type` declaration: a single name or a list where `"null"` marks optional.
///
/// Anything else is kept as `Malformed` so one bad node degrades to a text
/// leaf instead of failing the whole document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    Single(String),
    Multiple(Vec<String>),
    Malformed(Value),
}

impl TypeDecl {
    /// The declared type with any `null` member stripped.
    ///
    /// Returns `None` for unknown names so callers degrade to a text leaf.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeDecl::Single(name) => SchemaType::from_name(name),
            TypeDecl::Multiple(names) => {
                let mut non_null = names.iter().filter(|n| n.as_str() != "null");
                match non_null.next() {
                    Some(name) => SchemaType::from_name(name),
                    None if !names.is_empty() => Some(SchemaType::Null),
                    None => None,
                }
            }
            TypeDecl::Malformed(_) => None,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeDecl::Single(name) => name == "null",
            TypeDecl::Multiple(names) => names.iter().any(|n| n == "null"),
            TypeDecl::Malformed(_) => false,
        }
    }
}

/// Labelled choice for select/radio widgets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: Value,
}

impl EnumOption {
    pub fn from_value(value: &Value) -> Self {
        Self {
            label: None,
            value: value.clone(),
        }
    }

    /// Label for display, falling back to the value itself
    pub fn display_label(&self) -> String {
        match (&self.label, &self.value) {
            (Some(label), _) => label.clone(),
            (None, Value::String(s)) => s.clone(),
            (None, other) => other.to_string(),
        }
    }
}

/// Keeps an explicit `null` distinguishable from an absent key
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// One value position in a document schema.
///
/// Unknown keys are ignored. Only one of `properties`/`items` is meaningful
/// for the resolved type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_decl: Option<TypeDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
    #[serde(default, alias = "readOnly", skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_options: Vec<EnumOption>,
    #[serde(
        rename = "const",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub const_value: Option<Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// Build a node from a JSON value, ignoring unknown keys.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    /// Declared type with `null` stripped; `None` when absent or unknown
    pub fn schema_type(&self) -> Option<SchemaType> {
        self.type_decl.as_ref().and_then(TypeDecl::primary)
    }

    pub fn is_nullable(&self) -> bool {
        self.type_decl.as_ref().is_some_and(TypeDecl::is_nullable)
    }

    pub fn is_numeric(&self) -> bool {
        self.schema_type().is_some_and(|t| t.is_numeric())
    }

    /// `description`, falling back to `help`
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().or(self.help.as_deref())
    }

    /// Choices from `enumOptions`, else from `enum`
    pub fn options(&self) -> Vec<EnumOption> {
        if !self.enum_options.is_empty() {
            return self.enum_options.clone();
        }
        self.enum_values.iter().map(EnumOption::from_value).collect()
    }

    pub fn has_choices(&self) -> bool {
        !self.enum_options.is_empty() || !self.enum_values.is_empty()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Boolean field whose only acceptable value is `true`
    pub fn must_be_true(&self) -> bool {
        if self.schema_type() != Some(SchemaType::Boolean) {
            return false;
        }
        let const_true = self.const_value.as_ref() == Some(&Value::Bool(true));
        let enum_true = self.enum_values.len() == 1 && self.enum_values[0] == Value::Bool(true);
        const_true || enum_true
    }
}
