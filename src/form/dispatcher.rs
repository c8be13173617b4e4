//! Type classification and widget selection

use serde::{Deserialize, Serialize};

use crate::domain::{SchemaNode, SchemaType, UiHintNode};

/// Structural class of a schema node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeClass {
    Object,
    Array,
    Leaf,
}

/// Concrete input widget for a leaf
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Checkbox,
    Radio,
    Switch,
    Select,
    Slider,
    CodeView,
    Text,
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Radio => "radio",
            WidgetKind::Switch => "switch",
            WidgetKind::Select => "select",
            WidgetKind::Slider => "slider",
            WidgetKind::CodeView => "code-view",
            WidgetKind::Text => "text",
        }
    }
}

/// Classify a node by its declared type (a `null` member is ignored).
///
/// Absent or unknown types are leaves.
pub fn classify(schema: &SchemaNode) -> NodeClass {
    match schema.schema_type() {
        Some(SchemaType::Object) => NodeClass::Object,
        Some(SchemaType::Array) => NodeClass::Array,
        _ => NodeClass::Leaf,
    }
}

/// Widget hint in effect: the UI overlay wins over the schema
pub fn widget_hint<'a>(schema: &'a SchemaNode, ui: Option<&'a UiHintNode>) -> Option<&'a str> {
    ui.and_then(|u| u.widget.as_deref())
        .or(schema.widget.as_deref())
}

/// Pick the widget for a leaf. First matching rule wins.
pub fn resolve_widget(schema: &SchemaNode, ui: Option<&UiHintNode>) -> WidgetKind {
    let hint = widget_hint(schema, ui);

    match hint {
        Some("code-view") => return WidgetKind::CodeView,
        Some("switch") => return WidgetKind::Switch,
        Some("radio") => return WidgetKind::Radio,
        Some("select") => return WidgetKind::Select,
        _ => {}
    }

    if schema.is_numeric()
        && schema.minimum.is_some()
        && schema.maximum.is_some()
        && hint == Some("slider")
    {
        return WidgetKind::Slider;
    }

    if schema.schema_type() == Some(SchemaType::Boolean) {
        return WidgetKind::Checkbox;
    }

    if schema.has_choices() {
        return WidgetKind::Select;
    }

    WidgetKind::Text
}

/// Whether a text leaf renders as a multi-line editor
pub fn is_multiline(schema: &SchemaNode, ui: Option<&UiHintNode>, threshold: u64) -> bool {
    matches!(widget_hint(schema, ui), Some("textarea") | Some("textarea-expand"))
        || schema.max_length.is_some_and(|max| max > threshold)
}
