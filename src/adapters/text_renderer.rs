//! Plain-text rendering of control trees for the CLI
//!
//! One render function per widget kind, selected by an exhaustive match.

use serde_json::Value;
use std::fmt::Write;

use crate::form::{ArrayControl, ControlNode, DocumentView, LeafControl, ObjectControl, WidgetKind};

const INDENT: &str = "  ";
const SLIDER_WIDTH: usize = 20;

pub fn render_document(view: &DocumentView) -> String {
    match view {
        DocumentView::Form { tree } => render_tree(tree),
        DocumentView::Raw { kind, text } => {
            let mut out = format!("--- {:?} ---\n", kind).to_lowercase();
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
            out
        }
    }
}

pub fn render_tree(tree: &ControlNode) -> String {
    let mut out = String::new();
    render_node(tree, 0, &mut out);
    out
}

fn render_node(node: &ControlNode, depth: usize, out: &mut String) {
    match node {
        ControlNode::Object(obj) => render_object(obj, depth, out),
        ControlNode::Array(arr) => render_array(arr, depth, out),
        ControlNode::Leaf(leaf) => render_leaf_line(leaf, depth, out),
    }
}

fn render_object(obj: &ObjectControl, depth: usize, out: &mut String) {
    let child_depth = if obj.title.is_empty() {
        depth
    } else {
        let _ = writeln!(out, "{}{}{}", INDENT.repeat(depth), obj.title, required_mark(obj.required));
        depth + 1
    };
    for (_, child) in &obj.children {
        render_node(child, child_depth, out);
    }
}

fn render_array(arr: &ArrayControl, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    let affordance = if arr.mutable { " [+ add]" } else { "" };
    let _ = writeln!(out, "{}{} ({} items){}", pad, arr.title, arr.len(), affordance);

    if arr.collapsed {
        let _ = writeln!(out, "{}{}…", pad, INDENT);
        return;
    }
    for (idx, item) in arr.items.iter().enumerate() {
        let remove = if arr.mutable { " [- remove]" } else { "" };
        let _ = writeln!(out, "{}{}#{}{}", pad, INDENT, idx + 1, remove);
        match item {
            // Item objects carry their own "#n" title; skip the duplicate header
            ControlNode::Object(obj) => {
                for (_, child) in &obj.children {
                    render_node(child, depth + 2, out);
                }
            }
            other => render_node(other, depth + 2, out),
        }
    }
}

fn render_leaf_line(leaf: &LeafControl, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    let state = if leaf.editable() { "" } else { " (read-only)" };
    let body = render_leaf(leaf);

    if body.contains('\n') {
        let _ = writeln!(out, "{}{}{}{}:", pad, leaf.title, required_mark(leaf.required), state);
        for line in body.lines() {
            let _ = writeln!(out, "{}{}| {}", pad, INDENT, line);
        }
    } else {
        let _ = writeln!(out, "{}{}{}: {}{}", pad, leaf.title, required_mark(leaf.required), body, state);
    }

    for err in &leaf.errors {
        let _ = writeln!(out, "{}{}! {}", pad, INDENT, err);
    }
}

/// Widget body for one leaf
pub fn render_leaf(leaf: &LeafControl) -> String {
    match leaf.widget {
        WidgetKind::Checkbox => render_checkbox(leaf),
        WidgetKind::Radio => render_radio(leaf),
        WidgetKind::Switch => render_switch(leaf),
        WidgetKind::Select => render_select(leaf),
        WidgetKind::Slider => render_slider(leaf),
        WidgetKind::CodeView => render_code_view(leaf),
        WidgetKind::Text => render_text(leaf),
    }
}

fn render_checkbox(leaf: &LeafControl) -> String {
    if leaf.value.as_bool().unwrap_or(false) {
        "[x]".to_string()
    } else {
        "[ ]".to_string()
    }
}

fn render_switch(leaf: &LeafControl) -> String {
    if leaf.value.as_bool().unwrap_or(false) {
        "(on)".to_string()
    } else {
        "(off)".to_string()
    }
}

fn render_radio(leaf: &LeafControl) -> String {
    leaf.options
        .iter()
        .map(|opt| {
            let mark = if opt.value == leaf.value { "(o)" } else { "( )" };
            format!("{} {}", mark, opt.display_label())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_select(leaf: &LeafControl) -> String {
    let selected = leaf
        .options
        .iter()
        .find(|opt| opt.value == leaf.value)
        .map(|opt| opt.display_label())
        .unwrap_or_else(|| "-- Select --".to_string());
    let choices: Vec<String> = leaf.options.iter().map(|o| o.display_label()).collect();
    format!("<{}> {{{}}}", selected, choices.join("|"))
}

fn render_slider(leaf: &LeafControl) -> String {
    let min = leaf.schema.minimum.unwrap_or(0.0);
    let max = leaf.schema.maximum.unwrap_or(min);
    let value = leaf.value.as_f64().unwrap_or(min);
    let span = max - min;
    let ratio = if span > 0.0 {
        ((value - min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let knob = (ratio * SLIDER_WIDTH as f64).round() as usize;

    let mut track = String::with_capacity(SLIDER_WIDTH + 1);
    for i in 0..=SLIDER_WIDTH {
        track.push(if i == knob { 'o' } else { '-' });
    }
    format!("{} |{}| {} ({})", min, track, max, value)
}

fn render_code_view(leaf: &LeafControl) -> String {
    let code = match &leaf.value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    format!("```\n{}\n```", code)
}

fn render_text(leaf: &LeafControl) -> String {
    match &leaf.value {
        Value::String(s) if leaf.multiline => s.clone(),
        Value::String(s) => format!("\"{}\"", s),
        Value::Null => "\"\"".to_string(),
        other => other.to_string(),
    }
}

fn required_mark(required: bool) -> &'static str {
    if required {
        "*"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::form_store::InMemoryFormStore;
    use crate::domain::{SchemaNode, UiHintNode};
    use crate::form::{compose, ResolutionContext};
    use serde_json::json;

    fn render(schema: Value, ui: Option<Value>, values: Value, view_only: bool) -> String {
        let schema = SchemaNode::from_value(&schema).unwrap();
        let ui: Option<UiHintNode> = ui.map(|u| serde_json::from_value(u).unwrap());
        let store = InMemoryFormStore::from_values(values);
        let tree = compose(
            &schema,
            ui.as_ref(),
            None,
            ResolutionContext::new(false, view_only),
            false,
            &store,
        );
        render_tree(&tree)
    }

    #[test]
    fn test_render_widgets() {
        let out = render(
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "enabled": { "type": "boolean" },
                    "level": { "type": "string", "enum": ["low", "high"] },
                    "ratio": { "type": "number", "minimum": 0, "maximum": 10 }
                },
                "required": ["name"]
            }),
            Some(json!({ "properties": { "ratio": { "widget": "slider" } } })),
            json!({ "name": "nightly", "enabled": true, "level": "high", "ratio": 5 }),
            false,
        );

        assert!(out.contains("name*: \"nightly\""));
        assert!(out.contains("enabled: [x]"));
        assert!(out.contains("level: <high> {low|high}"));
        assert!(out.contains("ratio: 0 |----------o----------| 10 (5)"));
    }

    #[test]
    fn test_render_array_affordances() {
        let schema = json!({
            "type": "object",
            "properties": {
                "tags": { "type": "array", "items": { "type": "string" } }
            }
        });
        let editable = render(schema.clone(), None, json!({ "tags": ["a"] }), false);
        assert!(editable.contains("tags (1 items) [+ add]"));
        assert!(editable.contains("#1 [- remove]"));

        let view_only = render(schema, None, json!({ "tags": ["a"] }), true);
        assert!(!view_only.contains("[+ add]"));
        assert!(view_only.contains("\"a\" (read-only)"));
    }

    #[test]
    fn test_render_multiline_text() {
        let out = render(
            json!({ "type": "object", "properties": { "notes": { "type": "string", "maxLength": 500 } } }),
            None,
            json!({ "notes": "line one\nline two" }),
            false,
        );
        assert!(out.contains("notes:\n"));
        assert!(out.contains("| line one"));
        assert!(out.contains("| line two"));
    }
}
