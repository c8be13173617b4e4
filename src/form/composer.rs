//! Control tree composition
//!
//! Walks a schema tree together with its UI-hint overlay and the current
//! store snapshot, producing a nested [`ControlNode`] tree. Composition is
//! a pure function of its inputs: it never writes to the store and never
//! fails. Malformed nodes degrade to text leaves.

use serde::Serialize;
use serde_json::Value;

use super::array_ops;
use super::dispatcher::{classify, is_multiline, resolve_widget, NodeClass, WidgetKind};
use super::rules::{build_rules, RuleSet};
use crate::adapters::form_store::FormStore;
use crate::config::FormSettings;
use crate::domain::{merge_path, EnumOption, FieldPath, SchemaNode, Segment, UiHintNode};
use crate::error::Result;

// ============================================================================
// Resolution Context
// ============================================================================

/// Ambient flags inherited from ancestors, passed by value at each level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    pub disabled: bool,
    pub readonly: bool,
    pub view_only: bool,
    pub depth: usize,
}

impl ResolutionContext {
    pub fn new(disabled: bool, view_only: bool) -> Self {
        Self {
            disabled,
            view_only,
            ..Default::default()
        }
    }

    /// Context for the children of a container node
    fn descend(self, schema: &SchemaNode, ui: Option<&UiHintNode>) -> Self {
        Self {
            disabled: self.disabled
                || schema.disabled.unwrap_or(false)
                || ui.and_then(|u| u.disabled).unwrap_or(false),
            readonly: self.readonly
                || schema.readonly.unwrap_or(false)
                || ui.and_then(|u| u.readonly).unwrap_or(false),
            view_only: self.view_only,
            depth: self.depth + 1,
        }
    }
}

// ============================================================================
// Control Tree
// ============================================================================

/// One node of the composed control tree
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ControlNode {
    Object(ObjectControl),
    Array(ArrayControl),
    Leaf(LeafControl),
}

impl ControlNode {
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            ControlNode::Object(o) => o.path.as_ref(),
            ControlNode::Array(a) => a.path.as_ref(),
            ControlNode::Leaf(l) => l.path.as_ref(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectControl> {
        match self {
            ControlNode::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayControl> {
        match self {
            ControlNode::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafControl> {
        match self {
            ControlNode::Leaf(l) => Some(l),
            _ => None,
        }
    }

    /// Every leaf in render order
    pub fn leaves(&self) -> Vec<&LeafControl> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LeafControl>) {
        match self {
            ControlNode::Object(o) => {
                for (_, child) in &o.children {
                    child.collect_leaves(out);
                }
            }
            ControlNode::Array(a) => {
                for item in &a.items {
                    item.collect_leaves(out);
                }
            }
            ControlNode::Leaf(l) => out.push(l),
        }
    }

    /// Find the node at a path
    pub fn find(&self, path: &FieldPath) -> Option<&ControlNode> {
        if self.path() == Some(path) {
            return Some(self);
        }
        match self {
            ControlNode::Object(o) => o.children.iter().find_map(|(_, c)| c.find(path)),
            ControlNode::Array(a) => a.items.iter().find_map(|c| c.find(path)),
            ControlNode::Leaf(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectControl {
    pub path: Option<FieldPath>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    /// Rendered children in display order
    pub children: Vec<(String, ControlNode)>,
    /// Hidden children: not rendered, still live in the store
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hidden_paths: Vec<FieldPath>,
}

impl ObjectControl {
    pub fn child(&self, name: &str) -> Option<&ControlNode> {
        self.children.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|(n, _)| n.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrayControl {
    pub path: Option<FieldPath>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub item_schema: SchemaNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_ui: Option<UiHintNode>,
    pub items: Vec<ControlNode>,
    /// Elements whose item schema is hidden: not rendered, still live in the store
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hidden_paths: Vec<FieldPath>,
    pub collapsed: bool,
    /// False when view-only, disabled or read-only: no append/remove
    pub mutable: bool,
}

impl ArrayControl {
    fn store_path(&self) -> FieldPath {
        self.path.clone().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push a synthesized element; re-compose afterwards to see it
    pub fn append(&self, store: &mut dyn FormStore) -> FieldPath {
        array_ops::append(store, &self.store_path(), &self.item_schema)
    }

    /// Remove an element, shifting later ones down
    pub fn remove(&self, store: &mut dyn FormStore, index: usize) -> Result<Value> {
        array_ops::remove(store, &self.store_path(), index)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeafControl {
    pub widget: WidgetKind,
    pub path: Option<FieldPath>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: Value,
    pub rules: RuleSet,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub view_only: bool,
    /// Text widgets only: multi-line editor
    pub multiline: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<EnumOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip)]
    pub schema: SchemaNode,
}

impl LeafControl {
    /// Whether the user may change this value
    pub fn editable(&self) -> bool {
        !self.view_only && !self.disabled && !self.readonly
    }

    pub fn store_path(&self) -> FieldPath {
        self.path.clone().unwrap_or_default()
    }
}

// ============================================================================
// Composer
// ============================================================================

/// Compose with default settings
pub fn compose(
    schema: &SchemaNode,
    ui: Option<&UiHintNode>,
    path: Option<&FieldPath>,
    ctx: ResolutionContext,
    required: bool,
    store: &dyn FormStore,
) -> ControlNode {
    Composer::new(store).compose(schema, ui, path, ctx, required)
}

/// Builds control trees against one store snapshot
pub struct Composer<'a> {
    store: &'a dyn FormStore,
    settings: FormSettings,
}

impl<'a> Composer<'a> {
    pub fn new(store: &'a dyn FormStore) -> Self {
        Self::with_settings(store, FormSettings::default())
    }

    pub fn with_settings(store: &'a dyn FormStore, settings: FormSettings) -> Self {
        Self { store, settings }
    }

    pub fn compose(
        &self,
        schema: &SchemaNode,
        ui: Option<&UiHintNode>,
        path: Option<&FieldPath>,
        ctx: ResolutionContext,
        required: bool,
    ) -> ControlNode {
        if ctx.depth > self.settings.max_depth {
            tracing::warn!(
                "Schema nesting deeper than {} at '{}', rendering as text",
                self.settings.max_depth,
                display_path(path)
            );
            return ControlNode::Leaf(self.depth_limited_leaf(schema, ui, path, ctx));
        }

        if path.is_none() && schema.hidden {
            tracing::debug!("Root schema is hidden, composing an empty form");
            return ControlNode::Object(ObjectControl {
                path: None,
                title: resolve_title(schema, ui, None),
                description: resolve_description(schema, ui),
                required: false,
                children: Vec::new(),
                hidden_paths: Vec::new(),
            });
        }

        match classify(schema) {
            NodeClass::Object => ControlNode::Object(self.compose_object(schema, ui, path, ctx, required)),
            NodeClass::Array => ControlNode::Array(self.compose_array(schema, ui, path, ctx)),
            NodeClass::Leaf => ControlNode::Leaf(self.compose_leaf(schema, ui, path, ctx, required)),
        }
    }

    fn compose_object(
        &self,
        schema: &SchemaNode,
        ui: Option<&UiHintNode>,
        path: Option<&FieldPath>,
        ctx: ResolutionContext,
        required: bool,
    ) -> ObjectControl {
        let child_ctx = ctx.descend(schema, ui);
        let mut children = Vec::new();
        let mut hidden_paths = Vec::new();

        for name in property_order(schema, ui) {
            let Some(prop) = schema.properties.get(name) else {
                continue;
            };
            let child_path = merge_path(path, Some(Segment::Property(name.to_string())));

            if prop.hidden {
                hidden_paths.extend(child_path);
                continue;
            }

            let child_ui = ui.and_then(|u| u.property(name));
            let child = self.compose(
                prop,
                child_ui,
                child_path.as_ref(),
                child_ctx,
                schema.is_required(name),
            );
            children.push((name.to_string(), child));
        }

        ObjectControl {
            path: path.cloned(),
            title: resolve_title(schema, ui, path),
            description: resolve_description(schema, ui),
            required,
            children,
            hidden_paths,
        }
    }

    fn compose_array(
        &self,
        schema: &SchemaNode,
        ui: Option<&UiHintNode>,
        path: Option<&FieldPath>,
        ctx: ResolutionContext,
    ) -> ArrayControl {
        let child_ctx = ctx.descend(schema, ui);
        let item_schema = schema.items.as_deref().cloned().unwrap_or_default();
        let item_ui = ui.and_then(UiHintNode::item);
        let store_path = path.cloned().unwrap_or_default();
        let count = self.store.array_len(&store_path);

        let mut items = Vec::new();
        let mut hidden_paths = Vec::new();
        for idx in 0..count {
            let item_path = merge_path(path, Some(Segment::Index(idx)));
            if item_schema.hidden {
                hidden_paths.extend(item_path);
                continue;
            }
            // Array membership is never "required"
            items.push(self.compose(&item_schema, item_ui, item_path.as_ref(), child_ctx, false));
        }

        // Hidden elements cannot be added or removed
        let mutable = !(item_schema.hidden
            || child_ctx.view_only
            || child_ctx.disabled
            || child_ctx.readonly);

        ArrayControl {
            path: path.cloned(),
            title: resolve_title(schema, ui, path),
            description: resolve_description(schema, ui),
            item_ui: item_ui.cloned(),
            item_schema,
            items,
            hidden_paths,
            collapsed: ui.and_then(|u| u.collapsed).unwrap_or(false),
            mutable,
        }
    }

    fn compose_leaf(
        &self,
        schema: &SchemaNode,
        ui: Option<&UiHintNode>,
        path: Option<&FieldPath>,
        ctx: ResolutionContext,
        required: bool,
    ) -> LeafControl {
        if schema.type_decl.is_some() && schema.schema_type().is_none() {
            tracing::warn!(
                "Unknown schema type {:?} at '{}', rendering as text",
                schema.type_decl,
                display_path(path)
            );
        }

        let widget = resolve_widget(schema, ui);
        let store_path = path.cloned().unwrap_or_default();

        // UI override, then schema flag, then ambient
        let disabled = ui
            .and_then(|u| u.disabled)
            .or(schema.disabled)
            .unwrap_or(ctx.disabled);
        let readonly = ui
            .and_then(|u| u.readonly)
            .or(schema.readonly)
            .unwrap_or(ctx.readonly);

        let value = self
            .store
            .get(&store_path)
            .filter(|v| !v.is_null())
            .or_else(|| schema.default.clone())
            .unwrap_or(Value::Null);

        LeafControl {
            widget,
            path: path.cloned(),
            title: resolve_title(schema, ui, path),
            description: resolve_description(schema, ui),
            value,
            rules: build_rules(schema, required),
            required,
            disabled,
            readonly,
            view_only: ctx.view_only,
            multiline: widget == WidgetKind::Text
                && is_multiline(schema, ui, self.settings.multiline_threshold),
            options: schema.options(),
            errors: self.store.errors(&store_path),
            schema: schema.clone(),
        }
    }

    fn depth_limited_leaf(
        &self,
        schema: &SchemaNode,
        ui: Option<&UiHintNode>,
        path: Option<&FieldPath>,
        ctx: ResolutionContext,
    ) -> LeafControl {
        let store_path = path.cloned().unwrap_or_default();
        LeafControl {
            widget: WidgetKind::Text,
            path: path.cloned(),
            title: resolve_title(schema, ui, path),
            description: resolve_description(schema, ui),
            value: self.store.get(&store_path).unwrap_or(Value::Null),
            rules: RuleSet::default(),
            required: false,
            disabled: true,
            readonly: true,
            view_only: ctx.view_only,
            multiline: true,
            options: Vec::new(),
            errors: self.store.errors(&store_path),
            schema: SchemaNode::default(),
        }
    }
}

/// Display order for object properties.
///
/// Names from the UI `order` that exist in the schema come first, then the
/// remaining schema properties in declaration order. Unknown names in the
/// UI order are dropped.
pub fn property_order<'s>(schema: &'s SchemaNode, ui: Option<&UiHintNode>) -> Vec<&'s str> {
    let mut ordered: Vec<&'s str> = Vec::with_capacity(schema.properties.len());

    if let Some(ui) = ui {
        for name in &ui.order {
            if let Some((key, _)) = schema.properties.get_key_value(name.as_str()) {
                if !ordered.contains(&key.as_str()) {
                    ordered.push(key.as_str());
                }
            }
        }
    }

    for key in schema.properties.keys() {
        if !ordered.contains(&key.as_str()) {
            ordered.push(key.as_str());
        }
    }

    ordered
}

fn resolve_title(schema: &SchemaNode, ui: Option<&UiHintNode>, path: Option<&FieldPath>) -> String {
    if let Some(title) = ui.and_then(|u| u.title.clone()).or_else(|| schema.title.clone()) {
        return title;
    }
    match path.and_then(FieldPath::last) {
        Some(Segment::Property(name)) => name.clone(),
        Some(Segment::Index(idx)) => format!("#{}", idx + 1),
        None => String::new(),
    }
}

fn resolve_description(schema: &SchemaNode, ui: Option<&UiHintNode>) -> Option<String> {
    ui.and_then(UiHintNode::description_text)
        .or(schema.description_text())
        .map(String::from)
}

fn display_path(path: Option<&FieldPath>) -> String {
    path.map(FieldPath::to_store_key)
        .unwrap_or_else(|| "<root>".to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::form_store::InMemoryFormStore;
    use serde_json::json;

    fn schema(value: Value) -> SchemaNode {
        SchemaNode::from_value(&value).unwrap()
    }

    fn ui(value: Value) -> UiHintNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_required_text_leaf() {
        let node = schema(json!({
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        }));
        let store = InMemoryFormStore::new();
        let tree = compose(&node, None, None, ResolutionContext::default(), false, &store);

        let root = tree.as_object().unwrap();
        assert_eq!(root.path, None);
        assert_eq!(root.child_names(), vec!["name"]);

        let leaf = root.child("name").unwrap().as_leaf().unwrap();
        assert_eq!(leaf.widget, WidgetKind::Text);
        assert_eq!(leaf.path, Some(FieldPath::parse("name")));
        assert!(leaf.rules.is_required());
        assert!(leaf.required);
    }

    #[test]
    fn test_ui_order_prefix_then_schema_order() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "string" },
                "c": { "type": "string" }
            }
        }));
        let hints = ui(json!({ "order": ["c", "ghost", "a"] }));
        let store = InMemoryFormStore::new();
        let tree = compose(&node, Some(&hints), None, ResolutionContext::default(), false, &store);

        assert_eq!(tree.as_object().unwrap().child_names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_values_come_from_store_then_default() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "stored": { "type": "string", "default": "schema" },
                "defaulted": { "type": "string", "default": "schema" },
                "empty": { "type": "string" }
            }
        }));
        let store = InMemoryFormStore::from_values(json!({ "stored": "user", "defaulted": null }));
        let tree = compose(&node, None, None, ResolutionContext::default(), false, &store);
        let root = tree.as_object().unwrap();

        assert_eq!(root.child("stored").unwrap().as_leaf().unwrap().value, json!("user"));
        assert_eq!(root.child("defaulted").unwrap().as_leaf().unwrap().value, json!("schema"));
        assert_eq!(root.child("empty").unwrap().as_leaf().unwrap().value, Value::Null);
    }

    #[test]
    fn test_hidden_field_excluded_but_value_kept() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "visible": { "type": "string" },
                "token": { "type": "string", "hidden": true }
            }
        }));
        let store = InMemoryFormStore::from_values(json!({ "token": "abc" }));
        let tree = compose(&node, None, None, ResolutionContext::default(), false, &store);
        let root = tree.as_object().unwrap();

        assert!(root.child("token").is_none());
        assert_eq!(root.hidden_paths, vec![FieldPath::parse("token")]);
        assert_eq!(store.get(&FieldPath::parse("token")), Some(json!("abc")));
    }

    #[test]
    fn test_hidden_items_and_root_not_rendered() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "secrets": { "type": "array", "items": { "type": "string", "hidden": true } }
            }
        }));
        let store = InMemoryFormStore::from_values(json!({ "secrets": ["a", "b"] }));
        let tree = compose(&node, None, None, ResolutionContext::default(), false, &store);
        let secrets = tree.as_object().unwrap().child("secrets").unwrap().as_array().unwrap();

        assert!(secrets.is_empty());
        assert!(!secrets.mutable);
        assert_eq!(
            secrets.hidden_paths,
            vec![FieldPath::parse("secrets.0"), FieldPath::parse("secrets.1")]
        );

        let hidden_root = schema(json!({ "type": "string", "hidden": true }));
        let store = InMemoryFormStore::from_values(json!("kept"));
        let tree = compose(&hidden_root, None, None, ResolutionContext::default(), false, &store);
        assert!(tree.as_object().unwrap().children.is_empty());
        assert_eq!(store.get(&FieldPath::root()), Some(json!("kept")));
    }

    #[test]
    fn test_malformed_type_degrades_one_node() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "ok": { "type": "string" },
                "odd": { "type": 5 },
                "count": { "type": "integer" }
            }
        }));
        let store = InMemoryFormStore::from_values(json!({ "ok": "yes", "odd": "whatever" }));
        let tree = compose(&node, None, None, ResolutionContext::default(), false, &store);
        let root = tree.as_object().unwrap();

        assert_eq!(root.child_names(), vec!["ok", "odd", "count"]);
        let odd = root.child("odd").unwrap().as_leaf().unwrap();
        assert_eq!(odd.widget, WidgetKind::Text);
        assert_eq!(odd.value, json!("whatever"));
        assert_eq!(root.child("ok").unwrap().as_leaf().unwrap().value, json!("yes"));
    }

    #[test]
    fn test_view_only_keeps_fields_but_blocks_edits() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "note": { "type": "string" },
                "lines": { "type": "array", "items": { "type": "string" } }
            }
        }));
        let store = InMemoryFormStore::from_values(json!({ "lines": ["x"] }));
        let tree = compose(&node, None, None, ResolutionContext::new(false, true), false, &store);
        let root = tree.as_object().unwrap();

        let note = root.child("note").unwrap().as_leaf().unwrap();
        assert!(note.view_only);
        assert!(!note.editable());

        let lines = root.child("lines").unwrap().as_array().unwrap();
        assert!(!lines.mutable);
        assert_eq!(lines.len(), 1);
        assert!(!lines.items[0].as_leaf().unwrap().editable());
    }

    #[test]
    fn test_disabled_precedence() {
        let node = schema(json!({
            "type": "object",
            "disabled": true,
            "properties": {
                "inherits": { "type": "string" },
                "schema_enabled": { "type": "string", "disabled": false },
                "ui_enabled": { "type": "string", "disabled": true }
            }
        }));
        let hints = ui(json!({ "properties": { "ui_enabled": { "disabled": false } } }));
        let store = InMemoryFormStore::new();
        let tree = compose(&node, Some(&hints), None, ResolutionContext::default(), false, &store);
        let root = tree.as_object().unwrap();

        assert!(root.child("inherits").unwrap().as_leaf().unwrap().disabled);
        assert!(!root.child("schema_enabled").unwrap().as_leaf().unwrap().disabled);
        assert!(!root.child("ui_enabled").unwrap().as_leaf().unwrap().disabled);
    }

    #[test]
    fn test_array_items_and_paths() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "qty": { "type": "integer" } },
                        "required": ["qty"]
                    }
                }
            }
        }));
        let hints = ui(json!({ "properties": { "items": { "collapsed": true } } }));
        let store = InMemoryFormStore::from_values(json!({ "items": [{ "qty": 1 }, { "qty": 2 }] }));
        let tree = compose(&node, Some(&hints), None, ResolutionContext::default(), false, &store);

        let items = tree.as_object().unwrap().child("items").unwrap().as_array().unwrap();
        assert!(items.collapsed);
        assert!(items.mutable);
        assert_eq!(items.len(), 2);

        let second = items.items[1].as_object().unwrap();
        assert!(!second.required);
        let qty = second.child("qty").unwrap().as_leaf().unwrap();
        assert_eq!(qty.path, Some(FieldPath::parse("items.1.qty")));
        assert_eq!(qty.value, json!(2));
        assert!(qty.required);
    }

    #[test]
    fn test_leaf_paths_are_unique() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "object",
                    "properties": { "b": { "type": "string" }, "c": { "type": "string" } }
                },
                "a.b": { "type": "string" },
                "list": { "type": "array", "items": { "type": "string" } }
            }
        }));
        let store = InMemoryFormStore::from_values(json!({ "list": ["x", "y", "z"] }));
        let tree = compose(&node, None, None, ResolutionContext::default(), false, &store);

        let keys: Vec<String> = tree
            .leaves()
            .iter()
            .map(|l| l.store_path().to_store_key())
            .collect();
        let unique: std::collections::HashSet<&String> = keys.iter().collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_errors_attached_to_leaf() {
        let node = schema(json!({
            "type": "object",
            "properties": { "email": { "type": "string" } }
        }));
        let mut store = InMemoryFormStore::new();
        store.set_errors(&FieldPath::parse("email"), vec!["Already registered".to_string()]);
        let tree = compose(&node, None, None, ResolutionContext::default(), false, &store);

        let leaf = tree.find(&FieldPath::parse("email")).unwrap().as_leaf().unwrap();
        assert_eq!(leaf.errors, vec!["Already registered"]);
    }

    #[test]
    fn test_malformed_type_degrades_to_text() {
        let node = schema(json!({ "type": "object", "properties": { "odd": { "type": "decimal" } } }));
        let store = InMemoryFormStore::new();
        let tree = compose(&node, None, None, ResolutionContext::default(), false, &store);
        let odd = tree.as_object().unwrap().child("odd").unwrap().as_leaf().unwrap();
        assert_eq!(odd.widget, WidgetKind::Text);
    }

    #[test]
    fn test_depth_guard() {
        let mut node = schema(json!({ "type": "string" }));
        for _ in 0..5 {
            let mut parent = schema(json!({ "type": "object" }));
            parent.properties.insert("inner".to_string(), node);
            node = parent;
        }
        let store = InMemoryFormStore::new();
        let settings = FormSettings {
            max_depth: 2,
            ..Default::default()
        };
        let tree = Composer::with_settings(&store, settings).compose(
            &node,
            None,
            None,
            ResolutionContext::default(),
            false,
        );

        let leaf = tree.leaves()[0].clone();
        assert_eq!(leaf.path, Some(FieldPath::parse("inner.inner.inner")));
        assert!(!leaf.editable());
    }

    #[test]
    fn test_titles() {
        let node = schema(json!({
            "type": "object",
            "properties": {
                "plain": { "type": "string" },
                "titled": { "type": "string", "title": "Schema Title", "help": "Schema help" }
            }
        }));
        let hints = ui(json!({ "properties": { "titled": { "title": "UI Title" } } }));
        let store = InMemoryFormStore::new();
        let tree = compose(&node, Some(&hints), None, ResolutionContext::default(), false, &store);
        let root = tree.as_object().unwrap();

        assert_eq!(root.child("plain").unwrap().as_leaf().unwrap().title, "plain");
        let titled = root.child("titled").unwrap().as_leaf().unwrap();
        assert_eq!(titled.title, "UI Title");
        assert_eq!(titled.description.as_deref(), Some("Schema help"));
    }
}
