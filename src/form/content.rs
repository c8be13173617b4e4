//! Top-level switch between the schema form and raw content viewers

use serde::Serialize;
use serde_json::Value;

use super::composer::{Composer, ControlNode, ResolutionContext};
use crate::adapters::form_store::FormStore;
use crate::config::FormSettings;
use crate::domain::{ContentKind, Document, FieldPath};

/// What the host should render for a document
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum DocumentView {
    /// Schema-driven form
    Form { tree: ControlNode },
    /// Raw content shown by a dedicated viewer, schema not walked
    Raw { kind: ContentKind, text: String },
}

/// Pick the view for a document and, for forms, compose the control tree
pub fn dispatch(document: &Document, store: &dyn FormStore, settings: &FormSettings) -> DocumentView {
    let kind = document.content_kind();

    if kind.is_raw() {
        let value = store.get(&FieldPath::root()).unwrap_or(Value::Null);
        tracing::debug!("Document '{}' rendered as raw {:?}", document.id, kind);
        return DocumentView::Raw {
            kind,
            text: raw_text(kind, &value),
        };
    }

    let ctx = ResolutionContext::new(document.disabled, document.view_only);
    let tree = Composer::with_settings(store, settings.clone()).compose(
        &document.schema,
        document.ui.as_ref(),
        None,
        ctx,
        false,
    );
    tracing::debug!(
        "Composed form for document '{}' ({} leaves)",
        document.id,
        tree.leaves().len()
    );
    DocumentView::Form { tree }
}

/// Text for a raw viewer. Strings are shown as-is; structured values are
/// pretty-printed in the declared format.
pub fn raw_text(kind: ContentKind, value: &Value) -> String {
    if let Value::String(s) = value {
        return s.clone();
    }

    let printed = match kind {
        ContentKind::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
    };
    printed.unwrap_or_else(|e| {
        tracing::warn!("Failed to print raw {:?} content: {}", kind, e);
        value.to_string()
    })
}
