//! Subcommand handlers behind the `studio-forms` binary
//!
//! Each handler returns the text to print; `main` only decides the exit code.

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use std::path::Path;

use crate::adapters::form_store::{apply_external_errors, FormStore, InMemoryFormStore};
use crate::adapters::text_renderer::{render_document, render_tree};
use crate::cli::Command;
use crate::config::{OutputFormat, Settings};
use crate::domain::document::load_values;
use crate::domain::{Document, FieldPath};
use crate::form::{
    build_submission, dispatch, synthesize_default, validate_tree, ArrayControl, Composer,
    ControlNode, ResolutionContext,
};

/// Result of one subcommand
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

pub fn run(command: &Command, settings: &Settings) -> anyhow::Result<Outcome> {
    match command {
        Command::Render { document, values } => {
            let (doc, store) = open(document, values.as_deref())?;
            let view = dispatch(&doc, &store, &settings.form);
            let output = match settings.output.format {
                OutputFormat::Text => render_document(&view),
                OutputFormat::Json => to_json(&view, settings)?,
            };
            Ok(Outcome::ok(output))
        }
        Command::Blueprint { document } => {
            let doc = Document::load(document)?;
            let blueprint = synthesize_default(&doc.schema);
            Ok(Outcome::ok(to_json(&blueprint, settings)?))
        }
        Command::Validate {
            document,
            values,
            errors,
        } => {
            let (doc, mut store) = open(document, values.as_deref())?;
            validate(&doc, &mut store, errors.as_deref(), settings)
        }
        Command::Submit {
            document,
            transition,
            values,
        } => {
            let (doc, store) = open(document, values.as_deref())?;
            let submission = build_submission(&doc, &store, transition, &settings.form)?;
            Ok(Outcome::ok(to_json(&submission, settings)?))
        }
        Command::Append {
            document,
            path,
            values,
        } => {
            let (doc, mut store) = open(document, values.as_deref())?;
            let tree = form_tree(&doc, &store, settings)?;
            let array_path = FieldPath::parse(path);
            let array = find_array(&tree, &array_path)?;
            let new_path = array.append(&mut store);
            tracing::info!("Appended element at '{}'", new_path);
            Ok(Outcome::ok(to_json(store.values(), settings)?))
        }
        Command::Remove {
            document,
            path,
            index,
            values,
        } => {
            let (doc, mut store) = open(document, values.as_deref())?;
            let tree = form_tree(&doc, &store, settings)?;
            let array_path = FieldPath::parse(path);
            let array = find_array(&tree, &array_path)?;
            array.remove(&mut store, *index)?;
            tracing::info!("Removed element {} from '{}'", index, array_path);
            Ok(Outcome::ok(to_json(store.values(), settings)?))
        }
    }
}

/// Load a document and seed a store with its values, or with a separate
/// values file when given
pub fn open(document: &Path, values: Option<&Path>) -> anyhow::Result<(Document, InMemoryFormStore)> {
    let doc = Document::load(document)
        .with_context(|| format!("Failed to load document {}", document.display()))?;
    let initial = match values {
        Some(path) => load_values(path)
            .with_context(|| format!("Failed to load values {}", path.display()))?,
        None => doc.values.clone(),
    };
    Ok((doc, InMemoryFormStore::from_values(initial)))
}

fn validate(
    doc: &Document,
    store: &mut InMemoryFormStore,
    external: Option<&Path>,
    settings: &Settings,
) -> anyhow::Result<Outcome> {
    let tree = form_tree(doc, &*store, settings)?;
    let report = validate_tree(&tree, store);

    if let Some(path) = external {
        let payload = load_values(path)
            .with_context(|| format!("Failed to load errors {}", path.display()))?;
        let applied = apply_external_errors(store, &payload)?;
        tracing::info!("Applied {} external errors", applied);
    }

    let success = !store.has_errors();
    let output = match settings.output.format {
        OutputFormat::Text => {
            // Re-compose so leaves carry the merged error slots
            let tree = form_tree(doc, &*store, settings)?;
            let mut out = render_tree(&tree);
            if success {
                out.push_str(&format!("OK: {} fields valid\n", report.checked));
            } else {
                out.push_str(&format!(
                    "FAILED: {} fields with errors\n",
                    store.all_errors().len()
                ));
            }
            out
        }
        OutputFormat::Json => to_json(store.all_errors(), settings)?,
    };
    Ok(Outcome { output, success })
}

fn form_tree(doc: &Document, store: &dyn FormStore, settings: &Settings) -> anyhow::Result<ControlNode> {
    if doc.content_kind().is_raw() {
        bail!(
            "Document '{}' is {:?} content and has no form",
            doc.id,
            doc.content_kind()
        );
    }
    let ctx = ResolutionContext::new(doc.disabled, doc.view_only);
    Ok(Composer::with_settings(store, settings.form.clone()).compose(
        &doc.schema,
        doc.ui.as_ref(),
        None,
        ctx,
        false,
    ))
}

fn find_array<'t>(tree: &'t ControlNode, path: &FieldPath) -> anyhow::Result<&'t ArrayControl> {
    let node = if path.is_root() {
        Some(tree)
    } else {
        tree.find(path)
    };
    let array = node
        .and_then(ControlNode::as_array)
        .ok_or_else(|| anyhow!("No array field at '{}'", path))?;
    if !array.mutable {
        bail!("Array at '{}' is read-only", path);
    }
    Ok(array)
}

fn to_json<T: Serialize + ?Sized>(value: &T, settings: &Settings) -> anyhow::Result<String> {
    let text = if settings.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
