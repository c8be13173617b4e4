//! # Studio Forms - schema-driven form engine
//!
//! Turns a JSON-Schema-like tree plus an optional UI-hint overlay into a
//! nested control tree bound to a path-addressed value store.
//!
//! ## Features
//!
//! - **Widget dispatch**: deterministic widget choice from schema and hints
//! - **Validation rules**: derived from schema constraints, evaluated per field
//! - **Arrays**: append with synthesized defaults, remove with index shifting
//! - **Raw content**: markdown/json/yaml documents bypass the form
//! - **Submissions**: transition payloads restricted to the schema shape
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use studio_forms::adapters::form_store::InMemoryFormStore;
//! use studio_forms::config::Settings;
//! use studio_forms::domain::Document;
//! use studio_forms::form::dispatch;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let document = Document::load("order.yaml".as_ref())?;
//!     let store = InMemoryFormStore::from_values(document.values.clone());
//!     let view = dispatch(&document, &store, &settings.form);
//!     println!("{:?}", view);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: schema, UI hints, field paths, document envelope
//! - **Form**: composition, rules, defaults, array mutation, submission
//! - **Adapters**: value store and text rendering
//! - **Config**: layered settings

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;

pub use error::{FormError, Result};
