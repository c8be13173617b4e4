//! Wire-level types: schema tree, UI hints, field paths and document envelope

pub mod document;
pub mod path;
pub mod schema;
pub mod ui_hints;

pub use document::{ContentKind, Document};
pub use path::{merge_path, FieldPath, Segment};
pub use schema::{EnumOption, SchemaNode, SchemaType, TypeDecl};
pub use ui_hints::UiHintNode;
