//! Schema-driven form engine
//!
//! Turns a schema tree plus an optional UI-hint overlay into a nested,
//! validated control tree bound to a [`FormStore`](crate::adapters::form_store::FormStore):
//! - `dispatcher`: node classification and widget selection
//! - `defaults`: zero values for new array elements
//! - `rules`: validation rules derived from schema constraints
//! - `composer`: recursive control tree composition
//! - `array_ops`: append/remove on array values
//! - `content`: form vs. raw content dispatch
//! - `submission`: transition submission payloads
//! - `validation`: host-side rule evaluation

pub mod array_ops;
pub mod composer;
pub mod content;
pub mod defaults;
pub mod dispatcher;
pub mod rules;
pub mod submission;
pub mod validation;

pub use composer::{
    compose, ArrayControl, Composer, ControlNode, LeafControl, ObjectControl, ResolutionContext,
};
pub use content::{dispatch, DocumentView};
pub use defaults::synthesize_default;
pub use dispatcher::{classify, resolve_widget, NodeClass, WidgetKind};
pub use rules::{build_rules, Rule, RuleKind, RuleSet};
pub use submission::{build_submission, Submission};
pub use validation::{validate_tree, ValidationReport};
