//! Validation rules derived from schema constraints

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::SchemaNode;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const URL_PATTERN: &str = r"^(https?|ftp)://[^\s/$.?#][^\s]*$";
const PHONE_PATTERN: &str = r"^\+?[0-9()\-\s.]{7,20}$";

static BUILTIN_PATTERNS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    [EMAIL_PATTERN, URL_PATTERN, PHONE_PATTERN]
        .into_iter()
        .filter_map(|p| Regex::new(p).ok().map(|re| (p, re)))
        .collect()
});

/// Built-in pattern and message for a `format`
fn format_pattern(format: &str) -> Option<(&'static str, &'static str)> {
    match format {
        "email" => Some((EMAIL_PATTERN, "Must be a valid email address")),
        "url" | "uri" => Some((URL_PATTERN, "Must be a valid URL")),
        "phone" | "tel" => Some((PHONE_PATTERN, "Must be a valid phone number")),
        _ => None,
    }
}

/// Constraint checked by a rule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    /// Boolean that must be `true` (distinct from merely being present)
    MustBeTrue,
    MinLength { value: u64 },
    MaxLength { value: u64 },
    Min { value: f64 },
    Max { value: f64 },
    Pattern { pattern: String },
    MultipleOf { value: f64 },
}

/// One constraint plus the message shown when it fails
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(flatten)]
    pub kind: RuleKind,
    pub message: String,
}

impl Rule {
    fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Check a value. `None` means the rule holds.
    pub fn check(&self, value: Option<&Value>) -> Option<String> {
        let value = value.filter(|v| !is_empty(v));

        let passed = match (&self.kind, value) {
            (RuleKind::Required, v) => v.is_some(),
            (RuleKind::MustBeTrue, v) => v == Some(&Value::Bool(true)),
            // Remaining rules only apply once a value exists
            (_, None) => true,
            (RuleKind::MinLength { value: min }, Some(v)) => {
                length_of(v).map_or(true, |len| len >= *min)
            }
            (RuleKind::MaxLength { value: max }, Some(v)) => {
                length_of(v).map_or(true, |len| len <= *max)
            }
            (RuleKind::Min { value: min }, Some(v)) => number_of(v).map_or(true, |n| n >= *min),
            (RuleKind::Max { value: max }, Some(v)) => number_of(v).map_or(true, |n| n <= *max),
            (RuleKind::Pattern { pattern }, Some(Value::String(s))) => {
                return match_pattern(pattern, s, &self.message);
            }
            (RuleKind::Pattern { .. }, Some(_)) => true,
            (RuleKind::MultipleOf { value: divisor }, Some(v)) => {
                number_of(v).map_or(true, |n| is_multiple_of(n, *divisor))
            }
        };

        if passed {
            None
        } else {
            Some(self.message.clone())
        }
    }
}

fn match_pattern(pattern: &str, input: &str, message: &str) -> Option<String> {
    let matched = match BUILTIN_PATTERNS.get(pattern) {
        Some(re) => re.is_match(input),
        None => match Regex::new(pattern) {
            Ok(re) => re.is_match(input),
            Err(e) => {
                tracing::warn!("Invalid pattern '{}' in schema: {}", pattern, e);
                return Some(format!("Invalid pattern in schema: {}", pattern));
            }
        },
    };
    if matched {
        None
    } else {
        Some(message.to_string())
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        _ => false,
    }
}

fn length_of(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => Some(s.chars().count() as u64),
        Value::Array(arr) => Some(arr.len() as u64),
        _ => None,
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn is_multiple_of(n: f64, divisor: f64) -> bool {
    if divisor == 0.0 {
        return true;
    }
    let quotient = n / divisor;
    (quotient - quotient.round()).abs() < 1e-9
}

/// Rules for one leaf, evaluated by the host against current values
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| r.kind == RuleKind::Required)
    }

    /// Messages of every failing rule, in rule order
    pub fn evaluate(&self, value: Option<&Value>) -> Vec<String> {
        self.rules.iter().filter_map(|r| r.check(value)).collect()
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Build the rule set for a leaf schema node
pub fn build_rules(schema: &SchemaNode, is_required: bool) -> RuleSet {
    let mut rules = Vec::new();

    if is_required {
        rules.push(Rule::new(RuleKind::Required, "This field is required"));
    }

    if schema.must_be_true() {
        rules.push(Rule::new(RuleKind::MustBeTrue, "Must be true"));
    }

    if let Some(min) = schema.min_length {
        rules.push(Rule::new(
            RuleKind::MinLength { value: min },
            format!("Must be at least {} characters", min),
        ));
    }

    if let Some(max) = schema.max_length {
        rules.push(Rule::new(
            RuleKind::MaxLength { value: max },
            format!("Must be at most {} characters", max),
        ));
    }

    if let Some(min) = schema.minimum {
        rules.push(Rule::new(
            RuleKind::Min { value: min },
            format!("Must be at least {}", format_number(min)),
        ));
    }

    if let Some(max) = schema.maximum {
        rules.push(Rule::new(
            RuleKind::Max { value: max },
            format!("Must be at most {}", format_number(max)),
        ));
    }

    // Explicit pattern wins over the format's built-in one
    match (&schema.pattern, schema.format.as_deref().and_then(format_pattern)) {
        (Some(pattern), _) => rules.push(Rule::new(
            RuleKind::Pattern {
                pattern: pattern.clone(),
            },
            format!("Must match pattern {}", pattern),
        )),
        (None, Some((pattern, message))) => rules.push(Rule::new(
            RuleKind::Pattern {
                pattern: pattern.to_string(),
            },
            message,
        )),
        (None, None) => {}
    }

    if let Some(divisor) = schema.multiple_of {
        rules.push(Rule::new(
            RuleKind::MultipleOf { value: divisor },
            format!("Must be a multiple of {}", format_number(divisor)),
        ));
    }

    RuleSet { rules }
}
