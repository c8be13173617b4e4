//! Field paths addressing values in the form store

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Segment of a field path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object property access
    Property(String),
    /// Array element access
    Index(usize),
}

impl Segment {
    fn write_key(&self, out: &mut String) {
        match self {
            Segment::Property(name) => {
                // A leading escape keeps all-digit names from reading back as indices
                if is_index_like(name) {
                    out.push('\\');
                }
                for ch in name.chars() {
                    if ch == '.' || ch == '\\' {
                        out.push('\\');
                    }
                    out.push(ch);
                }
            }
            Segment::Index(idx) => out.push_str(&idx.to_string()),
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Property(name.to_string())
    }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

/// Path to a value position (e.g. `order.items.2.qty`).
///
/// The empty path is the document root. Property names containing `.` or
/// `\` are escaped in the store key so distinct paths never collide.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Create a root path (empty)
    pub fn root() -> Self {
        Self { segments: vec![] }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// New path with a segment appended
    pub fn child(&self, segment: Segment) -> Self {
        let mut new = self.clone();
        new.segments.push(segment);
        new
    }

    pub fn push_property(&self, name: &str) -> Self {
        self.child(Segment::Property(name.to_string()))
    }

    pub fn push_index(&self, idx: usize) -> Self {
        self.child(Segment::Index(idx))
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Parent path (root stays root)
    pub fn parent(&self) -> Self {
        let mut new = self.clone();
        new.segments.pop();
        new
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// True if `self` equals `prefix` or lies underneath it
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Dotted key used by the form store and error maps
    pub fn to_store_key(&self) -> String {
        let mut out = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            seg.write_key(&mut out);
        }
        out
    }

    /// Parse a dotted store key. Unescaped all-digit segments become indices.
    pub fn parse(key: &str) -> Self {
        let mut segments = Vec::new();
        if key.is_empty() {
            return Self { segments };
        }

        let mut current = String::new();
        let mut escaped = false;
        let mut literal = false;
        let mut chars = key.chars();
        loop {
            match chars.next() {
                Some(ch) if escaped => {
                    current.push(ch);
                    escaped = false;
                }
                Some('\\') => {
                    escaped = true;
                    literal = true;
                }
                Some('.') => {
                    segments.push(Self::parse_segment(std::mem::take(&mut current), literal));
                    literal = false;
                }
                Some(ch) => current.push(ch),
                None => {
                    segments.push(Self::parse_segment(current, literal));
                    break;
                }
            }
        }

        Self { segments }
    }

    fn parse_segment(raw: String, literal: bool) -> Segment {
        if !literal && is_index_like(&raw) {
            if let Ok(idx) = raw.parse::<usize>() {
                return Segment::Index(idx);
            }
        }
        Segment::Property(raw)
    }
}

fn is_index_like(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_store_key())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_store_key())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(FieldPath::parse(&key))
    }
}

/// Join a parent path and a child name.
///
/// A missing name yields no path (the root is not addressable as a field);
/// a missing parent makes the name the first segment.
pub fn merge_path(parent: Option<&FieldPath>, name: Option<Segment>) -> Option<FieldPath> {
    let name = name?;
    Some(match parent {
        Some(parent) => parent.child(name),
        None => FieldPath::root().child(name),
    })
}
