//! Error types for the form engine

use thiserror::Error;

/// Errors raised by operations around the composer.
///
/// Composition itself never fails: malformed schemas degrade to text
/// leaves and validation failures are data on the leaf.
#[derive(Debug, Error)]
pub enum FormError {
    /// Array index outside the current element range
    #[error("Index {index} out of range for array at '{path}' (length {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },

    /// Path does not address an array in the store
    #[error("Not an array: '{0}'")]
    NotAnArray(String),

    /// Transition not declared by the document
    #[error("Unknown transition '{transition}' for document '{document}'")]
    UnknownTransition { document: String, transition: String },

    /// Document file could not be parsed
    #[error("Document parse error in {path}: {reason}")]
    DocumentParse { path: String, reason: String },

    /// Unsupported document file extension
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// External error payload had an unexpected shape
    #[error("Invalid error payload: {0}")]
    InvalidErrorPayload(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FormError {
    fn from(e: serde_json::Error) -> Self {
        FormError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for FormError {
    fn from(e: serde_yaml::Error) -> Self {
        FormError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
