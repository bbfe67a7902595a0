//! Error types for node editing.

use json_node_path::{format_locator, PathError, Segment};
use thiserror::Error;

/// Why an edit was rejected. The document text is unchanged whenever one of
/// these is returned.
#[derive(Debug, Error)]
pub enum EditError {
    /// The current canonical text does not deserialize.
    #[error("malformed document: {0}")]
    MalformedDocument(#[source] serde_json::Error),

    /// Raw text that had to be a structured literal does not deserialize.
    #[error("invalid literal: {0}")]
    InvalidLiteral(#[source] serde_json::Error),

    /// A path segment cannot be resolved or auto-vivified.
    #[error("path mismatch at {locator}: {reason}")]
    PathMismatch {
        /// Locator of the path prefix where resolution failed.
        locator: String,
        reason: String,
    },

    /// The mutated tree could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl EditError {
    pub(crate) fn path_mismatch(at: &[Segment], reason: impl Into<String>) -> Self {
        EditError::PathMismatch {
            locator: format_locator(at),
            reason: reason.into(),
        }
    }

    pub fn is_malformed_document(&self) -> bool {
        matches!(self, EditError::MalformedDocument(_))
    }

    pub fn is_invalid_literal(&self) -> bool {
        matches!(self, EditError::InvalidLiteral(_))
    }

    pub fn is_path_mismatch(&self) -> bool {
        matches!(self, EditError::PathMismatch { .. })
    }
}

impl From<PathError> for EditError {
    fn from(e: PathError) -> Self {
        EditError::PathMismatch {
            locator: json_node_path::ROOT_MARKER.to_string(),
            reason: e.to_string(),
        }
    }
}

/// A downstream consumer failed to take a committed document.
///
/// Reported next to a successful mutation, never instead of one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("sink '{sink}' failed: {message}")]
pub struct SyncError {
    pub sink: String,
    pub message: String,
}

impl SyncError {
    pub fn new(sink: impl Into<String>, message: impl Into<String>) -> Self {
        SyncError {
            sink: sink.into(),
            message: message.into(),
        }
    }
}

/// Get the type name of a JSON value.
#[inline]
pub fn value_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
