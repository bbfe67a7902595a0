//! Row normalizer: rebuild display text from a node's row representation.
//!
//! Rows are a display projection of the document. They never feed back into
//! the canonical text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::canonical::{display_text, to_canonical_text};
use crate::options::DEFAULT_INDENT;

/// Type tag of a displayed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
    /// Any other scalar-ish tag the visualization layer emits.
    #[serde(other)]
    Other,
}

impl RowType {
    pub fn is_container(&self) -> bool {
        matches!(self, RowType::Array | RowType::Object)
    }

    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => RowType::Null,
            Value::Bool(_) => RowType::Boolean,
            Value::Number(_) => RowType::Number,
            Value::String(_) => RowType::String,
            Value::Array(_) => RowType::Array,
            Value::Object(_) => RowType::Object,
        }
    }
}

/// One displayed row of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "type")]
    pub row_type: RowType,
}

impl NodeRow {
    pub fn new(key: Option<&str>, value: Value, row_type: RowType) -> Self {
        NodeRow {
            key: key.map(str::to_string),
            value,
            row_type,
        }
    }

    /// A keyed row whose type tag is derived from the value.
    pub fn keyed(key: &str, value: Value) -> Self {
        let row_type = RowType::of(&value);
        NodeRow::new(Some(key), value, row_type)
    }

    /// An unlabeled row whose type tag is derived from the value.
    pub fn unlabeled(value: Value) -> Self {
        let row_type = RowType::of(&value);
        NodeRow::new(None, value, row_type)
    }

    /// The row's key, with an empty key treated as absent.
    pub fn label(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Canonical display text for a node's rows.
///
/// # Example
///
/// ```
/// use json_node_edit::{normalize, NodeRow};
/// use serde_json::json;
///
/// assert_eq!(normalize(&[]), "{}");
/// assert_eq!(normalize(&[NodeRow::unlabeled(json!(5))]), "5");
/// assert_eq!(
///     normalize(&[NodeRow::keyed("x", json!(1)), NodeRow::keyed("y", json!([1]))]),
///     "{\n  \"x\": 1\n}"
/// );
/// ```
pub fn normalize(rows: &[NodeRow]) -> String {
    normalize_with_indent(rows, DEFAULT_INDENT)
}

pub fn normalize_with_indent(rows: &[NodeRow], indent: usize) -> String {
    match rows {
        [] => "{}".to_string(),
        [row] if row.label().is_none() => {
            display_text(&row.value, indent).unwrap_or_else(|_| row.value.to_string())
        }
        _ => {
            let mut obj = Map::new();
            for row in rows.iter().filter(|r| !r.row_type.is_container()) {
                if let Some(key) = row.label() {
                    obj.insert(key.to_string(), row.value.clone());
                }
            }
            let obj = Value::Object(obj);
            to_canonical_text(&obj, indent).unwrap_or_else(|_| obj.to_string())
        }
    }
}
