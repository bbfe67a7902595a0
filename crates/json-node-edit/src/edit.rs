//! Edit-surface helpers: what to show when editing starts and how saved text
//! becomes a value.

use json_node_path::{get, Segment};
use serde_json::Value;

use crate::canonical::{display_text, parse_literal, to_canonical_text};
use crate::coerce::coerce;
use crate::options::DEFAULT_INDENT;
use crate::rows::NodeRow;
use crate::EditError;

/// Whether a node offers editing at all.
pub fn can_edit(rows: &[NodeRow]) -> bool {
    !rows.is_empty()
}

/// Whether saved text must be deserialized as a structured literal.
pub fn requires_literal(raw: &str, row_count: usize) -> bool {
    let trimmed = raw.trim_start();
    row_count > 1 || trimmed.starts_with('{') || trimmed.starts_with('[')
}

/// Turn saved text into the value to write.
///
/// Multi-row nodes and text opening an object or array are parsed as JSON
/// (`InvalidLiteral` on failure); anything else goes through [`coerce`].
///
/// # Example
///
/// ```
/// use json_node_edit::resolve_value;
/// use serde_json::json;
///
/// assert_eq!(resolve_value("42", 1).unwrap(), json!(42));
/// assert_eq!(resolve_value(" [1, 2]", 1).unwrap(), json!([1, 2]));
/// assert_eq!(resolve_value(r#"{"a": 1}"#, 3).unwrap(), json!({"a": 1}));
/// assert!(resolve_value("hello", 2).is_err());
/// ```
pub fn resolve_value(raw: &str, row_count: usize) -> Result<Value, EditError> {
    if requires_literal(raw, row_count) {
        parse_literal(raw)
    } else {
        Ok(coerce(raw))
    }
}

/// Which input the edit surface shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// One scalar row: a single-line input.
    Line,
    /// Containers and multi-row nodes: a multi-line editor.
    Block,
}

/// Initial state of the edit surface for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSeed {
    pub kind: EditorKind,
    pub text: String,
}

impl EditSeed {
    /// Seed the editor for the node at `path` described by `rows`.
    ///
    /// A single non-container row seeds a line input with that row's value
    /// (`null` seeds as empty). Everything else seeds a block editor with the
    /// current value at `path` in `doc`: containers and `null` as JSON, strings
    /// raw, a missing node as empty.
    pub fn for_node(doc: &Value, path: &[Segment], rows: &[NodeRow]) -> Self {
        if let [row] = rows {
            if !row.row_type.is_container() {
                let text = match &row.value {
                    Value::Null => String::new(),
                    other => display_text(other, DEFAULT_INDENT).unwrap_or_default(),
                };
                return EditSeed { kind: EditorKind::Line, text };
            }
        }
        let text = match get(doc, path) {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(v @ (Value::Null | Value::Array(_) | Value::Object(_))) => {
                to_canonical_text(v, DEFAULT_INDENT).unwrap_or_default()
            }
            Some(scalar) => scalar.to_string(),
        };
        EditSeed { kind: EditorKind::Block, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RowType;
    use serde_json::json;

    #[test]
    fn can_edit_needs_a_row() {
        assert!(!can_edit(&[]));
        assert!(can_edit(&[NodeRow::unlabeled(json!(1))]));
    }

    #[test]
    fn literal_detection() {
        assert!(requires_literal("{", 1));
        assert!(requires_literal("   [1]", 1));
        assert!(requires_literal("5", 2));
        assert!(!requires_literal("5", 1));
        assert!(!requires_literal("a{", 0));
    }

    #[test]
    fn resolve_coerces_single_row_text() {
        assert_eq!(resolve_value("true", 1).unwrap(), json!(true));
        assert_eq!(resolve_value("042", 1).unwrap(), json!("042"));
        assert_eq!(resolve_value("", 1).unwrap(), json!(""));
    }

    #[test]
    fn resolve_rejects_broken_literal() {
        assert!(resolve_value("{\"a\": ", 1).unwrap_err().is_invalid_literal());
        assert!(resolve_value("plain", 4).unwrap_err().is_invalid_literal());
    }

    #[test]
    fn seed_single_scalar_row() {
        let doc = json!({"name": "Ada"});
        let rows = [NodeRow::unlabeled(json!("Ada"))];
        let seed = EditSeed::for_node(&doc, &[Segment::key("name")], &rows);
        assert_eq!(seed, EditSeed { kind: EditorKind::Line, text: "Ada".to_string() });
    }

    #[test]
    fn seed_single_null_row_is_empty() {
        let rows = [NodeRow::unlabeled(json!(null))];
        let seed = EditSeed::for_node(&json!({"a": null}), &[Segment::key("a")], &rows);
        assert_eq!(seed.kind, EditorKind::Line);
        assert_eq!(seed.text, "");
    }

    #[test]
    fn seed_multi_row_node_from_document() {
        let doc = json!({"user": {"name": "Ada", "age": 36}});
        let rows = [NodeRow::keyed("name", json!("Ada")), NodeRow::keyed("age", json!(36))];
        let seed = EditSeed::for_node(&doc, &[Segment::key("user")], &rows);
        assert_eq!(seed.kind, EditorKind::Block);
        assert_eq!(seed.text, "{\n  \"name\": \"Ada\",\n  \"age\": 36\n}");
    }

    #[test]
    fn seed_single_container_row_uses_block() {
        let doc = json!({"tags": ["a"]});
        let rows = [NodeRow::new(None, json!(["a"]), RowType::Array)];
        let seed = EditSeed::for_node(&doc, &[Segment::key("tags")], &rows);
        assert_eq!(seed.kind, EditorKind::Block);
        assert_eq!(seed.text, "[\n  \"a\"\n]");
    }

    #[test]
    fn seed_missing_node_is_empty() {
        let rows = [NodeRow::keyed("a", json!(1)), NodeRow::keyed("b", json!(2))];
        let seed = EditSeed::for_node(&json!({}), &[Segment::key("gone")], &rows);
        assert_eq!(seed.text, "");
    }
}
