//! Document navigator/mutator.
//!
//! Writes a value through a path, creating missing intermediate containers on
//! the way. The container created for a missing child is chosen by looking at
//! the *next* segment: an index creates `[]`, a key creates `{}`. A key that
//! merely looks numeric (`"0"`) is still a key and creates an object.

use json_node_path::{format_locator, validate_path, Segment};
use serde_json::{Map, Value};

use crate::canonical::{parse_document, parse_literal, to_canonical_text};
use crate::error::value_type_name;
use crate::options::DEFAULT_INDENT;
use crate::EditError;

/// Replacement value for a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum NewValue {
    /// Already typed, e.g. the output of [`coerce`](crate::coerce).
    Typed(Value),
    /// Raw structured literal, deserialized after the document.
    Literal(String),
}

impl NewValue {
    fn into_value(self) -> Result<Value, EditError> {
        match self {
            NewValue::Typed(v) => Ok(v),
            NewValue::Literal(text) => parse_literal(&text),
        }
    }
}

impl From<Value> for NewValue {
    fn from(value: Value) -> Self {
        NewValue::Typed(value)
    }
}

// ── Tree navigation ───────────────────────────────────────────────────────

/// Resolve `step` inside `container`, auto-vivifying a missing child.
fn child_or_vivify<'a>(
    container: &'a mut Value,
    step: &Segment,
    next_is_index: bool,
    at: &[Segment],
) -> Result<&'a mut Value, EditError> {
    let fresh = || {
        tracing::trace!(locator = %format_locator(at), "auto-vivified container");
        if next_is_index {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        }
    };
    match container {
        Value::Object(map) => Ok(map.entry(step.object_key().into_owned()).or_insert_with(fresh)),
        Value::Array(arr) => {
            let idx = array_slot(step, at)?;
            if idx >= arr.len() {
                pad_to(arr, idx, at)?;
                arr.push(fresh());
            }
            Ok(&mut arr[idx])
        }
        other => Err(EditError::path_mismatch(
            at,
            format!("cannot step into {}", value_type_name(other)),
        )),
    }
}

/// Write `value` at `step` of `container`, returning the value it replaced.
fn assign(
    container: &mut Value,
    step: &Segment,
    value: Value,
    at: &[Segment],
) -> Result<Option<Value>, EditError> {
    match container {
        Value::Object(map) => Ok(map.insert(step.object_key().into_owned(), value)),
        Value::Array(arr) => {
            let idx = array_slot(step, at)?;
            if idx < arr.len() {
                return Ok(Some(std::mem::replace(&mut arr[idx], value)));
            }
            pad_to(arr, idx, at)?;
            arr.push(value);
            Ok(None)
        }
        other => Err(EditError::path_mismatch(
            at,
            format!("cannot assign into {}", value_type_name(other)),
        )),
    }
}

/// Largest run of `null`s a single write past the end of an array may create.
pub const MAX_ARRAY_GAP: usize = 1 << 20;

/// Fill `arr` with `null` up to (not including) `idx`, leaving room for one more push.
///
/// Gaps left by writing past the end read back as null. An index too far out
/// to allocate is a path error, and `arr` is left as it was.
fn pad_to(arr: &mut Vec<Value>, idx: usize, at: &[Segment]) -> Result<(), EditError> {
    let gap = idx - arr.len();
    if gap > MAX_ARRAY_GAP {
        return Err(EditError::path_mismatch(
            at,
            format!("index {idx} is {gap} past the end of the array"),
        ));
    }
    arr.try_reserve(gap + 1)
        .map_err(|e| EditError::path_mismatch(at, format!("index {idx} cannot be allocated: {e}")))?;
    arr.resize(idx, Value::Null);
    Ok(())
}

fn array_slot(step: &Segment, at: &[Segment]) -> Result<usize, EditError> {
    step.array_index()
        .ok_or_else(|| EditError::path_mismatch(at, format!("key {step} does not address an array element")))
}

// ── Public API ────────────────────────────────────────────────────────────

/// Write `value` at `path` inside `doc`, auto-vivifying missing ancestors.
///
/// Returns the value previously stored at `path`, if any. An empty path
/// replaces the whole document. On error `doc` is left untouched: every
/// failure is detected on existing nodes before anything is created.
///
/// # Example
///
/// ```
/// use json_node_edit::set_at_path;
/// use json_node_path::Segment;
/// use serde_json::json;
///
/// let mut doc = json!({});
/// let path = vec![Segment::key("a"), Segment::key("b"), Segment::index(0)];
/// set_at_path(&mut doc, &path, json!(1)).unwrap();
/// assert_eq!(doc, json!({"a": {"b": [1]}}));
/// ```
pub fn set_at_path(
    doc: &mut Value,
    path: &[Segment],
    value: Value,
) -> Result<Option<Value>, EditError> {
    validate_path(path)?;
    let Some((last, ancestors)) = path.split_last() else {
        return Ok(Some(std::mem::replace(doc, value)));
    };

    let mut cursor = doc;
    for (i, step) in ancestors.iter().enumerate() {
        let next_is_index = path[i + 1].is_index();
        cursor = child_or_vivify(cursor, step, next_is_index, &path[..=i])?;
    }
    assign(cursor, last, value, path)
}

/// Mutate canonical document text, producing new canonical text.
///
/// The document is deserialized first (`MalformedDocument` on failure), then a
/// [`NewValue::Literal`] is deserialized (`InvalidLiteral`), then the value is
/// written through the path (`PathMismatch`). The input text is never touched;
/// callers commit the returned text only on success.
///
/// # Example
///
/// ```
/// use json_node_edit::mutate;
/// use json_node_path::Segment;
/// use serde_json::json;
///
/// let out = mutate(r#"{"a": 1}"#, &[Segment::key("a")], json!(2)).unwrap();
/// assert_eq!(out, "{\n  \"a\": 2\n}");
/// ```
pub fn mutate(
    text: &str,
    path: &[Segment],
    value: impl Into<NewValue>,
) -> Result<String, EditError> {
    mutate_with_indent(text, path, value, DEFAULT_INDENT)
}

/// [`mutate`] with an explicit indentation width.
pub fn mutate_with_indent(
    text: &str,
    path: &[Segment],
    value: impl Into<NewValue>,
    indent: usize,
) -> Result<String, EditError> {
    let mut tree = parse_document(text)?;
    let value = value.into().into_value()?;
    set_at_path(&mut tree, path, value)?;
    to_canonical_text(&tree, indent).map_err(EditError::Serialization)
}
