//! Key/index paths into JSON documents.
//!
//! A path is a sequence of [`Segment`]s: string keys address object members,
//! integer indices address array elements. The empty path is the root.
//!
//! # Example
//!
//! ```
//! use json_node_path::{format_locator, get, parse_locator, Segment};
//!
//! let path = vec![Segment::key("foo"), Segment::index(1)];
//! assert_eq!(format_locator(&path), r#"$["foo"][1]"#);
//! assert_eq!(parse_locator(r#"$["foo"][1]"#).unwrap(), path);
//!
//! let doc = serde_json::json!({"foo": [10, 20]});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(20)));
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod types;
pub use types::{Path, Segment};

pub mod locator;
pub use locator::{format_locator, parse_locator, ROOT_MARKER};

pub mod validate;
pub use validate::{is_valid_index, validate_path, MAX_PATH_LENGTH};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid path segment: {0}")]
    InvalidSegment(String),
    #[error("invalid array index: {0}")]
    InvalidIndex(String),
    #[error("path too long: {0} segments")]
    PathTooLong(usize),
    #[error("path must be a JSON array of keys and indices")]
    NotAnArray,
    #[error("expected root marker '$' at start")]
    ExpectedRoot,
    #[error("unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unclosed string")]
    UnclosedString,
    #[error("invalid escape sequence")]
    InvalidEscape,
}

/// Build a path from its JSON array form, e.g. `["a", 0]`.
///
/// # Example
///
/// ```
/// use json_node_path::{path_from_json, Segment};
/// use serde_json::json;
///
/// let path = path_from_json(&json!(["a", 0])).unwrap();
/// assert_eq!(path, vec![Segment::key("a"), Segment::index(0)]);
/// assert!(path_from_json(&json!(["a", -1])).is_err());
/// ```
pub fn path_from_json(value: &Value) -> Result<Path, PathError> {
    let steps = value.as_array().ok_or(PathError::NotAnArray)?;
    let path = steps
        .iter()
        .map(Segment::try_from)
        .collect::<Result<Path, _>>()?;
    validate_path(&path)?;
    Ok(path)
}

/// Parse a path from user input: a JSON array (`["a",0]`) or a locator (`$["a"][0]`).
pub fn parse_path(input: &str) -> Result<Path, PathError> {
    let trimmed = input.trim();
    if trimmed.starts_with('[') {
        let value: Value = serde_json::from_str(trimmed)
            .map_err(|e| PathError::InvalidSegment(e.to_string()))?;
        return path_from_json(&value);
    }
    let path = parse_locator(trimmed)?;
    validate_path(&path)?;
    Ok(path)
}

/// Check if a path points to the root value.
///
/// # Example
///
/// ```
/// use json_node_path::{is_root, Segment};
///
/// assert!(is_root(&[]));
/// assert!(!is_root(&[Segment::key("foo")]));
/// ```
pub fn is_root(path: &[Segment]) -> bool {
    path.is_empty()
}

/// Check if `parent` path contains the `child` path.
pub fn is_child(parent: &[Segment], child: &[Segment]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}

/// Get the parent path of a given path, or `None` for the root.
///
/// # Example
///
/// ```
/// use json_node_path::{parent, Segment};
///
/// let path = vec![Segment::key("foo"), Segment::index(2)];
/// assert_eq!(parent(&path), Some(&[Segment::key("foo")][..]));
/// assert_eq!(parent(&[]), None);
/// ```
pub fn parent(path: &[Segment]) -> Option<&[Segment]> {
    path.split_last().map(|(_, rest)| rest)
}

/// Get a value from a JSON document by path.
///
/// Returns `None` if the path doesn't exist or crosses a scalar.
///
/// # Example
///
/// ```
/// use json_node_path::{get, Segment};
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": 42}});
/// let val = get(&doc, &[Segment::key("foo"), Segment::key("bar")]);
/// assert_eq!(val, Some(&json!(42)));
///
/// let missing = get(&doc, &[Segment::key("missing")]);
/// assert_eq!(missing, None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get(step.array_index()?)?,
            Value::Object(map) => map.get(step.object_key().as_ref())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON document by path.
///
/// Returns `None` if the path doesn't exist or crosses a scalar.
pub fn get_mut<'a>(val: &'a mut Value, path: &[Segment]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get_mut(step.array_index()?)?,
            Value::Object(map) => map.get_mut(step.object_key().as_ref())?,
            _ => return None,
        };
    }
    Some(current)
}
