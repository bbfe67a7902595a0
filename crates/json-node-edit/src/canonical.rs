//! Canonical document text: parsing and deterministic pretty serialization.
//!
//! Object keys keep insertion order (`serde_json` with `preserve_order`), so the
//! same tree always prints the same text.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::EditError;

/// Deserialize canonical text. Empty text is an empty object.
pub fn parse_document(text: &str) -> Result<Value, EditError> {
    if text.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(text).map_err(EditError::MalformedDocument)
}

/// Deserialize user-supplied text that must be a structured literal.
pub fn parse_literal(text: &str) -> Result<Value, EditError> {
    serde_json::from_str(text).map_err(EditError::InvalidLiteral)
}

/// Serialize `value` with `indent` spaces per level; `0` means compact.
pub fn to_canonical_text(value: &Value, indent: usize) -> Result<String, serde_json::Error> {
    if indent == 0 {
        return serde_json::to_string(value);
    }
    let indent = vec![b' '; indent];
    let mut out = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut ser)?;
    String::from_utf8(out).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Display text of a value: strings raw, containers pretty-printed, other scalars as JSON.
pub fn display_text(value: &Value, indent: usize) -> Result<String, serde_json::Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => to_canonical_text(value, indent),
        scalar => Ok(scalar.to_string()),
    }
}
