//! Type definitions for node paths.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::validate::is_valid_index;
use crate::PathError;

/// A single step of a [`Path`].
///
/// Keys address object members, indices address array elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A path from the document root to a node. Empty means the root itself.
pub type Path = Vec<Segment>;

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key(key.into())
    }

    pub fn index(index: usize) -> Self {
        Segment::Index(index)
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Position of this segment inside an array.
    ///
    /// String keys only resolve when they are canonical indices (`"0"`, `"12"`);
    /// anything else has no array position.
    pub fn array_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(k) if is_valid_index(k) => k.parse().ok(),
            Segment::Key(_) => None,
        }
    }

    /// Member name of this segment inside an object. Indices use their decimal text.
    pub fn object_key(&self) -> Cow<'_, str> {
        match self {
            Segment::Key(k) => Cow::Borrowed(k.as_str()),
            Segment::Index(i) => Cow::Owned(i.to_string()),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl TryFrom<&Value> for Segment {
    type Error = PathError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Segment::Key(s.clone())),
            Value::Number(n) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(Segment::Index)
                .ok_or_else(|| PathError::InvalidIndex(n.to_string())),
            other => Err(PathError::InvalidSegment(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Segment::try_from(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(&crate::locator::quote_key(k)),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_index() {
        assert_eq!(Segment::index(3).array_index(), Some(3));
        assert_eq!(Segment::key("3").array_index(), Some(3));
        assert_eq!(Segment::key("03").array_index(), None);
        assert_eq!(Segment::key("a").array_index(), None);
    }

    #[test]
    fn test_object_key() {
        assert_eq!(Segment::key("a").object_key(), "a");
        assert_eq!(Segment::index(7).object_key(), "7");
    }

    #[test]
    fn test_segment_from_json() {
        assert_eq!(Segment::try_from(&json!("a")).unwrap(), Segment::key("a"));
        assert_eq!(Segment::try_from(&json!(2)).unwrap(), Segment::index(2));
        assert!(matches!(
            Segment::try_from(&json!(-1)),
            Err(PathError::InvalidIndex(_))
        ));
        assert!(matches!(
            Segment::try_from(&json!(1.5)),
            Err(PathError::InvalidIndex(_))
        ));
        assert!(matches!(
            Segment::try_from(&json!(true)),
            Err(PathError::InvalidSegment(_))
        ));
    }

    #[test]
    fn test_path_serde() {
        let path: Path = serde_json::from_str(r#"["a", 0, "b"]"#).unwrap();
        assert_eq!(
            path,
            vec![Segment::key("a"), Segment::index(0), Segment::key("b")]
        );
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"["a",0,"b"]"#);

        let bad: Result<Path, _> = serde_json::from_str(r#"["a", -1]"#);
        assert!(bad.is_err());
    }
}
