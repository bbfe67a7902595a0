//! Validation functions for node paths.

use crate::{PathError, Segment};

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

/// Validate a path before it is used to address a document.
///
/// # Errors
///
/// Returns [`PathError::PathTooLong`] if the path exceeds 256 segments.
///
/// # Example
///
/// ```
/// use json_node_path::{validate_path, Segment};
///
/// validate_path(&[Segment::key("foo"), Segment::index(0)]).unwrap();
/// validate_path(&(0..300).map(Segment::index).collect::<Vec<_>>()).unwrap_err();
/// ```
pub fn validate_path(path: &[Segment]) -> Result<(), PathError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(PathError::PathTooLong(path.len()));
    }
    Ok(())
}

/// Check if a string represents a valid non-negative integer array index.
///
/// # Example
///
/// ```
/// use json_node_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("1.5"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_short_path() {
        let path = vec![Segment::key("foo"), Segment::key("bar")];
        assert!(validate_path(&path).is_ok());
    }

    #[test]
    fn test_validate_long_path() {
        let path: Vec<Segment> = (0..300).map(Segment::index).collect();
        assert_eq!(validate_path(&path), Err(PathError::PathTooLong(300)));
    }

    #[test]
    fn test_validate_max_length_path() {
        let path: Vec<Segment> = (0..256).map(Segment::index).collect();
        assert!(validate_path(&path).is_ok());
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("123"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index("abc"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("01")); // Leading zero not allowed
    }
}
