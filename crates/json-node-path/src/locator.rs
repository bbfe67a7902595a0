//! Locator strings: the `$["key"][0]` display form of a path.

use serde_json::Value;

use crate::validate::is_valid_index;
use crate::{Path, PathError, Segment};

/// Marker rendered for the document root.
pub const ROOT_MARKER: &str = "$";

/// Quote a key the way it appears inside a locator bracket.
pub(crate) fn quote_key(key: &str) -> String {
    Value::String(key.to_owned()).to_string()
}

/// Format a path as a locator string.
///
/// # Example
///
/// ```
/// use json_node_path::{format_locator, Segment};
///
/// assert_eq!(format_locator(&[]), "$");
/// assert_eq!(format_locator(&[Segment::key("a"), Segment::index(0)]), r#"$["a"][0]"#);
/// ```
pub fn format_locator(path: &[Segment]) -> String {
    let mut out = String::from(ROOT_MARKER);
    for segment in path {
        out.push('[');
        out.push_str(&segment.to_string());
        out.push(']');
    }
    out
}

/// Parse a locator string back into a path.
///
/// Accepts `$` followed by bracket selectors holding a quoted key (double or
/// single quotes) or a canonical non-negative index.
///
/// # Example
///
/// ```
/// use json_node_path::{parse_locator, Segment};
///
/// let path = parse_locator(r#"$["a"][0]"#).unwrap();
/// assert_eq!(path, vec![Segment::key("a"), Segment::index(0)]);
/// ```
pub fn parse_locator(input: &str) -> Result<Path, PathError> {
    LocatorParser { input, pos: 0 }.parse_path()
}

struct LocatorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl LocatorParser<'_> {
    fn parse_path(&mut self) -> Result<Path, PathError> {
        self.skip_whitespace();
        if self.peek() != Some('$') {
            return Err(PathError::ExpectedRoot);
        }
        self.advance();

        let mut path = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('[') => {
                    self.advance();
                    self.skip_whitespace();
                    let segment = self.parse_selector()?;
                    self.skip_whitespace();
                    self.expect(']')?;
                    path.push(segment);
                }
                Some(c) => return Err(PathError::UnexpectedChar(c)),
            }
        }
        Ok(path)
    }

    fn parse_selector(&mut self) -> Result<Segment, PathError> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string().map(Segment::Key),
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_index(),
            Some(c) => Err(PathError::UnexpectedChar(c)),
            None => Err(PathError::UnexpectedEnd),
        }
    }

    fn parse_index(&mut self) -> Result<Segment, PathError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '-' || c == '.' {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.input[start..self.pos];
        if !is_valid_index(text) {
            return Err(PathError::InvalidIndex(text.to_string()));
        }
        text.parse()
            .map(Segment::Index)
            .map_err(|_| PathError::InvalidIndex(text.to_string()))
    }

    fn parse_string(&mut self) -> Result<String, PathError> {
        let quote = self.peek().ok_or(PathError::UnexpectedEnd)?;
        self.advance();

        let mut result = String::new();
        loop {
            match self.peek() {
                None => return Err(PathError::UnclosedString),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('b') => result.push('\u{8}'),
                        Some('f') => result.push('\u{c}'),
                        Some('/') => result.push('/'),
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        Some('u') => {
                            result.push(self.parse_unicode_escape()?);
                            continue;
                        }
                        _ => return Err(PathError::InvalidEscape),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }
        Ok(result)
    }

    /// Parses the `XXXX` after `\u`, including a trailing low surrogate pair.
    fn parse_unicode_escape(&mut self) -> Result<char, PathError> {
        let high = self.parse_hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or(PathError::InvalidEscape);
        }
        if !self.input[self.pos..].starts_with("\\u") {
            return Err(PathError::InvalidEscape);
        }
        self.advance();
        let low = self.parse_hex4()?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(PathError::InvalidEscape);
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or(PathError::InvalidEscape)
    }

    /// Expects the cursor on the `u` of an escape; consumes it and four hex digits.
    fn parse_hex4(&mut self) -> Result<u32, PathError> {
        self.advance();
        let digits = self
            .input
            .get(self.pos..self.pos + 4)
            .ok_or(PathError::InvalidEscape)?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| PathError::InvalidEscape)?;
        self.pos += 4;
        Ok(code)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(PathError::UnexpectedChar(c)),
            None => Err(PathError::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_root() {
        assert_eq!(format_locator(&[]), "$");
    }

    #[test]
    fn test_format_mixed() {
        let path = vec![Segment::key("a"), Segment::index(0), Segment::key("b c")];
        assert_eq!(format_locator(&path), r#"$["a"][0]["b c"]"#);
    }

    #[test]
    fn test_format_numeric_key_is_quoted() {
        assert_eq!(format_locator(&[Segment::key("0")]), r#"$["0"]"#);
    }

    #[test]
    fn test_format_escapes_quotes() {
        assert_eq!(format_locator(&[Segment::key("say \"hi\"")]), r#"$["say \"hi\""]"#);
    }

    #[test]
    fn test_parse_root() {
        assert_eq!(parse_locator("$").unwrap(), Vec::<Segment>::new());
        assert_eq!(parse_locator("  $  ").unwrap(), Vec::<Segment>::new());
    }

    #[test]
    fn test_parse_single_quotes() {
        assert_eq!(
            parse_locator("$['a'][ 2 ]").unwrap(),
            vec![Segment::key("a"), Segment::index(2)]
        );
    }

    #[test]
    fn test_parse_unicode_escape() {
        assert_eq!(
            parse_locator(r#"$["caf\u00e9"]"#).unwrap(),
            vec![Segment::key("café")]
        );
        assert_eq!(
            parse_locator(r#"$["\ud83d\ude00"]"#).unwrap(),
            vec![Segment::key("😀")]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_locator("a"), Err(PathError::ExpectedRoot));
        assert_eq!(parse_locator("$.a"), Err(PathError::UnexpectedChar('.')));
        assert_eq!(parse_locator(r#"$["a"#), Err(PathError::UnclosedString));
        assert_eq!(parse_locator(r#"$["a""#), Err(PathError::UnexpectedEnd));
        assert_eq!(parse_locator(r#"$["\q"]"#), Err(PathError::InvalidEscape));
        assert_eq!(
            parse_locator("$[-1]"),
            Err(PathError::InvalidIndex("-1".to_string()))
        );
        assert_eq!(
            parse_locator("$[1.5]"),
            Err(PathError::InvalidIndex("1.5".to_string()))
        );
        assert_eq!(parse_locator("$[true]"), Err(PathError::UnexpectedChar('t')));
    }
}
