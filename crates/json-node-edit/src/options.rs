//! Editor configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Spaces per nesting level in canonical text.
pub const DEFAULT_INDENT: usize = 2;

/// Source format of the loaded file. Carried alongside the canonical text so
/// session caches can restore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Json,
    Yaml,
    Toml,
    Xml,
    Csv,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Toml => "toml",
            FileFormat::Xml => "xml",
            FileFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "toml" => Ok(FileFormat::Toml),
            "xml" => Ok(FileFormat::Xml),
            "csv" => Ok(FileFormat::Csv),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

/// Options controlling canonical serialization and document bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditOptions {
    /// Spaces per indentation level. `0` produces compact text.
    pub indent: usize,
    /// Format tag reported to sinks.
    pub format: FileFormat,
    /// Text a cleared document holds.
    pub empty_marker: String,
}

impl Default for EditOptions {
    fn default() -> Self {
        EditOptions {
            indent: DEFAULT_INDENT,
            format: FileFormat::Json,
            empty_marker: String::new(),
        }
    }
}

impl EditOptions {
    /// Load options from TOML. Missing keys keep their defaults.
    ///
    /// ```
    /// use json_node_edit::{EditOptions, FileFormat};
    ///
    /// let opts = EditOptions::from_toml_str("indent = 4\nformat = \"yaml\"").unwrap();
    /// assert_eq!(opts.indent, 4);
    /// assert_eq!(opts.format, FileFormat::Yaml);
    /// assert_eq!(opts.empty_marker, "");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = EditOptions::default();
        assert_eq!(opts.indent, 2);
        assert_eq!(opts.format, FileFormat::Json);
        assert!(opts.empty_marker.is_empty());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EditOptions::from_toml_str("").unwrap(), EditOptions::default());
    }

    #[test]
    fn unknown_format_in_toml_is_rejected() {
        assert!(EditOptions::from_toml_str("format = \"ini\"").is_err());
    }

    #[test]
    fn format_from_str() {
        assert_eq!("YML".parse::<FileFormat>(), Ok(FileFormat::Yaml));
        assert_eq!("csv".parse::<FileFormat>(), Ok(FileFormat::Csv));
        assert!("ini".parse::<FileFormat>().is_err());
        assert_eq!(FileFormat::Toml.to_string(), "toml");
    }
}
