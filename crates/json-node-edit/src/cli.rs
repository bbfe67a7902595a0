//! Command-line helpers behind the `json-edit` and `json-locate` binaries.
//!
//! - `json-edit`: write a value at a path of the document read from stdin
//! - `json-locate`: print the value at a path of the document read from stdin

use json_node_path::{parse_path, PathError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::canonical::{parse_document, to_canonical_text};
use crate::{Document, EditError, EditOptions};

/// Environment variable naming a TOML file with [`EditOptions`].
pub const CONFIG_ENV: &str = "JSON_NODE_EDIT_CONFIG";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Edit(#[from] EditError),
    #[error("invalid path: {0}")]
    Path(#[from] PathError),
    #[error("NOT_FOUND")]
    NotFound,
    #[error("invalid row count: {0}")]
    RowCount(String),
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

// ── Setup ─────────────────────────────────────────────────────────────────

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Options from the file named by [`CONFIG_ENV`], or defaults when unset.
pub fn load_options() -> Result<EditOptions, CliError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            Ok(EditOptions::from_toml_str(&text)?)
        }
        None => Ok(EditOptions::default()),
    }
}

/// Parse the optional row-count argument. Defaults to one row.
pub fn parse_row_count(arg: Option<&str>) -> Result<usize, CliError> {
    match arg {
        None => Ok(1),
        Some(s) => s.trim().parse().map_err(|_| CliError::RowCount(s.to_string())),
    }
}

// ── json-edit ─────────────────────────────────────────────────────────────

/// Write `raw` at `path` of `doc_json` and return the new canonical text.
///
/// `path` is a JSON array (`["a",0]`) or a locator (`$["a"][0]`). `raw` is
/// resolved like saved editor text for a node with `row_count` rows.
pub fn edit_document(
    doc_json: &str,
    path: &str,
    raw: &str,
    row_count: usize,
    options: &EditOptions,
) -> Result<String, CliError> {
    let path = parse_path(path)?;
    let mut doc = Document::new(options.clone());
    doc.load(doc_json);
    let commit = doc.apply_raw(&path, raw, row_count)?;
    Ok(commit.text)
}

// ── json-locate ───────────────────────────────────────────────────────────

/// Look up `path` in `doc_json` and return the value as canonical text.
pub fn lookup_path(doc_json: &str, path: &str, options: &EditOptions) -> Result<String, CliError> {
    let path = parse_path(path)?;
    let doc = parse_document(doc_json)?;
    let value = json_node_path::get(&doc, &path).ok_or(CliError::NotFound)?;
    Ok(to_canonical_text(value, options.indent)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────
