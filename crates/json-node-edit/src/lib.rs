//! json-node-edit: edit one node of a large JSON document by path.
//!
//! The pieces, leaves first:
//!
//! - [`coerce`] turns a line of text into a typed scalar.
//! - [`normalize`] rebuilds display text from a node's rows.
//! - [`mutate`] / [`set_at_path`] write a value through a path, creating
//!   missing containers, and re-serialize canonically.
//! - [`Document`] owns the canonical text, commits mutations atomically and
//!   propagates every commit to [`DocumentSink`]s.
//!
//! # Example
//!
//! ```
//! use json_node_edit::{Document, EditOptions};
//! use json_node_path::Segment;
//! use serde_json::json;
//!
//! let mut doc = Document::new(EditOptions::default());
//! doc.load(r#"{"user": {"name": "Ada"}}"#);
//!
//! let path = vec![Segment::key("user"), Segment::key("langs"), Segment::index(0)];
//! let commit = doc.apply_raw(&path, "rust", 1).unwrap();
//!
//! assert!(commit.report.is_clean());
//! assert_eq!(doc.get(&path).unwrap(), Some(json!("rust")));
//! ```

pub mod canonical;
pub mod cli;
pub mod coerce;
pub mod document;
pub mod edit;
pub mod error;
pub mod mutate;
pub mod options;
pub mod rows;
pub mod sync;

pub use coerce::coerce;
pub use document::{Commit, Document};
pub use edit::{can_edit, resolve_value, EditSeed, EditorKind};
pub use error::{value_type_name, EditError, SyncError};
pub use mutate::{mutate, mutate_with_indent, set_at_path, NewValue};
pub use options::{EditOptions, FileFormat};
pub use rows::{normalize, normalize_with_indent, NodeRow, RowType};
pub use sync::{DocumentSink, FileState, SessionStore, SyncEvent, SyncReport};

pub use json_node_path::{format_locator, Path, Segment};
