//! The owned, versioned document and its single write path.
//!
//! Every read of the canonical text goes through [`Document::text`] and every
//! write through [`Document::load`], [`Document::apply`] or [`Document::clear`].
//! A write either commits a complete new text and bumps the generation, or
//! leaves text and generation exactly as they were.

use std::fmt;
use std::rc::Rc;

use json_node_path::{format_locator, Segment};
use serde_json::Value;

use crate::canonical::parse_document;
use crate::edit::resolve_value;
use crate::mutate::{mutate_with_indent, NewValue};
use crate::options::{EditOptions, FileFormat};
use crate::sync::{DocumentSink, SyncEvent, SyncReport};
use crate::{EditError, SyncError};

/// Text of a freshly created document.
pub const INITIAL_TEXT: &str = "{}";

/// Result of a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// New canonical text, identical to [`Document::text`] after the call.
    pub text: String,
    pub generation: u64,
    /// Propagation outcome. A failed sink does not undo the commit.
    pub report: SyncReport,
}

pub struct Document {
    text: String,
    generation: u64,
    dirty: bool,
    cleared: bool,
    options: EditOptions,
    sinks: Vec<Rc<dyn DocumentSink>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sinks: Vec<&str> = self.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("Document")
            .field("generation", &self.generation)
            .field("dirty", &self.dirty)
            .field("cleared", &self.cleared)
            .field("len", &self.text.len())
            .field("options", &self.options)
            .field("sinks", &sinks)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new(EditOptions::default())
    }
}

impl Document {
    pub fn new(options: EditOptions) -> Self {
        Document {
            text: INITIAL_TEXT.to_string(),
            generation: 0,
            dirty: false,
            cleared: false,
            options,
            sinks: Vec::new(),
        }
    }

    /// Register a sink; it receives every later event in registration order.
    pub fn add_sink(&mut self, sink: Rc<dyn DocumentSink>) {
        self.sinks.push(sink);
    }

    pub fn with_sink(mut self, sink: Rc<dyn DocumentSink>) -> Self {
        self.add_sink(sink);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a mutation happened since the last load, clear or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the last write was [`Document::clear`]. Loaded text equal to the
    /// empty marker is a real document, not a cleared one.
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn format(&self) -> FileFormat {
        self.options.format
    }

    pub fn set_format(&mut self, format: FileFormat) {
        self.options.format = format;
    }

    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Current text deserialized into a tree.
    pub fn value(&self) -> Result<Value, EditError> {
        parse_document(self.base_text())
    }

    /// Current value at `path`, if present.
    pub fn get(&self, path: &[Segment]) -> Result<Option<Value>, EditError> {
        let tree = self.value()?;
        Ok(json_node_path::get(&tree, path).cloned())
    }

    /// Install text produced by the loader. The text is taken as-is.
    pub fn load(&mut self, text: impl Into<String>) -> SyncReport {
        self.text = text.into();
        self.generation += 1;
        self.dirty = false;
        self.cleared = false;
        tracing::debug!(generation = self.generation, len = self.text.len(), "document loaded");
        self.propagate(&SyncEvent::Loaded {
            text: &self.text,
            generation: self.generation,
            format: self.options.format,
        })
    }

    /// Write `value` at `path` and commit the new canonical text.
    ///
    /// On error nothing changes and no sink is called.
    pub fn apply(
        &mut self,
        path: &[Segment],
        value: impl Into<NewValue>,
    ) -> Result<Commit, EditError> {
        let next = match mutate_with_indent(self.base_text(), path, value, self.options.indent) {
            Ok(text) => text,
            Err(e) => {
                if e.is_malformed_document() {
                    tracing::error!(
                        generation = self.generation,
                        locator = %format_locator(path),
                        error = %e,
                        "current document does not parse, edit rejected"
                    );
                } else {
                    tracing::debug!(locator = %format_locator(path), error = %e, "edit rejected");
                }
                return Err(e);
            }
        };

        self.text = next;
        self.generation += 1;
        self.dirty = true;
        self.cleared = false;
        tracing::debug!(
            generation = self.generation,
            locator = %format_locator(path),
            "edit committed"
        );

        let report = self.propagate(&SyncEvent::Committed {
            text: &self.text,
            generation: self.generation,
            format: self.options.format,
        });
        Ok(Commit {
            text: self.text.clone(),
            generation: self.generation,
            report,
        })
    }

    /// Resolve saved editor text (see [`resolve_value`]) and apply it.
    ///
    /// The document is checked before the literal, so a broken document is
    /// reported as `MalformedDocument` even when the literal is broken too.
    pub fn apply_raw(
        &mut self,
        path: &[Segment],
        raw: &str,
        row_count: usize,
    ) -> Result<Commit, EditError> {
        if crate::edit::requires_literal(raw, row_count) {
            return self.apply(path, NewValue::Literal(raw.to_string()));
        }
        let value = resolve_value(raw, row_count)?;
        self.apply(path, value)
    }

    /// Reset to the empty marker and tell sinks to drop their structure.
    pub fn clear(&mut self) -> SyncReport {
        self.text = self.options.empty_marker.clone();
        self.generation += 1;
        self.dirty = false;
        self.cleared = true;
        tracing::debug!(generation = self.generation, "document cleared");
        self.propagate(&SyncEvent::Cleared {
            generation: self.generation,
        })
    }

    /// A cleared document mutates as if it were empty.
    fn base_text(&self) -> &str {
        if self.cleared {
            ""
        } else {
            &self.text
        }
    }

    fn propagate(&self, event: &SyncEvent<'_>) -> SyncReport {
        let mut report = SyncReport {
            generation: event.generation(),
            failures: Vec::new(),
        };
        for sink in &self.sinks {
            tracing::trace!(sink = sink.name(), generation = event.generation(), "propagating");
            if let Err(e) = sink.on_event(event) {
                tracing::warn!(sink = sink.name(), error = %e, "sink failed to take document");
                report.failures.push(SyncError::new(sink.name(), e.to_string()));
            }
        }
        report
    }
}
