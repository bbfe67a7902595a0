//! Propagation of committed document text to downstream consumers.
//!
//! Sinks run after a mutation is committed. A failing sink is reported in the
//! [`SyncReport`] and does not undo the mutation or stop the other sinks.

use std::cell::RefCell;
use std::error::Error as StdError;

use indexmap::IndexMap;

use crate::options::FileFormat;
use crate::SyncError;

/// Error type sinks return; the document wraps it into a [`SyncError`].
pub type SinkError = Box<dyn StdError + Send + Sync>;

/// What happened to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent<'a> {
    /// Text installed by the loader.
    Loaded {
        text: &'a str,
        generation: u64,
        format: FileFormat,
    },
    /// Text produced by a successful mutation.
    Committed {
        text: &'a str,
        generation: u64,
        format: FileFormat,
    },
    /// The document was reset to its empty marker. Visual structure should be discarded.
    Cleared { generation: u64 },
}

impl SyncEvent<'_> {
    pub fn generation(&self) -> u64 {
        match self {
            SyncEvent::Loaded { generation, .. }
            | SyncEvent::Committed { generation, .. }
            | SyncEvent::Cleared { generation } => *generation,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            SyncEvent::Loaded { text, .. } | SyncEvent::Committed { text, .. } => Some(text),
            SyncEvent::Cleared { .. } => None,
        }
    }
}

/// A downstream consumer of the canonical text (graph view, persistence, session cache).
///
/// Sinks are shared between the document and their owners, so they take
/// `&self` and keep their own state behind interior mutability.
pub trait DocumentSink {
    fn name(&self) -> &str;

    fn on_event(&self, event: &SyncEvent<'_>) -> Result<(), SinkError>;
}

/// Outcome of propagating one event to every sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub generation: u64,
    pub failures: Vec<SyncError>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, sink: &str) -> bool {
        self.failures.iter().any(|f| f.sink == sink)
    }
}

// ── File state ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSnapshot {
    pub contents: String,
    pub has_changes: bool,
    pub format: FileFormat,
}

/// Persistence layer view of the open file: its contents and an unsaved-changes flag.
#[derive(Debug, Default)]
pub struct FileState {
    inner: RefCell<FileSnapshot>,
}

impl FileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FileSnapshot {
        self.inner.borrow().clone()
    }

    pub fn contents(&self) -> String {
        self.inner.borrow().contents.clone()
    }

    pub fn has_changes(&self) -> bool {
        self.inner.borrow().has_changes
    }

    /// Mark the current contents as saved.
    pub fn mark_saved(&self) {
        self.inner.borrow_mut().has_changes = false;
    }
}

impl DocumentSink for FileState {
    fn name(&self) -> &str {
        "file"
    }

    fn on_event(&self, event: &SyncEvent<'_>) -> Result<(), SinkError> {
        let mut file = self.inner.borrow_mut();
        match *event {
            SyncEvent::Loaded { text, format, .. } => {
                file.contents = text.to_string();
                file.has_changes = false;
                file.format = format;
            }
            SyncEvent::Committed { text, format, .. } => {
                file.contents = text.to_string();
                file.has_changes = true;
                file.format = format;
            }
            SyncEvent::Cleared { .. } => {}
        }
        Ok(())
    }
}

// ── Session store ─────────────────────────────────────────────────────────

pub const SESSION_CONTENT_KEY: &str = "content";
pub const SESSION_FORMAT_KEY: &str = "format";

/// Lightweight key/value session cache holding the latest committed text and its format.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RefCell<IndexMap<String, String>>,
    quota: Option<usize>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes once stored bytes would exceed `quota`.
    pub fn with_quota(quota: usize) -> Self {
        SessionStore {
            entries: RefCell::default(),
            quota: Some(quota),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Store `value` under `key`, enforcing the quota.
    pub fn set(&self, key: &str, value: &str) -> Result<(), SinkError> {
        self.set_all(&[(key, value)])
    }

    /// Store every pair or none of them. The quota is checked against the
    /// state after all writes, before the first one lands.
    pub fn set_all(&self, pairs: &[(&str, &str)]) -> Result<(), SinkError> {
        let mut entries = self.entries.borrow_mut();
        if let Some(quota) = self.quota {
            let kept: usize = entries
                .iter()
                .filter(|(k, _)| !pairs.iter().any(|(key, _)| key == k))
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = kept + pairs.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>();
            if needed > quota {
                return Err(format!("quota exceeded: {needed} > {quota} bytes").into());
            }
        }
        for (key, value) in pairs {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

impl DocumentSink for SessionStore {
    fn name(&self) -> &str {
        "session"
    }

    fn on_event(&self, event: &SyncEvent<'_>) -> Result<(), SinkError> {
        if let SyncEvent::Committed { text, format, .. } = *event {
            self.set_all(&[(SESSION_CONTENT_KEY, text), (SESSION_FORMAT_KEY, format.as_str())])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed(text: &str) -> SyncEvent<'_> {
        SyncEvent::Committed {
            text,
            generation: 2,
            format: FileFormat::Json,
        }
    }

    #[test]
    fn event_accessors() {
        assert_eq!(committed("{}").text(), Some("{}"));
        assert_eq!(committed("{}").generation(), 2);
        assert_eq!(SyncEvent::Cleared { generation: 9 }.text(), None);
    }

    #[test]
    fn file_state_tracks_changes() {
        let file = FileState::new();
        file.on_event(&SyncEvent::Loaded {
            text: "{}",
            generation: 1,
            format: FileFormat::Yaml,
        })
        .unwrap();
        assert!(!file.has_changes());
        assert_eq!(file.snapshot().format, FileFormat::Yaml);

        file.on_event(&committed("{\"a\": 1}")).unwrap();
        assert!(file.has_changes());
        assert_eq!(file.contents(), "{\"a\": 1}");

        file.mark_saved();
        assert!(!file.has_changes());

        file.on_event(&SyncEvent::Cleared { generation: 3 }).unwrap();
        assert_eq!(file.contents(), "{\"a\": 1}");
    }

    #[test]
    fn session_store_keeps_content_and_format() {
        let session = SessionStore::new();
        session.on_event(&committed("[1]")).unwrap();
        assert_eq!(session.get(SESSION_CONTENT_KEY).as_deref(), Some("[1]"));
        assert_eq!(session.get(SESSION_FORMAT_KEY).as_deref(), Some("json"));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn session_store_ignores_loads() {
        let session = SessionStore::new();
        session
            .on_event(&SyncEvent::Loaded {
                text: "{}",
                generation: 1,
                format: FileFormat::Json,
            })
            .unwrap();
        assert!(session.is_empty());
    }

    #[test]
    fn session_quota() {
        let session = SessionStore::with_quota(16);
        session.set("content", "12345").unwrap();
        // replacing a key only counts the new value
        session.set("content", "123456789").unwrap();
        let err = session.set("content", "1234567890").unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(session.get("content").as_deref(), Some("123456789"));
    }

    #[test]
    fn session_commit_is_all_or_nothing() {
        // "content" + "[1]" fits (10 bytes), "format" + "json" does not (10 more).
        let session = SessionStore::with_quota(15);
        assert!(session.on_event(&committed("[1]")).is_err());
        assert!(session.is_empty());

        // Old pair stays intact when the next commit overflows.
        let session = SessionStore::with_quota(30);
        session.on_event(&committed("[1]")).unwrap();
        assert!(session.on_event(&committed("[1, 2, 3, 4, 5, 6]")).is_err());
        assert_eq!(session.get(SESSION_CONTENT_KEY).as_deref(), Some("[1]"));
        assert_eq!(session.get(SESSION_FORMAT_KEY).as_deref(), Some("json"));
    }

    #[test]
    fn report_lookup() {
        let report = SyncReport {
            generation: 4,
            failures: vec![SyncError::new("session", "full")],
        };
        assert!(!report.is_clean());
        assert!(report.failed("session"));
        assert!(!report.failed("file"));
    }
}
