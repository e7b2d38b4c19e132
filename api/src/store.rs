use crate::scoreboard::Scoreboard;
use crate::summary::Summary;
use serde_json::{Map, Value};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Scoreboard,
    Summary,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Scoreboard => "scoreboard",
            DocumentKind::Summary => "summary",
        }
    }
}

/// A stored document and the request key (date or event id) it was fetched
/// for, when known.
#[derive(Debug)]
struct Entry {
    key: Option<String>,
    doc: Arc<Value>,
}

type Slot = RwLock<Option<Entry>>;

/// The two most recently fetched documents, one per kind.
///
/// Created once at startup and shared behind an `Arc`. The fetch side swaps a
/// whole document in or out; readers take an `Arc` snapshot and never hold the
/// lock while extracting, so a later overwrite cannot change a view already
/// handed out.
#[derive(Debug, Default)]
pub struct DocumentStore {
    scoreboard: Slot,
    summary: Slot,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, kind: DocumentKind, doc: Option<Value>) {
        self.store_entry(kind, None, doc);
    }

    /// Like [`set`](Self::set), remembering the key the document belongs to.
    pub fn set_fetched(&self, kind: DocumentKind, key: &str, doc: Option<Value>) {
        self.store_entry(kind, Some(key.to_owned()), doc);
    }

    pub fn set_scoreboard(&self, doc: Option<Value>) {
        self.set(DocumentKind::Scoreboard, doc);
    }

    pub fn set_summary(&self, doc: Option<Value>) {
        self.set(DocumentKind::Summary, doc);
    }

    pub fn is_present(&self, kind: DocumentKind) -> bool {
        self.slot(kind)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Key of the document currently held, if it was stored with one.
    pub fn key(&self, kind: DocumentKind) -> Option<String> {
        self.slot(kind)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|entry| entry.key.clone())
    }

    /// Whether the summary slot holds the document fetched for `event_id`.
    pub fn holds_summary_for(&self, event_id: &str) -> bool {
        self.key(DocumentKind::Summary).as_deref() == Some(event_id)
    }

    /// Snapshot of the current document. Absent slots and non-object documents
    /// both read as an empty object.
    pub fn current(&self, kind: DocumentKind) -> Arc<Value> {
        let snapshot = self
            .slot(kind)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|entry| entry.doc.clone());
        match snapshot {
            Some(doc) if doc.is_object() => doc,
            _ => Arc::new(Value::Object(Map::new())),
        }
    }

    pub fn current_scoreboard(&self) -> Arc<Value> {
        self.current(DocumentKind::Scoreboard)
    }

    pub fn current_summary(&self) -> Arc<Value> {
        self.current(DocumentKind::Summary)
    }

    /// Extractor view over the current scoreboard snapshot.
    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::new(self.current_scoreboard())
    }

    /// Extractor view over the current summary snapshot.
    pub fn summary(&self) -> Summary {
        Summary::new(self.current_summary())
    }

    fn store_entry(&self, kind: DocumentKind, key: Option<String>, doc: Option<Value>) {
        let mut slot = self.slot(kind).write().unwrap_or_else(PoisonError::into_inner);
        *slot = doc.map(|doc| Entry { key, doc: Arc::new(doc) });
    }

    fn slot(&self, kind: DocumentKind) -> &Slot {
        match kind {
            DocumentKind::Scoreboard => &self.scoreboard,
            DocumentKind::Summary => &self.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_slots_read_as_empty_objects() {
        let store = DocumentStore::new();
        assert!(!store.is_present(DocumentKind::Scoreboard));
        assert_eq!(*store.current_scoreboard(), json!({}));
        assert_eq!(*store.current_summary(), json!({}));
    }

    #[test]
    fn set_then_clear_follows_fetch_lifecycle() {
        let store = DocumentStore::new();
        store.set_scoreboard(Some(json!({"events": []})));
        assert!(store.is_present(DocumentKind::Scoreboard));
        assert_eq!(*store.current_scoreboard(), json!({"events": []}));

        store.set_scoreboard(None);
        assert!(!store.is_present(DocumentKind::Scoreboard));
        assert_eq!(*store.current_scoreboard(), json!({}));
    }

    #[test]
    fn slots_are_independent() {
        let store = DocumentStore::new();
        store.set_summary(Some(json!({"header": {}})));
        assert!(!store.is_present(DocumentKind::Scoreboard));
        assert_eq!(*store.current_summary(), json!({"header": {}}));
    }

    #[test]
    fn malformed_document_reads_as_empty_object() {
        let store = DocumentStore::new();
        store.set_summary(Some(json!([1, 2, 3])));
        assert!(store.is_present(DocumentKind::Summary));
        assert_eq!(*store.current_summary(), json!({}));
    }

    #[test]
    fn fetched_documents_remember_their_key() {
        let store = DocumentStore::new();
        store.set_fetched(DocumentKind::Summary, "401585567", Some(json!({"header": {}})));
        assert_eq!(store.key(DocumentKind::Summary).as_deref(), Some("401585567"));
        assert!(store.holds_summary_for("401585567"));
        assert!(!store.holds_summary_for("401585568"));

        store.set_summary(Some(json!({})));
        assert_eq!(store.key(DocumentKind::Summary), None);

        store.set_fetched(DocumentKind::Summary, "401585567", None);
        assert!(!store.is_present(DocumentKind::Summary));
        assert!(!store.holds_summary_for("401585567"));
    }

    #[test]
    fn snapshot_survives_later_overwrite() {
        let store = DocumentStore::new();
        store.set_scoreboard(Some(json!({"day": 1})));
        let before = store.current_scoreboard();
        store.set_scoreboard(Some(json!({"day": 2})));
        assert_eq!(*before, json!({"day": 1}));
        assert_eq!(*store.current_scoreboard(), json!({"day": 2}));
    }
}
