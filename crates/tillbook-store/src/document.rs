//! # Document Store
//!
//! The single versioned document holding all four record collections.
//!
//! ## Mutation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Read-Modify-Write Micro-Transaction                     │
//! │                                                                         │
//! │  operation ──► snapshot() ──► deep copy                                │
//! │                                  │                                      │
//! │                           apply change                                  │
//! │                                  │                                      │
//! │                           replace(copy)                                 │
//! │                            │         │                                  │
//! │                       persist      swap wholesale                       │
//! │                                      │                                  │
//! │                               notify subscribers                        │
//! │                                                                         │
//! │  Observers never see a partially-updated document. There is exactly    │
//! │  one writer at a time by construction (synchronous execution on the    │
//! │  caller's turn), so no isolation protocol is needed beyond the swap.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no ambient global: callers hold the store instance and pass it
//! to whatever needs it.

use std::sync::Mutex;

use tracing::{debug, warn};

use tillbook_core::types::Document;

use crate::error::{StoreError, StoreResult};
use crate::storage::SharedStorage;

/// Storage key the document is persisted under.
pub const DATA_KEY: &str = "tillbook.data";

/// A change listener invoked after every successful replace.
///
/// Listeners receive the freshly-swapped document. They must not call
/// [`DocumentStore::subscribe`] or [`DocumentStore::unsubscribe`] from
/// inside the callback.
pub type Listener = Box<dyn Fn(&Document) + Send>;

/// Handle returned by [`DocumentStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Owner of the live document: atomic whole-document replace,
/// subscribe-on-change, JSON export/import, reset-to-seed.
pub struct DocumentStore {
    document: Mutex<Document>,
    fallback: Document,
    storage: SharedStorage,
    listeners: Mutex<ListenerTable>,
}

impl DocumentStore {
    /// Opens the store against a storage backend.
    ///
    /// Loads the persisted document from [`DATA_KEY`]; an absent or
    /// unreadable value falls back to `fallback` (which is also what
    /// [`reset`](Self::reset) later restores). The resolved document is
    /// written back immediately so the backend always holds current state.
    pub fn open(storage: SharedStorage, fallback: Document) -> StoreResult<Self> {
        let stored = storage
            .lock()
            .expect("storage mutex poisoned")
            .get(DATA_KEY)?;

        let document = match stored {
            Some(text) => match serde_json::from_str(&text) {
                Ok(document) => document,
                Err(err) => {
                    warn!(error = %err, "Stored document is unreadable, starting from the seed");
                    fallback.clone()
                }
            },
            None => fallback.clone(),
        };

        let store = DocumentStore {
            document: Mutex::new(document),
            fallback,
            storage,
            listeners: Mutex::new(ListenerTable::default()),
        };
        store.persist()?;
        Ok(store)
    }

    /// Returns a deep copy of the live document.
    pub fn snapshot(&self) -> Document {
        self.document
            .lock()
            .expect("document mutex poisoned")
            .clone()
    }

    /// Replaces the live document wholesale.
    ///
    /// Persists first: if the backend write fails, the in-memory document
    /// is left untouched and no subscriber fires.
    pub fn replace(&self, document: Document) -> StoreResult<()> {
        let json = serde_json::to_string(&document).map_err(StoreError::Encode)?;
        self.storage
            .lock()
            .expect("storage mutex poisoned")
            .set(DATA_KEY, &json)?;

        *self.document.lock().expect("document mutex poisoned") = document.clone();
        debug!(
            clients = document.clients.len(),
            products = document.products.len(),
            orders = document.orders.len(),
            expenses = document.expenses.len(),
            "Document replaced"
        );
        self.notify(&document);
        Ok(())
    }

    /// Runs one read-modify-write micro-transaction.
    ///
    /// `apply` receives a deep copy of the live document; whatever it
    /// leaves behind is replaced wholesale. The closure's return value is
    /// passed through, which is how upserts hand back the saved record.
    pub fn update<R>(&self, apply: impl FnOnce(&mut Document) -> R) -> StoreResult<R> {
        let mut copy = self.snapshot();
        let result = apply(&mut copy);
        self.replace(copy)?;
        Ok(result)
    }

    /// Registers a change listener; returns the handle to remove it.
    pub fn subscribe(&self, listener: impl Fn(&Document) + Send + 'static) -> SubscriptionId {
        let mut table = self.listeners.lock().expect("listener table poisoned");
        table.next_id += 1;
        let id = table.next_id;
        table.entries.push((id, Box::new(listener)));
        SubscriptionId(id)
    }

    /// Removes a listener. Returns whether it was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut table = self.listeners.lock().expect("listener table poisoned");
        let before = table.entries.len();
        table.entries.retain(|(entry_id, _)| *entry_id != id.0);
        table.entries.len() != before
    }

    fn notify(&self, document: &Document) {
        let table = self.listeners.lock().expect("listener table poisoned");
        for (_, listener) in &table.entries {
            listener(document);
        }
    }

    /// Serializes the live document as pretty-printed JSON for download.
    pub fn export_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(StoreError::Encode)
    }

    /// Parses `text` and replaces the document wholesale.
    ///
    /// Parse failure surfaces [`StoreError::Import`] and retains the prior
    /// document byte-for-byte. There is no partial import and no
    /// field-level validation beyond the document's shape.
    pub fn import_json(&self, text: &str) -> StoreResult<Document> {
        let document: Document = serde_json::from_str(text).map_err(StoreError::Import)?;
        self.replace(document.clone())?;
        Ok(document)
    }

    /// Replaces the document with the fixed fallback it was opened with.
    pub fn reset(&self) -> StoreResult<()> {
        debug!("Resetting document to seed state");
        self.replace(self.fallback.clone())
    }

    fn persist(&self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.snapshot()).map_err(StoreError::Encode)?;
        self.storage
            .lock()
            .expect("storage mutex poisoned")
            .set(DATA_KEY, &json)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tillbook_core::seed::seed_document;
    use tillbook_core::types::Client;

    use crate::storage::{shared, MemoryStorage};

    fn open_empty() -> DocumentStore {
        DocumentStore::open(shared(MemoryStorage::new()), Document::default()).unwrap()
    }

    #[test]
    fn test_open_falls_back_to_seed_when_empty() {
        let seed = seed_document(chrono::Utc::now());
        let store = DocumentStore::open(shared(MemoryStorage::new()), seed.clone()).unwrap();
        assert_eq!(store.snapshot(), seed);
    }

    #[test]
    fn test_open_falls_back_when_stored_data_is_corrupt() {
        let storage = shared(MemoryStorage::new());
        storage
            .lock()
            .unwrap()
            .set(DATA_KEY, "{ not json at all")
            .unwrap();

        let seed = seed_document(chrono::Utc::now());
        let store = DocumentStore::open(Arc::clone(&storage), seed.clone()).unwrap();
        assert_eq!(store.snapshot(), seed);

        // And the backend was rewritten with the resolved state
        let persisted = storage.lock().unwrap().get(DATA_KEY).unwrap().unwrap();
        let parsed: Document = serde_json::from_str(&persisted).unwrap();
        assert_eq!(parsed, seed);
    }

    #[test]
    fn test_snapshot_is_a_deep_copy() {
        let store = open_empty();
        let mut copy = store.snapshot();
        copy.clients.push(Client {
            id: "c1".to_string(),
            code: "C1".to_string(),
            name: "Acme Corp".to_string(),
        });
        assert!(store.snapshot().clients.is_empty());
    }

    #[test]
    fn test_replace_persists_and_notifies() {
        let storage = shared(MemoryStorage::new());
        let store = DocumentStore::open(Arc::clone(&storage), Document::default()).unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&fired);
        let id = store.subscribe(move |doc| {
            observed.fetch_add(doc.clients.len(), Ordering::SeqCst);
        });

        let mut next = Document::default();
        next.clients.push(Client {
            id: "c1".to_string(),
            code: "C1".to_string(),
            name: "Acme Corp".to_string(),
        });
        store.replace(next).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.replace(Document::default()).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        let persisted = storage.lock().unwrap().get(DATA_KEY).unwrap().unwrap();
        let parsed: Document = serde_json::from_str(&persisted).unwrap();
        assert!(parsed.clients.is_empty());
    }

    #[test]
    fn test_export_then_import_round_trips() {
        let store = DocumentStore::open(
            shared(MemoryStorage::new()),
            seed_document(chrono::Utc::now()),
        )
        .unwrap();

        let exported = store.export_json().unwrap();
        let before = store.snapshot();

        let imported = store.import_json(&exported).unwrap();
        assert_eq!(imported, before);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_failed_import_leaves_document_untouched() {
        let store = DocumentStore::open(
            shared(MemoryStorage::new()),
            seed_document(chrono::Utc::now()),
        )
        .unwrap();

        let before = store.export_json().unwrap();
        let err = store.import_json("{ \"clients\": [,] }").unwrap_err();
        assert!(matches!(err, StoreError::Import(_)));

        // Byte-for-byte unchanged
        assert_eq!(store.export_json().unwrap(), before);
    }

    #[test]
    fn test_reset_restores_the_fallback() {
        let seed = seed_document(chrono::Utc::now());
        let store = DocumentStore::open(shared(MemoryStorage::new()), seed.clone()).unwrap();

        store
            .update(|doc| {
                doc.clients.clear();
                doc.products.clear();
            })
            .unwrap();
        assert!(store.snapshot().clients.is_empty());

        store.reset().unwrap();
        assert_eq!(store.snapshot(), seed);
    }

    #[test]
    fn test_update_passes_through_the_result() {
        let store = open_empty();
        let count = store
            .update(|doc| {
                doc.clients.push(Client {
                    id: "c1".to_string(),
                    code: "C1".to_string(),
                    name: "Acme Corp".to_string(),
                });
                doc.clients.len()
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.snapshot().clients.len(), 1);
    }
}
