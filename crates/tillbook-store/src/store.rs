//! # Store Configuration & Facade
//!
//! [`Store`] wires a storage backend, the document store, the operation
//! facades and the preference accessors into one handle the embedding
//! shell passes around.
//!
//! ## Usage
//! ```rust
//! use tillbook_store::{Store, StoreConfig};
//! use tillbook_core::patch::ClientPatch;
//!
//! let store = Store::open(StoreConfig::in_memory()).unwrap();
//!
//! let created = store
//!     .clients()
//!     .upsert(ClientPatch {
//!         name: Some("Acme Corp".into()),
//!         ..Default::default()
//!     })
//!     .unwrap()
//!     .unwrap();
//! assert!(created.id.starts_with('c'));
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use tillbook_core::reports::{self, DashboardStats};
use tillbook_core::seed::seed_document;
use tillbook_core::types::Document;

use crate::document::DocumentStore;
use crate::error::StoreResult;
use crate::ops::{ClientOps, ExpenseOps, OrderOps, ProductOps};
use crate::prefs::Preferences;
use crate::storage::{shared, DirStorage, MemoryStorage, SharedStorage};

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/data").seed(custom_document);
/// let store = Store::open(config)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Directory the key-value files live in. `None` keeps everything in
    /// memory (tests, ephemeral sessions).
    pub root: Option<PathBuf>,

    /// Document a fresh or wiped installation starts from. Defaults to
    /// the built-in starter document.
    pub seed: Option<Document>,
}

impl StoreConfig {
    /// Creates a configuration persisting under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StoreConfig {
            root: Some(root.into()),
            seed: None,
        }
    }

    /// Creates an in-memory configuration (for testing).
    pub fn in_memory() -> Self {
        StoreConfig::default()
    }

    /// Overrides the seed document.
    pub fn seed(mut self, document: Document) -> Self {
        self.seed = Some(document);
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing operation and preference access.
#[derive(Clone)]
pub struct Store {
    documents: Arc<DocumentStore>,
    storage: SharedStorage,
}

impl Store {
    /// Opens the store.
    ///
    /// ## What This Does
    /// 1. Builds the storage backend (directory-backed or in-memory)
    /// 2. Loads the persisted document, falling back to the seed
    /// 3. Writes the resolved document back so the backend is current
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let storage: SharedStorage = match &config.root {
            Some(root) => {
                info!(root = %root.display(), "Opening directory-backed store");
                shared(DirStorage::new(root.clone()))
            }
            None => {
                info!("Opening in-memory store");
                shared(MemoryStorage::new())
            }
        };

        let fallback = config.seed.unwrap_or_else(|| seed_document(Utc::now()));
        let documents = Arc::new(DocumentStore::open(Arc::clone(&storage), fallback)?);

        Ok(Store { documents, storage })
    }

    /// The underlying document store (snapshot, subscribe, export/import,
    /// reset).
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Client operations.
    pub fn clients(&self) -> ClientOps {
        ClientOps::new(Arc::clone(&self.documents))
    }

    /// Product operations.
    pub fn products(&self) -> ProductOps {
        ProductOps::new(Arc::clone(&self.documents))
    }

    /// Order operations.
    pub fn orders(&self) -> OrderOps {
        OrderOps::new(Arc::clone(&self.documents))
    }

    /// Expense operations.
    pub fn expenses(&self) -> ExpenseOps {
        ExpenseOps::new(Arc::clone(&self.documents))
    }

    /// Preference accessors (tab, privacy mode, auth flag, theme).
    pub fn prefs(&self) -> Preferences {
        Preferences::new(Arc::clone(&self.storage))
    }

    /// Dashboard headline figures derived from the current snapshot
    /// against the current clock. Recomputed in full on every call.
    pub fn dashboard(&self) -> DashboardStats {
        reports::dashboard_stats(&self.documents.snapshot(), Utc::now())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
