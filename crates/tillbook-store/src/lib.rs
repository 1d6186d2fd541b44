//! # tillbook-store: Document Store Layer for Tillbook
//!
//! This crate owns the persisted state of the dashboard: the single
//! versioned document holding all four record collections, the key-value
//! backends it is persisted to, the per-entity upsert operations, and the
//! scalar preference keys beside it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tillbook Data Flow                               │
//! │                                                                         │
//! │  UI action (save order, adjust stock, import file)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tillbook-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Operations   │    │   Storage    │  │   │
//! │  │   │  (store.rs)   │    │  (ops/*.rs)   │    │ (storage.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ DocumentStore │◄───│ ClientOps     │    │ MemoryStorage│  │   │
//! │  │   │ Preferences   │    │ OrderOps ...  │    │ DirStorage   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One JSON value per key: the document under `tillbook.data`,           │
//! │  each preference under its own key                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Configuration and the main [`Store`] facade
//! - [`document`] - The document store: atomic replace, subscribe, export/import
//! - [`storage`] - Key-value backends (memory, directory)
//! - [`ops`] - Per-entity operation facades
//! - [`prefs`] - UI preference keys
//! - [`auth`] - The fixed-credential login gate
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use tillbook_store::{Store, StoreConfig};
//! use tillbook_core::patch::ClientPatch;
//!
//! let store = Store::open(StoreConfig::in_memory()).unwrap();
//!
//! // Upsert without id creates; with id patches; unknown id no-ops.
//! let client = store.clients().upsert(ClientPatch::default()).unwrap().unwrap();
//! assert_eq!(client.name, "New Client");
//!
//! // Aggregations are derived on demand from the live snapshot.
//! let stats = store.dashboard();
//! assert!(stats.sales_today.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod document;
pub mod error;
pub mod ops;
pub mod prefs;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{DocumentStore, SubscriptionId, DATA_KEY};
pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

// Operation re-exports for convenience
pub use ops::{ClientOps, ExpenseOps, OrderOps, ProductOps, StockAdjustment};
pub use prefs::Preferences;
pub use storage::{DirStorage, MemoryStorage, SharedStorage, Storage};
