//! # Store Error Types
//!
//! Error types for the document store layer.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Operations Fail                                  │
//! │                                                                         │
//! │  silent no-op        upsert-by-id on a missing id, mark-paid on a      │
//! │                      missing order → Ok(None), never an error          │
//! │                                                                         │
//! │  recoverable input   malformed import JSON → StoreError::Import,       │
//! │                      prior document retained byte-for-byte             │
//! │                                                                         │
//! │  soft warning        stock shortages → plain data from                 │
//! │                      tillbook_core::accounting, not an error           │
//! │                                                                         │
//! │  storage failure     unreadable/unwritable backend → StoreError        │
//! │                                                                         │
//! │  Nothing is retried: every operation is synchronous local computation. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Imported JSON text failed to parse. The live document is untouched.
    #[error("import failed: {0}")]
    Import(serde_json::Error),

    /// The live document failed to serialize for persistence.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The storage backend failed to read or write a key.
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
