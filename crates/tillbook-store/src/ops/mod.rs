//! # Operations Module
//!
//! Per-entity operation facades over the document store.
//!
//! ## Operation Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Upsert Pattern Explained                             │
//! │                                                                         │
//! │  UI action                                                              │
//! │       │                                                                 │
//! │       │  store.orders().upsert(patch)                                   │
//! │       ▼                                                                 │
//! │  OrderOps                                                               │
//! │  ├── patch without id → allocate id/code, fill defaults, insert        │
//! │  ├── patch with id    → shallow-merge over the existing record         │
//! │  └── id not found     → silent no-op, returns Ok(None)                 │
//! │       │                                                                 │
//! │       │  one read-modify-write micro-transaction                        │
//! │       ▼                                                                 │
//! │  DocumentStore (replace + persist + notify)                             │
//! │                                                                         │
//! │  All merge/default/accounting semantics live in tillbook-core;          │
//! │  this layer supplies the clock and the transaction boundary.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Operations
//!
//! - [`ClientOps`] - client create-or-update
//! - [`ProductOps`] - product create-or-update, stock adjustment
//! - [`OrderOps`] - order create-or-update, mark-paid
//! - [`ExpenseOps`] - expense creation (add-only)

pub mod client;
pub mod expense;
pub mod order;
pub mod product;

pub use client::ClientOps;
pub use expense::ExpenseOps;
pub use order::OrderOps;
pub use product::{ProductOps, StockAdjustment};
