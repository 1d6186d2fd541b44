//! # tillbook-core: Pure Business Logic for Tillbook
//!
//! This crate is the **heart** of Tillbook, a local-first point-of-sale and
//! bookkeeping dashboard for a small business. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tillbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Display Layer (out of scope)                 │   │
//! │  │    Dashboard ──► Orders ──► Clients ──► Products ──► Reports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tillbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   money   │  │ accounting │  │ reports  │  │   │
//! │  │   │  Document │  │   Money   │  │  totals    │  │ rollups  │  │   │
//! │  │   │  Order    │  │  (cents)  │  │  status    │  │ buckets  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └──────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                │   │
//! │  │   │    ids    │  │   patch   │  │   query    │                │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO STORAGE • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tillbook-store (document store)                  │   │
//! │  │        key-value persistence, upserts, import/export            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Product, Order, Expense, Document)
//! - [`money`] - Money type with integer-cent arithmetic
//! - [`ids`] - Sequential id/code allocation
//! - [`patch`] - Per-entity patch structures and merge semantics
//! - [`accounting`] - Order subtotal/total/balance/status derivation
//! - [`reports`] - Cross-entity rollups and windowed aggregates
//! - [`query`] - Search, filter and sort over the collections
//! - [`seed`] - The fixed starter document
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output - anything needing "now"
//!    takes it as an argument
//! 2. **No I/O**: storage, network and clock access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Derived Status**: an order's status is never set, only computed
//!
//! ## Example Usage
//!
//! ```rust
//! use tillbook_core::accounting;
//! use tillbook_core::ids::{allocate, EntityKind};
//! use tillbook_core::money::Money;
//! use tillbook_core::patch::OrderPatch;
//! use tillbook_core::types::{OrderItem, OrderStatus};
//! use chrono::Utc;
//!
//! let patch = OrderPatch {
//!     client_id: Some("c1".into()),
//!     items: Some(vec![OrderItem {
//!         product_id: "p1".into(),
//!         tier: Some("Retail".into()),
//!         quantity: 2,
//!         price: Money::from_cents(1000),
//!     }]),
//!     fees: Some(Money::from_cents(500)),
//!     discount: Some(Money::from_cents(300)),
//!     ..Default::default()
//! };
//!
//! let order = patch.create(allocate(EntityKind::Order, 0), Utc::now());
//! assert_eq!(accounting::total(&order), Money::from_cents(2200));
//! assert_eq!(order.status, OrderStatus::Unpaid);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounting;
pub mod ids;
pub mod money;
pub mod patch;
pub mod query;
pub mod reports;
pub mod seed;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tillbook_core::Money` instead of
// `use tillbook_core::money::Money`

pub use money::Money;
pub use patch::{ClientPatch, ExpenseDraft, OrderPatch, ProductPatch};
pub use types::*;
