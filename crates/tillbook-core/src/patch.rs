//! # Entity Patches
//!
//! Explicit per-entity patch structures and their merge semantics.
//!
//! Every mutating surface goes through one of these shapes:
//!
//! - `create(...)` builds a full record from a patch with no id, filling
//!   documented defaults for every absent field.
//! - `apply(existing)` is the pure shallow-merge: a field set on the patch
//!   wins, an absent field preserves the existing value.
//!
//! Order patches additionally expose [`OrderPatch::touched_product_ids`],
//! the set of products whose `lastOrderedAt` must be stamped as the second
//! step of an order write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::accounting;
use crate::ids::Allocation;
use crate::money::Money;
use crate::types::{Client, Expense, Order, OrderItem, PaymentMethod, PricingTier, Product};

/// Trims a proposed name, substituting `fallback` when nothing is left.
fn name_or(proposed: Option<&str>, fallback: &str) -> String {
    match proposed.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}

// =============================================================================
// Client Patch
// =============================================================================

/// Partial client for create-or-update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    /// Target id; absent means "create".
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl ClientPatch {
    /// Builds a new client. Default name: `"New Client"` (input is trimmed).
    pub fn create(&self, alloc: Allocation) -> Client {
        Client {
            id: alloc.id,
            code: alloc.code,
            name: name_or(self.name.as_deref(), "New Client"),
        }
    }

    /// Shallow-merges this patch over an existing client.
    pub fn apply(&self, existing: &Client) -> Client {
        Client {
            id: existing.id.clone(),
            code: existing.code.clone(),
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
        }
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// Partial product for create-or-update.
///
/// `lastOrderedAt` is deliberately not patchable: it is owned by the order
/// write path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    /// Target id; absent means "create".
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub stock: Option<i64>,

    /// Replacement pricing list. An empty list is treated as absent so the
    /// non-empty pricing invariant holds on every write path.
    #[serde(default)]
    pub pricing: Option<Vec<PricingTier>>,

    #[serde(default)]
    pub cost: Option<Money>,
}

impl ProductPatch {
    fn pricing_or_default(&self) -> Vec<PricingTier> {
        match &self.pricing {
            Some(tiers) if !tiers.is_empty() => tiers.clone(),
            _ => vec![PricingTier {
                name: "Default".to_string(),
                price: Money::zero(),
            }],
        }
    }

    /// Builds a new product.
    ///
    /// Defaults: name `"New Product"`, stock 0, a single zero-priced
    /// `"Default"` tier, cost 0, no last-ordered timestamp.
    pub fn create(&self, alloc: Allocation) -> Product {
        Product {
            id: alloc.id,
            code: alloc.code,
            name: name_or(self.name.as_deref(), "New Product"),
            stock: self.stock.unwrap_or(0),
            pricing: self.pricing_or_default(),
            cost: self.cost.unwrap_or_default(),
            last_ordered_at: None,
        }
    }

    /// Shallow-merges this patch over an existing product.
    pub fn apply(&self, existing: &Product) -> Product {
        Product {
            id: existing.id.clone(),
            code: existing.code.clone(),
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            stock: self.stock.unwrap_or(existing.stock),
            pricing: match &self.pricing {
                Some(tiers) if !tiers.is_empty() => tiers.clone(),
                _ => existing.pricing.clone(),
            },
            cost: self.cost.unwrap_or(existing.cost),
            last_ordered_at: existing.last_ordered_at,
        }
    }
}

// =============================================================================
// Order Patch
// =============================================================================

/// Partial order for create-or-update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    /// Target id; absent means "create".
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,

    #[serde(default)]
    pub fees: Option<Money>,

    #[serde(default)]
    pub discount: Option<Money>,

    #[serde(default)]
    pub amount_paid: Option<Money>,

    #[serde(default)]
    pub payment_methods: Option<Vec<PaymentMethod>>,
}

impl OrderPatch {
    /// Builds a new order dated `now` unless the patch supplies a date.
    ///
    /// The client reference is recorded as-is (an absent one becomes the
    /// empty string); referential integrity is not enforced anywhere.
    /// Status is derived from the assembled fields, never taken from input.
    pub fn create(&self, alloc: Allocation, now: DateTime<Utc>) -> Order {
        let mut order = Order {
            id: alloc.id,
            code: alloc.code,
            client_id: self.client_id.clone().unwrap_or_default(),
            date: self.date.unwrap_or(now),
            items: self.items.clone().unwrap_or_default(),
            fees: self.fees.unwrap_or_default(),
            discount: self.discount.unwrap_or_default(),
            amount_paid: self.amount_paid.unwrap_or_default(),
            payment_methods: self.payment_methods.clone().unwrap_or_default(),
            status: Default::default(),
        };
        order.status = accounting::status_for(&order);
        order
    }

    /// Shallow-merges this patch over an existing order and recomputes the
    /// derived status from the merged fields.
    pub fn apply(&self, existing: &Order) -> Order {
        let mut order = Order {
            id: existing.id.clone(),
            code: existing.code.clone(),
            client_id: self
                .client_id
                .clone()
                .unwrap_or_else(|| existing.client_id.clone()),
            date: self.date.unwrap_or(existing.date),
            items: self.items.clone().unwrap_or_else(|| existing.items.clone()),
            fees: self.fees.unwrap_or(existing.fees),
            discount: self.discount.unwrap_or(existing.discount),
            amount_paid: self.amount_paid.unwrap_or(existing.amount_paid),
            payment_methods: self
                .payment_methods
                .clone()
                .unwrap_or_else(|| existing.payment_methods.clone()),
            status: existing.status,
        };
        order.status = accounting::status_for(&order);
        order
    }

    /// Product ids referenced by this patch's line items, deduplicated in
    /// first-seen order.
    ///
    /// Every one of these products gets its `lastOrderedAt` stamped when
    /// the patch is written, on create and on edit alike, even when the
    /// items are unchanged from the stored order.
    pub fn touched_product_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for item in self.items.iter().flatten() {
            if !ids.iter().any(|id| *id == item.product_id) {
                ids.push(item.product_id.clone());
            }
        }
        ids
    }
}

// =============================================================================
// Expense Draft
// =============================================================================

/// Input for creating an expense. Expenses are add-only: there is no
/// update operation, so this is a draft rather than a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub amount: Option<Money>,
}

impl ExpenseDraft {
    /// Builds the expense. Defaults: date `now`, category `"General"`,
    /// empty description, zero amount.
    pub fn create(&self, alloc: Allocation, now: DateTime<Utc>) -> Expense {
        Expense {
            id: alloc.id,
            code: alloc.code,
            date: self.date.unwrap_or(now),
            category: self
                .category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "General".to_string()),
            description: self.description.clone().unwrap_or_default(),
            amount: self.amount.unwrap_or_default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
