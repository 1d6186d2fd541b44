//! # Product Operations
//!
//! Create-or-update for the product collection, plus the delta-based
//! stock adjustment.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use tillbook_core::ids::{allocate_in, EntityKind};
use tillbook_core::money::Money;
use tillbook_core::patch::{ExpenseDraft, ProductPatch};
use tillbook_core::types::Product;

use crate::document::DocumentStore;
use crate::error::StoreResult;

/// A delta-based stock adjustment (a constrained product upsert).
#[derive(Debug, Clone)]
pub struct StockAdjustment {
    /// Product to adjust.
    pub product_id: String,

    /// Change in stock; negative removes units. The resulting stock is
    /// clamped at zero.
    pub delta: i64,

    /// Purchase cost for a restock, if any.
    pub cost: Option<Money>,

    /// Record the purchase as an `"Inventory"` expense. Only takes effect
    /// for a positive delta with a positive cost.
    pub create_expense: bool,
}

/// Operation facade for products.
#[derive(Clone)]
pub struct ProductOps {
    store: Arc<DocumentStore>,
}

impl ProductOps {
    /// Creates a new ProductOps over the given store.
    pub(crate) fn new(store: Arc<DocumentStore>) -> Self {
        ProductOps { store }
    }

    /// Creates or patches a product (see [`crate::ops::ClientOps::upsert`]
    /// for the shared upsert contract).
    ///
    /// The non-empty pricing invariant holds on both paths: an absent or
    /// empty pricing list falls back to a single `"Default"` tier on
    /// create and preserves the stored tiers on update.
    pub fn upsert(&self, patch: ProductPatch) -> StoreResult<Option<Product>> {
        debug!(id = ?patch.id, "Upserting product");

        self.store.update(|doc| match &patch.id {
            None => {
                let created = patch.create(allocate_in(EntityKind::Product, doc));
                doc.products.push(created.clone());
                Some(created)
            }
            Some(id) => doc.products.iter().position(|p| &p.id == id).map(|idx| {
                let updated = patch.apply(&doc.products[idx]);
                doc.products[idx] = updated.clone();
                updated
            }),
        })
    }

    /// Applies a stock adjustment: `stock = max(0, stock + delta)`.
    ///
    /// When `create_expense` is set, the delta restocks (`> 0`) and a
    /// positive cost is supplied, an `"Inventory"` expense naming the
    /// product is created in the same atomic document replace. An unknown
    /// product id is a silent no-op and creates nothing.
    pub fn adjust_stock(&self, adjustment: StockAdjustment) -> StoreResult<Option<Product>> {
        let now = Utc::now();
        debug!(
            product_id = %adjustment.product_id,
            delta = adjustment.delta,
            "Adjusting stock"
        );

        self.store.update(move |doc| {
            let product = doc.find_product_mut(&adjustment.product_id)?;
            product.stock = (product.stock + adjustment.delta).max(0);
            let updated = product.clone();

            let cost = adjustment.cost.unwrap_or_default();
            if adjustment.create_expense && adjustment.delta > 0 && cost.is_positive() {
                let draft = ExpenseDraft {
                    date: Some(now),
                    category: Some("Inventory".to_string()),
                    description: Some(format!("Stock for {}", updated.name)),
                    amount: Some(cost),
                };
                let expense = draft.create(allocate_in(EntityKind::Expense, doc), now);
                doc.expenses.push(expense);
            }

            Some(updated)
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tillbook_core::seed::seed_document;
    use tillbook_core::types::{Document, PricingTier};

    use crate::storage::{shared, MemoryStorage};

    fn seeded() -> (ProductOps, Arc<DocumentStore>) {
        let store = Arc::new(
            DocumentStore::open(shared(MemoryStorage::new()), seed_document(Utc::now())).unwrap(),
        );
        (ProductOps::new(Arc::clone(&store)), store)
    }

    fn adjust(delta: i64, cost: Option<i64>, create_expense: bool) -> StockAdjustment {
        StockAdjustment {
            product_id: "p1".to_string(),
            delta,
            cost: cost.map(Money::from_cents),
            create_expense,
        }
    }

    #[test]
    fn test_create_fills_defaults_and_allocates() {
        let store =
            DocumentStore::open(shared(MemoryStorage::new()), Document::default()).unwrap();
        let products = ProductOps::new(Arc::new(store));

        let created = products.upsert(ProductPatch::default()).unwrap().unwrap();
        assert_eq!(created.id, "p1");
        assert_eq!(created.code, "P1");
        assert_eq!(created.name, "New Product");
        assert_eq!(created.pricing.len(), 1);
    }

    #[test]
    fn test_update_preserves_unpatched_fields() {
        let (products, _) = seeded();

        let updated = products
            .upsert(ProductPatch {
                id: Some("p1".to_string()),
                stock: Some(40),
                ..Default::default()
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated.stock, 40);
        assert_eq!(updated.name, "Liquid Glass 500ml");
        // Two seeded tiers survive a patch that says nothing about pricing
        assert_eq!(updated.pricing.len(), 2);
    }

    #[test]
    fn test_update_replaces_pricing_when_non_empty() {
        let (products, _) = seeded();

        let updated = products
            .upsert(ProductPatch {
                id: Some("p1".to_string()),
                pricing: Some(vec![PricingTier {
                    name: "Clearance".to_string(),
                    price: Money::from_cents(500),
                }]),
                ..Default::default()
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated.pricing.len(), 1);
        assert_eq!(updated.pricing[0].name, "Clearance");
    }

    #[test]
    fn test_removal_without_cost_creates_no_expense() {
        // p1 starts at stock 42
        let (products, store) = seeded();

        let updated = products.adjust_stock(adjust(-10, None, true)).unwrap().unwrap();
        assert_eq!(updated.stock, 32);

        let doc = store.snapshot();
        assert_eq!(doc.expenses.len(), 1); // only the seeded expense
    }

    #[test]
    fn test_removal_clamps_at_zero() {
        let (products, _) = seeded();

        products.adjust_stock(adjust(-10, None, false)).unwrap();
        let updated = products.adjust_stock(adjust(-50, None, false)).unwrap().unwrap();
        assert_eq!(updated.stock, 0);
    }

    #[test]
    fn test_round_trip_restores_stock_unless_clamped() {
        let (products, _) = seeded();

        products.adjust_stock(adjust(-10, None, false)).unwrap();
        let restored = products.adjust_stock(adjust(10, None, false)).unwrap().unwrap();
        assert_eq!(restored.stock, 42);

        // Clamp breaks the round trip: -50 then +50 overshoots
        products.adjust_stock(adjust(-50, None, false)).unwrap();
        let after = products.adjust_stock(adjust(50, None, false)).unwrap().unwrap();
        assert_eq!(after.stock, 50);
    }

    #[test]
    fn test_restock_with_cost_creates_inventory_expense_atomically() {
        let (products, store) = seeded();

        let updated = products
            .adjust_stock(adjust(20, Some(8000), true))
            .unwrap()
            .unwrap();
        assert_eq!(updated.stock, 62);

        let doc = store.snapshot();
        assert_eq!(doc.expenses.len(), 2);
        let expense = &doc.expenses[1];
        assert_eq!(expense.id, "e2");
        assert_eq!(expense.category, "Inventory");
        assert_eq!(expense.description, "Stock for Liquid Glass 500ml");
        assert_eq!(expense.amount, Money::from_cents(8000));
    }

    #[test]
    fn test_expense_flag_matrix() {
        let (products, store) = seeded();

        // Flag off
        products.adjust_stock(adjust(5, Some(1000), false)).unwrap();
        // Negative delta
        products.adjust_stock(adjust(-5, Some(1000), true)).unwrap();
        // Zero cost
        products.adjust_stock(adjust(5, Some(0), true)).unwrap();

        assert_eq!(store.snapshot().expenses.len(), 1);
    }

    #[test]
    fn test_unknown_product_is_a_silent_no_op() {
        let (products, store) = seeded();
        let result = products
            .adjust_stock(StockAdjustment {
                product_id: "ghost".to_string(),
                delta: 5,
                cost: Some(Money::from_cents(100)),
                create_expense: true,
            })
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.snapshot().expenses.len(), 1);
    }
}
