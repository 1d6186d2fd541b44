//! # Order Operations
//!
//! Create-or-update for orders, the mark-paid shortcut, and the
//! denormalized product metadata that rides along with every order write.
//!
//! ## Two-Step Transaction
//! ```text
//! upsert(patch)
//!   step 1: build the new/merged order (status derived, never taken)
//!   step 2: stamp lastOrderedAt on every product the patch's items
//!           reference - on create and on edit, even when re-saving an
//!           unchanged order
//! both steps land in ONE atomic document replace
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use tillbook_core::accounting;
use tillbook_core::ids::{allocate_in, EntityKind};
use tillbook_core::patch::OrderPatch;
use tillbook_core::types::{Order, OrderStatus};

use crate::document::DocumentStore;
use crate::error::StoreResult;

/// Operation facade for orders.
#[derive(Clone)]
pub struct OrderOps {
    store: Arc<DocumentStore>,
}

impl OrderOps {
    /// Creates a new OrderOps over the given store.
    pub(crate) fn new(store: Arc<DocumentStore>) -> Self {
        OrderOps { store }
    }

    /// Creates or patches an order.
    ///
    /// ## Behavior
    /// - No id: allocates the next id/code, fills defaults (date `now`,
    ///   empty items, zero fees/discount/paid), derives status, inserts.
    /// - Id found: shallow-merges the patch and re-derives status from the
    ///   merged fields.
    /// - Id unknown: the order collection is untouched and `Ok(None)` is
    ///   returned, but the metadata stamp below still runs, matching the
    ///   historical write path.
    ///
    /// Regardless of which branch ran, every product referenced by the
    /// patch's line items gets `lastOrderedAt` set to the current time.
    pub fn upsert(&self, patch: OrderPatch) -> StoreResult<Option<Order>> {
        let now = Utc::now();
        debug!(id = ?patch.id, "Upserting order");

        self.store.update(move |doc| {
            let saved = match &patch.id {
                None => {
                    let created = patch.create(allocate_in(EntityKind::Order, doc), now);
                    doc.orders.push(created.clone());
                    Some(created)
                }
                Some(id) => doc.orders.iter().position(|o| &o.id == id).map(|idx| {
                    let updated = patch.apply(&doc.orders[idx]);
                    doc.orders[idx] = updated.clone();
                    updated
                }),
            };

            doc.stamp_last_ordered(&patch.touched_product_ids(), now);
            saved
        })
    }

    /// Settles an order in full: `amountPaid = total`, status Completed,
    /// in one atomic write.
    ///
    /// No payment-method record is appended. An unknown order id is a
    /// silent no-op.
    pub fn mark_paid(&self, order_id: &str) -> StoreResult<Option<Order>> {
        debug!(order_id = %order_id, "Marking order paid");

        self.store.update(|doc| {
            let order = doc.find_order_mut(order_id)?;
            order.amount_paid = accounting::total(order);
            order.status = OrderStatus::Completed;
            Some(order.clone())
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tillbook_core::money::Money;
    use tillbook_core::seed::seed_document;
    use tillbook_core::types::{OrderItem, PaymentMethod};

    use crate::storage::{shared, MemoryStorage};

    fn seeded() -> (OrderOps, Arc<DocumentStore>) {
        let store = Arc::new(
            DocumentStore::open(shared(MemoryStorage::new()), seed_document(Utc::now())).unwrap(),
        );
        (OrderOps::new(Arc::clone(&store)), store)
    }

    fn item(product_id: &str, quantity: i64, cents: i64) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            tier: Some("Retail".to_string()),
            quantity,
            price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_create_derives_status_and_allocates() {
        let (orders, _) = seeded();

        let created = orders
            .upsert(OrderPatch {
                client_id: Some("c1".to_string()),
                items: Some(vec![item("p1", 2, 1000)]),
                fees: Some(Money::from_cents(500)),
                discount: Some(Money::from_cents(300)),
                payment_methods: Some(vec![PaymentMethod::Cash]),
                ..Default::default()
            })
            .unwrap()
            .unwrap();

        assert_eq!(created.id, "o1");
        assert_eq!(created.code, "O1");
        assert_eq!(created.status, OrderStatus::Unpaid);
        assert_eq!(accounting::total(&created), Money::from_cents(2200));
    }

    #[test]
    fn test_upsert_stamps_last_ordered_at() {
        let (orders, store) = seeded();
        assert!(store.snapshot().products[0].last_ordered_at.is_none());

        orders
            .upsert(OrderPatch {
                client_id: Some("c1".to_string()),
                items: Some(vec![item("p1", 1, 1999), item("p2", 1, 3499)]),
                ..Default::default()
            })
            .unwrap()
            .unwrap();

        let doc = store.snapshot();
        assert!(doc.find_product("p1").unwrap().last_ordered_at.is_some());
        assert!(doc.find_product("p2").unwrap().last_ordered_at.is_some());
        assert!(doc.find_product("p3").unwrap().last_ordered_at.is_none());
    }

    #[test]
    fn test_resaving_unchanged_order_restamps_products() {
        let (orders, store) = seeded();

        let created = orders
            .upsert(OrderPatch {
                client_id: Some("c1".to_string()),
                items: Some(vec![item("p1", 1, 1999)]),
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        let first_stamp = store.snapshot().products[0].last_ordered_at.unwrap();

        // Re-save with identical items
        orders
            .upsert(OrderPatch {
                id: Some(created.id.clone()),
                items: Some(created.items.clone()),
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        let second_stamp = store.snapshot().products[0].last_ordered_at.unwrap();

        assert!(second_stamp >= first_stamp);
    }

    #[test]
    fn test_edit_recomputes_status() {
        let (orders, _) = seeded();

        let created = orders
            .upsert(OrderPatch {
                client_id: Some("c1".to_string()),
                items: Some(vec![item("p1", 2, 1000)]),
                fees: Some(Money::from_cents(500)),
                discount: Some(Money::from_cents(300)),
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(created.status, OrderStatus::Unpaid);

        let paid = orders
            .upsert(OrderPatch {
                id: Some(created.id.clone()),
                amount_paid: Some(Money::from_cents(2200)),
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(paid.status, OrderStatus::Completed);
        assert_eq!(paid.items, created.items);
    }

    #[test]
    fn test_unknown_id_no_ops_but_still_stamps_metadata() {
        let (orders, store) = seeded();

        let result = orders
            .upsert(OrderPatch {
                id: Some("ghost".to_string()),
                items: Some(vec![item("p1", 1, 1999)]),
                ..Default::default()
            })
            .unwrap();

        assert!(result.is_none());
        let doc = store.snapshot();
        assert!(doc.orders.is_empty());
        assert!(doc.find_product("p1").unwrap().last_ordered_at.is_some());
    }

    #[test]
    fn test_mark_paid_settles_in_full() {
        let (orders, store) = seeded();

        let created = orders
            .upsert(OrderPatch {
                client_id: Some("c1".to_string()),
                items: Some(vec![item("p1", 2, 1000)]),
                fees: Some(Money::from_cents(500)),
                discount: Some(Money::from_cents(300)),
                amount_paid: Some(Money::from_cents(100)),
                payment_methods: Some(vec![PaymentMethod::ETransfer]),
                ..Default::default()
            })
            .unwrap()
            .unwrap();

        let settled = orders.mark_paid(&created.id).unwrap().unwrap();
        assert_eq!(settled.amount_paid, Money::from_cents(2200));
        assert_eq!(settled.status, OrderStatus::Completed);
        // Mark-paid does not append a payment-method record
        assert_eq!(settled.payment_methods, vec![PaymentMethod::ETransfer]);

        let stored = store.snapshot();
        assert_eq!(stored.orders[0].amount_paid, Money::from_cents(2200));
    }

    #[test]
    fn test_mark_paid_on_unknown_order_is_a_silent_no_op() {
        let (orders, _) = seeded();
        assert!(orders.mark_paid("ghost").unwrap().is_none());
    }
}
