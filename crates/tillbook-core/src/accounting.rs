//! # Order Accounting Engine
//!
//! Pure functions over an order's mutable fields, recomputed on every read
//! and every write:
//!
//! ```text
//! subtotal = Σ item.quantity × item.price
//! total    = max(0, subtotal + fees − discount)
//! balance  = max(0, total − amountPaid)
//! status   = amountPaid ≥ total ? Completed : Unpaid
//! ```
//!
//! Nothing here touches the clock or the store; the upsert layer calls
//! [`status_for`] after every write that changes items, fees, discount or
//! the paid amount, which is what keeps the stored `status` consistent.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Order, OrderItem, OrderStatus, Product};

// =============================================================================
// Core Formulas
// =============================================================================

/// Sum of line totals before fees and discount.
pub fn subtotal(order: &Order) -> Money {
    order.items.iter().map(OrderItem::line_total).sum()
}

/// Grand total: subtotal plus fees minus discount, clamped at zero.
pub fn total(order: &Order) -> Money {
    (subtotal(order) + order.fees - order.discount).clamp_non_negative()
}

/// Outstanding balance, clamped at zero for per-order display.
pub fn balance(order: &Order) -> Money {
    (total(order) - order.amount_paid).clamp_non_negative()
}

/// Signed total-minus-paid delta, without the per-order clamp.
///
/// An overpaid order yields a negative value here. The per-client rollup
/// sums this raw delta (see [`crate::reports`]), which is why it exists
/// separately from [`balance`].
pub fn outstanding(order: &Order) -> Money {
    total(order) - order.amount_paid
}

/// Derives the payment status from the order's current fields.
///
/// ## Example
/// ```rust
/// use tillbook_core::accounting::status_for;
/// use tillbook_core::money::Money;
/// use tillbook_core::types::{Order, OrderItem, OrderStatus};
/// use chrono::Utc;
///
/// let mut order = Order {
///     id: "o1".into(),
///     code: "O1".into(),
///     client_id: "c1".into(),
///     date: Utc::now(),
///     items: vec![OrderItem {
///         product_id: "p1".into(),
///         tier: None,
///         quantity: 2,
///         price: Money::from_cents(1000),
///     }],
///     fees: Money::from_cents(500),
///     discount: Money::from_cents(300),
///     amount_paid: Money::zero(),
///     payment_methods: vec![],
///     status: OrderStatus::Unpaid,
/// };
/// assert_eq!(status_for(&order), OrderStatus::Unpaid);
///
/// order.amount_paid = Money::from_cents(2200);
/// assert_eq!(status_for(&order), OrderStatus::Completed);
/// ```
pub fn status_for(order: &Order) -> OrderStatus {
    if order.amount_paid >= total(order) {
        OrderStatus::Completed
    } else {
        OrderStatus::Unpaid
    }
}

// =============================================================================
// Totals Summary
// =============================================================================

/// Accounting summary for one order, as shown on the order sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Money,
    pub total: Money,
    pub amount_paid: Money,
    pub balance: Money,
    pub status: OrderStatus,
}

impl From<&Order> for OrderTotals {
    fn from(order: &Order) -> Self {
        OrderTotals {
            subtotal: subtotal(order),
            total: total(order),
            amount_paid: order.amount_paid,
            balance: balance(order),
            status: status_for(order),
        }
    }
}

// =============================================================================
// Soft Stock Validation
// =============================================================================

/// A line item asking for more units than the referenced product has.
///
/// Shortages are warnings, never save-time failures: stock is not reserved
/// or locked, and the accounting engine accepts the order regardless. The
/// display layer uses this list to flag rows and gate its save button.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockShortage {
    pub product_id: String,
    /// Product name, or the raw id when the product no longer exists.
    pub product_label: String,
    pub available: i64,
    pub requested: i64,
}

/// Checks line items against current product stock.
///
/// A missing product counts as zero stock, so any positive quantity on a
/// dangling reference is reported as a shortage.
pub fn stock_shortages(items: &[OrderItem], products: &[Product]) -> Vec<StockShortage> {
    items
        .iter()
        .filter_map(|item| {
            let product = products.iter().find(|p| p.id == item.product_id);
            let available = product.map(|p| p.stock).unwrap_or(0);
            if item.quantity > available {
                Some(StockShortage {
                    product_id: item.product_id.clone(),
                    product_label: product
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| item.product_id.clone()),
                    available,
                    requested: item.quantity,
                })
            } else {
                None
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
