//! # Domain Types
//!
//! Core domain types used throughout Tillbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │     Product     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id / code      │   │  id / code      │   │  id / code      │       │
//! │  │  name           │   │  stock          │   │  clientId (FK)  │       │
//! │  └─────────────────┘   │  pricing tiers  │   │  items / fees   │       │
//! │                        │  lastOrderedAt  │   │  status         │       │
//! │  ┌─────────────────┐   └─────────────────┘   └─────────────────┘       │
//! │  │     Expense     │                                                   │
//! │  │  ─────────────  │   Document = { clients, products,                 │
//! │  │  category       │                orders, expenses }                 │
//! │  │  amount         │   (the unit of persistence and of                 │
//! │  └─────────────────┘    atomic replacement)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: internal identifier (`c3`, `p4`, `o2`, `e1`) - used for relations
//! - `code`: human-facing sequential code (`C3`, `P4`) - shown in the UI
//!
//! Both are assigned once at creation and never change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Client
// =============================================================================

/// A client (customer) of the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Internal identifier (`c<n>`).
    pub id: String,

    /// Display code (`C<n>`), unique within the collection.
    pub code: String,

    /// Display name shown across the dashboard.
    pub name: String,
}

impl Client {
    /// Returns the label to render for this client.
    ///
    /// Privacy mode replaces the name with the anonymous `#<code>` form.
    pub fn display_label(&self, private_mode: bool) -> String {
        if private_mode {
            format!("#{}", self.code)
        } else {
            self.name.clone()
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A named price point for a product.
///
/// The first tier in a product's `pricing` list is the implicit default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    /// Tier name ("Retail", "Wholesale", ...).
    pub name: String,

    /// Price in cents for this tier.
    pub price: Money,
}

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Internal identifier (`p<n>`).
    pub id: String,

    /// Display code (`P<n>`).
    pub code: String,

    /// Display name.
    pub name: String,

    /// Current stock level. Never negative; adjustments clamp at zero.
    pub stock: i64,

    /// Pricing tiers, non-empty; index 0 is the default tier.
    pub pricing: Vec<PricingTier>,

    /// Unit cost in cents.
    #[serde(default)]
    pub cost: Money,

    /// When any order last referenced this product.
    ///
    /// Stamped on every order write that carries this product in its
    /// line items, including re-saves of an unchanged order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub last_ordered_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns the default pricing tier (index 0), if any.
    #[inline]
    pub fn default_tier(&self) -> Option<&PricingTier> {
        self.pricing.first()
    }

    /// Returns the default tier's price, or zero for an (invalid) empty list.
    #[inline]
    pub fn default_price(&self) -> Money {
        self.default_tier().map(|t| t.price).unwrap_or_default()
    }

    /// Value of the stock on hand at the default tier price.
    #[inline]
    pub fn inventory_value(&self) -> Money {
        self.default_price().multiply_quantity(self.stock)
    }

    /// Returns the label to render for this product (see [`Client::display_label`]).
    pub fn display_label(&self, private_mode: bool) -> String {
        if private_mode {
            format!("#{}", self.code)
        } else {
            self.name.clone()
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The payment status of an order.
///
/// Derived, never independently settable: `Completed` iff
/// `amountPaid >= total`. Every write path that changes items, fees,
/// discount or amountPaid recomputes it (see [`crate::accounting`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    /// Outstanding balance remains.
    Unpaid,
    /// Paid in full (or overpaid).
    Completed,
}

impl OrderStatus {
    /// The wire/display name of the status.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Unpaid => "Unpaid",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Unpaid
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How (part of) an order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Electronic transfer.
    #[serde(rename = "E-Transfer")]
    ETransfer,
}

// =============================================================================
// Order
// =============================================================================

/// A line item in an order.
///
/// Uses the snapshot pattern: `price` (and the tier name alongside it) is
/// captured at the time the item is added. Changing a product's tier price
/// later does not alter past order items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Referenced product id (unchecked FK).
    pub product_id: String,

    /// Name of the pricing tier the price was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,

    /// Quantity ordered.
    pub quantity: i64,

    /// Unit price in cents at time of ordering (frozen).
    pub price: Money,
}

impl OrderItem {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// A client order with line items, fees, discount and partial payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Internal identifier (`o<n>`).
    pub id: String,

    /// Display code (`O<n>`).
    pub code: String,

    /// Referenced client id. Not enforced against the client collection.
    pub client_id: String,

    /// Order date.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Line items.
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Flat fees added on top of the item subtotal.
    #[serde(default)]
    pub fees: Money,

    /// Flat discount subtracted from the item subtotal.
    #[serde(default)]
    pub discount: Money,

    /// Amount the client has paid so far.
    #[serde(default)]
    pub amount_paid: Money,

    /// Payment methods used so far.
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,

    /// Derived payment status; stored denormalized, recomputed on write.
    #[serde(default)]
    pub status: OrderStatus,
}

// =============================================================================
// Expense
// =============================================================================

/// A business expense. Immutable after creation; no update operation exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Internal identifier (`e<n>`).
    pub id: String,

    /// Display code (`E<n>`).
    pub code: String,

    /// When the expense occurred.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Expense category ("Supplies", "Inventory", ...).
    pub category: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Amount in cents.
    pub amount: Money,
}

// =============================================================================
// Document
// =============================================================================

/// The single JSON-serializable object holding all four entity collections.
///
/// The document is the unit of persistence and of atomic replacement:
/// every mutation deep-copies it, applies the change, and swaps it back
/// wholesale, so observers never see a partially-updated document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub clients: Vec<Client>,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub orders: Vec<Order>,

    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Document {
    /// Looks up a client by internal id.
    pub fn find_client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Looks up a product by internal id.
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by internal id, mutably.
    pub fn find_product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Looks up an order by internal id.
    pub fn find_order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Looks up an order by internal id, mutably.
    pub fn find_order_mut(&mut self, id: &str) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    /// Stamps `lastOrderedAt` on every listed product.
    ///
    /// This is the denormalization side effect of an order write, kept as
    /// an explicit second step so it stays visible and testable on its
    /// own. Ids without a matching product are skipped.
    pub fn stamp_last_ordered(&mut self, product_ids: &[String], at: DateTime<Utc>) {
        for id in product_ids {
            if let Some(product) = self.find_product_mut(id) {
                product.last_ordered_at = Some(at);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_order() -> Order {
        Order {
            id: "o1".to_string(),
            code: "O1".to_string(),
            client_id: "c1".to_string(),
            date: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
            items: vec![OrderItem {
                product_id: "p1".to_string(),
                tier: Some("Retail".to_string()),
                quantity: 2,
                price: Money::from_cents(1000),
            }],
            fees: Money::from_cents(500),
            discount: Money::from_cents(300),
            amount_paid: Money::zero(),
            payment_methods: vec![PaymentMethod::Cash, PaymentMethod::ETransfer],
            status: OrderStatus::Unpaid,
        }
    }

    #[test]
    fn test_order_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(json["clientId"], "c1");
        assert_eq!(json["amountPaid"], 0);
        assert_eq!(json["items"][0]["productId"], "p1");
        assert_eq!(json["paymentMethods"][0], "Cash");
        assert_eq!(json["paymentMethods"][1], "E-Transfer");
        assert_eq!(json["status"], "Unpaid");
    }

    #[test]
    fn test_product_omits_absent_last_ordered_at() {
        let product = Product {
            id: "p1".to_string(),
            code: "P1".to_string(),
            name: "Widget".to_string(),
            stock: 3,
            pricing: vec![PricingTier {
                name: "Default".to_string(),
                price: Money::from_cents(999),
            }],
            cost: Money::zero(),
            last_ordered_at: None,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("lastOrderedAt").is_none());
        assert_eq!(json["pricing"][0]["price"], 999);
    }

    #[test]
    fn test_order_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "o1", "code": "O1", "clientId": "c1",
            "date": "2024-03-15T12:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.items.is_empty());
        assert_eq!(order.fees, Money::zero());
        assert_eq!(order.status, OrderStatus::Unpaid);
    }

    #[test]
    fn test_document_round_trips() {
        let doc = Document {
            orders: vec![sample_order()],
            ..Document::default()
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_stamp_last_ordered_skips_unknown_ids() {
        let mut doc = Document::default();
        doc.products.push(Product {
            id: "p1".to_string(),
            code: "P1".to_string(),
            name: "Widget".to_string(),
            stock: 0,
            pricing: vec![PricingTier {
                name: "Default".to_string(),
                price: Money::zero(),
            }],
            cost: Money::zero(),
            last_ordered_at: None,
        });

        let at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        doc.stamp_last_ordered(&["p1".to_string(), "ghost".to_string()], at);

        assert_eq!(doc.products[0].last_ordered_at, Some(at));
    }

    #[test]
    fn test_display_labels_respect_privacy_mode() {
        let client = Client {
            id: "c1".to_string(),
            code: "C1".to_string(),
            name: "Acme Corp".to_string(),
        };
        assert_eq!(client.display_label(false), "Acme Corp");
        assert_eq!(client.display_label(true), "#C1");
    }
}
