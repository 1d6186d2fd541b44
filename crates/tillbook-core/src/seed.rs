//! # Seed Data
//!
//! The fixed default document a fresh (or wiped) installation starts from.
//! Resetting the store replaces the live document with exactly this.

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::{Client, Document, Expense, PricingTier, Product};

fn client(id: &str, code: &str, name: &str) -> Client {
    Client {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
    }
}

fn tier(name: &str, price: Money) -> PricingTier {
    PricingTier {
        name: name.to_string(),
        price,
    }
}

/// Builds the starter document.
///
/// `now` stamps the seeded expense; everything else is fixed data. Ids and
/// codes follow the allocator's sequential scheme so later creates continue
/// the sequence naturally.
pub fn seed_document(now: DateTime<Utc>) -> Document {
    Document {
        clients: vec![
            client("c1", "C1", "Acme Corp"),
            client("c2", "C2", "Blue Horizon"),
            client("c3", "C3", "Nimbus Labs"),
        ],
        products: vec![
            Product {
                id: "p1".to_string(),
                code: "P1".to_string(),
                name: "Liquid Glass 500ml".to_string(),
                stock: 42,
                pricing: vec![
                    tier("Retail", Money::from_major_minor(19, 99)),
                    tier("Wholesale", Money::from_major_minor(14, 50)),
                ],
                cost: Money::from_major_minor(8, 0),
                last_ordered_at: None,
            },
            Product {
                id: "p2".to_string(),
                code: "P2".to_string(),
                name: "Liquid Glass 1L".to_string(),
                stock: 18,
                pricing: vec![
                    tier("Retail", Money::from_major_minor(34, 99)),
                    tier("Wholesale", Money::from_major_minor(26, 0)),
                ],
                cost: Money::from_major_minor(15, 0),
                last_ordered_at: None,
            },
            Product {
                id: "p3".to_string(),
                code: "P3".to_string(),
                name: "Applicator Kit".to_string(),
                stock: 60,
                pricing: vec![tier("Standard", Money::from_major_minor(9, 99))],
                cost: Money::from_major_minor(3, 0),
                last_ordered_at: None,
            },
        ],
        orders: vec![],
        expenses: vec![Expense {
            id: "e1".to_string(),
            code: "E1".to_string(),
            date: now,
            category: "Supplies".to_string(),
            description: "Packaging".to_string(),
            amount: Money::from_major_minor(120, 50),
        }],
    }
}
