//! # List Queries
//!
//! Client-side search, filter and sort over the in-memory collections.
//! Everything here is pure: callers pass a snapshot and render the result.
//! Sorts are stable, so ties keep their insertion order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::accounting;
use crate::money::Money;
use crate::reports;
use crate::types::{Client, Document, Expense, Order, OrderStatus, Product};

// =============================================================================
// Sort Direction
// =============================================================================

/// Sort direction for any sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    /// Applies the direction to a base ascending ordering.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    }
}

// =============================================================================
// Global Search
// =============================================================================

/// Matches from a global search pass over the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

/// Case-insensitive substring search across clients (name/code), products
/// (name/code) and orders (code, or the referenced client's name).
///
/// A blank query matches nothing.
pub fn search(doc: &Document, query: &str) -> SearchResults {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return SearchResults::default();
    }

    let contains = |text: &str| text.to_lowercase().contains(&q);

    SearchResults {
        clients: doc
            .clients
            .iter()
            .filter(|c| contains(&c.name) || contains(&c.code))
            .cloned()
            .collect(),
        products: doc
            .products
            .iter()
            .filter(|p| contains(&p.name) || contains(&p.code))
            .cloned()
            .collect(),
        orders: doc
            .orders
            .iter()
            .filter(|o| {
                contains(&o.code)
                    || doc
                        .find_client(&o.client_id)
                        .map(|c| contains(&c.name))
                        .unwrap_or(false)
            })
            .cloned()
            .collect(),
    }
}

// =============================================================================
// Order Listing
// =============================================================================

/// Filter for the order listing: optional status, optional inclusive
/// date range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    #[serde(default)]
    pub status: Option<OrderStatus>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub from: Option<DateTime<Utc>>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub to: Option<DateTime<Utc>>,
}

/// Applies an [`OrderFilter`], returning the surviving orders.
pub fn filter_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| filter.status.map(|s| o.status == s).unwrap_or(true))
        .filter(|o| reports::in_range(o.date, filter.from, filter.to))
        .cloned()
        .collect()
}

/// Sortable columns of the order listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderSortKey {
    Code,
    Client,
    Total,
    Balance,
    Status,
    Date,
}

/// Sorts orders in place by the given column.
///
/// `Client` compares the raw client id (not the resolved name) and
/// `Balance` the signed total-minus-paid delta, both matching the listing's
/// historical behavior.
pub fn sort_orders(orders: &mut [Order], key: OrderSortKey, dir: SortDir) {
    orders.sort_by(|a, b| {
        let ordering = match key {
            OrderSortKey::Code => a.code.cmp(&b.code),
            OrderSortKey::Client => a.client_id.cmp(&b.client_id),
            OrderSortKey::Total => accounting::total(a).cmp(&accounting::total(b)),
            OrderSortKey::Balance => accounting::outstanding(a).cmp(&accounting::outstanding(b)),
            OrderSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            OrderSortKey::Date => a.date.cmp(&b.date),
        };
        dir.apply(ordering)
    });
}

// =============================================================================
// Client Listing
// =============================================================================

/// One row of the client table: the client plus its rollup figures.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientRow {
    pub client: Client,
    pub orders: usize,
    pub spent: Money,
    pub balance: Money,
}

/// Builds the client table rows; clients without orders get zero figures.
pub fn client_rows(doc: &Document) -> Vec<ClientRow> {
    let rollups = reports::client_rollups(&doc.orders);
    doc.clients
        .iter()
        .map(|client| {
            let rollup = rollups.get(&client.id).copied().unwrap_or_default();
            ClientRow {
                client: client.clone(),
                orders: rollup.count,
                spent: rollup.spent,
                balance: rollup.balance,
            }
        })
        .collect()
}

/// Sortable columns of the client table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientSortKey {
    Code,
    Name,
    Orders,
    Spent,
    Balance,
}

/// Sorts client rows in place by the given column.
pub fn sort_client_rows(rows: &mut [ClientRow], key: ClientSortKey, dir: SortDir) {
    rows.sort_by(|a, b| {
        let ordering = match key {
            ClientSortKey::Code => a.client.code.cmp(&b.client.code),
            ClientSortKey::Name => a.client.name.cmp(&b.client.name),
            ClientSortKey::Orders => a.orders.cmp(&b.orders),
            ClientSortKey::Spent => a.spent.cmp(&b.spent),
            ClientSortKey::Balance => a.balance.cmp(&b.balance),
        };
        dir.apply(ordering)
    });
}

/// The footer totals row of the client table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientTotals {
    pub orders: usize,
    pub spent: Money,
    pub balance: Money,
}

/// Sums the rollup columns over all rows.
pub fn client_totals(rows: &[ClientRow]) -> ClientTotals {
    rows.iter().fold(ClientTotals::default(), |acc, row| ClientTotals {
        orders: acc.orders + row.orders,
        spent: acc.spent + row.spent,
        balance: acc.balance + row.balance,
    })
}

// =============================================================================
// Product & Expense Listings
// =============================================================================

/// Sortable columns of the product table. `Value` is the default-tier
/// inventory value (price × stock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductSortKey {
    Name,
    Stock,
    Value,
}

/// Sorts products in place by the given column.
pub fn sort_products(products: &mut [Product], key: ProductSortKey, dir: SortDir) {
    products.sort_by(|a, b| {
        let ordering = match key {
            ProductSortKey::Name => a.name.cmp(&b.name),
            ProductSortKey::Stock => a.stock.cmp(&b.stock),
            ProductSortKey::Value => a.inventory_value().cmp(&b.inventory_value()),
        };
        dir.apply(ordering)
    });
}

/// Sortable columns of the expense table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExpenseSortKey {
    Code,
    Date,
    Category,
    Description,
    Amount,
}

/// Sorts expenses in place by the given column.
pub fn sort_expenses(expenses: &mut [Expense], key: ExpenseSortKey, dir: SortDir) {
    expenses.sort_by(|a, b| {
        let ordering = match key {
            ExpenseSortKey::Code => a.code.cmp(&b.code),
            ExpenseSortKey::Date => a.date.cmp(&b.date),
            ExpenseSortKey::Category => a.category.cmp(&b.category),
            ExpenseSortKey::Description => a.description.cmp(&b.description),
            ExpenseSortKey::Amount => a.amount.cmp(&b.amount),
        };
        dir.apply(ordering)
    });
}

/// Sum of all listed expense amounts (the table footer).
pub fn expenses_total(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
