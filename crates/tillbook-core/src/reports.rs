//! # Aggregation/Reporting Engine
//!
//! Stateless derivations recomputed from the full order/expense/product set
//! on demand. There is no cache and no incremental maintenance: every call
//! is a full scan over bounded-size collections, which keeps each result
//! trivially consistent with the document it was derived from.
//!
//! "Today" and "this week" depend on the clock, so every such function
//! takes `now` as an argument; the core never reads time itself.
//!
//! ## Derivations
//! ```text
//! per-client rollup   count / spent / balance (balance UNCLAMPED, see below)
//! inventory value     Σ default-tier price × stock
//! windowed revenue    Σ total over an inclusive [from, to] date range
//! dashboard stats     inventory, sales today, outstanding debt, sales 7d
//! monthly buckets     Σ total per YYYY-MM, ascending by key
//! top clients/products, expenses by category, report summary
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::accounting;
use crate::money::Money;
use crate::types::{Document, Expense, Order, OrderStatus, Product};

/// Inclusive date-range check shared by every windowed derivation.
pub(crate) fn in_range(
    date: DateTime<Utc>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    if let Some(from) = from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = to {
        if date > to {
            return false;
        }
    }
    true
}

fn windowed<'a>(
    orders: &'a [Order],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> impl Iterator<Item = &'a Order> {
    orders.iter().filter(move |o| in_range(o.date, from, to))
}

// =============================================================================
// Per-Client Rollup
// =============================================================================

/// Aggregate view of one client's orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientRollup {
    /// Number of orders referencing the client.
    pub count: usize,

    /// Sum of order totals.
    pub spent: Money,

    /// Sum of raw `total − amountPaid` deltas.
    ///
    /// Unlike the per-order balance, this is NOT clamped before summing:
    /// an overpaid order contributes a negative delta and the aggregate
    /// itself can go negative. This mirrors the historical behavior and is
    /// preserved deliberately (see DESIGN.md).
    pub balance: Money,
}

/// Groups orders by `clientId` and rolls up count/spent/balance.
///
/// Clients with no orders have no entry; callers default to a zero rollup.
pub fn client_rollups(orders: &[Order]) -> HashMap<String, ClientRollup> {
    let mut map: HashMap<String, ClientRollup> = HashMap::new();
    for order in orders {
        let entry = map.entry(order.client_id.clone()).or_default();
        entry.count += 1;
        entry.spent += accounting::total(order);
        entry.balance += accounting::outstanding(order);
    }
    map
}

// =============================================================================
// Inventory & Revenue
// =============================================================================

/// Total value of stock on hand, priced at each product's default tier.
///
/// Only the first pricing tier participates; other tiers are ignored.
pub fn inventory_value(products: &[Product]) -> Money {
    products.iter().map(Product::inventory_value).sum()
}

/// Sum of order totals over an inclusive date range. Either bound may be
/// absent, leaving that side open.
pub fn revenue_between(
    orders: &[Order],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Money {
    windowed(orders, from, to).map(accounting::total).sum()
}

// =============================================================================
// Report Summary
// =============================================================================

/// The four headline figures of the reports page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Order totals within the window.
    pub revenue: Money,

    /// Revenue minus cost of goods sold. COGS is hard-coded to zero
    /// (explicitly unimplemented), so this currently equals revenue.
    pub profit: Money,

    /// Sum of all expenses (the expense list is not date-filtered).
    pub expenses: Money,

    /// Profit minus expenses.
    pub net: Money,
}

/// Computes the report summary for a date window.
pub fn report_summary(
    orders: &[Order],
    expenses: &[Expense],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> ReportSummary {
    let revenue = revenue_between(orders, from, to);
    let cogs = Money::zero();
    let profit = revenue - cogs;
    let expense_total: Money = expenses.iter().map(|e| e.amount).sum();
    ReportSummary {
        revenue,
        profit,
        expenses: expense_total,
        net: profit - expense_total,
    }
}

// =============================================================================
// Grouped Totals
// =============================================================================

/// A labeled total in a grouped chart series.
///
/// For top clients and top products the label is the RAW internal id, not
/// a resolved display name: a known presentation gap carried over as-is
/// (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub label: String,
    pub total: Money,
}

fn ranked(map: HashMap<String, Money>) -> Vec<CategoryTotal> {
    let mut list: Vec<CategoryTotal> = map
        .into_iter()
        .map(|(label, total)| CategoryTotal { label, total })
        .collect();
    list.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
    list
}

/// Order totals grouped by client id, largest first.
pub fn top_clients(
    orders: &[Order],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<CategoryTotal> {
    let mut map: HashMap<String, Money> = HashMap::new();
    for order in windowed(orders, from, to) {
        *map.entry(order.client_id.clone()).or_default() += accounting::total(order);
    }
    ranked(map)
}

/// Line totals grouped by product id, largest first.
pub fn top_products(
    orders: &[Order],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<CategoryTotal> {
    let mut map: HashMap<String, Money> = HashMap::new();
    for order in windowed(orders, from, to) {
        for item in &order.items {
            *map.entry(item.product_id.clone()).or_default() += item.line_total();
        }
    }
    ranked(map)
}

/// Expense amounts grouped by category, largest first.
pub fn expenses_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut map: HashMap<String, Money> = HashMap::new();
    for expense in expenses {
        *map.entry(expense.category.clone()).or_default() += expense.amount;
    }
    ranked(map)
}

// =============================================================================
// Monthly Buckets
// =============================================================================

/// One month's sales total.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesBucket {
    /// Bucket key, `YYYY-MM`.
    pub month: String,

    pub total: Money,
}

/// Sums order totals per `YYYY-MM` bucket, ascending by key.
pub fn monthly_sales(
    orders: &[Order],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<SalesBucket> {
    let mut buckets: BTreeMap<String, Money> = BTreeMap::new();
    for order in windowed(orders, from, to) {
        let key = order.date.format("%Y-%m").to_string();
        *buckets.entry(key).or_default() += accounting::total(order);
    }
    buckets
        .into_iter()
        .map(|(month, total)| SalesBucket { month, total })
        .collect()
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// The rotating headline figures on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Σ default-tier price × stock over all products.
    pub inventory_value: Money,

    /// Order totals dated today (calendar-day equality with `now`, UTC).
    pub sales_today: Money,

    /// Σ `total − amountPaid` over Unpaid orders.
    pub outstanding_debt: Money,

    /// Order totals within the rolling `now − 7×24h` window (not a
    /// calendar week).
    pub sales_this_week: Money,
}

/// Computes the dashboard stats against the supplied clock reading.
pub fn dashboard_stats(doc: &Document, now: DateTime<Utc>) -> DashboardStats {
    let today = now.date_naive();
    let week_ago = now - Duration::days(7);

    let sales_today = doc
        .orders
        .iter()
        .filter(|o| o.date.date_naive() == today)
        .map(accounting::total)
        .sum();

    let outstanding_debt = doc
        .orders
        .iter()
        .filter(|o| o.status == OrderStatus::Unpaid)
        .map(accounting::outstanding)
        .sum();

    let sales_this_week = doc
        .orders
        .iter()
        .filter(|o| o.date >= week_ago)
        .map(accounting::total)
        .sum();

    DashboardStats {
        inventory_value: inventory_value(&doc.products),
        sales_today,
        outstanding_debt,
        sales_this_week,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
