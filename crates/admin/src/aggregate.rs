//! View aggregation over loaded collections.
//!
//! Aggregates are derived, never persisted: they are recomputed from
//! the loaded records on every fetch and discarded on the next one.
//! Everything here is O(n) over its inputs.

use rust_decimal::Decimal;
use serde::Serialize;
use storedeck_core::{CurrencyCode, Price};

use crate::models::{CustomerRecord, MarketplaceRecord, OrderRecord, TrendBucket};

/// Number of trend buckets the dashboard shows.
pub const TREND_BUCKETS: usize = 6;

/// Number of rows in top-N breakdown tables.
pub const TOP_N: usize = 5;

/// Safe rate division.
///
/// A zero denominator reports a rate of 0 rather than NaN; this is the
/// single place that rule is enforced.
#[must_use]
pub fn rate(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Top N items by a metric, descending.
///
/// The sort is stable, so ties keep their original relative order; no
/// further tiebreak is defined.
#[must_use]
pub fn top_n_by<T, K, F>(mut items: Vec<T>, n: usize, metric: F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: PartialOrd,
{
    items.sort_by(|a, b| {
        metric(b)
            .partial_cmp(&metric(a))
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    items.truncate(n);
    items
}

/// The most recent `n` buckets of a pre-bucketed trend series.
///
/// The backend emits buckets in chronological order; this layer only
/// truncates for display, it never re-buckets.
#[must_use]
pub fn recent_buckets(buckets: &[TrendBucket], n: usize) -> Vec<TrendBucket> {
    let skip = buckets.len().saturating_sub(n);
    buckets.get(skip..).unwrap_or_default().to_vec()
}

/// One row of the dashboard's top-customers table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub name: String,
    pub orders_count: u64,
    pub total_spent: Price,
}

/// One row of the dashboard's marketplace breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceShare {
    pub name: String,
    pub connected: bool,
    pub revenue: Price,
}

/// The dashboard view aggregate.
///
/// Lives for exactly one data load; recomputed on the next.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: u64,
    pub paid_orders: u64,
    /// Revenue over paid orders, in the store's configured currency.
    pub total_revenue: Price,
    /// Paid orders over all orders; 0 when there are no orders.
    pub payment_rate: f64,
    pub total_customers: u64,
    pub repeat_customers: u64,
    /// Customers with more than one order, over all customers.
    pub repeat_rate: f64,
    pub connected_marketplaces: u64,
    /// Connected marketplaces over all marketplaces.
    pub sync_rate: f64,
    /// Most recent [`TREND_BUCKETS`] finance buckets, oldest first.
    pub trend: Vec<TrendBucket>,
    /// Top [`TOP_N`] customers by lifetime spend.
    pub top_customers: Vec<TopCustomer>,
    /// Marketplaces by revenue, descending.
    pub marketplaces: Vec<MarketplaceShare>,
}

/// Build the dashboard aggregate from its loaded collections.
///
/// Pure and synchronous: the caller is responsible for having joined
/// all required fetches before invoking it. The backing records carry
/// bare decimal amounts; `currency` is the store currency every money
/// field is denominated in.
#[must_use]
#[allow(clippy::cast_precision_loss)] // collection counts stay far below 2^52
pub fn dashboard_summary(
    orders: &[OrderRecord],
    customers: &[CustomerRecord],
    marketplaces: &[MarketplaceRecord],
    trend: &[TrendBucket],
    currency: CurrencyCode,
) -> DashboardSummary {
    let total_orders = orders.len() as u64;
    let paid_orders = orders.iter().filter(|o| o.status.is_paid()).count() as u64;
    let total_revenue: Decimal = orders
        .iter()
        .filter(|o| o.status.is_paid())
        .map(|o| o.total)
        .sum();

    let total_customers = customers.len() as u64;
    let repeat_customers = customers.iter().filter(|c| c.orders_count > 1).count() as u64;

    let connected_marketplaces = marketplaces
        .iter()
        .filter(|m| m.status.is_connected())
        .count() as u64;

    let top_customers = top_n_by(
        customers
            .iter()
            .map(|c| TopCustomer {
                name: c.name.clone(),
                orders_count: c.orders_count,
                total_spent: Price::new(c.total_spent, currency),
            })
            .collect(),
        TOP_N,
        |c: &TopCustomer| c.total_spent.amount,
    );

    let marketplace_shares = top_n_by(
        marketplaces
            .iter()
            .map(|m| MarketplaceShare {
                name: m.name.clone(),
                connected: m.status.is_connected(),
                revenue: Price::new(m.revenue, currency),
            })
            .collect(),
        marketplaces.len(),
        |m: &MarketplaceShare| m.revenue.amount,
    );

    DashboardSummary {
        total_orders,
        paid_orders,
        total_revenue: Price::new(total_revenue, currency),
        payment_rate: rate(paid_orders as f64, total_orders as f64),
        total_customers,
        repeat_customers,
        repeat_rate: rate(repeat_customers as f64, total_customers as f64),
        connected_marketplaces,
        sync_rate: rate(connected_marketplaces as f64, marketplaces.len() as f64),
        trend: recent_buckets(trend, TREND_BUCKETS),
        top_customers,
        marketplaces: marketplace_shares,
    }
}
