//! Typed views of the records the backing API emits.
//!
//! Field lists are trimmed to what the access/aggregation layer
//! actually touches; the backing document store owns the full schema.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storedeck_core::{
    ActivityId, CustomerId, InvoiceId, InvoiceStatus, MarketplaceId, MarketplaceStatus, OrderId,
    OrderStatus, ProductId, ProductStatus, SegmentId,
};

/// An order as the order service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(alias = "_id")]
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A customer as the customer service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    #[serde(alias = "_id")]
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub orders_count: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_spent: Decimal,
}

/// A marketplace sync link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceRecord {
    #[serde(alias = "_id")]
    pub id: MarketplaceId,
    pub name: String,
    pub status: MarketplaceStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
}

/// One pre-bucketed finance trend point, as aggregated by the backend.
///
/// The admin surface never re-buckets raw transactions; it only selects
/// the most recent buckets for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    /// Bucket label, e.g. `2026-07`.
    pub month: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub expenses: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit: Decimal,
}

/// A catalog product row for the products list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub title: String,
    pub status: ProductStatus,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// An invoice row for the finance list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    #[serde(alias = "_id")]
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub status: InvoiceStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// An activity feed entry as the backing API emits it. The `kind`
/// string is free-form; [`crate::view::ActivityKind`] closes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(alias = "_id")]
    pub id: ActivityId,
    pub kind: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A customer segment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRecord {
    #[serde(alias = "_id")]
    pub id: SegmentId,
    pub name: String,
    pub description: String,
    pub criteria: String,
    #[serde(default)]
    pub member_count: u64,
}
