//! Lifecycle status enums for the entities the admin surface touches.
//!
//! Each backing resource owns its own lifecycle; these enums mirror the
//! values the REST surface emits.

use serde::{Deserialize, Serialize};

/// Product catalog lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

/// Order lifecycle as reported by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Fulfilled,
    Cancelled,
}

/// Invoice payment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

/// Shipment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    #[default]
    Preparing,
    InTransit,
    Delivered,
    Returned,
}

/// Marketplace connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketplaceStatus {
    #[default]
    Disconnected,
    Connected,
    Error,
}

impl ProductStatus {
    /// Whether the product is visible on the storefront.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl OrderStatus {
    /// Whether payment has been captured for this order.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid | Self::Fulfilled)
    }
}

impl MarketplaceStatus {
    /// Whether the marketplace sync link is healthy.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ShipmentStatus::InTransit).expect("serialize"),
            "\"IN_TRANSIT\""
        );
        let status: ProductStatus = serde_json::from_str("\"ARCHIVED\"").expect("deserialize");
        assert_eq!(status, ProductStatus::Archived);
    }

    #[test]
    fn paid_covers_fulfilled_orders() {
        assert!(OrderStatus::Paid.is_paid());
        assert!(OrderStatus::Fulfilled.is_paid());
        assert!(!OrderStatus::Pending.is_paid());
        assert!(!OrderStatus::Cancelled.is_paid());
    }
}
