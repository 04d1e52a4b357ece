//! View-state modeling for list views.
//!
//! A failed fetch is not an empty list: every list view reports which
//! of the four states it reached, and the serialized view model carries
//! that state explicitly.

use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, ListPage};

/// Explicit state of one list view.
///
/// `Loading` exists for the in-flight phase (library consumers driving
/// their own render loop); request-scoped handlers only ever serialize
/// the other three.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView<T> {
    /// The fetch is still in flight.
    Loading,
    /// The fetch failed; the message is operator-facing.
    Error {
        /// What to show instead of rows.
        message: String,
    },
    /// The fetch succeeded and matched nothing.
    Empty,
    /// The fetch succeeded and matched at least one record.
    Loaded {
        /// Decoded records for this page.
        items: Vec<T>,
        /// Total records across all pages.
        total: u64,
        /// Total pages for the active query.
        total_pages: u64,
    },
}

impl<T: serde::de::DeserializeOwned> ListView<T> {
    /// Fold a fetch result into a view state.
    ///
    /// Fetch errors become `Error` (a generic operation-failed surface,
    /// since operators cannot act on transport detail), an empty page
    /// becomes `Empty`, anything else `Loaded`.
    #[must_use]
    pub fn from_fetch(result: Result<ListPage, BackendError>) -> Self {
        match result {
            Err(error) => {
                tracing::error!(%error, "list fetch failed");
                Self::Error {
                    message: "Failed to load data".to_owned(),
                }
            }
            Ok(page) => match page.decode_items::<T>() {
                Err(error) => {
                    tracing::error!(%error, "list decode failed");
                    Self::Error {
                        message: "Failed to load data".to_owned(),
                    }
                }
                Ok(items) if items.is_empty() => Self::Empty,
                Ok(items) => Self::Loaded {
                    items,
                    total: page.total,
                    total_pages: page.total_pages,
                },
            },
        }
    }
}

/// Kinds of activity/entity the dashboard feed can show.
///
/// The backing API emits free-form kind strings; anything unrecognized
/// maps to `Unknown`, which renders with the default icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Order,
    Customer,
    Product,
    Invoice,
    Shipment,
    Payout,
    Sync,
    Unknown,
}

impl ActivityKind {
    /// Map a backend kind string onto the closed set.
    #[must_use]
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "order" => Self::Order,
            "customer" => Self::Customer,
            "product" => Self::Product,
            "invoice" => Self::Invoice,
            "shipment" => Self::Shipment,
            "payout" => Self::Payout,
            "sync" => Self::Sync,
            _ => Self::Unknown,
        }
    }

    /// Icon name for the admin UI.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Order => "shopping-cart",
            Self::Customer => "user",
            Self::Product => "package",
            Self::Invoice => "file-text",
            Self::Shipment => "truck",
            Self::Payout => "credit-card",
            Self::Sync => "refresh-cw",
            Self::Unknown => "activity",
        }
    }
}
