//! Dashboard aggregate handler.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::aggregate::{self, DashboardSummary, TREND_BUCKETS};
use crate::backend::{BackendError, ListPage, ResourceApi};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{ActivityRecord, CustomerRecord, MarketplaceRecord, OrderRecord, TrendBucket};
use crate::query::ListQuery;
use crate::state::AppState;
use crate::view::ActivityKind;

/// Page size for aggregate fetches. The aggregator works on one page
/// of each collection; the backing API caps pages at this size.
const AGGREGATE_PAGE_SIZE: u32 = 250;

/// How many activity entries the dashboard feed shows.
const RECENT_ACTIVITY: usize = 10;

/// One row of the dashboard's activity feed, with the free-form
/// backend kind closed into [`ActivityKind`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub icon: &'static str,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityRecord> for ActivityEntry {
    fn from(record: ActivityRecord) -> Self {
        let kind = ActivityKind::from_kind(&record.kind);
        Self {
            kind,
            icon: kind.icon(),
            message: record.message,
            created_at: record.created_at,
        }
    }
}

/// Full dashboard payload: the aggregate summary plus the activity feed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub recent_activity: Vec<ActivityEntry>,
}

/// Dashboard overview: orders, customers, and marketplaces reconciled
/// into one summary.
///
/// All collections are fetched concurrently and joined all-of:
/// the first failure aborts the aggregate, since a summary over a
/// partial dataset would silently misreport every rate.
#[instrument(skip(state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let backend = state.backend();
    let query = ListQuery::new(1, AGGREGATE_PAGE_SIZE);

    let (orders_page, customers_page, marketplaces_page, trend_page, activity_page) = tokio::try_join!(
        backend.list("orders", &query),
        backend.list("customers", &query),
        backend.list("marketplaces", &query),
        backend.list("finance/trend", &query),
        backend.list("activity", &query),
    )?;

    let orders: Vec<OrderRecord> = orders_page.decode_items()?;
    let customers: Vec<CustomerRecord> = customers_page.decode_items()?;
    let marketplaces: Vec<MarketplaceRecord> = marketplaces_page.decode_items()?;
    let trend = decode_trend(&trend_page)?;
    let trend = aggregate::recent_buckets(&trend, TREND_BUCKETS);
    let activity: Vec<ActivityRecord> = activity_page.decode_items()?;

    let summary = aggregate::dashboard_summary(
        &orders,
        &customers,
        &marketplaces,
        &trend,
        state.config().currency,
    );
    let recent_activity = activity
        .into_iter()
        .take(RECENT_ACTIVITY)
        .map(ActivityEntry::from)
        .collect();

    Ok(Json(DashboardResponse {
        summary,
        recent_activity,
    }))
}

/// The finance service reports trend buckets either as list items or
/// inside the page's `stats` block, depending on its version.
fn decode_trend(page: &ListPage) -> Result<Vec<TrendBucket>, BackendError> {
    if !page.items.is_empty() {
        return page.decode_items();
    }
    match &page.stats {
        Some(stats) => stats
            .get("trend")
            .map(|trend| {
                serde_json::from_value(trend.clone())
                    .map_err(|e| BackendError::Request(format!("malformed trend stats: {e}")))
            })
            .unwrap_or_else(|| Ok(Vec::new())),
        None => Ok(Vec::new()),
    }
}
