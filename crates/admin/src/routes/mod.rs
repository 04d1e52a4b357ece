//! HTTP route handlers for the admin service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! # Auth
//! POST /auth/sign-in           - Verify credentials, establish session
//! POST /auth/sign-out          - Destroy session
//!
//! # Dashboard
//! GET  /                       - Dashboard aggregate
//!
//! # Products
//! GET    /products             - Product list view
//! POST   /products             - Create product
//! GET    /products/{id}        - Product detail
//! PUT    /products/{id}        - Update product
//! DELETE /products/{id}        - Delete product (confirmed)
//! POST   /products/bulk        - Bulk action over selected ids
//!
//! # Invoices
//! GET    /invoices             - Invoice list view
//! POST   /invoices             - Create invoice (validated)
//! GET    /invoices/{id}        - Invoice detail
//! PUT    /invoices/{id}        - Update invoice
//! DELETE /invoices/{id}        - Delete invoice (confirmed)
//! POST   /invoices/bulk        - Bulk action over selected ids
//!
//! # Segments
//! GET    /segments             - Segment list view
//! POST   /segments             - Create segment (validated)
//! GET    /segments/{id}        - Segment detail
//! PUT    /segments/{id}        - Update segment
//! DELETE /segments/{id}        - Delete segment (confirmed)
//! ```
//!
//! Every route except the health checks is behind the
//! [`crate::middleware::RequireAdmin`] extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod products;
pub mod resource;
pub mod segments;

/// Build the full admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        // Auth
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        // Dashboard
        .route("/", get(dashboard::index))
        // Products
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/products/bulk", post(products::bulk))
        // Invoices
        .route("/invoices", get(invoices::index).post(invoices::create))
        .route(
            "/invoices/{id}",
            get(invoices::show)
                .put(invoices::update)
                .delete(invoices::remove),
        )
        .route("/invoices/bulk", post(invoices::bulk))
        // Segments
        .route("/segments", get(segments::index).post(segments::create))
        .route(
            "/segments/{id}",
            get(segments::show)
                .put(segments::update)
                .delete(segments::remove),
        )
}
