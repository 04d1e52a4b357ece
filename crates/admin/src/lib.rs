//! Storedeck admin service library.
//!
//! The role-gated data-access and aggregation layer behind the admin
//! panel: session guarding, resource fetching against the backing
//! commerce API, list query construction, dashboard aggregation, and
//! mutation coordination with bulk actions.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod aggregate;
pub mod backend;
pub mod config;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod models;
pub mod mutation;
pub mod query;
pub mod routes;
pub mod selection;
pub mod state;
pub mod view;
