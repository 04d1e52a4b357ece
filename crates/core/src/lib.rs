//! Storedeck Core - Shared types library.
//!
//! This crate provides common types used across all Storedeck components:
//! - `admin` - Internal administration service
//! - `integration-tests` - End-to-end test suite
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! session handling. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices,
//!   lifecycle statuses, and the session/role model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
