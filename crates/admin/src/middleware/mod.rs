//! Middleware and request extractors.

pub mod auth;
pub mod session;

pub use auth::{OptionalAdmin, RequireAdmin};
pub use session::create_session_layer;
