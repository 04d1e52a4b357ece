//! Domain models for the admin service.

pub mod records;
pub mod session;

pub use records::*;
pub use session::{CurrentAdmin, keys as session_keys};
