//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use storedeck_core::{AdminUserId, Email, Role};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the signed-in admin.
/// The backing auth service is the source of truth; this is a transient
/// copy created at sign-in and destroyed at sign-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's document ID.
    #[serde(alias = "_id")]
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
    /// Role the session carries.
    pub role: Role,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current signed-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
