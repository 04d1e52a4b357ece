//! Session role and resolution types.
//!
//! The identity provider is an external collaborator: it resolves the
//! current session and hands back a role. These types model exactly what
//! the admin surface reads from it.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access to the administration surface.
    Admin,
    /// Marketplace vendor; no admin access.
    Vendor,
    /// Storefront customer; no admin access.
    Customer,
}

/// Where session resolution currently stands.
///
/// A failed resolution (identity provider unreachable) is reported as
/// `Unauthenticated`; there is no retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// Resolution is still in flight.
    Loading,
    /// A session exists and carries a role.
    Authenticated,
    /// No session, or resolution failed.
    Unauthenticated,
}

impl Role {
    /// All roles, for exhaustive table-driven tests.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Vendor, Self::Customer];
}

impl ResolutionStatus {
    /// All resolution states, for exhaustive table-driven tests.
    pub const ALL: [Self; 3] = [Self::Loading, Self::Authenticated, Self::Unauthenticated];
}
