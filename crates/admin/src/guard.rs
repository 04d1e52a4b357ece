//! Session guard decisions.
//!
//! The guard is a pure function over the identity provider's resolution
//! state: given where resolution stands, what role the session carries,
//! and what role the view requires, it produces exactly one decision.
//! The HTTP layer (see `middleware::auth`) translates decisions into
//! redirects or status codes; the guard itself performs no I/O.

use storedeck_core::{ResolutionStatus, Role};

/// Path a guest is sent to when no session exists.
pub const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Path an authenticated user with the wrong role is sent to.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Outcome of evaluating a session against a required role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Resolution is still in flight: show nothing, redirect nowhere.
    Pending,
    /// No session (or resolution failed): send to sign-in.
    RedirectToSignIn,
    /// Authenticated but lacking the required role.
    RedirectToUnauthorized,
    /// Authenticated with the required role: the view may render.
    Render,
}

impl GuardDecision {
    /// The redirect target for this decision, if it is a redirect.
    #[must_use]
    pub const fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::RedirectToSignIn => Some(SIGN_IN_PATH),
            Self::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
            Self::Pending | Self::Render => None,
        }
    }
}

/// Evaluate a session against the role a view requires.
///
/// A failed session resolution is reported by the caller as
/// [`ResolutionStatus::Unauthenticated`]; there is no retry path. A
/// missing role on an authenticated session is treated as a role
/// mismatch, never as a render.
#[must_use]
pub fn evaluate(status: ResolutionStatus, role: Option<Role>, required: Role) -> GuardDecision {
    match status {
        ResolutionStatus::Loading => GuardDecision::Pending,
        ResolutionStatus::Unauthenticated => GuardDecision::RedirectToSignIn,
        ResolutionStatus::Authenticated => match role {
            Some(r) if r == required => GuardDecision::Render,
            _ => GuardDecision::RedirectToUnauthorized,
        },
    }
}
