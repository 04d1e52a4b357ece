//! Authentication extractors.
//!
//! The HTTP face of the session guard: each extractor resolves the
//! session, runs [`crate::guard::evaluate`], and turns the decision
//! into a rejection or the signed-in admin. JSON clients get bare
//! status codes; a request whose `Accept` header asks for HTML gets a
//! redirect instead.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use storedeck_core::{ResolutionStatus, Role};
use tower_sessions::Session;

use crate::guard::{self, GuardDecision};
use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires an authenticated admin.
///
/// A guest gets 401 (or a redirect to sign-in when the client accepts
/// HTML); an authenticated non-admin gets 403 (or the unauthorized
/// page).
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Rejection for [`RequireAdmin`].
pub enum AdminRejection {
    /// No session: redirect to sign-in (HTML clients).
    RedirectToSignIn,
    /// No session on a JSON request.
    Unauthorized,
    /// Authenticated but not an admin: redirect (HTML clients).
    RedirectToUnauthorized,
    /// Authenticated but not an admin, on a JSON request.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to(guard::SIGN_IN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::RedirectToUnauthorized => Redirect::to(guard::UNAUTHORIZED_PATH).into_response(),
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, "Admin role required").into_response()
            }
        }
    }
}

/// Resolve the session into the guard's inputs.
///
/// A missing session layer or a failed store lookup both count as
/// unauthenticated; by the time a request reaches an extractor,
/// resolution is never still loading.
async fn resolve(parts: &Parts) -> (ResolutionStatus, Option<CurrentAdmin>) {
    let Some(session) = parts.extensions.get::<Session>() else {
        return (ResolutionStatus::Unauthenticated, None);
    };
    match session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
    {
        Some(admin) => (ResolutionStatus::Authenticated, Some(admin)),
        None => (ResolutionStatus::Unauthenticated, None),
    }
}

/// Whether the client negotiated an HTML response.
///
/// Everything this service serves is JSON, so status codes are the
/// default; only a browser navigation (its `Accept` header names
/// `text/html`) gets a redirect it can follow to the sign-in page.
fn wants_html(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (status, admin) = resolve(parts).await;
        let role = admin.as_ref().map(|a| a.role);
        let redirect = wants_html(parts);

        match guard::evaluate(status, role, Role::Admin) {
            GuardDecision::Render => {
                // Render implies an authenticated session was found
                admin.map(Self).ok_or(AdminRejection::Unauthorized)
            }
            GuardDecision::Pending | GuardDecision::RedirectToSignIn => Err(if redirect {
                AdminRejection::RedirectToSignIn
            } else {
                AdminRejection::Unauthorized
            }),
            GuardDecision::RedirectToUnauthorized => Err(if redirect {
                AdminRejection::RedirectToUnauthorized
            } else {
                AdminRejection::Forbidden
            }),
        }
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}

/// Extractor that optionally resolves the current admin.
///
/// Never rejects; used by the sign-in page to skip the form for an
/// already-authenticated admin.
pub struct OptionalAdmin(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdmin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (_, admin) = resolve(parts).await;
        Ok(Self(admin))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_accepting(accept: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/products");
        if let Some(accept) = accept {
            builder = builder.header(header::ACCEPT, accept);
        }
        builder.body(()).expect("request").into_parts().0
    }

    async fn reject(parts: &mut Parts) -> AdminRejection {
        match <RequireAdmin as FromRequestParts<()>>::from_request_parts(parts, &()).await {
            Err(rejection) => rejection,
            Ok(_) => panic!("request without a session must not pass the guard"),
        }
    }

    #[tokio::test]
    async fn missing_session_is_401_for_json_clients() {
        let mut parts = parts_accepting(Some("application/json"));
        assert!(matches!(
            reject(&mut parts).await,
            AdminRejection::Unauthorized
        ));

        // No Accept header at all still gets a status code
        let mut parts = parts_accepting(None);
        assert!(matches!(
            reject(&mut parts).await,
            AdminRejection::Unauthorized
        ));
    }

    #[tokio::test]
    async fn missing_session_redirects_browsers_to_sign_in() {
        let mut parts = parts_accepting(Some("text/html,application/xhtml+xml;q=0.9"));
        assert!(matches!(
            reject(&mut parts).await,
            AdminRejection::RedirectToSignIn
        ));
    }
}
