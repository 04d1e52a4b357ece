//! Sign-in and sign-out handlers.
//!
//! Credential verification is delegated to the backing API; the admin
//! service never stores credential material. The session carries only
//! the [`CurrentAdmin`] identity. Role enforcement happens at the
//! guard on each request, not here, so a non-admin can sign in and
//! will be turned away from every protected view.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::{BackendError, ResourceApi};
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{OptionalAdmin, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Sign-in request body.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

// Keep the password out of Debug-formatted request logs
impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Verify credentials against the backing API and establish a session.
#[instrument(skip(state, session, existing, request), fields(email = %request.email))]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    OptionalAdmin(existing): OptionalAdmin,
    Json(request): Json<SignInRequest>,
) -> Result<Json<CurrentAdmin>, AppError> {
    let verified = state
        .backend()
        .create(
            "auth/verify",
            &json!({"email": request.email, "password": request.password}),
        )
        .await
        .map_err(|error| match error {
            // A rejection is "wrong credentials", never echoed in detail
            BackendError::Validation(_) => {
                AppError::Unauthorized("Invalid credentials".to_string())
            }
            other => AppError::Backend(other),
        })?;

    let admin: CurrentAdmin = serde_json::from_value(verified)
        .map_err(|e| AppError::Internal(format!("malformed auth response: {e}")))?;

    // Same verified identity as the live session: keep it
    if let Some(current) = existing {
        if current.id == admin.id {
            return Ok(Json(current));
        }
    }

    // Fresh session id on privilege change
    session.cycle_id().await.map_err(|e| {
        tracing::error!("Failed to cycle session id: {e}");
        AppError::Internal("session error".to_string())
    })?;
    set_current_admin(&session, &admin).await.map_err(|e| {
        tracing::error!("Failed to store session: {e}");
        AppError::Internal("session error".to_string())
    })?;
    set_sentry_user(admin.id.as_str(), Some(admin.email.as_str()));

    tracing::info!(admin_id = %admin.id, "admin signed in");
    Ok(Json(admin))
}

/// Destroy the session.
#[instrument(skip(session))]
pub async fn sign_out(session: Session) -> Response {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }
    clear_sentry_user();
    StatusCode::NO_CONTENT.into_response()
}
