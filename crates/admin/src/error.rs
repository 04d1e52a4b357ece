//! Unified error handling for the admin service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::BackendError;
use crate::mutation::MutationError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backing commerce API call failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A mutation was rejected or failed.
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The inner detail of a server-side failure, for logs only.
    ///
    /// `MutationError::Failed` displays as a generic "operation failed",
    /// so the transport detail it carries would otherwise never reach a
    /// log line. Client-facing bodies stay redacted.
    fn internal_detail(&self) -> Option<&str> {
        match self {
            Self::Internal(detail)
            | Self::Backend(BackendError::Request(detail))
            | Self::Mutation(MutationError::Failed(detail)) => Some(detail),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server-side failures with Sentry
        if let Some(detail) = self.internal_detail() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                detail,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Backend(BackendError::Request(_)) | Self::Mutation(MutationError::Failed(_)) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Backend(BackendError::Validation(_))
            | Self::Mutation(MutationError::Validation(_))
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        // Don't expose internal error details to clients. Validation
        // messages are the exception: operators see those verbatim.
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Backend(BackendError::Request(_)) | Self::Mutation(MutationError::Failed(_)) => {
                "External service error".to_string()
            }
            Self::Backend(BackendError::Validation(message))
            | Self::Mutation(MutationError::Validation(message)) => message.clone(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context from the signed-in admin.
pub fn set_sentry_user(admin_user_id: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Backend(BackendError::Request("boom".into()))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn validation_messages_are_returned_verbatim() {
        let response = AppError::Mutation(MutationError::Validation("name is taken".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn failed_mutation_detail_survives_for_logging() {
        let err = AppError::Mutation(MutationError::Failed("request failed: timeout".into()));
        // Display is the generic surface, the log field keeps the cause
        assert_eq!(err.to_string(), "Mutation error: operation failed");
        assert_eq!(err.internal_detail(), Some("request failed: timeout"));

        let err = AppError::NotFound("p1".to_string());
        assert_eq!(err.internal_detail(), None);
    }

    #[tokio::test]
    async fn internal_detail_is_not_exposed() {
        let response = AppError::Internal("db password leaked".to_string()).into_response();
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("body");
        assert_eq!(&body[..], b"Internal server error");
    }
}
