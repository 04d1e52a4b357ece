//! Error type for the backing commerce API.

use thiserror::Error;

/// Error surfaced by the resource client.
///
/// Callers branch on success/failure only, with one exception: a
/// validation rejection carries a server-supplied message that is shown
/// to the operator verbatim, so it is the one distinguished variant.
/// Transport failures and non-validation HTTP failures are the same
/// kind, distinguished only by message text.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The server rejected the payload semantics (400/422 with a
    /// parseable error body). The message is shown verbatim.
    #[error("{0}")]
    Validation(String),

    /// The request never completed or the server answered non-2xx.
    #[error("request failed: {0}")]
    Request(String),
}

impl BackendError {
    /// Whether this error carries an operator-facing validation message.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
