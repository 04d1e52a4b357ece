//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREDECK_BACKEND_URL` - Base URL of the backing commerce API
//! - `STOREDECK_BACKEND_TOKEN` - Service bearer token for the backing API
//! - `STOREDECK_SESSION_SECRET` - Session signing secret (min 32 chars)
//!
//! ## Optional
//! - `STOREDECK_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREDECK_PORT` - Listen port (default: 3001)
//! - `STOREDECK_BASE_URL` - Public URL for the admin panel (default: derived from host/port)
//! - `STOREDECK_CURRENCY` - ISO 4217 code the store trades in (default: USD)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (0.0 to 1.0, default 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default 1.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use storedeck_core::CurrencyCode;
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Currency the store trades in; money view models carry it
    pub currency: CurrencyCode,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Backing commerce API configuration
    pub backend: BackendConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Backing commerce API configuration.
///
/// Implements `Debug` manually to redact the service token.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the backing API (no trailing slash required)
    pub base_url: String,
    /// Service bearer token
    pub token: SecretString,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid,
    /// or if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREDECK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREDECK_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("STOREDECK_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREDECK_PORT".to_string(), e.to_string()))?;
        let base_url =
            get_optional_env("STOREDECK_BASE_URL").unwrap_or_else(|| format!("http://{host}:{port}"));
        let currency = get_env_or_default("STOREDECK_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREDECK_CURRENCY".to_string(), e.to_string())
            })?;

        let session_secret = SecretString::from(get_required_env("STOREDECK_SESSION_SECRET")?);
        validate_session_secret(&session_secret, "STOREDECK_SESSION_SECRET")?;

        let backend = BackendConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            currency,
            session_secret,
            backend,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("STOREDECK_BACKEND_URL")?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "STOREDECK_BACKEND_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }

        let token = get_required_env("STOREDECK_BACKEND_TOKEN")?;
        validate_secret_strength(&token, "STOREDECK_BACKEND_TOKEN")?;

        Ok(Self {
            base_url,
            token: SecretString::from(token),
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    validate_secret_strength(value, var_name)
}

/// Reject obvious placeholder values left over from setup templates.
fn validate_secret_strength(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let lowered = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("looks like a placeholder (contains \"{pattern}\")"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_session_secret_is_rejected() {
        let secret = SecretString::from("too-short");
        let result = validate_session_secret(&secret, "STOREDECK_SESSION_SECRET");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn placeholder_secret_is_rejected() {
        let result = validate_secret_strength(
            "changeme-please-0000000000000000000000",
            "STOREDECK_BACKEND_TOKEN",
        );
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn strong_secret_passes() {
        let secret = SecretString::from("kS8fj2nQpL5xW9vYbT3mZcR7dH1gA4eU");
        assert!(validate_session_secret(&secret, "STOREDECK_SESSION_SECRET").is_ok());
    }

    #[test]
    fn backend_debug_redacts_token() {
        let config = BackendConfig {
            base_url: "https://api.storedeck.dev".to_string(),
            token: SecretString::from("kS8fj2nQpL5xW9vYbT3mZcR7dH1gA4eU"),
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("kS8fj2nQpL5"));
    }
}
