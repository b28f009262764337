// ── Core error types ──
//
// User-facing errors from steelssh-core. Consumers never see HTTP status
// codes or JSON parse failures directly: `CoreError::from_api` translates
// transport-layer errors into the operator-facing taxonomy, tagging each
// with the realm it concerns.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {realm}: {reason}")]
    ConnectionFailed { realm: String, reason: String },

    #[error("Incorrect username or password for {realm}")]
    AuthenticationFailed { realm: String },

    #[error("REST API is not enabled on {realm}")]
    ApiNotEnabled { realm: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Controller did not return an ssh command for the tunnel to {node_id}")]
    TunnelUnavailable { node_id: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Translate an API error, naming the realm it came from.
    pub fn from_api(err: steelssh_api::Error, realm: &str) -> Self {
        use steelssh_api::Error as ApiError;

        match err {
            ApiError::Authentication { .. } => Self::AuthenticationFailed {
                realm: realm.to_owned(),
            },
            ApiError::ApiNotEnabled { .. } => Self::ApiNotEnabled {
                realm: realm.to_owned(),
            },
            ref e @ ApiError::Transport(_) if e.is_connectivity() => Self::ConnectionFailed {
                realm: realm.to_owned(),
                reason: e.to_string(),
            },
            ApiError::Transport(e) => Self::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            ApiError::InvalidUrl(e) => Self::Config {
                message: format!("Invalid realm URL: {e}"),
            },
            ApiError::ClientBuild(reason) => Self::ConnectionFailed {
                realm: realm.to_owned(),
                reason,
            },
            ApiError::NotFound { resource } => Self::NotFound { resource },
            ApiError::Api { status, message } => Self::Api {
                message,
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => {
                Self::Internal(format!("Deserialization error: {message}"))
            }
        }
    }

    /// Returns `true` for failures to reach the realm at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }
}
