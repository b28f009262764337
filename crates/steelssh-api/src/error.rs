use thiserror::Error;

/// Top-level error type for the `steelssh-api` crate.
///
/// Covers every failure mode of the SCM REST surfaces: authentication,
/// transport, API availability, and response decoding.
/// `steelssh-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The realm rejected the username/password pair (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Availability ────────────────────────────────────────────────
    /// The REST API is switched off for this realm (HTTP 502).
    #[error("REST API is not enabled: {message}")]
    ApiNotEnabled { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── API ─────────────────────────────────────────────────────────
    /// The requested resource does not exist (HTTP 404).
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-success response.
    #[error("SCM API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the realm rejected our credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if the controller could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::ApiNotEnabled { .. } => Some(502),
            Self::NotFound { .. } => Some(404),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
