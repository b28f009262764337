//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors.
//! The `Display` text is the one-line message shown by default; `-v`
//! prints the full diagnostic with help text.

use miette::Diagnostic;
use thiserror::Error;

use steelssh_config::ConfigError;
use steelssh_core::CoreError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error(
        "can't connect to SCM at {realm}. Please verify the config file or network connectivity."
    )]
    #[diagnostic(
        code(steelssh::connection_failed),
        help("Check the realm name and your network path to it.\nCause: {reason}")
    )]
    ConnectionFailed { realm: String, reason: String },

    #[error("401 Error: Incorrect username or password for {realm}")]
    #[diagnostic(
        code(steelssh::auth_failed),
        help("Re-enter your credentials with: steelssh config init")
    )]
    AuthFailed { realm: String },

    #[error("502 Error: REST API is not enabled on {realm}")]
    #[diagnostic(
        code(steelssh::api_not_enabled),
        help("Enable the REST API for your account in SteelConnect Manager.")
    )]
    ApiNotEnabled { realm: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("No selection made. Bye!")]
    #[diagnostic(code(steelssh::cancelled))]
    Cancelled,

    #[error("CTRL+C pressed. Bye!")]
    #[diagnostic(code(steelssh::interrupted))]
    Interrupted,

    // ── Tunnels & API ────────────────────────────────────────────────
    #[error("SteelConnect Manager did not provide an ssh command for node {node_id}")]
    #[diagnostic(
        code(steelssh::tunnel_unavailable),
        help("The tunnel may need longer to come up; raise `tunnel_settle_secs`.")
    )]
    TunnelUnavailable { node_id: String },

    #[error("Resource not found: {resource}")]
    #[diagnostic(code(steelssh::not_found))]
    NotFound { resource: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(steelssh::api_error))]
    ApiError { status: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(steelssh::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(steelssh::config),
        help("Check the config file, or recreate it with: steelssh config init")
    )]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(steelssh::internal))]
    Internal(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(Box::new(err))
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { realm, reason } => Self::ConnectionFailed { realm, reason },
            CoreError::AuthenticationFailed { realm } => Self::AuthFailed { realm },
            CoreError::ApiNotEnabled { realm } => Self::ApiNotEnabled { realm },
            CoreError::TunnelUnavailable { node_id } => Self::TunnelUnavailable { node_id },
            CoreError::NotFound { resource } => Self::NotFound { resource },
            CoreError::Api { message, status } => Self::ApiError {
                status: status.map_or_else(|| "unknown".into(), |s| s.to_string()),
                message,
            },
            CoreError::Config { message } => Self::Validation {
                field: "realm".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

/// Map a dialoguer / terminal I/O failure into `CliError`. An interrupted
/// read means the operator pressed Ctrl+C inside the prompt.
pub fn prompt_err(err: impl Into<std::io::Error>) -> CliError {
    let err = err.into();
    if err.kind() == std::io::ErrorKind::Interrupted {
        CliError::Interrupted
    } else {
        CliError::Io(err)
    }
}
