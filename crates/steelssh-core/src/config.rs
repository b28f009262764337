// ── Runtime connection configuration ──
//
// These types describe *how* to reach a SteelConnect Manager realm and how
// to shape SSH sessions. They carry credential data but never touch disk:
// the binary resolves files, env, keyring and prompts, then hands a
// `ControllerConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use steelssh_api::{Credentials, Realm};

/// Default login for direct SSH to an appliance's uplink address.
pub const DEFAULT_SSH_USER: &str = "root";

/// How long the controller needs after `POST sshtunnel/{node}` before the
/// tunnel's ssh command is available.
pub const DEFAULT_TUNNEL_SETTLE: Duration = Duration::from_secs(3);

/// Configuration for talking to a single realm.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Realm host (e.g. `acme.riverbed.cc`).
    pub realm: Realm,
    /// Basic-auth credentials for the REST API.
    pub credentials: Credentials,
    /// Request timeout.
    pub timeout: Duration,
    /// Additional CA certificate to trust, if any.
    pub ca_cert: Option<PathBuf>,
    /// Delay between opening a tunnel and reading its ssh command.
    pub tunnel_settle: Duration,
    /// Remote user for direct SSH sessions.
    pub ssh_user: String,
}

impl ControllerConfig {
    /// Config with default timeouts and SSH user.
    pub fn new(realm: Realm, credentials: Credentials) -> Self {
        Self {
            realm,
            credentials,
            timeout: Duration::from_secs(30),
            ca_cert: None,
            tunnel_settle: DEFAULT_TUNNEL_SETTLE,
            ssh_user: DEFAULT_SSH_USER.into(),
        }
    }
}
