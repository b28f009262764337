//! Configuration for the `steelssh` binary.
//!
//! A flat TOML file, `STEELSSH_*` environment overrides, and the password
//! chain (env, system keyring, plaintext). Everything resolves into
//! `steelssh_core::ControllerConfig`; nothing here talks to a realm.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

use steelssh_core::{ControllerConfig, Realm};

/// Keyring service name; entries are keyed `{realm}/password`.
pub const KEYRING_SERVICE: &str = "steelssh";

/// Prefix for environment overrides (`STEELSSH_REALM`, ...).
pub const ENV_PREFIX: &str = "STEELSSH_";

/// Read directly rather than through figment so it can outrank the keyring.
pub const PASSWORD_ENV: &str = "STEELSSH_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Realm name or host (e.g. `acme` or `acme.riverbed.cc`).
    #[serde(default, deserialize_with = "string_or_number")]
    pub realm: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub username: Option<String>,

    /// Plaintext password (prefer the keyring).
    pub password: Option<String>,

    /// Extra CA certificate to trust for the realm.
    pub ca_cert: Option<PathBuf>,

    /// Login for direct SSH sessions.
    #[serde(default = "default_ssh_user")]
    pub ssh_user: String,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds to wait after opening a tunnel before reading its command.
    #[serde(default = "default_tunnel_settle")]
    pub tunnel_settle_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            realm: None,
            username: None,
            password: None,
            ca_cert: None,
            ssh_user: default_ssh_user(),
            timeout: default_timeout(),
            tunnel_settle_secs: default_tunnel_settle(),
        }
    }
}

/// Env values are typed by content, so `STEELSSH_USERNAME=12345` arrives
/// as an integer.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Unsigned(n) => n.to_string(),
        Raw::Signed(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}

fn default_ssh_user() -> String {
    steelssh_core::config::DEFAULT_SSH_USER.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_tunnel_settle() -> u64 {
    steelssh_core::config::DEFAULT_TUNNEL_SETTLE.as_secs()
}

/// Realm and login as far as configuration knows them. Either may be
/// missing; the caller decides whether to prompt. The password is resolved
/// separately, once the realm in use is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub realm: Option<String>,
    pub username: Option<String>,
}

impl Config {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            realm: self.realm.clone(),
            username: self.username.clone(),
        }
    }

    /// Password for `realm`: `STEELSSH_PASSWORD`, then the keyring, then
    /// the plaintext `password` key.
    pub fn resolve_password(&self, realm: &str) -> Option<SecretString> {
        if let Ok(pw) = std::env::var(PASSWORD_ENV) {
            debug!("password taken from environment");
            return Some(SecretString::from(pw));
        }

        if let Some(pw) = keyring_password(realm) {
            debug!(realm, "password taken from keyring");
            return Some(pw);
        }

        self.password.clone().map(SecretString::from)
    }

    /// Apply file settings to a core config for an already-resolved realm
    /// and login.
    pub fn controller_config(
        &self,
        realm: Realm,
        credentials: steelssh_core::Credentials,
    ) -> ControllerConfig {
        let mut config = ControllerConfig::new(realm, credentials);
        config.timeout = Duration::from_secs(self.timeout);
        config.tunnel_settle = Duration::from_secs(self.tunnel_settle_secs);
        config.ssh_user.clone_from(&self.ssh_user);
        config.ca_cert.clone_from(&self.ca_cert);
        config
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "steelssh", "steelssh").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("steelssh");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` (or the default location) plus environment.
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    load_config_from(&path)
}

/// Load config from an explicit file plus environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["password"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

fn keyring_key(realm: &str) -> String {
    // Key on the normalized host so `acme` and `acme.riverbed.cc` match.
    let host = Realm::parse(realm).map_or_else(|_| realm.to_owned(), |r| r.host().to_owned());
    format!("{host}/password")
}

fn keyring_password(realm: &str) -> Option<SecretString> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(realm)).ok()?;
    entry.get_password().ok().map(SecretString::from)
}

/// Store the realm's password in the system keyring.
pub fn store_password(realm: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(realm))?;
    entry.set_password(password)?;
    Ok(())
}
