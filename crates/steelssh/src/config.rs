//! CLI-aware configuration resolution.
//!
//! Precedence for realm and username: CLI flag, then config file / env,
//! then an interactive prompt. The password follows the chain in
//! `steelssh_config` and falls back to a prompt.

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use steelssh_config::{Config, load_config};
use steelssh_core::{ControllerConfig, Credentials, Realm};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::prompt;

/// Load the config file named by `--config` (or the default one).
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config(global.config.as_deref())?)
}

/// Resolve everything needed to reach the realm, prompting for whatever
/// flags and config leave open. Blocks on the terminal.
pub fn resolve_controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let cfg = load(global)?;
    let stored = cfg.credentials();

    let raw_realm = match global.realm.clone().or(stored.realm) {
        Some(realm) => realm,
        None => prompt::text("Realm", None)?,
    };
    let realm = parse_realm(&raw_realm)?;

    let username = match global.username.clone().or(stored.username) {
        Some(username) => username,
        None => prompt::text("Username", None)?,
    };

    // Resolve against the realm actually in use; `--realm` may differ from
    // the one stored in the file.
    let password = match cfg.resolve_password(realm.host()) {
        Some(password) => password,
        None => SecretString::from(prompt::password("Password")?),
    };

    debug!(realm = %realm, username, "resolved connection settings");

    let mut config = cfg.controller_config(realm, Credentials::new(username, password));
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

pub fn parse_realm(raw: &str) -> Result<Realm, CliError> {
    Realm::parse(raw).map_err(|_| CliError::Validation {
        field: "realm".into(),
        reason: format!("'{raw}' is not a realm name or host"),
    })
}
