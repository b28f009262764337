//! Config subcommand handlers.

use std::path::{Path, PathBuf};

use dialoguer::Select;

use steelssh_config::{Config, config_path, save_config, store_password};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{load, parse_realm};
use crate::error::{CliError, prompt_err};
use crate::output;
use crate::prompt;

// ── Helpers ─────────────────────────────────────────────────────────

fn target_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Format config for display, masking the password.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref realm) = cfg.realm {
        let _ = writeln!(out, "realm = \"{realm}\"");
    }
    if let Some(ref username) = cfg.username {
        let _ = writeln!(out, "username = \"{username}\"");
    }
    if cfg.password.is_some() {
        let _ = writeln!(out, "password = \"****\"");
    }
    if let Some(ref ca) = cfg.ca_cert {
        let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
    }
    let _ = writeln!(out, "ssh_user = \"{}\"", cfg.ssh_user);
    let _ = writeln!(out, "timeout = {}", cfg.timeout);
    let _ = write!(out, "tunnel_settle_secs = {}", cfg.tunnel_settle_secs);

    out
}

/// Interactive wizard. Existing values are offered as defaults.
fn init(path: &Path, mut cfg: Config) -> Result<(), CliError> {
    eprintln!("steelssh configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    let realm = prompt::text("Realm", cfg.realm.as_deref())?;
    let realm_host = parse_realm(&realm)?.host().to_owned();
    let username = prompt::text("Username", cfg.username.as_deref())?;
    let password = prompt::password("Password")?;

    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Don't store (prompt every time)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(|dialoguer::Error::IO(e)| prompt_err(e))?;

    cfg.password = match selection {
        0 => {
            store_password(&realm_host, &password)?;
            eprintln!("   Password stored in system keyring");
            None
        }
        1 => Some(password),
        _ => None,
    };
    cfg.realm = Some(realm_host);
    cfg.username = Some(username);

    save_config(&cfg, path)?;
    eprintln!("\n   Config written to {}", path.display());
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let path = target_path(global);
            let cfg = load(global)?;
            prompt::blocking(move || init(&path, cfg)).await
        }

        ConfigCommand::Show => {
            let cfg = load(global)?;
            output::print_output(&format_config_redacted(&cfg));
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&target_path(global).display().to_string());
            Ok(())
        }
    }
}
