//! Subcommand handlers.

pub mod config_cmd;
pub mod connect;
pub mod list;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use steelssh_core::{Controller, Directory};

use crate::error::CliError;

/// Fetch the directory behind a spinner on stderr. The spinner hides
/// itself when stderr is not a terminal.
pub async fn fetch_directory(controller: &Controller) -> Result<Directory, CliError> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Fetching devices from {}...", controller.realm()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = controller.directory().await;
    spinner.finish_and_clear();
    Ok(result?)
}
