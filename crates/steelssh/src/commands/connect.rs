//! `steelssh connect`: the interactive pick-and-SSH loop.
//!
//! Listing, device choice, action choice, session, and back to a fresh
//! listing. Leaving any prompt without a valid number ends the program.

use std::future::Future;

use owo_colors::OwoColorize;
use tracing::{debug, warn};

use steelssh_core::{Controller, CoreError, SessionAction, SshInvocation};

use crate::error::CliError;
use crate::launcher::{self, LaunchOutcome};
use crate::output;
use crate::prompt;

const DEVICE_HINT: &str = "Type number to select site, or anything else to quit";
const ACTION_HINT: &str = "Type number to select action, or anything else to quit";

pub async fn handle(controller: &Controller, color: bool) -> Result<(), CliError> {
    loop {
        let directory = super::fetch_directory(controller).await?;
        if directory.is_empty() {
            eprintln!("No addressable devices found in {}.", controller.realm());
            return Ok(());
        }

        output::print_output(&output::render_directory_table(&directory));

        let entry = match prompt::choose(DEVICE_HINT, directory.len()).await? {
            Some(id) => directory.select(id).cloned(),
            None => None,
        }
        .ok_or(CliError::Cancelled)?;

        let actions = entry.session_actions();
        eprint!("{}", output::render_actions(&entry, &actions, color));

        let action = prompt::choose(ACTION_HINT, actions.len())
            .await?
            .and_then(|n| actions.get(n - 1))
            .ok_or(CliError::Cancelled)?;

        debug!(node_id = %entry.node_id, ?action, "running session");
        match action {
            SessionAction::Tunnel => {
                tunnel_session(controller, &entry.node_id, color, |ssh| async move {
                    launcher::run(&ssh).await
                })
                .await?;
            }
            SessionAction::Direct { address } => {
                let ssh = controller.direct_session(address);
                report_launch(&launcher::run(&ssh).await, color);
            }
        }
    }
}

/// Open a tunnel, hand its ssh command to `launch`, and always tear the
/// tunnel down afterwards, whether or not the session ran.
async fn tunnel_session<L, F>(
    controller: &Controller,
    node_id: &str,
    color: bool,
    launch: L,
) -> Result<(), CliError>
where
    L: FnOnce(SshInvocation) -> F,
    F: Future<Output = LaunchOutcome>,
{
    eprintln!("Building SSH tunnel via {}...", controller.realm());

    match controller.open_tunnel(node_id).await {
        Ok(ssh) => report_launch(&launch(ssh).await, color),
        Err(err @ CoreError::TunnelUnavailable { .. }) => notice(&err.to_string(), color),
        Err(err) => return Err(err.into()),
    }

    if let Err(err) = controller.close_tunnel(node_id).await {
        warn!(node_id, error = %err, "failed to close tunnel");
        notice(&format!("Could not close tunnel: {err}"), color);
    }
    Ok(())
}

fn report_launch(outcome: &LaunchOutcome, color: bool) {
    if let LaunchOutcome::FailedToStart(err) = outcome {
        notice(&format!("Could not start ssh: {err}"), color);
    }
}

fn notice(message: &str, color: bool) {
    if color {
        eprintln!("{}", message.yellow());
    } else {
        eprintln!("{message}");
    }
}
