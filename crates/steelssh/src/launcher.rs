//! External process launcher.
//!
//! Runs an ssh invocation in the foreground with the terminal handed
//! over. A command that fails to start is reported separately from a
//! remote session that ends with a failure status.

use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, info, warn};

use steelssh_core::SshInvocation;

#[derive(Debug)]
pub enum LaunchOutcome {
    /// The command ran; its status is informational only.
    Exited(ExitStatus),
    /// The command never started (e.g. `ssh` not on `PATH`).
    FailedToStart(io::Error),
}

/// Run `invocation` with inherited stdio and wait for it to exit.
pub async fn run(invocation: &SshInvocation) -> LaunchOutcome {
    info!(command = %invocation, "starting session");

    let status = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    match status {
        Ok(status) => {
            if status.success() {
                debug!("session ended");
            } else {
                debug!(%status, "session ended with failure status");
            }
            LaunchOutcome::Exited(status)
        }
        Err(e) => {
            warn!(program = %invocation.program, error = %e, "failed to start session");
            LaunchOutcome::FailedToStart(e)
        }
    }
}
