// ── SSH session construction ──
//
// What the operator can do with a directory entry, and the exact command
// line each choice runs. Nothing here spawns processes; the binary owns
// the terminal.

use std::fmt;

use serde::Serialize;

use crate::directory::DirectoryEntry;

/// Keepalive the controller writes into its tunnel commands.
const CONTROLLER_KEEPALIVE: &str = "ServerAliveInterval=60";
/// Keepalive used for every session we start.
const SESSION_KEEPALIVE: &str = "ServerAliveInterval=30";
const CONNECT_TIMEOUT: &str = "ConnectTimeout=3";

/// One line of the per-device sub-menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionAction {
    /// Ask the controller to broker a tunnel to the node.
    Tunnel,
    /// SSH straight to one of the node's uplink addresses.
    Direct { address: String },
}

impl SessionAction {
    /// Sub-menu label.
    pub fn label(&self) -> String {
        match self {
            Self::Tunnel => "Build SSH tunnel via SteelConnect Manager".to_owned(),
            Self::Direct { address } => format!("SSH to {address}"),
        }
    }
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl DirectoryEntry {
    /// Sub-menu for this entry: the tunnel first, then one direct action
    /// per uplink address in directory order.
    pub fn session_actions(&self) -> Vec<SessionAction> {
        std::iter::once(SessionAction::Tunnel)
            .chain(self.uplinks.iter().map(|address| SessionAction::Direct {
                address: address.clone(),
            }))
            .collect()
    }
}

/// A fully specified external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl SshInvocation {
    /// Interactive session straight to `address`, with a forced TTY.
    pub fn direct(user: &str, address: &str) -> Self {
        Self {
            program: "ssh".into(),
            args: vec![
                "-tt".into(),
                "-o".into(),
                CONNECT_TIMEOUT.into(),
                "-o".into(),
                SESSION_KEEPALIVE.into(),
                format!("{user}@{address}"),
            ],
        }
    }

    /// Run the controller-supplied tunnel command through the platform
    /// shell, with its keepalive shortened.
    pub fn tunnel(ssh_help: &str) -> Self {
        let command = retune_keepalive(ssh_help.trim());
        let (program, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };
        Self {
            program: program.into(),
            args: vec![flag.into(), command],
        }
    }
}

impl fmt::Display for SshInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Replace the controller's 60 s keepalive with ours. Other options are
/// left untouched.
pub fn retune_keepalive(ssh_help: &str) -> String {
    ssh_help.replace(CONTROLLER_KEEPALIVE, SESSION_KEEPALIVE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(uplinks: &[&str]) -> DirectoryEntry {
        DirectoryEntry {
            organization: "ACME".into(),
            site: "HQ".into(),
            node_id: "node-1".into(),
            site_id: "site-1".into(),
            model: "SDI-130".into(),
            serial: "XN0001".into(),
            uplinks: uplinks.iter().map(|s| (*s).to_owned()).collect(),
            active_tunnel: false,
        }
    }

    #[test]
    fn tunnel_is_always_first() {
        let actions = entry(&["10.1.1.1", "203.0.113.5"]).session_actions();
        assert_eq!(
            actions,
            [
                SessionAction::Tunnel,
                SessionAction::Direct {
                    address: "10.1.1.1".into()
                },
                SessionAction::Direct {
                    address: "203.0.113.5".into()
                },
            ]
        );
        assert_eq!(actions[2].label(), "SSH to 203.0.113.5");
    }

    #[test]
    fn entry_without_uplinks_only_offers_the_tunnel() {
        assert_eq!(entry(&[]).session_actions(), [SessionAction::Tunnel]);
    }

    #[test]
    fn direct_invocation() {
        let ssh = SshInvocation::direct("root", "10.1.1.1");
        assert_eq!(
            ssh.to_string(),
            "ssh -tt -o ConnectTimeout=3 -o ServerAliveInterval=30 root@10.1.1.1"
        );
    }

    #[test]
    fn keepalive_rewrite_touches_only_the_interval() {
        let help = "ssh -o ServerAliveInterval=60 -o ServerAliveCountMax=3 -p 40001 root@acme.riverbed.cc";
        assert_eq!(
            retune_keepalive(help),
            "ssh -o ServerAliveInterval=30 -o ServerAliveCountMax=3 -p 40001 root@acme.riverbed.cc"
        );
        assert_eq!(retune_keepalive("ssh -p 1 root@h"), "ssh -p 1 root@h");
    }

    #[test]
    fn tunnel_runs_through_the_shell() {
        let ssh = SshInvocation::tunnel("ssh -o ServerAliveInterval=60 -p 40001 root@h\n");
        assert_eq!(ssh.args.len(), 2);
        assert_eq!(
            ssh.args.last().unwrap(),
            "ssh -o ServerAliveInterval=30 -p 40001 root@h"
        );
    }
}
