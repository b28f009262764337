// Config API SSH tunnel endpoints
//
// The controller brokers SSH access to appliances without a reachable
// public address. A tunnel is opened per node, inspected for the ssh
// command line to run, and deleted once the session ends.

use tracing::debug;

use crate::client::ScmClient;
use crate::error::Error;
use crate::models::{ScmTunnel, ScmTunnelStatus};

fn tunnel_resource(node_id: &str) -> String {
    format!("sshtunnel/{node_id}")
}

impl ScmClient {
    /// List tunnels the controller currently holds open.
    ///
    /// `GET scm.config/1.0/sshtunnel`
    pub async fn list_tunnels(&self) -> Result<Vec<ScmTunnel>, Error> {
        debug!("listing active tunnels");
        self.get("sshtunnel").await
    }

    /// Ask the controller to open a tunnel to a node.
    ///
    /// `POST scm.config/1.0/sshtunnel/{node_id}`
    pub async fn start_tunnel(&self, node_id: &str) -> Result<(), Error> {
        debug!(node_id, "starting tunnel");
        self.post(&tunnel_resource(node_id)).await
    }

    /// Fetch the state of a node's tunnel, including the `ssh_help` command.
    ///
    /// `GET scm.config/1.0/sshtunnel/{node_id}`
    pub async fn tunnel_status(&self, node_id: &str) -> Result<ScmTunnelStatus, Error> {
        debug!(node_id, "fetching tunnel status");
        self.get_object(&tunnel_resource(node_id)).await
    }

    /// Tear down a node's tunnel.
    ///
    /// `DELETE scm.config/1.0/sshtunnel/{node_id}`
    pub async fn stop_tunnel(&self, node_id: &str) -> Result<(), Error> {
        debug!(node_id, "stopping tunnel");
        self.delete(&tunnel_resource(node_id)).await
    }
}
