// Reporting API status endpoints

use tracing::debug;

use crate::client::ScmClient;
use crate::error::Error;
use crate::models::{ScmNodeStatus, ScmUplinkStatus};

impl ScmClient {
    /// Live uplink addresses for every node.
    ///
    /// `GET scm.reporting/1.0/uplinks`
    pub async fn list_uplink_status(&self) -> Result<Vec<ScmUplinkStatus>, Error> {
        debug!("listing uplink status");
        self.get_status("uplinks").await
    }

    /// Live node state, including the HA role.
    ///
    /// `GET scm.reporting/1.0/nodes`
    pub async fn list_node_status(&self) -> Result<Vec<ScmNodeStatus>, Error> {
        debug!("listing node status");
        self.get_status("nodes").await
    }
}
