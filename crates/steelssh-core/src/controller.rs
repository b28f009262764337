// ── Controller facade ──
//
// One SteelConnect Manager realm, seen from the operator's side: fetch
// the device directory, open and close controller-brokered tunnels.
// Every API failure leaves here as a `CoreError` naming the realm.

use tracing::{debug, info, warn};

use steelssh_api::transport::{TlsMode, TransportConfig};
use steelssh_api::ScmClient;

use crate::config::ControllerConfig;
use crate::convert;
use crate::directory::{Directory, DirectoryInput};
use crate::error::CoreError;
use crate::model::{
    ActiveTunnel, ModelCatalog, Node, NodeStatus, Organization, Site, UplinkStatus,
};
use crate::session::SshInvocation;

/// Entry point for consumers.
pub struct Controller {
    client: ScmClient,
    config: ControllerConfig,
}

impl Controller {
    /// Build the HTTP client for the configured realm. Does not touch the
    /// network.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: config
                .ca_cert
                .clone()
                .map_or(TlsMode::System, TlsMode::CustomCa),
            timeout: config.timeout,
        };
        let client = ScmClient::new(&config.realm, config.credentials.clone(), &transport)
            .map_err(|e| CoreError::from_api(e, config.realm.host()))?;
        Ok(Self { client, config })
    }

    /// Wrap an existing client (e.g. one pointed at a mock server).
    pub fn from_client(client: ScmClient, config: ControllerConfig) -> Self {
        Self { client, config }
    }

    /// The realm host errors are reported against.
    pub fn realm(&self) -> &str {
        self.config.realm.host()
    }

    fn api_err(&self, err: steelssh_api::Error) -> CoreError {
        CoreError::from_api(err, self.realm())
    }

    // ── Directory ────────────────────────────────────────────────────

    /// Fetch inventory, live status, and open tunnels, then join them into
    /// the sorted device directory.
    pub async fn directory(&self) -> Result<Directory, CoreError> {
        let organizations: Vec<Organization> = convert::collect(
            self.client.list_orgs().await.map_err(|e| self.api_err(e))?,
        );
        let sites: Vec<Site> = convert::collect(
            self.client.list_sites().await.map_err(|e| self.api_err(e))?,
        );
        let nodes: Vec<Node> = convert::collect(
            self.client.list_nodes().await.map_err(|e| self.api_err(e))?,
        );
        let uplinks: Vec<UplinkStatus> = convert::collect(
            self.client
                .list_uplink_status()
                .await
                .map_err(|e| self.api_err(e))?,
        );
        let node_status: Vec<NodeStatus> = convert::collect(
            self.client
                .list_node_status()
                .await
                .map_err(|e| self.api_err(e))?,
        );
        let tunnels = self.active_tunnels().await;

        debug!(
            orgs = organizations.len(),
            sites = sites.len(),
            nodes = nodes.len(),
            uplinks = uplinks.len(),
            tunnels = tunnels.len(),
            "fetched realm inventory"
        );

        Ok(Directory::build(
            &DirectoryInput {
                organizations: &organizations,
                sites: &sites,
                nodes: &nodes,
                uplinks: &uplinks,
                node_status: &node_status,
                tunnels: &tunnels,
            },
            &ModelCatalog,
        ))
    }

    /// Open tunnels only mark listing rows, so a failure to read them
    /// degrades to "none open".
    async fn active_tunnels(&self) -> Vec<ActiveTunnel> {
        match self.client.list_tunnels().await {
            Ok(tunnels) => convert::collect(tunnels),
            Err(e) => {
                warn!(error = %e, "could not list active tunnels");
                Vec::new()
            }
        }
    }

    // ── Tunnels ──────────────────────────────────────────────────────

    /// Ask the controller for a tunnel to `node_id`, wait for it to settle,
    /// and return the command that attaches to it.
    pub async fn open_tunnel(&self, node_id: &str) -> Result<SshInvocation, CoreError> {
        info!(node_id, realm = self.realm(), "opening tunnel");
        self.client
            .start_tunnel(node_id)
            .await
            .map_err(|e| self.api_err(e))?;

        tokio::time::sleep(self.config.tunnel_settle).await;

        let status = self
            .client
            .tunnel_status(node_id)
            .await
            .map_err(|e| self.api_err(e))?;

        let ssh_help = status
            .ssh_help
            .filter(|help| !help.trim().is_empty())
            .ok_or_else(|| CoreError::TunnelUnavailable {
                node_id: node_id.to_owned(),
            })?;

        debug!(node_id, %ssh_help, "tunnel ready");
        Ok(SshInvocation::tunnel(&ssh_help))
    }

    /// Tear down the tunnel to `node_id`.
    pub async fn close_tunnel(&self, node_id: &str) -> Result<(), CoreError> {
        info!(node_id, realm = self.realm(), "closing tunnel");
        self.client
            .stop_tunnel(node_id)
            .await
            .map_err(|e| self.api_err(e))
    }

    /// Direct session to one of a node's uplink addresses.
    pub fn direct_session(&self, address: &str) -> SshInvocation {
        SshInvocation::direct(&self.config.ssh_user, address)
    }
}
