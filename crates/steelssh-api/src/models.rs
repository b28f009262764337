// SCM REST response types
//
// Models for the SteelConnect Manager config and reporting APIs. Collection
// endpoints wrap their payload in `{ "items": [...] }`. Fields use
// `#[serde(default)]` liberally because records differ between object
// kinds and firmware releases; anything we don't model lands in `extra`.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Collection envelope returned by every list endpoint.
///
/// ```json
/// { "items": [ ... ] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ItemsResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

// ── Config API ───────────────────────────────────────────────────────

/// Organization from `GET orgs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmOrg {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub longname: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Site from `GET sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmSite {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Owning organization id.
    #[serde(default)]
    pub org: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Appliance record from `GET nodes`.
///
/// `serial` is `null` for shadow (placeholder) nodes; `model` is the
/// internal model code, not the marketing name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmNode {
    pub id: String,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An open controller-brokered SSH tunnel from `GET sshtunnel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmTunnel {
    pub node_id: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Detail of a single tunnel from `GET sshtunnel/{node_id}`.
///
/// `ssh_help` is the complete ssh command line (including the proxy
/// settings) the controller prepared for this tunnel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmTunnelStatus {
    #[serde(default)]
    pub ssh_help: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Reporting API ────────────────────────────────────────────────────

/// Live uplink state from the reporting API's `GET uplinks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmUplinkStatus {
    #[serde(default)]
    pub id: Option<String>,
    /// Node the uplink belongs to.
    pub node: String,
    /// Address on the uplink interface.
    #[serde(default)]
    pub v4ip: Option<String>,
    /// Translated (public) address, `null` when unknown.
    #[serde(default)]
    pub v4ip_ext: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Live node state from the reporting API's `GET nodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmNodeStatus {
    pub id: String,
    /// `"master"`, `"backup"`, `"none"` or absent.
    #[serde(default)]
    pub ha_state: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
