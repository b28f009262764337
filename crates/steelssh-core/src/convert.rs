// ── API-to-domain type conversions ──
//
// Bridges raw `steelssh_api::models` response types into the canonical
// `steelssh_core::model` types. Each `From` impl renames wire fields and
// normalizes empty strings to `None`.

use steelssh_api::models::{
    ScmNode, ScmNodeStatus, ScmOrg, ScmSite, ScmTunnel, ScmUplinkStatus,
};

use crate::model::{ActiveTunnel, HaState, Node, NodeStatus, Organization, Site, UplinkStatus};

/// Treat `""` the same as a missing field.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

impl From<ScmOrg> for Organization {
    fn from(org: ScmOrg) -> Self {
        Self {
            id: org.id,
            name: org.name,
            longname: non_empty(org.longname),
        }
    }
}

impl From<ScmSite> for Site {
    fn from(site: ScmSite) -> Self {
        Self {
            id: site.id,
            name: site.name,
            organization_id: non_empty(site.org),
        }
    }
}

impl From<ScmNode> for Node {
    fn from(node: ScmNode) -> Self {
        Self {
            id: node.id,
            site_id: non_empty(node.site),
            organization_id: non_empty(node.org),
            model: non_empty(node.model),
            // Kept verbatim: an empty serial marks a shadow node.
            serial: node.serial,
        }
    }
}

impl From<ScmUplinkStatus> for UplinkStatus {
    fn from(uplink: ScmUplinkStatus) -> Self {
        Self {
            node_id: uplink.node,
            internal_ip: non_empty(uplink.v4ip),
            external_ip: non_empty(uplink.v4ip_ext),
        }
    }
}

impl From<ScmNodeStatus> for NodeStatus {
    fn from(status: ScmNodeStatus) -> Self {
        Self {
            ha_state: HaState::from_report(status.ha_state.as_deref()),
            node_id: status.id,
        }
    }
}

impl From<ScmTunnel> for ActiveTunnel {
    fn from(tunnel: ScmTunnel) -> Self {
        Self {
            node_id: tunnel.node_id,
        }
    }
}

/// Convert a whole API collection into domain types.
pub(crate) fn collect<A, D: From<A>>(items: Vec<A>) -> Vec<D> {
    items.into_iter().map(D::from).collect()
}
