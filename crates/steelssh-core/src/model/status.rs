// ── Live status domain types ──

use serde::{Deserialize, Serialize};

/// One uplink's addresses as seen by the reporting API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UplinkStatus {
    pub node_id: String,
    /// Address on the uplink interface (`v4ip`).
    pub internal_ip: Option<String>,
    /// Translated public address (`v4ip_ext`); absent until the appliance
    /// has reported one.
    pub external_ip: Option<String>,
}

impl UplinkStatus {
    /// Addresses this uplink contributes to the directory, internal first.
    ///
    /// An uplink without a known external address contributes nothing:
    /// its internal address is not reachable from the operator's side.
    pub fn reachable_addresses(&self) -> impl Iterator<Item = &str> {
        let external = non_empty(self.external_ip.as_deref());
        let internal = external.and(non_empty(self.internal_ip.as_deref()));
        internal.into_iter().chain(external)
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// High-availability role of a node within its site.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum HaState {
    #[default]
    None,
    Master,
    Backup,
}

impl HaState {
    /// Parse the reporting API's `ha_state`; anything but `master` or
    /// `backup` means the node is not part of an HA pair.
    pub fn from_report(raw: Option<&str>) -> Self {
        match raw {
            Some("master") => Self::Master,
            Some("backup") => Self::Backup,
            _ => Self::None,
        }
    }

    /// Suffix appended to the site's display name, e.g. `" [HA Master]"`.
    pub fn site_annotation(self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Master | Self::Backup => Some(format!(" [HA {self}]")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub node_id: String,
    pub ha_state: HaState,
}

/// A tunnel the controller currently holds open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTunnel {
    pub node_id: String,
}
