// ── Domain model ──
//
// Canonical, API-independent representations of the realm's inventory
// (organizations, sites, nodes) and its live status (uplinks, HA role,
// open tunnels). Built fresh on every listing, never persisted.

pub mod inventory;
pub mod lookup;
pub mod status;

pub use inventory::{Node, Organization, Site};
pub use lookup::{ModelCatalog, ModelLookup};
pub use status::{ActiveTunnel, HaState, NodeStatus, UplinkStatus};
