//! Domain layer between `steelssh-api` and the `steelssh` binary.
//!
//! - **[`Controller`]**: Facade over one SteelConnect Manager realm:
//!   [`directory()`](Controller::directory) fetches inventory and live
//!   status and joins them into a [`Directory`];
//!   [`open_tunnel()`](Controller::open_tunnel) /
//!   [`close_tunnel()`](Controller::close_tunnel) drive controller-brokered
//!   SSH tunnels.
//!
//! - **[`Directory`]**: The flat, sorted list of addressable appliances,
//!   built from organizations, sites, nodes, uplink status, and HA status.
//!
//! - **[`SessionAction`] / [`SshInvocation`]**: What the operator can do
//!   with an entry, and the exact ssh command line each action runs.
//!
//! - **Domain model** ([`model`]): Canonical inventory and status types,
//!   plus the [`ModelLookup`] seam that turns model codes into product names.

pub mod config;
pub mod controller;
pub mod convert;
pub mod directory;
pub mod error;
pub mod model;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ControllerConfig;
pub use controller::Controller;
pub use directory::{Directory, DirectoryEntry, DirectoryInput};
pub use error::CoreError;
pub use session::{SessionAction, SshInvocation};

pub use model::{
    ActiveTunnel, HaState, ModelCatalog, ModelLookup, Node, NodeStatus, Organization, Site,
    UplinkStatus,
};

// Connection primitives callers need to build a `ControllerConfig`.
pub use steelssh_api::{Credentials, Realm};
