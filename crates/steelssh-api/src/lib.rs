// steelssh-api: Async Rust client for the SteelConnect Manager REST API
//
// Two surfaces share one transport: the config API (`scm.config/1.0`)
// for inventory and SSH tunnels, and the reporting API
// (`scm.reporting/1.0`) for live uplink and node status.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod inventory;
mod reporting;
mod tunnels;

pub use auth::{Credentials, Realm};
pub use client::ScmClient;
pub use error::Error;
pub use transport::TransportConfig;
