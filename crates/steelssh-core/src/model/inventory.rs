// ── Inventory domain types ──

use serde::{Deserialize, Serialize};

/// Serial the controller reports for placeholder nodes without hardware.
pub const SHADOW_SERIAL: &str = "shadow";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    /// Short name shown in listings.
    pub name: String,
    pub longname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub organization_id: Option<String>,
}

/// A managed appliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub site_id: Option<String>,
    pub organization_id: Option<String>,
    /// Internal model code (e.g. `panda`); see [`ModelLookup`](super::ModelLookup).
    pub model: Option<String>,
    pub serial: Option<String>,
}

impl Node {
    /// A shadow node is a placeholder with no physical appliance behind it:
    /// its serial is missing, empty, or the `"shadow"` sentinel.
    pub fn is_shadow(&self) -> bool {
        match self.serial.as_deref().map(str::trim) {
            None | Some("" | SHADOW_SERIAL) => true,
            Some(_) => false,
        }
    }
}
