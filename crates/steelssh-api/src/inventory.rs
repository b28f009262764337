// Config API inventory endpoints
//
// Organizations, sites, and nodes visible to the authenticated user.
// All three are realm-wide collections, not scoped to an organization.

use tracing::debug;

use crate::client::ScmClient;
use crate::error::Error;
use crate::models::{ScmNode, ScmOrg, ScmSite};

impl ScmClient {
    /// List all organizations.
    ///
    /// `GET scm.config/1.0/orgs`
    pub async fn list_orgs(&self) -> Result<Vec<ScmOrg>, Error> {
        debug!("listing organizations");
        self.get("orgs").await
    }

    /// List all sites.
    ///
    /// `GET scm.config/1.0/sites`
    pub async fn list_sites(&self) -> Result<Vec<ScmSite>, Error> {
        debug!("listing sites");
        self.get("sites").await
    }

    /// List all nodes (appliances), including shadow placeholders.
    ///
    /// `GET scm.config/1.0/nodes`
    pub async fn list_nodes(&self) -> Result<Vec<ScmNode>, Error> {
        debug!("listing nodes");
        self.get("nodes").await
    }
}
