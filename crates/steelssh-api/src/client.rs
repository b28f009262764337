// SCM REST HTTP client
//
// Wraps `reqwest::Client` with realm URL construction, Basic auth,
// `items` envelope unwrapping, and status-code classification. Endpoint
// helpers (inventory, reporting, tunnels) are inherent methods in
// separate files to keep this module focused on transport mechanics.

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{Credentials, Realm};
use crate::error::Error;
use crate::models::ItemsResponse;
use crate::transport::TransportConfig;

/// Path of the config API, relative to the realm root.
const CONFIG_API: &str = "api/scm.config/1.0/";
/// Path of the reporting API, relative to the realm root.
const REPORTING_API: &str = "api/scm.reporting/1.0/";

/// Which REST surface a resource lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Inventory and configuration (`scm.config`).
    Config,
    /// Live status (`scm.reporting`).
    Reporting,
}

impl Surface {
    fn prefix(self) -> &'static str {
        match self {
            Self::Config => CONFIG_API,
            Self::Reporting => REPORTING_API,
        }
    }
}

/// Raw HTTP client for a SteelConnect Manager realm.
///
/// Every request carries Basic auth. Collection reads return the unwrapped
/// `items` array -- the envelope is stripped before the caller sees it.
pub struct ScmClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl ScmClient {
    /// Create a client for a realm from a `TransportConfig`.
    pub fn new(
        realm: &Realm,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, realm.base_url()?, credentials))
    }

    /// Create a client with a pre-built `reqwest::Client` and an explicit
    /// base URL (e.g. a local mock server).
    pub fn with_client(http: reqwest::Client, mut base_url: Url, credentials: Credentials) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http,
            base_url,
            credentials,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}api/scm.{surface}/1.0/{resource}`.
    pub(crate) fn url(&self, surface: Surface, resource: &str) -> Result<Url, Error> {
        let path = format!("{}{}", surface.prefix(), resource.trim_start_matches('/'));
        Ok(self.base_url.join(&path)?)
    }

    // ── REST capability ─────────────────────────────────────────────

    /// `GET` a config collection and unwrap its `items`.
    pub async fn get<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, Error> {
        self.get_items(Surface::Config, resource).await
    }

    /// `GET` a reporting collection and unwrap its `items`.
    pub async fn get_status<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, Error> {
        self.get_items(Surface::Reporting, resource).await
    }

    /// `GET` a single config object (no `items` envelope).
    pub async fn get_object<T: DeserializeOwned>(&self, resource: &str) -> Result<T, Error> {
        let url = self.url(Surface::Config, resource)?;
        debug!("GET {url}");
        let body = self.send(self.http.get(url), resource).await?;
        decode(&body)
    }

    /// `POST` an empty JSON object to a config resource.
    pub async fn post(&self, resource: &str) -> Result<(), Error> {
        let url = self.url(Surface::Config, resource)?;
        debug!("POST {url}");
        let empty = serde_json::Map::new();
        self.send(self.http.post(url).json(&empty), resource).await?;
        Ok(())
    }

    /// `DELETE` a config resource.
    pub async fn delete(&self, resource: &str) -> Result<(), Error> {
        let url = self.url(Surface::Config, resource)?;
        debug!("DELETE {url}");
        self.send(self.http.delete(url), resource).await?;
        Ok(())
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get_items<T: DeserializeOwned>(
        &self,
        surface: Surface,
        resource: &str,
    ) -> Result<Vec<T>, Error> {
        let url = self.url(surface, resource)?;
        debug!("GET {url}");
        let body = self.send(self.http.get(url), resource).await?;
        let envelope: ItemsResponse<T> = decode(&body)?;
        trace!(resource, count = envelope.items.len(), "unwrapped items");
        Ok(envelope.items)
    }

    /// Attach credentials, send, and classify the response status.
    ///
    /// Returns the raw body on success.
    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<String, Error> {
        let resp = builder
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.password.expose_secret()),
            )
            .send()
            .await?;

        let status = resp.status();
        let host = self.base_url.host_str().unwrap_or_default().to_owned();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("incorrect username or password for {host}"),
            });
        }

        if status == reqwest::StatusCode::BAD_GATEWAY {
            return Err(Error::ApiNotEnabled {
                message: format!("REST API is not enabled on {host}"),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                resource: resource.to_owned(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }

        Ok(resp.text().await?)
    }
}

/// Deserialize a response body, keeping it around for debugging on failure.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
