use std::fmt;

use secrecy::SecretString;
use url::Url;

use crate::error::Error;

/// Domain suffix for short realm names (`acme` → `acme.riverbed.cc`).
const HOSTED_SUFFIX: &str = ".riverbed.cc";

/// A SteelConnect Manager realm: the tenant host serving the REST API.
///
/// Accepts what operators usually type: a bare realm name, a full host
/// name, or a pasted URL with scheme and trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Realm {
    host: String,
}

impl Realm {
    /// Normalize operator input into a realm host.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);
        let host = without_scheme.trim_end_matches('/');

        if host.is_empty() || host.contains('/') || host.contains(char::is_whitespace) {
            return Err(Error::InvalidUrl(url::ParseError::InvalidDomainCharacter));
        }

        let host = if host.contains('.') {
            host.to_owned()
        } else {
            format!("{host}{HOSTED_SUFFIX}")
        };

        Ok(Self { host })
    }

    /// The realm host name (e.g. `acme.riverbed.cc`).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The HTTPS root of the realm, e.g. `https://acme.riverbed.cc/`.
    pub fn base_url(&self) -> Result<Url, Error> {
        Ok(Url::parse(&format!("https://{}/", self.host))?)
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

/// Basic-auth credentials for a realm.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn short_realm_gets_hosted_suffix() {
        let realm = Realm::parse("acme").unwrap();
        assert_eq!(realm.host(), "acme.riverbed.cc");
    }

    #[test]
    fn full_host_is_kept() {
        let realm = Realm::parse("scm.example.net").unwrap();
        assert_eq!(realm.host(), "scm.example.net");
    }

    #[test]
    fn pasted_url_is_stripped() {
        let realm = Realm::parse("  https://acme.riverbed.cc/ ").unwrap();
        assert_eq!(realm.host(), "acme.riverbed.cc");
        assert_eq!(
            realm.base_url().unwrap().as_str(),
            "https://acme.riverbed.cc/"
        );
    }

    #[test]
    fn empty_or_path_realm_is_rejected() {
        assert!(Realm::parse("   ").is_err());
        assert!(Realm::parse("https://acme.riverbed.cc/admin").is_err());
    }
}
