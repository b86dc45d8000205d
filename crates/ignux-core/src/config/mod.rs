//! Client configuration.
//!
//! Both the API client and the content synchronizer take their settings as
//! explicit values. `from_env` exists for binaries; everything else goes
//! through `from_lookup` so tests never touch process state.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::util::{normalize_base_url, normalize_text_option};
use crate::{Error, Result};

/// Default backend base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
/// Default namespace prefix for content cache keys.
pub const DEFAULT_CACHE_NAMESPACE: &str = "ignux_content";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 120;

pub const ENV_API_BASE_URL: &str = "IGNUX_API_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "IGNUX_HTTP_TIMEOUT_SECS";
pub const ENV_CONTENT_API_URL: &str = "IGNUX_CONTENT_API_URL";
pub const ENV_CACHE_NAMESPACE: &str = "IGNUX_CACHE_NAMESPACE";

/// Settings for [`crate::api::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (no trailing slash).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Build a config for an explicit base URL with the default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url, "API base URL")?,
            ..Self::default()
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `IGNUX_API_BASE_URL` and `IGNUX_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = match normalize_text_option(lookup(ENV_API_BASE_URL)) {
            Some(url) => normalize_base_url(&url, ENV_API_BASE_URL)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let timeout_secs = match normalize_text_option(lookup(ENV_HTTP_TIMEOUT_SECS)) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Settings for [`crate::sync::ContentSynchronizer`].
///
/// With `remote_base_url` unset the synchronizer runs in cache-only mode and
/// never touches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub remote_base_url: Option<String>,
    pub namespace: String,
    pub timeout: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            remote_base_url: None,
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SyncOptions {
    /// Cache-only options under the default namespace.
    pub fn offline() -> Self {
        Self::default()
    }

    /// Options with a remote content endpoint.
    pub fn with_remote(remote_base_url: &str) -> Result<Self> {
        Ok(Self {
            remote_base_url: Some(normalize_base_url(remote_base_url, "content API URL")?),
            ..Self::default()
        })
    }

    pub fn with_namespace(mut self, namespace: &str) -> Result<Self> {
        self.namespace = normalize_namespace(namespace)?;
        Ok(self)
    }

    /// Load from `IGNUX_CONTENT_API_URL`, `IGNUX_CACHE_NAMESPACE` and
    /// `IGNUX_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let remote_base_url = normalize_text_option(lookup(ENV_CONTENT_API_URL))
            .map(|url| normalize_base_url(&url, ENV_CONTENT_API_URL))
            .transpose()?;

        let namespace = match normalize_text_option(lookup(ENV_CACHE_NAMESPACE)) {
            Some(raw) => normalize_namespace(&raw)?,
            None => DEFAULT_CACHE_NAMESPACE.to_string(),
        };

        let timeout_secs = match normalize_text_option(lookup(ENV_HTTP_TIMEOUT_SECS)) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            remote_base_url,
            namespace,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// API client settings for the remote content endpoint, if any.
    pub fn remote_client_config(&self) -> Option<ClientConfig> {
        self.remote_base_url.as_ref().map(|base_url| ClientConfig {
            base_url: base_url.clone(),
            timeout: self.timeout,
        })
    }
}

fn parse_timeout_secs(raw: &str) -> Result<u64> {
    let secs = raw.trim().parse::<u64>().map_err(|_| {
        Error::InvalidConfiguration(format!(
            "{ENV_HTTP_TIMEOUT_SECS} must be an integer in [1, {MAX_TIMEOUT_SECS}]"
        ))
    })?;
    if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(Error::InvalidConfiguration(format!(
            "{ENV_HTTP_TIMEOUT_SECS} must be in [1, {MAX_TIMEOUT_SECS}]"
        )));
    }
    Ok(secs)
}

fn normalize_namespace(raw: &str) -> Result<String> {
    let namespace = raw.trim();
    if namespace.is_empty() {
        return Err(Error::InvalidConfiguration(
            "cache namespace must not be empty".to_string(),
        ));
    }
    if namespace.chars().any(char::is_whitespace) {
        return Err(Error::InvalidConfiguration(
            "cache namespace must not contain whitespace".to_string(),
        ));
    }
    Ok(namespace.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn client_config_defaults_to_local_backend() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8000/api/v1");
    }

    #[test]
    fn client_config_reads_env_values() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("IGNUX_API_BASE_URL", " https://api.ignux.test/api/v1/ "),
            ("IGNUX_HTTP_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://api.ignux.test/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn client_config_rejects_bad_values() {
        assert!(
            ClientConfig::from_lookup(lookup_from(&[("IGNUX_API_BASE_URL", "api.ignux.test")]))
                .is_err()
        );
        assert!(
            ClientConfig::from_lookup(lookup_from(&[("IGNUX_HTTP_TIMEOUT_SECS", "0")])).is_err()
        );
        assert!(
            ClientConfig::from_lookup(lookup_from(&[("IGNUX_HTTP_TIMEOUT_SECS", "soon")]))
                .is_err()
        );
    }

    #[test]
    fn sync_options_without_remote_are_cache_only() {
        let options = SyncOptions::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(options.remote_base_url, None);
        assert_eq!(options.namespace, DEFAULT_CACHE_NAMESPACE);
        assert!(options.remote_client_config().is_none());
    }

    #[test]
    fn sync_options_blank_remote_is_cache_only() {
        let options =
            SyncOptions::from_lookup(lookup_from(&[("IGNUX_CONTENT_API_URL", "   ")])).unwrap();
        assert_eq!(options.remote_base_url, None);
    }

    #[test]
    fn sync_options_with_remote_build_client_config() {
        let options = SyncOptions::from_lookup(lookup_from(&[
            ("IGNUX_CONTENT_API_URL", "http://127.0.0.1:9000/content/"),
            ("IGNUX_CACHE_NAMESPACE", "site"),
        ]))
        .unwrap();
        assert_eq!(options.namespace, "site");
        let client = options.remote_client_config().unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:9000/content");
    }

    #[test]
    fn namespace_rejects_whitespace() {
        assert!(SyncOptions::offline().with_namespace("my site").is_err());
        assert!(SyncOptions::offline().with_namespace(" ").is_err());
    }
}
