//! OpenSearch client configuration.

use crate::error::{OpenSearchError, Result};
use std::collections::BTreeMap;
use std::time::Duration;

/// OpenSearch client configuration.
#[derive(Debug, Clone)]
pub struct OpenSearchConfig {
    /// OpenSearch URL(s).
    pub urls: Vec<String>,
    /// Basic auth username.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Prefix prepended to every endpoint path, for clusters behind a proxy.
    pub path_prefix: Option<String>,
    /// Headers sent with every request.
    pub default_headers: BTreeMap<String, String>,
    /// Ignore system proxy settings.
    pub disable_proxy: bool,
    /// Skip certificate verification (development clusters only).
    pub accept_invalid_certs: bool,
}

impl OpenSearchConfig {
    /// Create a new configuration with a single URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            password: None,
            request_timeout: Duration::from_secs(30),
            path_prefix: None,
            default_headers: BTreeMap::new(),
            disable_proxy: true,
            accept_invalid_certs: false,
        }
    }

    /// Create configuration with multiple URLs for a cluster.
    pub fn cluster(urls: Vec<String>) -> Self {
        Self {
            urls,
            ..Self::new("")
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `OPENSEARCH_URL`: comma-separated node URLs (default `http://localhost:9200`)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: basic auth
    /// - `OPENSEARCH_REQUEST_TIMEOUT`: timeout in seconds
    /// - `OPENSEARCH_PATH_PREFIX`: path prefix
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let urls: Vec<String> = lookup("OPENSEARCH_URL")
            .unwrap_or_else(|| "http://localhost:9200".to_string())
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();
        if urls.is_empty() {
            return Err(OpenSearchError::Config(
                "OPENSEARCH_URL contains no URLs".to_string(),
            ));
        }

        let mut config = Self::cluster(urls);
        config.username = lookup("OPENSEARCH_USERNAME");
        config.password = lookup("OPENSEARCH_PASSWORD");
        config.path_prefix = lookup("OPENSEARCH_PATH_PREFIX");

        if let Some(timeout) = lookup("OPENSEARCH_REQUEST_TIMEOUT") {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                OpenSearchError::Config(format!(
                    "OPENSEARCH_REQUEST_TIMEOUT must be a number of seconds, got '{}'",
                    timeout
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set basic authentication credentials.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the path prefix.
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Use or ignore system proxy settings.
    pub fn with_proxy(mut self, enabled: bool) -> Self {
        self.disable_proxy = !enabled;
        self
    }

    /// Skip certificate verification (DANGER: only for development).
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.accept_invalid_certs = true;
        self
    }
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self::new("http://localhost:9200")
    }
}
