//! [`Transport`] over the `opensearch` crate's low-level HTTP transport.

use super::{Transport, TransportRequest, TransportResponse};
use crate::config::OpenSearchConfig;
use crate::error::{OpenSearchError, Result};
use async_trait::async_trait;
use opensearch::http::headers::{HeaderMap, HeaderName, HeaderValue};
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::OpenSearch;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Sends requests through an [`OpenSearch`] client.
#[derive(Clone)]
pub struct OpenSearchTransport {
    client: OpenSearch,
    path_prefix: Option<String>,
    default_headers: BTreeMap<String, String>,
}

impl OpenSearchTransport {
    /// Create a transport for the configured cluster.
    pub fn new(config: &OpenSearchConfig) -> Result<Self> {
        info!(urls = ?config.urls, "Initializing OpenSearch transport");

        let url = config
            .urls
            .first()
            .ok_or_else(|| OpenSearchError::Config("No URLs provided".to_string()))?;
        if config.urls.len() > 1 {
            warn!(url = %url, "Multiple URLs configured; only the first is used");
        }

        let url = opensearch::http::Url::parse(url)
            .map_err(|e| OpenSearchError::Config(format!("Invalid URL '{}': {}", url, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let mut builder = TransportBuilder::new(conn_pool).timeout(config.request_timeout);

        if config.disable_proxy {
            builder = builder.disable_proxy();
        }

        #[cfg(any(feature = "rustls", feature = "native-tls"))]
        let mut builder = if config.accept_invalid_certs {
            builder.cert_validation(opensearch::cert::CertificateValidation::None)
        } else {
            builder
        };

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.auth(opensearch::auth::Credentials::Basic(
                user.clone(),
                pass.clone(),
            ));
        }

        let transport = builder
            .build()
            .map_err(|e| OpenSearchError::Config(e.to_string()))?;

        debug!("OpenSearch transport initialized");

        Ok(Self {
            client: OpenSearch::new(transport),
            path_prefix: config.path_prefix.clone(),
            default_headers: config.default_headers.clone(),
        })
    }

    /// Wrap an existing client.
    pub fn from_client(client: OpenSearch) -> Self {
        Self {
            client,
            path_prefix: None,
            default_headers: BTreeMap::new(),
        }
    }

    /// Get the underlying OpenSearch client.
    pub fn inner(&self) -> &OpenSearch {
        &self.client
    }

    fn headers(&self, extra: &BTreeMap<String, String>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.default_headers.iter().chain(extra) {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| OpenSearchError::transport(format!("Invalid header name '{}': {}", name, e), None))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| OpenSearchError::transport(format!("Invalid header value: {}", e), None))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

fn convert_method(method: &http::Method) -> Result<opensearch::http::Method> {
    use opensearch::http::Method as OsMethod;

    match *method {
        http::Method::GET => Ok(OsMethod::Get),
        http::Method::PUT => Ok(OsMethod::Put),
        http::Method::POST => Ok(OsMethod::Post),
        http::Method::DELETE => Ok(OsMethod::Delete),
        http::Method::HEAD => Ok(OsMethod::Head),
        ref other => Err(OpenSearchError::transport(
            format!("Unsupported HTTP method {}", other),
            None,
        )),
    }
}

/// Join a configured path prefix with an endpoint path, keeping exactly one
/// `/` between them.
pub(crate) fn join_path(prefix: Option<&str>, path: &str) -> String {
    let prefix = match prefix.map(|p| p.trim_matches('/')) {
        Some(p) if !p.is_empty() => p,
        _ => return path.to_string(),
    };
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("/{}", prefix)
    } else {
        format!("/{}/{}", prefix, path)
    }
}

#[async_trait]
impl Transport for OpenSearchTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = convert_method(&request.method)?;
        let path = join_path(self.path_prefix.as_deref(), &request.path);
        let headers = self.headers(&request.headers)?;
        let query = (!request.query.is_empty()).then_some(&request.query);

        let response = self
            .client
            .send(method, &path, headers, query, request.body, None)
            .await?;

        let status = response.status_code().as_u16();
        let body = response.text().await?.into_bytes();

        Ok(TransportResponse { status, body })
    }
}

impl std::fmt::Debug for OpenSearchTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSearchTransport")
            .field("path_prefix", &self.path_prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(None, "/_mapping"), "/_mapping");
        assert_eq!(join_path(Some(""), "/_mapping"), "/_mapping");
        assert_eq!(join_path(Some("/es"), "/_mapping"), "/es/_mapping");
        assert_eq!(join_path(Some("es/"), "/_mapping"), "/es/_mapping");
        assert_eq!(join_path(Some("/a/b/"), "/"), "/a/b");
    }

    #[test]
    fn test_convert_method() {
        assert!(matches!(
            convert_method(&http::Method::HEAD),
            Ok(opensearch::http::Method::Head)
        ));
        assert!(convert_method(&http::Method::OPTIONS).is_err());
    }

    #[test]
    fn test_new_requires_url() {
        let config = OpenSearchConfig::cluster(vec![]);
        assert!(matches!(
            OpenSearchTransport::new(&config),
            Err(OpenSearchError::Config(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let config = OpenSearchConfig::new("not a url");
        assert!(matches!(
            OpenSearchTransport::new(&config),
            Err(OpenSearchError::Config(_))
        ));
    }
}
