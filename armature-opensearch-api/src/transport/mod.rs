//! The seam between endpoint dispatch and the HTTP layer.

mod opensearch;

pub use self::opensearch::OpenSearchTransport;

use crate::error::Result;
use async_trait::async_trait;
use http::Method;
use std::collections::BTreeMap;

/// A fully resolved HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint path, starting with `/`.
    pub path: String,
    /// Query parameters.
    pub query: BTreeMap<String, String>,
    /// Extra headers.
    pub headers: BTreeMap<String, String>,
    /// JSON body.
    pub body: Option<Vec<u8>>,
}

/// A raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body; empty when the server sent none.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends HTTP requests to a cluster.
///
/// Implementations own connection handling, authentication and TLS. They
/// return any response that arrived, whatever its status; only failures to
/// get a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Headers and query parameters added to every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    headers: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
}

impl TransportOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    pub fn with_query_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Headers.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Query parameters.
    pub fn query_parameters(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Merge into a request. Endpoint-specific query parameters win over
    /// option defaults with the same name.
    pub(crate) fn apply(&self, request: &mut TransportRequest) {
        for (name, value) in &self.query {
            request
                .query
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        for (name, value) in &self.headers {
            request.headers.insert(name.clone(), value.clone());
        }
    }
}
