//! OpenSearch client implementation.

use crate::{
    config::OpenSearchConfig,
    endpoint::Endpoint,
    error::{OpenSearchError, Result},
    indices::IndicesClient,
    transport::{OpenSearchTransport, Transport, TransportOptions, TransportRequest},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Typed OpenSearch client.
///
/// Cheap to clone; clones share the transport.
pub struct OpenSearchClient<T = OpenSearchTransport> {
    transport: Arc<T>,
    options: Arc<TransportOptions>,
}

impl OpenSearchClient<OpenSearchTransport> {
    /// Create a client for the configured cluster.
    pub fn new(config: OpenSearchConfig) -> Result<Self> {
        Ok(Self::with_transport(OpenSearchTransport::new(&config)?))
    }
}

impl<T: Transport> OpenSearchClient<T> {
    /// Create a client over an existing transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            options: Arc::new(TransportOptions::default()),
        }
    }

    /// Clone this client with different per-request options.
    pub fn with_transport_options(&self, options: TransportOptions) -> Self {
        Self {
            transport: self.transport.clone(),
            options: Arc::new(options),
        }
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Options applied to every request.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Index management endpoints.
    pub fn indices(&self) -> IndicesClient<'_, T> {
        IndicesClient::new(self)
    }

    /// Execute a request against an endpoint.
    pub async fn perform_request<E: Endpoint>(
        &self,
        endpoint: &E,
        request: &E::Request,
    ) -> Result<E::Response> {
        let mut transport_request = TransportRequest {
            method: endpoint.method(request),
            path: endpoint.request_url(request)?,
            query: endpoint.query_parameters(request),
            headers: BTreeMap::new(),
            body: endpoint.request_body(request)?,
        };
        self.options.apply(&mut transport_request);

        debug!(
            endpoint = endpoint.id(),
            method = %transport_request.method,
            path = %transport_request.path,
            "Sending request"
        );

        let response = self.transport.send(transport_request).await?;
        let status = response.status;
        let body = response.body;

        debug!(endpoint = endpoint.id(), status, "Received response");

        if endpoint.is_error(status) {
            if body.is_empty() {
                return Err(OpenSearchError::transport(
                    format!("Request to '{}' failed without a response body", endpoint.id()),
                    Some(status),
                ));
            }
            return match endpoint.decode_error(&body) {
                Ok(error) => Err(OpenSearchError::Api {
                    status,
                    response: error,
                }),
                // Some endpoints answer an error status with a regular
                // response body.
                Err(e) if e.is_missing_property() => {
                    warn!(
                        endpoint = endpoint.id(),
                        status,
                        error = %e,
                        "Failed to decode error body, trying response decoder"
                    );
                    endpoint.decode_response(status, &body).map_err(|_| {
                        OpenSearchError::transport_caused_by(
                            "Failed to decode error response",
                            Some(status),
                            e,
                        )
                    })
                }
                Err(e) => Err(OpenSearchError::transport_caused_by(
                    "Failed to decode error response",
                    Some(status),
                    e,
                )),
            };
        }

        if endpoint.has_response_body() && body.is_empty() {
            return Err(OpenSearchError::transport(
                format!("Expecting a response body from '{}', but none was sent", endpoint.id()),
                Some(status),
            ));
        }

        endpoint.decode_response(status, &body)
    }
}

impl<T> Clone for OpenSearchClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            options: self.options.clone(),
        }
    }
}

impl<T> std::fmt::Debug for OpenSearchClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSearchClient")
            .field("options", &self.options)
            .finish()
    }
}
