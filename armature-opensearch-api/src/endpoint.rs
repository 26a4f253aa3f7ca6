//! Endpoint descriptors.
//!
//! An endpoint pairs a request type with everything needed to turn it into
//! an HTTP request (method, path, query string, body) and to turn the HTTP
//! response back into a typed value. Descriptors are plain `const` items
//! holding function pointers, so they are stateless and `Sync`.

use crate::codec::from_json;
use crate::error::{OpenSearchError, Result};
use crate::types::{BooleanResponse, ErrorResponse};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Query parameters, sorted by name.
pub type QueryParameters = BTreeMap<String, String>;

/// Describes how to execute one API operation.
pub trait Endpoint: Send + Sync {
    /// Request value object.
    type Request: Send + Sync;
    /// Typed result of a successful call.
    type Response: Send;

    /// Endpoint identifier, e.g. `indices.clone`.
    fn id(&self) -> &'static str;

    /// HTTP method for the request.
    fn method(&self, request: &Self::Request) -> Method;

    /// Request path, including the leading `/`.
    ///
    /// Fails with [`OpenSearchError::NoPathTemplateFound`] when no template
    /// matches the path fields present on the request.
    fn request_url(&self, request: &Self::Request) -> Result<String>;

    /// Query string parameters.
    fn query_parameters(&self, request: &Self::Request) -> QueryParameters;

    /// Serialized request body, if the endpoint sends one.
    fn request_body(&self, request: &Self::Request) -> Result<Option<Vec<u8>>>;

    /// Whether the status code denotes an error.
    fn is_error(&self, status: u16) -> bool {
        status >= 400
    }

    /// Whether a successful response carries a body to decode.
    fn has_response_body(&self) -> bool {
        true
    }

    /// Decode a successful response.
    fn decode_response(&self, status: u16, body: &[u8]) -> Result<Self::Response>;

    /// Decode an error body.
    fn decode_error(&self, body: &[u8]) -> Result<ErrorResponse> {
        from_json(body)
    }
}

/// Serialize a request body as JSON.
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(OpenSearchError::Serialization)
}

type MethodFn<Req> = fn(&Req) -> Method;
type UrlFn<Req> = fn(&Req) -> Result<String>;
type QueryFn<Req> = fn(&Req) -> QueryParameters;
type BodyFn<Req> = fn(&Req) -> Result<Vec<u8>>;

/// Query function for endpoints without query parameters.
pub fn no_query_parameters<Req>(_: &Req) -> QueryParameters {
    QueryParameters::new()
}

/// An endpoint whose response is a JSON value object.
pub struct SimpleEndpoint<Req, Res> {
    id: &'static str,
    method: MethodFn<Req>,
    request_url: UrlFn<Req>,
    query_parameters: QueryFn<Req>,
    request_body: Option<BodyFn<Req>>,
    _response: PhantomData<fn() -> Res>,
}

impl<Req, Res> SimpleEndpoint<Req, Res> {
    /// Describe an endpoint.
    pub const fn new(
        id: &'static str,
        method: MethodFn<Req>,
        request_url: UrlFn<Req>,
        query_parameters: QueryFn<Req>,
        request_body: Option<BodyFn<Req>>,
    ) -> Self {
        Self {
            id,
            method,
            request_url,
            query_parameters,
            request_body,
            _response: PhantomData,
        }
    }
}

impl<Req, Res> Endpoint for SimpleEndpoint<Req, Res>
where
    Req: Send + Sync,
    Res: DeserializeOwned + Send,
{
    type Request = Req;
    type Response = Res;

    fn id(&self) -> &'static str {
        self.id
    }

    fn method(&self, request: &Req) -> Method {
        (self.method)(request)
    }

    fn request_url(&self, request: &Req) -> Result<String> {
        (self.request_url)(request)
    }

    fn query_parameters(&self, request: &Req) -> QueryParameters {
        (self.query_parameters)(request)
    }

    fn request_body(&self, request: &Req) -> Result<Option<Vec<u8>>> {
        self.request_body.map(|body| body(request)).transpose()
    }

    fn decode_response(&self, _status: u16, body: &[u8]) -> Result<Res> {
        from_json(body)
    }
}

/// An endpoint answered by status code alone (`HEAD` existence checks).
///
/// A 2xx status yields `true`, 404 yields `false`. Any other status is a
/// transport error.
pub struct BooleanEndpoint<Req> {
    id: &'static str,
    method: MethodFn<Req>,
    request_url: UrlFn<Req>,
    query_parameters: QueryFn<Req>,
}

impl<Req> BooleanEndpoint<Req> {
    /// Describe a boolean endpoint.
    pub const fn new(
        id: &'static str,
        method: MethodFn<Req>,
        request_url: UrlFn<Req>,
        query_parameters: QueryFn<Req>,
    ) -> Self {
        Self {
            id,
            method,
            request_url,
            query_parameters,
        }
    }
}

impl<Req: Send + Sync> Endpoint for BooleanEndpoint<Req> {
    type Request = Req;
    type Response = BooleanResponse;

    fn id(&self) -> &'static str {
        self.id
    }

    fn method(&self, request: &Req) -> Method {
        (self.method)(request)
    }

    fn request_url(&self, request: &Req) -> Result<String> {
        (self.request_url)(request)
    }

    fn query_parameters(&self, request: &Req) -> QueryParameters {
        (self.query_parameters)(request)
    }

    fn request_body(&self, _request: &Req) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn is_error(&self, status: u16) -> bool {
        status >= 400 && status != 404
    }

    fn has_response_body(&self) -> bool {
        false
    }

    fn decode_response(&self, status: u16, _body: &[u8]) -> Result<BooleanResponse> {
        match status {
            200..=299 => Ok(BooleanResponse::new(true)),
            404 => Ok(BooleanResponse::new(false)),
            _ => Err(OpenSearchError::transport(
                format!("Unexpected status from '{}'", self.id),
                Some(status),
            )),
        }
    }
}

/// Insert `key=value` when the value is present.
pub(crate) fn put_param<V: ToString>(params: &mut QueryParameters, key: &str, value: Option<V>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AcknowledgedResponse;

    struct Ping {
        target: Option<String>,
        pretty: Option<bool>,
    }

    fn ping_method(_: &Ping) -> Method {
        Method::GET
    }

    fn ping_url(request: &Ping) -> Result<String> {
        match &request.target {
            Some(target) => Ok(format!("/{}/_ping", target)),
            None => Err(OpenSearchError::no_path_template("test.ping")),
        }
    }

    fn ping_query(request: &Ping) -> QueryParameters {
        let mut params = QueryParameters::new();
        put_param(&mut params, "pretty", request.pretty);
        params
    }

    const PING: SimpleEndpoint<Ping, AcknowledgedResponse> =
        SimpleEndpoint::new("test.ping", ping_method, ping_url, ping_query, None);

    const PING_EXISTS: BooleanEndpoint<Ping> =
        BooleanEndpoint::new("test.ping_exists", ping_method, ping_url, no_query_parameters);

    fn ping(target: Option<&str>) -> Ping {
        Ping {
            target: target.map(str::to_string),
            pretty: None,
        }
    }

    #[test]
    fn test_simple_endpoint_parts() {
        let request = Ping {
            target: Some("node".into()),
            pretty: Some(true),
        };
        assert_eq!(PING.id(), "test.ping");
        assert_eq!(PING.method(&request), Method::GET);
        assert_eq!(PING.request_url(&request).unwrap(), "/node/_ping");
        assert_eq!(PING.query_parameters(&request).get("pretty").map(String::as_str), Some("true"));
        assert!(PING.request_body(&request).unwrap().is_none());
    }

    #[test]
    fn test_missing_template_propagates() {
        let err = PING.request_url(&ping(None)).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_simple_endpoint_decodes() {
        let response = PING.decode_response(200, br#"{"acknowledged":true}"#).unwrap();
        assert!(response.acknowledged());
        let err = PING.decode_response(200, br#"{"acknowledged":"yes"}"#).unwrap_err();
        assert!(matches!(err, OpenSearchError::Decode { type_name: "AcknowledgedResponse", .. }));
    }

    #[test]
    fn test_missing_field_in_body_is_missing_property() {
        let err = PING.decode_response(200, b"{}").unwrap_err();
        match err {
            OpenSearchError::MissingRequiredProperty(missing) => {
                assert_eq!(missing.type_name(), "AcknowledgedResponse");
                assert_eq!(missing.property(), "acknowledged");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = PING.decode_error(br#"{"error":{"reason":"r"},"status":500}"#).unwrap_err();
        assert!(err.is_missing_property());
        assert!(err.to_string().contains("ErrorCause.type"), "{err}");
    }

    #[test]
    fn test_error_statuses() {
        assert!(!PING.is_error(200));
        assert!(PING.is_error(404));
        assert!(!PING_EXISTS.is_error(404));
        assert!(PING_EXISTS.is_error(500));
        assert!(!PING_EXISTS.has_response_body());
    }

    #[test]
    fn test_boolean_endpoint_result() {
        assert!(PING_EXISTS.decode_response(200, b"").unwrap().value());
        assert!(!PING_EXISTS.decode_response(404, b"").unwrap().value());
        for status in [301, 304, 100] {
            let err = PING_EXISTS.decode_response(status, b"").unwrap_err();
            assert_eq!(err.status_code(), Some(status));
        }
        assert!(PING_EXISTS.query_parameters(&ping(Some("n"))).is_empty());
    }

    #[test]
    fn test_decode_error_body() {
        let body = br#"{"error":{"type":"x","reason":"y"},"status":400}"#;
        let response = PING.decode_error(body).unwrap();
        assert_eq!(response.status(), 400);
        assert!(matches!(
            PING.decode_error(b"not json"),
            Err(OpenSearchError::Decode { type_name: "ErrorResponse", .. })
        ));
    }
}
