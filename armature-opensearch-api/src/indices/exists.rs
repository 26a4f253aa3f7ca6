//! `indices.exists`: check whether indices exist.

use crate::builder::{push_all, require, MissingRequiredProperty, ObjectBuilder};
use crate::endpoint::{put_param, BooleanEndpoint, QueryParameters};
use crate::error::{OpenSearchError, Result};
use crate::path::{is_present, PathBuilder};
use crate::types::{join_wildcards, ExpandWildcard};
use http::Method;

/// `HEAD /{index}`; answered by status code alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsRequest {
    index: Vec<String>,
    allow_no_indices: Option<bool>,
    expand_wildcards: Option<Vec<ExpandWildcard>>,
    flat_settings: Option<bool>,
    ignore_unavailable: Option<bool>,
    include_defaults: Option<bool>,
    local: Option<bool>,
}

impl ExistsRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: BooleanEndpoint<Self> =
        BooleanEndpoint::new("indices.exists", method, request_url, query_parameters);

    /// Create a new builder.
    pub fn builder() -> ExistsRequestBuilder {
        ExistsRequestBuilder::default()
    }

    /// Indices to check.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Whether a wildcard matching nothing is acceptable.
    pub fn allow_no_indices(&self) -> Option<bool> {
        self.allow_no_indices
    }

    /// Index kinds that wildcards expand to.
    pub fn expand_wildcards(&self) -> &[ExpandWildcard] {
        self.expand_wildcards.as_deref().unwrap_or_default()
    }

    /// Return settings in flat form.
    pub fn flat_settings(&self) -> Option<bool> {
        self.flat_settings
    }

    /// Whether missing or closed indices are ignored.
    pub fn ignore_unavailable(&self) -> Option<bool> {
        self.ignore_unavailable
    }

    /// Include default settings.
    pub fn include_defaults(&self) -> Option<bool> {
        self.include_defaults
    }

    /// Read from the local node instead of the cluster manager.
    pub fn local(&self) -> Option<bool> {
        self.local
    }
}

/// Builder for [`ExistsRequest`].
#[derive(Debug, Default)]
pub struct ExistsRequestBuilder {
    index: Option<Vec<String>>,
    allow_no_indices: Option<bool>,
    expand_wildcards: Option<Vec<ExpandWildcard>>,
    flat_settings: Option<bool>,
    ignore_unavailable: Option<bool>,
    include_defaults: Option<bool>,
    local: Option<bool>,
}

impl ExistsRequestBuilder {
    /// Replace the list of indices.
    pub fn indices<S: Into<String>>(mut self, indices: impl IntoIterator<Item = S>) -> Self {
        self.index = Some(indices.into_iter().map(Into::into).collect());
        self
    }

    /// Add an index.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        push_all(&mut self.index, [index.into()]);
        self
    }

    /// Set `allow_no_indices`.
    pub fn allow_no_indices(mut self, value: impl Into<Option<bool>>) -> Self {
        self.allow_no_indices = value.into();
        self
    }

    /// Add a wildcard expansion kind.
    pub fn expand_wildcards(mut self, value: ExpandWildcard) -> Self {
        push_all(&mut self.expand_wildcards, [value]);
        self
    }

    /// Set `flat_settings`.
    pub fn flat_settings(mut self, value: impl Into<Option<bool>>) -> Self {
        self.flat_settings = value.into();
        self
    }

    /// Set `ignore_unavailable`.
    pub fn ignore_unavailable(mut self, value: impl Into<Option<bool>>) -> Self {
        self.ignore_unavailable = value.into();
        self
    }

    /// Set `include_defaults`.
    pub fn include_defaults(mut self, value: impl Into<Option<bool>>) -> Self {
        self.include_defaults = value.into();
        self
    }

    /// Set `local`.
    pub fn local(mut self, value: impl Into<Option<bool>>) -> Self {
        self.local = value.into();
        self
    }
}

impl ObjectBuilder for ExistsRequestBuilder {
    type Value = ExistsRequest;

    fn build(self) -> std::result::Result<ExistsRequest, MissingRequiredProperty> {
        Ok(ExistsRequest {
            index: require("ExistsRequest", "index", self.index)?,
            allow_no_indices: self.allow_no_indices,
            expand_wildcards: self.expand_wildcards,
            flat_settings: self.flat_settings,
            ignore_unavailable: self.ignore_unavailable,
            include_defaults: self.include_defaults,
            local: self.local,
        })
    }
}

fn method(_: &ExistsRequest) -> Method {
    Method::HEAD
}

fn request_url(request: &ExistsRequest) -> Result<String> {
    if !is_present(Some(&request.index)) {
        return Err(OpenSearchError::no_path_template("indices.exists"));
    }
    Ok(PathBuilder::new().list(&request.index).build())
}

fn query_parameters(request: &ExistsRequest) -> QueryParameters {
    let mut params = QueryParameters::new();
    put_param(&mut params, "allow_no_indices", request.allow_no_indices);
    put_param(
        &mut params,
        "expand_wildcards",
        request
            .expand_wildcards
            .as_deref()
            .filter(|w| !w.is_empty())
            .map(join_wildcards),
    );
    put_param(&mut params, "flat_settings", request.flat_settings);
    put_param(&mut params, "ignore_unavailable", request.ignore_unavailable);
    put_param(&mut params, "include_defaults", request.include_defaults);
    put_param(&mut params, "local", request.local);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;

    #[test]
    fn test_head_request() {
        let request = ExistsRequest::builder()
            .index("products")
            .local(false)
            .build()
            .unwrap();
        let endpoint = ExistsRequest::ENDPOINT;

        assert_eq!(endpoint.id(), "indices.exists");
        assert_eq!(endpoint.method(&request), Method::HEAD);
        assert_eq!(endpoint.request_url(&request).unwrap(), "/products");
        assert_eq!(endpoint.query_parameters(&request)["local"], "false");
        assert!(endpoint.request_body(&request).unwrap().is_none());
    }

    #[test]
    fn test_status_mapping() {
        let endpoint = ExistsRequest::ENDPOINT;
        assert!(endpoint.decode_response(200, b"").unwrap().value());
        assert!(!endpoint.decode_response(404, b"").unwrap().value());
        assert!(endpoint.is_error(403));
    }

    #[test]
    fn test_index_required() {
        assert_eq!(
            ExistsRequest::builder().build().unwrap_err().property(),
            "index"
        );
    }
}
