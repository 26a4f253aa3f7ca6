//! `indices.delete`: delete one or more indices.

use crate::builder::{push_all, require, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, serialize_optional, ObjectDeserializer, SerializeFields};
use crate::endpoint::{put_param, QueryParameters, SimpleEndpoint};
use crate::error::{OpenSearchError, Result};
use crate::path::{is_present, PathBuilder};
use crate::types::{
    join_wildcards, AcknowledgedResponse, AcknowledgedResponseBuilder, ExpandWildcard,
    ShardStatistics, Time,
};
use http::Method;
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;

/// `DELETE /{index}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteIndexRequest {
    index: Vec<String>,
    allow_no_indices: Option<bool>,
    cluster_manager_timeout: Option<Time>,
    expand_wildcards: Option<Vec<ExpandWildcard>>,
    ignore_unavailable: Option<bool>,
    master_timeout: Option<Time>,
    timeout: Option<Time>,
}

impl DeleteIndexRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: SimpleEndpoint<Self, DeleteIndexResponse> = SimpleEndpoint::new(
        "indices.delete",
        method,
        request_url,
        query_parameters,
        None,
    );

    /// Create a new builder.
    pub fn builder() -> DeleteIndexRequestBuilder {
        DeleteIndexRequestBuilder::default()
    }

    /// Indices to delete.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Whether a wildcard matching nothing is acceptable.
    pub fn allow_no_indices(&self) -> Option<bool> {
        self.allow_no_indices
    }

    /// Timeout for connecting to the cluster manager.
    pub fn cluster_manager_timeout(&self) -> Option<&Time> {
        self.cluster_manager_timeout.as_ref()
    }

    /// Index kinds that wildcards expand to.
    pub fn expand_wildcards(&self) -> &[ExpandWildcard] {
        self.expand_wildcards.as_deref().unwrap_or_default()
    }

    /// Whether missing or closed indices are ignored.
    pub fn ignore_unavailable(&self) -> Option<bool> {
        self.ignore_unavailable
    }

    /// Deprecated alias of `cluster_manager_timeout`.
    pub fn master_timeout(&self) -> Option<&Time> {
        self.master_timeout.as_ref()
    }

    /// Operation timeout.
    pub fn timeout(&self) -> Option<&Time> {
        self.timeout.as_ref()
    }
}

/// Builder for [`DeleteIndexRequest`].
#[derive(Debug, Default)]
pub struct DeleteIndexRequestBuilder {
    index: Option<Vec<String>>,
    allow_no_indices: Option<bool>,
    cluster_manager_timeout: Option<Time>,
    expand_wildcards: Option<Vec<ExpandWildcard>>,
    ignore_unavailable: Option<bool>,
    master_timeout: Option<Time>,
    timeout: Option<Time>,
}

impl DeleteIndexRequestBuilder {
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

    /// Set the cluster manager timeout.
    pub fn cluster_manager_timeout(mut self, timeout: impl Into<Option<Time>>) -> Self {
        self.cluster_manager_timeout = timeout.into();
        self
    }

    /// Add a wildcard expansion kind.
    pub fn expand_wildcards(mut self, value: ExpandWildcard) -> Self {
        push_all(&mut self.expand_wildcards, [value]);
        self
    }

    /// Set `ignore_unavailable`.
    pub fn ignore_unavailable(mut self, value: impl Into<Option<bool>>) -> Self {
        self.ignore_unavailable = value.into();
        self
    }

    /// Set the master timeout.
    pub fn master_timeout(mut self, timeout: impl Into<Option<Time>>) -> Self {
        self.master_timeout = timeout.into();
        self
    }

    /// Set the operation timeout.
    pub fn timeout(mut self, timeout: impl Into<Option<Time>>) -> Self {
        self.timeout = timeout.into();
        self
    }
}

impl ObjectBuilder for DeleteIndexRequestBuilder {
    type Value = DeleteIndexRequest;

    fn build(self) -> std::result::Result<DeleteIndexRequest, MissingRequiredProperty> {
        Ok(DeleteIndexRequest {
            index: require("DeleteIndexRequest", "index", self.index)?,
            allow_no_indices: self.allow_no_indices,
            cluster_manager_timeout: self.cluster_manager_timeout,
            expand_wildcards: self.expand_wildcards,
            ignore_unavailable: self.ignore_unavailable,
            master_timeout: self.master_timeout,
            timeout: self.timeout,
        })
    }
}

fn method(_: &DeleteIndexRequest) -> Method {
    Method::DELETE
}

fn request_url(request: &DeleteIndexRequest) -> Result<String> {
    if !is_present(Some(&request.index)) {
        return Err(OpenSearchError::no_path_template("indices.delete"));
    }
    Ok(PathBuilder::new().list(&request.index).build())
}

fn query_parameters(request: &DeleteIndexRequest) -> QueryParameters {
    let mut params = QueryParameters::new();
    put_param(&mut params, "allow_no_indices", request.allow_no_indices);
    put_param(&mut params, "cluster_manager_timeout", request.cluster_manager_timeout.as_ref());
    put_param(
        &mut params,
        "expand_wildcards",
        request
            .expand_wildcards
            .as_deref()
            .filter(|w| !w.is_empty())
            .map(join_wildcards),
    );
    put_param(&mut params, "ignore_unavailable", request.ignore_unavailable);
    put_param(&mut params, "master_timeout", request.master_timeout.as_ref());
    put_param(&mut params, "timeout", request.timeout.as_ref());
    params
}

/// Result of an index deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteIndexResponse {
    base: AcknowledgedResponse,
    shards: Option<ShardStatistics>,
}

impl DeleteIndexResponse {
    /// Create a new builder.
    pub fn builder() -> DeleteIndexResponseBuilder {
        DeleteIndexResponseBuilder::default()
    }

    /// Whether the cluster acknowledged the deletion.
    pub fn acknowledged(&self) -> bool {
        self.base.acknowledged()
    }

    /// Shard outcome, when reported (wire name `_shards`).
    pub fn shards(&self) -> Option<&ShardStatistics> {
        self.shards.as_ref()
    }
}

impl SerializeFields for DeleteIndexResponse {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        self.base.serialize_fields(map)?;
        serialize_optional(map, "_shards", self.shards.as_ref())?;
        Ok(())
    }
}

/// Builder for [`DeleteIndexResponse`].
#[derive(Debug, Default)]
pub struct DeleteIndexResponseBuilder {
    base: AcknowledgedResponseBuilder,
    shards: Option<ShardStatistics>,
}

impl DeleteIndexResponseBuilder {
    /// Set the acknowledgement flag.
    pub fn acknowledged(mut self, acknowledged: bool) -> Self {
        self.base.set_acknowledged(acknowledged);
        self
    }

    /// Set the shard statistics.
    pub fn shards(mut self, shards: impl Into<Option<ShardStatistics>>) -> Self {
        self.shards = shards.into();
        self
    }
}

impl ObjectBuilder for DeleteIndexResponseBuilder {
    type Value = DeleteIndexResponse;

    fn build(self) -> std::result::Result<DeleteIndexResponse, MissingRequiredProperty> {
        Ok(DeleteIndexResponse {
            base: self.base.build_for("DeleteIndexResponse")?,
            shards: self.shards,
        })
    }
}

static RESPONSE: Lazy<ObjectDeserializer<DeleteIndexResponseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<DeleteIndexResponseBuilder>::new("DeleteIndexResponse");
    AcknowledgedResponse::setup_deserializer(&mut op, |b| &mut b.base);
    op.add("_shards", |b, v: ShardStatistics| b.shards = Some(v));
    op
});

json_object!(DeleteIndexResponse, RESPONSE);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use serde_json::json;

    #[test]
    fn test_path_and_params() {
        let request = DeleteIndexRequest::builder()
            .indices(["logs-2024", "logs 2025"])
            .expand_wildcards(ExpandWildcard::Open)
            .expand_wildcards(ExpandWildcard::Closed)
            .ignore_unavailable(true)
            .master_timeout(Time::from("10s"))
            .build()
            .unwrap();
        let endpoint = DeleteIndexRequest::ENDPOINT;

        assert_eq!(endpoint.method(&request), Method::DELETE);
        assert_eq!(
            endpoint.request_url(&request).unwrap(),
            "/logs-2024,logs%202025"
        );
        let params = endpoint.query_parameters(&request);
        assert_eq!(params["expand_wildcards"], "open,closed");
        assert_eq!(params["ignore_unavailable"], "true");
        assert_eq!(params["master_timeout"], "10s");
        assert!(!params.contains_key("allow_no_indices"));
    }

    #[test]
    fn test_index_required() {
        let err = DeleteIndexRequest::builder().build().unwrap_err();
        assert_eq!(err.property(), "index");
    }

    #[test]
    fn test_empty_index_list_has_no_template() {
        let request = DeleteIndexRequest::builder()
            .indices(Vec::<String>::new())
            .build()
            .unwrap();
        let err = DeleteIndexRequest::ENDPOINT.request_url(&request).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_decode_with_and_without_shards() {
        let plain: DeleteIndexResponse =
            serde_json::from_value(json!({"acknowledged": true})).unwrap();
        assert!(plain.shards().is_none());
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"acknowledged": true})
        );

        let full: DeleteIndexResponse = serde_json::from_value(json!({
            "acknowledged": true,
            "_shards": {"total": 2, "successful": 2, "failed": 0}
        }))
        .unwrap();
        assert_eq!(full.shards().map(|s| s.total()), Some(2));
    }
}
