//! `indices.get_mapping`: field mappings per index.

use crate::builder::{push_all, require, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, ObjectDeserializer, SerializeFields};
use crate::dictionary::DictionaryResponse;
use crate::endpoint::{put_param, QueryParameters, SimpleEndpoint};
use crate::error::Result;
use crate::path::{is_present, PathBuilder};
use crate::types::{join_wildcards, ExpandWildcard, Time};
use http::Method;
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;
use serde_json::Value;

/// Mappings keyed by index name.
pub type GetMappingResponse = DictionaryResponse<IndexMappingRecord>;

/// `GET [/{index}]/_mapping`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMappingRequest {
    index: Option<Vec<String>>,
    allow_no_indices: Option<bool>,
    cluster_manager_timeout: Option<Time>,
    expand_wildcards: Option<Vec<ExpandWildcard>>,
    ignore_unavailable: Option<bool>,
    local: Option<bool>,
    master_timeout: Option<Time>,
}

impl GetMappingRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: SimpleEndpoint<Self, GetMappingResponse> = SimpleEndpoint::new(
        "indices.get_mapping",
        method,
        request_url,
        query_parameters,
        None,
    );

    /// Create a new builder.
    pub fn builder() -> GetMappingRequestBuilder {
        GetMappingRequestBuilder::default()
    }

    /// Indices to read; all indices when empty.
    pub fn index(&self) -> &[String] {
        self.index.as_deref().unwrap_or_default()
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

    /// Read from the local node.
    pub fn local(&self) -> Option<bool> {
        self.local
    }

    /// Deprecated alias of `cluster_manager_timeout`.
    pub fn master_timeout(&self) -> Option<&Time> {
        self.master_timeout.as_ref()
    }
}

/// Builder for [`GetMappingRequest`].
#[derive(Debug, Default)]
pub struct GetMappingRequestBuilder {
    index: Option<Vec<String>>,
    allow_no_indices: Option<bool>,
    cluster_manager_timeout: Option<Time>,
    expand_wildcards: Option<Vec<ExpandWildcard>>,
    ignore_unavailable: Option<bool>,
    local: Option<bool>,
    master_timeout: Option<Time>,
}

impl GetMappingRequestBuilder {
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

    /// Set `local`.
    pub fn local(mut self, value: impl Into<Option<bool>>) -> Self {
        self.local = value.into();
        self
    }

    /// Set the master timeout.
    pub fn master_timeout(mut self, timeout: impl Into<Option<Time>>) -> Self {
        self.master_timeout = timeout.into();
        self
    }
}

impl ObjectBuilder for GetMappingRequestBuilder {
    type Value = GetMappingRequest;

    fn build(self) -> std::result::Result<GetMappingRequest, MissingRequiredProperty> {
        Ok(GetMappingRequest {
            index: self.index,
            allow_no_indices: self.allow_no_indices,
            cluster_manager_timeout: self.cluster_manager_timeout,
            expand_wildcards: self.expand_wildcards,
            ignore_unavailable: self.ignore_unavailable,
            local: self.local,
            master_timeout: self.master_timeout,
        })
    }
}

fn method(_: &GetMappingRequest) -> Method {
    Method::GET
}

fn request_url(request: &GetMappingRequest) -> Result<String> {
    let mut path = PathBuilder::new();
    if let Some(index) = request.index.as_ref().filter(|i| is_present(Some(*i))) {
        path = path.list(index);
    }
    Ok(path.literal("_mapping").build())
}

fn query_parameters(request: &GetMappingRequest) -> QueryParameters {
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
    put_param(&mut params, "local", request.local);
    put_param(&mut params, "master_timeout", request.master_timeout.as_ref());
    params
}

/// Mappings of one index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMappingRecord {
    mappings: Value,
}

impl IndexMappingRecord {
    /// Create a record.
    pub fn new(mappings: Value) -> Self {
        Self { mappings }
    }

    /// The type mapping: `properties`, `dynamic`, `_source` and so on.
    pub fn mappings(&self) -> &Value {
        &self.mappings
    }

    /// Mapping of a top-level field, if defined.
    pub fn property(&self, field: &str) -> Option<&Value> {
        self.mappings.get("properties")?.get(field)
    }
}

impl SerializeFields for IndexMappingRecord {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        map.serialize_entry("mappings", &self.mappings)
    }
}

#[derive(Debug, Default)]
struct IndexMappingRecordBuilder {
    mappings: Option<Value>,
}

impl ObjectBuilder for IndexMappingRecordBuilder {
    type Value = IndexMappingRecord;

    fn build(self) -> std::result::Result<IndexMappingRecord, MissingRequiredProperty> {
        Ok(IndexMappingRecord {
            mappings: require("IndexMappingRecord", "mappings", self.mappings)?,
        })
    }
}

static RECORD: Lazy<ObjectDeserializer<IndexMappingRecordBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<IndexMappingRecordBuilder>::new("IndexMappingRecord");
    op.add("mappings", |b, v: Value| b.mappings = Some(v));
    op
});

json_object!(IndexMappingRecord, RECORD);
