//! `indices.clone`: copy an existing index into a new one.

use crate::builder::{require, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, serialize_optional, ObjectDeserializer, SerializeFields};
use crate::endpoint::{json_body, put_param, QueryParameters, SimpleEndpoint};
use crate::error::Result;
use crate::path::PathBuilder;
use crate::types::{AcknowledgedResponse, AcknowledgedResponseBuilder, Time, WaitForActiveShards};
use http::Method;
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;
use serde_json::Value;
use std::collections::BTreeMap;

/// Clones `index` into `target`. `PUT /{index}/_clone/{target}`
///
/// The source index must be read-only. Only `aliases` and `settings` go in
/// the body; the other fields travel in the path or query string.
#[derive(Debug, Clone, PartialEq)]
pub struct CloneIndexRequest {
    index: String,
    target: String,
    aliases: Option<BTreeMap<String, Alias>>,
    settings: Option<Value>,
    cluster_manager_timeout: Option<Time>,
    master_timeout: Option<Time>,
    timeout: Option<Time>,
    wait_for_active_shards: Option<WaitForActiveShards>,
}

impl CloneIndexRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: SimpleEndpoint<Self, CloneIndexResponse> = SimpleEndpoint::new(
        "indices.clone",
        method,
        request_url,
        query_parameters,
        Some(json_body::<CloneIndexRequest>),
    );

    /// Create a new builder.
    pub fn builder() -> CloneIndexRequestBuilder {
        CloneIndexRequestBuilder::default()
    }

    /// Source index.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Name of the index to create.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Aliases for the new index.
    pub fn aliases(&self) -> Option<&BTreeMap<String, Alias>> {
        self.aliases.as_ref()
    }

    /// Settings for the new index.
    pub fn settings(&self) -> Option<&Value> {
        self.settings.as_ref()
    }

    /// Timeout for connecting to the cluster manager.
    pub fn cluster_manager_timeout(&self) -> Option<&Time> {
        self.cluster_manager_timeout.as_ref()
    }

    /// Deprecated alias of `cluster_manager_timeout`.
    pub fn master_timeout(&self) -> Option<&Time> {
        self.master_timeout.as_ref()
    }

    /// Operation timeout.
    pub fn timeout(&self) -> Option<&Time> {
        self.timeout.as_ref()
    }

    /// Active shard copies to wait for before returning.
    pub fn wait_for_active_shards(&self) -> Option<WaitForActiveShards> {
        self.wait_for_active_shards
    }
}

impl SerializeFields for CloneIndexRequest {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        serialize_optional(map, "aliases", self.aliases.as_ref())?;
        serialize_optional(map, "settings", self.settings.as_ref())?;
        Ok(())
    }
}

json_object!(CloneIndexRequest);

/// Builder for [`CloneIndexRequest`].
#[derive(Debug, Default)]
pub struct CloneIndexRequestBuilder {
    index: Option<String>,
    target: Option<String>,
    aliases: Option<BTreeMap<String, Alias>>,
    settings: Option<Value>,
    cluster_manager_timeout: Option<Time>,
    master_timeout: Option<Time>,
    timeout: Option<Time>,
    wait_for_active_shards: Option<WaitForActiveShards>,
}

impl CloneIndexRequestBuilder {
    /// Set the source index.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Set the target index.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Replace all aliases.
    pub fn aliases(mut self, aliases: impl Into<Option<BTreeMap<String, Alias>>>) -> Self {
        self.aliases = aliases.into();
        self
    }

    /// Add one alias.
    pub fn alias(mut self, name: impl Into<String>, alias: Alias) -> Self {
        self.aliases
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), alias);
        self
    }

    /// Set the index settings.
    pub fn settings(mut self, settings: impl Into<Option<Value>>) -> Self {
        self.settings = settings.into();
        self
    }

    /// Set the cluster manager timeout.
    pub fn cluster_manager_timeout(mut self, timeout: impl Into<Option<Time>>) -> Self {
        self.cluster_manager_timeout = timeout.into();
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

    /// Set the number of active shards to wait for.
    pub fn wait_for_active_shards(mut self, value: impl Into<Option<WaitForActiveShards>>) -> Self {
        self.wait_for_active_shards = value.into();
        self
    }
}

impl ObjectBuilder for CloneIndexRequestBuilder {
    type Value = CloneIndexRequest;

    fn build(self) -> std::result::Result<CloneIndexRequest, MissingRequiredProperty> {
        Ok(CloneIndexRequest {
            index: require("CloneIndexRequest", "index", self.index)?,
            target: require("CloneIndexRequest", "target", self.target)?,
            aliases: self.aliases,
            settings: self.settings,
            cluster_manager_timeout: self.cluster_manager_timeout,
            master_timeout: self.master_timeout,
            timeout: self.timeout,
            wait_for_active_shards: self.wait_for_active_shards,
        })
    }
}

fn method(_: &CloneIndexRequest) -> Method {
    Method::PUT
}

fn request_url(request: &CloneIndexRequest) -> Result<String> {
    Ok(PathBuilder::new()
        .segment(&request.index)
        .literal("_clone")
        .segment(&request.target)
        .build())
}

fn query_parameters(request: &CloneIndexRequest) -> QueryParameters {
    let mut params = QueryParameters::new();
    put_param(&mut params, "cluster_manager_timeout", request.cluster_manager_timeout.as_ref());
    put_param(&mut params, "master_timeout", request.master_timeout.as_ref());
    put_param(&mut params, "timeout", request.timeout.as_ref());
    put_param(&mut params, "wait_for_active_shards", request.wait_for_active_shards);
    params
}

/// Result of a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneIndexResponse {
    base: AcknowledgedResponse,
    shards_acknowledged: bool,
    index: String,
}

impl CloneIndexResponse {
    /// Create a new builder.
    pub fn builder() -> CloneIndexResponseBuilder {
        CloneIndexResponseBuilder::default()
    }

    /// Whether the cluster acknowledged the clone.
    pub fn acknowledged(&self) -> bool {
        self.base.acknowledged()
    }

    /// Whether the required shard copies started before the timeout.
    pub fn shards_acknowledged(&self) -> bool {
        self.shards_acknowledged
    }

    /// Name of the new index.
    pub fn index(&self) -> &str {
        &self.index
    }
}

impl SerializeFields for CloneIndexResponse {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        self.base.serialize_fields(map)?;
        map.serialize_entry("shards_acknowledged", &self.shards_acknowledged)?;
        map.serialize_entry("index", &self.index)?;
        Ok(())
    }
}

/// Builder for [`CloneIndexResponse`].
#[derive(Debug, Default)]
pub struct CloneIndexResponseBuilder {
    base: AcknowledgedResponseBuilder,
    shards_acknowledged: Option<bool>,
    index: Option<String>,
}

impl CloneIndexResponseBuilder {
    /// Set the acknowledgement flag.
    pub fn acknowledged(mut self, acknowledged: bool) -> Self {
        self.base.set_acknowledged(acknowledged);
        self
    }

    /// Set the shard acknowledgement flag.
    pub fn shards_acknowledged(mut self, shards_acknowledged: bool) -> Self {
        self.shards_acknowledged = Some(shards_acknowledged);
        self
    }

    /// Set the new index name.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }
}

impl ObjectBuilder for CloneIndexResponseBuilder {
    type Value = CloneIndexResponse;

    fn build(self) -> std::result::Result<CloneIndexResponse, MissingRequiredProperty> {
        Ok(CloneIndexResponse {
            base: self.base.build_for("CloneIndexResponse")?,
            shards_acknowledged: require("CloneIndexResponse", "shards_acknowledged", self.shards_acknowledged)?,
            index: require("CloneIndexResponse", "index", self.index)?,
        })
    }
}

static RESPONSE: Lazy<ObjectDeserializer<CloneIndexResponseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<CloneIndexResponseBuilder>::new("CloneIndexResponse");
    AcknowledgedResponse::setup_deserializer(&mut op, |b| &mut b.base);
    op.add("shards_acknowledged", |b, v: bool| b.shards_acknowledged = Some(v));
    op.add("index", |b, v: String| b.index = Some(v));
    op
});

json_object!(CloneIndexResponse, RESPONSE);

/// An index alias definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alias {
    filter: Option<Value>,
    index_routing: Option<String>,
    is_hidden: Option<bool>,
    is_write_index: Option<bool>,
    routing: Option<String>,
    search_routing: Option<String>,
}

impl Alias {
    /// Create a new builder.
    pub fn builder() -> AliasBuilder {
        AliasBuilder::default()
    }

    /// Query restricting the documents visible through the alias.
    pub fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }

    /// Routing for index operations.
    pub fn index_routing(&self) -> Option<&str> {
        self.index_routing.as_deref()
    }

    /// Whether the alias is hidden.
    pub fn is_hidden(&self) -> Option<bool> {
        self.is_hidden
    }

    /// Whether the index is the alias' write index.
    pub fn is_write_index(&self) -> Option<bool> {
        self.is_write_index
    }

    /// Routing for both index and search operations.
    pub fn routing(&self) -> Option<&str> {
        self.routing.as_deref()
    }

    /// Routing for search operations.
    pub fn search_routing(&self) -> Option<&str> {
        self.search_routing.as_deref()
    }
}

impl SerializeFields for Alias {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        serialize_optional(map, "filter", self.filter.as_ref())?;
        serialize_optional(map, "index_routing", self.index_routing.as_ref())?;
        serialize_optional(map, "is_hidden", self.is_hidden.as_ref())?;
        serialize_optional(map, "is_write_index", self.is_write_index.as_ref())?;
        serialize_optional(map, "routing", self.routing.as_ref())?;
        serialize_optional(map, "search_routing", self.search_routing.as_ref())?;
        Ok(())
    }
}

/// Builder for [`Alias`]. Every field is optional.
#[derive(Debug, Default)]
pub struct AliasBuilder {
    inner: Alias,
}

impl AliasBuilder {
    /// Set the filter query.
    pub fn filter(mut self, filter: impl Into<Option<Value>>) -> Self {
        self.inner.filter = filter.into();
        self
    }

    /// Set the index routing.
    pub fn index_routing(mut self, routing: impl Into<Option<String>>) -> Self {
        self.inner.index_routing = routing.into();
        self
    }

    /// Set whether the alias is hidden.
    pub fn is_hidden(mut self, hidden: impl Into<Option<bool>>) -> Self {
        self.inner.is_hidden = hidden.into();
        self
    }

    /// Set whether this is the write index.
    pub fn is_write_index(mut self, write: impl Into<Option<bool>>) -> Self {
        self.inner.is_write_index = write.into();
        self
    }

    /// Set the routing.
    pub fn routing(mut self, routing: impl Into<Option<String>>) -> Self {
        self.inner.routing = routing.into();
        self
    }

    /// Set the search routing.
    pub fn search_routing(mut self, routing: impl Into<Option<String>>) -> Self {
        self.inner.search_routing = routing.into();
        self
    }
}

impl ObjectBuilder for AliasBuilder {
    type Value = Alias;

    fn build(self) -> std::result::Result<Alias, MissingRequiredProperty> {
        Ok(self.inner)
    }
}

static ALIAS: Lazy<ObjectDeserializer<AliasBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<AliasBuilder>::new("Alias");
    op.add("filter", |b, v: Value| b.inner.filter = Some(v));
    op.add("index_routing", |b, v: String| b.inner.index_routing = Some(v));
    op.add("is_hidden", |b, v: bool| b.inner.is_hidden = Some(v));
    op.add("is_write_index", |b, v: bool| b.inner.is_write_index = Some(v));
    op.add("routing", |b, v: String| b.inner.routing = Some(v));
    op.add("search_routing", |b, v: String| b.inner.search_routing = Some(v));
    op
});

json_object!(Alias, ALIAS);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn minimal() -> CloneIndexRequestBuilder {
        CloneIndexRequest::builder().index("source").target("copy")
    }

    #[test]
    fn test_required_fields() {
        let err = CloneIndexRequest::builder().target("copy").build().unwrap_err();
        assert_eq!(err.property(), "index");
        let err = CloneIndexRequest::builder().index("source").build().unwrap_err();
        assert_eq!(err.property(), "target");
        assert!(minimal().build().is_ok());
    }

    #[test]
    fn test_path_and_method() {
        let request = minimal().build().unwrap();
        let endpoint = CloneIndexRequest::ENDPOINT;
        assert_eq!(endpoint.method(&request), Method::PUT);
        assert_eq!(endpoint.request_url(&request).unwrap(), "/source/_clone/copy");
    }

    #[test]
    fn test_query_parameters() {
        let request = minimal()
            .timeout(Time::from("30s"))
            .wait_for_active_shards(WaitForActiveShards::All)
            .cluster_manager_timeout(None)
            .build()
            .unwrap();
        let params = CloneIndexRequest::ENDPOINT.query_parameters(&request);

        assert_eq!(
            params.into_iter().collect::<Vec<_>>(),
            vec![
                ("timeout".to_string(), "30s".to_string()),
                ("wait_for_active_shards".to_string(), "all".to_string()),
            ]
        );
    }

    #[test]
    fn test_body_only_carries_body_fields() {
        let request = minimal()
            .alias(
                "recent",
                Alias::builder().is_write_index(true).build().unwrap(),
            )
            .settings(json!({"index": {"number_of_replicas": 0}}))
            .timeout(Time::from("1m"))
            .build()
            .unwrap();
        let body = CloneIndexRequest::ENDPOINT
            .request_body(&request)
            .unwrap()
            .unwrap();

        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!({
                "aliases": {"recent": {"is_write_index": true}},
                "settings": {"index": {"number_of_replicas": 0}}
            })
        );
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        let request = minimal().build().unwrap();
        let body = CloneIndexRequest::ENDPOINT
            .request_body(&request)
            .unwrap()
            .unwrap();
        assert_eq!(body, b"{}");
    }

    #[test]
    fn test_decode_response() {
        let response: CloneIndexResponse = serde_json::from_str(
            r#"{"acknowledged": true, "shards_acknowledged": true, "index": "my-index"}"#,
        )
        .unwrap();
        assert_eq!(response.index(), "my-index");
        assert!(response.shards_acknowledged());
        assert!(response.acknowledged());
    }

    #[test]
    fn test_response_each_required_field() {
        for field in ["acknowledged", "shards_acknowledged", "index"] {
            let mut body = json!({"acknowledged": true, "shards_acknowledged": false, "index": "i"});
            body.as_object_mut().unwrap().remove(field);
            let err = serde_json::from_value::<CloneIndexResponse>(body).unwrap_err();
            assert!(
                err.to_string()
                    .contains(&format!("CloneIndexResponse.{field}")),
                "{err}"
            );
        }
    }

    #[test]
    fn test_response_serializes_base_first() {
        let response = CloneIndexResponse::builder()
            .acknowledged(true)
            .shards_acknowledged(false)
            .index("copy")
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"acknowledged":true,"shards_acknowledged":false,"index":"copy"}"#
        );
    }

    #[test]
    fn test_alias_round_trip() {
        let alias = Alias::builder()
            .filter(json!({"term": {"user": "kimchy"}}))
            .routing("1".to_string())
            .is_hidden(false)
            .build()
            .unwrap();
        let value = serde_json::to_value(&alias).unwrap();
        assert_eq!(
            value,
            json!({"filter": {"term": {"user": "kimchy"}}, "is_hidden": false, "routing": "1"})
        );
        assert_eq!(serde_json::from_value::<Alias>(value).unwrap(), alias);
    }
}
