//! `indices.get_settings`: settings per index.

use super::Alias;
use crate::builder::{push_all, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, serialize_optional, ObjectDeserializer, SerializeFields};
use crate::dictionary::DictionaryResponse;
use crate::endpoint::{put_param, QueryParameters, SimpleEndpoint};
use crate::error::{OpenSearchError, Result};
use crate::path::{is_present, PathBuilder};
use crate::types::{join_wildcards, ExpandWildcard, Time};
use http::Method;
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;
use serde_json::Value;
use std::collections::BTreeMap;

/// Index state keyed by index name.
pub type GetIndicesSettingsResponse = DictionaryResponse<IndexState>;

/// `GET [/{index}]/_settings[/{name}]`
///
/// `name` filters the returned settings by (wildcard) setting name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetIndicesSettingsRequest {
    index: Option<Vec<String>>,
    name: Option<Vec<String>>,
    allow_no_indices: Option<bool>,
    cluster_manager_timeout: Option<Time>,
    expand_wildcards: Option<Vec<ExpandWildcard>>,
    flat_settings: Option<bool>,
    ignore_unavailable: Option<bool>,
    include_defaults: Option<bool>,
    local: Option<bool>,
    master_timeout: Option<Time>,
}

impl GetIndicesSettingsRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: SimpleEndpoint<Self, GetIndicesSettingsResponse> = SimpleEndpoint::new(
        "indices.get_settings",
        method,
        request_url,
        query_parameters,
        None,
    );

    /// Create a new builder.
    pub fn builder() -> GetIndicesSettingsRequestBuilder {
        GetIndicesSettingsRequestBuilder::default()
    }

    /// Indices to read; all indices when empty.
    pub fn index(&self) -> &[String] {
        self.index.as_deref().unwrap_or_default()
    }

    /// Setting name filters.
    pub fn name(&self) -> &[String] {
        self.name.as_deref().unwrap_or_default()
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

    /// Return settings as `index.number_of_shards` rather than nested.
    pub fn flat_settings(&self) -> Option<bool> {
        self.flat_settings
    }

    /// Whether missing or closed indices are ignored.
    pub fn ignore_unavailable(&self) -> Option<bool> {
        self.ignore_unavailable
    }

    /// Also return default settings (under `defaults`).
    pub fn include_defaults(&self) -> Option<bool> {
        self.include_defaults
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

/// Builder for [`GetIndicesSettingsRequest`].
#[derive(Debug, Default)]
pub struct GetIndicesSettingsRequestBuilder {
    index: Option<Vec<String>>,
    name: Option<Vec<String>>,
    allow_no_indices: Option<bool>,
    cluster_manager_timeout: Option<Time>,
    expand_wildcards: Option<Vec<ExpandWildcard>>,
    flat_settings: Option<bool>,
    ignore_unavailable: Option<bool>,
    include_defaults: Option<bool>,
    local: Option<bool>,
    master_timeout: Option<Time>,
}

impl GetIndicesSettingsRequestBuilder {
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

    /// Replace the setting name filters.
    pub fn names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.name = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Add a setting name filter.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        push_all(&mut self.name, [name.into()]);
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

    /// Set the master timeout.
    pub fn master_timeout(mut self, timeout: impl Into<Option<Time>>) -> Self {
        self.master_timeout = timeout.into();
        self
    }
}

impl ObjectBuilder for GetIndicesSettingsRequestBuilder {
    type Value = GetIndicesSettingsRequest;

    fn build(self) -> std::result::Result<GetIndicesSettingsRequest, MissingRequiredProperty> {
        Ok(GetIndicesSettingsRequest {
            index: self.index,
            name: self.name,
            allow_no_indices: self.allow_no_indices,
            cluster_manager_timeout: self.cluster_manager_timeout,
            expand_wildcards: self.expand_wildcards,
            flat_settings: self.flat_settings,
            ignore_unavailable: self.ignore_unavailable,
            include_defaults: self.include_defaults,
            local: self.local,
            master_timeout: self.master_timeout,
        })
    }
}

fn method(_: &GetIndicesSettingsRequest) -> Method {
    Method::GET
}

const INDEX: u8 = 1 << 0;
const NAME: u8 = 1 << 1;

fn request_url(request: &GetIndicesSettingsRequest) -> Result<String> {
    let mut present = 0;
    if is_present(request.index.as_ref()) {
        present |= INDEX;
    }
    if is_present(request.name.as_ref()) {
        present |= NAME;
    }

    let index = request.index();
    let name = request.name();
    let path = match present {
        0 => PathBuilder::new().literal("_settings"),
        INDEX => PathBuilder::new().list(index).literal("_settings"),
        NAME => PathBuilder::new().literal("_settings").list(name),
        mask if mask == INDEX | NAME => PathBuilder::new()
            .list(index)
            .literal("_settings")
            .list(name),
        _ => return Err(OpenSearchError::no_path_template("indices.get_settings")),
    };
    Ok(path.build())
}

fn query_parameters(request: &GetIndicesSettingsRequest) -> QueryParameters {
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
    put_param(&mut params, "flat_settings", request.flat_settings);
    put_param(&mut params, "ignore_unavailable", request.ignore_unavailable);
    put_param(&mut params, "include_defaults", request.include_defaults);
    put_param(&mut params, "local", request.local);
    put_param(&mut params, "master_timeout", request.master_timeout.as_ref());
    params
}

/// State of one index as reported by the settings and get-index APIs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexState {
    aliases: Option<BTreeMap<String, Alias>>,
    mappings: Option<Value>,
    settings: Option<Value>,
    defaults: Option<Value>,
    data_stream: Option<String>,
}

impl IndexState {
    /// Create a new builder.
    pub fn builder() -> IndexStateBuilder {
        IndexStateBuilder::default()
    }

    /// Aliases pointing at the index.
    pub fn aliases(&self) -> Option<&BTreeMap<String, Alias>> {
        self.aliases.as_ref()
    }

    /// Type mapping.
    pub fn mappings(&self) -> Option<&Value> {
        self.mappings.as_ref()
    }

    /// Explicit settings.
    pub fn settings(&self) -> Option<&Value> {
        self.settings.as_ref()
    }

    /// Default settings, with `include_defaults=true`.
    pub fn defaults(&self) -> Option<&Value> {
        self.defaults.as_ref()
    }

    /// Data stream the index backs, if any.
    pub fn data_stream(&self) -> Option<&str> {
        self.data_stream.as_deref()
    }

    /// Look up a setting by dotted path, e.g. `index.number_of_shards`.
    ///
    /// Works for both nested and flat (`flat_settings=true`) responses.
    pub fn setting(&self, path: &str) -> Option<&Value> {
        let settings = self.settings.as_ref()?;
        if let Some(flat) = settings.get(path) {
            return Some(flat);
        }
        path.split('.')
            .try_fold(settings, |value, segment| value.get(segment))
    }
}

impl SerializeFields for IndexState {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        serialize_optional(map, "aliases", self.aliases.as_ref())?;
        serialize_optional(map, "mappings", self.mappings.as_ref())?;
        serialize_optional(map, "settings", self.settings.as_ref())?;
        serialize_optional(map, "defaults", self.defaults.as_ref())?;
        serialize_optional(map, "data_stream", self.data_stream.as_ref())?;
        Ok(())
    }
}

/// Builder for [`IndexState`]. Every field is optional.
#[derive(Debug, Default)]
pub struct IndexStateBuilder {
    inner: IndexState,
}

impl IndexStateBuilder {
    /// Add an alias.
    pub fn alias(mut self, name: impl Into<String>, alias: Alias) -> Self {
        self.inner
            .aliases
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), alias);
        self
    }

    /// Set the mappings.
    pub fn mappings(mut self, mappings: impl Into<Option<Value>>) -> Self {
        self.inner.mappings = mappings.into();
        self
    }

    /// Set the settings.
    pub fn settings(mut self, settings: impl Into<Option<Value>>) -> Self {
        self.inner.settings = settings.into();
        self
    }

    /// Set the default settings.
    pub fn defaults(mut self, defaults: impl Into<Option<Value>>) -> Self {
        self.inner.defaults = defaults.into();
        self
    }

    /// Set the data stream name.
    pub fn data_stream(mut self, data_stream: impl Into<Option<String>>) -> Self {
        self.inner.data_stream = data_stream.into();
        self
    }
}

impl ObjectBuilder for IndexStateBuilder {
    type Value = IndexState;

    fn build(self) -> std::result::Result<IndexState, MissingRequiredProperty> {
        Ok(self.inner)
    }
}

static INDEX_STATE: Lazy<ObjectDeserializer<IndexStateBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<IndexStateBuilder>::new("IndexState");
    op.add("aliases", |b, v: BTreeMap<String, Alias>| b.inner.aliases = Some(v));
    op.add("mappings", |b, v: Value| b.inner.mappings = Some(v));
    op.add("settings", |b, v: Value| b.inner.settings = Some(v));
    op.add("defaults", |b, v: Value| b.inner.defaults = Some(v));
    op.add("data_stream", |b, v: String| b.inner.data_stream = Some(v));
    op
});

json_object!(IndexState, INDEX_STATE);
