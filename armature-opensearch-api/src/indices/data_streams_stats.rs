//! `indices.data_streams_stats`: storage statistics for data streams.

use crate::builder::{push_all, require, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, serialize_optional, ObjectDeserializer, SerializeFields};
use crate::endpoint::{no_query_parameters, SimpleEndpoint};
use crate::error::Result;
use crate::path::{is_present, PathBuilder};
use crate::types::ShardStatistics;
use http::Method;
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;

/// `GET /_data_stream[/{name}]/_stats`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStreamsStatsRequest {
    name: Option<Vec<String>>,
}

impl DataStreamsStatsRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: SimpleEndpoint<Self, DataStreamsStatsResponse> = SimpleEndpoint::new(
        "indices.data_streams_stats",
        method,
        request_url,
        no_query_parameters,
        None,
    );

    /// Create a new builder.
    pub fn builder() -> DataStreamsStatsRequestBuilder {
        DataStreamsStatsRequestBuilder::default()
    }

    /// Data stream names; all streams when empty.
    pub fn name(&self) -> &[String] {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Builder for [`DataStreamsStatsRequest`].
#[derive(Debug, Default)]
pub struct DataStreamsStatsRequestBuilder {
    name: Option<Vec<String>>,
}

impl DataStreamsStatsRequestBuilder {
    /// Replace the list of names.
    pub fn names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.name = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Add a name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        push_all(&mut self.name, [name.into()]);
        self
    }
}

impl ObjectBuilder for DataStreamsStatsRequestBuilder {
    type Value = DataStreamsStatsRequest;

    fn build(self) -> std::result::Result<DataStreamsStatsRequest, MissingRequiredProperty> {
        Ok(DataStreamsStatsRequest { name: self.name })
    }
}

fn method(_: &DataStreamsStatsRequest) -> Method {
    Method::GET
}

fn request_url(request: &DataStreamsStatsRequest) -> Result<String> {
    let mut path = PathBuilder::new().literal("_data_stream");
    if let Some(name) = request.name.as_ref().filter(|n| is_present(Some(*n))) {
        path = path.list(name);
    }
    Ok(path.literal("_stats").build())
}

/// Statistics for the requested data streams.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStreamsStatsResponse {
    shards: ShardStatistics,
    data_stream_count: i32,
    backing_indices: i32,
    total_store_size: Option<String>,
    total_store_size_bytes: i64,
    data_streams: Vec<DataStreamsStatsItem>,
}

impl DataStreamsStatsResponse {
    /// Create a new builder.
    pub fn builder() -> DataStreamsStatsResponseBuilder {
        DataStreamsStatsResponseBuilder::default()
    }

    /// Shard outcome (wire name `_shards`).
    pub fn shards(&self) -> &ShardStatistics {
        &self.shards
    }

    /// Number of matched streams.
    pub fn data_stream_count(&self) -> i32 {
        self.data_stream_count
    }

    /// Total backing indices across matched streams.
    pub fn backing_indices(&self) -> i32 {
        self.backing_indices
    }

    /// Human-readable total size, present with `human=true`.
    pub fn total_store_size(&self) -> Option<&str> {
        self.total_store_size.as_deref()
    }

    /// Total size in bytes.
    pub fn total_store_size_bytes(&self) -> i64 {
        self.total_store_size_bytes
    }

    /// Per-stream statistics.
    pub fn data_streams(&self) -> &[DataStreamsStatsItem] {
        &self.data_streams
    }
}

impl SerializeFields for DataStreamsStatsResponse {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        map.serialize_entry("_shards", &self.shards)?;
        map.serialize_entry("data_stream_count", &self.data_stream_count)?;
        map.serialize_entry("backing_indices", &self.backing_indices)?;
        serialize_optional(map, "total_store_size", self.total_store_size.as_ref())?;
        map.serialize_entry("total_store_size_bytes", &self.total_store_size_bytes)?;
        map.serialize_entry("data_streams", &self.data_streams)?;
        Ok(())
    }
}

/// Builder for [`DataStreamsStatsResponse`].
#[derive(Debug, Default)]
pub struct DataStreamsStatsResponseBuilder {
    shards: Option<ShardStatistics>,
    data_stream_count: Option<i32>,
    backing_indices: Option<i32>,
    total_store_size: Option<String>,
    total_store_size_bytes: Option<i64>,
    data_streams: Option<Vec<DataStreamsStatsItem>>,
}

impl DataStreamsStatsResponseBuilder {
    /// Set the shard statistics.
    pub fn shards(mut self, shards: ShardStatistics) -> Self {
        self.shards = Some(shards);
        self
    }

    /// Set the stream count.
    pub fn data_stream_count(mut self, count: i32) -> Self {
        self.data_stream_count = Some(count);
        self
    }

    /// Set the backing index count.
    pub fn backing_indices(mut self, count: i32) -> Self {
        self.backing_indices = Some(count);
        self
    }

    /// Set the human-readable total size.
    pub fn total_store_size(mut self, size: impl Into<Option<String>>) -> Self {
        self.total_store_size = size.into();
        self
    }

    /// Set the total size in bytes.
    pub fn total_store_size_bytes(mut self, bytes: i64) -> Self {
        self.total_store_size_bytes = Some(bytes);
        self
    }

    /// Add a per-stream item.
    pub fn data_stream(mut self, item: DataStreamsStatsItem) -> Self {
        push_all(&mut self.data_streams, [item]);
        self
    }
}

impl ObjectBuilder for DataStreamsStatsResponseBuilder {
    type Value = DataStreamsStatsResponse;

    fn build(self) -> std::result::Result<DataStreamsStatsResponse, MissingRequiredProperty> {
        const TYPE: &str = "DataStreamsStatsResponse";
        Ok(DataStreamsStatsResponse {
            shards: require(TYPE, "_shards", self.shards)?,
            data_stream_count: require(TYPE, "data_stream_count", self.data_stream_count)?,
            backing_indices: require(TYPE, "backing_indices", self.backing_indices)?,
            total_store_size: self.total_store_size,
            total_store_size_bytes: require(TYPE, "total_store_size_bytes", self.total_store_size_bytes)?,
            data_streams: require(TYPE, "data_streams", self.data_streams)?,
        })
    }
}

static RESPONSE: Lazy<ObjectDeserializer<DataStreamsStatsResponseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<DataStreamsStatsResponseBuilder>::new("DataStreamsStatsResponse");
    op.add("_shards", |b, v: ShardStatistics| b.shards = Some(v));
    op.add("data_stream_count", |b, v: i32| b.data_stream_count = Some(v));
    op.add("backing_indices", |b, v: i32| b.backing_indices = Some(v));
    op.add("total_store_size", |b, v: String| b.total_store_size = Some(v));
    op.add("total_store_size_bytes", |b, v: i64| b.total_store_size_bytes = Some(v));
    op.add("data_streams", |b, v: Vec<DataStreamsStatsItem>| b.data_streams = Some(v));
    op
});

json_object!(DataStreamsStatsResponse, RESPONSE);

/// Statistics for one data stream.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStreamsStatsItem {
    data_stream: String,
    backing_indices: i32,
    store_size: Option<String>,
    store_size_bytes: i64,
    maximum_timestamp: i64,
}

impl DataStreamsStatsItem {
    /// Create a new builder.
    pub fn builder() -> DataStreamsStatsItemBuilder {
        DataStreamsStatsItemBuilder::default()
    }

    /// Stream name.
    pub fn data_stream(&self) -> &str {
        &self.data_stream
    }

    /// Number of backing indices.
    pub fn backing_indices(&self) -> i32 {
        self.backing_indices
    }

    /// Human-readable size.
    pub fn store_size(&self) -> Option<&str> {
        self.store_size.as_deref()
    }

    /// Size in bytes.
    pub fn store_size_bytes(&self) -> i64 {
        self.store_size_bytes
    }

    /// Highest `@timestamp` in the stream, epoch millis.
    pub fn maximum_timestamp(&self) -> i64 {
        self.maximum_timestamp
    }
}

impl SerializeFields for DataStreamsStatsItem {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        map.serialize_entry("data_stream", &self.data_stream)?;
        map.serialize_entry("backing_indices", &self.backing_indices)?;
        serialize_optional(map, "store_size", self.store_size.as_ref())?;
        map.serialize_entry("store_size_bytes", &self.store_size_bytes)?;
        map.serialize_entry("maximum_timestamp", &self.maximum_timestamp)?;
        Ok(())
    }
}

/// Builder for [`DataStreamsStatsItem`].
#[derive(Debug, Default)]
pub struct DataStreamsStatsItemBuilder {
    data_stream: Option<String>,
    backing_indices: Option<i32>,
    store_size: Option<String>,
    store_size_bytes: Option<i64>,
    maximum_timestamp: Option<i64>,
}

impl DataStreamsStatsItemBuilder {
    /// Set the stream name.
    pub fn data_stream(mut self, name: impl Into<String>) -> Self {
        self.data_stream = Some(name.into());
        self
    }

    /// Set the backing index count.
    pub fn backing_indices(mut self, count: i32) -> Self {
        self.backing_indices = Some(count);
        self
    }

    /// Set the human-readable size.
    pub fn store_size(mut self, size: impl Into<Option<String>>) -> Self {
        self.store_size = size.into();
        self
    }

    /// Set the size in bytes.
    pub fn store_size_bytes(mut self, bytes: i64) -> Self {
        self.store_size_bytes = Some(bytes);
        self
    }

    /// Set the maximum timestamp.
    pub fn maximum_timestamp(mut self, millis: i64) -> Self {
        self.maximum_timestamp = Some(millis);
        self
    }
}

impl ObjectBuilder for DataStreamsStatsItemBuilder {
    type Value = DataStreamsStatsItem;

    fn build(self) -> std::result::Result<DataStreamsStatsItem, MissingRequiredProperty> {
        const TYPE: &str = "DataStreamsStatsItem";
        Ok(DataStreamsStatsItem {
            data_stream: require(TYPE, "data_stream", self.data_stream)?,
            backing_indices: require(TYPE, "backing_indices", self.backing_indices)?,
            store_size: self.store_size,
            store_size_bytes: require(TYPE, "store_size_bytes", self.store_size_bytes)?,
            maximum_timestamp: require(TYPE, "maximum_timestamp", self.maximum_timestamp)?,
        })
    }
}

static ITEM: Lazy<ObjectDeserializer<DataStreamsStatsItemBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<DataStreamsStatsItemBuilder>::new("DataStreamsStatsItem");
    op.add("data_stream", |b, v: String| b.data_stream = Some(v));
    op.add("backing_indices", |b, v: i32| b.backing_indices = Some(v));
    op.add("store_size", |b, v: String| b.store_size = Some(v));
    op.add("store_size_bytes", |b, v: i64| b.store_size_bytes = Some(v));
    op.add("maximum_timestamp", |b, v: i64| b.maximum_timestamp = Some(v));
    op
});

json_object!(DataStreamsStatsItem, ITEM);
