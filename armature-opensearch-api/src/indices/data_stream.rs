//! Data stream lifecycle: create, delete and get.

use crate::builder::{push_all, require, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, ObjectDeserializer, SerializeFields};
use crate::endpoint::{no_query_parameters, SimpleEndpoint};
use crate::error::{OpenSearchError, Result};
use crate::path::{is_present, PathBuilder};
use crate::types::{AcknowledgedResponse, AcknowledgedResponseBuilder, HealthStatus};
use http::Method;
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;

// ---------------------------------------------------------------------------
// indices.create_data_stream
// ---------------------------------------------------------------------------

/// Creates a data stream. `PUT /_data_stream/{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDataStreamRequest {
    name: String,
}

impl CreateDataStreamRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: SimpleEndpoint<Self, CreateDataStreamResponse> = SimpleEndpoint::new(
        "indices.create_data_stream",
        put,
        create_url,
        no_query_parameters,
        None,
    );

    /// Create a new builder.
    pub fn builder() -> CreateDataStreamRequestBuilder {
        CreateDataStreamRequestBuilder::default()
    }

    /// Name of the data stream.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for [`CreateDataStreamRequest`].
#[derive(Debug, Default)]
pub struct CreateDataStreamRequestBuilder {
    name: Option<String>,
}

impl CreateDataStreamRequestBuilder {
    /// Set the data stream name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl ObjectBuilder for CreateDataStreamRequestBuilder {
    type Value = CreateDataStreamRequest;

    fn build(self) -> std::result::Result<CreateDataStreamRequest, MissingRequiredProperty> {
        Ok(CreateDataStreamRequest {
            name: require("CreateDataStreamRequest", "name", self.name)?,
        })
    }
}

fn put<R>(_: &R) -> Method {
    Method::PUT
}

fn create_url(request: &CreateDataStreamRequest) -> Result<String> {
    Ok(PathBuilder::new()
        .literal("_data_stream")
        .segment(&request.name)
        .build())
}

/// Acknowledgement of a data stream creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDataStreamResponse {
    base: AcknowledgedResponse,
}

impl CreateDataStreamResponse {
    /// Create a new builder.
    pub fn builder() -> CreateDataStreamResponseBuilder {
        CreateDataStreamResponseBuilder::default()
    }

    /// Whether the cluster acknowledged the creation.
    pub fn acknowledged(&self) -> bool {
        self.base.acknowledged()
    }
}

impl SerializeFields for CreateDataStreamResponse {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        self.base.serialize_fields(map)
    }
}

/// Builder for [`CreateDataStreamResponse`].
#[derive(Debug, Default)]
pub struct CreateDataStreamResponseBuilder {
    base: AcknowledgedResponseBuilder,
}

impl CreateDataStreamResponseBuilder {
    /// Set the acknowledgement flag.
    pub fn acknowledged(mut self, acknowledged: bool) -> Self {
        self.base.set_acknowledged(acknowledged);
        self
    }
}

impl ObjectBuilder for CreateDataStreamResponseBuilder {
    type Value = CreateDataStreamResponse;

    fn build(self) -> std::result::Result<CreateDataStreamResponse, MissingRequiredProperty> {
        Ok(CreateDataStreamResponse {
            base: self.base.build_for("CreateDataStreamResponse")?,
        })
    }
}

static CREATE_RESPONSE: Lazy<ObjectDeserializer<CreateDataStreamResponseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<CreateDataStreamResponseBuilder>::new("CreateDataStreamResponse");
    AcknowledgedResponse::setup_deserializer(&mut op, |b| &mut b.base);
    op
});

json_object!(CreateDataStreamResponse, CREATE_RESPONSE);

// ---------------------------------------------------------------------------
// indices.delete_data_stream
// ---------------------------------------------------------------------------

/// Deletes one or more data streams. `DELETE /_data_stream/{name}`
///
/// Wildcards are accepted in names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDataStreamRequest {
    name: Vec<String>,
}

impl DeleteDataStreamRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: SimpleEndpoint<Self, DeleteDataStreamResponse> = SimpleEndpoint::new(
        "indices.delete_data_stream",
        delete,
        delete_url,
        no_query_parameters,
        None,
    );

    /// Create a new builder.
    pub fn builder() -> DeleteDataStreamRequestBuilder {
        DeleteDataStreamRequestBuilder::default()
    }

    /// Data stream names.
    pub fn name(&self) -> &[String] {
        &self.name
    }
}

/// Builder for [`DeleteDataStreamRequest`].
#[derive(Debug, Default)]
pub struct DeleteDataStreamRequestBuilder {
    name: Option<Vec<String>>,
}

impl DeleteDataStreamRequestBuilder {
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

impl ObjectBuilder for DeleteDataStreamRequestBuilder {
    type Value = DeleteDataStreamRequest;

    fn build(self) -> std::result::Result<DeleteDataStreamRequest, MissingRequiredProperty> {
        Ok(DeleteDataStreamRequest {
            name: require("DeleteDataStreamRequest", "name", self.name)?,
        })
    }
}

fn delete<R>(_: &R) -> Method {
    Method::DELETE
}

fn delete_url(request: &DeleteDataStreamRequest) -> Result<String> {
    // an empty list is an absent segment, and this endpoint has no template
    // without one
    if !is_present(Some(&request.name)) {
        return Err(OpenSearchError::no_path_template("indices.delete_data_stream"));
    }
    Ok(PathBuilder::new()
        .literal("_data_stream")
        .list(&request.name)
        .build())
}

/// Acknowledgement of a data stream deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDataStreamResponse {
    base: AcknowledgedResponse,
}

impl DeleteDataStreamResponse {
    /// Create a new builder.
    pub fn builder() -> DeleteDataStreamResponseBuilder {
        DeleteDataStreamResponseBuilder::default()
    }

    /// Whether the cluster acknowledged the deletion.
    pub fn acknowledged(&self) -> bool {
        self.base.acknowledged()
    }
}

impl SerializeFields for DeleteDataStreamResponse {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        self.base.serialize_fields(map)
    }
}

/// Builder for [`DeleteDataStreamResponse`].
#[derive(Debug, Default)]
pub struct DeleteDataStreamResponseBuilder {
    base: AcknowledgedResponseBuilder,
}

impl DeleteDataStreamResponseBuilder {
    /// Set the acknowledgement flag.
    pub fn acknowledged(mut self, acknowledged: bool) -> Self {
        self.base.set_acknowledged(acknowledged);
        self
    }
}

impl ObjectBuilder for DeleteDataStreamResponseBuilder {
    type Value = DeleteDataStreamResponse;

    fn build(self) -> std::result::Result<DeleteDataStreamResponse, MissingRequiredProperty> {
        Ok(DeleteDataStreamResponse {
            base: self.base.build_for("DeleteDataStreamResponse")?,
        })
    }
}

static DELETE_RESPONSE: Lazy<ObjectDeserializer<DeleteDataStreamResponseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<DeleteDataStreamResponseBuilder>::new("DeleteDataStreamResponse");
    AcknowledgedResponse::setup_deserializer(&mut op, |b| &mut b.base);
    op
});

json_object!(DeleteDataStreamResponse, DELETE_RESPONSE);

// ---------------------------------------------------------------------------
// indices.get_data_stream
// ---------------------------------------------------------------------------

/// Returns data streams. `GET /_data_stream[/{name}]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDataStreamRequest {
    name: Option<Vec<String>>,
}

impl GetDataStreamRequest {
    /// Endpoint descriptor.
    pub const ENDPOINT: SimpleEndpoint<Self, GetDataStreamResponse> = SimpleEndpoint::new(
        "indices.get_data_stream",
        get,
        get_url,
        no_query_parameters,
        None,
    );

    /// Create a new builder.
    pub fn builder() -> GetDataStreamRequestBuilder {
        GetDataStreamRequestBuilder::default()
    }

    /// Data stream names; all streams when empty.
    pub fn name(&self) -> &[String] {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Builder for [`GetDataStreamRequest`].
#[derive(Debug, Default)]
pub struct GetDataStreamRequestBuilder {
    name: Option<Vec<String>>,
}

impl GetDataStreamRequestBuilder {
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

impl ObjectBuilder for GetDataStreamRequestBuilder {
    type Value = GetDataStreamRequest;

    fn build(self) -> std::result::Result<GetDataStreamRequest, MissingRequiredProperty> {
        Ok(GetDataStreamRequest { name: self.name })
    }
}

fn get<R>(_: &R) -> Method {
    Method::GET
}

fn get_url(request: &GetDataStreamRequest) -> Result<String> {
    let path = PathBuilder::new().literal("_data_stream");
    Ok(match &request.name {
        Some(name) if is_present(Some(name)) => path.list(name),
        _ => path,
    }
    .build())
}

/// Data streams matching a get request.
#[derive(Debug, Clone, PartialEq)]
pub struct GetDataStreamResponse {
    data_streams: Vec<DataStreamInfo>,
}

impl GetDataStreamResponse {
    /// Create a new builder.
    pub fn builder() -> GetDataStreamResponseBuilder {
        GetDataStreamResponseBuilder::default()
    }

    /// Matching data streams.
    pub fn data_streams(&self) -> &[DataStreamInfo] {
        &self.data_streams
    }
}

impl SerializeFields for GetDataStreamResponse {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        map.serialize_entry("data_streams", &self.data_streams)
    }
}

/// Builder for [`GetDataStreamResponse`].
#[derive(Debug, Default)]
pub struct GetDataStreamResponseBuilder {
    data_streams: Option<Vec<DataStreamInfo>>,
}

impl GetDataStreamResponseBuilder {
    /// Replace the list of data streams.
    pub fn data_streams(mut self, data_streams: Vec<DataStreamInfo>) -> Self {
        self.data_streams = Some(data_streams);
        self
    }

    /// Add a data stream.
    pub fn data_stream(mut self, data_stream: DataStreamInfo) -> Self {
        push_all(&mut self.data_streams, [data_stream]);
        self
    }
}

impl ObjectBuilder for GetDataStreamResponseBuilder {
    type Value = GetDataStreamResponse;

    fn build(self) -> std::result::Result<GetDataStreamResponse, MissingRequiredProperty> {
        Ok(GetDataStreamResponse {
            data_streams: require("GetDataStreamResponse", "data_streams", self.data_streams)?,
        })
    }
}

static GET_RESPONSE: Lazy<ObjectDeserializer<GetDataStreamResponseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<GetDataStreamResponseBuilder>::new("GetDataStreamResponse");
    op.add("data_streams", |b, v: Vec<DataStreamInfo>| b.data_streams = Some(v));
    op
});

json_object!(GetDataStreamResponse, GET_RESPONSE);

/// One data stream.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStreamInfo {
    name: String,
    timestamp_field: DataStreamTimestampField,
    indices: Vec<DataStreamIndex>,
    generation: i64,
    status: HealthStatus,
    template: String,
}

impl DataStreamInfo {
    /// Create a new builder.
    pub fn builder() -> DataStreamInfoBuilder {
        DataStreamInfoBuilder::default()
    }

    /// Stream name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Timestamp field of the stream.
    pub fn timestamp_field(&self) -> &DataStreamTimestampField {
        &self.timestamp_field
    }

    /// Backing indices, oldest first.
    pub fn indices(&self) -> &[DataStreamIndex] {
        &self.indices
    }

    /// Number of rollovers plus one.
    pub fn generation(&self) -> i64 {
        self.generation
    }

    /// Health of the backing indices.
    pub fn status(&self) -> HealthStatus {
        self.status
    }

    /// Index template the stream was created from.
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl SerializeFields for DataStreamInfo {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("timestamp_field", &self.timestamp_field)?;
        map.serialize_entry("indices", &self.indices)?;
        map.serialize_entry("generation", &self.generation)?;
        map.serialize_entry("status", &self.status)?;
        map.serialize_entry("template", &self.template)?;
        Ok(())
    }
}

/// Builder for [`DataStreamInfo`].
#[derive(Debug, Default)]
pub struct DataStreamInfoBuilder {
    name: Option<String>,
    timestamp_field: Option<DataStreamTimestampField>,
    indices: Option<Vec<DataStreamIndex>>,
    generation: Option<i64>,
    status: Option<HealthStatus>,
    template: Option<String>,
}

impl DataStreamInfoBuilder {
    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the timestamp field.
    pub fn timestamp_field(mut self, field: DataStreamTimestampField) -> Self {
        self.timestamp_field = Some(field);
        self
    }

    /// Replace the backing indices.
    pub fn indices(mut self, indices: Vec<DataStreamIndex>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Add a backing index.
    pub fn index(mut self, index: DataStreamIndex) -> Self {
        push_all(&mut self.indices, [index]);
        self
    }

    /// Set the generation.
    pub fn generation(mut self, generation: i64) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Set the health status.
    pub fn status(mut self, status: HealthStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the template name.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl ObjectBuilder for DataStreamInfoBuilder {
    type Value = DataStreamInfo;

    fn build(self) -> std::result::Result<DataStreamInfo, MissingRequiredProperty> {
        const TYPE: &str = "DataStreamInfo";
        Ok(DataStreamInfo {
            name: require(TYPE, "name", self.name)?,
            timestamp_field: require(TYPE, "timestamp_field", self.timestamp_field)?,
            indices: require(TYPE, "indices", self.indices)?,
            generation: require(TYPE, "generation", self.generation)?,
            status: require(TYPE, "status", self.status)?,
            template: require(TYPE, "template", self.template)?,
        })
    }
}

static DATA_STREAM_INFO: Lazy<ObjectDeserializer<DataStreamInfoBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<DataStreamInfoBuilder>::new("DataStreamInfo");
    op.add("name", |b, v: String| b.name = Some(v));
    op.add("timestamp_field", |b, v: DataStreamTimestampField| b.timestamp_field = Some(v));
    op.add("indices", |b, v: Vec<DataStreamIndex>| b.indices = Some(v));
    op.add("generation", |b, v: i64| b.generation = Some(v));
    op.add("status", |b, v: HealthStatus| b.status = Some(v));
    op.add("template", |b, v: String| b.template = Some(v));
    op
});

json_object!(DataStreamInfo, DATA_STREAM_INFO);

/// The `timestamp_field` of a data stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStreamTimestampField {
    name: String,
}

impl DataStreamTimestampField {
    /// Create a timestamp field descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Field name, usually `@timestamp`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SerializeFields for DataStreamTimestampField {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        map.serialize_entry("name", &self.name)
    }
}

#[derive(Debug, Default)]
struct DataStreamTimestampFieldBuilder {
    name: Option<String>,
}

impl ObjectBuilder for DataStreamTimestampFieldBuilder {
    type Value = DataStreamTimestampField;

    fn build(self) -> std::result::Result<DataStreamTimestampField, MissingRequiredProperty> {
        Ok(DataStreamTimestampField {
            name: require("DataStreamTimestampField", "name", self.name)?,
        })
    }
}

static TIMESTAMP_FIELD: Lazy<ObjectDeserializer<DataStreamTimestampFieldBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<DataStreamTimestampFieldBuilder>::new("DataStreamTimestampField");
    op.add("name", |b, v: String| b.name = Some(v));
    op
});

json_object!(DataStreamTimestampField, TIMESTAMP_FIELD);

/// A backing index of a data stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStreamIndex {
    index_name: String,
    index_uuid: String,
}

impl DataStreamIndex {
    /// Create a backing index descriptor.
    pub fn new(index_name: impl Into<String>, index_uuid: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            index_uuid: index_uuid.into(),
        }
    }

    /// Index name, e.g. `.ds-logs-app-000001`.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Index UUID.
    pub fn index_uuid(&self) -> &str {
        &self.index_uuid
    }
}

impl SerializeFields for DataStreamIndex {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        map.serialize_entry("index_name", &self.index_name)?;
        map.serialize_entry("index_uuid", &self.index_uuid)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct DataStreamIndexBuilder {
    index_name: Option<String>,
    index_uuid: Option<String>,
}

impl ObjectBuilder for DataStreamIndexBuilder {
    type Value = DataStreamIndex;

    fn build(self) -> std::result::Result<DataStreamIndex, MissingRequiredProperty> {
        Ok(DataStreamIndex {
            index_name: require("DataStreamIndex", "index_name", self.index_name)?,
            index_uuid: require("DataStreamIndex", "index_uuid", self.index_uuid)?,
        })
    }
}

static DATA_STREAM_INDEX: Lazy<ObjectDeserializer<DataStreamIndexBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<DataStreamIndexBuilder>::new("DataStreamIndex");
    op.add("index_name", |b, v: String| b.index_name = Some(v));
    op.add("index_uuid", |b, v: String| b.index_uuid = Some(v));
    op
});

json_object!(DataStreamIndex, DATA_STREAM_INDEX);
