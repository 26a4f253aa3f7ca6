//! Index management endpoints.
//!
//! Each endpoint's request type carries its descriptor as an associated
//! `ENDPOINT` constant. [`IndicesClient`] executes them through an
//! [`OpenSearchClient`].

mod clone;
mod data_stream;
mod data_streams_stats;
mod delete;
mod exists;
mod mapping;
mod settings;

pub use clone::{
    Alias, AliasBuilder, CloneIndexRequest, CloneIndexRequestBuilder, CloneIndexResponse,
    CloneIndexResponseBuilder,
};
pub use data_stream::{
    CreateDataStreamRequest, CreateDataStreamRequestBuilder, CreateDataStreamResponse,
    CreateDataStreamResponseBuilder, DataStreamIndex, DataStreamInfo, DataStreamInfoBuilder,
    DataStreamTimestampField, DeleteDataStreamRequest, DeleteDataStreamRequestBuilder,
    DeleteDataStreamResponse, DeleteDataStreamResponseBuilder, GetDataStreamRequest,
    GetDataStreamRequestBuilder, GetDataStreamResponse, GetDataStreamResponseBuilder,
};
pub use data_streams_stats::{
    DataStreamsStatsItem, DataStreamsStatsItemBuilder, DataStreamsStatsRequest,
    DataStreamsStatsRequestBuilder, DataStreamsStatsResponse, DataStreamsStatsResponseBuilder,
};
pub use delete::{
    DeleteIndexRequest, DeleteIndexRequestBuilder, DeleteIndexResponse, DeleteIndexResponseBuilder,
};
pub use exists::{ExistsRequest, ExistsRequestBuilder};
pub use mapping::{GetMappingRequest, GetMappingRequestBuilder, GetMappingResponse, IndexMappingRecord};
pub use settings::{
    GetIndicesSettingsRequest, GetIndicesSettingsRequestBuilder, GetIndicesSettingsResponse,
    IndexState, IndexStateBuilder,
};

use crate::client::OpenSearchClient;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::BooleanResponse;

/// Index management operations.
pub struct IndicesClient<'a, T> {
    client: &'a OpenSearchClient<T>,
}

impl<'a, T: Transport> IndicesClient<'a, T> {
    pub(crate) fn new(client: &'a OpenSearchClient<T>) -> Self {
        Self { client }
    }

    /// Create a data stream.
    pub async fn create_data_stream(
        &self,
        request: &CreateDataStreamRequest,
    ) -> Result<CreateDataStreamResponse> {
        self.client
            .perform_request(&CreateDataStreamRequest::ENDPOINT, request)
            .await
    }

    /// Delete data streams.
    pub async fn delete_data_stream(
        &self,
        request: &DeleteDataStreamRequest,
    ) -> Result<DeleteDataStreamResponse> {
        self.client
            .perform_request(&DeleteDataStreamRequest::ENDPOINT, request)
            .await
    }

    /// Get data streams.
    pub async fn get_data_stream(
        &self,
        request: &GetDataStreamRequest,
    ) -> Result<GetDataStreamResponse> {
        self.client
            .perform_request(&GetDataStreamRequest::ENDPOINT, request)
            .await
    }

    /// Get data stream statistics.
    pub async fn data_streams_stats(
        &self,
        request: &DataStreamsStatsRequest,
    ) -> Result<DataStreamsStatsResponse> {
        self.client
            .perform_request(&DataStreamsStatsRequest::ENDPOINT, request)
            .await
    }

    /// Clone an index.
    pub async fn clone(&self, request: &CloneIndexRequest) -> Result<CloneIndexResponse> {
        self.client
            .perform_request(&CloneIndexRequest::ENDPOINT, request)
            .await
    }

    /// Delete indices.
    pub async fn delete(&self, request: &DeleteIndexRequest) -> Result<DeleteIndexResponse> {
        self.client
            .perform_request(&DeleteIndexRequest::ENDPOINT, request)
            .await
    }

    /// Check whether indices exist.
    pub async fn exists(&self, request: &ExistsRequest) -> Result<BooleanResponse> {
        self.client
            .perform_request(&ExistsRequest::ENDPOINT, request)
            .await
    }

    /// Get index mappings.
    pub async fn get_mapping(&self, request: &GetMappingRequest) -> Result<GetMappingResponse> {
        self.client
            .perform_request(&GetMappingRequest::ENDPOINT, request)
            .await
    }

    /// Get index settings.
    pub async fn get_settings(
        &self,
        request: &GetIndicesSettingsRequest,
    ) -> Result<GetIndicesSettingsResponse> {
        self.client
            .perform_request(&GetIndicesSettingsRequest::ENDPOINT, request)
            .await
    }
}
