//! Typed OpenSearch REST API bindings for the Armature framework.
//!
//! This crate provides the request/response framework that OpenSearch API
//! bindings are built on, plus index-management endpoints that use it:
//! - Value objects with validating builders
//! - Field-ordered JSON serialization and table-driven deserialization
//! - Dictionary-shaped responses (`{"index-a": {...}, "index-b": {...}}`)
//! - Endpoint descriptors that derive method, path, query string and body
//! - A pluggable [`Transport`], with an adapter over the `opensearch` crate
//!
//! # Example
//!
//! ```rust,no_run
//! use armature_opensearch_api::indices::{CloneIndexRequest, CreateDataStreamRequest};
//! use armature_opensearch_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenSearchClient::new(OpenSearchConfig::new("http://localhost:9200"))?;
//!
//!     let request = CreateDataStreamRequest::builder().name("logs-app").build()?;
//!     client.indices().create_data_stream(&request).await?;
//!
//!     let request = CloneIndexRequest::builder()
//!         .index("products")
//!         .target("products-copy")
//!         .build()?;
//!     let response = client.indices().clone(&request).await?;
//!     println!("cloned into {}", response.index());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod client;
mod codec;
mod config;
mod dictionary;
mod endpoint;
mod error;
pub mod indices;
pub mod path;
mod transport;
pub mod types;

pub use builder::{require, MissingRequiredProperty, ObjectBuilder};
pub use client::OpenSearchClient;
pub use codec::{serialize_object, serialize_optional, ObjectDeserializer, SerializeFields};
pub use config::OpenSearchConfig;
pub use dictionary::{DictionaryResponse, DictionaryResponseBuilder};
pub use endpoint::{
    json_body, no_query_parameters, BooleanEndpoint, Endpoint, QueryParameters, SimpleEndpoint,
};
pub use error::{OpenSearchError, Result};
pub use indices::IndicesClient;
pub use transport::{
    OpenSearchTransport, Transport, TransportOptions, TransportRequest, TransportResponse,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{ObjectBuilder, OpenSearchClient, OpenSearchConfig, OpenSearchError, Result};
}
