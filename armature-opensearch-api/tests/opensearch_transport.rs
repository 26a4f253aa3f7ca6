//! Tests for the `opensearch` crate adapter over real HTTP.

use armature_opensearch_api::indices::*;
use armature_opensearch_api::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(
    server: &MockServer,
    config: impl FnOnce(OpenSearchConfig) -> OpenSearchConfig,
) -> OpenSearchClient {
    OpenSearchClient::new(config(OpenSearchConfig::new(server.uri()))).unwrap()
}

#[tokio::test]
async fn test_create_data_stream_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/_data_stream/logs-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, |c| c);
    let request = CreateDataStreamRequest::builder()
        .name("logs-app")
        .build()
        .unwrap();

    let response = client.indices().create_data_stream(&request).await.unwrap();
    assert!(response.acknowledged());
}

#[tokio::test]
async fn test_path_prefix_auth_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/_settings"))
        .and(query_param("flat_settings", "true"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .and(header("x-opaque-id", "nightly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": {"settings": {"index.number_of_shards": "1"}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, |c| {
        c.with_path_prefix("/search/")
            .with_basic_auth("admin", "secret")
            .with_header("x-opaque-id", "nightly")
    });
    let request = GetIndicesSettingsRequest::builder()
        .flat_settings(true)
        .build()
        .unwrap();

    let response = client.indices().get_settings(&request).await.unwrap();
    assert_eq!(
        response.get("logs").and_then(|s| s.setting("index.number_of_shards")),
        Some(&json!("1"))
    );
}

#[tokio::test]
async fn test_clone_body_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/source/_clone/target"))
        .and(body_json(json!({"settings": {"index.number_of_replicas": 0}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "shards_acknowledged": false,
            "index": "target"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, |c| c);
    let request = CloneIndexRequest::builder()
        .index("source")
        .target("target")
        .settings(json!({"index.number_of_replicas": 0}))
        .build()
        .unwrap();

    let response = client.indices().clone(&request).await.unwrap();
    assert!(!response.shards_acknowledged());
}

#[tokio::test]
async fn test_exists_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/present"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/absent"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, |c| c);
    let present = ExistsRequest::builder().index("present").build().unwrap();
    let absent = ExistsRequest::builder().index("absent").build().unwrap();

    assert!(client.indices().exists(&present).await.unwrap().value());
    assert!(!client.indices().exists(&absent).await.unwrap().value());
}

#[tokio::test]
async fn test_error_status_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/locked"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"type": "cluster_block_exception", "reason": "index [locked] blocked"},
            "status": 403
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, |c| c);
    let request = DeleteIndexRequest::builder().index("locked").build().unwrap();

    let err = client.indices().delete(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert_eq!(
        err.error_response().map(|r| r.error().kind()),
        Some("cluster_block_exception")
    );
}

#[tokio::test]
async fn test_encoded_segments_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/my%20index,other/_mapping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, |c| c);
    let request = GetMappingRequest::builder()
        .indices(["my index", "other"])
        .build()
        .unwrap();

    assert!(client.indices().get_mapping(&request).await.unwrap().is_empty());
}
