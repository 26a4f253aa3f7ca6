//! Dispatch tests for armature-opensearch-api against an in-memory transport.

use armature_opensearch_api::indices::*;
use armature_opensearch_api::types::{Time, WaitForActiveShards};
use armature_opensearch_api::*;
use async_trait::async_trait;
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing_test::traced_test;

/// Records requests and replays canned responses in order.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
    responses: Mutex<VecDeque<TransportResponse>>,
}

impl RecordingTransport {
    fn replying(responses: impl IntoIterator<Item = TransportResponse>) -> Self {
        Self {
            requests: Mutex::default(),
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| OpenSearchError::transport("no canned response left", None))
    }
}

fn client(responses: impl IntoIterator<Item = TransportResponse>) -> OpenSearchClient<RecordingTransport> {
    OpenSearchClient::with_transport(RecordingTransport::replying(responses))
}

fn json_response(status: u16, body: Value) -> TransportResponse {
    TransportResponse::new(status, serde_json::to_vec(&body).unwrap())
}

#[tokio::test]
async fn test_create_data_stream() {
    let client = client([json_response(200, json!({"acknowledged": true}))]);
    let request = CreateDataStreamRequest::builder()
        .name("logs-app")
        .build()
        .unwrap();

    let response = client.indices().create_data_stream(&request).await.unwrap();
    assert!(response.acknowledged());

    let sent = client.transport().requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::PUT);
    assert_eq!(sent[0].path, "/_data_stream/logs-app");
    assert!(sent[0].query.is_empty());
    assert!(sent[0].body.is_none());
}

#[tokio::test]
async fn test_clone_sends_body_and_query() {
    let client = client([json_response(
        200,
        json!({"acknowledged": true, "shards_acknowledged": true, "index": "my-index"}),
    )]);
    let request = CloneIndexRequest::builder()
        .index("source")
        .target("my-index")
        .settings(json!({"index.number_of_replicas": 0}))
        .wait_for_active_shards(WaitForActiveShards::Count(1))
        .timeout(Time::from("2m"))
        .build()
        .unwrap();

    let response = client.indices().clone(&request).await.unwrap();
    assert_eq!(response.index(), "my-index");
    assert!(response.shards_acknowledged());

    let sent = &client.transport().requests()[0];
    assert_eq!(sent.method, Method::PUT);
    assert_eq!(sent.path, "/source/_clone/my-index");
    assert_eq!(sent.query["wait_for_active_shards"], "1");
    assert_eq!(sent.query["timeout"], "2m");
    let body: Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"settings": {"index.number_of_replicas": 0}}));
}

#[tokio::test]
async fn test_get_data_stream_all_and_named() {
    let body = json!({"data_streams": []});
    let client = client([json_response(200, body.clone()), json_response(200, body)]);

    let all = GetDataStreamRequest::builder().build().unwrap();
    let named = GetDataStreamRequest::builder()
        .names(["a", "b", "c"])
        .build()
        .unwrap();
    assert!(client.indices().get_data_stream(&all).await.unwrap().data_streams().is_empty());
    client.indices().get_data_stream(&named).await.unwrap();

    let paths: Vec<String> = client
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/_data_stream", "/_data_stream/a,b,c"]);
}

#[tokio::test]
async fn test_error_response_is_typed() {
    let client = client([json_response(
        404,
        json!({
            "error": {
                "type": "index_not_found_exception",
                "reason": "no such index [missing]",
                "root_cause": [{"type": "index_not_found_exception", "reason": "no such index [missing]"}]
            },
            "status": 404
        }),
    )]);
    let request = DeleteIndexRequest::builder().index("missing").build().unwrap();

    let err = client.indices().delete(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    let response = err.error_response().unwrap();
    assert_eq!(response.error().kind(), "index_not_found_exception");
    assert_eq!(response.error().root_cause().len(), 1);
    assert!(err.to_string().contains("no such index [missing]"));
}

#[tokio::test]
#[traced_test]
async fn test_undecodable_error_body_falls_back_to_response_decoder() {
    let client = client([TransportResponse::new(404, "{}")]);
    let request = GetMappingRequest::builder().index("logs-*").build().unwrap();

    let response = client.indices().get_mapping(&request).await.unwrap();
    assert!(response.is_empty());
    assert!(logs_contain("Failed to decode error body"));
}

#[tokio::test]
async fn test_error_body_matching_nothing_is_transport_error() {
    let client = client([TransportResponse::new(502, "<html>Bad Gateway</html>")]);
    let request = GetIndicesSettingsRequest::builder().build().unwrap();

    let err = client.indices().get_settings(&request).await.unwrap_err();
    assert!(matches!(
        err,
        OpenSearchError::Transport {
            status: Some(502),
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "Transport error: Failed to decode error response"
    );
    let cause = std::error::Error::source(&err).unwrap();
    assert!(cause.to_string().contains("ErrorResponse"), "{cause}");
}

#[tokio::test]
#[traced_test]
async fn test_malformed_error_body_skips_response_decoder() {
    let client = client([json_response(
        400,
        json!({"error": "no handler found for uri [/_mapping/x]", "status": 400}),
    )]);
    let request = GetMappingRequest::builder().build().unwrap();

    let err = client.indices().get_mapping(&request).await.unwrap_err();
    match &err {
        OpenSearchError::Transport {
            status: Some(400),
            source: Some(cause),
            ..
        } => assert!(
            matches!(**cause, OpenSearchError::Decode { type_name: "ErrorResponse", .. }),
            "{cause:?}"
        ),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!logs_contain("trying response decoder"));
}

#[tokio::test]
async fn test_missing_field_in_success_body_is_missing_property() {
    let client = client([json_response(200, json!({"acknowledged": true, "index": "x"}))]);
    let request = CloneIndexRequest::builder()
        .index("a")
        .target("x")
        .build()
        .unwrap();

    let err = client.indices().clone(&request).await.unwrap_err();
    match err {
        OpenSearchError::MissingRequiredProperty(missing) => {
            assert_eq!(missing.type_name(), "CloneIndexResponse");
            assert_eq!(missing.property(), "shards_acknowledged");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_body() {
    let client = client([TransportResponse::new(503, Vec::new())]);
    let request = GetMappingRequest::builder().build().unwrap();

    let err = client.indices().get_mapping(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert!(err.error_response().is_none());
}

#[tokio::test]
async fn test_success_without_body() {
    let client = client([TransportResponse::new(200, Vec::new())]);
    let request = GetMappingRequest::builder().build().unwrap();

    let err = client.indices().get_mapping(&request).await.unwrap_err();
    assert!(err.to_string().contains("indices.get_mapping"), "{err}");
}

#[tokio::test]
async fn test_exists_maps_status_codes() {
    let client = client([
        TransportResponse::new(200, Vec::new()),
        TransportResponse::new(404, Vec::new()),
        TransportResponse::new(500, Vec::new()),
        TransportResponse::new(302, Vec::new()),
    ]);
    let request = ExistsRequest::builder().index("products").build().unwrap();

    assert!(client.indices().exists(&request).await.unwrap().value());
    assert!(!client.indices().exists(&request).await.unwrap().value());
    let err = client.indices().exists(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    let err = client.indices().exists(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(302));

    let sent = client.transport().requests();
    assert!(sent.iter().all(|r| r.method == Method::HEAD && r.path == "/products"));
}

#[tokio::test]
async fn test_path_template_failure_sends_nothing() {
    let client = client([]);
    let request = DeleteDataStreamRequest::builder()
        .names(Vec::<String>::new())
        .build()
        .unwrap();

    let err = client.indices().delete_data_stream(&request).await.unwrap_err();
    assert!(err.is_fatal());
    assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn test_transport_options_apply_to_every_request() {
    let base = client([
        json_response(200, json!({"data_streams": []})),
        json_response(200, json!({"data_streams": []})),
    ]);
    let tagged = base.with_transport_options(
        TransportOptions::new()
            .with_header("x-opaque-id", "job-42")
            .with_query_parameter("human", "true"),
    );
    let request = GetDataStreamRequest::builder().build().unwrap();

    tagged.indices().get_data_stream(&request).await.unwrap();
    base.indices().get_data_stream(&request).await.unwrap();

    let sent = base.transport().requests();
    assert_eq!(sent[0].headers["x-opaque-id"], "job-42");
    assert_eq!(sent[0].query["human"], "true");
    assert!(sent[1].headers.is_empty());
    assert!(sent[1].query.is_empty());
}

#[tokio::test]
async fn test_data_streams_stats_decode() {
    let client = client([json_response(
        200,
        json!({
            "_shards": {"total": 2, "successful": 2, "failed": 0},
            "data_stream_count": 1,
            "backing_indices": 1,
            "total_store_size_bytes": 512,
            "data_streams": [{
                "data_stream": "logs-app",
                "backing_indices": 1,
                "store_size_bytes": 512,
                "maximum_timestamp": 0
            }]
        }),
    )]);
    let request = DataStreamsStatsRequest::builder().name("logs-app").build().unwrap();

    let response = client.indices().data_streams_stats(&request).await.unwrap();
    assert_eq!(response.data_stream_count(), 1);
    assert_eq!(response.data_streams()[0].store_size_bytes(), 512);
    assert_eq!(
        client.transport().requests()[0].path,
        "/_data_stream/logs-app/_stats"
    );
}

#[tokio::test]
async fn test_decode_failure_names_field() {
    let client = client([json_response(
        200,
        json!({"acknowledged": "yes", "shards_acknowledged": true, "index": "i"}),
    )]);
    let request = CloneIndexRequest::builder()
        .index("a")
        .target("b")
        .build()
        .unwrap();

    let err = client.indices().clone(&request).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("CloneIndexResponse.acknowledged"), "{message}");
    assert!(message.contains("bool"), "{message}");
}
