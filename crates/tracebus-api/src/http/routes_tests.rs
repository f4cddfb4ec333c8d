use super::*;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use std::time::Duration;
use tower::ServiceExt;

use tracebus_core::Tracer;
use tracebus_protocols::{MapKeyValueEntry, MessageSink, TraceHandler};

use crate::error::ErrorResponse;
use crate::http::handlers::{
    ExecuteReply, ResourceConfigReply, ResourceNamesReply, ResourceTypesReply, NDJSON,
};

struct DaemonHandler;

#[async_trait]
impl TraceHandler for DaemonHandler {
    fn config(&self) -> Vec<MapKeyValueEntry> {
        vec![MapKeyValueEntry::new("ipam_type", "crd")]
    }

    fn trace(&self) -> Vec<MapKeyValueEntry> {
        vec![MapKeyValueEntry::new("pending_pods", 0)]
    }

    async fn execute(&self, command: &str, args: &[String], sink: MessageSink) {
        match command {
            "echo" => {
                for arg in args {
                    if !sink.send(arg.clone()).await {
                        return;
                    }
                }
            }
            "watch" => loop {
                if !sink.send("tick").await {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
            },
            other => {
                sink.send(format!("unsupported command: {}", other)).await;
            }
        }
    }
}

fn create_test_router() -> (Router, Arc<AppState>) {
    let tracer = Arc::new(Tracer::new());
    tracer
        .register("daemon", "main", Arc::new(DaemonHandler))
        .unwrap();
    let state = Arc::new(AppState::new(tracer));
    (create_router(state.clone()), state)
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn execute_request(uri: &str, command: &str, args: &[&str]) -> Request<Body> {
    let body = serde_json::json!({ "command": command, "args": args });
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_list_types_endpoint() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(Request::builder().uri("/v1/resource-types").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: ResourceTypesReply = body_json(response).await;
    assert_eq!(reply.type_names, vec!["daemon"]);
}

#[tokio::test]
async fn test_list_resources_unknown_type_endpoint() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/resource-types/storage")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: ResourceNamesReply = body_json(response).await;
    assert!(reply.resource_names.is_empty());
}

#[tokio::test]
async fn test_config_endpoint() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/resources/daemon/main/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: ResourceConfigReply = body_json(response).await;
    assert_eq!(reply.config, vec![MapKeyValueEntry::new("ipam_type", "crd")]);
}

#[tokio::test]
async fn test_config_endpoint_decodes_encoded_name() {
    let (app, state) = create_test_router();
    state
        .tracer
        .register("resource_pool", "default/nginx", Arc::new(DaemonHandler))
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/resources/resource_pool/default%2Fnginx/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: ResourceConfigReply = body_json(response).await;
    assert_eq!(reply.config, vec![MapKeyValueEntry::new("ipam_type", "crd")]);
}

#[tokio::test]
async fn test_trace_endpoint_unknown_type() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/resources/factory/main/trace")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let reply: ErrorResponse = body_json(response).await;
    assert_eq!(reply.code, "type_not_found");
}

#[tokio::test]
async fn test_execute_endpoint_streams_ndjson() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(execute_request("/v1/resources/daemon/main/execute", "echo", &["a", "b"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], NDJSON);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let messages: Vec<String> = std::str::from_utf8(&bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str::<ExecuteReply>(line).unwrap().message)
        .collect();
    assert_eq!(messages, vec!["a", "b"]);
}

#[tokio::test]
async fn test_execute_endpoint_command_error_is_message() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(execute_request("/v1/resources/daemon/main/execute", "reboot", &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let reply: ExecuteReply = serde_json::from_slice(bytes.trim_ascii_end()).unwrap();
    assert_eq!(reply.message, "unsupported command: reboot");
}

#[tokio::test]
async fn test_execute_endpoint_unknown_resource() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(execute_request("/v1/resources/daemon/other/execute", "echo", &["a"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let reply: ErrorResponse = body_json(response).await;
    assert_eq!(reply.code, "resource_not_found");
}

#[tokio::test]
async fn test_shutdown_ends_running_execution() {
    let (app, state) = create_test_router();
    let response = app
        .oneshot(execute_request("/v1/resources/daemon/main/execute", "watch", &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reader = tokio::spawn(to_bytes(response.into_body(), usize::MAX));
    tokio::time::sleep(Duration::from_millis(20)).await;
    state.request_shutdown();

    let bytes = tokio::time::timeout(Duration::from_secs(2), reader)
        .await
        .expect("stream should end after shutdown")
        .unwrap()
        .unwrap();
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn test_resource_mapping_endpoint_without_provider() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/resource-mapping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let (app, _) = create_test_router();
    let response = app
        .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
