//! Request handlers and reply shapes.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tracebus_core::MappingRecord;
use tracebus_protocols::MapKeyValueEntry;

use crate::error::{error_response, ErrorResponse};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Content type of the execute stream: one JSON object per line.
pub const NDJSON: &str = "application/x-ndjson";

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceTypesReply {
    pub type_names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceNamesReply {
    pub resource_names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceConfigReply {
    pub config: Vec<MapKeyValueEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceTraceReply {
    pub trace: Vec<MapKeyValueEntry>,
}

/// Request to run a diagnostic command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// One line of the execute stream.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteReply {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceMappingReply {
    pub info: Vec<MappingRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessReply {
    pub status: String,
    pub uptime_seconds: u64,
}

/// List registered resource types.
pub async fn list_resource_types(State(state): State<Arc<AppState>>) -> Json<ResourceTypesReply> {
    Json(ResourceTypesReply {
        type_names: state.tracer.types(),
    })
}

/// List resources of one type; empty for an unknown type.
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Path(resource_type): Path<String>,
) -> Json<ResourceNamesReply> {
    Json(ResourceNamesReply {
        resource_names: state.tracer.resource_names(&resource_type),
    })
}

/// Static configuration of one resource.
pub async fn get_resource_config(
    State(state): State<Arc<AppState>>,
    Path((resource_type, name)): Path<(String, String)>,
) -> ApiResult<ResourceConfigReply> {
    let config = state
        .tracer
        .config(&resource_type, &name)
        .map_err(error_response)?;

    Ok(Json(ResourceConfigReply { config }))
}

/// Runtime trace of one resource.
pub async fn get_resource_trace(
    State(state): State<Arc<AppState>>,
    Path((resource_type, name)): Path<(String, String)>,
) -> ApiResult<ResourceTraceReply> {
    let trace = state
        .tracer
        .trace(&resource_type, &name)
        .map_err(error_response)?;

    Ok(Json(ResourceTraceReply { trace }))
}

/// Run a command and stream its output as NDJSON.
///
/// Lookup failures are returned before any body is sent. Once streaming,
/// the response always ends successfully; command errors arrive as
/// messages. A client that disconnects drops the body, which cancels the
/// execution.
pub async fn execute_resource(
    State(state): State<Arc<AppState>>,
    Path((resource_type, name)): Path<(String, String)>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let stream = state
        .tracer
        .execute(
            &resource_type,
            &name,
            &request.command,
            &request.args,
            state.shutdown.child_token(),
        )
        .map_err(error_response)?;

    info!(
        resource_type = %resource_type,
        name = %name,
        command = %request.command,
        "Streaming command execution"
    );

    let body = stream.map(|message| {
        let mut line = serde_json::to_vec(&ExecuteReply { message })?;
        line.push(b'\n');
        Ok::<_, serde_json::Error>(line)
    });

    Ok(([(header::CONTENT_TYPE, NDJSON)], Body::from_stream(body)).into_response())
}

/// Classified pod-to-resource mapping.
pub async fn get_resource_mapping(
    State(state): State<Arc<AppState>>,
) -> ApiResult<ResourceMappingReply> {
    debug!("Get resource mapping");
    let info = state
        .tracer
        .classified_resource_mapping()
        .await
        .map_err(error_response)?;

    Ok(Json(ResourceMappingReply { info }))
}

/// Liveness probe.
pub async fn liveness(State(state): State<Arc<AppState>>) -> Json<LivenessReply> {
    Json(LivenessReply {
        status: "ok".to_string(),
        uptime_seconds: state.uptime().as_secs(),
    })
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
