//! HTTP client for a running tracebus endpoint.

use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use tracebus_api::{
    ErrorResponse, ExecuteReply, ExecuteRequest, ResourceConfigReply, ResourceMappingReply,
    ResourceNamesReply, ResourceTraceReply, ResourceTypesReply,
};
use tracebus_core::MappingRecord;
use tracebus_protocols::MapKeyValueEntry;

#[derive(Debug, Error)]
pub(crate) enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (status {status}, {code})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Invalid reply: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint {endpoint}: {message}")]
    Endpoint { endpoint: String, message: String },
}

/// Stream of execution messages.
pub(crate) type MessageStream = Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>;

/// Client for the `/v1` endpoints.
pub(crate) struct TraceClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl TraceClient {
    pub(crate) fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Build `<endpoint>/v1/<segments..>`, percent-encoding each segment so
    /// resource names may contain `/`, `?`, `#` or spaces.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = |message: String| ClientError::Endpoint {
            endpoint: self.endpoint.clone(),
            message,
        };

        let mut url = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(segments)?)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn resource_types(&self) -> Result<Vec<String>, ClientError> {
        let reply: ResourceTypesReply = self.get_json(&["resource-types"]).await?;
        Ok(reply.type_names)
    }

    pub(crate) async fn resources(&self, resource_type: &str) -> Result<Vec<String>, ClientError> {
        let reply: ResourceNamesReply = self
            .get_json(&["resource-types", resource_type])
            .await?;
        Ok(reply.resource_names)
    }

    pub(crate) async fn config(
        &self,
        resource_type: &str,
        name: &str,
    ) -> Result<Vec<MapKeyValueEntry>, ClientError> {
        let reply: ResourceConfigReply = self
            .get_json(&["resources", resource_type, name, "config"])
            .await?;
        Ok(reply.config)
    }

    pub(crate) async fn trace(
        &self,
        resource_type: &str,
        name: &str,
    ) -> Result<Vec<MapKeyValueEntry>, ClientError> {
        let reply: ResourceTraceReply = self
            .get_json(&["resources", resource_type, name, "trace"])
            .await?;
        Ok(reply.trace)
    }

    pub(crate) async fn resource_mapping(&self) -> Result<Vec<MappingRecord>, ClientError> {
        let reply: ResourceMappingReply = self.get_json(&["resource-mapping"]).await?;
        Ok(reply.info)
    }

    /// Start a command and stream its messages.
    ///
    /// No timeout applies once the stream is open; it ends when the
    /// command finishes on the server.
    pub(crate) async fn execute(
        &self,
        resource_type: &str,
        name: &str,
        command: &str,
        args: &[String],
    ) -> Result<MessageStream, ClientError> {
        let request = ExecuteRequest {
            command: command.to_string(),
            args: args.to_vec(),
        };
        let response = self
            .http
            .post(self.url(&["resources", resource_type, name, "execute"])?)
            .json(&request)
            .send()
            .await?;
        let response = check_status(response).await?;

        let stream = async_stream::stream! {
            let mut bytes_stream = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk) = bytes_stream.next().await {
                match chunk {
                    Ok(bytes) => {
                        buffer.extend_from_slice(&bytes);

                        while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                            let line: Vec<u8> = buffer.drain(..=pos).collect();
                            yield decode_line(&line[..pos]);
                        }
                    }
                    Err(e) => {
                        yield Err(ClientError::Http(e));
                        return;
                    }
                }
            }

            if !buffer.is_empty() {
                yield decode_line(&buffer);
            }
        };

        Ok(Box::pin(stream))
    }
}

fn decode_line(line: &[u8]) -> Result<String, ClientError> {
    let reply: ExecuteReply = serde_json::from_slice(line)?;
    Ok(reply.message)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let (code, message) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(e) => (e.code, e.error),
        Err(_) if body.trim().is_empty() => (
            "unknown".to_string(),
            status.canonical_reason().unwrap_or("no reason").to_string(),
        ),
        Err(_) => ("unknown".to_string(), body),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
