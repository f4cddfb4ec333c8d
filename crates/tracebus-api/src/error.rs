//! Error replies.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use tracebus_protocols::TracingError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Status code and error code for a registry error.
pub fn status_for(err: &TracingError) -> (StatusCode, &'static str) {
    match err {
        TracingError::AlreadyRegistered { .. } => (StatusCode::CONFLICT, "already_registered"),
        TracingError::TypeNotFound(_) => (StatusCode::NOT_FOUND, "type_not_found"),
        TracingError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, "resource_not_found"),
        TracingError::NoMappingHandler => (StatusCode::SERVICE_UNAVAILABLE, "no_mapping_handler"),
        TracingError::Provider(_) => (StatusCode::BAD_GATEWAY, "provider_error"),
    }
}

/// Forward a registry error to the caller unchanged.
pub fn error_response(err: TracingError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = status_for(&err);
    (status, Json(ErrorResponse::new(err.to_string(), code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, Json(body)) = error_response(TracingError::TypeNotFound("factory".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "type_not_found");
        assert_eq!(body.error, "tracer type factory not found");
    }

    #[test]
    fn test_status_for_all_variants() {
        let cases = vec![
            (
                TracingError::AlreadyRegistered {
                    resource_type: "a".into(),
                    name: "b".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                TracingError::ResourceNotFound {
                    resource_type: "a".into(),
                    name: "b".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (TracingError::NoMappingHandler, StatusCode::SERVICE_UNAVAILABLE),
            (TracingError::provider("down"), StatusCode::BAD_GATEWAY),
        ];

        for (err, expected) in cases {
            assert_eq!(status_for(&err).0, expected);
        }
    }

    #[test]
    fn test_provider_message_is_forwarded() {
        let (_, Json(body)) = error_response(TracingError::provider("storage unavailable"));
        assert_eq!(body.error, "storage unavailable");
        assert_eq!(body.code, "provider_error");
    }
}
