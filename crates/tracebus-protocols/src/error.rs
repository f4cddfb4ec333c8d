//! Registry and provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("resource name {name} with type {resource_type} has been registered")]
    AlreadyRegistered { resource_type: String, name: String },

    #[error("tracer type {0} not found")]
    TypeNotFound(String),

    #[error("tracer name {name} of type {resource_type} not found")]
    ResourceNotFound { resource_type: String, name: String },

    #[error("no resource mapping handler registered")]
    NoMappingHandler,

    /// Failure reported by a handler's underlying data source.
    #[error("{0}")]
    Provider(String),
}

impl TracingError {
    /// Build a provider failure from anything displayable.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Both not-found variants mean "resource unavailable" to callers.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TypeNotFound(_) | Self::ResourceNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_registered_error() {
        let err = TracingError::AlreadyRegistered {
            resource_type: "resource_pool".to_string(),
            name: "eni-pool".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("has been registered"));
        assert!(display.contains("resource_pool"));
        assert!(display.contains("eni-pool"));
    }

    #[test]
    fn test_not_found_errors_are_distinguished() {
        let by_type = TracingError::TypeNotFound("factory".to_string());
        let by_name = TracingError::ResourceNotFound {
            resource_type: "factory".to_string(),
            name: "eni".to_string(),
        };

        assert_eq!(by_type.to_string(), "tracer type factory not found");
        assert_eq!(by_name.to_string(), "tracer name eni of type factory not found");
        assert!(by_type.is_not_found());
        assert!(by_name.is_not_found());
    }

    #[test]
    fn test_no_mapping_handler_is_not_not_found() {
        let err = TracingError::NoMappingHandler;
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("no resource mapping handler"));
    }

    #[test]
    fn test_provider_error_is_verbatim() {
        let err = TracingError::provider("openapi: throttled");
        assert_eq!(err.to_string(), "openapi: throttled");
    }

    #[test]
    fn test_error_debug() {
        let err = TracingError::TypeNotFound("test".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("TypeNotFound"));
    }
}
