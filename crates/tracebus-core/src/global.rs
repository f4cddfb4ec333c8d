//! Process-lifetime default tracer.
//!
//! A thin convenience for subsystems that have no tracer handle threaded to
//! them. Everything here delegates to one lazily created [`Tracer`].

use std::sync::Arc;

use once_cell::sync::Lazy;

use tracebus_protocols::error::TracingError;
use tracebus_protocols::{ResourceMappingHandler, TraceHandler};

use crate::tracer::Tracer;

static DEFAULT_TRACER: Lazy<Arc<Tracer>> = Lazy::new(|| Arc::new(Tracer::new()));

/// Shared handle to the default tracer.
pub fn default_tracer() -> Arc<Tracer> {
    DEFAULT_TRACER.clone()
}

/// Register a handler with the default tracer.
pub fn register(
    resource_type: &str,
    name: &str,
    handler: Arc<dyn TraceHandler>,
) -> Result<(), TracingError> {
    DEFAULT_TRACER.register(resource_type, name, handler)
}

/// Remove a handler from the default tracer. Does nothing if absent.
pub fn unregister(resource_type: &str, name: &str) {
    DEFAULT_TRACER.unregister(resource_type, name)
}

/// Install the mapping handler on the default tracer.
pub fn register_resource_mapping(handler: Arc<dyn ResourceMappingHandler>) {
    DEFAULT_TRACER.register_resource_mapping(handler)
}
