//! Capability traits implemented by traceable resources.

use async_trait::async_trait;

use crate::error::TracingError;
use crate::sink::MessageSink;
use crate::types::{MapKeyValueEntry, PodResourceMapping};

/// Core trait for anything that registers itself with the tracer.
///
/// Implementors are registered by `Arc<dyn TraceHandler>` under a
/// `(type, name)` key. The registry never holds its lock while calling into
/// a handler.
#[async_trait]
pub trait TraceHandler: Send + Sync {
    /// Static resource configuration (pool limits, ipam mode, ...).
    fn config(&self) -> Vec<MapKeyValueEntry>;

    /// Live runtime state (interface counts, MAC addresses, ...).
    fn trace(&self) -> Vec<MapKeyValueEntry>;

    /// Run a diagnostic command, streaming text output into `sink`.
    ///
    /// Returning drops the sink, which ends the stream. There is no error
    /// return: failures must be reported as messages.
    async fn execute(&self, command: &str, args: &[String], sink: MessageSink);
}

/// Source of the pod-to-resource mapping.
#[async_trait]
pub trait ResourceMappingHandler: Send + Sync {
    /// Current set of pod-to-resource associations known to the agent.
    async fn get_resource_mapping(&self) -> Result<Vec<PodResourceMapping>, TracingError>;
}
