//! The `(type, name)` keyed trace handler registry.
//!
//! All table reads and writes go through a single mutex. Critical sections
//! are plain map operations; handler code always runs after the lock is
//! released, so a slow handler cannot stall registration or lookups.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use tracebus_protocols::error::TracingError;
use tracebus_protocols::{MapKeyValueEntry, ResourceMappingHandler, TraceHandler};

/// Handlers of one resource type, keyed by resource name.
type ResourceMap = HashMap<String, Arc<dyn TraceHandler>>;

/// Registry of traceable resources.
///
/// Construct one with [`Tracer::new`] and share it by `Arc` with every
/// registrar and adapter. At most one handler is registered per
/// `(type, name)` at any instant.
pub struct Tracer {
    handlers: Mutex<HashMap<String, ResourceMap>>,
    pub(crate) resource_mapping: RwLock<Option<Arc<dyn ResourceMappingHandler>>>,
}

impl Tracer {
    /// Create an empty tracer.
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(HashMap::new()),
            resource_mapping: RwLock::new(None),
        }
    }

    /// Register a handler under `(resource_type, name)`.
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::AlreadyRegistered`] if the key is taken; the
    /// existing handler stays registered.
    pub fn register(
        &self,
        resource_type: &str,
        name: &str,
        handler: Arc<dyn TraceHandler>,
    ) -> Result<(), TracingError> {
        {
            let mut handlers = self.handlers.lock();
            let resources = handlers.entry(resource_type.to_string()).or_default();

            if resources.contains_key(name) {
                return Err(TracingError::AlreadyRegistered {
                    resource_type: resource_type.to_string(),
                    name: name.to_string(),
                });
            }

            resources.insert(name.to_string(), handler);
        }

        info!(resource_type, name, "Registered trace handler");
        Ok(())
    }

    /// Remove the handler under `(resource_type, name)`. Does nothing if absent.
    pub fn unregister(&self, resource_type: &str, name: &str) {
        let removed = {
            let mut handlers = self.handlers.lock();
            let Some(resources) = handlers.get_mut(resource_type) else {
                return;
            };

            let removed = resources.remove(name).is_some();
            if resources.is_empty() {
                handlers.remove(resource_type);
            }
            removed
        };

        if removed {
            info!(resource_type, name, "Unregistered trace handler");
        }
    }

    /// Registered resource types, in no particular order.
    pub fn types(&self) -> Vec<String> {
        self.handlers.lock().keys().cloned().collect()
    }

    /// Resource names registered under `resource_type`, in no particular order.
    ///
    /// An unknown type yields an empty list.
    pub fn resource_names(&self, resource_type: &str) -> Vec<String> {
        self.handlers
            .lock()
            .get(resource_type)
            .map(|resources| resources.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Check if a handler is registered under `(resource_type, name)`.
    pub fn contains(&self, resource_type: &str, name: &str) -> bool {
        self.handlers
            .lock()
            .get(resource_type)
            .is_some_and(|resources| resources.contains_key(name))
    }

    /// Total number of registered handlers across all types.
    pub fn len(&self) -> usize {
        self.handlers.lock().values().map(HashMap::len).sum()
    }

    /// Check if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a handler, cloning it out of the table.
    pub(crate) fn handler(
        &self,
        resource_type: &str,
        name: &str,
    ) -> Result<Arc<dyn TraceHandler>, TracingError> {
        let handlers = self.handlers.lock();

        let resources = handlers
            .get(resource_type)
            .ok_or_else(|| TracingError::TypeNotFound(resource_type.to_string()))?;

        resources
            .get(name)
            .cloned()
            .ok_or_else(|| TracingError::ResourceNotFound {
                resource_type: resource_type.to_string(),
                name: name.to_string(),
            })
    }

    /// Static configuration of a registered resource.
    pub fn config(
        &self,
        resource_type: &str,
        name: &str,
    ) -> Result<Vec<MapKeyValueEntry>, TracingError> {
        let handler = self.handler(resource_type, name)?;
        debug!(resource_type, name, "Reading resource config");
        Ok(handler.config())
    }

    /// Runtime trace of a registered resource.
    pub fn trace(
        &self,
        resource_type: &str,
        name: &str,
    ) -> Result<Vec<MapKeyValueEntry>, TracingError> {
        let handler = self.handler(resource_type, name)?;
        debug!(resource_type, name, "Reading resource trace");
        Ok(handler.trace())
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tracer_tests.rs"]
mod tests;
