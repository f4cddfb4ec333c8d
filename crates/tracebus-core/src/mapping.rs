//! Pod-to-resource mapping classifier.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tracebus_protocols::error::TracingError;
use tracebus_protocols::{MappingType, PodResourceMapping, ResourceMappingHandler};

use crate::tracer::Tracer;

/// Classify one mapping record.
///
/// Precedence matters: a pod-valid record is always `Normal`; otherwise a
/// record the pool does not track, or the provider does not know, is
/// `Error` even if the other side looks fine; everything else is `Idle`.
pub fn classify(mapping: &PodResourceMapping) -> MappingType {
    if mapping.valid {
        return MappingType::Normal;
    }

    let resource = &mapping.resource;
    if !resource.valid || resource.factory_resource.res_id.is_empty() {
        MappingType::Error
    } else {
        MappingType::Idle
    }
}

/// A classified mapping record, as reported to debugging clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    #[serde(rename = "type")]
    pub mapping_type: MappingType,
    pub pod_name: String,
    pub resource_name: String,
    pub factory_resource_name: String,
}

impl From<&PodResourceMapping> for MappingRecord {
    fn from(mapping: &PodResourceMapping) -> Self {
        Self {
            mapping_type: classify(mapping),
            pod_name: mapping.pod_name.clone(),
            resource_name: mapping.resource.res_id.clone(),
            factory_resource_name: mapping.resource.factory_resource.res_id.clone(),
        }
    }
}

impl Tracer {
    /// Install the mapping handler, replacing any previous one.
    pub fn register_resource_mapping(&self, handler: Arc<dyn ResourceMappingHandler>) {
        *self.resource_mapping.write() = Some(handler);
        info!("Registered resource mapping handler");
    }

    /// Remove the mapping handler, if any.
    pub fn unregister_resource_mapping(&self) {
        if self.resource_mapping.write().take().is_some() {
            info!("Unregistered resource mapping handler");
        }
    }

    /// Check if a mapping handler is installed.
    pub fn has_resource_mapping(&self) -> bool {
        self.resource_mapping.read().is_some()
    }

    /// Current pod-to-resource mapping from the installed handler.
    ///
    /// # Errors
    ///
    /// [`TracingError::NoMappingHandler`] if nothing is installed; otherwise
    /// whatever the handler returns, unchanged.
    pub async fn resource_mapping(&self) -> Result<Vec<PodResourceMapping>, TracingError> {
        let handler = self
            .resource_mapping
            .read()
            .clone()
            .ok_or(TracingError::NoMappingHandler)?;

        debug!("Fetching resource mapping");
        handler.get_resource_mapping().await
    }

    /// Current mapping, classified.
    pub async fn classified_resource_mapping(&self) -> Result<Vec<MappingRecord>, TracingError> {
        let mapping = self.resource_mapping().await?;
        Ok(mapping.iter().map(MappingRecord::from).collect())
    }
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
