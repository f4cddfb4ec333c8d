//! Pod-to-resource mapping records.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::network::{Eni, EniIp};

/// Ground truth for a resource as obtained from the upstream cloud provider.
///
/// An empty `res_id` means the provider has no record of the resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryResourceMapping {
    /// `mac` or `mac:ip`.
    pub res_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eni: Option<Eni>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eni_ip: Option<EniIp>,
}

/// The agent-local view of a resource held in its pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMapping {
    /// Whether the pool currently tracks this as a real resource.
    pub valid: bool,
    pub res_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eni: Option<Eni>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
    #[serde(default)]
    pub factory_resource: FactoryResourceMapping,
}

/// One pod's claim on one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodResourceMapping {
    /// Whether the mapping is considered correct from the pod's side.
    pub valid: bool,
    pub pod_name: String,
    #[serde(default)]
    pub resource: ResourceMapping,
}

/// Health category of a [`PodResourceMapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    /// Pod claim and pool bookkeeping agree.
    Normal,
    /// Present in the pool and at the provider, but unclaimed.
    Idle,
    /// Missing from the pool or unknown to the provider.
    Error,
}

impl std::fmt::Display for MappingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Normal => "normal",
            Self::Idle => "idle",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}
