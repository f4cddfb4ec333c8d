//! Network interface records as reported by the cloud provider.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// An elastic network interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eni {
    pub id: String,
    pub mac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<IpAddr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<IpAddr>,
    #[serde(default)]
    pub vswitch: String,
    #[serde(default)]
    pub trunk: bool,
}

/// A secondary IP address attached to an ENI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EniIp {
    pub eni: Eni,
    pub secondary_ip: IpAddr,
}
