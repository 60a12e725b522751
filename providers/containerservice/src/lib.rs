//! Request and response shapes of the managed cluster API (2019-06-01).

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Pool type as the API spells it. Values this crate does not know are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentPoolType {
    AvailabilitySet,
    VirtualMachineScaleSets,
    Other(String),
}

impl AgentPoolType {
    pub const VALUES: &'static [&'static str] = &["AvailabilitySet", "VirtualMachineScaleSets"];

    pub fn as_str(&self) -> &str {
        match self {
            AgentPoolType::AvailabilitySet => "AvailabilitySet",
            AgentPoolType::VirtualMachineScaleSets => "VirtualMachineScaleSets",
            AgentPoolType::Other(s) => s,
        }
    }
}

impl Default for AgentPoolType {
    fn default() -> Self {
        AgentPoolType::VirtualMachineScaleSets
    }
}

impl From<String> for AgentPoolType {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(AgentPoolType::Other(s))
    }
}

impl From<AgentPoolType> for String {
    fn from(t: AgentPoolType) -> Self {
        match t {
            AgentPoolType::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

/// Only the known spellings parse.
impl FromStr for AgentPoolType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AvailabilitySet" => Ok(AgentPoolType::AvailabilitySet),
            "VirtualMachineScaleSets" => Ok(AgentPoolType::VirtualMachineScaleSets),
            _ => bail!("unknown agent pool type {s:?}"),
        }
    }
}

impl fmt::Display for AgentPoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OsType {
    Linux,
    Windows,
    Other(String),
}

impl OsType {
    pub const VALUES: &'static [&'static str] = &["Linux", "Windows"];

    pub fn as_str(&self) -> &str {
        match self {
            OsType::Linux => "Linux",
            OsType::Windows => "Windows",
            OsType::Other(s) => s,
        }
    }
}

impl Default for OsType {
    fn default() -> Self {
        OsType::Linux
    }
}

impl From<String> for OsType {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(OsType::Other(s))
    }
}

impl From<OsType> for String {
    fn from(t: OsType) -> Self {
        match t {
            OsType::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl FromStr for OsType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Linux" => Ok(OsType::Linux),
            "Windows" => Ok(OsType::Windows),
            _ => bail!("unknown os type {s:?}"),
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every field is optional, an absent field is left to the server.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterAgentPoolProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    #[serde(rename = "vmSize", skip_serializing_if = "Option::is_none")]
    pub vm_size: Option<String>,
    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "Option::is_none")]
    pub os_disk_size_gb: Option<i32>,
    #[serde(rename = "vnetSubnetID", skip_serializing_if = "Option::is_none")]
    pub vnet_subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pods: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<OsType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_auto_scaling: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_field: Option<AgentPoolType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestrator_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zones: Option<Vec<String>>,
    #[serde(rename = "enableNodePublicIP", skip_serializing_if = "Option::is_none")]
    pub enable_node_public_ip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_taints: Option<Vec<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,
    #[serde(rename = "dnsPrefix", skip_serializing_if = "Option::is_none")]
    pub dns_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_pool_profiles: Option<Vec<ManagedClusterAgentPoolProfile>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedCluster {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ManagedClusterProperties>,
}

impl ManagedCluster {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn agent_pool_profiles(&self) -> Option<&[ManagedClusterAgentPoolProfile]> {
        self.properties
            .as_ref()
            .and_then(|p| p.agent_pool_profiles.as_deref())
    }
}
