use anyhow::Result;
use containerservice::{AgentPoolType, OsType};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::schema::schema_default_node_pool;

/// The `default_node_pool` block as declared by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultNodePool {
    pub name: String,
    #[serde(rename = "type", default)]
    pub pool_type: AgentPoolType,
    pub vm_size: String,
    #[serde(default)]
    pub availability_zones: Vec<String>,
    #[serde(default = "default_count")]
    pub count: i32,
    #[serde(default)]
    pub enable_auto_scaling: bool,
    #[serde(default)]
    pub enable_node_public_ip: bool,
    pub max_count: Option<i32>,
    pub max_pods: Option<i32>,
    pub min_count: Option<i32>,
    #[serde(default)]
    pub node_taints: Vec<String>,
    pub os_disk_size_gb: Option<i32>,
    #[serde(default)]
    pub os_type: OsType,
    pub vnet_subnet_id: Option<String>,
}

fn default_count() -> i32 {
    1
}

impl DefaultNodePool {
    pub fn new(name: impl Into<String>, vm_size: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pool_type: AgentPoolType::default(),
            vm_size: vm_size.into(),
            availability_zones: Vec::new(),
            count: default_count(),
            enable_auto_scaling: false,
            enable_node_public_ip: false,
            max_count: None,
            max_pods: None,
            min_count: None,
            node_taints: Vec::new(),
            os_disk_size_gb: None,
            os_type: OsType::default(),
            vnet_subnet_id: None,
        }
    }

    /// Reads one raw block, explicit nulls count as unset.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let mut block = raw.clone();
        if let Some(map) = block.as_mapping_mut() {
            let nulls: Vec<Value> = map
                .iter()
                .filter(|(_, v)| v.is_null())
                .map(|(k, _)| k.clone())
                .collect();
            for k in nulls {
                map.remove(&k);
            }
        }
        schema_default_node_pool().apply_defaults(&mut block);
        Ok(serde_yaml::from_value(block)?)
    }
}

/// The `default_node_pool` block as recorded in state after a read. Fields
/// the API left out hold their zero value.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePoolState {
    pub availability_zones: Vec<String>,
    pub count: i32,
    pub enable_auto_scaling: bool,
    pub enable_node_public_ip: bool,
    pub max_count: i32,
    pub max_pods: i32,
    pub min_count: i32,
    pub name: String,
    pub node_taints: Vec<String>,
    pub os_disk_size_gb: i32,
    pub os_type: String,
    #[serde(rename = "type")]
    pub pool_type: String,
    pub vm_size: String,
    pub vnet_subnet_id: String,
}
