use anyhow::{bail, Result};
use common::resource_data::ResourceData;
use containerservice::ManagedClusterAgentPoolProfile;
use tracing::{debug, warn};

use crate::node_pool::NodePoolState;

/// Maps the profiles returned by the API back onto the `default_node_pool` block.
pub fn flatten_default_node_pool(
    input: Option<&[ManagedClusterAgentPoolProfile]>,
    d: &dyn ResourceData,
) -> Result<Vec<NodePoolState>> {
    let Some(input) = input else {
        return Ok(Vec::new());
    };

    let agent_pool = find_default_node_pool(input, d)?;
    Ok(vec![flatten_node_pool(agent_pool)])
}

pub fn flatten_node_pool(agent_pool: &ManagedClusterAgentPoolProfile) -> NodePoolState {
    NodePoolState {
        availability_zones: agent_pool.availability_zones.clone().unwrap_or_default(),
        count: agent_pool.count.unwrap_or_default(),
        enable_auto_scaling: agent_pool.enable_auto_scaling.unwrap_or_default(),
        enable_node_public_ip: agent_pool.enable_node_public_ip.unwrap_or_default(),
        max_count: agent_pool.max_count.unwrap_or_default(),
        max_pods: agent_pool.max_pods.unwrap_or_default(),
        min_count: agent_pool.min_count.unwrap_or_default(),
        name: agent_pool.name.clone().unwrap_or_default(),
        node_taints: agent_pool.node_taints.clone().unwrap_or_default(),
        os_disk_size_gb: agent_pool.os_disk_size_gb.unwrap_or_default(),
        os_type: agent_pool
            .os_type
            .as_ref()
            .map(|t| t.as_str().to_owned())
            .unwrap_or_default(),
        pool_type: agent_pool
            .type_field
            .as_ref()
            .map(|t| t.as_str().to_owned())
            .unwrap_or_default(),
        vm_size: agent_pool.vm_size.clone().unwrap_or_default(),
        vnet_subnet_id: agent_pool.vnet_subnet_id.clone().unwrap_or_default(),
    }
}

/// Picks the default pool out of the cluster's profiles.
///
/// The name recorded in state wins, when nothing is recorded yet (e.g. on
/// import) the first named profile in API order is used.
pub fn find_default_node_pool<'a>(
    input: &'a [ManagedClusterAgentPoolProfile],
    d: &dyn ResourceData,
) -> Result<&'a ManagedClusterAgentPoolProfile> {
    match d.get_str("default_node_pool.0.name").filter(|n| !n.is_empty()) {
        Some(name) => {
            let Some(agent_pool) = input.iter().find(|v| v.name.as_deref() == Some(name)) else {
                bail!("The Default Agent Pool {name:?} was not found");
            };
            debug!(pool = name, "found recorded default agent pool");
            Ok(agent_pool)
        }
        None => {
            let Some(agent_pool) = input.iter().find(|v| v.name.is_some()) else {
                bail!("Unable to Determine Default Agent Pool");
            };
            warn!(
                pool = agent_pool.name.as_deref().unwrap_or_default(),
                "no default agent pool recorded, using the first named profile"
            );
            Ok(agent_pool)
        }
    }
}

#[cfg(test)]
mod tests {
    use common::resource_data::StateData;
    use containerservice::{AgentPoolType, OsType};

    use super::*;
    use crate::{expand::expand_default_node_pool, node_pool::DefaultNodePool};

    fn named(name: Option<&str>, count: i32) -> ManagedClusterAgentPoolProfile {
        ManagedClusterAgentPoolProfile {
            name: name.map(str::to_owned),
            count: Some(count),
            ..Default::default()
        }
    }

    fn recorded(name: &str) -> StateData {
        StateData::from_yaml(&format!("default_node_pool: [{{name: {name:?}}}]"), false).unwrap()
    }

    #[test]
    fn nothing_returned() {
        let d = StateData::default();
        assert!(flatten_default_node_pool(None, &d).unwrap().is_empty());
    }

    #[test]
    fn recorded_name_is_preferred() {
        let pools = [named(Some("first"), 1), named(Some("pool1"), 2), named(Some("pool1"), 3)];
        let found = find_default_node_pool(&pools, &recorded("pool1")).unwrap();
        assert_eq!(found.count, Some(2));
    }

    #[test]
    fn recorded_name_missing() {
        let pools = [named(Some("first"), 1)];
        let err = find_default_node_pool(&pools, &recorded("pool1"))
            .unwrap_err()
            .to_string();
        assert_eq!(err, "The Default Agent Pool \"pool1\" was not found");
    }

    #[test]
    fn fallback_skips_unnamed_profiles() {
        let pools = [named(None, 1), named(Some("pool1"), 2), named(Some("pool2"), 3)];
        let d = StateData::default();
        let found = find_default_node_pool(&pools, &d).unwrap();
        assert_eq!(found.name.as_deref(), Some("pool1"));

        let empty_name = StateData::from_yaml("default_node_pool: [{name: ''}]", false).unwrap();
        let found = find_default_node_pool(&pools, &empty_name).unwrap();
        assert_eq!(found.name.as_deref(), Some("pool1"));
    }

    #[test]
    fn fallback_without_any_name() {
        let d = StateData::default();
        for pools in [vec![], vec![named(None, 1), named(None, 2)]] {
            let err = find_default_node_pool(&pools, &d).unwrap_err().to_string();
            assert_eq!(err, "Unable to Determine Default Agent Pool");
            assert!(flatten_default_node_pool(Some(pools.as_slice()), &d).is_err());
        }
    }

    #[test]
    fn unknown_enum_spellings_pass_through() {
        let cluster = containerservice::ManagedCluster::from_json(
            r#"{"properties":{"agentPoolProfiles":[{"name":"default","osType":"linux","type":"VirtualMachines"}]}}"#,
        )
        .unwrap();
        let state = flatten_default_node_pool(cluster.agent_pool_profiles(), &StateData::default())
            .unwrap();
        assert_eq!(state[0].os_type, "linux");
        assert_eq!(state[0].pool_type, "VirtualMachines");
    }

    #[test]
    fn nulls_flatten_to_zero_values() {
        let state = flatten_node_pool(&named(Some("default"), 1));
        assert_eq!(
            state,
            NodePoolState {
                name: "default".into(),
                count: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn expand_then_flatten_round_trips() {
        let d = StateData::from_yaml(
            r#"
default_node_pool:
  - name: default
    type: AvailabilitySet
    vm_size: Standard_DS2_v2
    availability_zones: ["1", "2"]
    count: 4
    enable_node_public_ip: true
    max_pods: 50
    node_taints: ["dedicated=infra:NoSchedule"]
    os_disk_size_gb: 100
    os_type: Windows
    vnet_subnet_id: /subscriptions/x/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/v/subnets/s
"#,
            true,
        )
        .unwrap();
        let declared = DefaultNodePool::from_value(&d.get_list("default_node_pool")[0]).unwrap();

        let profiles = expand_default_node_pool(&d).unwrap().unwrap();
        let state = flatten_default_node_pool(Some(profiles.as_slice()), &d).unwrap();

        assert_eq!(
            state,
            vec![NodePoolState {
                availability_zones: declared.availability_zones.clone(),
                count: declared.count,
                enable_auto_scaling: false,
                enable_node_public_ip: true,
                max_count: 0,
                max_pods: 50,
                min_count: 0,
                name: declared.name.clone(),
                node_taints: declared.node_taints.clone(),
                os_disk_size_gb: 100,
                os_type: OsType::Windows.as_str().into(),
                pool_type: AgentPoolType::AvailabilitySet.as_str().into(),
                vm_size: declared.vm_size.clone(),
                vnet_subnet_id: declared.vnet_subnet_id.clone().unwrap(),
            }]
        );
    }

    #[test]
    fn autoscaled_round_trip_keeps_bounds() {
        let d = StateData::from_yaml(
            r#"
default_node_pool:
  - {name: auto, vm_size: Standard_DS2_v2, enable_auto_scaling: true, count: 2, min_count: 1, max_count: 10}
"#,
            true,
        )
        .unwrap();
        let profiles = expand_default_node_pool(&d).unwrap().unwrap();
        let state = &flatten_default_node_pool(Some(profiles.as_slice()), &d).unwrap()[0];
        assert!(state.enable_auto_scaling);
        assert_eq!((state.count, state.min_count, state.max_count), (2, 1, 10));
    }
}
