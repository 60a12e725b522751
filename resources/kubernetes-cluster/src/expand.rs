use anyhow::{bail, Result};
use common::resource_data::ResourceData;
use containerservice::ManagedClusterAgentPoolProfile;
use tracing::debug;

use crate::{node_pool::DefaultNodePool, schema::DEFAULT_NODE_POOL};

/// Builds the request profiles for the declared `default_node_pool` block.
///
/// Returns `None` when no block is declared, this keeps clusters that
/// still use the legacy agent pool profiles working.
pub fn expand_default_node_pool(
    d: &dyn ResourceData,
) -> Result<Option<Vec<ManagedClusterAgentPoolProfile>>> {
    let input = d.get_list(DEFAULT_NODE_POOL);
    let raw = match input.first() {
        None => return Ok(None),
        Some(raw) if raw.is_null() || raw.as_mapping().is_some_and(|m| m.is_empty()) => {
            return Ok(None)
        }
        Some(raw) => raw,
    };

    let pool = DefaultNodePool::from_value(raw)?;
    let profile = expand_node_pool(&pool, d.is_new_resource())?;
    Ok(Some(vec![profile]))
}

pub fn expand_node_pool(
    pool: &DefaultNodePool,
    new_resource: bool,
) -> Result<ManagedClusterAgentPoolProfile> {
    let mut profile = ManagedClusterAgentPoolProfile {
        enable_auto_scaling: Some(pool.enable_auto_scaling),
        enable_node_public_ip: Some(pool.enable_node_public_ip),
        name: Some(pool.name.clone()),
        os_type: Some(pool.os_type.clone()),
        type_field: Some(pool.pool_type.clone()),
        vm_size: Some(pool.vm_size.clone()),
        availability_zones: non_empty(&pool.availability_zones),
        max_pods: positive(pool.max_pods),
        node_taints: non_empty(&pool.node_taints),
        os_disk_size_gb: positive(pool.os_disk_size_gb),
        vnet_subnet_id: pool.vnet_subnet_id.clone().filter(|id| !id.is_empty()),
        ..Default::default()
    };

    let max_count = positive(pool.max_count);
    let min_count = positive(pool.min_count);

    // count seeds an autoscaled pool on create, afterwards the autoscaler owns it
    let auto_scaled_cluster = pool.enable_auto_scaling && new_resource;
    let manually_scaled_cluster = !pool.enable_auto_scaling;
    if auto_scaled_cluster || manually_scaled_cluster {
        profile.count = Some(pool.count);
    } else {
        debug!(pool = %pool.name, "leaving count to the autoscaler");
    }

    if pool.enable_auto_scaling {
        let Some(max) = max_count else {
            bail!("`max_count` must be configured when `enable_auto_scaling` is set to `true`");
        };
        let Some(min) = min_count else {
            bail!("`min_count` must be configured when `enable_auto_scaling` is set to `true`");
        };
        if min > max {
            bail!("`max_count` must be >= `min_count`");
        }
        profile.max_count = Some(max);
        profile.min_count = Some(min);
    } else if min_count.is_some() || max_count.is_some() {
        bail!("`max_count` and `min_count` must be set to `0` when enable_auto_scaling is set to `false`");
    }

    debug!(pool = %pool.name, count = ?profile.count, "expanded default node pool");
    Ok(profile)
}

fn positive(v: Option<i32>) -> Option<i32> {
    v.filter(|v| *v > 0)
}

fn non_empty(v: &[String]) -> Option<Vec<String>> {
    if v.is_empty() {
        return None;
    }
    Some(v.to_vec())
}
