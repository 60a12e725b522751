use common::{
    schema::{DiffSuppress, Schema},
    validate::Validation,
};
use containerservice::{AgentPoolType, OsType};

pub const DEFAULT_NODE_POOL: &str = "default_node_pool";

pub fn schema_default_node_pool() -> Schema {
    Schema::block([
        // Required
        (
            "name",
            Schema::string()
                .required()
                .force_new()
                .validate(Validation::KubernetesAgentPoolName),
        ),
        (
            "type",
            Schema::string()
                .force_new()
                .default_value(AgentPoolType::VirtualMachineScaleSets.as_str())
                .validate(Validation::StringInSlice(AgentPoolType::VALUES)),
        ),
        (
            "vm_size",
            Schema::string()
                .required()
                .force_new()
                .diff_suppress(DiffSuppress::CaseDifference)
                .validate(Validation::NoEmptyStrings),
        ),
        // Optional
        ("availability_zones", Schema::list(Schema::string())),
        (
            "count",
            Schema::int()
                .default_value(1)
                .validate(Validation::IntBetween(1, 100)),
        ),
        ("enable_auto_scaling", Schema::bool()),
        ("enable_node_public_ip", Schema::bool()),
        (
            "max_count",
            Schema::int().validate(Validation::IntBetween(1, 100)),
        ),
        ("max_pods", Schema::int().computed().force_new()),
        (
            "min_count",
            Schema::int().validate(Validation::IntBetween(1, 100)),
        ),
        ("node_taints", Schema::list(Schema::string())),
        (
            "os_disk_size_gb",
            Schema::int()
                .force_new()
                .computed()
                .validate(Validation::IntAtLeast(1)),
        ),
        (
            "os_type",
            Schema::string()
                .force_new()
                .default_value(OsType::Linux.as_str())
                .validate(Validation::StringInSlice(OsType::VALUES)),
        ),
        (
            "vnet_subnet_id",
            Schema::string()
                .force_new()
                .validate(Validation::ResourceId),
        ),
    ])
    .max_items(1)
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value;

    use super::*;

    fn block(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn declares_every_field() {
        let schema = schema_default_node_pool();
        let fields = schema.fields().unwrap();
        assert_eq!(fields.len(), 14);
        assert!(fields["name"].required && fields["name"].force_new);
        assert!(fields["vm_size"].required);
        assert!(fields["max_pods"].computed && fields["os_disk_size_gb"].computed);
        assert!(!fields["count"].force_new);
        assert_eq!(fields["count"].default, Some(Value::from(1)));
        assert_eq!(fields["os_type"].default, Some(Value::from("Linux")));
        assert_eq!(schema.max_items, Some(1));
    }

    #[test]
    fn accepts_a_typical_block() {
        schema_default_node_pool()
            .validate_value(
                DEFAULT_NODE_POOL,
                &block(
                    r#"
- name: default
  vm_size: Standard_DS2_v2
  count: 3
  availability_zones: ["1", "2"]
  vnet_subnet_id: /subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/internal
"#,
                ),
            )
            .unwrap();
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = schema_default_node_pool()
            .validate_value(
                DEFAULT_NODE_POOL,
                &block(
                    r#"
- name: Default
  vm_size: ""
  count: 101
  max_count: 0
  os_type: linux
  type: Spot
  os_disk_size_gb: 0
  vnet_subnet_id: subnet
"#,
                ),
            )
            .unwrap_err()
            .to_string();
        for expected in [
            "default_node_pool.0.name must start with a lowercase letter",
            "\"default_node_pool.0.vm_size\" must not be empty",
            "expected default_node_pool.0.count to be in the range (1 - 100), got 101",
            "expected default_node_pool.0.max_count to be in the range (1 - 100), got 0",
            "expected default_node_pool.0.os_type to be one of",
            "expected default_node_pool.0.type to be one of",
            "expected default_node_pool.0.os_disk_size_gb to be at least (1), got 0",
            "Can not parse \"default_node_pool.0.vnet_subnet_id\" as a resource id",
        ] {
            assert!(err.contains(expected), "missing {expected:?} in {err}");
        }
    }
}
