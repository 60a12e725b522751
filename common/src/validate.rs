use regex::Regex;
use serde_yaml::Value;

lazy_static::lazy_static! {
    static ref AGENT_POOL_NAME: Regex = Regex::new(r"^[a-z][a-z0-9]{0,11}$").unwrap();
}

/// Field level checks run by [`crate::schema::Schema::validate_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    IntBetween(i64, i64),
    IntAtLeast(i64),
    StringInSlice(&'static [&'static str]),
    NoEmptyStrings,
    KubernetesAgentPoolName,
    ResourceId,
}

impl Validation {
    /// Returns a message for every problem found with `value`
    pub fn check(&self, key: &str, value: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        match self {
            Validation::IntBetween(min, max) => match value.as_i64() {
                Some(v) if v < *min || v > *max => errors.push(format!(
                    "expected {key} to be in the range ({min} - {max}), got {v}"
                )),
                Some(_) => {}
                None => errors.push(format!("expected type of {key} to be integer")),
            },
            Validation::IntAtLeast(min) => match value.as_i64() {
                Some(v) if v < *min => {
                    errors.push(format!("expected {key} to be at least ({min}), got {v}"))
                }
                Some(_) => {}
                None => errors.push(format!("expected type of {key} to be integer")),
            },
            Validation::StringInSlice(valid) => match value.as_str() {
                Some(v) if !valid.iter().any(|x| *x == v) => errors.push(format!(
                    "expected {key} to be one of {valid:?}, got {v}"
                )),
                Some(_) => {}
                None => errors.push(format!("expected type of {key} to be string")),
            },
            Validation::NoEmptyStrings => match value.as_str() {
                Some(v) if v.trim().is_empty() => {
                    errors.push(format!("{key:?} must not be empty"))
                }
                Some(_) => {}
                None => errors.push(format!("expected type of {key} to be string")),
            },
            Validation::KubernetesAgentPoolName => match value.as_str() {
                Some(v) if !AGENT_POOL_NAME.is_match(v) => errors.push(format!(
                    "{key} must start with a lowercase letter, have max length of 12, and only have characters a-z0-9, got {v:?}"
                )),
                Some(_) => {}
                None => errors.push(format!("expected type of {key} to be string")),
            },
            Validation::ResourceId => match value.as_str() {
                Some(v) => {
                    if let Err(e) = parse_resource_id(v) {
                        errors.push(format!("Can not parse {key:?} as a resource id: {e}"));
                    }
                }
                None => errors.push(format!("expected type of {key} to be string")),
            },
        }
        errors
    }
}

/// The parts of an ARM style id, e.g.
/// `/subscriptions/<sub>/resourceGroups/<rg>/providers/<ns>/<type>/<name>`
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceId {
    pub subscription_id: String,
    pub resource_group: String,
    pub provider: Option<String>,
    pub path: Vec<(String, String)>,
}

pub fn parse_resource_id(id: &str) -> Result<ResourceId, String> {
    let trimmed = id.trim_matches('/');
    if !id.starts_with('/') || trimmed.is_empty() {
        return Err(format!("{id:?} must start with `/`"));
    }

    let components: Vec<&str> = trimmed.split('/').collect();
    if components.len() % 2 != 0 {
        return Err("the number of path segments is not divisible by 2".into());
    }

    let mut subscription_id = None;
    let mut resource_group = None;
    let mut provider = None;
    let mut path = Vec::new();
    for pair in components.chunks(2) {
        let (key, value) = (pair[0], pair[1]);
        if key.is_empty() || value.is_empty() {
            return Err(format!("key/value cannot be empty strings, got {key:?}/{value:?}"));
        }
        match key {
            "subscriptions" if subscription_id.is_none() => subscription_id = Some(value),
            "resourceGroups" | "resourcegroups" if resource_group.is_none() => {
                resource_group = Some(value)
            }
            "providers" if provider.is_none() => provider = Some(value.to_owned()),
            _ => path.push((key.to_owned(), value.to_owned())),
        }
    }

    let Some(subscription_id) = subscription_id else {
        return Err("no subscription id found".into());
    };
    let Some(resource_group) = resource_group else {
        return Err("no resource group name found".into());
    };

    Ok(ResourceId {
        subscription_id: subscription_id.to_owned(),
        resource_group: resource_group.to_owned(),
        provider,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBNET: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/internal";

    #[test]
    fn int_between_is_inclusive() {
        let v = Validation::IntBetween(1, 100);
        assert!(v.check("count", &1.into()).is_empty());
        assert!(v.check("count", &100.into()).is_empty());
        assert_eq!(
            v.check("count", &0.into()),
            vec!["expected count to be in the range (1 - 100), got 0"]
        );
        assert_eq!(v.check("count", &"3".into()).len(), 1);
    }

    #[test]
    fn int_at_least() {
        let v = Validation::IntAtLeast(1);
        assert!(v.check("os_disk_size_gb", &30.into()).is_empty());
        assert_eq!(v.check("os_disk_size_gb", &0.into()).len(), 1);
    }

    #[test]
    fn string_in_slice_is_case_sensitive() {
        let v = Validation::StringInSlice(&["Linux", "Windows"]);
        assert!(v.check("os_type", &"Linux".into()).is_empty());
        assert_eq!(v.check("os_type", &"linux".into()).len(), 1);
    }

    #[test]
    fn blank_strings_are_rejected() {
        let v = Validation::NoEmptyStrings;
        assert!(v.check("vm_size", &"Standard_DS2_v2".into()).is_empty());
        assert_eq!(
            v.check("vm_size", &"  ".into()),
            vec!["\"vm_size\" must not be empty"]
        );
    }

    #[test]
    fn agent_pool_names() {
        let v = Validation::KubernetesAgentPoolName;
        for ok in ["default", "pool1", "a", "abcdefghijkl"] {
            assert!(v.check("name", &ok.into()).is_empty(), "{ok}");
        }
        for bad in ["1pool", "Pool", "pool-1", "abcdefghijklm", ""] {
            assert_eq!(v.check("name", &bad.into()).len(), 1, "{bad}");
        }
    }

    #[test]
    fn resource_ids() {
        let id = parse_resource_id(SUBNET).unwrap();
        assert_eq!(id.resource_group, "rg");
        assert_eq!(id.provider.as_deref(), Some("Microsoft.Network"));
        assert_eq!(
            id.path,
            vec![
                ("virtualNetworks".to_owned(), "vnet".to_owned()),
                ("subnets".to_owned(), "internal".to_owned())
            ]
        );

        let lower = parse_resource_id("/subscriptions/x/resourcegroups/rg2/providers/Microsoft.Network/virtualNetworks/vnet").unwrap();
        assert_eq!(lower.resource_group, "rg2");
        assert_eq!(lower.path, vec![("virtualNetworks".to_owned(), "vnet".to_owned())]);

        assert!(parse_resource_id("subscriptions/x/resourceGroups/rg").is_err());
        assert!(parse_resource_id("/subscriptions/x/resourceGroups").is_err());
        assert!(parse_resource_id("/resourceGroups/rg/foo/bar").is_err());
        assert_eq!(Validation::ResourceId.check("vnet_subnet_id", &"nope".into()).len(), 1);
    }
}
