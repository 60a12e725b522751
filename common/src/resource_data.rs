use anyhow::{bail, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Read/write access to a resource's configuration or recorded state.
pub trait ResourceData {
    /// Value at a dotted path such as `default_node_pool.0.name`
    fn get(&self, path: &str) -> Option<&Value>;
    /// Replace a top level key
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    /// True while the resource is being created
    fn is_new_resource(&self) -> bool;

    fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    fn get_list(&self, path: &str) -> &[Value] {
        match self.get(path) {
            Some(Value::Sequence(s)) => s.as_slice(),
            _ => &[],
        }
    }
}

/// Walks `path` through mappings and sequences, numeric segments index sequences.
pub fn traverse_yaml<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|s| !s.is_empty())
        .try_fold(value, |v, segment| match v {
            Value::Mapping(m) => m.get(segment),
            Value::Sequence(s) => segment.parse::<usize>().ok().and_then(|i| s.get(i)),
            _ => None,
        })
}

pub fn traverse_yaml_mut<'a>(value: &'a mut Value, path: &str) -> Result<Option<&'a mut Value>> {
    let mut current = value;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Mapping(m) => match m.get_mut(segment) {
                Some(v) => v,
                None => return Ok(None),
            },
            Value::Sequence(s) => {
                let idx: usize = segment.parse()?;
                match s.get_mut(idx) {
                    Some(v) => v,
                    None => return Ok(None),
                }
            }
            other => bail!("cannot traverse into {other:?} at `{segment}` of `{path}`"),
        };
    }
    Ok(Some(current))
}

/// A resource document held in memory, as read from a yaml file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateData {
    values: Value,
    new_resource: bool,
}

impl StateData {
    pub fn new(values: Value, new_resource: bool) -> Self {
        let values = match values {
            Value::Null => Value::Mapping(Mapping::new()),
            v => v,
        };
        Self {
            values,
            new_resource,
        }
    }

    pub fn from_yaml(s: &str, new_resource: bool) -> Result<Self> {
        Ok(Self::new(serde_yaml::from_str(s)?, new_resource))
    }

    pub fn set_serialized<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.set(key, serde_yaml::to_value(value)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.values)?)
    }
}

impl ResourceData for StateData {
    fn get(&self, path: &str) -> Option<&Value> {
        traverse_yaml(&self.values, path)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        if self.values.is_null() {
            self.values = Value::Mapping(Mapping::new());
        }
        match &mut self.values {
            Value::Mapping(m) => {
                m.insert(key.into(), value);
                Ok(())
            }
            other => bail!("resource data must be a mapping to set `{key}`, got {other:?}"),
        }
    }

    fn is_new_resource(&self) -> bool {
        self.new_resource
    }
}
