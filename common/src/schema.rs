use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::validate::Validation;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Int,
    String,
    /// A list of plain values
    List(Box<Schema>),
    /// A list of nested blocks
    Block(BTreeMap<&'static str, Schema>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffSuppress {
    CaseDifference,
}

impl DiffSuppress {
    pub fn suppress(&self, old: &str, new: &str) -> bool {
        match self {
            DiffSuppress::CaseDifference => old.eq_ignore_ascii_case(new),
        }
    }
}

/// Declaration of a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: ValueType,
    pub required: bool,
    pub computed: bool,
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip)]
    pub validate: Option<Validation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_suppress: Option<DiffSuppress>,
}

impl Schema {
    fn of(kind: ValueType) -> Self {
        Self {
            kind,
            required: false,
            computed: false,
            force_new: false,
            default: None,
            max_items: None,
            validate: None,
            diff_suppress: None,
        }
    }

    pub fn bool() -> Self {
        Self::of(ValueType::Bool)
    }

    pub fn int() -> Self {
        Self::of(ValueType::Int)
    }

    pub fn string() -> Self {
        Self::of(ValueType::String)
    }

    pub fn list(elem: Schema) -> Self {
        Self::of(ValueType::List(Box::new(elem)))
    }

    pub fn block(fields: impl IntoIterator<Item = (&'static str, Schema)>) -> Self {
        Self::of(ValueType::Block(fields.into_iter().collect()))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn validate(mut self, validation: Validation) -> Self {
        self.validate = Some(validation);
        self
    }

    pub fn diff_suppress(mut self, suppress: DiffSuppress) -> Self {
        self.diff_suppress = Some(suppress);
        self
    }

    /// Nested field schemas of a block attribute
    pub fn fields(&self) -> Option<&BTreeMap<&'static str, Schema>> {
        match &self.kind {
            ValueType::Block(fields) => Some(fields),
            _ => None,
        }
    }

    /// Checks `value` against this schema and fails listing every problem found.
    pub fn validate_value(&self, key: &str, value: &Value) -> Result<()> {
        let mut errors = Vec::new();
        self.collect_errors(key, value, &mut errors);
        if !errors.is_empty() {
            bail!(errors.join("\n"));
        }
        Ok(())
    }

    fn collect_errors(&self, key: &str, value: &Value, errors: &mut Vec<String>) {
        if value.is_null() {
            if self.required {
                errors.push(format!("{key}: required field is not set"));
            }
            return;
        }

        match &self.kind {
            ValueType::Bool if !value.is_bool() => {
                errors.push(format!("{key}: expected bool, got {}", type_name(value)));
                return;
            }
            ValueType::Int if !value.is_i64() => {
                errors.push(format!("{key}: expected int, got {}", type_name(value)));
                return;
            }
            ValueType::String if !value.is_string() => {
                errors.push(format!("{key}: expected string, got {}", type_name(value)));
                return;
            }
            ValueType::List(elem) => {
                let Some(items) = value.as_sequence() else {
                    errors.push(format!("{key}: expected list, got {}", type_name(value)));
                    return;
                };
                self.check_items(key, items.len(), errors);
                for (i, item) in items.iter().enumerate() {
                    elem.collect_errors(&format!("{key}.{i}"), item, errors);
                }
            }
            ValueType::Block(fields) => {
                let Some(items) = value.as_sequence() else {
                    errors.push(format!("{key}: expected list, got {}", type_name(value)));
                    return;
                };
                self.check_items(key, items.len(), errors);
                for (i, item) in items.iter().enumerate() {
                    let prefix = format!("{key}.{i}");
                    let Some(map) = item.as_mapping() else {
                        errors.push(format!("{prefix}: expected block, got {}", type_name(item)));
                        continue;
                    };
                    for k in map.keys() {
                        match k.as_str() {
                            Some(name) if fields.contains_key(name) => {}
                            _ => errors.push(format!(
                                "{prefix}: unsupported argument {}",
                                serde_yaml::to_string(k).unwrap_or_default().trim()
                            )),
                        }
                    }
                    for (name, field) in fields {
                        let v = map.get(*name).unwrap_or(&Value::Null);
                        field.collect_errors(&format!("{prefix}.{name}"), v, errors);
                    }
                }
            }
            _ => {}
        }

        if let Some(validation) = &self.validate {
            errors.extend(validation.check(key, value));
        }
    }

    fn check_items(&self, key: &str, len: usize, errors: &mut Vec<String>) {
        if let Some(max) = self.max_items {
            if len > max {
                errors.push(format!("{key}: attribute supports {max} item maximum, config has {len} declared"));
            }
        }
        if self.required && len == 0 {
            errors.push(format!("{key}: at least 1 item is required"));
        }
    }

    /// Fills declared defaults into every block item missing them. `value`
    /// may be the list of blocks or a single block.
    pub fn apply_defaults(&self, value: &mut Value) {
        let ValueType::Block(fields) = &self.kind else {
            return;
        };
        match value {
            Value::Sequence(items) => {
                for map in items.iter_mut().filter_map(Value::as_mapping_mut) {
                    apply_block_defaults(fields, map);
                }
            }
            Value::Mapping(map) => apply_block_defaults(fields, map),
            _ => {}
        }
    }

    /// Field by field changes needed to move a block from `old` (recorded
    /// state) to `new` (declared configuration).
    pub fn diff_block(&self, old: &Value, new: &Value) -> Vec<FieldChange> {
        let Some(fields) = self.fields() else {
            return Vec::new();
        };

        let mut changes = Vec::new();
        for (name, field) in fields {
            let o = old.get(*name).unwrap_or(&Value::Null);
            let n = new.get(*name).unwrap_or(&Value::Null);
            if n.is_null() && field.computed {
                continue;
            }
            if is_zero(o) && is_zero(n) {
                continue;
            }
            if let (Some(suppress), Some(os), Some(ns)) = (field.diff_suppress, o.as_str(), n.as_str()) {
                if suppress.suppress(os, ns) {
                    continue;
                }
            }
            if o == n {
                continue;
            }
            changes.push(FieldChange {
                field: (*name).to_owned(),
                old: o.clone(),
                new: n.clone(),
                force_new: field.force_new,
            });
        }
        changes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: String,
    pub old: Value,
    pub new: Value,
    pub force_new: bool,
}

/// Recorded state stores zero values where the API returned nothing
fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_i64() == Some(0),
        Value::String(s) => s.is_empty(),
        Value::Sequence(s) => s.is_empty(),
        Value::Mapping(m) => m.is_empty(),
        Value::Tagged(_) => false,
    }
}

fn apply_block_defaults(fields: &BTreeMap<&'static str, Schema>, map: &mut Mapping) {
    for (name, field) in fields {
        let missing = map.get(*name).map_or(true, Value::is_null);
        match (&field.default, missing) {
            (Some(default), true) => {
                map.insert((*name).into(), default.clone());
            }
            (None, false) => {
                if let Some(v) = map.get_mut(*name) {
                    field.apply_defaults(v);
                }
            }
            _ => {}
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "map",
        Value::Tagged(_) => "tagged value",
    }
}
