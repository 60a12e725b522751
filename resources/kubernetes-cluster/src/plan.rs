use anyhow::Result;
use common::schema::FieldChange;
use serde::Serialize;

use crate::{
    node_pool::{DefaultNodePool, NodePoolState},
    schema::schema_default_node_pool,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "changes")]
pub enum PlanAction {
    NoOp,
    Create,
    Update(Vec<FieldChange>),
    Replace(Vec<FieldChange>),
    Delete,
}

impl PlanAction {
    pub fn requires_replacement(&self) -> bool {
        matches!(self, PlanAction::Replace(_))
    }

    pub fn changes(&self) -> &[FieldChange] {
        match self {
            PlanAction::Update(c) | PlanAction::Replace(c) => c,
            _ => &[],
        }
    }
}

/// Works out what applying `config` on top of the recorded `state` would do.
pub fn plan_default_node_pool(
    state: Option<&NodePoolState>,
    config: Option<&DefaultNodePool>,
) -> Result<PlanAction> {
    let (state, config) = match (state, config) {
        (None, None) => return Ok(PlanAction::NoOp),
        (None, Some(_)) => return Ok(PlanAction::Create),
        (Some(_), None) => return Ok(PlanAction::Delete),
        (Some(s), Some(c)) => (s, c),
    };

    let old = serde_yaml::to_value(state)?;
    let new = serde_yaml::to_value(config)?;
    let mut changes = schema_default_node_pool().diff_block(&old, &new);
    if config.enable_auto_scaling {
        // expand never sends count for an existing autoscaled pool
        changes.retain(|c| c.field != "count");
    }

    Ok(if changes.is_empty() {
        PlanAction::NoOp
    } else if changes.iter().any(|c| c.force_new) {
        PlanAction::Replace(changes)
    } else {
        PlanAction::Update(changes)
    })
}
