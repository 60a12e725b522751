use anyhow::Result;
use common::resource_data::ResourceData;
use kubernetes_cluster::{
    flatten_default_node_pool, plan_default_node_pool, DefaultNodePool, PlanAction,
    DEFAULT_NODE_POOL,
};

use crate::{
    args::Cli,
    workspace::{render, success, validate_declared, Workspace, YELLOW_ARROW},
};

pub async fn plan(cli: &Cli) -> Result<()> {
    let ws = Workspace::load(cli)?;
    let declared = ws.declared(false).await?;
    validate_declared(&declared)?;

    let cluster = ws.cluster().await?;
    let recorded = ws.recorded().await?;
    // fall back to the declared name when nothing is recorded yet
    let locator = if recorded.get_str("default_node_pool.0.name").is_some() {
        &recorded
    } else {
        &declared
    };
    let state = flatten_default_node_pool(cluster.agent_pool_profiles(), locator)?;

    let config = match declared.get_list(DEFAULT_NODE_POOL).first() {
        Some(raw) => Some(DefaultNodePool::from_value(raw)?),
        None => None,
    };
    let action = plan_default_node_pool(state.first(), config.as_ref())?;

    println!("{}", render("plan", &action, ws.config.output.format)?);
    match &action {
        PlanAction::NoOp => success("No changes"),
        PlanAction::Replace(c) => eprintln!(
            "{} default_node_pool must be replaced, {} change(s)",
            YELLOW_ARROW.to_string(),
            c.len()
        ),
        PlanAction::Update(c) => eprintln!(
            "{} default_node_pool will be updated in place, {} change(s)",
            YELLOW_ARROW.to_string(),
            c.len()
        ),
        PlanAction::Create => eprintln!("{} default_node_pool will be created", YELLOW_ARROW.to_string()),
        PlanAction::Delete => eprintln!("{} default_node_pool will be removed", YELLOW_ARROW.to_string()),
    }
    Ok(())
}
