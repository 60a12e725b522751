use anyhow::Result;
use kubernetes_cluster::{flatten_default_node_pool, DEFAULT_NODE_POOL};

use crate::{
    args::Cli,
    workspace::{render, success, Workspace},
};

pub async fn flatten(cli: &Cli) -> Result<()> {
    let ws = Workspace::load(cli)?;
    let cluster = ws.cluster().await?;
    let mut recorded = ws.recorded().await?;

    let block = flatten_default_node_pool(cluster.agent_pool_profiles(), &recorded)?;
    recorded.set_serialized(DEFAULT_NODE_POOL, &block)?;

    println!(
        "{}",
        render(DEFAULT_NODE_POOL, &block, ws.config.output.format)?
    );
    match ws.write_recorded(&recorded).await? {
        Some(file) => success(&format!("Recorded state refreshed ({file})")),
        None => success("Default node pool flattened"),
    }
    Ok(())
}
