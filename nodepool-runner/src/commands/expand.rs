use anyhow::Result;
use kubernetes_cluster::expand_default_node_pool;
use tracing::info;

use crate::{
    args::{Cli, ExpandArgs},
    workspace::{success, validate_declared, Workspace, YELLOW_ARROW},
};

pub async fn expand(cli: &Cli, args: &ExpandArgs) -> Result<()> {
    let ws = Workspace::load(cli)?;
    let declared = ws.declared(args.new).await?;
    validate_declared(&declared)?;

    let Some(profiles) = expand_default_node_pool(&declared)? else {
        eprintln!("{} No default_node_pool declared", YELLOW_ARROW.to_string());
        return Ok(());
    };
    info!("expanded {} agent pool profile(s)", profiles.len());

    // request bodies always go out as json
    println!("{}", serde_json::to_string_pretty(&profiles)?);
    success("Agent pool profiles expanded");
    Ok(())
}
