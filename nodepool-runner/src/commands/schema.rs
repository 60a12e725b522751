use anyhow::Result;
use common::config::{parse_config, OutputFormat};
use kubernetes_cluster::{schema_default_node_pool, DEFAULT_NODE_POOL};

use crate::{args::Cli, workspace::render};

pub async fn schema(cli: &Cli) -> Result<()> {
    // the schema does not depend on any resource, a missing config only loses the format
    let format = match parse_config(&cli.file) {
        Ok(c) => c.output.format,
        Err(_) => OutputFormat::Yaml,
    };
    println!(
        "{}",
        render(DEFAULT_NODE_POOL, &schema_default_node_pool(), format)?
    );
    Ok(())
}
