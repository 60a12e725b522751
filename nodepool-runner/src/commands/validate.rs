use anyhow::Result;

use crate::{
    args::Cli,
    workspace::{success, validate_declared, Workspace},
};

pub async fn validate(cli: &Cli) -> Result<()> {
    let ws = Workspace::load(cli)?;
    let declared = ws.declared(false).await?;
    validate_declared(&declared)?;
    success("Resource configuration is valid");
    Ok(())
}
