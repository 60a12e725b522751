use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod workspace;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("LOG")
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "info" } else { "error" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Schema => commands::schema::schema(&cli).await,
        Commands::Validate => commands::validate::validate(&cli).await,
        Commands::Expand(args) => commands::expand::expand(&cli, args).await,
        Commands::Flatten => commands::flatten::flatten(&cli).await,
        Commands::Plan => commands::plan::plan(&cli).await,
    }
}
