use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nodepool-runner")]
#[command(author, version, about = "Maps the default node pool of a managed Kubernetes cluster to and from the API", long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(long, short, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Configuration file
    #[arg(long, short, default_value = "config.toml")]
    pub file: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the default_node_pool schema
    Schema,
    /// Check the declared resource against the schema
    Validate,
    /// Build the agent pool profiles sent to the API
    Expand(ExpandArgs),
    /// Refresh the recorded state from an API response
    Flatten,
    /// Compare the API response with the declared resource
    Plan,
}

#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Treat the cluster as not created yet
    #[arg(long, short, action = ArgAction::SetTrue)]
    pub new: bool,
}
