use std::path::{Path, PathBuf};

use anyhow::Result;
use common::{
    config::{parse_config, Config, OutputFormat},
    exit,
    resource_data::{ResourceData, StateData},
};
use console::{style, StyledObject};
use containerservice::ManagedCluster;
use kubernetes_cluster::{schema_default_node_pool, DEFAULT_NODE_POOL};
use serde::Serialize;
use serde_yaml::Value;
use tokio::fs;
use tracing::info;

use crate::args::Cli;

lazy_static::lazy_static! {
    pub static ref GREEN_TICK: StyledObject<&'static str> = style("✔").green();
    pub static ref YELLOW_ARROW: StyledObject<&'static str> = style("→").yellow();
    pub static ref RED_CROSS: StyledObject<&'static str> = style("✗").red();
}

/// Runner config along with the directory its relative paths start from
pub struct Workspace {
    pub config: Config,
    base: PathBuf,
}

impl Workspace {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = parse_config(&cli.file)?;
        let base = Path::new(&cli.file)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { config, base })
    }

    pub fn path(&self, file: &str) -> String {
        self.config.resolve(&self.base, file)
    }

    pub async fn declared(&self, new_resource: bool) -> Result<StateData> {
        let file = self.path(&self.config.resource.config);
        let s = match fs::read_to_string(&file).await {
            Ok(s) => s,
            Err(err) => exit!(err, "Could not read resource configuration {}", file),
        };
        info!("read resource configuration {file}");
        StateData::from_yaml(&s, new_resource || self.config.resource.new_resource)
    }

    /// A missing state file reads as an empty state
    pub async fn recorded(&self) -> Result<StateData> {
        let Some(state) = &self.config.resource.state else {
            return Ok(StateData::default());
        };
        let file = self.path(state);
        if !Path::new(&file).exists() {
            info!("no recorded state at {file}");
            return Ok(StateData::default());
        }
        let s = match fs::read_to_string(&file).await {
            Ok(s) => s,
            Err(err) => exit!(err, "Could not read recorded state {}", file),
        };
        info!("read recorded state {file}");
        StateData::from_yaml(&s, false)
    }

    pub async fn write_recorded(&self, state: &StateData) -> Result<Option<String>> {
        let Some(path) = &self.config.resource.state else {
            return Ok(None);
        };
        let file = self.path(path);
        fs::write(&file, state.to_yaml()?).await?;
        info!("wrote recorded state to {file}");
        Ok(Some(file))
    }

    pub async fn cluster(&self) -> Result<ManagedCluster> {
        let Some(api) = &self.config.api else {
            exit!("missing [api] section", "No API response configured in {}", self.base.display());
        };
        let file = self.path(&api.response);
        let s = match fs::read_to_string(&file).await {
            Ok(s) => s,
            Err(err) => exit!(err, "Could not read API response {}", file),
        };
        match ManagedCluster::from_json(&s) {
            Ok(c) => Ok(c),
            Err(err) => exit!(err, "Could not parse API response {}", file),
        }
    }
}

/// Validates the declared block the way the framework does before any mapping runs
pub fn validate_declared(d: &dyn ResourceData) -> Result<()> {
    let block = d.get(DEFAULT_NODE_POOL).cloned().unwrap_or(Value::Null);
    if let Err(err) = schema_default_node_pool().validate_value(DEFAULT_NODE_POOL, &block) {
        exit!(err, "{} {} is invalid", RED_CROSS.to_string(), DEFAULT_NODE_POOL);
    }
    Ok(())
}

/// Renders `value` under a single top level `key`
pub fn render<T: Serialize>(key: &str, value: &T, format: OutputFormat) -> Result<String> {
    let mut doc = serde_json::Map::new();
    doc.insert(key.to_owned(), serde_json::to_value(value)?);
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(&doc)?,
        OutputFormat::Json => serde_json::to_string_pretty(&doc)?,
        OutputFormat::Hcl => hcl::to_string(&doc)?,
    })
}

pub fn success(msg: &str) {
    eprintln!("{} {}", GREEN_TICK.to_string(), msg);
}
