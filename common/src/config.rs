use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::exit;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub resource: ResourceFiles,
    pub api: Option<ApiFiles>,
    #[serde(default)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourceFiles {
    /// Declared configuration of the cluster resource
    pub config: String,
    /// Recorded state, written back by `flatten`
    pub state: Option<String>,
    #[serde(default)]
    pub new_resource: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiFiles {
    /// Managed cluster document as returned by a GET
    pub response: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputOptions {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Hcl,
}

impl Config {
    /// Paths in the config are relative to the config file itself
    pub fn resolve(&self, base: &Path, file: &str) -> String {
        let p = Path::new(file);
        if p.is_absolute() {
            return file.to_owned();
        }
        base.join(p).to_string_lossy().into_owned()
    }
}

pub fn parse_config(file: &str) -> Result<Config> {
    let config = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(err) => exit!(err, "Could not read config file {}", file),
    };

    let config: Result<Config, toml::de::Error> = toml::from_str(config.as_str());
    let config = match config {
        Ok(c) => c,
        Err(err) => exit!(err, "Could not parse config file {}", file),
    };

    info!("config file parsed");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_yaml() {
        let c: Config = toml::from_str(
            r#"
[resource]
config = "resource.yaml"
"#,
        )
        .unwrap();
        assert_eq!(c.output.format, OutputFormat::Yaml);
        assert!(!c.resource.new_resource);
        assert!(c.api.is_none());
    }

    #[test]
    fn full_config() {
        let c: Config = toml::from_str(
            r#"
[resource]
config = "resource.yaml"
state = "state.yaml"
new_resource = true

[api]
response = "cluster.json"

[output]
format = "hcl"
"#,
        )
        .unwrap();
        assert_eq!(c.output.format, OutputFormat::Hcl);
        assert_eq!(c.api.as_ref().unwrap().response, "cluster.json");
        assert_eq!(
            c.resolve(Path::new("/tmp/x"), "state.yaml"),
            "/tmp/x/state.yaml"
        );
    }
}
