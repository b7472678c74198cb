use anyhow::{Context, Result};
use liblandpass::{
    config::ClientConfig, map::MapConfig, render::Markup, submit::SubmitOptions,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs::read_to_string;
use tracing::debug;

pub const DEFAULT_SERVER: &str = "http://localhost:5000/";
const CONFIG_FILE: &str = "config.yaml";

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub submit: SubmitOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            map: MapConfig::default(),
            submit: SubmitOptions::default(),
        }
    }
}

impl Config {
    fn parse(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).with_context(|| "Couldn't parse yaml configuration")
    }

    /// Load the configuration from `path`. A missing file gives the default configuration.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(?path, "Trying to load config");
        match read_to_string(path).await {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("Invalid configuration file '{}'", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::Error::from(e).context(format!(
                "Failed to read configuration file '{}'",
                path.display()
            ))),
        }
    }

    pub fn client(&self, markup: Markup) -> ClientConfig {
        ClientConfig {
            map: self.map.clone(),
            submit: self.submit.clone(),
            markup,
        }
    }
}

pub fn config_file() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("org", "landpass", "landpass")
        .with_context(|| "Unable to determine the configuration directory")?;
    Ok(project_dirs.config_dir().join(CONFIG_FILE))
}
