use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NodeConfig {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Extra attempts after a failed request. Zero means no retries.
    #[serde(default)]
    pub retries: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_unit() -> String {
    "SEM".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            base_url: "http://127.0.0.1:5171".to_string(),
            username: None,
            password: None,
            retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub node: NodeConfig,
    /// Addresses shown on the home panel when none are given on the command line.
    #[serde(default)]
    pub addresses: Vec<String>,
    /// Unit label appended to amounts.
    #[serde(default = "default_unit")]
    pub unit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            node: NodeConfig::default(),
            addresses: Vec::new(),
            unit: default_unit(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "semscope", "semscope")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
