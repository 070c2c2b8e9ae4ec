//! CLI configuration: engine thresholds plus the generator command.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use cairn_core::EngineConfig;
use log::debug;
use serde::Deserialize;

const CONFIG_FILE: &str = "config.json";

/// Contents of `config.json`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub engine: EngineConfig,
    pub generator: Option<GeneratorConfig>,
}

/// External command used as the text-generation collaborator.
///
/// The prompt is written to the command's stdin and its stdout is taken as
/// the response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    300
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CliConfig {
    /// Loads `explicit` if given, otherwise the XDG config file if one exists,
    /// otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path(),
        };

        let Some(path) = path else {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.engine.validate()?;
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("cairn").find_config_file(CONFIG_FILE)
    }
}
