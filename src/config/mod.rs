use anyhow::{Context, Result};
use config::{Environment, File};
use serde::{Deserialize, Serialize};

/// Runtime settings layered from defaults, an optional `grader.{toml,yaml,json}`
/// in the working directory and `GRADER_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub git: GitConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub binary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub name_width: usize,
    pub column_gap: usize,
    pub color: bool,
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            git: GitConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: "git".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            name_width: 20,
            column_gap: 3,
            color: true,
            progress: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(File::with_name("grader").required(false))
                .add_source(
                    Environment::with_prefix("GRADER")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
