//! Configuration handling for malign CLI
//!
//! Supports loading configuration from malign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use malign_core::Options;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{AlignArgs, OutputFormat};

pub const DEFAULT_CONFIG_FILE: &str = "malign.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub align: Options,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Number of threads for batch alignment (all cores if unset)
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format of the align command
    pub format: OutputFormat,

    /// Print the ordinals of the matched markers
    pub ordinals: bool,
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find malign.toml in current directory
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        config
            .align
            .validate()
            .context("Invalid [align] configuration")?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        Self::default().to_toml()
    }

    /// Replace the `[align]` values given on the command line.
    pub fn apply_overrides(&mut self, args: &AlignArgs) {
        let align = &mut self.align;
        if let Some(m) = args.m {
            align.m = m;
        }
        if let Some(delta_x) = args.delta_x {
            align.delta_x = delta_x;
        }
        if let Some(delta_y) = args.delta_y {
            align.delta_y = delta_y;
        }
        if let Some(count) = args.min_entry_count_per_cell {
            align.min_entry_count_per_cell = count;
        }
        if let Some(padding) = args.band_padding {
            align.band_padding = padding;
        }
        if let Some(score) = args.match_score {
            align.match_score = score;
        }
        if let Some(score) = args.mismatch_score {
            align.mismatch_score = score;
        }
        if let Some(score) = args.gap_score {
            align.gap_score = score;
        }
        if let Some(mode) = args.mode {
            align.mode = mode.into();
        }
    }
}
