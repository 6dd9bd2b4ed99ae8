use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Used when `--config` is not given. A missing default file is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "computus.toml";

/// Top-level configuration. Command-line flags override these values.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Years compared when `--from`/`--to` are not given.
    #[serde(default)]
    pub range: RangeConfig,

    /// Ephemeris table used when `--dataset` is not given.
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Config::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Reads `path` if given, otherwise the default file if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Config::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Config::from_file(default)
                } else {
                    log::debug!("no {DEFAULT_CONFIG_PATH}, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}
