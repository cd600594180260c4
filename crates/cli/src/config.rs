//! Optional configuration file with default policy values
//!
//! Flags always win; the file only supplies defaults for knobs not given
//! on the command line. A missing file is fine, a malformed one is fatal.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Contents of `<config_dir>/revkeep/config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub policy: PolicyDefaults,
}

/// The `[policy]` table, mirroring the `prune` flags
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDefaults {
    pub last: Option<usize>,
    pub keep_hourly: Option<usize>,
    pub keep_daily: Option<usize>,
    pub keep_weekly: Option<usize>,
    pub keep_monthly: Option<usize>,
    pub keep_yearly: Option<usize>,
    pub keep_less_than_n_rev: Option<usize>,
    pub keep_before: Option<String>,
    pub keep_after: Option<String>,
}

/// Where the config file lives, if a config directory exists at all
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("revkeep").join("config.toml"))
}

/// Load the config file, or defaults when there is none
pub fn load() -> Result<FileConfig> {
    let Some(path) = config_file_path() else {
        return Ok(FileConfig::default());
    };
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
}
