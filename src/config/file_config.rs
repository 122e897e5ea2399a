use super::DuplicatePolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML overrides for the index configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub duplicate_policy: Option<DuplicatePolicy>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
