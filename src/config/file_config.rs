use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// JSON snapshot of the remote system config (can override CLI)
    pub system_config_path: Option<String>,

    // Feature configs
    pub ads: Option<AdsConfig>,
    pub notifications: Option<NotificationsConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AdsConfig {
    pub enabled: Option<bool>,
    pub interval: Option<u32>,
    pub skip_first: Option<u32>,
    pub ad_unit_id: Option<String>,
    pub ad_index: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct NotificationsConfig {
    /// What to do with unparseable created_at values: "sort-last", "reject"
    pub timestamp_policy: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
