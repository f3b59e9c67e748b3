mod file_config;

pub use file_config::{AdsConfig, FileConfig, NotificationsConfig};

use crate::ads::AdPlacementConfig;
use crate::notifications::TimestampPolicy;
use crate::system_config::SystemConfig;
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub system_config_path: Option<PathBuf>,
    pub ad_unit_id: Option<String>,
    pub ad_interval: Option<u32>,
    pub ad_skip_first: Option<u32>,
    pub ad_index: Option<u64>,
    pub disable_ads: bool,
    pub timestamp_policy: Option<TimestampPolicy>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub system_config_path: Option<PathBuf>,

    // Feature configs (with defaults)
    pub ads: AdPlacementConfig,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationSettings {
    pub timestamp_policy: TimestampPolicy,
}

impl AppConfig {
    /// Where to read the remote system config snapshot from, if anywhere.
    /// The TOML value overrides the CLI one.
    pub fn system_config_path(cli: &CliConfig, file_config: Option<&FileConfig>) -> Option<PathBuf> {
        file_config
            .and_then(|f| f.system_config_path.as_ref())
            .map(PathBuf::from)
            .or_else(|| cli.system_config_path.clone())
    }

    /// Resolve configuration from CLI arguments, optional TOML file config and
    /// the optional remote system config.
    /// Precedence: TOML, then CLI, then remote system config, then defaults.
    pub fn resolve(
        cli: &CliConfig,
        file_config: Option<FileConfig>,
        remote: Option<&SystemConfig>,
    ) -> Result<Self> {
        let system_config_path = Self::system_config_path(cli, file_config.as_ref());
        let file = file_config.unwrap_or_default();

        // Ad settings - remote config over defaults, then CLI, then TOML
        let base = remote
            .map(SystemConfig::ad_placement)
            .unwrap_or_default();
        let ads_file = file.ads.unwrap_or_default();
        let ads = AdPlacementConfig {
            enabled: ads_file
                .enabled
                .unwrap_or(base.enabled && !cli.disable_ads),
            interval: ads_file
                .interval
                .or(cli.ad_interval)
                .unwrap_or(base.interval),
            skip_first: ads_file
                .skip_first
                .or(cli.ad_skip_first)
                .unwrap_or(base.skip_first),
            ad_unit_id: ads_file
                .ad_unit_id
                .or_else(|| cli.ad_unit_id.clone())
                .or(base.ad_unit_id),
            ad_index: ads_file.ad_index.or(cli.ad_index).unwrap_or(base.ad_index),
        };

        // Only a config that would actually place ads needs a usable interval
        if ads.inserts_ads() {
            if let Err(e) = ads.validate() {
                bail!("Invalid ad placement: {}", e);
            }
        }

        let notifications_file = file.notifications.unwrap_or_default();
        let timestamp_policy = match notifications_file.timestamp_policy {
            Some(s) => match parse_timestamp_policy(&s) {
                Some(policy) => policy,
                None => bail!("Unknown notifications.timestamp_policy: {:?}", s),
            },
            None => cli.timestamp_policy.unwrap_or_default(),
        };

        Ok(Self {
            system_config_path,
            ads,
            notifications: NotificationSettings { timestamp_policy },
        })
    }
}

/// Reads a system config snapshot previously exported from the backend.
pub fn load_system_config(path: &Path) -> Result<SystemConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read system config: {:?}", path))?;
    SystemConfig::from_json(&content)
        .with_context(|| format!("Failed to parse system config: {:?}", path))
}

/// Parses a timestamp policy string into TimestampPolicy.
/// Uses clap's ValueEnum trait for parsing.
fn parse_timestamp_policy(s: &str) -> Option<TimestampPolicy> {
    TimestampPolicy::from_str(s, true).ok()
}
