//! Remote system configuration snapshot.
//!
//! Admins edit key/value settings stored in the backend's `system_config`
//! table; clients fetch them all at once and read single keys with a fallback.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::ads::AdPlacementConfig;

pub const NATIVE_AD_ENABLED: &str = "native_ad_enabled";
pub const NATIVE_AD_INTERVAL: &str = "native_ad_interval";
pub const NATIVE_AD_SKIP_FIRST: &str = "native_ad_skip_first";
pub const NATIVE_AD_UNIT_ID: &str = "native_ad_unit_id";
pub const EXPOSURE_COSTS: &str = "exposure_costs";
pub const DURATION_COSTS: &str = "duration_costs";

#[derive(Debug, Error)]
pub enum SystemConfigError {
    #[error("Invalid system config payload: {0}")]
    InvalidPayload(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the `system_config` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfigEntry {
    pub id: String,
    pub key: String,
    pub value: Value,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub updated_at: String,
}

/// Snapshot of every configuration key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemConfig {
    values: HashMap<String, Value>,
}

impl SystemConfig {
    pub fn new(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = SystemConfigEntry>) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|entry| (entry.key, entry.value))
                .collect(),
        }
    }

    /// Parse the `get-system-config` response, either `{"configs": {...}}`,
    /// a bare object of key/values, or an array of table rows.
    pub fn from_json(payload: &str) -> Result<Self, SystemConfigError> {
        let value: Value = serde_json::from_str(payload)?;
        match value {
            Value::Object(mut map) => {
                let map = match map.remove("configs") {
                    Some(Value::Object(configs)) => configs,
                    Some(other) => {
                        return Err(SystemConfigError::InvalidPayload(format!(
                            "\"configs\" must be an object, got {}",
                            other
                        )))
                    }
                    None => map,
                };
                Ok(Self {
                    values: map.into_iter().collect(),
                })
            }
            Value::Array(_) => {
                let entries: Vec<SystemConfigEntry> = serde_json::from_value(value)?;
                Ok(Self::from_entries(entries))
            }
            other => Err(SystemConfigError::InvalidPayload(format!(
                "expected an object or an array, got {}",
                other
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Typed lookup. Missing keys and values of the wrong shape yield `default`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.values.get(key)?;
        if raw.is_null() {
            return None;
        }
        match serde_json::from_value(raw.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring system config {}={}: {}", key, raw, e);
                None
            }
        }
    }

    /// Ad placement from the `native_ad_*` keys, falling back to `base`.
    pub fn ad_placement_over(&self, base: AdPlacementConfig) -> AdPlacementConfig {
        AdPlacementConfig {
            enabled: self.get_or(NATIVE_AD_ENABLED, base.enabled),
            interval: self.get_or(NATIVE_AD_INTERVAL, base.interval),
            skip_first: self.get_or(NATIVE_AD_SKIP_FIRST, base.skip_first),
            ad_unit_id: self.get(NATIVE_AD_UNIT_ID).or(base.ad_unit_id),
            ad_index: base.ad_index,
        }
    }

    pub fn ad_placement(&self) -> AdPlacementConfig {
        self.ad_placement_over(AdPlacementConfig::default())
    }

    /// Admin-tuned `(exposure_costs, duration_costs)` tables, if set.
    pub fn topic_cost_tables(
        &self,
    ) -> (Option<BTreeMap<String, i64>>, Option<BTreeMap<String, i64>>) {
        (self.get(EXPOSURE_COSTS), self.get(DURATION_COSTS))
    }
}
