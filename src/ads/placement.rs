//! Ad placement configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by an ad placement configuration that would insert ads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdPlacementError {
    #[error("Invalid ad interval: {0} (must be at least 1)")]
    InvalidInterval(u32),

    #[error("Ad counter overflow after ad-{0}")]
    CounterOverflow(u64),
}

/// Where native ads go in a rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdPlacementConfig {
    /// Number of content items between consecutive ads.
    pub interval: u32,
    /// Number of leading items that never get an ad after them.
    pub skip_first: u32,
    /// Ad unit identifier. Absent or empty disables insertion.
    pub ad_unit_id: Option<String>,
    /// First value of the ad key counter.
    pub ad_index: u64,
    /// Master switch.
    pub enabled: bool,
}

impl Default for AdPlacementConfig {
    fn default() -> Self {
        Self {
            interval: 10,
            skip_first: 10,
            ad_unit_id: None,
            ad_index: 0,
            enabled: true,
        }
    }
}

impl AdPlacementConfig {
    /// Config that never inserts ads.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Returns the ad unit id if it is set to something non-empty.
    pub fn ad_unit(&self) -> Option<&str> {
        self.ad_unit_id.as_deref().filter(|id| !id.is_empty())
    }

    /// True when this config can place at least one ad in a long enough list.
    pub fn inserts_ads(&self) -> bool {
        self.enabled && self.ad_unit().is_some()
    }

    /// Check the parts of the config that the placement arithmetic relies on.
    pub fn validate(&self) -> Result<(), AdPlacementError> {
        if self.interval == 0 {
            return Err(AdPlacementError::InvalidInterval(self.interval));
        }
        Ok(())
    }

    /// Whether an ad goes right after the item at `index` in a list of `len` items.
    pub(crate) fn ad_follows(&self, index: usize, len: usize) -> bool {
        let position = index as u64 + 1;
        let skip_first = u64::from(self.skip_first);
        if position <= skip_first {
            return false;
        }
        let position_after_skip = position - skip_first;
        position_after_skip % u64::from(self.interval) == 0 && index + 1 < len
    }
}
