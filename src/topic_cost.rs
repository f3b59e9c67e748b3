//! Token cost of publishing a topic.
//!
//! Cost = base + exposure level cost + duration cost, minus the daily
//! discount. Users holding a free qualification pay nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_EXPOSURE_LEVEL: &str = "normal";

const DEFAULT_EXPOSURE_COSTS: &[(&str, i64)] = &[("normal", 30), ("medium", 90), ("high", 180)];

/// Cost per duration in days, index 0 is one day.
const DEFAULT_DURATION_COSTS: [i64; 30] = [
    0, 0, 0, 1, 2, 3, 4, 6, 8, 10, 12, 14, 16, 18, 21, 24, 27, 30, 30, 30, 30, 30, 30, 30, 30,
    30, 30, 30, 30, 30,
];

pub fn default_exposure_costs() -> BTreeMap<String, i64> {
    DEFAULT_EXPOSURE_COSTS
        .iter()
        .map(|(level, cost)| (level.to_string(), *cost))
        .collect()
}

pub fn default_duration_costs() -> BTreeMap<String, i64> {
    DEFAULT_DURATION_COSTS
        .iter()
        .enumerate()
        .map(|(i, cost)| ((i + 1).to_string(), *cost))
        .collect()
}

/// Defaults overlaid with whatever the admin configured.
pub fn with_defaults(
    defaults: BTreeMap<String, i64>,
    overrides: Option<&BTreeMap<String, i64>>,
) -> BTreeMap<String, i64> {
    let mut table = defaults;
    if let Some(overrides) = overrides {
        table.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
    }
    table
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicCostParams {
    pub exposure_costs: Option<BTreeMap<String, i64>>,
    pub duration_costs: Option<BTreeMap<String, i64>>,
    pub base_cost: i64,
    pub exposure_level: String,
    pub duration_days: u32,
    pub daily_discount_amount: i64,
    pub has_free_qualification: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCostBreakdown {
    pub base_cost: i64,
    pub exposure_cost: i64,
    pub duration_cost: i64,
    pub total_before_discount: i64,
    pub discount_applied: i64,
    pub total_cost: i64,
    pub is_fully_free: bool,
}

pub fn calculate_topic_cost(params: &TopicCostParams) -> TopicCostBreakdown {
    let exposure_costs = with_defaults(default_exposure_costs(), params.exposure_costs.as_ref());
    let duration_costs = with_defaults(default_duration_costs(), params.duration_costs.as_ref());

    let base_cost = params.base_cost;
    let exposure_cost = exposure_costs
        .get(&params.exposure_level)
        .or_else(|| exposure_costs.get(DEFAULT_EXPOSURE_LEVEL))
        .copied()
        .unwrap_or(0);
    let duration_cost = duration_costs
        .get(&params.duration_days.to_string())
        .copied()
        .unwrap_or(0);

    let total_before_discount = base_cost
        .saturating_add(exposure_cost)
        .saturating_add(duration_cost);
    let is_fully_free = params.has_free_qualification;

    let discount_applied =
        if !is_fully_free && params.daily_discount_amount > 0 && total_before_discount > 0 {
            params.daily_discount_amount.min(total_before_discount)
        } else {
            0
        };

    let total_cost = if is_fully_free {
        0
    } else {
        total_before_discount.saturating_sub(discount_applied).max(0)
    };

    TopicCostBreakdown {
        base_cost,
        exposure_cost,
        duration_cost,
        total_before_discount,
        discount_applied,
        total_cost,
        is_fully_free,
    }
}
