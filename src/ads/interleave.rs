//! Interleaving of rendered content with ad slots.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::placement::{AdPlacementConfig, AdPlacementError};

/// An ad slot placed between two content items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSlot {
    /// Render key, `ad-<counter>`.
    pub key: String,
    pub counter: u64,
    pub ad_unit_id: String,
}

impl AdSlot {
    fn new(counter: u64, ad_unit_id: &str) -> Self {
        Self {
            key: format!("ad-{}", counter),
            counter,
            ad_unit_id: ad_unit_id.to_string(),
        }
    }
}

/// One entry of a rendered feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "node", rename_all = "snake_case")]
pub enum FeedNode<N> {
    Content(N),
    Ad(AdSlot),
}

impl<N> FeedNode<N> {
    pub fn is_ad(&self) -> bool {
        matches!(self, FeedNode::Ad(_))
    }

    pub fn as_content(&self) -> Option<&N> {
        match self {
            FeedNode::Content(node) => Some(node),
            FeedNode::Ad(_) => None,
        }
    }

    pub fn as_ad(&self) -> Option<&AdSlot> {
        match self {
            FeedNode::Content(_) => None,
            FeedNode::Ad(slot) => Some(slot),
        }
    }
}

/// Render `items` and insert ad slots according to `config`.
///
/// `render` receives each item with its index in `items` and is called
/// exactly once per item, in order. When ads are disabled or no ad unit is
/// configured the output is just the rendered items.
pub fn interleave<T, N, F>(
    items: &[T],
    render: F,
    config: &AdPlacementConfig,
) -> Result<Vec<FeedNode<N>>, AdPlacementError>
where
    F: FnMut(&T, usize) -> N,
{
    interleave_from(items, render, config, config.ad_index).map(|(nodes, _)| nodes)
}

/// Same as [`interleave`] but starting the ad counter at `first_counter`.
/// Also returns the counter value the next ad would get.
pub(crate) fn interleave_from<T, N, F>(
    items: &[T],
    mut render: F,
    config: &AdPlacementConfig,
    first_counter: u64,
) -> Result<(Vec<FeedNode<N>>, u64), AdPlacementError>
where
    F: FnMut(&T, usize) -> N,
{
    let ad_unit = match config.ad_unit() {
        Some(unit) if config.enabled => unit,
        _ => {
            let nodes = items
                .iter()
                .enumerate()
                .map(|(index, item)| FeedNode::Content(render(item, index)))
                .collect();
            return Ok((nodes, first_counter));
        }
    };

    config.validate()?;

    debug!(
        "Ad insertion: interval={}, skip_first={}, items={}",
        config.interval,
        config.skip_first,
        items.len()
    );

    // interval is non-zero past validate()
    let mut nodes = Vec::with_capacity(items.len() + items.len() / config.interval as usize);
    let mut counter = first_counter;

    for (index, item) in items.iter().enumerate() {
        nodes.push(FeedNode::Content(render(item, index)));

        if config.ad_follows(index, items.len()) {
            trace!("Inserting ad-{} after position {}", counter, index + 1);
            nodes.push(FeedNode::Ad(AdSlot::new(counter, ad_unit)));
            counter = counter
                .checked_add(1)
                .ok_or(AdPlacementError::CounterOverflow(counter))?;
        }
    }

    Ok((nodes, counter))
}

/// Zero-based indices of the items an ad would directly follow.
pub fn ad_positions(len: usize, config: &AdPlacementConfig) -> Result<Vec<usize>, AdPlacementError> {
    if !config.inserts_ads() {
        return Ok(Vec::new());
    }
    config.validate()?;
    Ok((0..len).filter(|&index| config.ad_follows(index, len)).collect())
}
