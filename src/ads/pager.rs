//! Ad key continuity across paginated topic lists.

use super::interleave::{interleave_from, FeedNode};
use super::placement::{AdPlacementConfig, AdPlacementError};

/// Interleaves successive pages of a list while keeping ad keys unique.
///
/// Each page is placed on its own (the skip region applies per page), but the
/// ad counter carries over so that `ad-<n>` never repeats within a session.
#[derive(Debug, Clone)]
pub struct FeedPager {
    config: AdPlacementConfig,
    next_ad_index: u64,
}

impl FeedPager {
    pub fn new(config: AdPlacementConfig) -> Self {
        let next_ad_index = config.ad_index;
        Self {
            config,
            next_ad_index,
        }
    }

    pub fn config(&self) -> &AdPlacementConfig {
        &self.config
    }

    /// Counter the next inserted ad will use.
    pub fn next_ad_index(&self) -> u64 {
        self.next_ad_index
    }

    /// Interleave one page. The counter only advances when the page succeeds.
    pub fn next_page<T, N, F>(
        &mut self,
        items: &[T],
        render: F,
    ) -> Result<Vec<FeedNode<N>>, AdPlacementError>
    where
        F: FnMut(&T, usize) -> N,
    {
        let (nodes, next) = interleave_from(items, render, &self.config, self.next_ad_index)?;
        self.next_ad_index = next;
        Ok(nodes)
    }

    /// Start over from the configured `ad_index`, e.g. on pull-to-refresh.
    pub fn reset(&mut self) {
        self.next_ad_index = self.config.ad_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager() -> FeedPager {
        FeedPager::new(AdPlacementConfig {
            interval: 2,
            skip_first: 0,
            ad_unit_id: Some("unit".to_string()),
            ad_index: 100,
            enabled: true,
        })
    }

    fn ad_keys<N>(nodes: &[FeedNode<N>]) -> Vec<String> {
        nodes
            .iter()
            .filter_map(|n| n.as_ad())
            .map(|a| a.key.clone())
            .collect()
    }

    #[test]
    fn test_counter_continues_across_pages() {
        let mut pager = pager();
        let page: Vec<u32> = (0..6).collect();

        let first = pager.next_page(&page, |n, _| *n).unwrap();
        assert_eq!(ad_keys(&first), vec!["ad-100", "ad-101"]);
        assert_eq!(pager.next_ad_index(), 102);

        let second = pager.next_page(&page, |n, _| *n).unwrap();
        assert_eq!(ad_keys(&second), vec!["ad-102", "ad-103"]);
        assert_eq!(pager.next_ad_index(), 104);
    }

    #[test]
    fn test_reset_restarts_from_configured_index() {
        let mut pager = pager();
        let page: Vec<u32> = (0..6).collect();

        pager.next_page(&page, |n, _| *n).unwrap();
        pager.reset();
        assert_eq!(pager.next_ad_index(), 100);
    }

    #[test]
    fn test_failed_page_keeps_counter() {
        let mut pager = FeedPager::new(AdPlacementConfig {
            interval: 0,
            ad_unit_id: Some("unit".to_string()),
            ad_index: 5,
            ..Default::default()
        });
        let page: Vec<u32> = (0..6).collect();

        assert!(pager.next_page(&page, |n, _| *n).is_err());
        assert_eq!(pager.next_ad_index(), 5);
    }

    #[test]
    fn test_counter_overflow_fails_page_and_keeps_counter() {
        let mut pager = FeedPager::new(AdPlacementConfig {
            interval: 1,
            skip_first: 0,
            ad_unit_id: Some("unit".to_string()),
            ad_index: u64::MAX - 1,
            enabled: true,
        });
        let page: Vec<u32> = (0..2).collect();

        // one ad takes u64::MAX - 1, leaving u64::MAX for the next page
        let nodes = pager.next_page(&page, |n, _| *n).unwrap();
        assert_eq!(nodes[1].as_ad().unwrap().counter, u64::MAX - 1);
        assert_eq!(pager.next_ad_index(), u64::MAX);

        assert_eq!(
            pager.next_page(&page, |n, _| *n),
            Err(AdPlacementError::CounterOverflow(u64::MAX))
        );
        assert_eq!(pager.next_ad_index(), u64::MAX);
    }

    #[test]
    fn test_page_without_ads_keeps_counter() {
        let mut pager = pager();
        let short: Vec<u32> = vec![1];

        let nodes = pager.next_page(&short, |n, _| *n).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(pager.next_ad_index(), 100);
    }
}
