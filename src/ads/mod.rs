//! Native ad placement for topic lists

mod interleave;
mod pager;
mod placement;

pub use interleave::{ad_positions, interleave, AdSlot, FeedNode};
pub use pager::FeedPager;
pub use placement::{AdPlacementConfig, AdPlacementError};
