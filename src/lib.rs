//! Topic Vote Feed Library
//!
//! Presentation-side data transformations for the topic voting client:
//! ad placement in topic lists, announcement merging for the notification
//! inbox, and the helpers those screens lean on.

pub mod ads;
pub mod config;
pub mod format;
pub mod notifications;
pub mod system_config;
pub mod topic_cost;

// Re-export commonly used types for convenience
pub use ads::{interleave, AdPlacementConfig, AdPlacementError, AdSlot, FeedNode, FeedPager};
pub use notifications::{
    merge_announcements, merge_announcements_with, Notification, NotificationError,
    NotificationType, TimestampPolicy,
};
pub use system_config::SystemConfig;
