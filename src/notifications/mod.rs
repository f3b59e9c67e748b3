//! User notifications module

mod merge;
mod models;

pub use merge::{
    merge_announcements, merge_announcements_with, parse_created_at, unread_count,
    NotificationError, TimestampPolicy,
};
pub use models::{AnnouncementKey, Notification, NotificationProfile, NotificationType};
