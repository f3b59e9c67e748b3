//! Announcement merging for the notification inbox.
//!
//! Announcements are stored as one row per recipient. The inbox (and the
//! admin notification list) shows one entry per broadcast with the number of
//! recipients instead, sorted newest first.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{AnnouncementKey, Notification};

/// Errors that can occur while merging notifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Invalid created_at timestamp {value:?} on notification {id}")]
    InvalidTimestamp { id: String, value: String },
}

/// What to do with a notification whose `created_at` does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TimestampPolicy {
    /// Treat it as the oldest possible notification.
    #[default]
    #[value(alias = "sort_last")]
    SortLast,
    /// Fail the whole merge.
    Reject,
}

/// Parses a `created_at` value. Only RFC 3339 timestamps with an offset are accepted.
pub fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Collapse duplicate announcements and sort everything newest first.
///
/// Unparseable timestamps sort after every valid one.
pub fn merge_announcements(notifications: Vec<Notification>) -> Vec<Notification> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, Notification)> = collapse(notifications)
        .into_iter()
        .map(|notification| {
            let created_at = parse_created_at(&notification.created_at);
            if created_at.is_none() {
                warn!(
                    "Notification {} has unparseable created_at {:?}, sorting it last",
                    notification.id, notification.created_at
                );
            }
            (created_at, notification)
        })
        .collect();

    // Stable; None orders below any timestamp so it lands at the end.
    keyed.sort_by_key(|(created_at, _)| Reverse(*created_at));
    keyed.into_iter().map(|(_, notification)| notification).collect()
}

/// Like [`merge_announcements`], with an explicit policy for bad timestamps.
pub fn merge_announcements_with(
    notifications: Vec<Notification>,
    policy: TimestampPolicy,
) -> Result<Vec<Notification>, NotificationError> {
    if policy == TimestampPolicy::Reject {
        if let Some(bad) = notifications
            .iter()
            .find(|n| parse_created_at(&n.created_at).is_none())
        {
            return Err(NotificationError::InvalidTimestamp {
                id: bad.id.clone(),
                value: bad.created_at.clone(),
            });
        }
    }
    Ok(merge_announcements(notifications))
}

/// Announcement rows sharing title, content and `created_at` become a single
/// entry (the first one seen) whose `announcement_recipient_count` is the
/// number of rows folded into it. Every other type passes through unchanged.
/// Announcements come first, each group in input order.
fn collapse(notifications: Vec<Notification>) -> Vec<Notification> {
    if notifications.is_empty() {
        return Vec::new();
    }

    let total = notifications.len();
    let mut announcements: Vec<Notification> = Vec::new();
    let mut by_key: HashMap<AnnouncementKey, usize> = HashMap::new();
    let mut others: Vec<Notification> = Vec::new();

    for notification in notifications {
        if !notification.is_announcement() {
            others.push(notification);
            continue;
        }

        let key = notification.announcement_key();
        match by_key.get(&key) {
            Some(&slot) => {
                let representative = &mut announcements[slot];
                representative.announcement_recipient_count = Some(
                    representative
                        .recipient_count()
                        .saturating_add(notification.recipient_count()),
                );
            }
            None => {
                let count = notification.recipient_count();
                by_key.insert(key, announcements.len());
                announcements.push(Notification {
                    announcement_recipient_count: Some(count),
                    ..notification
                });
            }
        }
    }

    debug!(
        "Merged {} notifications into {} announcements and {} others",
        total,
        announcements.len(),
        others.len()
    );

    announcements.extend(others);
    announcements
}

/// Number of unread entries.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
