//! Notification data models

use serde::{Deserialize, Serialize};

/// Notification type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Announcement,
    Personal,
    System,
    Contact,
}

/// Sender profile joined onto a notification row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationProfile {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}

/// A notification row as returned by the backend.
///
/// Merged announcements reuse the same shape with
/// `announcement_recipient_count` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub read_at: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<NotificationProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_recipient_count: Option<u32>,
    /// Any other column, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Notification {
    pub fn new(
        id: impl Into<String>,
        notification_type: NotificationType,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            notification_type,
            title: title.into(),
            content: content.into(),
            is_read: false,
            read_at: None,
            created_at: created_at.into(),
            expires_at: None,
            created_by: None,
            profiles: None,
            announcement_recipient_count: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_announcement(&self) -> bool {
        self.notification_type == NotificationType::Announcement
    }

    /// Number of recipients this row stands for. Unmerged rows count as one.
    pub fn recipient_count(&self) -> u32 {
        self.announcement_recipient_count.unwrap_or(1)
    }

    pub fn announcement_key(&self) -> AnnouncementKey {
        AnnouncementKey {
            title: self.title.clone(),
            content: self.content.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

/// Identity of one announcement broadcast.
///
/// The backend fans an announcement out to one row per recipient; rows with
/// equal title, content and creation time belong to the same broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnouncementKey {
    pub title: String,
    pub content: String,
    pub created_at: String,
}
