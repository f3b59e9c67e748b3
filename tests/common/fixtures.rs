//! Test fixtures for topic lists and notification rows

use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use topicvote_feed::notifications::{Notification, NotificationType};

/// Topic titles "Topic 0" .. "Topic n-1".
#[allow(dead_code)]
pub fn topic_titles(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Topic {}", i)).collect()
}

/// One announcement row per recipient, as the backend stores a broadcast.
#[allow(dead_code)]
pub fn announcement_rows(
    title: &str,
    content: &str,
    created_at: &str,
    recipients: usize,
) -> Vec<Notification> {
    (0..recipients)
        .map(|i| {
            let mut row = Notification::new(
                format!("{}-{}", title, i),
                NotificationType::Announcement,
                title,
                content,
                created_at,
            );
            row.user_id = Some(format!("user-{}", i));
            row
        })
        .collect()
}

#[allow(dead_code)]
pub fn other_row(
    id: &str,
    notification_type: NotificationType,
    title: &str,
    created_at: &str,
) -> Notification {
    Notification::new(id, notification_type, title, "details", created_at)
}

/// Writes `content` into a temp file that lives as long as the handle.
#[allow(dead_code)]
pub fn write_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[allow(dead_code)]
pub fn feed_tool_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_feed-tool"))
}
