//! Process-level tests for the feed-tool binary

mod common;

use common::{feed_tool_bin, write_temp_file};
use std::process::Command;

fn run(args: &[&str]) -> (bool, serde_json::Value, String) {
    let output = Command::new(feed_tool_bin())
        .args(args)
        .env("LOG_LEVEL", "warn")
        .output()
        .expect("Failed to run feed-tool");

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json = serde_json::from_str(&stdout).unwrap_or(serde_json::Value::Null);
    (output.status.success(), json, stderr)
}

#[test]
fn test_interleave_with_cli_flags() {
    let items = write_temp_file(r#"["a", "b", "c", "d", "e"]"#);
    let (ok, json, stderr) = run(&[
        "interleave",
        items.path().to_str().unwrap(),
        "--ad-unit-id",
        "unit-1",
        "--interval",
        "2",
        "--skip-first",
        "0",
    ]);

    assert!(ok, "stderr: {}", stderr);
    let nodes = json.as_array().unwrap();
    assert_eq!(nodes.len(), 7);
    assert_eq!(nodes[0]["kind"], "content");
    assert_eq!(nodes[0]["node"]["item"], "a");
    assert_eq!(nodes[2]["kind"], "ad");
    assert_eq!(nodes[2]["node"]["key"], "ad-0");
    assert_eq!(nodes[5]["node"]["key"], "ad-1");
}

#[test]
fn test_interleave_toml_overrides_flags() {
    let items = write_temp_file(r#"[1, 2, 3, 4, 5, 6]"#);
    let config = write_temp_file(
        r#"
[ads]
interval = 3
skip_first = 0
ad_unit_id = "toml-unit"
"#,
    );
    let (ok, json, stderr) = run(&[
        "--config",
        config.path().to_str().unwrap(),
        "interleave",
        items.path().to_str().unwrap(),
        "--interval",
        "1",
    ]);

    assert!(ok, "stderr: {}", stderr);
    let ads: Vec<&serde_json::Value> = json
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["kind"] == "ad")
        .collect();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0]["node"]["ad_unit_id"], "toml-unit");
}

#[test]
fn test_interleave_zero_interval_fails() {
    let items = write_temp_file(r#"[1, 2, 3]"#);
    let (ok, _, stderr) = run(&[
        "interleave",
        items.path().to_str().unwrap(),
        "--ad-unit-id",
        "unit-1",
        "--interval",
        "0",
    ]);

    assert!(!ok);
    assert!(stderr.contains("Invalid ad"), "stderr: {}", stderr);
}

#[test]
fn test_merge_notifications() {
    let rows = write_temp_file(
        r#"[
        {"id": "1", "type": "announcement", "title": "T", "content": "C",
         "created_at": "2024-01-01T00:00:00Z"},
        {"id": "2", "type": "announcement", "title": "T", "content": "C",
         "created_at": "2024-01-01T00:00:00Z", "is_read": true},
        {"id": "3", "type": "contact", "title": "Q", "content": "?",
         "created_at": "2024-02-01T00:00:00Z"}
    ]"#,
    );
    let (ok, json, stderr) = run(&["merge-notifications", rows.path().to_str().unwrap()]);

    assert!(ok, "stderr: {}", stderr);
    let notifications = json["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["id"], "3");
    assert_eq!(notifications[1]["announcement_recipient_count"], 2);
    assert_eq!(json["unread"], 2);
}

#[test]
fn test_merge_notifications_reject_policy() {
    let rows = write_temp_file(
        r#"[{"id": "x", "type": "system", "title": "T", "content": "C",
             "created_at": "last tuesday"}]"#,
    );
    let (ok, _, stderr) = run(&[
        "merge-notifications",
        rows.path().to_str().unwrap(),
        "--timestamp-policy",
        "reject",
    ]);

    assert!(!ok);
    assert!(stderr.contains("last tuesday"), "stderr: {}", stderr);
}

#[test]
fn test_topic_cost_uses_system_config() {
    let remote = write_temp_file(r#"{"configs": {"exposure_costs": {"high": 250}}}"#);
    let (ok, json, stderr) = run(&[
        "--system-config",
        remote.path().to_str().unwrap(),
        "topic-cost",
        "--exposure-level",
        "high",
        "--duration-days",
        "4",
        "--daily-discount",
        "11",
    ]);

    assert!(ok, "stderr: {}", stderr);
    assert_eq!(json["exposure_cost"], 250);
    assert_eq!(json["duration_cost"], 1);
    assert_eq!(json["discount_applied"], 11);
    assert_eq!(json["total_cost"], 240);
}
