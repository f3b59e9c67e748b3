//! "5 minutes ago" / "3 days left" labels.
//!
//! Text comes from the UI text table through a lookup callback taking the
//! text key and a fallback; `{{count}}` in the result is replaced.

use chrono::{DateTime, Utc};

const COUNT_PLACEHOLDER: &str = "{{count}}";

/// Lookup that always returns the fallback.
pub fn default_text(_key: &str, fallback: &str) -> String {
    fallback.to_string()
}

enum Bucket {
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

/// Buckets a positive duration of at least one minute.
fn bucket(minutes: i64) -> Bucket {
    if minutes < 60 {
        return Bucket::Minutes(minutes.max(1));
    }
    let hours = minutes / 60;
    if hours < 24 {
        return Bucket::Hours(hours.max(1));
    }
    Bucket::Days((hours / 24).max(1))
}

fn with_count(template: String, count: i64) -> String {
    template.replace(COUNT_PLACEHOLDER, &count.to_string())
}

pub fn format_relative_time<F>(date: DateTime<Utc>, now: DateTime<Utc>, lookup: F) -> String
where
    F: Fn(&str, &str) -> String,
{
    let diff = now - date;
    // Future timestamps (clock skew) read as "just now" too.
    if diff.num_milliseconds() < 0 || diff.num_minutes() < 1 {
        return lookup("common.time.justNow", "just now");
    }

    match bucket(diff.num_minutes()) {
        Bucket::Minutes(n) => with_count(
            lookup("common.time.minutesAgo", "about {{count}} minutes ago"),
            n,
        ),
        Bucket::Hours(n) => with_count(
            lookup("common.time.hoursAgo", "about {{count}} hours ago"),
            n,
        ),
        Bucket::Days(n) => with_count(lookup("common.time.daysAgo", "{{count}} days ago"), n),
    }
}

pub fn format_remaining_time<F>(deadline: DateTime<Utc>, now: DateTime<Utc>, lookup: F) -> String
where
    F: Fn(&str, &str) -> String,
{
    let diff = deadline - now;
    if diff.num_milliseconds() <= 0 {
        return lookup("common.time.expired", "ended");
    }
    if diff.num_minutes() < 1 {
        return lookup("common.time.remainingSoon", "ending soon");
    }

    match bucket(diff.num_minutes()) {
        Bucket::Minutes(n) => with_count(
            lookup("common.time.remainingMinutes", "{{count}} minutes left"),
            n,
        ),
        Bucket::Hours(n) => with_count(
            lookup("common.time.remainingHours", "{{count}} hours left"),
            n,
        ),
        Bucket::Days(n) => with_count(
            lookup("common.time.remainingDays", "{{count}} days left"),
            n,
        ),
    }
}
