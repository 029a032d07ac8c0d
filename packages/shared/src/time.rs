use chrono::{DateTime, Local, Utc};

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_local(timestamp_millis: i64) -> DateTime<Local> {
    // Out-of-range values clamp to the epoch.
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .with_timezone(&Local)
}

/// Format a Unix timestamp (milliseconds) as `HH:MM:SS` in server local time
pub fn timestamp_to_local_hms(timestamp_millis: i64) -> String {
    to_local(timestamp_millis).format("%H:%M:%S").to_string()
}

/// Format a Unix timestamp (milliseconds) as RFC 3339 in server local time
pub fn timestamp_to_local_rfc3339(timestamp_millis: i64) -> String {
    to_local(timestamp_millis).to_rfc3339()
}
