use chrono::{SecondsFormat, Utc};

/// Returns an ISO 8601 timestamp with millisecond precision and Z suffix.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
