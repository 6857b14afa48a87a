use chrono::Utc;

use crate::domain::SessionEntry;

/// Samples older than this are treated as a dropped stream.
pub const LIVENESS_WINDOW_MS: i64 = 1200;

pub fn is_connected(entry: Option<&SessionEntry>, now_ms: i64) -> bool {
    entry.is_some_and(|entry| now_ms.saturating_sub(entry.arrived_at_ms) < LIVENESS_WINDOW_MS)
}

pub fn is_connected_now(entry: Option<&SessionEntry>) -> bool {
    is_connected(entry, Utc::now().timestamp_millis())
}

#[cfg(test)]
#[path = "tests/liveness_tests.rs"]
mod tests;
