use chrono::{Duration, NaiveDateTime};

use super::constants::{COLONY_EPOCH, TIMESTAMP_FORMAT};

/// Wall time on the colony calendar for a scheduler time in milliseconds.
pub fn colony_time(elapsed_ms: u64) -> NaiveDateTime {
    let epoch = NaiveDateTime::parse_from_str(COLONY_EPOCH, TIMESTAMP_FORMAT)
        .unwrap_or_default();
    epoch + Duration::milliseconds(elapsed_ms as i64)
}

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Milliseconds since the Unix epoch, used to derive mission ids.
pub fn epoch_millis(time: &NaiveDateTime) -> i64 {
    time.and_utc().timestamp_millis()
}
