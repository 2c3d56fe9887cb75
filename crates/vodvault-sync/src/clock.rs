//! Logical clock value generation.

use chrono::Utc;

/// Compute the next clock value: wall-clock milliseconds, bumped past the
/// cached value when the backing clock has not advanced beyond it. The
/// result always compares strictly greater than `cached` for the numeric
/// values this engine writes; foreign non-numeric values fall back to the
/// current timestamp.
pub(crate) fn next_clock_value(cached: Option<&str>) -> String {
    let now = Utc::now().timestamp_millis();
    let floor = cached
        .and_then(|v| v.parse::<i64>().ok())
        .map(|v| v + 1)
        .unwrap_or(i64::MIN);
    now.max(floor).to_string()
}
