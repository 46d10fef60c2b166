//! Human-readable rendering helpers.

use std::time::{SystemTime, UNIX_EPOCH};

const BYTE_UNITS: [&str; 6] = ["b", "KB", "MB", "GB", "TB", "PB"];

/// Render a byte count with base-1024 units and two decimals.
///
/// The unit is `floor(log1024(bytes))`, capped at petabytes. Zero and
/// negative counts render as `"0"`.
pub fn readable_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0".to_string();
    }
    let mut exponent = 0;
    let mut threshold: i64 = 1024;
    while exponent < BYTE_UNITS.len() - 1 && bytes >= threshold {
        exponent += 1;
        threshold = match threshold.checked_mul(1024) {
            Some(next) => next,
            None => break,
        };
    }
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{:.2}{}", scaled, BYTE_UNITS[exponent])
}

/// Unsigned convenience wrapper around [`readable_bytes`].
pub fn readable_bytes_u64(bytes: u64) -> String {
    readable_bytes(i64::try_from(bytes).unwrap_or(i64::MAX))
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Format an epoch timestamp (milliseconds) as `hh:mm:ss` UTC.
pub fn time_string(epoch_millis: u64) -> String {
    let secs_of_day = (epoch_millis / 1000) % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60
    )
}
