//! Small helpers shared across the crate
//!
//! Holds the timestamp source used for every version and file stamp, and the
//! formatting helpers used by console output.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Last nanosecond stamp handed out by [`monotonic_now`]
static LAST_STAMP_NANOS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current time, strictly greater than any stamp previously returned
///
/// Wall-clock reads can repeat within one clock tick or step backwards. Ranking
/// files by recency needs a total order over modifications, so a repeated or
/// earlier reading is bumped to one nanosecond after the last stamp.
pub fn monotonic_now() -> DateTime<Utc> {
    let wall = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX - 1);

    let mut last = LAST_STAMP_NANOS.load(Ordering::Relaxed);
    loop {
        let next = if wall > last { wall } else { last.saturating_add(1) };
        match LAST_STAMP_NANOS.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return Utc.timestamp_nanos(next),
            Err(observed) => last = observed,
        }
    }
}

/// Format a timestamp for console output
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use vertree::utils::format_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
/// assert_eq!(format_timestamp(&ts), "2024-03-01 12:30:05");
/// ```
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten content to a single-line preview of at most `max_chars` characters
///
/// Newlines are shown as `\n`; an ellipsis marks truncation.
pub fn preview(content: &str, max_chars: usize) -> String {
    let flat = content.replace('\n', "\\n");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut out: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
