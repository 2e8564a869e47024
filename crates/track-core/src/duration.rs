//! Duration and timestamp rendering.
//!
//! Elapsed times are rendered as the largest applicable units among hours,
//! minutes and seconds, skipping zero-valued units: `1h 1m 1s`, `1m`, `45s`.
//! Output is never empty; a zero interval renders as `0s`.

use chrono::{DateTime, Duration, Local, Utc};

/// Renders the time elapsed from `start` until `now`.
///
/// A `now` earlier than `start` renders as `0s`.
pub fn format_elapsed(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_seconds((now - start).num_seconds())
}

/// Renders the length of the interval `start..end`.
pub fn format_duration_between(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format_seconds((end - start).num_seconds())
}

/// Renders a whole number of seconds as `{h}h {m}m {s}s`, omitting zero units.
pub fn format_seconds(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{secs}s"));
    }
    parts.join(" ")
}

/// Renders an accumulated total as hours and minutes only.
///
/// Seconds are dropped. Returns `0m` when under a minute.
pub fn format_total(total: Duration) -> String {
    let seconds = total.num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if parts.is_empty() {
        parts.push("0m".to_string());
    }
    parts.join(" ")
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 29, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_format_seconds_zero() {
        assert_eq!(format_seconds(0), "0s");
    }

    #[test]
    fn test_format_seconds_all_units() {
        assert_eq!(format_seconds(3661), "1h 1m 1s");
    }

    #[test]
    fn test_format_seconds_omits_zero_units() {
        assert_eq!(format_seconds(61), "1m 1s");
        assert_eq!(format_seconds(60), "1m");
        assert_eq!(format_seconds(45), "45s");
        assert_eq!(format_seconds(3600), "1h");
        assert_eq!(format_seconds(3605), "1h 5s");
        assert_eq!(format_seconds(7260), "2h 1m");
    }

    #[test]
    fn test_format_seconds_negative_is_zero() {
        assert_eq!(format_seconds(-5), "0s");
    }

    #[test]
    fn test_format_elapsed_floors_partial_seconds() {
        let now = base() + Duration::milliseconds(61_999);
        assert_eq!(format_elapsed(base(), now), "1m 1s");
    }

    #[test]
    fn test_format_elapsed_before_start_is_zero() {
        let now = base() - Duration::seconds(30);
        assert_eq!(format_elapsed(base(), now), "0s");
    }

    #[test]
    fn test_format_duration_between() {
        let end = base() + Duration::seconds(3661);
        assert_eq!(format_duration_between(base(), end), "1h 1m 1s");
        assert_eq!(format_duration_between(base(), base()), "0s");
    }

    #[test]
    fn test_format_total_drops_seconds() {
        assert_eq!(format_total(Duration::seconds(3661)), "1h 1m");
        assert_eq!(format_total(Duration::seconds(59)), "0m");
        assert_eq!(format_total(Duration::zero()), "0m");
        assert_eq!(format_total(Duration::hours(2)), "2h");
        assert_eq!(format_total(Duration::minutes(45)), "45m");
    }

    #[test]
    fn test_format_timestamp_uses_local_time() {
        let local = Local.with_ymd_and_hms(2025, 1, 5, 9, 3, 7).unwrap();
        assert_eq!(format_timestamp(local.with_timezone(&Utc)), "2025-01-05 09:03:07");
    }
}
