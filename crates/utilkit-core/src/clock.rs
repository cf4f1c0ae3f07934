//! Wall-clock helpers.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Compact timestamp layout: `yyyyMMddHHmmss`.
pub const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";

/// Milliseconds since the Unix epoch.
pub fn current_time_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// The current local time as `yyyyMMddHHmmss`.
pub fn timestamp_string() -> String {
    format_timestamp(&Local::now())
}

/// Format any zoned time as `yyyyMMddHHmmss` in its own zone.
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(COMPACT_FORMAT).to_string()
}

/// Format epoch milliseconds as `yyyyMMddHHmmss` in UTC.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn format_millis_utc(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|t| format_timestamp(&t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_timestamp() {
        let t = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_timestamp(&t), "20240307090501");
    }

    #[test]
    fn test_format_uses_own_zone() {
        let zone = FixedOffset::east_opt(8 * 3600).unwrap();
        let t = zone.with_ymd_and_hms(2016, 11, 6, 23, 59, 59).unwrap();
        assert_eq!(format_timestamp(&t), "20161106235959");
    }

    #[test]
    fn test_format_millis_utc() {
        assert_eq!(format_millis_utc(0).as_deref(), Some("19700101000000"));
        assert_eq!(format_millis_utc(1_000).as_deref(), Some("19700101000001"));
        assert_eq!(format_millis_utc(i64::MAX), None);
    }

    #[test]
    fn test_timestamp_string_shape() {
        let stamp = timestamp_string();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_current_time_millis_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(current_time_millis() > 1_577_836_800_000);
    }
}
