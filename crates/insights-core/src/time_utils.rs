use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

// ── Purchase timestamp parsing ────────────────────────────────────────────────

/// Parse a purchase-timestamp string into a UTC [`DateTime`].
///
/// Handles:
/// * RFC 3339 / ISO 8601 with an offset (including the `Z` suffix),
/// * naive datetimes in `%Y-%m-%d %H:%M:%S` form (space- or `T`-separated,
///   optional fractional seconds), interpreted as UTC,
/// * bare `%Y-%m-%d` dates, taken as midnight UTC.
///
/// Only the calendar date feeds the downstream aggregation, so naive
/// values need no offset resolution. Returns `None` for empty strings or
/// unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    // Replace trailing 'Z' with '+00:00' for RFC 3339 compatibility.
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive datetime patterns, most common first.
    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    // Date-only fallback.
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive));
    }

    warn!("parse_timestamp: could not parse timestamp string \"{}\"", s);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_space_separated_datetime() {
        let dt = parse_timestamp("2017-11-01 10:23:45").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2017, 11, 1));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = parse_timestamp("2018-02-28 23:59:59.123").unwrap();
        assert_eq!((dt.year(), dt.month()), (2018, 2));
    }

    #[test]
    fn test_parse_t_separated_datetime() {
        let dt = parse_timestamp("2016-09-04T21:15:19").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2016, 9, 4));
    }

    #[test]
    fn test_parse_rfc3339_with_z_suffix() {
        let dt = parse_timestamp("2017-05-16T13:10:30Z").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2017, 5, 16));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        use chrono::Timelike;
        let dt = parse_timestamp("2017-05-16T13:10:30-03:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (16, 10));
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_timestamp("2016-01-01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2016, 1, 1));
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday-ish").is_none());
        assert!(parse_timestamp("2017-13-40 99:99:99").is_none());
    }
}
