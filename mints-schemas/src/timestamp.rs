//! Timestamp text format shared by records and the climate store

use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serializer};

use crate::RecordError;

/// Format used when writing timestamps (six-digit fraction)
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Accepted input formats; the fraction is optional
const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a record timestamp, truncating to microseconds
pub fn parse(text: &str) -> Result<NaiveDateTime, RecordError> {
    let text = text.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|ts| ts.trunc_subsecs(6))
        .ok_or_else(|| RecordError::InvalidTimestamp(text.to_string()))
}

/// Render a timestamp in [`FORMAT`]
pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(FORMAT).to_string()
}

/// Seconds from `earlier` to `later`; negative when `earlier` is in the future
pub fn seconds_between(earlier: &NaiveDateTime, later: &NaiveDateTime) -> f64 {
    let delta = *later - *earlier;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_seconds() as f64,
    }
}

/// `#[serde(with = "timestamp")]` support
pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

/// `#[serde(with = "timestamp")]` support
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[test]
    fn formats_six_digit_fraction() {
        let ts = parse("2024-05-01 12:00:00").unwrap();
        assert_eq!(format(&ts), "2024-05-01 12:00:00.000000");
    }

    #[test]
    fn round_trips_microseconds() {
        let text = "2024-05-01 12:34:56.123456";
        assert_eq!(format(&parse(text).unwrap()), text);
    }

    #[test]
    fn truncates_nanoseconds() {
        let ts = parse("2024-05-01T12:34:56.123456789").unwrap();
        assert_eq!(format(&ts), "2024-05-01 12:34:56.123456");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse("yesterday"), Err(RecordError::InvalidTimestamp(_))));
    }

    #[test]
    fn age_in_seconds() {
        let climate = parse("2024-05-01 12:00:00").unwrap();
        let pm = parse("2024-05-01 12:04:59.5").unwrap();
        assert_eq!(seconds_between(&climate, &pm), 299.5);
        assert_eq!(seconds_between(&pm, &climate), -299.5);
    }

    proptest! {
        #[test]
        fn microsecond_timestamps_survive_text(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
            micro in 0u32..1_000_000,
        ) {
            let ts = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_micro_opt(hour, minute, second, micro))
                .unwrap();
            let text = format(&ts);
            prop_assert_eq!(parse(&text).unwrap(), ts);
            prop_assert_eq!(parse(&text.replacen(' ', "T", 1)).unwrap(), ts);
        }

        #[test]
        fn age_is_antisymmetric(offset_us in -1_000_000_000i64..1_000_000_000) {
            let base = parse("2024-05-01 12:00:00").unwrap();
            let other = base + chrono::Duration::microseconds(offset_us);
            prop_assert_eq!(seconds_between(&base, &other), offset_us as f64 / 1e6);
            prop_assert_eq!(seconds_between(&other, &base), -(offset_us as f64) / 1e6);
        }
    }
}
