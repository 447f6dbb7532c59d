// Local-naive timestamp handling and elapsed-time formatting
//
// Every duration in the crate goes through this module: the per-segment display
// string computed at parse time, the totals used by the aggregator and the
// formatted values reported by the differ.

use chrono::NaiveDateTime;

use crate::parser::ParseError;

/// Timestamp layout used by the itinerary feed, e.g. `2024-06-01T1030`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H%M";

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| {
        ParseError::InvalidTimestamp {
            value: value.to_string(),
        }
    })
}

/// Wall-clock seconds between two naive timestamps. Negative when `arrival`
/// precedes `departure`.
pub fn elapsed_seconds(departure: &NaiveDateTime, arrival: &NaiveDateTime) -> i64 {
    (*arrival - *departure).num_seconds()
}

/// Formats seconds as `"<H>h <M>m"` using floor division, so `-1800` becomes
/// `"-1h 30m"`.
pub fn format_duration(total_seconds: i64) -> String {
    let hours = total_seconds.div_euclid(SECONDS_PER_HOUR);
    let minutes = total_seconds.rem_euclid(SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    format!("{}h {}m", hours, minutes)
}

// Serde adapter keeping timestamps in the feed's own layout when serialized
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("2024-06-01T1030").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2024-06-01 10:30");
    }

    #[test_case("2024-06-01 10:30"; "#1 Separator with colon")]
    #[test_case("2024-06-01T10"; "#2 Minutes missing")]
    #[test_case("2024-13-01T1030"; "#3 Month out of range")]
    #[test_case(""; "#4 Empty")]
    fn test_parse_timestamp_rejects(value: &str) {
        match parse_timestamp(value) {
            Err(ParseError::InvalidTimestamp { value: reported }) => assert_eq!(reported, value),
            other => panic!("Expected InvalidTimestamp, got {:?}", other),
        }
    }

    #[test_case("2024-06-01T1000", "2024-06-01T1230", 9000; "#1 Same day")]
    #[test_case("2024-06-01T2330", "2024-06-02T0115", 6300; "#2 Across midnight")]
    #[test_case("2024-06-01T1000", "2024-06-01T1000", 0; "#3 Zero")]
    #[test_case("2024-06-01T1000", "2024-06-01T0930", -1800; "#4 Arrival before departure")]
    fn test_elapsed_seconds(departure: &str, arrival: &str, expected: i64) {
        let departure = parse_timestamp(departure).unwrap();
        let arrival = parse_timestamp(arrival).unwrap();
        assert_eq!(elapsed_seconds(&departure, &arrival), expected);
    }

    #[test_case(0, "0h 0m"; "#1 Zero")]
    #[test_case(9000, "2h 30m"; "#2 Hours and minutes")]
    #[test_case(59, "0h 0m"; "#3 Seconds are dropped")]
    #[test_case(90061, "25h 1m"; "#4 More than a day")]
    #[test_case(-1800, "-1h 30m"; "#5 Negative floors")]
    fn test_format_duration(seconds: i64, expected: &str) {
        assert_eq!(format_duration(seconds), expected);
    }
}
