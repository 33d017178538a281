//! Wire format for match timestamps and venue clock times.
//!
//! Match times are venue-local wall-clock values (`NaiveDateTime`). They are
//! written as ISO-8601 `YYYY-MM-DDTHH:MM:SS`. On input, fractional seconds and
//! an RFC 3339 offset (or `Z`) are accepted; the offset is dropped and the
//! wall-clock reading is kept.
//!
//! Venue opening hours are `NaiveTime` values written as `HH:MM`.

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta};

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const CLOCK_FORMAT: &str = "%H:%M";

/// Parses an ISO-8601 timestamp, with or without offset.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Parses a clock time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Formats a timestamp the way it is written on the wire.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// `at + minutes`, or `None` when the result is outside chrono's range.
pub fn add_minutes(at: NaiveDateTime, minutes: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_minutes(minutes).and_then(|delta| at.checked_add_signed(delta))
}

/// `at + minutes`, clamped to the representable range.
pub fn saturating_add_minutes(at: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    add_minutes(at, minutes).unwrap_or(if minutes < 0 {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}

/// `#[serde(with = "timestamp::iso8601")]` for `NaiveDateTime` fields.
pub mod iso8601 {
    use chrono::NaiveDateTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid ISO-8601 timestamp: {raw}")))
    }
}

/// `#[serde(with = "timestamp::clock_time")]` for `NaiveTime` fields.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::CLOCK_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid clock time (expected HH:MM): {raw}")))
    }
}
