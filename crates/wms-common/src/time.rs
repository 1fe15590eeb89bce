//! Time handling utilities for model-run data.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Layout of model-run timestamps served by the advisory layer ("31-12-2024 18:00").
pub const MODEL_RUNTIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Represents a valid time for meteorological data.
///
/// Combines reference time (model run time) and forecast offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidTime {
    /// Model run/reference time
    pub reference_time: DateTime<Tz>,
    /// Forecast hour offset from reference time
    pub forecast_hour: u32,
}

impl ValidTime {
    pub fn new(reference_time: DateTime<Tz>, forecast_hour: u32) -> Self {
        Self {
            reference_time,
            forecast_hour,
        }
    }

    /// Calculate the actual valid time (reference + forecast offset).
    ///
    /// The offset is an absolute duration: across a DST transition the wall
    /// clock moves by one hour more or less than `forecast_hour`.
    pub fn valid_datetime(&self) -> DateTime<Tz> {
        self.reference_time + Duration::hours(self.forecast_hour as i64)
    }
}

/// Parse a wall-clock timestamp and place it in `tz`.
///
/// A time inside the DST fall-back hour resolves to the earlier instant. A
/// time inside the spring-forward gap does not exist and is rejected.
pub fn parse_local(s: &str, format: &str, tz: Tz) -> Result<DateTime<Tz>, TimeParseError> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), format).map_err(|source| {
        TimeParseError::InvalidFormat {
            value: s.to_string(),
            source,
        }
    })?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(TimeParseError::NonexistentLocalTime {
            value: s.to_string(),
            tz: tz.name(),
        }),
    }
}

/// Parse an RFC 3339 timestamp and express it in `tz`.
pub fn parse_rfc3339_in(s: &str, tz: Tz) -> Result<DateTime<Tz>, TimeParseError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&tz))
        .map_err(|source| TimeParseError::InvalidFormat {
            value: s.to_string(),
            source,
        })
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {value}: {source}")]
    InvalidFormat {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Local time {value} does not exist in {tz}")]
    NonexistentLocalTime { value: String, tz: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use chrono_tz::Europe::Amsterdam;

    #[test]
    fn test_parse_model_runtime() {
        let dt = parse_local("15-01-2024 12:00", MODEL_RUNTIME_FORMAT, Amsterdam).unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.to_rfc3339(), "2024-01-15T12:00:00+01:00");
    }

    #[test]
    fn test_parse_summer_time() {
        let dt = parse_local("01-07-2024 06:00", MODEL_RUNTIME_FORMAT, Amsterdam).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-07-01T06:00:00+02:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_local("2024-01-15T12:00", MODEL_RUNTIME_FORMAT, Amsterdam).unwrap_err();
        assert!(matches!(err, TimeParseError::InvalidFormat { .. }));
    }

    #[test]
    fn test_spring_forward_gap_is_rejected() {
        let err = parse_local("31-03-2024 02:30", MODEL_RUNTIME_FORMAT, Amsterdam).unwrap_err();
        assert!(matches!(err, TimeParseError::NonexistentLocalTime { .. }));
    }

    #[test]
    fn test_fall_back_hour_takes_earliest() {
        let dt = parse_local("27-10-2024 02:30", MODEL_RUNTIME_FORMAT, Amsterdam).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-10-27T02:30:00+02:00");
    }

    #[test]
    fn test_valid_time_crosses_dst() {
        let run = parse_local("30-03-2024 18:00", MODEL_RUNTIME_FORMAT, Amsterdam).unwrap();
        let vt = ValidTime::new(run, 12);
        assert_eq!(vt.valid_datetime().to_rfc3339(), "2024-03-31T07:00:00+02:00");
        assert_eq!(ValidTime::new(run, 0).valid_datetime(), run);
    }

    #[test]
    fn test_parse_rfc3339_in() {
        let dt = parse_rfc3339_in("2024-01-01T11:00:00Z", Amsterdam).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T12:00:00+01:00");
    }
}
