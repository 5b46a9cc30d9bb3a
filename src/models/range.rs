//! Query date ranges
//!
//! A `DateRange` is an inclusive `[from, to]` pair of UTC timestamps. The
//! constructor rejects `from > to`, so every range handed to the engine is
//! well formed.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

use crate::error::{SpendError, SpendResult};

/// Length of the rolling week used by the weekly limit
pub const ROLLING_WEEK_DAYS: i64 = 7;

/// Inclusive UTC time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl DateRange {
    /// Create a range, failing with `InvalidRange` if `from` is after `to`.
    ///
    /// `to` must also leave room for a full trailing week before it, so
    /// [`trailing_week`](Self::trailing_week) is always representable.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> SpendResult<Self> {
        if from > to {
            return Err(SpendError::InvalidRange { from, to });
        }
        if week_start(to).is_none() {
            return Err(SpendError::Validation(format!(
                "Range end {} is too early: the {}-day window before it is not representable",
                to, ROLLING_WEEK_DAYS
            )));
        }
        Ok(Self { from, to })
    }

    /// Parse both ends with [`parse_timestamp`] and validate ordering
    pub fn parse(from: &str, to: &str) -> SpendResult<Self> {
        Self::new(parse_timestamp(from)?, parse_timestamp(to)?)
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Check whether a timestamp falls inside the range (both ends inclusive)
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.from && timestamp <= self.to
    }

    /// Whole days between the ends, partial days truncated
    pub fn whole_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Divisor for per-day averages; never below one
    pub fn day_divisor(&self) -> i64 {
        self.whole_days().max(1)
    }

    /// The seven days ending at `to`, regardless of where `from` is
    pub fn trailing_week(&self) -> Self {
        Self {
            from: week_start(self.to).unwrap_or(DateTime::<Utc>::MIN_UTC),
            to: self.to,
        }
    }

    /// Calendar dates of both ends
    pub fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.from.date_naive(), self.to.date_naive())
    }
}

fn week_start(to: DateTime<Utc>) -> Option<DateTime<Utc>> {
    to.checked_sub_signed(Duration::days(ROLLING_WEEK_DAYS))
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.from.format("%Y-%m-%d %H:%M:%S"),
            self.to.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Parse an ISO-8601 timestamp as UTC.
///
/// Accepts RFC 3339 with an offset, a naive date-time
/// (`2025-01-31T12:00:00`, `2025-01-31 12:00:00.250`) or a bare date
/// (`2025-01-31`, midnight). Naive values are read as UTC.
pub fn parse_timestamp(input: &str) -> SpendResult<DateTime<Utc>> {
    let s = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(SpendError::Validation(format!(
        "Invalid timestamp '{}'. Use ISO format, e.g. 2025-01-31 or 2025-01-31T12:00:00",
        input
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_reversed_range() {
        let err = DateRange::new(at(5, 0), at(1, 0)).unwrap_err();
        assert!(err.is_invalid_range());
    }

    #[test]
    fn test_zero_length_range_has_divisor_one() {
        let range = DateRange::new(at(5, 0), at(5, 0)).unwrap();
        assert_eq!(range.whole_days(), 0);
        assert_eq!(range.day_divisor(), 1);
    }

    #[test]
    fn test_partial_days_are_truncated() {
        let range = DateRange::new(at(1, 0), at(3, 23)).unwrap();
        assert_eq!(range.whole_days(), 2);
        assert_eq!(range.day_divisor(), 2);

        let short = DateRange::new(at(1, 0), at(1, 23)).unwrap();
        assert_eq!(short.day_divisor(), 1);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();
        assert!(range.contains(at(1, 0)));
        assert!(range.contains(at(2, 0)));
        assert!(!range.contains(at(2, 1)));
    }

    #[test]
    fn test_trailing_week_anchors_at_to() {
        let range = DateRange::new(at(1, 0), at(20, 12)).unwrap();
        let week = range.trailing_week();
        assert_eq!(week.from(), at(13, 12));
        assert_eq!(week.to(), at(20, 12));

        // Extends before `from` for short ranges
        let short = DateRange::new(at(19, 0), at(20, 0)).unwrap();
        assert_eq!(short.trailing_week().from(), at(13, 0));
    }

    #[test]
    fn test_range_end_near_minimum_date_is_rejected() {
        let earliest = parse_timestamp("-262143-01-02").unwrap();
        let err = DateRange::new(earliest, earliest).unwrap_err();
        assert!(matches!(err, SpendError::Validation(_)));
        assert!(DateRange::parse("-262143-01-02", "-262143-01-02").is_err());

        let later = earliest + Duration::days(30);
        let range = DateRange::new(earliest, later).unwrap();
        assert_eq!(range.trailing_week().from(), later - Duration::days(7));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("2025-01-02").unwrap(), at(2, 0));
        assert_eq!(parse_timestamp("2025-01-02T05:00:00").unwrap(), at(2, 5));
        assert_eq!(parse_timestamp("2025-01-02 05:00:00").unwrap(), at(2, 5));
        assert_eq!(parse_timestamp("2025-01-02T07:00:00+02:00").unwrap(), at(2, 5));
        assert_eq!(parse_timestamp("2025-01-02T05:00:00Z").unwrap(), at(2, 5));
        assert!(parse_timestamp("02/01/2025").is_err());
    }

    #[test]
    fn test_parse_range() {
        let range = DateRange::parse("2025-01-01", "2025-01-03").unwrap();
        assert_eq!(range.whole_days(), 2);
        assert!(DateRange::parse("2025-01-03", "2025-01-01").unwrap_err().is_invalid_range());
    }
}
