//! # Day Boundaries
//!
//! Helpers for building date-range query bounds ("today's transactions").

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

/// The first instant of the given value's day (00:00:00.000).
pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// The last representable millisecond of the given value's day
/// (23:59:59.999), for inclusive upper bounds.
pub fn end_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(at) + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_boundaries() {
        let at = DateTime::parse_from_rfc3339("2024-03-05T14:30:45.123Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(start_of_day(at).to_rfc3339(), "2024-03-05T00:00:00+00:00");
        assert_eq!(
            end_of_day(at).to_rfc3339(),
            "2024-03-05T23:59:59.999+00:00"
        );
    }

    #[test]
    fn test_boundaries_are_idempotent_within_a_day() {
        let at = DateTime::parse_from_rfc3339("2024-03-05T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(start_of_day(at), at);
        assert_eq!(start_of_day(end_of_day(at)), at);
    }
}
