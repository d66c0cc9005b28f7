use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};

use super::DomainError;

/// Where one calendar day ends and the next begins.
///
/// Timestamps are stored in UTC; "today" and "yesterday" are evaluated in
/// this fixed offset so a check-in at 23:30 local time counts for the local
/// day rather than the UTC one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset: FixedOffset,
}

impl DayBoundary {
    /// Largest offset in use anywhere (UTC+14 / UTC-12, rounded up)
    pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn from_offset_minutes(minutes: i32) -> Result<Self, DomainError> {
        if minutes.abs() > Self::MAX_OFFSET_MINUTES {
            return Err(DomainError::Validation(format!(
                "UTC offset must be within ±{} minutes, got {}",
                Self::MAX_OFFSET_MINUTES,
                minutes
            )));
        }

        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(|| DomainError::Validation(format!("Invalid UTC offset: {minutes}")))
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Calendar date of `instant` on this boundary
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    pub fn is_same_day(&self, earlier: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.date_of(earlier) == self.date_of(now)
    }

    /// True when `earlier` falls on the calendar day right before `now`'s
    pub fn is_previous_day(&self, earlier: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.date_of(earlier) + Duration::days(1) == self.date_of(now)
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_previous_day_across_midnight() {
        let boundary = DayBoundary::utc();
        let late = Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 3, 2, 0, 1, 0).unwrap();

        assert!(boundary.is_previous_day(late, early));
        assert!(!boundary.is_same_day(late, early));
    }

    #[test]
    fn test_offset_moves_the_day_boundary() {
        // UTC+9: 15:30 UTC is already the next local day
        let seoul = DayBoundary::from_offset_minutes(9 * 60).unwrap();
        let a = Utc.with_ymd_and_hms(2025, 3, 1, 14, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 3, 1, 15, 30, 0).unwrap();

        assert!(seoul.is_previous_day(a, b));
        assert!(DayBoundary::utc().is_same_day(a, b));
    }

    #[test]
    fn test_two_days_apart_is_not_previous_day() {
        let boundary = DayBoundary::utc();
        let a = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap();

        assert!(!boundary.is_previous_day(a, b));
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        assert!(DayBoundary::from_offset_minutes(15 * 60).is_err());
        assert_eq!(
            DayBoundary::from_offset_minutes(-300).unwrap().offset_minutes(),
            -300
        );
    }
}
