//! Calendar-day intervals and week windows.
//!
//! # Time Model
//! All scheduling math runs on calendar days (`chrono::NaiveDate`).
//! Timestamps with a time-of-day component are truncated to their date
//! through [`CalendarDay`] before any comparison, so two values on the
//! same day always compare equal regardless of hour or timezone offset.
//!
//! # Interval Conventions
//! - Schedules are *inclusive* day ranges: a schedule from 01-01 to 01-31
//!   occupies both the first and the last day.
//! - Day counts are `end - start`,
//!   so the same schedule spans 30 days.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

/// Anything that can be pinned to a calendar day.
///
/// Implemented for dates, naive timestamps and zoned timestamps. Zoned
/// values use their local date, never the UTC date.
pub trait CalendarDay {
    /// The calendar day this value falls on.
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    #[inline]
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    #[inline]
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    #[inline]
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    #[inline]
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Signed day difference `to - from`.
#[inline]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Adds a (possibly negative) number of days, saturating at chrono's range.
pub fn add_days(day: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| day.checked_add_signed(delta))
        .unwrap_or(if days >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
}

/// A day range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

impl DateInterval {
    /// Creates a new interval. No ordering check is made; see [`is_valid`](Self::is_valid).
    pub fn new(start: impl CalendarDay, end: impl CalendarDay) -> Self {
        Self {
            start: start.calendar_day(),
            end: end.calendar_day(),
        }
    }

    /// Number of days from start to end (`end - start`). Negative if inverted.
    #[inline]
    pub fn days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    /// Whether the interval has no usable length (zero or negative days).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.days() <= 0
    }

    /// Whether `end >= start`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    /// Whether `day` lies within `[start, end]`.
    pub fn contains_day(&self, day: impl CalendarDay) -> bool {
        let day = day.calendar_day();
        day >= self.start && day <= self.end
    }

    /// Whether two inclusive ranges share at least one day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Same interval with a different end day.
    pub fn with_end(self, end: impl CalendarDay) -> Self {
        Self {
            start: self.start,
            end: end.calendar_day(),
        }
    }
}

/// One calendar week, `first..=last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// First day of the week.
    pub first: NaiveDate,
    /// Last day of the week (first + 6).
    pub last: NaiveDate,
}

impl WeekWindow {
    /// The week containing `day`, starting on `week_start`.
    ///
    /// With `Weekday::Sun` this is the Sunday–Saturday window.
    pub fn containing(day: impl CalendarDay, week_start: Weekday) -> Self {
        let day = day.calendar_day();
        let offset = (7 + day.weekday().num_days_from_monday() as i64
            - week_start.num_days_from_monday() as i64)
            % 7;
        let first = add_days(day, -offset);
        Self {
            first,
            last: add_days(first, 6),
        }
    }

    /// The week window as an inclusive interval.
    pub fn as_interval(&self) -> DateInterval {
        DateInterval {
            start: self.first,
            end: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_calendar_day_drops_time() {
        let ts = d(2025, 1, 20).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(ts.calendar_day(), d(2025, 1, 20));

        // 23:30 at -05:00 is already the 21st in UTC; local date wins.
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let zoned = tz
            .from_local_datetime(&d(2025, 1, 20).and_hms_opt(23, 30, 0).unwrap())
            .unwrap();
        assert_eq!(zoned.calendar_day(), d(2025, 1, 20));
    }

    #[test]
    fn test_interval_days() {
        let i = DateInterval::new(d(2025, 1, 1), d(2025, 1, 31));
        assert_eq!(i.days(), 30);
        assert!(!i.is_empty());
        assert!(i.is_valid());

        let zero = DateInterval::new(d(2025, 1, 1), d(2025, 1, 1));
        assert!(zero.is_empty());
        assert!(zero.is_valid());

        let inverted = DateInterval::new(d(2025, 1, 5), d(2025, 1, 1));
        assert_eq!(inverted.days(), -4);
        assert!(!inverted.is_valid());
    }

    #[test]
    fn test_interval_contains_inclusive() {
        let i = DateInterval::new(d(2025, 1, 1), d(2025, 1, 10));
        assert!(i.contains_day(d(2025, 1, 1)));
        assert!(i.contains_day(d(2025, 1, 10)));
        assert!(!i.contains_day(d(2025, 1, 11)));
        assert!(!i.contains_day(d(2024, 12, 31)));
    }

    #[test]
    fn test_interval_overlap() {
        let a = DateInterval::new(d(2025, 1, 1), d(2025, 1, 10));
        let b = DateInterval::new(d(2025, 1, 10), d(2025, 1, 20));
        assert!(a.overlaps(&b)); // share the 10th
        assert!(b.overlaps(&a));

        let c = DateInterval::new(d(2025, 1, 11), d(2025, 1, 20));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_week_window_sunday_start() {
        // 2025-01-22 is a Wednesday.
        let w = WeekWindow::containing(d(2025, 1, 22), Weekday::Sun);
        assert_eq!(w.first, d(2025, 1, 19));
        assert_eq!(w.last, d(2025, 1, 25));

        // A Sunday starts its own week.
        let w = WeekWindow::containing(d(2025, 1, 19), Weekday::Sun);
        assert_eq!(w.first, d(2025, 1, 19));

        // A Saturday closes it.
        let w = WeekWindow::containing(d(2025, 1, 25), Weekday::Sun);
        assert_eq!(w.first, d(2025, 1, 19));
    }

    #[test]
    fn test_week_window_monday_start() {
        let w = WeekWindow::containing(d(2025, 1, 19), Weekday::Mon);
        assert_eq!(w.first, d(2025, 1, 13));
        assert_eq!(w.last, d(2025, 1, 19));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(d(2025, 1, 1), 30), d(2025, 1, 31));
        assert_eq!(add_days(d(2025, 1, 1), -1), d(2024, 12, 31));
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }
}
