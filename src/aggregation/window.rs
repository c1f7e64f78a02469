//! Active and upcoming schedule selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{add_days, CalendarDay, Schedule};

/// Where a schedule sits relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleWindow {
    /// `start <= today <= end`.
    Active,
    /// `today < start <= today + horizon`.
    StartingSoon,
    /// Starts after the horizon.
    Future,
    /// Ended before today.
    Completed,
}

/// Classifies a schedule against `today` and a look-ahead horizon.
///
/// Both sides are compared as calendar days. An inverted schedule
/// (end before start) is never active; before its start it classifies
/// by start date alone; callers selecting work should skip it.
pub fn classify(schedule: &Schedule, today: impl CalendarDay, horizon_days: u32) -> ScheduleWindow {
    classify_day(schedule, today.calendar_day(), horizon_days)
}

fn classify_day(schedule: &Schedule, today: NaiveDate, horizon_days: u32) -> ScheduleWindow {
    let horizon_end = add_days(today, i64::from(horizon_days));
    if schedule.start_date > today {
        if schedule.start_date <= horizon_end {
            ScheduleWindow::StartingSoon
        } else {
            ScheduleWindow::Future
        }
    } else if schedule.end_date >= today {
        ScheduleWindow::Active
    } else {
        ScheduleWindow::Completed
    }
}

/// Schedules active today or starting within `horizon_days`, in input order.
///
/// Inverted schedules are skipped.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use bay_schedule::aggregation::active_or_upcoming;
/// use bay_schedule::models::Schedule;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
/// let schedules = vec![
///     Schedule::new("S1", "P1", "B1", day(1), day(10)),
///     Schedule::new("S2", "P2", "B1", day(14), day(20)),
///     Schedule::new("S3", "P3", "B2", day(25), day(30)),
/// ];
///
/// let hits = active_or_upcoming(&schedules, day(8), 7);
/// let ids: Vec<&str> = hits.iter().map(|s| s.id.as_str()).collect();
/// assert_eq!(ids, ["S1", "S2"]);
/// ```
pub fn active_or_upcoming<'a>(
    schedules: &'a [Schedule],
    today: impl CalendarDay,
    horizon_days: u32,
) -> Vec<&'a Schedule> {
    let today = today.calendar_day();
    schedules
        .iter()
        .filter(|s| s.interval().is_valid())
        .filter(|s| {
            matches!(
                classify_day(s, today, horizon_days),
                ScheduleWindow::Active | ScheduleWindow::StartingSoon
            )
        })
        .collect()
}

/// Schedules active on `today`.
pub fn active_on<'a>(schedules: &'a [Schedule], today: impl CalendarDay) -> Vec<&'a Schedule> {
    let today = today.calendar_day();
    schedules
        .iter()
        .filter(|s| s.interval().is_valid())
        .filter(|s| classify_day(s, today, 0) == ScheduleWindow::Active)
        .collect()
}
