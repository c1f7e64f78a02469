//! Bay schedule model.
//!
//! A schedule places one project's production run into one bay over an
//! inclusive day range. Upstream CRUD guarantees at most one active
//! schedule per project per bay; this crate only reports violations
//! (see [`crate::aggregation::bay_conflicts`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CalendarDay, DateInterval};

/// A project's placement in a bay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Unique schedule identifier.
    pub id: String,
    /// Scheduled project.
    pub project_id: String,
    /// Bay the project occupies.
    pub bay_id: String,
    /// First scheduled day.
    pub start_date: NaiveDate,
    /// Last scheduled day.
    pub end_date: NaiveDate,
    /// Labor hours booked against this placement.
    #[serde(default)]
    pub total_hours: f64,
}

impl Schedule {
    /// Creates a new schedule.
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        bay_id: impl Into<String>,
        start: impl CalendarDay,
        end: impl CalendarDay,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            bay_id: bay_id.into(),
            start_date: start.calendar_day(),
            end_date: end.calendar_day(),
            total_hours: 0.0,
        }
    }

    /// Sets the booked labor hours.
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.total_hours = hours;
        self
    }

    /// The scheduled day range.
    #[inline]
    pub fn interval(&self) -> DateInterval {
        DateInterval {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Days from start to end (`end - start`).
    #[inline]
    pub fn duration_days(&self) -> i64 {
        self.interval().days()
    }

    /// Approximate labor hours this schedule consumes per week.
    ///
    /// Prorates `total_hours` evenly over the schedule's days. A schedule
    /// whose start equals its end counts as one day. Inverted schedules and
    /// negative or non-finite hours contribute nothing.
    pub fn weekly_hours(&self) -> f64 {
        if !self.interval().is_valid() || !self.total_hours.is_finite() || self.total_hours <= 0.0
        {
            return 0.0;
        }
        let days = self.duration_days().max(1) as f64;
        self.total_hours / days * 7.0
    }
}

/// Schedules placed in a bay.
pub fn schedules_for_bay<'a>(schedules: &'a [Schedule], bay_id: &str) -> Vec<&'a Schedule> {
    schedules.iter().filter(|s| s.bay_id == bay_id).collect()
}

/// Schedules of a project, earliest start first.
pub fn schedules_for_project<'a>(schedules: &'a [Schedule], project_id: &str) -> Vec<&'a Schedule> {
    let mut found: Vec<&Schedule> = schedules
        .iter()
        .filter(|s| s.project_id == project_id)
        .collect();
    found.sort_by_key(|s| (s.start_date, s.end_date));
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_schedules() -> Vec<Schedule> {
        vec![
            Schedule::new("S1", "P1", "B1", d(2025, 1, 1), d(2025, 1, 31)).with_hours(600.0),
            Schedule::new("S2", "P2", "B1", d(2025, 2, 1), d(2025, 2, 28)).with_hours(400.0),
            Schedule::new("S3", "P1", "B2", d(2024, 12, 1), d(2024, 12, 20)),
        ]
    }

    #[test]
    fn test_schedule_interval() {
        let s = &sample_schedules()[0];
        assert_eq!(s.duration_days(), 30);
        assert_eq!(s.interval(), DateInterval::new(d(2025, 1, 1), d(2025, 1, 31)));
    }

    #[test]
    fn test_weekly_hours_prorated() {
        let s = &sample_schedules()[0];
        // 600h over 30 days → 140h/week
        assert!((s.weekly_hours() - 140.0).abs() < 1e-10);
    }

    #[test]
    fn test_weekly_hours_degenerate() {
        let one_day = Schedule::new("S", "P", "B", d(2025, 1, 1), d(2025, 1, 1)).with_hours(10.0);
        assert!((one_day.weekly_hours() - 70.0).abs() < 1e-10);

        let inverted = Schedule::new("S", "P", "B", d(2025, 1, 5), d(2025, 1, 1)).with_hours(10.0);
        assert!((inverted.weekly_hours() - 0.0).abs() < 1e-10);

        let nan = Schedule::new("S", "P", "B", d(2025, 1, 1), d(2025, 1, 8)).with_hours(f64::NAN);
        assert!((nan.weekly_hours() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_schedule_queries() {
        let all = sample_schedules();
        assert_eq!(schedules_for_bay(&all, "B1").len(), 2);
        assert!(schedules_for_bay(&all, "B9").is_empty());

        let p1 = schedules_for_project(&all, "P1");
        assert_eq!(p1.len(), 2);
        assert_eq!(p1[0].id, "S3"); // December first
    }

    #[test]
    fn test_deserialize_schedule() {
        let json = r#"{
            "id": "S1",
            "projectId": "P1",
            "bayId": "B1",
            "startDate": "2025-01-01",
            "endDate": "2025-01-31",
            "totalHours": 600
        }"#;
        let s: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(s.duration_days(), 30);
        assert!((s.total_hours - 600.0).abs() < 1e-10);
    }
}
