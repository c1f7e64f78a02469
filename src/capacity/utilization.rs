//! Current-week bay utilization.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weekly capacity | team staff × hours per person per week |
//! | Weekly load | Σ schedule.total_hours / schedule_days × 7, over schedules touching this week |
//! | Percent | min(100, round(load / capacity × 100)); 0 when capacity is 0 |
//!
//! The load is a prorating approximation: each schedule's hours are spread
//! evenly over its days, not allocated day by day.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::TeamCapacity;
use crate::models::{CalendarDay, ManufacturingBay, Schedule, WeekWindow};
use chrono::Weekday;

/// Utilization status band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UtilizationStatus {
    /// At or below the "good" threshold.
    Available,
    /// Above "good", at or below "high".
    GoodUtilization,
    /// Above "high", at or below "over".
    HighUtilization,
    /// Above "over".
    OverCapacity,
}

impl UtilizationStatus {
    /// Classifies a percentage against the given bands.
    pub fn from_percent(percent: u32, bands: &UtilizationBands) -> Self {
        let p = f64::from(percent);
        if p > bands.over {
            UtilizationStatus::OverCapacity
        } else if p > bands.high {
            UtilizationStatus::HighUtilization
        } else if p > bands.good {
            UtilizationStatus::GoodUtilization
        } else {
            UtilizationStatus::Available
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            UtilizationStatus::Available => "Available",
            UtilizationStatus::GoodUtilization => "Good Utilization",
            UtilizationStatus::HighUtilization => "High Utilization",
            UtilizationStatus::OverCapacity => "Over Capacity",
        }
    }
}

impl fmt::Display for UtilizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exclusive lower thresholds of the status bands, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilizationBands {
    /// Above this: over capacity.
    pub over: f64,
    /// Above this: high utilization.
    pub high: f64,
    /// Above this: good utilization.
    pub good: f64,
}

impl Default for UtilizationBands {
    fn default() -> Self {
        Self {
            over: 90.0,
            high: 75.0,
            good: 40.0,
        }
    }
}

impl UtilizationBands {
    /// Whether the thresholds descend strictly within 0–100.
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        in_range(self.over)
            && in_range(self.high)
            && in_range(self.good)
            && self.over > self.high
            && self.high > self.good
    }
}

/// Utilization of a team (or bay) for the week containing a reference day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    /// Rounded percentage, capped at 100.
    pub percent: u32,
    /// Status band.
    pub status: UtilizationStatus,
    /// Prorated hours of schedules touching the week.
    pub scheduled_weekly_hours: f64,
    /// Theoretical weekly hours.
    pub weekly_capacity: f64,
    /// Week measured.
    pub week: WeekWindow,
    /// Schedules that touched the week.
    pub schedule_count: usize,
}

impl Utilization {
    /// Computes a team's utilization for the Sunday–Saturday week
    /// containing `today`, with the default bands.
    ///
    /// Only schedules placed on the team's bays count.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use bay_schedule::capacity::{Utilization, UtilizationStatus};
    /// use bay_schedule::models::{ManufacturingBay, Schedule};
    ///
    /// let day = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
    /// let bays = vec![ManufacturingBay::new("B1")
    ///     .with_team("Team A")
    ///     .with_staff(4, 2)
    ///     .with_hours_per_person(40.0)];
    /// // 480h over 28 days → 120h/week against 240h capacity
    /// let schedules = vec![Schedule::new("S1", "P1", "B1", day(1, 1), day(1, 29)).with_hours(480.0)];
    ///
    /// let u = Utilization::calculate("Team A", &bays, &schedules, day(1, 15));
    /// assert_eq!(u.percent, 50);
    /// assert_eq!(u.status, UtilizationStatus::GoodUtilization);
    /// ```
    pub fn calculate(
        team: &str,
        bays: &[ManufacturingBay],
        schedules: &[Schedule],
        today: impl CalendarDay,
    ) -> Self {
        Self::calculate_with(
            team,
            bays,
            schedules,
            today,
            Weekday::Sun,
            &UtilizationBands::default(),
        )
    }

    /// Team utilization with an explicit week start and bands.
    pub fn calculate_with(
        team: &str,
        bays: &[ManufacturingBay],
        schedules: &[Schedule],
        today: impl CalendarDay,
        week_start: Weekday,
        bands: &UtilizationBands,
    ) -> Self {
        let capacity = TeamCapacity::for_team(team, bays);
        let team_schedules = schedules
            .iter()
            .filter(|s| bays.iter().any(|b| b.belongs_to(team) && b.id == s.bay_id));
        let result = Self::measure(
            capacity.weekly_hours,
            team_schedules,
            WeekWindow::containing(today, week_start),
            bands,
        );
        debug!(
            team,
            percent = result.percent,
            status = %result.status,
            "team utilization"
        );
        result
    }

    /// Utilization of a single bay for the week containing `today`.
    pub fn for_bay(
        bay: &ManufacturingBay,
        schedules: &[Schedule],
        today: impl CalendarDay,
        week_start: Weekday,
        bands: &UtilizationBands,
    ) -> Self {
        Self::measure(
            bay.weekly_hours(),
            schedules.iter().filter(|s| s.bay_id == bay.id),
            WeekWindow::containing(today, week_start),
            bands,
        )
    }

    fn measure<'a>(
        weekly_capacity: f64,
        schedules: impl Iterator<Item = &'a Schedule>,
        week: WeekWindow,
        bands: &UtilizationBands,
    ) -> Self {
        let window = week.as_interval();
        let mut load = 0.0;
        let mut count = 0;
        for s in schedules.filter(|s| s.interval().is_valid() && s.interval().overlaps(&window)) {
            load += s.weekly_hours();
            count += 1;
        }

        let percent = if weekly_capacity > 0.0 {
            (load / weekly_capacity * 100.0).round().clamp(0.0, 100.0) as u32
        } else {
            0
        };

        Self {
            percent,
            status: UtilizationStatus::from_percent(percent, bands),
            scheduled_weekly_hours: load,
            weekly_capacity,
            week,
            schedule_count: count,
        }
    }

    /// Weekly hours still free (never negative).
    pub fn free_weekly_hours(&self) -> f64 {
        (self.weekly_capacity - self.scheduled_weekly_hours).max(0.0)
    }
}
