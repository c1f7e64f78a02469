//! Recommended schedule length from labor hours and team capacity.
//!
//! # Model
//!
//! ```text
//! production_hours = total_hours × (production + IT + NTC + QC) / 100
//! weeks            = ceil(production_hours / weekly_capacity)
//! end              = start + weeks × 7 days
//! ```
//!
//! Fabrication and paint are run by a separate line, so their share of
//! the hours never loads the bay team.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::TeamCapacity;
use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarDay, DateInterval, Project};
use crate::timeline::{resolve_weights_with, PhaseWeights, WeightTable};

/// A recommended schedule length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationEstimate {
    /// Whole weeks needed. Zero only when there are no production hours.
    pub weeks: u32,
    /// Hours the bay team must perform.
    pub production_hours: f64,
    /// Planned first day.
    pub start: NaiveDate,
    /// Planned end (`start + weeks × 7`).
    pub end: NaiveDate,
}

impl DurationEstimate {
    /// The estimate as a schedule interval.
    pub fn interval(&self) -> DateInterval {
        DateInterval {
            start: self.start,
            end: self.end,
        }
    }
}

/// Estimates how many weeks the bay team needs.
///
/// # Errors
/// [`EngineError::MissingCapacity`] when `capacity_per_week` is zero,
/// negative or not finite. [`EngineError::InvalidInterval`] when the
/// recommended end falls outside the representable calendar.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use bay_schedule::capacity::estimate_duration;
/// use bay_schedule::timeline::PhaseWeights;
///
/// let weights = PhaseWeights::from_percentages([12.0, 7.0, 60.0, 7.0, 7.0, 7.0]);
/// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
///
/// // 1000h × 81% = 810h at 240h/week → 4 weeks
/// let est = estimate_duration(1000.0, &weights, 240.0, start).unwrap();
/// assert_eq!(est.weeks, 4);
/// assert_eq!(est.end, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
///
/// assert!(estimate_duration(1000.0, &weights, 0.0, start).is_err());
/// ```
pub fn estimate_duration(
    total_hours: f64,
    weights: &PhaseWeights,
    capacity_per_week: f64,
    start: impl CalendarDay,
) -> EngineResult<DurationEstimate> {
    estimate_labeled("team", total_hours, weights, capacity_per_week, start.calendar_day())
}

/// Estimates a project's bay duration for a team.
///
/// Starts on the project's production-start marker when it has one,
/// otherwise on `today`. Missing total hours count as zero.
pub fn estimate_for_project(
    project: &Project,
    team: &TeamCapacity,
    defaults: &WeightTable,
    today: impl CalendarDay,
) -> EngineResult<DurationEstimate> {
    let weights = resolve_weights_with(project, defaults);
    let start = project
        .markers
        .production_start
        .unwrap_or_else(|| today.calendar_day());
    estimate_labeled(
        &team.team,
        project.total_hours.unwrap_or(0.0),
        &weights,
        team.weekly_hours,
        start,
    )
}

fn estimate_labeled(
    label: &str,
    total_hours: f64,
    weights: &PhaseWeights,
    capacity_per_week: f64,
    start: NaiveDate,
) -> EngineResult<DurationEstimate> {
    if !(capacity_per_week.is_finite() && capacity_per_week > 0.0) {
        return Err(EngineError::missing_capacity(label));
    }

    let total_hours = if total_hours.is_finite() && total_hours >= 0.0 {
        total_hours
    } else {
        warn!(total_hours, "unusable total hours, estimating with zero");
        0.0
    };

    let production_hours = total_hours * weights.production_share() / 100.0;
    let needed = if production_hours > 0.0 {
        (production_hours / capacity_per_week).ceil().max(1.0)
    } else {
        0.0
    };
    let Some((weeks, end)) = end_after_weeks(start, needed) else {
        warn!(
            team = label,
            production_hours, capacity_per_week, "estimated end out of calendar range"
        );
        return Err(EngineError::InvalidInterval {
            start,
            end: NaiveDate::MAX,
        });
    };

    debug!(
        team = label,
        production_hours, capacity_per_week, weeks, "duration estimated"
    );

    Ok(DurationEstimate {
        weeks,
        production_hours,
        start,
        end,
    })
}

/// `start + weeks × 7`, or `None` when either does not fit.
fn end_after_weeks(start: NaiveDate, weeks: f64) -> Option<(u32, NaiveDate)> {
    if weeks > f64::from(u32::MAX) {
        return None;
    }
    let weeks = weeks as u32;
    let end = Duration::try_days(i64::from(weeks) * 7)
        .and_then(|span| start.checked_add_signed(span))?;
    Some((weeks, end))
}

/// Whole weeks an existing interval spans (`ceil(days / 7)`).
///
/// # Errors
/// [`EngineError::InvalidInterval`] when the end is before the start.
pub fn scheduled_weeks(interval: DateInterval) -> EngineResult<u32> {
    if !interval.is_valid() {
        return Err(EngineError::InvalidInterval {
            start: interval.start,
            end: interval.end,
        });
    }
    Ok(((interval.days() + 6) / 7) as u32)
}

/// Weekly hours a team needs to finish a project's bay work inside `interval`.
///
/// # Errors
/// [`EngineError::InvalidInterval`] when the interval has no days.
pub fn required_weekly_hours(
    total_hours: f64,
    weights: &PhaseWeights,
    interval: DateInterval,
) -> EngineResult<f64> {
    if interval.is_empty() {
        return Err(EngineError::InvalidInterval {
            start: interval.start,
            end: interval.end,
        });
    }
    let hours = if total_hours.is_finite() {
        total_hours.max(0.0)
    } else {
        0.0
    };
    let production_hours = hours * weights.production_share() / 100.0;
    Ok(production_hours / interval.days() as f64 * 7.0)
}
