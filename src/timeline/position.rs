//! Current-phase derivation.
//!
//! Two modes:
//!
//! - **Interval mode** (a bay schedule is known): the project's position
//!   within `[start, effective_end)` is mapped onto the weighted phase
//!   partition. `effective_end` is the ship date when set, else the
//!   schedule end.
//! - **Marker mode** (no schedule): the latest phase marker on or before
//!   today wins.
//!
//! Both are pure in `today`; nothing reads the system clock.

use chrono::NaiveDate;
use tracing::warn;

use super::{resolve_weights_with, PhaseTimeline, PhaseWeights, WeightTable};
use crate::models::{days_between, CalendarDay, DateInterval, Phase, PhaseStatus, Project};

/// Phase of `project` on `today`, with the built-in weight defaults.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use bay_schedule::models::{DateInterval, PhaseStatus, Project};
/// use bay_schedule::timeline::current_phase;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
/// let interval = DateInterval::new(day(1), day(31));
/// let project = Project::new("P1");
///
/// assert_eq!(current_phase(&project, Some(interval), day(1)), PhaseStatus::Fabrication);
/// assert_eq!(current_phase(&project, Some(interval), day(20)), PhaseStatus::Production);
/// assert_eq!(current_phase(&project, Some(interval), day(31)), PhaseStatus::Shipped);
/// ```
pub fn current_phase(
    project: &Project,
    interval: Option<DateInterval>,
    today: impl CalendarDay,
) -> PhaseStatus {
    current_phase_with(project, interval, today, &WeightTable::default())
}

/// Phase of `project` on `today`, with a configured default weight table.
pub fn current_phase_with(
    project: &Project,
    interval: Option<DateInterval>,
    today: impl CalendarDay,
    defaults: &WeightTable,
) -> PhaseStatus {
    let today = today.calendar_day();
    match interval {
        Some(interval) => {
            let weights = resolve_weights_with(project, defaults);
            interval_phase(project, interval, &weights, today)
        }
        None => marker_phase(project, today),
    }
}

/// Interval-mode derivation with explicit weights.
pub fn interval_phase(
    project: &Project,
    interval: DateInterval,
    weights: &PhaseWeights,
    today: impl CalendarDay,
) -> PhaseStatus {
    let today = today.calendar_day();
    if today < interval.start {
        return PhaseStatus::NotStarted;
    }

    let effective = effective_interval(project, interval);
    if today >= effective.end {
        return PhaseStatus::Shipped;
    }

    let timeline = PhaseTimeline::partition(effective, weights);
    let elapsed = days_between(effective.start, today);
    match timeline.phase_at_offset(elapsed) {
        Some(phase) => phase.into(),
        // Unreachable for start <= today < end: the last span ends on `end`.
        None => PhaseStatus::Shipped,
    }
}

/// Schedule interval with the ship date, when set, replacing the end.
pub fn effective_interval(project: &Project, interval: DateInterval) -> DateInterval {
    match project.markers.ship_date {
        Some(ship) => interval.with_end(ship),
        None => interval,
    }
}

/// Marker-mode derivation.
///
/// Walks markers from latest to earliest (ship, executive review, QC, NTC,
/// IT, production, paint, fabrication) and returns the first one on or
/// before `today`. A marker dated before an earlier phase's marker breaks
/// the expected order and is treated as not yet reached.
pub fn marker_phase(project: &Project, today: impl CalendarDay) -> PhaseStatus {
    let today = today.calendar_day();
    let markers = &project.markers;

    let ordered: [(PhaseStatus, Option<NaiveDate>); 8] = [
        (PhaseStatus::Fabrication, markers.fabrication_start),
        (PhaseStatus::Paint, markers.paint_start),
        (PhaseStatus::Production, markers.production_start),
        (PhaseStatus::ItIntegration, markers.it_start),
        (PhaseStatus::NtcTesting, markers.ntc_testing_date),
        (PhaseStatus::Qc, markers.qc_start_date),
        (PhaseStatus::ExecutiveReview, markers.executive_review_date),
        (PhaseStatus::Shipped, markers.ship_date),
    ];

    // Keep only markers that respect the order of the ones before them.
    let mut latest_seen: Option<NaiveDate> = None;
    let mut in_order: Vec<(PhaseStatus, NaiveDate)> = Vec::with_capacity(ordered.len());
    for (status, date) in ordered {
        let Some(date) = date else { continue };
        if latest_seen.is_some_and(|prev| date < prev) {
            warn!(
                project = %project.id,
                phase = %status,
                %date,
                "phase marker out of order, treating as not reached"
            );
            continue;
        }
        latest_seen = Some(date);
        in_order.push((status, date));
    }

    in_order
        .iter()
        .rev()
        .find(|(_, date)| *date <= today)
        .map(|(status, _)| *status)
        .unwrap_or(PhaseStatus::NotStarted)
}

/// Elapsed share of the effective interval, 0–100.
///
/// 0 before the start, 100 on or after the effective end (including
/// zero-length intervals).
pub fn progress(project: &Project, interval: DateInterval, today: impl CalendarDay) -> f64 {
    let today = today.calendar_day();
    let effective = effective_interval(project, interval);
    if today < effective.start {
        return 0.0;
    }
    if today >= effective.end {
        return 100.0;
    }
    let elapsed = days_between(effective.start, today) as f64;
    (elapsed / effective.days() as f64 * 100.0).clamp(0.0, 100.0)
}

/// First day of a production phase in interval mode, if the phase has any days.
pub fn projected_phase_start(
    project: &Project,
    interval: DateInterval,
    weights: &PhaseWeights,
    phase: Phase,
) -> Option<NaiveDate> {
    let timeline = PhaseTimeline::partition(effective_interval(project, interval), weights);
    let span = timeline.span(phase);
    (!span.is_empty()).then_some(span.start)
}
