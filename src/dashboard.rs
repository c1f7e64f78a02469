//! Configured entry point for dashboard views.
//!
//! [`BayDashboard`] carries an [`EngineConfig`] and exposes the engine's
//! operations with the configured defaults applied. It holds no data; every
//! call takes the current snapshot and an explicit `today`.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::aggregation;
use crate::capacity::{self, DurationEstimate, TeamCapacity, Utilization};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    schedules_for_project, CalendarDay, DateInterval, ManufacturingBay, PhaseStatus, Project,
    Schedule,
};
use crate::timeline::{self, PhaseTimeline, PhaseWeights};

/// Derived view of one project on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project_id: String,
    /// Current phase.
    pub phase: PhaseStatus,
    /// Interval the phase was derived from; `None` in marker mode.
    pub interval: Option<DateInterval>,
    /// Elapsed percent of the effective interval (marker mode: `None`).
    pub progress: Option<f64>,
    /// Projected ship day: ship marker, else the schedule end.
    pub ship_eta: Option<chrono::NaiveDate>,
}

/// Dashboard engine with configured defaults.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use bay_schedule::dashboard::BayDashboard;
/// use bay_schedule::models::{ManufacturingBay, PhaseStatus, Project, Schedule};
///
/// let day = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let dashboard = BayDashboard::default();
///
/// let bays = vec![ManufacturingBay::new("B1").with_team("Team A").with_staff(4, 2).with_hours_per_person(40.0)];
/// let projects = vec![Project::new("P1").with_total_hours(1000.0)];
/// let schedules = vec![Schedule::new("S1", "P1", "B1", day(1, 1), day(1, 31)).with_hours(600.0)];
///
/// let snap = dashboard.project_snapshot(&projects[0], &schedules, day(1, 20));
/// assert_eq!(snap.phase, PhaseStatus::Production);
///
/// let util = dashboard.utilization("Team A", &bays, &schedules, day(1, 20));
/// assert_eq!(util.percent, 58); // 140h of 240h
/// ```
#[derive(Debug, Clone, Default)]
pub struct BayDashboard {
    config: EngineConfig,
}

impl BayDashboard {
    /// Creates a dashboard engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalized weights of a project.
    pub fn resolve_weights(&self, project: &Project) -> PhaseWeights {
        timeline::resolve_weights_with(project, &self.config.default_weights)
    }

    /// Current phase from an interval, or from marker dates when `None`.
    pub fn current_phase(
        &self,
        project: &Project,
        interval: Option<DateInterval>,
        today: impl CalendarDay,
    ) -> PhaseStatus {
        timeline::current_phase_with(project, interval, today, &self.config.default_weights)
    }

    /// Phase partition of a project's effective interval.
    pub fn timeline(&self, project: &Project, interval: DateInterval) -> PhaseTimeline {
        PhaseTimeline::partition(
            timeline::effective_interval(project, interval),
            &self.resolve_weights(project),
        )
    }

    /// The schedule interval a project's phase is read from.
    ///
    /// Prefers the schedule active today, then the next one to start,
    /// then the most recent past one. Inverted schedules are ignored.
    pub fn project_interval(
        &self,
        project: &Project,
        schedules: &[Schedule],
        today: impl CalendarDay,
    ) -> Option<DateInterval> {
        let today = today.calendar_day();
        let own: Vec<&Schedule> = schedules_for_project(schedules, &project.id)
            .into_iter()
            .filter(|s| s.interval().is_valid())
            .collect();

        own.iter()
            .find(|s| s.interval().contains_day(today))
            .or_else(|| own.iter().find(|s| s.start_date > today))
            .or_else(|| own.iter().rev().find(|s| s.end_date < today))
            .map(|s| s.interval())
    }

    /// Phase, progress and ship ETA of a project.
    #[instrument(skip_all, fields(project = %project.id))]
    pub fn project_snapshot(
        &self,
        project: &Project,
        schedules: &[Schedule],
        today: impl CalendarDay,
    ) -> ProjectSnapshot {
        let today = today.calendar_day();
        let interval = self.project_interval(project, schedules, today);
        let phase = self.current_phase(project, interval, today);
        let progress = interval.map(|i| timeline::progress(project, i, today));
        let ship_eta = project
            .markers
            .ship_date
            .or_else(|| interval.map(|i| i.end));

        debug!(%phase, has_interval = interval.is_some(), "project snapshot");

        ProjectSnapshot {
            project_id: project.id.clone(),
            phase,
            interval,
            progress,
            ship_eta,
        }
    }

    /// Snapshots of every open project.
    pub fn project_snapshots(
        &self,
        projects: &[Project],
        schedules: &[Schedule],
        today: impl CalendarDay,
    ) -> Vec<ProjectSnapshot> {
        let today = today.calendar_day();
        projects
            .iter()
            .filter(|p| !p.is_closed())
            .map(|p| self.project_snapshot(p, schedules, today))
            .collect()
    }

    /// Recommended duration for a fixed weekly capacity.
    pub fn estimate_duration(
        &self,
        total_hours: f64,
        weights: &PhaseWeights,
        capacity_per_week: f64,
        start: impl CalendarDay,
    ) -> EngineResult<DurationEstimate> {
        capacity::estimate_duration(total_hours, weights, capacity_per_week, start)
    }

    /// Recommended duration of a project on a team's bays.
    #[instrument(skip_all, fields(project = %project.id, team = %team))]
    pub fn estimate_for_team(
        &self,
        project: &Project,
        team: &str,
        bays: &[ManufacturingBay],
        today: impl CalendarDay,
    ) -> EngineResult<DurationEstimate> {
        let capacity = TeamCapacity::for_team(team, bays);
        capacity::estimate_for_project(project, &capacity, &self.config.default_weights, today)
    }

    /// Current-week utilization of a team.
    #[instrument(skip_all, fields(team = %team))]
    pub fn utilization(
        &self,
        team: &str,
        bays: &[ManufacturingBay],
        schedules: &[Schedule],
        today: impl CalendarDay,
    ) -> Utilization {
        Utilization::calculate_with(
            team,
            bays,
            schedules,
            today,
            self.config.week_start,
            &self.config.utilization_bands,
        )
    }

    /// Schedules active today or starting within the configured horizon.
    pub fn active_or_upcoming<'a>(
        &self,
        schedules: &'a [Schedule],
        today: impl CalendarDay,
    ) -> Vec<&'a Schedule> {
        aggregation::active_or_upcoming(schedules, today, self.config.upcoming_horizon_days)
    }
}
