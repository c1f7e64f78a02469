//! Snapshot integrity checks.
//!
//! The engine tolerates every issue reported here (it coerces, skips or
//! falls back), but a dashboard can surface them as data-quality warnings.
//! Detects:
//! - Duplicate project, bay or schedule IDs
//! - Schedules referencing unknown bays or projects
//! - Schedules ending before they start
//! - A project booked twice on one bay over overlapping days
//! - Phase marker dates out of phase order
//! - Phase weights that are negative or not finite

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{ManufacturingBay, Phase, Project, Schedule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending entity ID.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of one kind share an ID.
    DuplicateId,
    /// A schedule names a bay that doesn't exist.
    UnknownBay,
    /// A schedule names a project that doesn't exist.
    UnknownProject,
    /// A schedule ends before it starts.
    InvalidInterval,
    /// One project holds overlapping schedules on one bay.
    OverlappingSchedule,
    /// A phase marker is dated before an earlier phase's marker.
    MarkerOrder,
    /// A phase weight is negative, NaN or infinite.
    MalformedWeights,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, entity_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.to_string(),
            message: message.into(),
        }
    }
}

/// Validates a dashboard snapshot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_snapshot(
    projects: &[Project],
    bays: &[ManufacturingBay],
    schedules: &[Schedule],
) -> ValidationResult {
    let mut errors = Vec::new();

    let project_ids = collect_ids(projects.iter().map(|p| p.id.as_str()), "project", &mut errors);
    let bay_ids = collect_ids(bays.iter().map(|b| b.id.as_str()), "bay", &mut errors);
    collect_ids(schedules.iter().map(|s| s.id.as_str()), "schedule", &mut errors);

    for project in projects {
        check_markers(project, &mut errors);
        check_weights(project, &mut errors);
    }

    for s in schedules {
        if !bay_ids.contains(s.bay_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownBay,
                &s.id,
                format!("Schedule '{}' references unknown bay '{}'", s.id, s.bay_id),
            ));
        }
        if !project_ids.contains(s.project_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownProject,
                &s.id,
                format!(
                    "Schedule '{}' references unknown project '{}'",
                    s.id, s.project_id
                ),
            ));
        }
        if !s.interval().is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                &s.id,
                format!(
                    "Schedule '{}' ends {} before it starts {}",
                    s.id, s.end_date, s.start_date
                ),
            ));
        }
    }

    check_project_overlaps(schedules, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    what: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                id,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
    seen
}

fn check_markers(project: &Project, errors: &mut Vec<ValidationError>) {
    let m = &project.markers;
    let named = Phase::ALL
        .iter()
        .map(|p| (p.label(), m.start_of(*p)))
        .chain([
            ("Executive Review", m.executive_review_date),
            ("Ship", m.ship_date),
        ]);

    let mut latest: Option<(&str, NaiveDate)> = None;
    for (label, date) in named {
        let Some(date) = date else { continue };
        if let Some((prev_label, prev)) = latest.filter(|(_, prev)| date < *prev) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MarkerOrder,
                &project.id,
                format!(
                    "Project '{}': {label} marker {date} precedes {prev_label} marker {prev}",
                    project.id
                ),
            ));
        } else {
            latest = Some((label, date));
        }
    }
}

fn check_weights(project: &Project, errors: &mut Vec<ValidationError>) {
    for phase in Phase::ALL {
        if let Some(w) = project.weights.get(phase) {
            if !w.is_finite() || w < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedWeights,
                    &project.id,
                    format!("Project '{}': {phase} weight {w} is unusable", project.id),
                ));
            }
        }
    }
}

fn check_project_overlaps(schedules: &[Schedule], errors: &mut Vec<ValidationError>) {
    let valid: Vec<&Schedule> = schedules.iter().filter(|s| s.interval().is_valid()).collect();
    for (i, a) in valid.iter().enumerate() {
        for b in &valid[i + 1..] {
            if a.project_id == b.project_id
                && a.bay_id == b.bay_id
                && a.interval().overlaps(&b.interval())
            {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OverlappingSchedule,
                    &a.project_id,
                    format!(
                        "Project '{}' has overlapping schedules '{}' and '{}' on bay '{}'",
                        a.project_id, a.id, b.id, a.bay_id
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_projects() -> Vec<Project> {
        vec![
            Project::new("P1")
                .with_phase_start(Phase::Fabrication, d(2025, 1, 1))
                .with_phase_start(Phase::Production, d(2025, 1, 15))
                .with_ship_date(d(2025, 3, 1)),
            Project::new("P2"),
        ]
    }

    fn sample_bays() -> Vec<ManufacturingBay> {
        vec![
            ManufacturingBay::new("B1").with_team("Team A"),
            ManufacturingBay::new("B2").with_team("Team A"),
        ]
    }

    fn sample_schedules() -> Vec<Schedule> {
        vec![
            Schedule::new("S1", "P1", "B1", d(2025, 1, 1), d(2025, 1, 31)),
            Schedule::new("S2", "P2", "B1", d(2025, 2, 1), d(2025, 2, 28)),
            Schedule::new("S3", "P1", "B2", d(2025, 1, 15), d(2025, 2, 15)),
        ]
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(validate_snapshot(&sample_projects(), &sample_bays(), &sample_schedules()).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let projects = vec![Project::new("P1"), Project::new("P1")];
        let bays = vec![ManufacturingBay::new("B1"), ManufacturingBay::new("B1")];
        let errors = validate_snapshot(&projects, &bays, &[]).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
                .count(),
            2
        );
        assert!(errors.iter().any(|e| e.message.contains("bay")));
    }

    #[test]
    fn test_unknown_references() {
        let schedules = vec![Schedule::new("S1", "P404", "B404", d(2025, 1, 1), d(2025, 1, 2))];
        let errors = validate_snapshot(&sample_projects(), &sample_bays(), &schedules).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::UnknownBay));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownProject));
    }

    #[test]
    fn test_inverted_interval() {
        let schedules = vec![Schedule::new("S1", "P1", "B1", d(2025, 1, 10), d(2025, 1, 1))];
        let errors = validate_snapshot(&sample_projects(), &sample_bays(), &schedules).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidInterval);
        assert_eq!(errors[0].entity_id, "S1");
    }

    #[test]
    fn test_overlapping_project_schedules() {
        let schedules = vec![
            Schedule::new("S1", "P1", "B1", d(2025, 1, 1), d(2025, 1, 31)),
            Schedule::new("S2", "P1", "B1", d(2025, 1, 20), d(2025, 2, 10)),
            // Same days on another bay is fine.
            Schedule::new("S3", "P1", "B2", d(2025, 1, 20), d(2025, 2, 10)),
        ];
        let errors = validate_snapshot(&sample_projects(), &sample_bays(), &schedules).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::OverlappingSchedule);
    }

    #[test]
    fn test_marker_order() {
        let projects = vec![Project::new("P1")
            .with_phase_start(Phase::Production, d(2025, 2, 1))
            .with_phase_start(Phase::Qc, d(2025, 1, 15))
            .with_ship_date(d(2025, 3, 1))];
        let errors = validate_snapshot(&projects, &[], &[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MarkerOrder);
        assert!(errors[0].message.contains("QC"));
    }

    #[test]
    fn test_malformed_weights() {
        let projects = vec![Project::new("P1")
            .with_weight(Phase::Paint, -3.0)
            .with_weight(Phase::Qc, f64::NAN)];
        let errors = validate_snapshot(&projects, &[], &[]).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::MalformedWeights)
                .count(),
            2
        );
    }

    #[test]
    fn test_multiple_errors() {
        let projects = vec![Project::new("P1"), Project::new("P1")];
        let schedules = vec![Schedule::new("S1", "P9", "B9", d(2025, 1, 1), d(2025, 1, 2))];
        let errors = validate_snapshot(&projects, &[], &schedules).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
