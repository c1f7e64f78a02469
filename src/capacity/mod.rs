//! Team capacity, duration estimates and utilization.
//!
//! # Capacity
//!
//! A team's weekly capacity is the sum of assembly and electrical staff
//! over its bays, times the hours-per-person rate of the team's first bay.
//! Bays of one team are assumed to share a rate; mismatches are not
//! reconciled.
//!
//! # Estimates
//!
//! [`estimate_duration`] turns labor hours into whole weeks of bay time.
//! [`Utilization`] measures how loaded a team is in the current week.

mod duration;
mod utilization;

pub use duration::{
    estimate_duration, estimate_for_project, required_weekly_hours, scheduled_weeks,
    DurationEstimate,
};
pub use utilization::{Utilization, UtilizationBands, UtilizationStatus};

use serde::{Deserialize, Serialize};

use crate::models::{sanitize_rate, ManufacturingBay, Team};

/// Aggregated staffing of one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCapacity {
    /// Team label.
    pub team: String,
    /// Bays carrying the label.
    pub bay_count: usize,
    /// Total assembly staff.
    pub assembly_staff: u64,
    /// Total electrical staff.
    pub electrical_staff: u64,
    /// Rate taken from the first bay.
    pub hours_per_person_per_week: f64,
    /// `(assembly + electrical) × rate`.
    pub weekly_hours: f64,
}

impl TeamCapacity {
    /// Aggregates the bays labeled `team`.
    pub fn for_team(team: &str, bays: &[ManufacturingBay]) -> Self {
        Self::from_team(&Team::project(team, bays))
    }

    /// Aggregates an already projected team.
    pub fn from_team(team: &Team<'_>) -> Self {
        let assembly_staff: u64 = team
            .bays
            .iter()
            .map(|b| u64::from(b.assembly_staff_count))
            .sum();
        let electrical_staff: u64 = team
            .bays
            .iter()
            .map(|b| u64::from(b.electrical_staff_count))
            .sum();
        let rate = team
            .bays
            .first()
            .map(|b| sanitize_rate(b.hours_per_person_per_week))
            .unwrap_or(0.0);
        Self {
            team: team.label.to_string(),
            bay_count: team.bay_count(),
            assembly_staff,
            electrical_staff,
            hours_per_person_per_week: rate,
            weekly_hours: (assembly_staff + electrical_staff) as f64 * rate,
        }
    }

    /// Total staff.
    pub fn staff(&self) -> u64 {
        self.assembly_staff + self.electrical_staff
    }

    /// Whether the team can take any work.
    pub fn has_capacity(&self) -> bool {
        self.weekly_hours > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_capacity_sum() {
        let bays = vec![
            ManufacturingBay::new("B1")
                .with_team("Team A")
                .with_staff(3, 1)
                .with_hours_per_person(40.0),
            ManufacturingBay::new("B2")
                .with_team("Team A")
                .with_staff(1, 1)
                // differing rate is ignored; first bay wins
                .with_hours_per_person(30.0),
            ManufacturingBay::new("B3")
                .with_team("Team B")
                .with_staff(9, 9)
                .with_hours_per_person(40.0),
        ];
        let cap = TeamCapacity::for_team("Team A", &bays);
        assert_eq!(cap.bay_count, 2);
        assert_eq!(cap.assembly_staff, 4);
        assert_eq!(cap.electrical_staff, 2);
        assert_eq!(cap.staff(), 6);
        assert!((cap.weekly_hours - 240.0).abs() < 1e-10);
        assert!(cap.has_capacity());
    }

    #[test]
    fn test_staff_beyond_u32_range() {
        let bays = vec![
            ManufacturingBay::new("B1")
                .with_team("T")
                .with_staff(u32::MAX, 1)
                .with_hours_per_person(1.0),
            ManufacturingBay::new("B2")
                .with_team("T")
                .with_staff(u32::MAX, u32::MAX)
                .with_hours_per_person(1.0),
        ];
        let cap = TeamCapacity::for_team("T", &bays);
        let max = u64::from(u32::MAX);
        assert_eq!(cap.assembly_staff, 2 * max);
        assert_eq!(cap.electrical_staff, max + 1);
        assert_eq!(cap.staff(), 3 * max + 1);
        assert!((cap.weekly_hours - (3 * max + 1) as f64).abs() < 1.0);
        assert_eq!(bays[0].staff_count(), max + 1);
    }

    #[test]
    fn test_empty_team() {
        let cap = TeamCapacity::for_team("Nobody", &[]);
        assert_eq!(cap.bay_count, 0);
        assert!((cap.weekly_hours - 0.0).abs() < 1e-10);
        assert!(!cap.has_capacity());
    }
}
