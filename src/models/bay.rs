//! Manufacturing bay and team models.
//!
//! A bay is a physical work-cell with fixed staffing. Bays sharing a team
//! label form a [`Team`]; teams have no storage of their own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A manufacturing bay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingBay {
    /// Unique bay identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Team label. Bays without one belong to no team.
    #[serde(default)]
    pub team: Option<String>,
    /// Assembly technicians assigned to the bay.
    #[serde(default)]
    pub assembly_staff_count: u32,
    /// Electricians assigned to the bay.
    #[serde(default)]
    pub electrical_staff_count: u32,
    /// Scheduled hours per person per week.
    #[serde(default)]
    pub hours_per_person_per_week: f64,
    /// Physical size limits. Not used by scheduling math.
    #[serde(flatten)]
    pub dimensions: BayDimensions,
}

/// Physical capacity bounds of a bay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BayDimensions {
    #[serde(default)]
    pub max_width: Option<f64>,
    #[serde(default)]
    pub max_height: Option<f64>,
    #[serde(default)]
    pub max_length: Option<f64>,
}

impl ManufacturingBay {
    /// Creates a bay with no staff.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the team label.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Sets staff counts.
    pub fn with_staff(mut self, assembly: u32, electrical: u32) -> Self {
        self.assembly_staff_count = assembly;
        self.electrical_staff_count = electrical;
        self
    }

    /// Sets the hours each person works per week.
    pub fn with_hours_per_person(mut self, hours: f64) -> Self {
        self.hours_per_person_per_week = hours;
        self
    }

    /// Sets the physical bounds.
    pub fn with_dimensions(mut self, dimensions: BayDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Assembly plus electrical staff.
    #[inline]
    pub fn staff_count(&self) -> u64 {
        u64::from(self.assembly_staff_count) + u64::from(self.electrical_staff_count)
    }

    /// Weekly labor hours of this bay alone.
    pub fn weekly_hours(&self) -> f64 {
        self.staff_count() as f64 * sanitize_rate(self.hours_per_person_per_week)
    }

    /// Whether the bay carries the given team label.
    pub fn belongs_to(&self, team: &str) -> bool {
        self.team.as_deref() == Some(team)
    }
}

/// A team: the bays sharing one label.
#[derive(Debug, Clone)]
pub struct Team<'a> {
    /// Team label.
    pub label: &'a str,
    /// Bays carrying the label, in input order.
    pub bays: Vec<&'a ManufacturingBay>,
}

impl<'a> Team<'a> {
    /// Projects the bays of one team out of a bay list.
    pub fn project(label: &'a str, bays: &'a [ManufacturingBay]) -> Self {
        Self {
            label,
            bays: bays.iter().filter(|b| b.belongs_to(label)).collect(),
        }
    }

    /// Whether a bay ID is part of this team.
    pub fn has_bay(&self, bay_id: &str) -> bool {
        self.bays.iter().any(|b| b.id == bay_id)
    }

    /// Number of bays.
    pub fn bay_count(&self) -> usize {
        self.bays.len()
    }
}

/// Groups bays into teams, ordered by label. Unlabeled bays are skipped.
pub fn teams(bays: &[ManufacturingBay]) -> Vec<Team<'_>> {
    let mut grouped: BTreeMap<&str, Vec<&ManufacturingBay>> = BTreeMap::new();
    for bay in bays {
        if let Some(label) = bay.team.as_deref() {
            grouped.entry(label).or_default().push(bay);
        }
    }
    grouped
        .into_iter()
        .map(|(label, bays)| Team { label, bays })
        .collect()
}

/// Negative or non-finite hour rates count as zero.
pub(crate) fn sanitize_rate(hours: f64) -> f64 {
    if hours.is_finite() && hours > 0.0 {
        hours
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bays() -> Vec<ManufacturingBay> {
        vec![
            ManufacturingBay::new("B1")
                .with_team("Team A")
                .with_staff(3, 1)
                .with_hours_per_person(40.0),
            ManufacturingBay::new("B2")
                .with_team("Team B")
                .with_staff(2, 2)
                .with_hours_per_person(32.0),
            ManufacturingBay::new("B3")
                .with_team("Team A")
                .with_staff(1, 1)
                .with_hours_per_person(40.0),
            ManufacturingBay::new("B4"),
        ]
    }

    #[test]
    fn test_bay_weekly_hours() {
        let bays = sample_bays();
        assert_eq!(bays[0].staff_count(), 4);
        assert!((bays[0].weekly_hours() - 160.0).abs() < 1e-10);
        assert!((bays[3].weekly_hours() - 0.0).abs() < 1e-10);

        let broken = ManufacturingBay::new("X")
            .with_staff(2, 0)
            .with_hours_per_person(f64::NAN);
        assert!((broken.weekly_hours() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_team_projection() {
        let bays = sample_bays();
        let team = Team::project("Team A", &bays);
        assert_eq!(team.bay_count(), 2);
        assert!(team.has_bay("B1"));
        assert!(team.has_bay("B3"));
        assert!(!team.has_bay("B2"));
    }

    #[test]
    fn test_teams_grouping() {
        let bays = sample_bays();
        let all = teams(&bays);
        assert_eq!(all.len(), 2); // B4 has no label
        assert_eq!(all[0].label, "Team A");
        assert_eq!(all[0].bays.len(), 2);
        assert_eq!(all[1].label, "Team B");
    }

    #[test]
    fn test_dimensions_do_not_affect_capacity() {
        let bay = ManufacturingBay::new("B9")
            .with_name("Paint Booth")
            .with_staff(2, 0)
            .with_hours_per_person(40.0)
            .with_dimensions(BayDimensions {
                max_width: Some(3.0),
                max_height: None,
                max_length: Some(20.0),
            });
        assert_eq!(bay.name, "Paint Booth");
        assert_eq!(bay.dimensions.max_length, Some(20.0));
        assert!((bay.weekly_hours() - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_deserialize_bay() {
        let json = r#"{
            "id": "7",
            "name": "Bay 7",
            "team": "Team C",
            "assemblyStaffCount": 4,
            "electricalStaffCount": 2,
            "hoursPerPersonPerWeek": 40,
            "maxWidth": 12.5
        }"#;
        let bay: ManufacturingBay = serde_json::from_str(json).unwrap();
        assert_eq!(bay.staff_count(), 6);
        assert!((bay.weekly_hours() - 240.0).abs() < 1e-10);
        assert_eq!(bay.dimensions.max_width, Some(12.5));
        assert!(bay.belongs_to("Team C"));
    }
}
