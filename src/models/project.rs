//! Project model.
//!
//! A project is one manufacturing order moving through the phase sequence.
//! Records arrive as read-only snapshots from the dashboard's REST layer;
//! field names follow that layer's camelCase JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::Phase;

/// A project tracked through the production pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Shop-floor project number.
    #[serde(default)]
    pub project_number: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Team label the project is assigned to.
    #[serde(default)]
    pub team: Option<String>,
    /// Bay the project is assigned to.
    #[serde(default)]
    pub bay_id: Option<String>,
    /// Phase marker dates.
    #[serde(flatten)]
    pub markers: PhaseMarkers,
    /// Per-project phase weight percentages.
    #[serde(flatten)]
    pub weights: WeightOverrides,
    /// Labor-hours estimate for the whole project.
    #[serde(default)]
    pub total_hours: Option<f64>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// In the pipeline.
    #[default]
    Active,
    /// Manufacturing complete.
    Completed,
    /// Delivered to the customer.
    Delivered,
    /// Any status the engine does not interpret.
    #[serde(other)]
    Other,
}

/// Optional dates marking when each phase started (or is planned to).
///
/// Expected to be non-decreasing in phase order. Violations are tolerated:
/// the phase calculator treats an out-of-order marker as not yet reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseMarkers {
    #[serde(default)]
    pub fabrication_start: Option<NaiveDate>,
    #[serde(default, alias = "wrapDate")]
    pub paint_start: Option<NaiveDate>,
    #[serde(default, alias = "assemblyStart")]
    pub production_start: Option<NaiveDate>,
    #[serde(default)]
    pub it_start: Option<NaiveDate>,
    #[serde(default)]
    pub ntc_testing_date: Option<NaiveDate>,
    #[serde(default)]
    pub qc_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub executive_review_date: Option<NaiveDate>,
    #[serde(default)]
    pub ship_date: Option<NaiveDate>,
}

impl PhaseMarkers {
    /// The start marker for a production phase.
    pub fn start_of(&self, phase: Phase) -> Option<NaiveDate> {
        match phase {
            Phase::Fabrication => self.fabrication_start,
            Phase::Paint => self.paint_start,
            Phase::Production => self.production_start,
            Phase::ItIntegration => self.it_start,
            Phase::NtcTesting => self.ntc_testing_date,
            Phase::Qc => self.qc_start_date,
        }
    }

    /// Whether no marker is set.
    pub fn is_empty(&self) -> bool {
        Phase::ALL.iter().all(|p| self.start_of(*p).is_none())
            && self.executive_review_date.is_none()
            && self.ship_date.is_none()
    }
}

/// Per-project weight percentages. `None` means "use the default".
///
/// Values that are not numbers in the incoming JSON (e.g. `""` or `"n/a"`)
/// deserialize as `None`; numeric strings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightOverrides {
    #[serde(default, rename = "fabPercentage", deserialize_with = "lenient_percentage")]
    pub fabrication: Option<f64>,
    #[serde(default, rename = "paintPercentage", deserialize_with = "lenient_percentage")]
    pub paint: Option<f64>,
    #[serde(default, rename = "productionPercentage", deserialize_with = "lenient_percentage")]
    pub production: Option<f64>,
    #[serde(default, rename = "itPercentage", deserialize_with = "lenient_percentage")]
    pub it: Option<f64>,
    #[serde(default, rename = "ntcPercentage", deserialize_with = "lenient_percentage")]
    pub ntc: Option<f64>,
    #[serde(default, rename = "qcPercentage", deserialize_with = "lenient_percentage")]
    pub qc: Option<f64>,
}

impl WeightOverrides {
    /// Override for a phase.
    pub fn get(&self, phase: Phase) -> Option<f64> {
        match phase {
            Phase::Fabrication => self.fabrication,
            Phase::Paint => self.paint,
            Phase::Production => self.production,
            Phase::ItIntegration => self.it,
            Phase::NtcTesting => self.ntc,
            Phase::Qc => self.qc,
        }
    }

    /// Sets the override for a phase.
    pub fn set(&mut self, phase: Phase, value: Option<f64>) {
        let slot = match phase {
            Phase::Fabrication => &mut self.fabrication,
            Phase::Paint => &mut self.paint,
            Phase::Production => &mut self.production,
            Phase::ItIntegration => &mut self.it,
            Phase::NtcTesting => &mut self.ntc,
            Phase::Qc => &mut self.qc,
        };
        *slot = value;
    }

    /// Builds overrides from six values in canonical phase order.
    pub fn from_array(values: [f64; 6]) -> Self {
        let mut w = Self::default();
        for (phase, value) in Phase::ALL.iter().zip(values) {
            w.set(*phase, Some(value));
        }
        w
    }
}

fn lenient_percentage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Some(n),
        Raw::Text(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        Raw::Null(()) => None,
    })
}

impl Project {
    /// Creates a project with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the project number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.project_number = number.into();
        self
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Assigns the project to a team.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Assigns the project to a bay.
    pub fn with_bay(mut self, bay_id: impl Into<String>) -> Self {
        self.bay_id = Some(bay_id.into());
        self
    }

    /// Sets the labor-hours estimate.
    pub fn with_total_hours(mut self, hours: f64) -> Self {
        self.total_hours = Some(hours);
        self
    }

    /// Sets a phase start marker.
    pub fn with_phase_start(mut self, phase: Phase, date: NaiveDate) -> Self {
        match phase {
            Phase::Fabrication => self.markers.fabrication_start = Some(date),
            Phase::Paint => self.markers.paint_start = Some(date),
            Phase::Production => self.markers.production_start = Some(date),
            Phase::ItIntegration => self.markers.it_start = Some(date),
            Phase::NtcTesting => self.markers.ntc_testing_date = Some(date),
            Phase::Qc => self.markers.qc_start_date = Some(date),
        }
        self
    }

    /// Sets the executive review date.
    pub fn with_executive_review(mut self, date: NaiveDate) -> Self {
        self.markers.executive_review_date = Some(date);
        self
    }

    /// Sets the ship date.
    pub fn with_ship_date(mut self, date: NaiveDate) -> Self {
        self.markers.ship_date = Some(date);
        self
    }

    /// Sets a phase weight override.
    pub fn with_weight(mut self, phase: Phase, percent: f64) -> Self {
        self.weights.set(phase, Some(percent));
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the project has left the pipeline.
    pub fn is_closed(&self) -> bool {
        matches!(self.status, ProjectStatus::Completed | ProjectStatus::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_project_builder() {
        let p = Project::new("P1")
            .with_number("804512")
            .with_name("Mobile Lab")
            .with_team("Team A")
            .with_bay("B1")
            .with_total_hours(1200.0)
            .with_phase_start(Phase::Production, d(2025, 2, 1))
            .with_ship_date(d(2025, 3, 1))
            .with_weight(Phase::Qc, 5.0);

        assert_eq!(p.id, "P1");
        assert_eq!(p.project_number, "804512");
        assert_eq!(p.team.as_deref(), Some("Team A"));
        assert_eq!(p.markers.start_of(Phase::Production), Some(d(2025, 2, 1)));
        assert_eq!(p.markers.ship_date, Some(d(2025, 3, 1)));
        assert_eq!(p.weights.get(Phase::Qc), Some(5.0));
        assert_eq!(p.weights.get(Phase::Paint), None);
        assert_eq!(p.status, ProjectStatus::Active);
        assert!(!p.is_closed());
    }

    #[test]
    fn test_deserialize_dashboard_json() {
        let json = r#"{
            "id": "42",
            "projectNumber": "804512",
            "name": "Mobile Lab",
            "team": "Team A",
            "fabricationStart": "2025-01-01",
            "wrapDate": "2025-01-08",
            "assemblyStart": "2025-01-10",
            "shipDate": "2025-02-28",
            "fabPercentage": 27,
            "paintPercentage": "7",
            "productionPercentage": "",
            "qcPercentage": null,
            "totalHours": 1000.0,
            "status": "delivered"
        }"#;
        let p: Project = serde_json::from_str(json).unwrap();

        assert_eq!(p.markers.fabrication_start, Some(d(2025, 1, 1)));
        assert_eq!(p.markers.paint_start, Some(d(2025, 1, 8)));
        assert_eq!(p.markers.production_start, Some(d(2025, 1, 10)));
        assert_eq!(p.markers.ship_date, Some(d(2025, 2, 28)));
        assert_eq!(p.weights.fabrication, Some(27.0));
        assert_eq!(p.weights.paint, Some(7.0));
        assert_eq!(p.weights.production, None); // non-numeric
        assert_eq!(p.weights.qc, None);
        assert_eq!(p.weights.it, None); // absent
        assert_eq!(p.total_hours, Some(1000.0));
        assert_eq!(p.status, ProjectStatus::Delivered);
        assert!(p.is_closed());
    }

    #[test]
    fn test_unknown_status() {
        let p: Project = serde_json::from_str(r#"{"id": "1", "status": "on-hold"}"#).unwrap();
        assert_eq!(p.status, ProjectStatus::Other);
        assert!(p.markers.is_empty());
    }

    #[test]
    fn test_overrides_from_array() {
        let w = WeightOverrides::from_array([10.0, 10.0, 50.0, 10.0, 10.0, 10.0]);
        assert_eq!(w.get(Phase::Production), Some(50.0));
        assert_eq!(w.get(Phase::Qc), Some(10.0));
    }
}
