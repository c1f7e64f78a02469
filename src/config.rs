//! Engine configuration.
//!
//! Every field has a default, so an empty document (`{}`) is a valid
//! configuration. Field names are camelCase to match the dashboard's
//! settings payload.
//!
//! ```
//! use bay_schedule::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{
//!     "defaultWeights": { "fabrication": 20, "qc": 5 },
//!     "upcomingHorizonDays": 14,
//!     "weekStart": "Mon"
//! }"#).unwrap();
//!
//! assert_eq!(config.upcoming_horizon_days, 14);
//! assert_eq!(config.default_weights.production, 60.0);
//! ```

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::capacity::UtilizationBands;
use crate::error::{EngineError, EngineResult};
use crate::timeline::WeightTable;

/// Tunables for the dashboard engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Weights used when a project leaves a phase unset.
    pub default_weights: WeightTable,
    /// Utilization status thresholds.
    pub utilization_bands: UtilizationBands,
    /// Look-ahead for "starting soon" schedules, in days.
    pub upcoming_horizon_days: u32,
    /// First day of the utilization week.
    pub week_start: Weekday,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_weights: WeightTable::default(),
            utilization_bands: UtilizationBands::default(),
            upcoming_horizon_days: 7,
            week_start: Weekday::Sun,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// Default weights must be finite, non-negative and not all zero;
    /// bands must descend strictly within 0–100.
    pub fn validate(&self) -> EngineResult<()> {
        let weights = self.default_weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EngineError::InvalidConfig(
                "default weights must be finite and non-negative".into(),
            ));
        }
        if weights.iter().all(|w| *w == 0.0) {
            return Err(EngineError::InvalidConfig(
                "default weights must not all be zero".into(),
            ));
        }
        if !self.utilization_bands.is_valid() {
            return Err(EngineError::InvalidConfig(format!(
                "utilization bands must descend within 0-100, got over={} high={} good={}",
                self.utilization_bands.over,
                self.utilization_bands.high,
                self.utilization_bands.good
            )));
        }
        Ok(())
    }
}
