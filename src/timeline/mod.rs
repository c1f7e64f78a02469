//! Phase timeline engine.
//!
//! Resolves phase weights, partitions a scheduled interval into phase
//! spans, and derives which phase a project is in on a given day.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use bay_schedule::models::{DateInterval, Phase, Project};
//! use bay_schedule::timeline::{resolve_weights, PhaseTimeline};
//!
//! let project = Project::new("P1").with_weight(Phase::Production, 50.0);
//! let weights = resolve_weights(&project);
//!
//! let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
//! let timeline = PhaseTimeline::partition(DateInterval::new(start, end), &weights);
//! let qc_done = timeline.eta(Phase::Qc);
//! assert_eq!(qc_done, end);
//! ```

mod partition;
mod position;
mod weights;

pub use partition::{PhaseSpan, PhaseTimeline};
pub use position::{
    current_phase, current_phase_with, effective_interval, interval_phase, marker_phase,
    progress, projected_phase_start,
};
pub use weights::{
    resolve_weights, resolve_weights_with, PhaseWeight, PhaseWeights, WeightTable, SUM_TOLERANCE,
};
