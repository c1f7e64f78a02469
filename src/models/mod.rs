//! Dashboard domain models.
//!
//! Plain data snapshots supplied by the dashboard's REST layer, plus the
//! phase vocabulary and calendar-day helpers the engine computes with.
//! Nothing here is owned or cached by the engine.
//!
//! # Domain Mappings
//!
//! | bay-schedule | Shop floor | Scheduling theory |
//! |--------------|------------|-------------------|
//! | Project | Order / unit build | Job |
//! | Phase | Production stage | Operation |
//! | ManufacturingBay | Work-cell | Machine |
//! | Schedule | Bay booking | Assignment |
//! | Team | Bay crew | Machine group |

mod bay;
mod calendar;
mod phase;
mod project;
mod schedule;

pub(crate) use bay::sanitize_rate;
pub use bay::{teams, BayDimensions, ManufacturingBay, Team};
pub use calendar::{add_days, days_between, CalendarDay, DateInterval, WeekWindow};
pub use phase::{Phase, PhaseStatus};
pub use project::{PhaseMarkers, Project, ProjectStatus, WeightOverrides};
pub use schedule::{schedules_for_bay, schedules_for_project, Schedule};
