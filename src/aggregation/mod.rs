//! Schedule aggregation for dashboard views.
//!
//! Selects the schedules a bay board shows (active now, starting soon)
//! and reports bays booked twice on the same day.

mod conflicts;
mod window;

pub use conflicts::{bay_conflicts, ScheduleConflict};
pub use window::{active_on, active_or_upcoming, classify, ScheduleWindow};
