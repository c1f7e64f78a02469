//! Bay scheduling and phase-timeline engine for a manufacturing dashboard.
//!
//! Derives where each project stands in its production lifecycle, how long
//! a project should occupy a bay, and how loaded each team's bays are this
//! week. The engine is a set of pure functions over snapshots supplied by
//! the caller; it owns no data and performs no I/O.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Project`, `ManufacturingBay`, `Schedule`,
//!   `Phase`, `PhaseStatus`, calendar-day helpers
//! - **`timeline`**: Phase weights, interval partitioning, current-phase derivation
//! - **`capacity`**: Team capacity, duration estimates, weekly utilization
//! - **`aggregation`**: Active/upcoming schedule windows, bay double-booking
//! - **`validation`**: Snapshot integrity checks (duplicate IDs, dangling refs, marker order)
//! - **`dashboard`**: `BayDashboard`, the configured facade over the above
//! - **`config`**, **`error`**, **`logging`**: Ambient setup
//!
//! # Phase model
//!
//! | Phase | Default weight | Bay work |
//! |-------|----------------|----------|
//! | Fabrication | 27 | no |
//! | Paint | 7 | no |
//! | Production | 60 | yes |
//! | IT Integration | 7 | yes |
//! | NTC Testing | 7 | yes |
//! | QC | 7 | yes |
//!
//! Weights are percentages of a schedule's duration. They are always
//! normalized to sum to 100 before use.

pub mod aggregation;
pub mod capacity;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;
pub mod timeline;
pub mod validation;

pub use config::EngineConfig;
pub use dashboard::BayDashboard;
pub use error::{EngineError, EngineResult};
