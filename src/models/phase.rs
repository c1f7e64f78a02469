//! Manufacturing phase model.
//!
//! A project moves through six production phases in a fixed order:
//!
//! ```text
//! Fabrication → Paint → Production → IT Integration → NTC Testing → QC
//! ```
//!
//! [`PhaseStatus`] extends the sequence with the states a dashboard shows
//! around it: not started, executive review (marker-driven only), shipped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A production phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Structural fabrication.
    Fabrication,
    /// Paint / wrap.
    Paint,
    /// Main assembly in the bay.
    Production,
    /// IT system integration.
    ItIntegration,
    /// NTC testing.
    NtcTesting,
    /// Final quality control.
    Qc,
}

impl Phase {
    /// All phases in canonical order.
    pub const ALL: [Phase; 6] = [
        Phase::Fabrication,
        Phase::Paint,
        Phase::Production,
        Phase::ItIntegration,
        Phase::NtcTesting,
        Phase::Qc,
    ];

    /// Position in the canonical sequence (0-based).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<Phase> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Fabrication => "Fabrication",
            Phase::Paint => "Paint",
            Phase::Production => "Production",
            Phase::ItIntegration => "IT Integration",
            Phase::NtcTesting => "NTC Testing",
            Phase::Qc => "QC",
        }
    }

    /// Whether the scheduled bay team performs this phase.
    ///
    /// Fabrication and paint run on a separate line and are left out of
    /// bay duration estimates.
    pub fn is_bay_work(self) -> bool {
        !matches!(self, Phase::Fabrication | Phase::Paint)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a project stands on a given day.
///
/// Variants are ordered: a later variant is never "earlier" in the
/// project's life. Moving `today` forward never yields a smaller status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhaseStatus {
    /// Before the first phase begins.
    NotStarted,
    /// Fabrication.
    Fabrication,
    /// Paint.
    Paint,
    /// Production.
    Production,
    /// IT integration.
    ItIntegration,
    /// NTC testing.
    NtcTesting,
    /// QC.
    Qc,
    /// Executive review (reported only from marker dates).
    ExecutiveReview,
    /// Shipped.
    Shipped,
}

impl PhaseStatus {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "Not Started",
            PhaseStatus::Fabrication => Phase::Fabrication.label(),
            PhaseStatus::Paint => Phase::Paint.label(),
            PhaseStatus::Production => Phase::Production.label(),
            PhaseStatus::ItIntegration => Phase::ItIntegration.label(),
            PhaseStatus::NtcTesting => Phase::NtcTesting.label(),
            PhaseStatus::Qc => Phase::Qc.label(),
            PhaseStatus::ExecutiveReview => "Executive Review",
            PhaseStatus::Shipped => "Shipped",
        }
    }

    /// The production phase, if the status is one.
    pub fn phase(self) -> Option<Phase> {
        match self {
            PhaseStatus::Fabrication => Some(Phase::Fabrication),
            PhaseStatus::Paint => Some(Phase::Paint),
            PhaseStatus::Production => Some(Phase::Production),
            PhaseStatus::ItIntegration => Some(Phase::ItIntegration),
            PhaseStatus::NtcTesting => Some(Phase::NtcTesting),
            PhaseStatus::Qc => Some(Phase::Qc),
            _ => None,
        }
    }

    /// Whether the project is on the floor (any production phase or review).
    pub fn is_in_progress(self) -> bool {
        !matches!(self, PhaseStatus::NotStarted | PhaseStatus::Shipped)
    }
}

impl From<Phase> for PhaseStatus {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Fabrication => PhaseStatus::Fabrication,
            Phase::Paint => PhaseStatus::Paint,
            Phase::Production => PhaseStatus::Production,
            Phase::ItIntegration => PhaseStatus::ItIntegration,
            Phase::NtcTesting => PhaseStatus::NtcTesting,
            Phase::Qc => PhaseStatus::Qc,
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
