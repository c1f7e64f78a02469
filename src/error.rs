//! Engine error type.
//!
//! Only two computations can fail: duration estimation (zero capacity or an
//! unusable interval) and configuration loading. Everything else recovers
//! locally and returns a value.

use chrono::NaiveDate;
use thiserror::Error;

/// Engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// End before start, or a zero-length interval where a rate is derived from it.
    #[error("invalid interval {start}..{end}: no usable duration")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    /// Weekly capacity is zero, negative or not a number.
    #[error("{team} has zero capacity")]
    MissingCapacity { team: String },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn missing_capacity(team: impl Into<String>) -> Self {
        Self::MissingCapacity { team: team.into() }
    }
}

/// Engine result type.
pub type EngineResult<T> = Result<T, EngineError>;
