//! Phase weight resolution.
//!
//! Each phase gets a share of a project's duration (and labor hours).
//! Projects may carry their own percentages; missing or malformed ones
//! fall back to the default table.
//!
//! # Normalization Rule
//! After substitution the six weights are scaled by `100 / sum` whenever
//! their sum differs from 100, so every resolved set sums to exactly 100.
//! The rule applies everywhere weights are consumed. The shipped default
//! table (27/7/60/7/7/7) sums to 115 and is normalized like any other set.
//!
//! # Coercion
//! - `None` → default for that phase
//! - NaN, ±∞, negative → default for that phase (logged)
//! - all six zero → normalized default table

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Phase, Project};

/// Tolerance within which a weight sum counts as 100.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Default percentage table, in canonical phase order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    pub fabrication: f64,
    pub paint: f64,
    pub production: f64,
    pub it: f64,
    pub ntc: f64,
    pub qc: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            fabrication: 27.0,
            paint: 7.0,
            production: 60.0,
            it: 7.0,
            ntc: 7.0,
            qc: 7.0,
        }
    }
}

impl WeightTable {
    /// Values in canonical phase order.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.fabrication,
            self.paint,
            self.production,
            self.it,
            self.ntc,
            self.qc,
        ]
    }

    /// Default for one phase.
    pub fn get(&self, phase: Phase) -> f64 {
        self.as_array()[phase.index()]
    }
}

/// One resolved (phase, weight) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeight {
    pub phase: Phase,
    /// Share of the whole in percent.
    pub percent: f64,
}

/// A normalized weight set: six non-negative finite values summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    percents: [f64; 6],
}

impl PhaseWeights {
    /// Normalizes six percentages given in canonical phase order.
    ///
    /// Malformed entries are replaced with the default table's value.
    pub fn from_percentages(raw: [f64; 6]) -> Self {
        Self::resolve(raw.map(Some), &WeightTable::default())
    }

    /// Substitutes defaults for missing or malformed entries, then normalizes.
    pub fn resolve(raw: [Option<f64>; 6], defaults: &WeightTable) -> Self {
        let fallback = defaults.as_array();
        let mut percents = [0.0; 6];

        for (i, phase) in Phase::ALL.iter().enumerate() {
            percents[i] = match raw[i] {
                Some(v) if is_usable(v) => v,
                Some(v) => {
                    warn!(phase = %phase, value = v, "malformed phase weight, using default");
                    usable_or_zero(fallback[i])
                }
                None => usable_or_zero(fallback[i]),
            };
        }

        let sum: f64 = percents.iter().sum();
        if !(sum.is_finite() && sum > 0.0) {
            debug!("phase weights sum to zero, using default table");
            return Self::default_table(defaults);
        }

        if (sum - 100.0).abs() > SUM_TOLERANCE {
            debug!(sum, "normalizing phase weights to 100");
            let scale = 100.0 / sum;
            for p in percents.iter_mut() {
                *p *= scale;
            }
        }

        Self { percents }
    }

    /// The normalized default table.
    ///
    /// A table that is itself unusable (all zero) degrades to equal shares.
    pub fn default_table(defaults: &WeightTable) -> Self {
        let mut percents = defaults.as_array().map(usable_or_zero);
        let sum: f64 = percents.iter().sum();
        if sum.is_finite() && sum > 0.0 {
            let scale = 100.0 / sum;
            for p in percents.iter_mut() {
                *p *= scale;
            }
        } else {
            percents = [100.0 / 6.0; 6];
        }
        Self { percents }
    }

    /// Weight of one phase in percent.
    #[inline]
    pub fn get(&self, phase: Phase) -> f64 {
        self.percents[phase.index()]
    }

    /// Weights in canonical phase order.
    #[inline]
    pub fn as_array(&self) -> [f64; 6] {
        self.percents
    }

    /// Iterates (phase, weight) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = PhaseWeight> + '_ {
        Phase::ALL
            .iter()
            .zip(self.percents.iter())
            .map(|(&phase, &percent)| PhaseWeight { phase, percent })
    }

    /// Ordered (phase, weight) list.
    pub fn to_vec(&self) -> Vec<PhaseWeight> {
        self.iter().collect()
    }

    /// Sum of all weights (100 up to float rounding).
    pub fn sum(&self) -> f64 {
        self.percents.iter().sum()
    }

    /// Combined weight of the phases the bay team performs
    /// (production, IT, NTC, QC).
    pub fn production_share(&self) -> f64 {
        Phase::ALL
            .iter()
            .filter(|p| p.is_bay_work())
            .map(|p| self.get(*p))
            .sum()
    }
}

impl Default for PhaseWeights {
    fn default() -> Self {
        Self::default_table(&WeightTable::default())
    }
}

/// Resolves a project's weights against the built-in default table.
///
/// # Examples
///
/// ```
/// use bay_schedule::models::{Phase, Project};
/// use bay_schedule::timeline::resolve_weights;
///
/// let project = Project::new("P1");
/// let weights = resolve_weights(&project);
/// assert!((weights.sum() - 100.0).abs() < 1e-9);
/// // 60 / 115 of the duration goes to production.
/// assert!((weights.get(Phase::Production) - 60.0 * 100.0 / 115.0).abs() < 1e-9);
/// ```
pub fn resolve_weights(project: &Project) -> PhaseWeights {
    resolve_weights_with(project, &WeightTable::default())
}

/// Resolves a project's weights against a configured default table.
pub fn resolve_weights_with(project: &Project, defaults: &WeightTable) -> PhaseWeights {
    let raw = Phase::ALL.map(|p| project.weights.get(p));
    PhaseWeights::resolve(raw, defaults)
}

#[inline]
fn is_usable(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

#[inline]
fn usable_or_zero(v: f64) -> f64 {
    if is_usable(v) {
        v
    } else {
        0.0
    }
}
