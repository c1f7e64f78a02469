//! Phase partition of a scheduled interval.
//!
//! Splits `[start, end)` into six consecutive day ranges, one per phase,
//! sized by the normalized weights.
//!
//! # Algorithm
//! For `total = end - start` days, every phase except the last receives
//! `floor(total * weight / 100)` days; the last phase absorbs the
//! remainder. Spans are laid out back to back, so they tile the interval
//! exactly and the last span ends on `end`.
//!
//! A phase may receive zero days (short interval or zero weight). Such a
//! span is empty and never reported as the current phase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PhaseWeights;
use crate::models::{add_days, days_between, CalendarDay, DateInterval, Phase};

/// One phase's share of the interval: days `[start_day, end_day)` relative
/// to the interval start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpan {
    pub phase: Phase,
    /// First day offset (inclusive).
    pub start_day: i64,
    /// End day offset (exclusive). Equals the cumulative boundary.
    pub end_day: i64,
    /// Projected first day.
    pub start: NaiveDate,
    /// Projected end (exclusive; the next phase starts here).
    pub end: NaiveDate,
}

impl PhaseSpan {
    /// Days allotted.
    #[inline]
    pub fn days(&self) -> i64 {
        self.end_day - self.start_day
    }

    /// Whether the span received no days.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.days() == 0
    }

    /// Whether the elapsed day offset falls inside this span.
    #[inline]
    pub fn contains_offset(&self, elapsed_days: i64) -> bool {
        elapsed_days >= self.start_day && elapsed_days < self.end_day
    }
}

/// The six phase spans of one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimeline {
    /// Interval start.
    pub start: NaiveDate,
    /// Interval end (exclusive boundary of the last phase).
    pub end: NaiveDate,
    /// Spans in canonical phase order.
    pub spans: Vec<PhaseSpan>,
}

impl PhaseTimeline {
    /// Partitions `[interval.start, interval.end)` by weight.
    ///
    /// An empty or inverted interval yields six empty spans at `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use bay_schedule::models::{DateInterval, Phase};
    /// use bay_schedule::timeline::{PhaseTimeline, PhaseWeights};
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    /// let timeline = PhaseTimeline::partition(DateInterval::new(start, end), &PhaseWeights::default());
    ///
    /// assert_eq!(timeline.total_days(), 30);
    /// assert_eq!(timeline.span(Phase::Qc).end, end);
    /// ```
    pub fn partition(interval: DateInterval, weights: &PhaseWeights) -> Self {
        let total = interval.days().max(0);
        let mut spans = Vec::with_capacity(Phase::ALL.len());
        let mut cursor: i64 = 0;

        for (i, pw) in weights.iter().enumerate() {
            let days = if i + 1 == Phase::ALL.len() {
                total - cursor
            } else {
                let share = (total as f64 * pw.percent / 100.0).floor() as i64;
                share.clamp(0, total - cursor)
            };
            let end_day = cursor + days;
            spans.push(PhaseSpan {
                phase: pw.phase,
                start_day: cursor,
                end_day,
                start: add_days(interval.start, cursor),
                end: add_days(interval.start, end_day),
            });
            cursor = end_day;
        }

        Self {
            start: interval.start,
            end: add_days(interval.start, total),
            spans,
        }
    }

    /// Total days covered.
    pub fn total_days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    /// The span for a phase.
    pub fn span(&self, phase: Phase) -> &PhaseSpan {
        &self.spans[phase.index()]
    }

    /// Phase whose span contains the day offset: the first phase whose
    /// cumulative boundary exceeds `elapsed_days`.
    ///
    /// `None` before the start or at/after the end.
    pub fn phase_at_offset(&self, elapsed_days: i64) -> Option<Phase> {
        if elapsed_days < 0 {
            return None;
        }
        self.spans
            .iter()
            .find(|s| s.contains_offset(elapsed_days))
            .map(|s| s.phase)
    }

    /// Phase active on a calendar day.
    pub fn phase_on(&self, day: impl CalendarDay) -> Option<Phase> {
        self.phase_at_offset(days_between(self.start, day.calendar_day()))
    }

    /// Projected completion date of a phase (exclusive end).
    pub fn eta(&self, phase: Phase) -> NaiveDate {
        self.span(phase).end
    }
}
