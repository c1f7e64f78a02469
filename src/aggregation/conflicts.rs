//! Bay double-booking detection.
//!
//! Two schedules conflict when they occupy the same bay on at least one
//! common day. Conflicts are reported, never resolved.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{days_between, Schedule};

/// Two schedules sharing a bay on overlapping days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    /// Shared bay.
    pub bay_id: String,
    /// Earlier-starting schedule.
    pub first_id: String,
    /// Later-starting schedule.
    pub second_id: String,
    /// Days both occupy (inclusive count).
    pub overlap_days: i64,
}

/// Finds every overlapping pair per bay.
///
/// Pairs are reported once, ordered by bay, then by start date.
/// Inverted schedules occupy no days and never conflict.
pub fn bay_conflicts(schedules: &[Schedule]) -> Vec<ScheduleConflict> {
    let mut by_bay: BTreeMap<&str, Vec<&Schedule>> = BTreeMap::new();
    for s in schedules.iter().filter(|s| s.interval().is_valid()) {
        by_bay.entry(s.bay_id.as_str()).or_default().push(s);
    }

    let mut conflicts = Vec::new();
    for (bay_id, mut booked) in by_bay {
        booked.sort_by(|a, b| {
            (a.start_date, a.end_date, &a.id).cmp(&(b.start_date, b.end_date, &b.id))
        });
        for (i, a) in booked.iter().enumerate() {
            // Sorted by start: once b starts after a ends, later ones do too.
            for b in booked[i + 1..].iter().take_while(|b| b.start_date <= a.end_date) {
                let last_shared = a.end_date.min(b.end_date);
                conflicts.push(ScheduleConflict {
                    bay_id: bay_id.to_string(),
                    first_id: a.id.clone(),
                    second_id: b.id.clone(),
                    overlap_days: days_between(b.start_date, last_shared) + 1,
                });
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_no_conflicts() {
        let schedules = vec![
            Schedule::new("S1", "P1", "B1", d(2025, 1, 1), d(2025, 1, 10)),
            Schedule::new("S2", "P2", "B1", d(2025, 1, 11), d(2025, 1, 20)),
            Schedule::new("S3", "P3", "B2", d(2025, 1, 5), d(2025, 1, 15)),
        ];
        assert!(bay_conflicts(&schedules).is_empty());
    }

    #[test]
    fn test_shared_last_day_conflicts() {
        let schedules = vec![
            Schedule::new("S2", "P2", "B1", d(2025, 1, 10), d(2025, 1, 20)),
            Schedule::new("S1", "P1", "B1", d(2025, 1, 1), d(2025, 1, 10)),
        ];
        let c = bay_conflicts(&schedules);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].first_id, "S1");
        assert_eq!(c[0].second_id, "S2");
        assert_eq!(c[0].overlap_days, 1);
    }

    #[test]
    fn test_nested_and_chained() {
        let schedules = vec![
            Schedule::new("LONG", "P1", "B1", d(2025, 1, 1), d(2025, 1, 31)),
            Schedule::new("MID", "P2", "B1", d(2025, 1, 10), d(2025, 1, 12)),
            Schedule::new("LATE", "P3", "B1", d(2025, 1, 25), d(2025, 2, 10)),
        ];
        let c = bay_conflicts(&schedules);
        assert_eq!(c.len(), 2);
        assert_eq!((c[0].first_id.as_str(), c[0].second_id.as_str()), ("LONG", "MID"));
        assert_eq!(c[0].overlap_days, 3);
        assert_eq!((c[1].first_id.as_str(), c[1].second_id.as_str()), ("LONG", "LATE"));
        assert_eq!(c[1].overlap_days, 7);
    }

    #[test]
    fn test_inverted_ignored() {
        let schedules = vec![
            Schedule::new("S1", "P1", "B1", d(2025, 1, 1), d(2025, 1, 10)),
            Schedule::new("BAD", "P2", "B1", d(2025, 1, 9), d(2025, 1, 2)),
        ];
        assert!(bay_conflicts(&schedules).is_empty());
    }
}
