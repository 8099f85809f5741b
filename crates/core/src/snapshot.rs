//! Progress snapshot - derived state of recovery at one instant.

use serde::{Deserialize, Serialize};
use crate::format::HOURS_PER_DAY;
use crate::milestone::Milestone;
use crate::Time;

/// Completion state of a single milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    /// The milestone
    pub milestone: Milestone,

    /// Whether enough time has elapsed
    pub completed: bool,
}

/// Recovery progress evaluated at `now_instant`.
///
/// Recomputed from scratch on every query, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// The quit moment
    pub start_instant: Time,

    /// The evaluation instant
    pub now_instant: Time,

    /// Hours since the quit moment, never negative
    pub elapsed_hours: f64,

    /// One entry per milestone, in table order
    pub statuses: Vec<MilestoneStatus>,

    /// Last milestone reached, if any
    pub last_completed_milestone: Option<Milestone>,

    /// First milestone not yet reached; `None` when all are complete
    pub next_incomplete_milestone: Option<Milestone>,

    /// Progress through the current segment in `[0, 1]`; `None` when all are complete
    pub segment_progress_fraction: Option<f64>,
}

/// Whole days and leftover hours since quitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmokeFreeDuration {
    /// Whole days
    pub days: u64,
    /// Whole hours past the last full day (0-23)
    pub hours: u64,
}

impl ProgressSnapshot {
    /// True once every milestone is reached.
    pub fn all_completed(&self) -> bool {
        self.next_incomplete_milestone.is_none()
    }

    /// Milestones already reached, in table order.
    pub fn completed(&self) -> impl Iterator<Item = &Milestone> {
        self.statuses.iter().filter(|s| s.completed).map(|s| &s.milestone)
    }

    /// Milestones still ahead, in table order.
    pub fn pending(&self) -> impl Iterator<Item = &Milestone> {
        self.statuses.iter().filter(|s| !s.completed).map(|s| &s.milestone)
    }

    /// Number of milestones reached.
    pub fn completed_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.completed).count()
    }

    /// Whole days elapsed.
    pub fn days_elapsed(&self) -> u64 {
        (self.elapsed_hours / HOURS_PER_DAY).floor().max(0.0) as u64
    }

    /// Elapsed time split into days and hours for headline display.
    pub fn smoke_free_duration(&self) -> SmokeFreeDuration {
        let hours = (self.elapsed_hours % HOURS_PER_DAY).floor().max(0.0) as u64;
        SmokeFreeDuration {
            days: self.days_elapsed(),
            hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn snapshot_with(elapsed_hours: f64, completed: &[bool]) -> ProgressSnapshot {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let statuses: Vec<_> = completed
            .iter()
            .enumerate()
            .map(|(i, c)| MilestoneStatus {
                milestone: Milestone::new(format!("m{}", i), (i as f64 + 1.0) * 10.0, ""),
                completed: *c,
            })
            .collect();
        let next = statuses.iter().find(|s| !s.completed).map(|s| s.milestone.clone());
        ProgressSnapshot {
            start_instant: now - Duration::minutes((elapsed_hours * 60.0) as i64),
            now_instant: now,
            elapsed_hours,
            statuses,
            last_completed_milestone: None,
            segment_progress_fraction: next.as_ref().map(|_| 0.0),
            next_incomplete_milestone: next,
        }
    }

    #[test]
    fn test_duration_breakdown() {
        let snapshot = snapshot_with(50.75, &[true, true, false]);
        assert_eq!(snapshot.days_elapsed(), 2);
        assert_eq!(snapshot.smoke_free_duration(), SmokeFreeDuration { days: 2, hours: 2 });
    }

    #[test]
    fn test_partitions() {
        let snapshot = snapshot_with(25.0, &[true, true, false]);
        assert_eq!(snapshot.completed_count(), 2);
        let pending: Vec<_> = snapshot.pending().map(|m| m.name.as_str()).collect();
        assert_eq!(pending, vec!["m2"]);
        assert!(!snapshot.all_completed());

        let done = snapshot_with(40.0, &[true, true, true]);
        assert!(done.all_completed());
        assert_eq!(done.completed().count(), 3);
    }

    #[test]
    fn test_fixture_instants_are_fixed() {
        let a = snapshot_with(1.5, &[true]);
        let b = snapshot_with(1.5, &[true]);
        assert_eq!(a, b);
        assert_eq!(a.start_instant, a.now_instant - Duration::minutes(90));
    }

    #[test]
    fn test_zero_elapsed() {
        let snapshot = snapshot_with(0.0, &[false]);
        assert_eq!(snapshot.smoke_free_duration(), SmokeFreeDuration { days: 0, hours: 0 });
    }
}
