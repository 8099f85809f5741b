//! Milestone due dates and the recovery timeline.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use smokefree_core::{format_offset, Milestone, ProgressSnapshot, HOURS_PER_DAY};

use crate::calculator::MILLIS_PER_HOUR;

/// One point on the recovery timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Milestone name
    pub name: String,

    /// Milestone description
    pub description: String,

    /// Offset after the quit moment
    pub hours_offset: f64,

    /// Readable offset, e.g. "3.0 days"
    pub label: String,

    /// When the milestone is (or was) reached; `None` past the representable range
    pub due_at: Option<DateTime<Utc>>,

    /// Whether it is already reached
    pub completed: bool,

    /// Days still to go, zero once reached
    pub days_remaining: f64,
}

/// Milestone due date estimator.
pub struct MilestoneEstimator;

impl MilestoneEstimator {
    /// Instant at which `milestone` completes for a quit moment of `start`.
    pub fn due_at(&self, start: DateTime<Utc>, milestone: &Milestone) -> Option<DateTime<Utc>> {
        let millis = (milestone.hours_offset * MILLIS_PER_HOUR).round();
        let offset = Duration::try_milliseconds(millis as i64)?;
        start.checked_add_signed(offset)
    }

    /// Days left until `milestone`, never negative.
    pub fn days_remaining(&self, elapsed_hours: f64, milestone: &Milestone) -> f64 {
        ((milestone.hours_offset - elapsed_hours) / HOURS_PER_DAY).max(0.0)
    }

    /// Due instant of the next pending milestone.
    pub fn next_due(&self, snapshot: &ProgressSnapshot) -> Option<DateTime<Utc>> {
        let next = snapshot.next_incomplete_milestone.as_ref()?;
        self.due_at(snapshot.start_instant, next)
    }

    /// Full timeline for a snapshot, in table order.
    pub fn timeline(&self, snapshot: &ProgressSnapshot) -> Vec<TimelineEntry> {
        snapshot
            .statuses
            .iter()
            .map(|status| {
                let m = &status.milestone;
                TimelineEntry {
                    name: m.name.clone(),
                    description: m.description.clone(),
                    hours_offset: m.hours_offset,
                    label: format_offset(m.hours_offset),
                    due_at: self.due_at(snapshot.start_instant, m),
                    completed: status.completed,
                    days_remaining: if status.completed {
                        0.0
                    } else {
                        self.days_remaining(snapshot.elapsed_hours, m)
                    },
                }
            })
            .collect()
    }
}

impl Default for MilestoneEstimator {
    fn default() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_snapshot;
    use chrono::TimeZone;
    use smokefree_core::MilestoneTable;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_due_at() {
        let estimator = MilestoneEstimator;
        let first = Milestone::new("bp", 0.33, "");
        // 0.33h = 19m48s
        assert_eq!(
            estimator.due_at(t0(), &first),
            Some(t0() + Duration::seconds(19 * 60 + 48))
        );

        let year = Milestone::new("year", 8760.0, "");
        assert_eq!(estimator.due_at(t0(), &year), Some(t0() + Duration::days(365)));
    }

    #[test]
    fn test_due_at_out_of_range() {
        let estimator = MilestoneEstimator;
        let far = Milestone::new("far", 1e15, "");
        assert_eq!(estimator.due_at(t0(), &far), None);
    }

    #[test]
    fn test_days_remaining() {
        let estimator = MilestoneEstimator;
        let m = Milestone::new("senses", 48.0, "");
        assert_eq!(estimator.days_remaining(0.0, &m), 2.0);
        assert_eq!(estimator.days_remaining(36.0, &m), 0.5);
        assert_eq!(estimator.days_remaining(100.0, &m), 0.0);
    }

    #[test]
    fn test_timeline() {
        let table = MilestoneTable::recovery();
        let snapshot = compute_snapshot(t0(), t0() + Duration::hours(30), &table);
        let timeline = MilestoneEstimator.timeline(&snapshot);

        assert_eq!(timeline.len(), 11);
        assert_eq!(timeline.iter().filter(|e| e.completed).count(), 3);
        assert_eq!(timeline[2].days_remaining, 0.0);
        assert_eq!(timeline[3].days_remaining, 0.75);
        assert_eq!(timeline[3].label, "2.0 days");
        assert_eq!(timeline[10].label, "15.0 years");
        assert_eq!(timeline[4].due_at, Some(t0() + Duration::hours(72)));
    }

    #[test]
    fn test_next_due() {
        let table = MilestoneTable::recovery();
        let snapshot = compute_snapshot(t0(), t0() + Duration::hours(30), &table);
        assert_eq!(
            MilestoneEstimator.next_due(&snapshot),
            Some(t0() + Duration::hours(48))
        );

        let done = compute_snapshot(t0(), t0() + Duration::days(6000), &table);
        assert_eq!(MilestoneEstimator.next_due(&done), None);
    }
}
