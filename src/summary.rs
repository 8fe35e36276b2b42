//! Room × branch occupancy summary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::SeatingAssignment;

/// Per-room, per-branch headcount derived from a seating plan.
///
/// Backed by `BTreeMap`s so serialization order is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomBranchSummary(BTreeMap<String, BTreeMap<String, usize>>);

impl RoomBranchSummary {
    /// Count assignments by classroom, then by branch.
    pub fn from_assignments(assignments: &[SeatingAssignment]) -> Self {
        let mut rooms: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for assignment in assignments {
            *rooms
                .entry(assignment.classroom.clone())
                .or_default()
                .entry(assignment.student.branch.clone())
                .or_default() += 1;
        }
        Self(rooms)
    }

    /// Students of `branch` seated in `room`.
    pub fn count(&self, room: &str, branch: &str) -> usize {
        self.0
            .get(room)
            .and_then(|branches| branches.get(branch))
            .copied()
            .unwrap_or(0)
    }

    /// Students seated in `room` across all branches.
    pub fn room_total(&self, room: &str) -> usize {
        self.0.get(room).map(|b| b.values().sum()).unwrap_or(0)
    }

    /// Students seated across the whole plan.
    pub fn total(&self) -> usize {
        self.0.values().flat_map(|b| b.values()).sum()
    }

    /// Iterate rooms with their branch counts.
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, usize>)> {
        self.0.iter().map(|(room, branches)| (room.as_str(), branches))
    }

    /// Number of rooms with at least one student.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no student was seated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BenchLabel, Student};

    fn seat(room: &str, branch: &str, ticket: &str) -> SeatingAssignment {
        SeatingAssignment {
            student: Student::new("x", ticket, branch, ""),
            block: "A".to_string(),
            floor: "1".to_string(),
            classroom: room.to_string(),
            bench_number: BenchLabel::Single(1),
        }
    }

    #[test]
    fn test_counts_per_room_and_branch() {
        let summary = RoomBranchSummary::from_assignments(&[
            seat("101", "CSE", "1"),
            seat("101", "ECE", "2"),
            seat("101", "CSE", "3"),
            seat("102", "MECH", "4"),
        ]);

        assert_eq!(summary.count("101", "CSE"), 2);
        assert_eq!(summary.count("101", "ECE"), 1);
        assert_eq!(summary.count("102", "CSE"), 0);
        assert_eq!(summary.room_total("101"), 3);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn test_empty() {
        let summary = RoomBranchSummary::from_assignments(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_serializes_as_nested_map() {
        let summary = RoomBranchSummary::from_assignments(&[seat("101", "CSE", "1")]);
        assert_eq!(serde_json::to_string(&summary).unwrap(), r#"{"101":{"CSE":1}}"#);
    }
}
