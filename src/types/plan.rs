//! The seating plan handed back to callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::canonical::canonical_hash_hex;
use crate::summary::RoomBranchSummary;
use super::assignment::SeatingAssignment;
use super::layout::LayoutConfig;
use super::student::Student;

/// Exam window echoed back with the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamConfig {
    /// First exam day.
    pub start_date: NaiveDate,
    /// Last exam day.
    pub end_date: NaiveDate,
    /// Session timings as configured.
    pub exam_timings: Vec<String>,
    /// The same seating is reused for every session. Always `true`.
    pub use_same_plan: bool,
}

impl From<&LayoutConfig> for ExamConfig {
    fn from(layout: &LayoutConfig) -> Self {
        Self {
            start_date: layout.start_date,
            end_date: layout.end_date,
            exam_timings: layout.exam_timings.clone(),
            use_same_plan: true,
        }
    }
}

/// Complete result of one planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingPlan {
    /// Assignments sorted by hall ticket number.
    pub seating_plan: Vec<SeatingAssignment>,
    /// Exam window the plan applies to.
    pub exam_config: ExamConfig,
    /// Headcount per room and branch.
    pub room_branch_summary: RoomBranchSummary,
    /// Merged roster in file and row order, seated or not.
    pub all_students: Vec<Student>,
}

impl SeatingPlan {
    /// Students from the roster that did not get a seat.
    ///
    /// Computed as a multiset difference so duplicated roster rows are
    /// accounted for individually. Roster order is preserved.
    pub fn unseated_students(&self) -> Vec<&Student> {
        let mut seated: BTreeMap<&Student, usize> = BTreeMap::new();
        for assignment in &self.seating_plan {
            *seated.entry(&assignment.student).or_default() += 1;
        }

        self.all_students
            .iter()
            .filter(|student| match seated.get_mut(*student) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    false
                }
                _ => true,
            })
            .collect()
    }

    /// Number of seated students.
    pub fn seated_count(&self) -> usize {
        self.seating_plan.len()
    }

    /// Deterministic identity of the plan contents.
    ///
    /// Two plans with the same assignments, exam window and roster share a
    /// fingerprint.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }
}
