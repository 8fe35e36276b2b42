//! Branch partitioning and pool shuffling.
//!
//! The pool is built in two independent random steps:
//!
//! 1. every branch group is shuffled internally
//! 2. the order of the branch groups is shuffled
//!
//! Students of one branch stay contiguous in the pool. Mixing branches on a
//! bench is the allocator's job, not this module's.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::types::Student;

/// Students sharing one exact (case-sensitive) branch string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchGroup {
    /// Branch key.
    pub branch: String,
    /// Members in current order.
    pub students: Vec<Student>,
}

/// Group a roster by branch.
///
/// Groups appear in order of first appearance in the roster and keep roster
/// order internally, so the partition itself is deterministic.
pub fn partition(roster: Vec<Student>) -> Vec<BranchGroup> {
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    let mut groups: Vec<BranchGroup> = Vec::new();

    for student in roster {
        let slot = match index.get(&student.branch) {
            Some(&slot) => slot,
            None => {
                index.insert(student.branch.clone(), groups.len());
                groups.push(BranchGroup {
                    branch: student.branch.clone(),
                    students: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].students.push(student);
    }

    groups
}

/// Build the allocation pool from a roster.
///
/// Shuffles each branch group, then the group order, and concatenates.
pub fn shuffle_pool<R: Rng + ?Sized>(roster: Vec<Student>, rng: &mut R) -> Vec<Student> {
    let mut groups = partition(roster);
    for group in &mut groups {
        group.students.shuffle(rng);
    }
    groups.shuffle(rng);

    tracing::debug!(
        branches = groups.len(),
        order = ?groups.iter().map(|g| g.branch.as_str()).collect::<Vec<_>>(),
        "Shuffled branch groups"
    );

    groups.into_iter().flat_map(|g| g.students).collect()
}
