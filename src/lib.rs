//! # seating-kernel
//!
//! Roster ingestion and deterministic exam seat allocation.
//!
//! The kernel answers one question:
//!
//! > Given a pile of roster files and a venue layout, who sits where?
//!
//! ## Core Contract
//!
//! 1. Merge roster files of unknown column naming into one student list
//! 2. Shuffle the roster by branch and seat it room by room
//! 3. Never put two students of one branch on a two-seat bench while a
//!    student of another branch is still waiting
//! 4. Report a per-room, per-branch headcount
//!
//! ## Architecture
//!
//! ```text
//! RosterFile[] → RosterMerger → shuffle_pool → SeatAllocator → RoomBranchSummary
//!                     ↓                              ↓
//!               TextExtractor                 AllocationPolicy
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same roster + same layout + same seed → identical plan fingerprint
//! - Assignments are ordered by hall ticket number, compared byte-wise
//! - Summary maps iterate in key order
//!
//! Excess students beyond the layout capacity are left unseated without
//! error; [`SeatingPlan::unseated_students`] lists them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod policy;
pub mod ingest;
pub mod shuffle;
pub mod allocator;
pub mod summary;
pub mod planner;
pub mod canonical;

// Re-exports
pub use types::{
    Student, Block, Floor, Room, BenchWidth, LayoutConfig, LayoutError,
    BenchLabel, SeatingAssignment, ExamConfig, SeatingPlan,
};
pub use policy::AllocationPolicy;
pub use ingest::{
    RosterFile, RosterFormat, RosterMerger, RosterError, IngestError,
    CanonicalField, ColumnMap, TextExtractor, PlainTextExtractor,
};
#[cfg(feature = "pdf")]
pub use ingest::PdfTextExtractor;
pub use shuffle::{partition, shuffle_pool, BranchGroup};
pub use allocator::{Allocation, Pool, SeatAllocator};
pub use summary::RoomBranchSummary;
pub use planner::{PlanError, PlanOutcome, SeatingPlanner};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};

/// Hard ceiling on benches used per room unless the policy overrides it.
pub const DEFAULT_MAX_BENCHES_PER_ROOM: u32 = 45;

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "allocation_policy_v1";
