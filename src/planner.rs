//! End-to-end planning: files → roster → pool → seats → summary.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::allocator::SeatAllocator;
use crate::ingest::{RosterError, RosterFile, RosterMerger, TextExtractor};
use crate::policy::AllocationPolicy;
use crate::shuffle::shuffle_pool;
use crate::summary::RoomBranchSummary;
use crate::types::{ExamConfig, LayoutConfig, LayoutError, SeatingPlan, Student};

/// Error type for a planning run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The layout failed validation.
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),
    /// The roster could not be built.
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// What a caller receives: a plan, or a single human-readable error.
///
/// Serializes as either the plan object or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanOutcome {
    /// The batch was rejected.
    Failed {
        /// Reason shown to the user.
        error: String,
    },
    /// Seating was computed.
    Planned(Box<SeatingPlan>),
}

impl PlanOutcome {
    /// The plan, if one was produced.
    pub fn plan(&self) -> Option<&SeatingPlan> {
        match self {
            Self::Planned(plan) => Some(plan.as_ref()),
            Self::Failed { .. } => None,
        }
    }

    /// The error message, if the batch was rejected.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error.as_str()),
            Self::Planned(_) => None,
        }
    }
}

impl From<Result<SeatingPlan, PlanError>> for PlanOutcome {
    fn from(result: Result<SeatingPlan, PlanError>) -> Self {
        match result {
            Ok(plan) => Self::Planned(Box::new(plan)),
            Err(e) => Self::Failed { error: e.to_string() },
        }
    }
}

/// Seating planner.
///
/// Owns the text extractor for page-based rosters and the allocation
/// policy. Each call is independent; nothing is kept between runs.
pub struct SeatingPlanner<E: TextExtractor> {
    extractor: E,
    policy: AllocationPolicy,
}

impl<E: TextExtractor> SeatingPlanner<E> {
    /// Create a planner.
    pub fn new(extractor: E, policy: AllocationPolicy) -> Self {
        Self { extractor, policy }
    }

    /// Get the policy.
    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Plan and fold any error into a [`PlanOutcome`].
    pub async fn run(&self, files: &[RosterFile], layout: &LayoutConfig) -> PlanOutcome {
        let result = self.plan(files, layout).await;
        if let Err(e) = &result {
            warn!(error = %e, files = files.len(), "Seating plan rejected");
        }
        result.into()
    }

    /// Validate the layout, merge the rosters and seat everyone that fits.
    ///
    /// Shuffling uses a ChaCha8 generator when the policy carries a seed and
    /// the thread-local generator otherwise.
    pub async fn plan(&self, files: &[RosterFile], layout: &LayoutConfig) -> Result<SeatingPlan, PlanError> {
        layout.validate()?;
        let roster = RosterMerger::new(&self.extractor).merge(files).await?;

        let plan = match self.policy.seed {
            Some(seed) => self.arrange(roster, layout, &mut ChaCha8Rng::seed_from_u64(seed)),
            None => self.arrange(roster, layout, &mut rand::rng()),
        };
        Ok(plan)
    }

    /// Seat an already merged roster using `rng` for the shuffle.
    pub fn arrange<R: Rng + ?Sized>(&self, roster: Vec<Student>, layout: &LayoutConfig, rng: &mut R) -> SeatingPlan {
        let pool = shuffle_pool(roster.clone(), rng);
        let allocation = SeatAllocator::new(&self.policy).allocate(pool, layout);
        let room_branch_summary = RoomBranchSummary::from_assignments(&allocation.assignments);

        let plan = SeatingPlan {
            seating_plan: allocation.assignments,
            exam_config: ExamConfig::from(layout),
            room_branch_summary,
            all_students: roster,
        };

        info!(
            policy_id = %self.policy.policy_id(),
            params_hash = %self.policy.params_hash(),
            roster = plan.all_students.len(),
            seated = plan.seated_count(),
            capacity = allocation.capacity,
            unseated = allocation.unseated.len(),
            same_branch_benches = allocation.same_branch_benches,
            fingerprint = %plan.fingerprint(),
            "Seating plan computed"
        );
        plan
    }
}
