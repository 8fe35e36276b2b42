//! AllocationPolicy: tunables for seat allocation.

use serde::{Deserialize, Serialize};
use crate::canonical::canonical_hash_hex;
use crate::{DEFAULT_MAX_BENCHES_PER_ROOM, DEFAULT_POLICY_VERSION};

/// Environment variable overriding the per-room bench ceiling.
pub const MAX_BENCHES_ENV: &str = "SEATING_MAX_BENCHES";

/// Environment variable fixing the shuffle seed.
pub const SEED_ENV: &str = "SEATING_SEED";

/// Allocation policy.
///
/// ## Parameters
///
/// - `max_benches_per_room`: hard ceiling on benches used in any room,
///   whatever the layout says
/// - `seed`: when set, the pool is shuffled with a ChaCha8 generator seeded
///   from this value, making the plan reproducible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Policy version identifier.
    pub version: String,
    /// Benches used at most per room.
    pub max_benches_per_room: u32,
    /// Shuffle seed. `None` draws from the thread-local generator.
    pub seed: Option<u64>,
}

impl AllocationPolicy {
    /// Create a policy with an explicit ceiling and seed.
    pub fn new(max_benches_per_room: u32, seed: Option<u64>) -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            max_benches_per_room,
            seed,
        }
    }

    /// Read overrides from the environment.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let default = Self::default();

        let max_benches_per_room = match std::env::var(MAX_BENCHES_ENV) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    var = MAX_BENCHES_ENV,
                    value = %raw,
                    fallback = default.max_benches_per_room,
                    "Ignoring unparsable bench ceiling"
                );
                default.max_benches_per_room
            }),
            Err(_) => default.max_benches_per_room,
        };

        let seed = std::env::var(SEED_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse().ok());

        Self::new(max_benches_per_room, seed)
    }

    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Hash of the policy parameters, for provenance in logs.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }

    /// Same policy with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BENCHES_PER_ROOM, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ceiling() {
        let policy = AllocationPolicy::default();
        assert_eq!(policy.max_benches_per_room, 45);
        assert_eq!(policy.seed, None);
        assert_eq!(policy.policy_id(), DEFAULT_POLICY_VERSION);
    }

    #[test]
    fn test_params_hash_determinism() {
        assert_eq!(
            AllocationPolicy::default().params_hash(),
            AllocationPolicy::default().params_hash()
        );
    }

    #[test]
    fn test_params_hash_changes() {
        let base = AllocationPolicy::default();
        let seeded = AllocationPolicy::default().with_seed(7);
        let narrow = AllocationPolicy::new(30, None);

        assert_ne!(base.params_hash(), seeded.params_hash());
        assert_ne!(base.params_hash(), narrow.params_hash());
    }
}
