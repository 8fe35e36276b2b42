//! Allocation policy definitions.

pub mod allocation;

pub use allocation::{AllocationPolicy, MAX_BENCHES_ENV, SEED_ENV};
