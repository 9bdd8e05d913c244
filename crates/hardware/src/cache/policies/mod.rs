//! Cache Replacement Policies.
//!
//! Implements the algorithms that pick a victim way within a set.
//!
//! # Policies
//!
//! - `RoundRobin`: One cursor per set, advanced on every hit and every fill.
//! - `Lru`: Least Recently Used.

/// Least Recently Used replacement policy.
pub mod lru;

/// Round-robin cursor replacement policy.
pub mod round_robin;

use std::fmt;

pub use lru::LruPolicy;
pub use round_robin::RoundRobinPolicy;

use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Updates the policy state when a way is hit or filled.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn update(&mut self, set: usize, way: usize);

    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&mut self, set: usize) -> usize;

    /// Notes that `way` was invalidated by another agent, making it the
    /// next victim of `set`.
    fn invalidate(&mut self, set: usize, way: usize);
}

/// Builds the configured policy for a cache of `sets` x `ways` lines.
pub fn build(policy: PolicyType, sets: usize, ways: usize) -> Box<dyn ReplacementPolicy> {
    match policy {
        PolicyType::RoundRobin => Box::new(RoundRobinPolicy::new(sets, ways)),
        PolicyType::Lru => Box::new(LruPolicy::new(sets, ways)),
    }
}
