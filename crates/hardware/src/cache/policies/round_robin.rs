//! Round-Robin Replacement Policy.
//!
//! Each set keeps a single cursor naming its next victim. The cursor moves to
//! the next way whenever the set is touched, whether by a hit or by a fill,
//! regardless of which way was touched. It does not track recency: a
//! frequently hit block is evicted as soon as the cursor comes around to it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(1)
//! - **Space Complexity:** O(S) where S is the number of sets
//! - **Hardware Cost:** Minimal - single counter per set

use super::ReplacementPolicy;

/// Round-robin policy state.
#[derive(Clone, Debug)]
pub struct RoundRobinPolicy {
    /// Next way to be evicted for each set.
    cursor: Vec<usize>,
    /// Number of ways in the cache.
    ways: usize,
}

impl RoundRobinPolicy {
    /// Creates a new round-robin policy with every cursor at way 0.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            cursor: vec![0; sets],
            ways,
        }
    }

    /// Current cursor of `set`.
    pub fn cursor(&self, set: usize) -> usize {
        self.cursor[set]
    }
}

impl ReplacementPolicy for RoundRobinPolicy {
    fn update(&mut self, set: usize, _way: usize) {
        self.cursor[set] = (self.cursor[set] + 1) % self.ways;
    }

    fn get_victim(&mut self, set: usize) -> usize {
        self.cursor[set]
    }

    fn invalidate(&mut self, set: usize, way: usize) {
        self.cursor[set] = way;
    }
}
