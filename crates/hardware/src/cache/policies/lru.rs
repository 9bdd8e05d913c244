//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the way that has not been accessed for the longest time.
//! It maintains a usage stack for each set. When a way is accessed, it is moved
//! to the top (Most Recently Used position). The bottom of the stack represents
//! the Least Recently Used way.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Hardware Cost:** High - requires priority encoding and shifting

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Clone, Debug)]
pub struct LruPolicy {
    /// Usage stacks, one `ways`-long run per set.
    /// Within a run, index 0 is MRU and the last index is LRU.
    usage: Vec<usize>,
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// Initially way `ways - 1` is the LRU way of every set.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        let usage = (0..sets).flat_map(|_| 0..ways).collect();
        Self { usage, ways }
    }

    fn stack(&mut self, set: usize) -> &mut [usize] {
        let base = set * self.ways;
        &mut self.usage[base..base + self.ways]
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Moves the accessed `way` to the MRU position, shifting the others down.
    fn update(&mut self, set: usize, way: usize) {
        let stack = self.stack(set);
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            stack[..=pos].rotate_right(1);
        }
    }

    /// Returns the way at the bottom of the usage stack.
    fn get_victim(&mut self, set: usize) -> usize {
        let ways = self.ways;
        self.stack(set)[ways - 1]
    }

    /// Moves `way` to the LRU position so it is refilled first.
    fn invalidate(&mut self, set: usize, way: usize) {
        let stack = self.stack(set);
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            stack[pos..].rotate_left(1);
        }
    }
}
