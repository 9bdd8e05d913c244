//! Cache Replacement Policy Tests.
//!
//! Verifies the victim selection logic for the round-robin and LRU policies.
//! Each policy implements `ReplacementPolicy` with `update(set, way)`,
//! `get_victim(set) -> usize` and `invalidate(set, way)`.

use cachesim_core::cache::policies::{LruPolicy, ReplacementPolicy, RoundRobinPolicy};

// ══════════════════════════════════════════════════════════
// 1. Round-robin
// ══════════════════════════════════════════════════════════

#[test]
fn round_robin_starts_at_way_zero() {
    let mut policy = RoundRobinPolicy::new(4, 4);
    for set in 0..4 {
        assert_eq!(policy.get_victim(set), 0);
    }
}

/// The cursor moves on every update, whichever way was touched.
#[test]
fn round_robin_advances_regardless_of_way() {
    let mut policy = RoundRobinPolicy::new(1, 4);
    policy.update(0, 3);
    assert_eq!(policy.cursor(0), 1);
    policy.update(0, 3);
    assert_eq!(policy.cursor(0), 2);
    policy.update(0, 0);
    assert_eq!(policy.get_victim(0), 3);
}

#[test]
fn round_robin_wraps_around() {
    let mut policy = RoundRobinPolicy::new(1, 2);
    policy.update(0, 0);
    policy.update(0, 1);
    assert_eq!(policy.get_victim(0), 0);
}

#[test]
fn round_robin_sets_are_independent() {
    let mut policy = RoundRobinPolicy::new(2, 4);
    policy.update(1, 0);
    policy.update(1, 1);
    assert_eq!(policy.get_victim(0), 0);
    assert_eq!(policy.get_victim(1), 2);
}

#[test]
fn round_robin_invalidate_points_cursor_at_way() {
    let mut policy = RoundRobinPolicy::new(1, 4);
    policy.invalidate(0, 2);
    assert_eq!(policy.get_victim(0), 2);
    policy.update(0, 2);
    assert_eq!(policy.get_victim(0), 3);
}

#[test]
fn round_robin_single_way_always_victimizes_way_zero() {
    let mut policy = RoundRobinPolicy::new(8, 1);
    policy.update(5, 0);
    policy.update(5, 0);
    assert_eq!(policy.get_victim(5), 0);
}

// ══════════════════════════════════════════════════════════
// 2. LRU
// ══════════════════════════════════════════════════════════

/// Initial stack is [0, 1, 2, 3] with index 0 = MRU, so the victim is 3.
#[test]
fn lru_initial_victim_is_last_way() {
    let mut policy = LruPolicy::new(1, 4);
    assert_eq!(policy.get_victim(0), 3);
}

#[test]
fn lru_sequential_access_reorders() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.update(0, way);
    }
    // Stack: [3, 2, 1, 0].
    assert_eq!(policy.get_victim(0), 0);
}

#[test]
fn lru_evicts_true_lru_after_reaccess() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.update(0, way);
    }
    policy.update(0, 0);
    // Stack: [0, 3, 2, 1].
    assert_eq!(policy.get_victim(0), 1);
    policy.update(0, 1);
    // Stack: [1, 0, 3, 2].
    assert_eq!(policy.get_victim(0), 2);
}

#[test]
fn lru_repeated_access_same_way() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.update(0, way);
    }
    policy.update(0, 3);
    policy.update(0, 3);
    assert_eq!(policy.get_victim(0), 0);
}

#[test]
fn lru_invalidate_moves_way_to_bottom() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.update(0, way);
    }
    // Stack: [3, 2, 1, 0]; invalidating 3 gives [2, 1, 0, 3].
    policy.invalidate(0, 3);
    assert_eq!(policy.get_victim(0), 3);
    policy.update(0, 3);
    assert_eq!(policy.get_victim(0), 0);
}

#[test]
fn lru_sets_are_independent() {
    let mut policy = LruPolicy::new(2, 2);
    policy.update(0, 1);
    assert_eq!(policy.get_victim(0), 0);
    assert_eq!(policy.get_victim(1), 1);
}
