//! VI Protocol Tests.
//!
//! Local accesses behave as in Plain; every snoop hit invalidates.

use cachesim_core::cache::line::CoherenceState;
use cachesim_core::common::AccessKind;
use cachesim_core::config::{Protocol, ReplacementPolicy};
use rstest::rstest;

use crate::common::{load, small_cache, small_cache_with, store, touch};

#[rstest]
#[case::ld_miss(AccessKind::ExternalLoadMiss)]
#[case::st_miss(AccessKind::ExternalStoreMiss)]
fn snoop_hit_invalidates_clean_line(#[case] snoop: AccessKind) {
    let mut cache = small_cache(Protocol::Vi);
    assert!(!load(&mut cache, 0x10));

    let out = touch(&mut cache, snoop, 0x10);
    assert!(out.hit);
    assert!(!out.writeback);
    assert_eq!(out.state, CoherenceState::Invalid);
    assert_eq!(cache.line_state(0x10), CoherenceState::Invalid);
}

#[rstest]
#[case::ld_miss(AccessKind::ExternalLoadMiss)]
#[case::st_miss(AccessKind::ExternalStoreMiss)]
fn snoop_hit_flushes_dirty_line(#[case] snoop: AccessKind) {
    let mut cache = small_cache(Protocol::Vi);
    assert!(!store(&mut cache, 0x10));

    let out = touch(&mut cache, snoop, 0x10);
    assert!(out.hit);
    assert!(out.writeback);
    assert_eq!(cache.stats().kind(snoop).writebacks, 1);
}

/// The flag only applies to Plain; VI ignores it entirely.
#[test]
fn invalidation_ignores_lru_on_invalidate_flag() {
    let mut with_flag = small_cache_with(Protocol::Vi, ReplacementPolicy::RoundRobin, true);
    let mut without = small_cache(Protocol::Vi);

    for cache in [&mut with_flag, &mut without] {
        assert!(!load(cache, 0));
        assert!(!load(cache, 32));
        assert!(touch(cache, AccessKind::ExternalLoadMiss, 32).hit);
        let out = touch(cache, AccessKind::Load, 64);
        assert_eq!(out.way, Some(0), "cursor is not moved to the invalidated way");
        assert_eq!(out.evicted, Some(0));
    }
}

#[test]
fn second_snoop_misses() {
    let mut cache = small_cache(Protocol::Vi);
    assert!(!load(&mut cache, 0x0));
    assert!(touch(&mut cache, AccessKind::ExternalStoreMiss, 0x0).hit);
    assert!(!touch(&mut cache, AccessKind::ExternalStoreMiss, 0x0).hit);
    assert_eq!(cache.stats().st_miss.hits, 1);
    assert_eq!(cache.stats().st_miss.misses, 1);
}
