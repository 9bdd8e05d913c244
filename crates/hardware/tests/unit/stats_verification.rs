//! # Statistics Verification
//!
//! Verifies that `CacheStats` accumulates per-kind counters correctly, that
//! aggregates are computed on demand, and that reports carry the geometry.

use cachesim_core::common::AccessKind;
use cachesim_core::config::{Protocol, ReplacementPolicy};
use cachesim_core::stats::{CacheStats, KindCounters};
use pretty_assertions::assert_eq;

use crate::common::{load, small_cache, store, touch};

#[test]
fn update_increments_only_the_matching_kind() {
    let mut stats = CacheStats::default();
    stats.update(true, false, false, AccessKind::Load);
    stats.update(false, true, false, AccessKind::Load);
    stats.update(true, false, true, AccessKind::Store);

    assert_eq!(
        stats.load,
        KindCounters {
            accesses: 2,
            hits: 1,
            misses: 1,
            writebacks: 1,
            upgrade_misses: 0,
        }
    );
    assert_eq!(
        stats.store,
        KindCounters {
            accesses: 1,
            hits: 1,
            misses: 0,
            writebacks: 0,
            upgrade_misses: 1,
        }
    );
    assert_eq!(stats.ld_miss, KindCounters::default());
    assert_eq!(stats.st_miss, KindCounters::default());
}

#[test]
fn aggregates_sum_every_kind() {
    let mut stats = CacheStats::default();
    for kind in AccessKind::ALL {
        stats.update(true, true, false, kind);
        stats.update(false, false, false, kind);
    }
    assert_eq!(stats.accesses(), 8);
    assert_eq!(stats.hits(), 4);
    assert_eq!(stats.misses(), 4);
    assert_eq!(stats.writebacks(), 4);
    assert_eq!(stats.upgrade_misses(), 0);
}

#[test]
fn rates_handle_zero_accesses() {
    let stats = CacheStats::default();
    assert!(stats.local_hit_rate().abs() < f64::EPSILON);
    assert!(stats.load.hit_rate().abs() < f64::EPSILON);
}

#[test]
fn local_hit_rate_ignores_snoops() {
    let mut stats = CacheStats::default();
    stats.update(true, false, false, AccessKind::Load);
    stats.update(false, false, false, AccessKind::Store);
    stats.update(true, false, false, AccessKind::ExternalLoadMiss);
    assert!((stats.local_hit_rate() - 50.0).abs() < 1e-9);
}

#[test]
fn cache_counts_snoops_separately() {
    let mut cache = small_cache(Protocol::Msi);
    assert!(!store(&mut cache, 0));
    assert!(touch(&mut cache, AccessKind::ExternalLoadMiss, 0).hit);
    assert!(!touch(&mut cache, AccessKind::ExternalStoreMiss, 0x40).hit);
    assert!(load(&mut cache, 0));

    let stats = cache.stats();
    assert_eq!(stats.store.misses, 1);
    assert_eq!(stats.ld_miss.hits, 1);
    assert_eq!(stats.ld_miss.writebacks, 1);
    assert_eq!(stats.st_miss.misses, 1);
    assert_eq!(stats.load.hits, 1);
    assert_eq!(stats.accesses(), 4);
}

#[test]
fn report_carries_geometry_and_selectors() {
    let mut cache = small_cache(Protocol::Vi);
    assert!(!load(&mut cache, 0));
    let report = cache.report();

    assert_eq!(report.protocol, Protocol::Vi);
    assert_eq!(report.policy, ReplacementPolicy::RoundRobin);
    assert_eq!(report.geometry.num_sets, 2);
    assert_eq!(report.geometry.tag_bits, 27);
    assert_eq!(report.stats.load.misses, 1);
}

#[test]
fn report_text_lists_counters() {
    let mut cache = small_cache(Protocol::Plain);
    assert!(!store(&mut cache, 0));
    assert!(store(&mut cache, 0));
    let text = cache.report().to_string();

    assert!(text.contains("CACHE SIMULATION STATISTICS"));
    assert!(text.contains("protocol                 plain"));
    assert!(text.contains("accesses                 2"));
    assert!(text.contains("bits tag/index/offset  27/1/4"));
    assert!(text.contains("local_hit_rate           50.00%"));
}

#[test]
fn report_serializes_to_json() {
    let mut cache = small_cache(Protocol::Msi);
    assert!(!store(&mut cache, 0));
    let json = serde_json::to_value(cache.report()).unwrap();

    assert_eq!(json["protocol"], "MSI");
    assert_eq!(json["policy"], "ROUNDROBIN");
    assert_eq!(json["geometry"]["num_sets"], 2);
    assert_eq!(json["stats"]["store"]["misses"], 1);
    assert_eq!(json["stats"]["flush_writebacks"], 0);
}
