//! Set-associative cache simulator library.
//!
//! This crate models a configurable set-associative CPU cache driven by an
//! access trace:
//! 1. **Geometry:** Tag/index/offset widths derived from capacity, block size and associativity.
//! 2. **Replacement:** Per-set victim selection (round-robin cursor or LRU).
//! 3. **Coherence:** Plain, VI and MSI transition tables for local and snooped accesses.
//! 4. **Statistics:** Per-access-kind hit, miss, writeback and upgrade-miss counters.
//! 5. **Simulation:** Trace parsing and replay.

/// Cache model (lines, replacement policies, coherence protocols).
pub mod cache;
/// Common types and constants (geometry, address decoding, access kinds, errors).
pub mod common;
/// Cache configuration (defaults, protocol and policy enums).
pub mod config;
/// Trace parsing and replay.
pub mod sim;
/// Cache statistics collection and reporting.
pub mod stats;

/// Main cache type; construct with `Cache::new`.
pub use crate::cache::Cache;
/// Cache configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Trace-driven simulator wrapping one cache.
pub use crate::sim::Simulator;
