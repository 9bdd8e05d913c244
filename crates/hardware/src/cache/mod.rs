//! Set-Associative Cache Model.
//!
//! This module implements a configurable set-associative cache with a
//! pluggable coherence protocol. It models hits, misses, dirty writebacks and
//! per-line coherence state for a trace of local and snooped accesses.
//!
//! Every access follows the same path: decode the address, scan the set for
//! the tag, let the protocol table resolve the hit or miss, let the
//! replacement policy choose or track the way, and record statistics.

/// Cache line and line storage types.
pub mod line;

/// Cache replacement policy implementations (round-robin, LRU).
pub mod policies;

/// Coherence protocol transition tables (Plain, VI, MSI).
pub mod protocol;

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, trace};

use self::line::{CacheLine, CoherenceState, LineArena};
use self::policies::ReplacementPolicy;
use self::protocol::CoherenceProtocol;
use crate::common::{AccessError, AccessKind, AddressDecoder, ConfigError, Geometry, ADDRESS_MASK};
use crate::config::CacheConfig;
use crate::stats::{CacheReport, CacheStats};

/// Everything one access did to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AccessOutcome {
    /// The block was found in a valid line.
    pub hit: bool,
    /// A dirty block was flushed (snoop flush or eviction).
    pub writeback: bool,
    /// A store found the block Shared.
    pub upgrade_miss: bool,
    /// Set the address maps to.
    pub set: usize,
    /// Way that was hit or filled; `None` when the set was left untouched.
    pub way: Option<usize>,
    /// State of that way after the access (`Invalid` when untouched).
    pub state: CoherenceState,
    /// Block address of a valid line displaced by a fill.
    pub evicted: Option<u64>,
}

impl AccessOutcome {
    const fn untouched(set: usize) -> Self {
        Self {
            hit: false,
            writeback: false,
            upgrade_miss: false,
            set,
            way: None,
            state: CoherenceState::Invalid,
            evicted: None,
        }
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} set={}", if self.hit { "hit " } else { "miss" }, self.set)?;
        match self.way {
            Some(way) => write!(f, " way={way} -> {}", self.state.letter())?,
            None => write!(f, " (no effect)")?,
        }
        if self.upgrade_miss {
            write!(f, " upgrade")?;
        }
        if self.writeback {
            write!(f, " writeback")?;
        }
        if let Some(block) = self.evicted {
            write!(f, " evict={block:#x}")?;
        }
        Ok(())
    }
}

/// A single simulated cache.
///
/// Owns its geometry, line storage, replacement state, protocol table and
/// statistics. Independent instances share nothing.
#[derive(Debug)]
pub struct Cache {
    config: CacheConfig,
    geometry: Geometry,
    decoder: AddressDecoder,
    lines: LineArena,
    policy: Box<dyn ReplacementPolicy>,
    protocol: Box<dyn CoherenceProtocol>,
    stats: CacheStats,
}

impl Cache {
    /// Builds an empty cache: every line Invalid, every counter zero.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache dimensions, protocol and replacement policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the dimensions are not positive powers of
    /// two or do not leave room for a tag.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        info!(
            capacity = geometry.capacity,
            block_size = geometry.block_size,
            associativity = geometry.associativity,
            sets = geometry.num_sets,
            tag_bits = geometry.tag_bits,
            index_bits = geometry.index_bits,
            offset_bits = geometry.offset_bits,
            protocol = %config.protocol,
            policy = %config.policy,
            "cache constructed"
        );

        Ok(Self {
            config: config.clone(),
            geometry,
            decoder: AddressDecoder::new(&geometry),
            lines: LineArena::new(geometry.num_sets, geometry.associativity),
            policy: policies::build(config.policy, geometry.num_sets, geometry.associativity),
            protocol: protocol::build(config),
            stats: CacheStats::default(),
        })
    }

    /// Simulates one access and returns whether it hit.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AddressOutOfRange`] if `address` is wider than
    /// `ADDRESS_WIDTH`; the cache and its statistics are left untouched.
    pub fn access(&mut self, address: u64, kind: AccessKind) -> Result<bool, AccessError> {
        self.access_detailed(address, kind).map(|outcome| outcome.hit)
    }

    /// Simulates one access and reports everything it did.
    ///
    /// At most one set changes. Statistics always change.
    ///
    /// # Errors
    ///
    /// Same as [`Cache::access`].
    pub fn access_detailed(&mut self, address: u64, kind: AccessKind) -> Result<AccessOutcome, AccessError> {
        if address & !ADDRESS_MASK != 0 {
            return Err(AccessError::AddressOutOfRange { address });
        }

        let tag = self.decoder.tag(address);
        let set = self.decoder.index(address);
        let outcome = match self.lines.find(set, tag) {
            Some(way) => self.resolve_hit(set, way, kind),
            None => self.resolve_miss(set, tag, kind),
        };

        self.stats.update(outcome.hit, outcome.writeback, outcome.upgrade_miss, kind);
        trace!(address, %kind, set, tag, %outcome, "access");
        Ok(outcome)
    }

    /// Applies the protocol's hit transition to `way` of `set`.
    fn resolve_hit(&mut self, set: usize, way: usize, kind: AccessKind) -> AccessOutcome {
        let line = &mut self.lines.set_mut(set)[way];
        let effect = self.protocol.on_hit(line, kind);
        line.state = effect.next;
        line.dirty = effect.dirty;

        if kind.is_local() {
            self.policy.update(set, way);
        } else if !effect.next.is_valid() {
            debug!(set, way, %kind, writeback = effect.writeback, "snoop invalidated line");
            if self.protocol.repositions_on_invalidate() {
                self.policy.invalidate(set, way);
            }
        }

        AccessOutcome {
            hit: true,
            writeback: effect.writeback,
            upgrade_miss: effect.upgrade_miss,
            set,
            way: Some(way),
            state: effect.next,
            evicted: None,
        }
    }

    /// Fills the victim way of `set` if the protocol installs on this miss.
    fn resolve_miss(&mut self, set: usize, tag: u64, kind: AccessKind) -> AccessOutcome {
        let Some(state) = self.protocol.on_miss(kind) else {
            return AccessOutcome::untouched(set);
        };

        let way = self.policy.get_victim(set);
        let victim = &mut self.lines.set_mut(set)[way];
        let writeback = victim.needs_writeback();
        let evicted_tag = victim.state.is_valid().then_some(victim.tag);
        if writeback {
            debug!(set, way, victim_tag = victim.tag, "dirty eviction");
        }

        *victim = CacheLine {
            tag,
            dirty: kind == AccessKind::Store,
            state,
        };
        self.policy.update(set, way);
        let evicted = evicted_tag.map(|victim_tag| self.decoder.compose(victim_tag, set));

        AccessOutcome {
            hit: false,
            writeback,
            upgrade_miss: false,
            set,
            way: Some(way),
            state,
            evicted,
        }
    }

    /// Writes back every dirty line and invalidates the whole cache.
    ///
    /// Returns the number of writebacks, which are also added to
    /// [`CacheStats::flush_writebacks`]. Replacement state is kept.
    pub fn flush(&mut self) -> u64 {
        let mut writebacks = 0;
        for line in self.lines.iter_mut() {
            writebacks += u64::from(line.needs_writeback());
            *line = CacheLine::default();
        }
        self.stats.record_flush(writebacks);
        debug!(writebacks, "cache flushed");
        writebacks
    }

    /// Line currently holding the block of `address`, without side effects.
    ///
    /// Bits above `ADDRESS_WIDTH` are ignored.
    pub fn probe(&self, address: u64) -> Option<&CacheLine> {
        let set = self.decoder.index(address);
        let tag = self.decoder.tag(address);
        self.lines.set(set).iter().find(|line| line.holds(tag))
    }

    /// Returns true if the block of `address` is cached.
    pub fn contains(&self, address: u64) -> bool {
        self.probe(address).is_some()
    }

    /// Coherence state of the block of `address`; `Invalid` if absent.
    pub fn line_state(&self, address: u64) -> CoherenceState {
        self.probe(address).map_or(CoherenceState::Invalid, |line| line.state)
    }

    /// Lines of one set, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets`.
    pub fn set_lines(&self, set: usize) -> &[CacheLine] {
        self.lines.set(set)
    }

    /// Number of valid lines across the cache.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.state.is_valid()).count()
    }

    /// Configuration the cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Derived geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Counters accumulated since construction.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Snapshot of counters and geometry for reporting.
    pub fn report(&self) -> CacheReport {
        CacheReport {
            protocol: self.protocol.kind(),
            policy: self.config.policy,
            geometry: self.geometry,
            stats: self.stats.clone(),
        }
    }
}
