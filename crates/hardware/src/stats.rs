//! Cache statistics collection and reporting.
//!
//! This module tracks the counters fed by every cache access. It provides:
//! 1. **Per-kind counters:** Accesses, hits, misses, writebacks and upgrade misses
//!    for each access kind.
//! 2. **Aggregates:** Totals across kinds, computed on demand.
//! 3. **Reporting:** A read-only report bundling counters with the cache geometry,
//!    printable as text or serializable to JSON.

use std::fmt;

use serde::Serialize;

use crate::common::{AccessKind, Geometry};
use crate::config::{Protocol, ReplacementPolicy};

/// Counters for one access kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KindCounters {
    /// Accesses of this kind.
    pub accesses: u64,
    /// Accesses that found their block.
    pub hits: u64,
    /// Accesses that did not find their block.
    pub misses: u64,
    /// Dirty blocks flushed as a result of these accesses.
    pub writebacks: u64,
    /// Stores that found the block Shared.
    pub upgrade_misses: u64,
}

impl KindCounters {
    /// Hit rate in percent, 0 when there were no accesses.
    pub fn hit_rate(&self) -> f64 {
        percent(self.hits, self.accesses)
    }
}

/// Cache statistics, reset only when the cache is built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Local loads.
    pub load: KindCounters,
    /// Local stores.
    pub store: KindCounters,
    /// Snooped load misses from another agent.
    pub ld_miss: KindCounters,
    /// Snooped store misses from another agent.
    pub st_miss: KindCounters,
    /// Dirty lines written back by an explicit flush.
    pub flush_writebacks: u64,
}

impl CacheStats {
    /// Records the outcome of one access.
    ///
    /// # Arguments
    ///
    /// * `hit` - The access found its block.
    /// * `writeback` - A dirty block was flushed.
    /// * `upgrade_miss` - A store found the block without write ownership.
    /// * `kind` - Kind of the access.
    pub fn update(&mut self, hit: bool, writeback: bool, upgrade_miss: bool, kind: AccessKind) {
        let c = self.kind_mut(kind);
        c.accesses += 1;
        if hit {
            c.hits += 1;
        } else {
            c.misses += 1;
        }
        c.writebacks += u64::from(writeback);
        c.upgrade_misses += u64::from(upgrade_miss);
    }

    /// Records `count` writebacks caused by a flush.
    pub fn record_flush(&mut self, count: u64) {
        self.flush_writebacks += count;
    }

    /// Counters for one access kind.
    pub const fn kind(&self, kind: AccessKind) -> &KindCounters {
        match kind {
            AccessKind::Load => &self.load,
            AccessKind::Store => &self.store,
            AccessKind::ExternalLoadMiss => &self.ld_miss,
            AccessKind::ExternalStoreMiss => &self.st_miss,
        }
    }

    fn kind_mut(&mut self, kind: AccessKind) -> &mut KindCounters {
        match kind {
            AccessKind::Load => &mut self.load,
            AccessKind::Store => &mut self.store,
            AccessKind::ExternalLoadMiss => &mut self.ld_miss,
            AccessKind::ExternalStoreMiss => &mut self.st_miss,
        }
    }

    fn sum(&self, field: impl Fn(&KindCounters) -> u64) -> u64 {
        AccessKind::ALL.iter().map(|&k| field(self.kind(k))).sum()
    }

    /// Total accesses of every kind.
    pub fn accesses(&self) -> u64 {
        self.sum(|c| c.accesses)
    }

    /// Total hits of every kind.
    pub fn hits(&self) -> u64 {
        self.sum(|c| c.hits)
    }

    /// Total misses of every kind.
    pub fn misses(&self) -> u64 {
        self.sum(|c| c.misses)
    }

    /// Total writebacks caused by accesses (flushes excluded).
    pub fn writebacks(&self) -> u64 {
        self.sum(|c| c.writebacks)
    }

    /// Total upgrade misses.
    pub fn upgrade_misses(&self) -> u64 {
        self.sum(|c| c.upgrade_misses)
    }

    /// Hit rate of local accesses in percent.
    pub fn local_hit_rate(&self) -> f64 {
        percent(self.load.hits + self.store.hits, self.load.accesses + self.store.accesses)
    }
}

/// Read-only snapshot handed to reporting code.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CacheReport {
    /// Coherence protocol in use.
    pub protocol: Protocol,
    /// Replacement policy in use.
    pub policy: ReplacementPolicy,
    /// Derived geometry.
    pub geometry: Geometry,
    /// Counters at the time of the snapshot.
    pub stats: CacheStats,
}

impl CacheReport {
    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for CacheReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.geometry;
        let s = &self.stats;
        writeln!(f, "==========================================================")?;
        writeln!(f, "CACHE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "protocol                 {}", self.protocol)?;
        writeln!(f, "policy                   {}", self.policy)?;
        writeln!(
            f,
            "geometry                 {} B, {} B blocks, {}-way",
            g.capacity, g.block_size, g.associativity
        )?;
        writeln!(f, "  sets                   {}", g.num_sets)?;
        writeln!(
            f,
            "  bits tag/index/offset  {}/{}/{}",
            g.tag_bits, g.index_bits, g.offset_bits
        )?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "accesses                 {}", s.accesses())?;
        writeln!(f, "hits                     {}", s.hits())?;
        writeln!(f, "misses                   {}", s.misses())?;
        writeln!(f, "writebacks               {}", s.writebacks())?;
        writeln!(f, "upgrade_misses           {}", s.upgrade_misses())?;
        if s.flush_writebacks > 0 {
            writeln!(f, "flush_writebacks         {}", s.flush_writebacks)?;
        }
        writeln!(f, "local_hit_rate           {:.2}%", s.local_hit_rate())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "BY ACCESS KIND")?;
        for kind in AccessKind::ALL {
            let c = s.kind(kind);
            writeln!(
                f,
                "  {:<8} accesses: {:<10} | hits: {:<10} | hit_rate: {:>6.2}% | wb: {:<8} | upg: {}",
                kind.label(),
                c.accesses,
                c.hits,
                c.hit_rate(),
                c.writebacks,
                c.upgrade_misses
            )?;
        }
        write!(f, "==========================================================")
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}
