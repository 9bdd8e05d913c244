//! Coherence protocols.
//!
//! A protocol is a transition table over [`CoherenceState`] keyed by
//! [`AccessKind`]. The cache's control flow is shared: it finds the way
//! holding the tag, asks the protocol what a hit or a miss does, and applies
//! the answer. Adding a protocol means adding an implementation of
//! [`CoherenceProtocol`] and a match arm in [`build`].
//!
//! # Protocols
//!
//! - `Plain`: Valid/Invalid, snoops observe and optionally invalidate.
//! - `Vi`: Valid/Invalid, snoops always invalidate.
//! - `Msi`: Modified/Shared/Invalid.

/// Modified/Shared/Invalid protocol.
pub mod msi;

/// No-coherence protocol.
pub mod plain;

/// Valid/Invalid protocol.
pub mod vi;

use std::fmt;

pub use msi::MsiProtocol;
pub use plain::PlainProtocol;
pub use vi::ViProtocol;

use super::line::{CacheLine, CoherenceState};
use crate::common::AccessKind;
use crate::config::{CacheConfig, Protocol};

/// What a hit does to the line it found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitEffect {
    /// State after the access.
    pub next: CoherenceState,
    /// Dirty bit after the access.
    pub dirty: bool,
    /// Dirty data is flushed to the next level.
    pub writeback: bool,
    /// A store found the block without write ownership.
    pub upgrade_miss: bool,
}

impl HitEffect {
    /// Leaves the line exactly as it is.
    pub const fn unchanged(line: &CacheLine) -> Self {
        Self {
            next: line.state,
            dirty: line.dirty,
            writeback: false,
            upgrade_miss: false,
        }
    }

    /// Flushes dirty data (if any) and moves the line to `next` clean.
    pub const fn flush_to(line: &CacheLine, next: CoherenceState) -> Self {
        Self {
            next,
            dirty: false,
            writeback: line.dirty,
            upgrade_miss: false,
        }
    }
}

/// Per-protocol transition table.
pub trait CoherenceProtocol: Send + Sync + fmt::Debug {
    /// Protocol selector this table implements.
    fn kind(&self) -> Protocol;

    /// Resolves an access that found a valid line holding its tag.
    fn on_hit(&self, line: &CacheLine, kind: AccessKind) -> HitEffect;

    /// State to install on a miss, or `None` if the miss leaves the set untouched.
    fn on_miss(&self, kind: AccessKind) -> Option<CoherenceState>;

    /// Whether a snoop invalidation should make the freed way the next victim.
    fn repositions_on_invalidate(&self) -> bool {
        false
    }
}

/// Builds the transition table selected by `config`.
pub fn build(config: &CacheConfig) -> Box<dyn CoherenceProtocol> {
    match config.protocol {
        Protocol::Plain => Box::new(PlainProtocol::new(config.lru_on_invalidate)),
        Protocol::Vi => Box::new(ViProtocol),
        Protocol::Msi => Box::new(MsiProtocol),
    }
}

/// Local accesses install a `Valid` line; snooped misses are ignored.
///
/// Shared by the two protocols without a Shared state.
const fn install_valid(kind: AccessKind) -> Option<CoherenceState> {
    if kind.is_local() {
        Some(CoherenceState::Valid)
    } else {
        None
    }
}

/// Local hit on a `Valid` line: stores set the dirty bit.
const fn local_valid_hit(line: &CacheLine, kind: AccessKind) -> HitEffect {
    HitEffect {
        dirty: line.dirty || matches!(kind, AccessKind::Store),
        ..HitEffect::unchanged(line)
    }
}
