//! Cache line storage.
//!
//! Lines live in one contiguous arena indexed by `set * ways + way`. A set is
//! never a separate allocation; it is a slice view into the arena.

use serde::Serialize;

/// Coherence state of a single line.
///
/// The legal subset depends on the protocol: Plain and VI use
/// `{Invalid, Valid}`, MSI uses `{Invalid, Shared, Modified}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CoherenceState {
    /// Line holds no block; its tag is meaningless.
    #[default]
    Invalid,
    /// Line holds a block (Plain and VI).
    Valid,
    /// Line holds a clean block other agents may also hold (MSI).
    Shared,
    /// Line holds the only, dirty copy of a block (MSI).
    Modified,
}

impl CoherenceState {
    /// Returns true for every state that holds a block.
    #[inline(always)]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Single-letter mnemonic used in verbose traces.
    pub const fn letter(self) -> char {
        match self {
            Self::Invalid => 'I',
            Self::Valid => 'V',
            Self::Shared => 'S',
            Self::Modified => 'M',
        }
    }
}

/// Cache line entry containing tag, dirty bit and coherence state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the held block, meaningful only when `state` is valid.
    pub tag: u64,
    /// Block holds data not yet written back.
    pub dirty: bool,
    /// Coherence state.
    pub state: CoherenceState,
}

impl CacheLine {
    /// Returns true if this line currently holds the block with `tag`.
    #[inline(always)]
    pub const fn holds(&self, tag: u64) -> bool {
        self.state.is_valid() && self.tag == tag
    }

    /// Returns true if evicting this line requires a writeback.
    #[inline(always)]
    pub const fn needs_writeback(&self) -> bool {
        self.state.is_valid() && self.dirty
    }
}

/// Flat storage for every line of a cache.
#[derive(Clone, Debug)]
pub struct LineArena {
    lines: Vec<CacheLine>,
    ways: usize,
}

impl LineArena {
    /// Allocates `sets * ways` invalid lines.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); sets * ways],
            ways,
        }
    }

    /// Lines of one set, in way order.
    #[inline(always)]
    pub fn set(&self, set: usize) -> &[CacheLine] {
        let base = set * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Mutable lines of one set, in way order.
    #[inline(always)]
    pub fn set_mut(&mut self, set: usize) -> &mut [CacheLine] {
        let base = set * self.ways;
        &mut self.lines[base..base + self.ways]
    }

    /// Way of `set` holding `tag`, if any. Linear scan over the ways.
    #[inline(always)]
    pub fn find(&self, set: usize, tag: u64) -> Option<usize> {
        self.set(set).iter().position(|line| line.holds(tag))
    }

    /// Every line, set-major.
    pub fn iter(&self) -> impl Iterator<Item = &CacheLine> {
        self.lines.iter()
    }

    /// Every line, set-major, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CacheLine> {
        self.lines.iter_mut()
    }
}
