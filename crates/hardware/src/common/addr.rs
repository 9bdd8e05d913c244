//! Cache geometry and address decoding.
//!
//! This module turns cache dimensions into bit-field widths and splits raw
//! addresses along them. It provides the following:
//! 1. **Geometry:** Validated set count and tag/index/offset widths derived once per cache.
//! 2. **Decoding:** Pure tag, index and block-address extraction for a given geometry.
//! 3. **Composition:** Rebuilding a block address from a tag and an index.

use serde::Serialize;

use super::constants::{ADDRESS_MASK, ADDRESS_WIDTH};
use super::error::ConfigError;

/// Derived cache geometry.
///
/// Always satisfies `offset_bits + index_bits + tag_bits == ADDRESS_WIDTH`
/// with `tag_bits >= 1`. A fully associative cache has `index_bits == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Total capacity in bytes.
    pub capacity: usize,
    /// Block (line) size in bytes.
    pub block_size: usize,
    /// Ways per set.
    pub associativity: usize,
    /// Number of sets.
    pub num_sets: usize,
    /// Number of lines (`num_sets * associativity`).
    pub num_lines: usize,
    /// Width of the block offset field.
    pub offset_bits: u32,
    /// Width of the set index field.
    pub index_bits: u32,
    /// Width of the tag field.
    pub tag_bits: u32,
}

impl Geometry {
    /// Validates cache dimensions and derives the bit-field widths.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Total capacity in bytes.
    /// * `block_size` - Block size in bytes.
    /// * `associativity` - Number of ways per set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any dimension is not a positive power of
    /// two, if the capacity cannot hold one full set, or if offset and index
    /// together would leave no tag bits.
    pub fn new(capacity: usize, block_size: usize, associativity: usize) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("capacity", capacity),
            ("block_size", block_size),
            ("associativity", associativity),
        ] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { field, value });
            }
        }

        let set_bytes = block_size
            .checked_mul(associativity)
            .filter(|&bytes| bytes <= capacity)
            .ok_or(ConfigError::CapacityTooSmall {
                capacity,
                block_size,
                associativity,
            })?;

        let num_sets = capacity / set_bytes;
        let offset_bits = block_size.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits >= ADDRESS_WIDTH {
            return Err(ConfigError::TagWidthExhausted {
                offset_bits,
                index_bits,
            });
        }

        Ok(Self {
            capacity,
            block_size,
            associativity,
            num_sets,
            num_lines: num_sets * associativity,
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_WIDTH - offset_bits - index_bits,
        })
    }

    /// Returns true when every block may live in any way (a single set).
    pub const fn is_fully_associative(&self) -> bool {
        self.index_bits == 0
    }
}

/// Splits addresses into tag, index and offset for one geometry.
///
/// Masks are computed once at construction; every method is a handful of
/// shifts and ands. Bits above `ADDRESS_WIDTH` are discarded before the tag
/// is extracted, so callers that need to reject wide addresses must do so
/// before decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    index_bits: u32,
    offset_mask: u64,
    index_mask: u64,
    tag_mask: u64,
}

impl AddressDecoder {
    /// Creates a decoder for the given geometry.
    pub const fn new(geometry: &Geometry) -> Self {
        Self {
            offset_bits: geometry.offset_bits,
            index_bits: geometry.index_bits,
            offset_mask: low_mask(geometry.offset_bits),
            index_mask: low_mask(geometry.index_bits),
            tag_mask: low_mask(geometry.tag_bits),
        }
    }

    /// Extracts the tag: everything above the index field, truncated to `tag_bits`.
    #[inline(always)]
    pub const fn tag(&self, addr: u64) -> u64 {
        ((addr & ADDRESS_MASK) >> (self.offset_bits + self.index_bits)) & self.tag_mask
    }

    /// Extracts the set index. Always 0 for a fully associative cache.
    #[inline(always)]
    pub const fn index(&self, addr: u64) -> usize {
        ((addr >> self.offset_bits) & self.index_mask) as usize
    }

    /// Extracts the byte offset within the block.
    #[inline(always)]
    pub const fn offset(&self, addr: u64) -> u64 {
        addr & self.offset_mask
    }

    /// Clears the offset bits, preserving every higher bit.
    #[inline(always)]
    pub const fn block_address(&self, addr: u64) -> u64 {
        addr & !self.offset_mask
    }

    /// Mask covering the offset bits.
    pub const fn offset_mask(&self) -> u64 {
        self.offset_mask
    }

    /// Rebuilds the block address that a `(tag, index)` pair names.
    pub const fn compose(&self, tag: u64, index: usize) -> u64 {
        ((tag & self.tag_mask) << (self.offset_bits + self.index_bits))
            | (((index as u64) & self.index_mask) << self.offset_bits)
    }
}

/// Mask with the low `bits` bits set; `bits` never exceeds `ADDRESS_WIDTH`.
const fn low_mask(bits: u32) -> u64 {
    if bits == 0 { 0 } else { u64::MAX >> (u64::BITS - bits) }
}
