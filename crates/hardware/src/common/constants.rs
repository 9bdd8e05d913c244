//! Global Simulator Constants.
//!
//! This module defines the constants shared by the address decoder, the
//! cache model and the trace driver. It includes:
//! 1. **Address Constants:** The simulated physical address width and its mask.
//! 2. **Trace Constants:** Characters recognised by the trace parser.

/// Width of a simulated physical address in bits.
///
/// Every tag, index and offset width is derived against this value, and
/// addresses with bits set above it are rejected by the cache.
pub const ADDRESS_WIDTH: u32 = 32;

/// Mask selecting the low `ADDRESS_WIDTH` bits of a raw address.
pub const ADDRESS_MASK: u64 = (1 << ADDRESS_WIDTH) - 1;

/// Prefix starting a comment in trace files.
pub const TRACE_COMMENT: char = '#';

/// Prefix marking a hexadecimal address in trace files.
pub const HEX_PREFIX: &str = "0x";
