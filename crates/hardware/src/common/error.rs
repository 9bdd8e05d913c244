//! Error definitions.
//!
//! This module defines every failure the cache model can report. It provides:
//! 1. **Configuration Errors:** Geometry that cannot be built (fatal at construction).
//! 2. **Access Errors:** A single malformed access (address too wide, unknown kind).
//! 3. **Trace Errors:** Driver failures annotated with the offending trace line.

use std::io;

use thiserror::Error;

use super::constants::ADDRESS_WIDTH;

/// Cache geometry that violates the construction invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A dimension is zero or not a power of two.
    #[error("{field} must be a positive power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Value that was supplied.
        value: usize,
    },

    /// Capacity cannot hold even a single set.
    #[error(
        "capacity {capacity} B is smaller than one set ({block_size} B x {associativity} ways)"
    )]
    CapacityTooSmall {
        /// Total capacity in bytes.
        capacity: usize,
        /// Block size in bytes.
        block_size: usize,
        /// Number of ways per set.
        associativity: usize,
    },

    /// Offset and index consume the whole address, leaving no tag bits.
    #[error(
        "offset ({offset_bits} bits) and index ({index_bits} bits) leave no tag bits in a {}-bit address",
        ADDRESS_WIDTH
    )]
    TagWidthExhausted {
        /// Derived offset width.
        offset_bits: u32,
        /// Derived index width.
        index_bits: u32,
    },
}

/// A single access that cannot be simulated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The address has bits set above `ADDRESS_WIDTH`.
    #[error("address {address:#x} does not fit in {} bits", ADDRESS_WIDTH)]
    AddressOutOfRange {
        /// The raw address as supplied.
        address: u64,
    },

    /// The action code does not name an access kind.
    #[error("unrecognized access kind `{0}`")]
    UnknownKind(String),
}

/// Failure while replaying a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A record is syntactically malformed.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number of the record.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A well-formed record was rejected by the cache.
    #[error("line {line}: {source}")]
    Access {
        /// 1-based line number of the record.
        line: usize,
        /// Underlying access failure.
        #[source]
        source: AccessError,
    },
}
