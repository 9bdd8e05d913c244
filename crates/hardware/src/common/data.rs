//! Cache Access Kinds.
//!
//! This module defines the classification of accesses delivered to a cache.
//! These kinds are used for the following:
//! 1. **Protocol Dispatch:** Selecting the row of a coherence transition table.
//! 2. **Statistics Tracking:** Partitioning hit/miss counters by access kind.
//! 3. **Trace Decoding:** Mapping numeric or mnemonic trace codes to kinds.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::AccessError;

/// Kind of access presented to the cache.
///
/// `Load` and `Store` originate from the local agent. The two external kinds
/// model another agent's miss observed (snooped) by this cache; they never
/// install lines, they only downgrade or invalidate what is already here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    /// Local data read.
    Load,
    /// Local data write.
    Store,
    /// Another agent missed on a read of this block.
    ExternalLoadMiss,
    /// Another agent missed on a write of this block.
    ExternalStoreMiss,
}

impl AccessKind {
    /// All kinds, in trace-code order.
    pub const ALL: [Self; 4] = [
        Self::Load,
        Self::Store,
        Self::ExternalLoadMiss,
        Self::ExternalStoreMiss,
    ];

    /// Returns true for accesses issued by the local agent.
    #[inline(always)]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Load | Self::Store)
    }

    /// Short label used in reports and verbose traces.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Store => "store",
            Self::ExternalLoadMiss => "ld_miss",
            Self::ExternalStoreMiss => "st_miss",
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for AccessKind {
    type Error = AccessError;

    /// Decodes the numeric trace code (`0`..=`3`).
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| AccessError::UnknownKind(code.to_string()))
    }
}

impl FromStr for AccessKind {
    type Err = AccessError;

    /// Accepts the numeric code or a mnemonic, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "l" | "load" => Ok(Self::Load),
            "1" | "s" | "store" => Ok(Self::Store),
            "2" | "lm" | "ld_miss" => Ok(Self::ExternalLoadMiss),
            "3" | "sm" | "st_miss" => Ok(Self::ExternalStoreMiss),
            _ => Err(AccessError::UnknownKind(s.to_string())),
        }
    }
}
