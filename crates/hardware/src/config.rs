//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structure and enums used to
//! parameterize a cache. It provides:
//! 1. **Defaults:** Baseline cache dimensions used when a field is omitted.
//! 2. **Structure:** `CacheConfig`, deserializable from JSON.
//! 3. **Enums:** Coherence protocol and replacement policy selectors.
//!
//! Configuration is supplied as JSON (`--config`) or assembled from CLI flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::common::Geometry;

/// Default configuration constants for the simulator.
///
/// These values define the baseline cache when a field is not explicitly
/// provided in a JSON configuration.
mod defaults {
    /// Default cache capacity in bytes (4 KiB).
    pub const CAPACITY: usize = 4096;

    /// Default block size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const BLOCK_SIZE: usize = 64;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;
}

/// Coherence protocol variants.
///
/// Selects the transition table applied to every line of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// No coherence: lines are Valid or Invalid and snoops only observe.
    #[default]
    #[serde(alias = "Plain", alias = "plain", alias = "NONE", alias = "none")]
    Plain,
    /// Valid/Invalid: every snoop hit invalidates the line.
    #[serde(alias = "Vi", alias = "vi")]
    Vi,
    /// Modified/Shared/Invalid.
    #[serde(alias = "Msi", alias = "msi")]
    Msi,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::Vi => "vi",
            Self::Msi => "msi",
        })
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "none" => Ok(Self::Plain),
            "vi" => Ok(Self::Vi),
            "msi" => Ok(Self::Msi),
            other => Err(format!("unknown protocol `{other}` (expected plain, vi or msi)")),
        }
    }
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which way to evict when a new
/// block must be installed into a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Round-robin cursor per set, advanced on every hit and every fill.
    #[default]
    #[serde(alias = "RoundRobin", alias = "round_robin", alias = "RR", alias = "rr")]
    RoundRobin,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the way that was accessed least recently.
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RoundRobin => "round-robin",
            Self::Lru => "lru",
        })
    }
}

impl FromStr for ReplacementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rr" | "round-robin" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "lru" => Ok(Self::Lru),
            other => Err(format!("unknown replacement policy `{other}` (expected rr or lru)")),
        }
    }
}

/// Configuration for a single cache instance.
///
/// Immutable once a [`Cache`](crate::cache::Cache) has been built from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Total cache capacity in bytes
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: usize,

    /// Block size in bytes
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: usize,

    /// Coherence protocol
    #[serde(default)]
    pub protocol: Protocol,

    /// Plain protocol only: invalidate a line hit by a snoop and make its
    /// way the next replacement victim.
    #[serde(default)]
    pub lru_on_invalidate: bool,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default capacity in bytes.
    const fn default_capacity() -> usize {
        defaults::CAPACITY
    }

    /// Returns the default block size in bytes.
    const fn default_block_size() -> usize {
        defaults::BLOCK_SIZE
    }

    /// Returns the default associativity.
    const fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Creates a configuration with the given dimensions and protocol.
    ///
    /// Replacement defaults to round-robin and `lru_on_invalidate` to off.
    pub fn new(capacity: usize, block_size: usize, associativity: usize, protocol: Protocol) -> Self {
        Self {
            capacity,
            block_size,
            associativity,
            protocol,
            ..Self::default()
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// Omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Validates the dimensions and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// See [`Geometry::new`].
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self.capacity, self.block_size, self.associativity)
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 4 KiB direct-mapped cache with 64-byte blocks, no coherence and
    /// round-robin replacement.
    fn default() -> Self {
        Self {
            capacity: defaults::CAPACITY,
            block_size: defaults::BLOCK_SIZE,
            associativity: defaults::ASSOCIATIVITY,
            protocol: Protocol::default(),
            lru_on_invalidate: false,
            policy: ReplacementPolicy::default(),
        }
    }
}
