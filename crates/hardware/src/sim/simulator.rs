//! Trace-driven simulator: feeds trace records into one cache.

use std::io::BufRead;

use tracing::warn;

use super::trace::{self, TraceRecord};
use crate::cache::{AccessOutcome, Cache};
use crate::common::{ConfigError, TraceError};
use crate::config::CacheConfig;
use crate::stats::CacheReport;

/// Top-level simulator: a cache plus the number of records replayed into it.
#[derive(Debug)]
pub struct Simulator {
    /// The simulated cache.
    pub cache: Cache,
    records: u64,
}

impl Simulator {
    /// Creates a simulator around a freshly built cache.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache cannot be built.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: Cache::new(config)?,
            records: 0,
        })
    }

    /// Replays a single record.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Access`] naming the record's line if the cache
    /// rejects it.
    pub fn step(&mut self, record: &TraceRecord) -> Result<AccessOutcome, TraceError> {
        let outcome = self
            .cache
            .access_detailed(record.address, record.kind)
            .map_err(|source| TraceError::Access {
                line: record.line,
                source,
            })?;
        self.records += 1;
        Ok(outcome)
    }

    /// Replays a whole trace.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed or rejected record.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<u64, TraceError> {
        self.run_with(reader, |_, _| {})
    }

    /// Replays a whole trace, calling `observe` after every access.
    ///
    /// Returns the number of records replayed by this call.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed or rejected record.
    pub fn run_with<R, F>(&mut self, reader: R, mut observe: F) -> Result<u64, TraceError>
    where
        R: BufRead,
        F: FnMut(&TraceRecord, &AccessOutcome),
    {
        let start = self.records;
        for record in trace::records(reader) {
            let record = record.inspect_err(|e| warn!(error = %e, "trace aborted"))?;
            let outcome = self.step(&record).inspect_err(|e| warn!(error = %e, "trace aborted"))?;
            observe(&record, &outcome);
        }
        Ok(self.records - start)
    }

    /// Total records replayed since construction.
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Snapshot of the cache's counters and geometry.
    pub fn report(&self) -> CacheReport {
        self.cache.report()
    }
}
