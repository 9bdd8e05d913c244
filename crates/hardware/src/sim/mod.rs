//! Trace replay.
//!
//! Parses access traces and drives a cache with them, reporting the first
//! malformed record by line number.

/// Trace-driven simulator.
pub mod simulator;

/// Trace record parsing.
pub mod trace;

pub use simulator::Simulator;
pub use trace::TraceRecord;
