//! Trace parsing and replay tests.

/// Trace record parsing.
pub mod trace;
