//! Trace parsing.
//!
//! A trace is plain text with one record per line: `<kind> <address>`.
//! Kinds are `0`/`l`/`load`, `1`/`s`/`store`, `2`/`lm`/`ld_miss` and
//! `3`/`sm`/`st_miss`. Addresses are hexadecimal with a `0x` prefix, or
//! decimal. Blank lines and `#` comments are skipped.

use std::io::BufRead;

use crate::common::constants::{HEX_PREFIX, TRACE_COMMENT};
use crate::common::{AccessKind, TraceError};

/// One access read from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// 1-based line number in the trace.
    pub line: usize,
    /// Access kind.
    pub kind: AccessKind,
    /// Raw address, not yet checked against the address width.
    pub address: u64,
}

/// Parses one trace line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// [`TraceError::Access`] for an unknown kind, [`TraceError::Parse`] for a
/// missing or malformed address or trailing garbage.
pub fn parse_line(line: usize, text: &str) -> Result<Option<TraceRecord>, TraceError> {
    let body = text
        .split_once(TRACE_COMMENT)
        .map_or(text, |(before, _)| before)
        .trim();
    if body.is_empty() {
        return Ok(None);
    }

    let mut fields = body.split_whitespace();
    let (Some(kind), Some(address)) = (fields.next(), fields.next()) else {
        return Err(TraceError::Parse {
            line,
            reason: format!("expected `<kind> <address>`, got `{body}`"),
        });
    };
    if let Some(extra) = fields.next() {
        return Err(TraceError::Parse {
            line,
            reason: format!("unexpected trailing field `{extra}`"),
        });
    }

    let kind = kind
        .parse::<AccessKind>()
        .map_err(|source| TraceError::Access { line, source })?;
    let address = parse_address(address).ok_or_else(|| TraceError::Parse {
        line,
        reason: format!("invalid address `{address}`"),
    })?;

    Ok(Some(TraceRecord {
        line,
        kind,
        address,
    }))
}

/// Parses a `0x`-prefixed hexadecimal or a decimal address.
///
/// Only digits are accepted after the prefix; a sign is malformed.
pub fn parse_address(text: &str) -> Option<u64> {
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = match lower.strip_prefix(HEX_PREFIX) {
        Some(hex) => (hex, 16),
        None => (lower.as_str(), 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Iterates over the records of a trace.
///
/// Malformed records and read errors are yielded as `Err` items in line
/// order; iteration continues past them, so callers decide whether to stop.
pub fn records<R: BufRead>(reader: R) -> impl Iterator<Item = Result<TraceRecord, TraceError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, text)| match text {
            Ok(text) => parse_line(i + 1, &text).transpose(),
            Err(e) => Some(Err(TraceError::Io(e))),
        })
}
