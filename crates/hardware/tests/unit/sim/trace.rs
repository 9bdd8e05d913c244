//! Trace Parsing Tests.
//!
//! Covers the record grammar: numeric and mnemonic kinds, hex and decimal
//! addresses, comments, and every malformed-record error.

use cachesim_core::common::{AccessError, AccessKind, TraceError};
use cachesim_core::sim::trace::{self, TraceRecord, parse_address, parse_line};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::numeric_load("0 0x10", AccessKind::Load, 0x10)]
#[case::numeric_store("1 16", AccessKind::Store, 16)]
#[case::numeric_ld_miss("2 0xFF", AccessKind::ExternalLoadMiss, 0xFF)]
#[case::numeric_st_miss("3 0X1a", AccessKind::ExternalStoreMiss, 0x1A)]
#[case::mnemonic_short("sm 0x20", AccessKind::ExternalStoreMiss, 0x20)]
#[case::mnemonic_long("LOAD 0x40", AccessKind::Load, 0x40)]
#[case::trailing_comment("s 0x80   # write back later", AccessKind::Store, 0x80)]
#[case::surrounding_space("  lm\t0x100  ", AccessKind::ExternalLoadMiss, 0x100)]
fn parses_valid_record(#[case] text: &str, #[case] kind: AccessKind, #[case] address: u64) {
    let record = parse_line(7, text).unwrap();
    assert_eq!(record, Some(TraceRecord { line: 7, kind, address }));
}

#[rstest]
#[case::empty("")]
#[case::blank("   \t")]
#[case::comment("# header")]
#[case::indented_comment("    # 0 0x10")]
fn skips_non_records(#[case] text: &str) {
    assert_eq!(parse_line(1, text).unwrap(), None);
}

#[rstest]
#[case::missing_address("0")]
#[case::trailing_field("0 0x10 0x20")]
#[case::bad_hex("0 0xZZ")]
#[case::bad_decimal("0 12a")]
#[case::empty_hex("1 0x")]
#[case::signed_decimal("0 +5")]
#[case::signed_hex("0 0x+5")]
#[case::negative_hex("0 0x-5")]
fn rejects_malformed_record(#[case] text: &str) {
    let err = parse_line(4, text).unwrap_err();
    assert!(matches!(err, TraceError::Parse { line: 4, .. }), "{err:?}");
    assert!(err.to_string().starts_with("line 4:"));
}

#[test]
fn unknown_kind_is_an_access_error() {
    let err = parse_line(9, "7 0x10").unwrap_err();
    match err {
        TraceError::Access { line, source } => {
            assert_eq!(line, 9);
            assert_eq!(source, AccessError::UnknownKind("7".to_string()));
        }
        other => panic!("expected access error, got {other:?}"),
    }
}

#[test]
fn address_parsing() {
    assert_eq!(parse_address("0x0"), Some(0));
    assert_eq!(parse_address("0xffffffff"), Some(0xFFFF_FFFF));
    assert_eq!(parse_address("4096"), Some(4096));
    assert_eq!(parse_address("0xAbC"), Some(0xABC));
    assert_eq!(parse_address("-1"), None);
    assert_eq!(parse_address("+5"), None);
    assert_eq!(parse_address("0x+5"), None);
    assert_eq!(parse_address(""), None);
}

#[test]
fn wide_address_parses_and_is_left_to_the_cache() {
    let record = parse_line(1, "0 0x100000000").unwrap().unwrap();
    assert_eq!(record.address, 1 << 32);
}

#[test]
fn numeric_kind_codes() {
    for (code, kind) in AccessKind::ALL.into_iter().enumerate() {
        assert_eq!(AccessKind::try_from(code as u8), Ok(kind));
    }
    assert_eq!(
        AccessKind::try_from(4u8),
        Err(AccessError::UnknownKind("4".to_string()))
    );
}

#[test]
fn records_keep_source_line_numbers() {
    let text = "# trace\n0 0x0\n\n1 0x10\n  # done\n2 0x20\n";
    let lines: Vec<usize> = trace::records(text.as_bytes())
        .map(|r| r.unwrap().line)
        .collect();
    assert_eq!(lines, vec![2, 4, 6]);
}

#[test]
fn records_surface_errors_in_order() {
    let text = "0 0x0\nbogus 0x10\n1 0x10\n";
    let results: Vec<_> = trace::records(text.as_bytes()).collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(TraceError::Access { line: 2, .. })));
    assert!(results[2].is_ok());
}
