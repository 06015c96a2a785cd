/*!
 * Tests for the SRT parser
 */

use srtran::subtitle::parser::parse;

use crate::common::SAMPLE_SRT;

/// Test a well-formed file parses all blocks
#[test]
fn test_parse_withWellFormedFile_shouldReturnAllEntries() {
    let entries = parse(SAMPLE_SRT);
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].index, 1);
    assert_eq!(entries[0].start_ms, 1_000);
    assert_eq!(entries[0].end_ms, 4_000);
    assert_eq!(entries[0].joined_clean_text(), "This is a test subtitle");

    assert_eq!(entries[2].joined_clean_text(), "And one with markup.");
    assert_eq!(entries[2].original_text(), "<i>And one with markup.</i>");
}

/// Test multi-line blocks join their clean text with spaces
#[test]
fn test_parse_withMultiLineBlock_shouldJoinCleanText() {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nFirst line\nSecond line\n\n";
    let entries = parse(content);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].lines.len(), 2);
    assert_eq!(entries[0].joined_clean_text(), "First line Second line");
    assert_eq!(entries[0].original_text(), "First line\nSecond line");
}

/// Test a block missing its time range is skipped, later blocks survive
#[test]
fn test_parse_withMissingTimeRange_shouldSkipBlockOnly() {
    let content = "1\nnot a time range\nOrphan text\n\n\
                   2\n00:00:05,000 --> 00:00:09,000\nGood block\n\n";
    let entries = parse(content);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].index, 2);
    assert_eq!(entries[0].joined_clean_text(), "Good block");
}

/// Test stray text between blocks is ignored
#[test]
fn test_parse_withStrayText_shouldIgnoreIt() {
    let content = "junk before\n\n1\n00:00:01,000 --> 00:00:02,000\nHello\n\ntrailing junk\n";
    let entries = parse(content);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].joined_clean_text(), "Hello");
}

/// Test file indices are trusted as given and not renumbered
#[test]
fn test_parse_withNonSequentialIndices_shouldKeepThem() {
    let content = "7\n00:00:01,000 --> 00:00:02,000\nSeven\n\n\
                   3\n00:00:03,000 --> 00:00:04,000\nThree\n\n";
    let entries = parse(content);
    assert_eq!(entries[0].index, 7);
    assert_eq!(entries[1].index, 3);
}

/// Test a block whose text is markup only is dropped
#[test]
fn test_parse_withMarkupOnlyBlock_shouldDropIt() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n{\\an8}\n\n\
                   2\n00:00:03,000 --> 00:00:04,000\nReal text\n\n";
    let entries = parse(content);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].index, 2);
}

/// Test a truncated final block does not panic
#[test]
fn test_parse_withTruncatedFinalBlock_shouldStopCleanly() {
    let entries = parse("1\n");
    assert!(entries.is_empty());
}

/// Test empty input yields no entries
#[test]
fn test_parse_withEmptyInput_shouldReturnNoEntries() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n\n").is_empty());
}

/// Test duration of an entry
#[test]
fn test_duration_withValidEntry_shouldSubtractTimes() {
    let entries = parse("1\n00:00:05,000 --> 00:00:09,500\nText.\n\n");
    assert_eq!(entries[0].duration_ms(), 4_500);
}
