/*!
 * Tests for the response line-grammar parsers
 */

use srtran::translation::response::{parse_indexed_lines, parse_split_lines};

/// Test well-formed indexed lines parse into the map
#[test]
fn test_parse_indexed_lines_withValidLines_shouldParseAll() {
    let response = "[1] Bonjour\n[2] le monde\n[10] Dix\n";
    let map = parse_indexed_lines(response);

    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&1).map(String::as_str), Some("Bonjour"));
    assert_eq!(map.get(&2).map(String::as_str), Some("le monde"));
    assert_eq!(map.get(&10).map(String::as_str), Some("Dix"));
}

/// Test chatter outside the grammar is discarded
#[test]
fn test_parse_indexed_lines_withChatter_shouldDropNonMatching() {
    let response = "Here are the translations:\n[1] Oui\nHope that helps!\n[GROUP END]\n";
    let map = parse_indexed_lines(response);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1).map(String::as_str), Some("Oui"));
}

/// Test empty translations are dropped rather than kept as blanks
#[test]
fn test_parse_indexed_lines_withEmptyText_shouldDropLine() {
    let map = parse_indexed_lines("[1] \n[2] real\n");
    assert_eq!(map.len(), 1);
    assert!(map.get(&1).is_none());
}

/// Test a duplicated index keeps the last occurrence
#[test]
fn test_parse_indexed_lines_withDuplicateIndex_shouldKeepLast() {
    let map = parse_indexed_lines("[1] first\n[1] second\n");
    assert_eq!(map.get(&1).map(String::as_str), Some("second"));
}

/// Test indented lines still match after trimming
#[test]
fn test_parse_indexed_lines_withIndentedLines_shouldMatch() {
    let map = parse_indexed_lines("  [3] trimmed\n");
    assert_eq!(map.get(&3).map(String::as_str), Some("trimmed"));
}

/// Test split lines parse into per-task part maps
#[test]
fn test_parse_split_lines_withValidLines_shouldGroupByTask() {
    let response = "\
[SPLIT-7-ORIGINAL-1] first half\n\
[SPLIT-7-ORIGINAL-2] second half\n\
[SPLIT-7-TRANSLATED-1] première moitié\n\
[SPLIT-7-TRANSLATED-2] seconde moitié\n";
    let map = parse_split_lines(response);
    let parts = map.get(&7).expect("task 7 missing");

    assert!(parts.is_complete(2));
    assert_eq!(parts.original_in_order(2), vec!["first half", "second half"]);
    assert_eq!(
        parts.translated_in_order(2),
        vec!["première moitié", "seconde moitié"]
    );
}

/// Test a missing part makes the task incomplete
#[test]
fn test_parse_split_lines_withMissingPart_shouldBeIncomplete() {
    let response = "\
[SPLIT-1-ORIGINAL-1] a\n\
[SPLIT-1-ORIGINAL-2] b\n\
[SPLIT-1-TRANSLATED-1] x\n";
    let map = parse_split_lines(response);
    assert!(!map.get(&1).unwrap().is_complete(2));
}

/// Test completeness is checked against the expected count, not what arrived
#[test]
fn test_is_complete_withFewerPartsThanExpected_shouldFail() {
    let response = "\
[SPLIT-1-ORIGINAL-1] a\n\
[SPLIT-1-TRANSLATED-1] x\n";
    let map = parse_split_lines(response);
    assert!(map.get(&1).unwrap().is_complete(1));
    assert!(!map.get(&1).unwrap().is_complete(2));
}

/// Test malformed split lines are dropped
#[test]
fn test_parse_split_lines_withMalformedLines_shouldDropThem() {
    let response = "\
[SPLIT-1-BOTH-1] wrong side\n\
[SPLIT-x-ORIGINAL-1] bad task\n\
[1] plain indexed line\n";
    assert!(parse_split_lines(response).is_empty());
}
