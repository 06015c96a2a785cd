/*!
 * Tests for the SRT timestamp codec
 */

use srtran::subtitle::time::{format_time, format_time_range, parse_time, parse_time_range};

/// Test timestamp parsing and formatting round-trip
#[test]
fn test_parse_time_withValidTimestamp_shouldRoundTrip() {
    let ts = "01:23:45,678";
    let ms = parse_time(ts);
    assert_eq!(ms, 5_025_678);
    assert_eq!(format_time(ms), ts);
}

/// Test parsing tolerates surrounding whitespace
#[test]
fn test_parse_time_withWhitespace_shouldParse() {
    assert_eq!(parse_time("  00:00:05,000  "), 5_000);
}

/// Test malformed timestamps parse to zero instead of failing
#[test]
fn test_parse_time_withMalformedInput_shouldReturnZero() {
    assert_eq!(parse_time("not a timestamp"), 0);
    assert_eq!(parse_time("1:2:3,4"), 0);
    assert_eq!(parse_time("00:00:05.000"), 0);
    assert_eq!(parse_time(""), 0);
}

/// Test formatting of boundary values
#[test]
fn test_format_time_withBoundaryValues_shouldZeroPad() {
    assert_eq!(format_time(0), "00:00:00,000");
    assert_eq!(format_time(999), "00:00:00,999");
    assert_eq!(format_time(3_600_000), "01:00:00,000");
    assert_eq!(format_time(35_999_999), "09:59:59,999");
}

/// Test time range parsing and formatting
#[test]
fn test_parse_time_range_withValidRange_shouldRoundTrip() {
    let line = "00:00:01,000 --> 00:00:04,500";
    let (start, end) = parse_time_range(line);
    assert_eq!(start, 1_000);
    assert_eq!(end, 4_500);
    assert_eq!(format_time_range(start, end), line);
}

/// Test malformed ranges degrade to a zero pair
#[test]
fn test_parse_time_range_withMissingSeparator_shouldReturnZeroPair() {
    assert_eq!(parse_time_range("00:00:01,000 00:00:04,500"), (0, 0));
}

/// Test a range with one bad side keeps the good side
#[test]
fn test_parse_time_range_withOneBadSide_shouldZeroThatSide() {
    let (start, end) = parse_time_range("garbage --> 00:00:04,500");
    assert_eq!(start, 0);
    assert_eq!(end, 4_500);
}
