/*!
 * SRT timestamp codec.
 *
 * Parses and formats `HH:MM:SS,mmm` timestamps and `start --> end` time
 * ranges. Malformed input never raises: it parses to zero and is logged,
 * so one bad timecode cannot abort a whole file.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// The literal separator between the start and end timestamps of a range
pub const RANGE_SEPARATOR: &str = "-->";

static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds.
///
/// Returns 0 on malformed input, with a warning.
pub fn parse_time(text: &str) -> u64 {
    let trimmed = text.trim();
    match TIMESTAMP_REGEX.captures(trimmed) {
        Some(caps) => {
            let field = |i: usize| -> u64 {
                caps.get(i).map_or(0, |m| m.as_str().parse().unwrap_or(0))
            };
            field(1) * 3_600_000 + field(2) * 60_000 + field(3) * 1_000 + field(4)
        }
        None => {
            warn!("Malformed SRT timestamp: {:?}", trimmed);
            0
        }
    }
}

/// Format milliseconds as an SRT timestamp (`HH:MM:SS,mmm`)
pub fn format_time(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse an SRT time range line (`start --> end`) to a millisecond pair.
///
/// Returns (0, 0) on malformed input, with a warning.
pub fn parse_time_range(text: &str) -> (u64, u64) {
    let mut parts = text.splitn(2, RANGE_SEPARATOR);
    match (parts.next(), parts.next()) {
        (Some(start), Some(end)) => (parse_time(start), parse_time(end)),
        _ => {
            warn!("Malformed SRT time range: {:?}", text.trim());
            (0, 0)
        }
    }
}

/// Format a millisecond pair as an SRT time range line
pub fn format_time_range(start_ms: u64, end_ms: u64) -> String {
    format!("{} {} {}", format_time(start_ms), RANGE_SEPARATOR, format_time(end_ms))
}
