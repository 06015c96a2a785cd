/*!
 * Strict parsers for model responses.
 *
 * The response contract is a formal line grammar: `[<index>] <text>` for
 * translation batches and `[SPLIT-<task>-<side>-<part>] <text>` for split
 * batches. Any line outside the grammar is discarded; a missing index is
 * handled by the caller's fallback path, never by guessing.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

static INDEXED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d+)\]\s*(.*)$").unwrap()
});

static SPLIT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[SPLIT-(\d+)-(ORIGINAL|TRANSLATED)-(\d+)\]\s*(.*)$").unwrap()
});

/// Parse `[index] text` lines into an index-to-text map.
///
/// Non-matching lines and empty captures are dropped. A duplicated index
/// keeps its last occurrence.
pub fn parse_indexed_lines(response: &str) -> HashMap<usize, String> {
    let mut map = HashMap::new();

    for line in response.lines() {
        let Some(caps) = INDEXED_LINE.captures(line.trim()) else {
            continue;
        };
        let Ok(index) = caps[1].parse::<usize>() else {
            continue;
        };
        let text = caps[2].trim();
        if !text.is_empty() {
            map.insert(index, text.to_string());
        }
    }

    map
}

/// Original/translated part lines collected for one split task
#[derive(Debug, Default, Clone)]
pub struct SplitParts {
    /// Part number to original-side text
    pub original: BTreeMap<usize, String>,
    /// Part number to translated-side text
    pub translated: BTreeMap<usize, String>,
}

impl SplitParts {
    /// Whether every part 1..=expected is present and non-empty on both sides
    pub fn is_complete(&self, expected: usize) -> bool {
        (1..=expected).all(|part| {
            self.original.get(&part).is_some_and(|t| !t.is_empty())
                && self.translated.get(&part).is_some_and(|t| !t.is_empty())
        })
    }

    /// The original-side parts in order
    pub fn original_in_order(&self, expected: usize) -> Vec<String> {
        (1..=expected)
            .filter_map(|part| self.original.get(&part).cloned())
            .collect()
    }

    /// The translated-side parts in order
    pub fn translated_in_order(&self, expected: usize) -> Vec<String> {
        (1..=expected)
            .filter_map(|part| self.translated.get(&part).cloned())
            .collect()
    }
}

/// Parse `[SPLIT-task-side-part] text` lines, keyed by task number
pub fn parse_split_lines(response: &str) -> HashMap<usize, SplitParts> {
    let mut map: HashMap<usize, SplitParts> = HashMap::new();

    for line in response.lines() {
        let Some(caps) = SPLIT_LINE.captures(line.trim()) else {
            continue;
        };
        let (Ok(task), Ok(part)) = (caps[1].parse::<usize>(), caps[3].parse::<usize>()) else {
            continue;
        };
        let text = caps[4].trim();
        if text.is_empty() {
            continue;
        }

        let parts = map.entry(task).or_default();
        match &caps[2] {
            "ORIGINAL" => parts.original.insert(part, text.to_string()),
            _ => parts.translated.insert(part, text.to_string()),
        };
    }

    map
}
