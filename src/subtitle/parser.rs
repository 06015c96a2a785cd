/*!
 * SRT parser.
 *
 * Converts raw SRT text into an ordered sequence of subtitle entries. The
 * parser is deliberately forgiving: a malformed block is skipped with a
 * warning and scanning resumes at the next line, so one bad block never
 * aborts the whole file. Index values are trusted as given and are not
 * renumbered here.
 */

use log::{debug, warn};

use super::template::LineTemplate;
use super::time::{self, RANGE_SEPARATOR};

/// One SRT block: index, time range, and one or more text lines
#[derive(Debug, Clone)]
pub struct SubtitleEntry {
    /// Presentation order index as given in the file
    pub index: usize,

    /// Start time in milliseconds
    pub start_ms: u64,

    /// End time in milliseconds
    pub end_ms: u64,

    /// One template per physical text line of the block
    pub lines: Vec<LineTemplate>,
}

impl SubtitleEntry {
    /// Duration of the entry in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Space-joined clean text of all lines, as sent to the translator
    pub fn joined_clean_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.clean_text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The original block text with markup intact, lines joined by newline
    pub fn original_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.original_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format template of the first line, used to rehydrate translated text
    pub fn first_line_template(&self) -> &str {
        self.lines
            .first()
            .map(|l| l.template.as_str())
            .unwrap_or("{}")
    }
}

/// Parse SRT file content into subtitle entries.
///
/// Never fails; an empty result means no block could be parsed.
pub fn parse(content: &str) -> Vec<SubtitleEntry> {
    let lines: Vec<&str> = content.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        let index: usize = match trimmed.parse() {
            Ok(n) if !trimmed.is_empty() => n,
            _ => {
                i += 1;
                continue;
            }
        };

        // The line after the index must carry the time range, otherwise the
        // block is malformed and scanning resumes at that line.
        i += 1;
        let Some(&range_line) = lines.get(i) else {
            warn!("Truncated block at end of file (index {})", index);
            break;
        };
        if !range_line.contains(RANGE_SEPARATOR) {
            warn!("Block {} is missing its time range, skipping", index);
            continue;
        }
        let (start_ms, end_ms) = time::parse_time_range(range_line);
        i += 1;

        // Collect text lines until a blank line or end of input
        let mut templates = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            templates.push(LineTemplate::from_line(lines[i]));
            i += 1;
        }

        if templates.iter().all(|t| t.clean_text.is_empty()) {
            debug!("Block {} has no text after tag stripping, dropping", index);
            continue;
        }

        entries.push(SubtitleEntry {
            index,
            start_ms,
            end_ms,
            lines: templates,
        });
    }

    if entries.is_empty() {
        warn!("No valid subtitle entries found in content");
    }

    entries
}
