/*!
 * Sentence grouping.
 *
 * Consecutive subtitle entries are merged into semantic groups so the
 * translator can see whole sentences instead of arbitrary line fragments.
 * The partition is greedy, single-pass and order-preserving: groups are
 * never merged or re-shuffled afterwards.
 */

use crate::subtitle::SubtitleEntry;

/// Punctuation that closes a sentence, Latin and full-width
const SENTENCE_ENDERS: [&str; 7] = [".", "?", "!", ".\"", "\u{3002}", "\u{ff01}", "\u{ff1f}"];

/// An ordered, non-empty run of entries forming one semantic unit
#[derive(Debug, Clone)]
pub struct SentenceGroup {
    /// The entries of the group, in file order
    pub entries: Vec<SubtitleEntry>,
}

impl SentenceGroup {
    /// Total clean-text character count across all entries
    pub fn char_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.joined_clean_text().chars().count())
            .sum()
    }
}

/// Whether a group ending in this text should be closed
fn is_sentence_boundary(text: &str) -> bool {
    if SENTENCE_ENDERS.iter().any(|ender| text.ends_with(ender)) {
        return true;
    }
    // All-caps captions ("NO!", "BREAKING NEWS") read as complete utterances
    is_all_caps(text)
}

/// True when the text has cased characters and none of them is lowercase
fn is_all_caps(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Partition entries into sentence groups.
///
/// A group closes when its latest entry's clean text ends a sentence, or
/// when it reaches `max_entries_per_group`. Whatever remains open at end of
/// input forms the final group.
pub fn group_entries(entries: &[SubtitleEntry], max_entries_per_group: usize) -> Vec<SentenceGroup> {
    let max_per_group = max_entries_per_group.max(1);
    let mut groups = Vec::new();
    let mut current: Vec<SubtitleEntry> = Vec::new();

    for entry in entries {
        current.push(entry.clone());

        let text = entry.joined_clean_text();
        if is_sentence_boundary(&text) || current.len() >= max_per_group {
            groups.push(SentenceGroup {
                entries: std::mem::take(&mut current),
            });
        }
    }

    if !current.is_empty() {
        groups.push(SentenceGroup { entries: current });
    }

    groups
}
