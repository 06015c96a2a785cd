/*!
 * Batch planning.
 *
 * Packs sentence groups into request-sized batches bounded by an estimated
 * character budget. Groups are never split: a single group larger than the
 * budget gets a batch of its own rather than being dropped or broken up.
 */

use log::debug;

use crate::subtitle::SubtitleEntry;
use super::grouper::SentenceGroup;

/// An ordered run of sentence groups sent in one translation request
#[derive(Debug, Clone)]
pub struct Batch {
    /// The groups of the batch, in file order
    pub groups: Vec<SentenceGroup>,
}

impl Batch {
    /// Total clean-text character estimate across all groups
    pub fn char_count(&self) -> usize {
        self.groups.iter().map(|g| g.char_count()).sum()
    }

    /// Number of entries across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Iterate over every entry of every group, in order
    pub fn entries(&self) -> impl Iterator<Item = &SubtitleEntry> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }
}

/// Pack groups into batches bounded by `char_budget` estimated characters.
///
/// The bound is only enforced between groups; an oversized group still
/// lands alone in its own batch.
pub fn plan_batches(groups: Vec<SentenceGroup>, char_budget: usize) -> Vec<Batch> {
    let mut batches = Vec::new();
    let mut current: Vec<SentenceGroup> = Vec::new();
    let mut current_chars = 0usize;

    for group in groups {
        let group_chars = group.char_count();

        if !current.is_empty() && current_chars + group_chars > char_budget {
            batches.push(Batch {
                groups: std::mem::take(&mut current),
            });
            current_chars = 0;
        }

        if group_chars > char_budget {
            debug!(
                "Group of {} chars exceeds the {} char budget, placing it alone",
                group_chars, char_budget
            );
        }

        current_chars += group_chars;
        current.push(group);
    }

    if !current.is_empty() {
        batches.push(Batch { groups: current });
    }

    batches
}
