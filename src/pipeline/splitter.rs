/*!
 * Long-entry splitting (optional pass).
 *
 * Entries that are both long and slow on screen are re-split into several
 * shorter timed blocks: the model divides the original and the translation
 * into parallel natural parts, and the entry's time range is reallocated
 * proportionally to original part length. An incomplete model answer for an
 * entry silently leaves that entry unsplit; the pass never fails a run.
 *
 * This runs strictly after the full translation map exists, since it needs
 * the translated text.
 */

use log::{debug, warn};
use std::collections::HashMap;

use crate::app_config::SplitConfig;
use crate::subtitle::SubtitleEntry;
use crate::translation::{response, TranslationClient, TranslationMap};
use crate::translation::prompts;

use super::composer::OutputUnit;

/// Parallel part sequences for one split entry, pairwise mutual translations
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// The original text divided at natural pause points
    pub original_parts: Vec<String>,
    /// The translated text divided to mirror `original_parts`
    pub translated_parts: Vec<String>,
}

/// One split request for one entry
#[derive(Debug, Clone)]
pub struct SplitTask {
    /// Entry index, doubling as the task number in the prompt
    pub entry_index: usize,
    /// Target part count
    pub parts: usize,
    /// Full original clean text
    pub original: String,
    /// Full translated clean text
    pub translated: String,
}

impl SplitTask {
    /// Combined character cost used for split-batch packing
    fn char_cost(&self) -> usize {
        self.original.chars().count() + self.translated.chars().count()
    }
}

/// Desired number of parts for an entry of this duration.
///
/// Longer entries get more parts, clamped to [2, 4] to avoid degenerate
/// over-splitting.
pub fn target_part_count(duration_ms: u64) -> usize {
    ((duration_ms / 4000) as usize).clamp(2, 4)
}

/// Select the entries eligible for splitting
pub fn select_candidates(
    entries: &[SubtitleEntry],
    map: &TranslationMap,
    config: &SplitConfig,
) -> Vec<SplitTask> {
    entries
        .iter()
        .filter_map(|entry| {
            let original = entry.joined_clean_text();
            if original.chars().count() < config.min_chars {
                return None;
            }
            if entry.duration_ms() < config.min_duration_ms {
                return None;
            }
            Some(SplitTask {
                entry_index: entry.index,
                parts: target_part_count(entry.duration_ms()),
                original,
                translated: map.lookup(entry),
            })
        })
        .collect()
}

/// Pack split tasks into request-sized batches by combined character cost.
///
/// Same discipline as batch planning: the bound is enforced between tasks,
/// and an oversized task still gets a batch of its own.
pub fn pack_tasks(tasks: Vec<SplitTask>, char_budget: usize) -> Vec<Vec<SplitTask>> {
    let mut batches = Vec::new();
    let mut current: Vec<SplitTask> = Vec::new();
    let mut current_chars = 0usize;

    for task in tasks {
        let cost = task.char_cost();
        if !current.is_empty() && current_chars + cost > char_budget {
            batches.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current_chars += cost;
        current.push(task);
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

/// Serialize split tasks into the prompt's task listing
pub fn serialize_tasks(tasks: &[SplitTask]) -> String {
    let mut text = String::new();
    for task in tasks {
        text.push_str(&format!(
            "Task {} (split into {} parts):\nORIGINAL: {}\nTRANSLATED: {}\n\n",
            task.entry_index, task.parts, task.original, task.translated
        ));
    }
    text
}

/// Request splits for one batch of tasks.
///
/// Returns results keyed by entry index; entries with incomplete responses
/// are absent (they keep their single unsplit block).
pub async fn split_batch(
    client: &TranslationClient,
    target_language: &str,
    tasks: &[SplitTask],
) -> HashMap<usize, SplitResult> {
    let prompt = prompts::split_prompt(&serialize_tasks(tasks), target_language);

    let response_text = match client.complete_with_retry(prompt).await {
        Ok(text) => text,
        Err(error) => {
            warn!(
                "Split request failed ({}), keeping {} entries unsplit",
                error,
                tasks.len()
            );
            return HashMap::new();
        }
    };

    let parsed = response::parse_split_lines(&response_text);
    let mut results = HashMap::new();

    for task in tasks {
        let Some(parts) = parsed.get(&task.entry_index) else {
            debug!("No split lines for entry {}, keeping it unsplit", task.entry_index);
            continue;
        };
        if !parts.is_complete(task.parts) {
            debug!(
                "Incomplete split for entry {} (expected {} parts), keeping it unsplit",
                task.entry_index, task.parts
            );
            continue;
        }
        results.insert(
            task.entry_index,
            SplitResult {
                original_parts: parts.original_in_order(task.parts),
                translated_parts: parts.translated_in_order(task.parts),
            },
        );
    }

    results
}

/// Allocate sub-ranges of [start_ms, end_ms] proportional to part lengths.
///
/// Starts are cumulative from the original start; the final part absorbs
/// rounding remainder by ending exactly at the original end time.
pub fn allocate_part_times(start_ms: u64, end_ms: u64, part_lens: &[usize]) -> Vec<(u64, u64)> {
    let duration = end_ms.saturating_sub(start_ms);
    let total: usize = part_lens.iter().sum();
    if part_lens.is_empty() || total == 0 {
        return vec![(start_ms, end_ms)];
    }

    let mut ranges = Vec::with_capacity(part_lens.len());
    let mut cursor = start_ms;

    for (i, &len) in part_lens.iter().enumerate() {
        let part_end = if i == part_lens.len() - 1 {
            end_ms
        } else {
            cursor + duration * len as u64 / total as u64
        };
        ranges.push((cursor, part_end));
        cursor = part_end;
    }

    ranges
}

/// Expand split entries into per-part units and renumber the whole file.
///
/// Units whose index has no split result pass through unchanged (except for
/// renumbering). Input units must be in final presentation order.
pub fn apply_splits(
    units: Vec<OutputUnit>,
    results: &HashMap<usize, SplitResult>,
) -> Vec<OutputUnit> {
    let mut expanded = Vec::with_capacity(units.len());

    for unit in units {
        match results.get(&unit.index) {
            Some(split) => {
                let part_lens: Vec<usize> = split
                    .original_parts
                    .iter()
                    .map(|p| p.chars().count())
                    .collect();
                let ranges = allocate_part_times(unit.start_ms, unit.end_ms, &part_lens);

                for (k, (part_start, part_end)) in ranges.into_iter().enumerate() {
                    expanded.push(OutputUnit {
                        index: 0, // renumbered below
                        start_ms: part_start,
                        end_ms: part_end,
                        template: unit.template.clone(),
                        original_clean: split.original_parts[k].clone(),
                        translated: split.translated_parts[k].clone(),
                    });
                }
            }
            None => expanded.push(unit),
        }
    }

    // The block count changed, so indices are rewritten sequentially
    for (i, unit) in expanded.iter_mut().enumerate() {
        unit.index = i + 1;
    }

    expanded
}
