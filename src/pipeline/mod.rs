/*!
 * Translation pipeline.
 *
 * This module wires the stages together: parse, group, plan, translate
 * batches concurrently, optionally split long entries, compose output.
 * Batch failures degrade to original text instead of failing the run, so
 * a finished pipeline always emits a complete subtitle file.
 */

pub mod composer;
pub mod grouper;
pub mod planner;
pub mod splitter;

use log::{debug, info};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;

use crate::app_config::Config;
use crate::errors::PipelineError;
use crate::language_utils;
use crate::providers::CompletionService;
use crate::subtitle::parser;
use crate::translation::{TranslationClient, TranslationMap};

pub use composer::{OutputComposer, OutputUnit};
pub use grouper::SentenceGroup;
pub use planner::Batch;
pub use splitter::SplitResult;

/// Counters describing one finished pipeline run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Subtitle entries parsed from the input
    pub entry_count: usize,
    /// Translation batches sent to the completion service
    pub batch_count: usize,
    /// Entries the splitting pass expanded into multiple blocks
    pub split_count: usize,
    /// Blocks written to the output
    pub output_blocks: usize,
}

/// End-to-end subtitle translation pipeline
pub struct TranslationPipeline {
    client: TranslationClient,
    config: Config,
    /// Resolved English name of the target language
    target_language: String,
}

impl TranslationPipeline {
    /// Create a pipeline over a completion service.
    ///
    /// Fails when the configured target language cannot be resolved.
    pub fn new(service: Arc<dyn CompletionService>, config: Config) -> Result<Self, PipelineError> {
        let target_language = language_utils::resolve_language_name(&config.target_language)
            .map_err(|_| PipelineError::UnsupportedLanguage(config.target_language.clone()))?;

        Ok(Self {
            client: TranslationClient::new(service, &config, target_language.clone()),
            config,
            target_language,
        })
    }

    /// Resolved English name of the target language
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate SRT content, streaming composed blocks through `sink`.
    ///
    /// The progress callback receives (completed, total) batch counts as
    /// translation requests finish.
    pub async fn translate(
        &self,
        content: &str,
        mut sink: impl FnMut(&str),
        progress: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<RunSummary, PipelineError> {
        let entries = parser::parse(content);
        if entries.is_empty() {
            return Err(PipelineError::NoEntries);
        }

        let groups = grouper::group_entries(&entries, self.config.grouping.max_entries_per_group);
        let batches = planner::plan_batches(groups, self.config.translation.batch_char_budget);
        info!(
            "Translating {} entries in {} batches to {}",
            entries.len(),
            batches.len(),
            self.target_language
        );

        let map = self.translate_batches(&batches, progress).await;

        let split_results = if self.config.split.enabled {
            self.split_long_entries(&entries, &map).await
        } else {
            HashMap::new()
        };
        let split_count = split_results.len();

        let mut units: Vec<OutputUnit> = entries
            .iter()
            .map(|entry| OutputUnit {
                index: entry.index,
                start_ms: entry.start_ms,
                end_ms: entry.end_ms,
                template: entry.first_line_template().to_string(),
                original_clean: entry.joined_clean_text(),
                translated: map.lookup(entry),
            })
            .collect();

        // Indices are only rewritten when splitting changed the block count
        if !split_results.is_empty() {
            units = splitter::apply_splits(units, &split_results);
        }

        let composer = OutputComposer::new(self.config.display_mode, &self.config.compose);
        for unit in &units {
            sink(&composer.compose_block(unit));
        }

        Ok(RunSummary {
            entry_count: entries.len(),
            batch_count: batches.len(),
            split_count,
            output_blocks: units.len(),
        })
    }

    /// Translate SRT content into a single output string
    pub async fn translate_to_string(&self, content: &str) -> Result<(String, RunSummary), PipelineError> {
        let mut output = String::new();
        let summary = self
            .translate(content, |chunk| output.push_str(chunk), |_, _| {})
            .await?;
        Ok((output, summary))
    }

    /// Run every batch through the completion service concurrently.
    ///
    /// Concurrency is bounded by a semaphore; results are merged in batch
    /// order so later batches win any duplicated index.
    async fn translate_batches(
        &self,
        batches: &[Batch],
        progress: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> TranslationMap {
        // A zero limit would park every task on the semaphore forever
        let concurrency = self.config.translation.concurrent_requests.max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let total_batches = batches.len();
        let completed = Arc::new(AtomicUsize::new(0));

        let mut results: Vec<(usize, TranslationMap)> = stream::iter(batches.iter().enumerate())
            .map(|(batch_index, batch)| {
                let client = self.client.clone();
                let semaphore = semaphore.clone();
                let completed = completed.clone();
                let progress = progress.clone();

                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore closed");
                    debug!(
                        "Translating batch {} of {} ({} entries, {} chars)",
                        batch_index + 1,
                        total_batches,
                        batch.entry_count(),
                        batch.char_count()
                    );

                    let map = client.translate_batch(batch).await;

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress(done, total_batches);
                    (batch_index, map)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        results.sort_by_key(|(batch_index, _)| *batch_index);

        let mut map = TranslationMap::new();
        for (_, batch_map) in results {
            map.merge(batch_map);
        }
        map
    }

    /// Run the split pass for the eligible entries
    async fn split_long_entries(
        &self,
        entries: &[parser::SubtitleEntry],
        map: &TranslationMap,
    ) -> HashMap<usize, SplitResult> {
        let tasks = splitter::select_candidates(entries, map, &self.config.split);
        if tasks.is_empty() {
            debug!("No entries eligible for splitting");
            return HashMap::new();
        }
        info!("Splitting {} long entries", tasks.len());

        let task_batches = splitter::pack_tasks(tasks, self.config.split.char_budget);
        let concurrency = self.config.translation.concurrent_requests.max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency));

        let batch_results: Vec<HashMap<usize, SplitResult>> =
            stream::iter(task_batches.iter())
                .map(|task_batch| {
                    let client = self.client.clone();
                    let semaphore = semaphore.clone();
                    let target_language = self.target_language.clone();

                    async move {
                        let _permit = semaphore.acquire().await.expect("semaphore closed");
                        splitter::split_batch(&client, &target_language, task_batch).await
                    }
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;

        let mut results = HashMap::new();
        for batch in batch_results {
            results.extend(batch);
        }
        results
    }
}
