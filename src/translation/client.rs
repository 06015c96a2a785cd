/*!
 * Translation client.
 *
 * Formats a batch of sentence groups into a structured prompt, runs it
 * through the completion service under the retry policy, and parses the
 * indexed response lines back into a translation map. A failed batch never
 * fails the run: its entries degrade to their own original clean text.
 */

use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::app_config::{Config, QualityMode};
use crate::errors::CompletionError;
use crate::pipeline::planner::Batch;
use crate::providers::{CompletionRequest, CompletionService};
use crate::subtitle::SubtitleEntry;

use super::prompts;
use super::response;
use super::retry::{call_with_retry, RetryPolicy};

/// Mapping from entry index to translated clean text.
///
/// Lookup falls back to the entry's own original clean text, so the map is
/// total over the entries it was built for even when the model missed some.
#[derive(Debug, Default, Clone)]
pub struct TranslationMap {
    entries: HashMap<usize, String>,
}

impl TranslationMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a translation for an entry index
    pub fn insert(&mut self, index: usize, text: String) {
        self.entries.insert(index, text);
    }

    /// The model-provided translation for an index, if any
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(&index).map(|s| s.as_str())
    }

    /// The translation for an entry, falling back to its own clean text
    pub fn lookup(&self, entry: &SubtitleEntry) -> String {
        match self.entries.get(&entry.index) {
            Some(text) => text.clone(),
            None => entry.joined_clean_text(),
        }
    }

    /// Absorb another map, later values winning
    pub fn merge(&mut self, other: TranslationMap) {
        self.entries.extend(other.entries);
    }

    /// Number of entries with a value
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no values
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Client for translating batches through the completion service
#[derive(Debug, Clone)]
pub struct TranslationClient {
    service: Arc<dyn CompletionService>,
    policy: RetryPolicy,
    model: String,
    quality: QualityMode,
    /// English name of the target language, as used in prompts
    target_language: String,
}

impl TranslationClient {
    /// Create a client from the app configuration and a completion service
    pub fn new(
        service: Arc<dyn CompletionService>,
        config: &Config,
        target_language_name: String,
    ) -> Self {
        Self {
            service,
            policy: RetryPolicy::from_config(&config.translation.retry),
            model: config.translation.model.clone(),
            quality: config.quality,
            target_language: target_language_name,
        }
    }

    /// Serialize a batch into the `[GROUP START]` / `[index] text` block
    /// embedded in the prompt
    pub fn serialize_batch(batch: &Batch) -> String {
        let mut text = String::new();
        for group in &batch.groups {
            text.push_str("[GROUP START]\n");
            for entry in &group.entries {
                text.push_str(&format!("[{}] {}\n", entry.index, entry.joined_clean_text()));
            }
            text.push_str("[GROUP END]\n");
        }
        text
    }

    /// Run one prompt through the completion service under the retry policy
    pub async fn complete_with_retry(&self, prompt: String) -> Result<String, CompletionError> {
        let request = CompletionRequest::new(prompt, self.model.clone())
            .temperature(self.quality.temperature())
            .max_output_tokens(self.quality.max_output_tokens());

        call_with_retry(&self.policy, || self.service.complete(request.clone())).await
    }

    /// Translate every entry of a batch.
    ///
    /// Always returns a map covering the whole batch; on terminal failure
    /// every entry maps to its own original clean text.
    pub async fn translate_batch(&self, batch: &Batch) -> TranslationMap {
        let batch_text = Self::serialize_batch(batch);
        let prompt = prompts::batch_prompt(&batch_text, &self.target_language, self.quality);

        let mut map = TranslationMap::new();

        match self.complete_with_retry(prompt).await {
            Ok(response_text) => {
                for (index, text) in response::parse_indexed_lines(&response_text) {
                    map.insert(index, text);
                }
            }
            Err(error) => {
                warn!(
                    "Batch translation failed ({}), falling back to original text for {} entries",
                    error,
                    batch.entry_count()
                );
            }
        }

        // Verification and fallback for any index the model missed
        for entry in batch.entries() {
            if map.get(entry.index).is_none() {
                debug!(
                    "Index {} missing from batch response, using original text",
                    entry.index
                );
                map.insert(entry.index, entry.joined_clean_text());
            }
        }

        map
    }
}
