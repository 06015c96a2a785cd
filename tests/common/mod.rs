/*!
 * Common test utilities for the srtran test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use srtran::app_config::Config;
use srtran::providers::{CompletionService, MockCompletion};
use srtran::pipeline::TranslationPipeline;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small well-formed SRT sample spanning one two-entry sentence
pub const SAMPLE_SRT: &str = "1\n\
00:00:01,000 --> 00:00:04,000\n\
This is a test subtitle\n\
\n\
2\n\
00:00:05,000 --> 00:00:09,000\n\
that spans two entries.\n\
\n\
3\n\
00:00:10,000 --> 00:00:14,000\n\
<i>And one with markup.</i>\n\
\n";

/// A config suitable for tests: tiny retry delays, no external key needed
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.translation.api_key = "test-key".to_string();
    config.translation.retry.max_attempts = 3;
    config.translation.retry.backoff_base_ms = 1;
    config.translation.retry.transient_delay_ms = 1;
    config
}

/// Builds a pipeline over the given mock service with the test config
pub fn mock_pipeline(service: MockCompletion, config: Config) -> TranslationPipeline {
    let service: Arc<dyn CompletionService> = Arc::new(service);
    TranslationPipeline::new(service, config).expect("pipeline construction failed")
}
