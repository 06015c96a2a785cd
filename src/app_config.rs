/*!
 * Application configuration module.
 * This module handles the application configuration including loading,
 * validating and defaulting configuration settings.
 */

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language code (ISO 639) or English name
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// How translated and original text are laid out in the output
    #[serde(default)]
    pub display_mode: DisplayMode,

    /// Translation quality tier
    #[serde(default)]
    pub quality: QualityMode,

    /// Completion service settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Sentence grouping settings
    #[serde(default)]
    pub grouping: GroupingConfig,

    /// Long-entry splitting settings
    #[serde(default)]
    pub split: SplitConfig,

    /// Output composition settings
    #[serde(default)]
    pub compose: ComposeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Layout of translated and original text in output blocks
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Emit only the translated text
    #[default]
    OnlyTranslated,
    /// Original line(s) above the translation
    OriginalAboveTranslated,
    /// Translation above the original line(s)
    TranslatedAboveOriginal,
}

impl std::str::FromStr for DisplayMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "only_translated" => Ok(Self::OnlyTranslated),
            "original_above_translated" => Ok(Self::OriginalAboveTranslated),
            "translated_above_original" => Ok(Self::TranslatedAboveOriginal),
            _ => Err(anyhow!("Invalid display mode: {}", s)),
        }
    }
}

/// Named quality tier controlling the completion request's determinism and
/// response-length parameters. The numeric values are tunables, not a
/// contract.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityMode {
    /// Cheapest tier: short responses, higher randomness
    Fast,
    /// Balanced default
    #[default]
    Standard,
    /// Longest response allowance, most deterministic output
    High,
}

impl QualityMode {
    /// Sampling temperature for this tier
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Fast => 0.7,
            Self::Standard => 0.5,
            Self::High => 0.3,
        }
    }

    /// Maximum output tokens for this tier
    pub fn max_output_tokens(&self) -> u32 {
        match self {
            Self::Fast => 2048,
            Self::Standard => 4096,
            Self::High => 8192,
        }
    }
}

impl std::str::FromStr for QualityMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "standard" => Ok(Self::Standard),
            "high" => Ok(Self::High),
            _ => Err(anyhow!("Invalid quality mode: {}", s)),
        }
    }
}

/// Completion service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Model identifier (e.g., "gemini-2.0-flash")
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to the GEMINI_API_KEY environment variable
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Maximum estimated clean-text characters per request batch
    #[serde(default = "default_batch_char_budget")]
    pub batch_char_budget: usize,

    /// Maximum number of concurrent batch requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Per-call request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for failed requests
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            batch_char_budget: default_batch_char_budget(),
            concurrent_requests: default_concurrent_requests(),
            timeout_secs: default_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the API key from the config, falling back to the environment
    pub fn get_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("GEMINI_API_KEY").unwrap_or_default()
    }
}

/// Retry policy tunables applied to every completion call
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff in milliseconds for rate-limit failures, doubled per retry
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Fixed delay in milliseconds before retrying a transient failure
    #[serde(default = "default_transient_delay_ms")]
    pub transient_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
            transient_delay_ms: default_transient_delay_ms(),
        }
    }
}

/// Sentence grouping configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupingConfig {
    /// Hard cap on entries per group, bounding runaway un-punctuated input
    #[serde(default = "default_max_entries_per_group")]
    pub max_entries_per_group: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            max_entries_per_group: default_max_entries_per_group(),
        }
    }
}

/// Long-entry splitting configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SplitConfig {
    /// Whether the optional split pass runs at all
    #[serde(default)]
    pub enabled: bool,

    /// Minimum clean-text length for an entry to be a split candidate
    #[serde(default = "default_split_min_chars")]
    pub min_chars: usize,

    /// Minimum duration for an entry to be a split candidate
    #[serde(default = "default_split_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Combined original+translated character budget per split request
    #[serde(default = "default_split_char_budget")]
    pub char_budget: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_chars: default_split_min_chars(),
            min_duration_ms: default_split_min_duration_ms(),
            char_budget: default_split_char_budget(),
        }
    }
}

/// Output composition configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ComposeConfig {
    /// Hard character wrap width for translated text, disabled when absent
    #[serde(default)]
    pub line_wrap: Option<usize>,

    /// Font size tag wrapped around original text in dual-display modes
    #[serde(default)]
    pub original_font_size: Option<u8>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_target_language() -> String {
    "zh".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_batch_char_budget() -> usize {
    4000
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    5000
}

fn default_transient_delay_ms() -> u64 {
    1000
}

fn default_max_entries_per_group() -> usize {
    5
}

fn default_split_min_chars() -> usize {
    60
}

fn default_split_min_duration_ms() -> u64 {
    6000
}

fn default_split_char_budget() -> usize {
    2000
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            display_mode: DisplayMode::default(),
            quality: QualityMode::default(),
            translation: TranslationConfig::default(),
            grouping: GroupingConfig::default(),
            split: SplitConfig::default(),
            compose: ComposeConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, or defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _target_name = crate::language_utils::resolve_language_name(&self.target_language)?;

        if self.translation.get_api_key().is_empty() {
            return Err(anyhow!(
                "Translation API key is required (set translation.api_key in the \
                 config file or the GEMINI_API_KEY environment variable)"
            ));
        }

        if self.translation.model.trim().is_empty() {
            return Err(anyhow!("Translation model must not be empty"));
        }

        if self.translation.concurrent_requests == 0 {
            return Err(anyhow!("translation.concurrent_requests must be at least 1"));
        }

        Ok(())
    }
}
