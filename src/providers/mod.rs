/*!
 * Completion service abstraction.
 *
 * The translation pipeline treats the language model as an opaque
 * text-completion capability: prompt text and generation parameters in,
 * generated text or a typed failure out. Concrete clients live here:
 * - `gemini`: Google Gemini generateContent client
 * - `mock`: scriptable in-memory service for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::CompletionError;

/// A single completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Full prompt text
    pub prompt: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum number of output tokens
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: 0.5,
            max_output_tokens: 4096,
        }
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum output tokens
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Common trait for all text-completion services
///
/// Implementations must map every failure onto a [`CompletionError`]
/// variant; the retry policy and the fallback path are driven entirely by
/// that taxonomy.
#[async_trait]
pub trait CompletionService: Send + Sync + Debug {
    /// Generate text for a request
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::MockCompletion;
