/*!
 * Mock completion service for testing.
 *
 * Behaviors cover the failure taxonomy the pipeline must absorb:
 * - `MockCompletion::working()` - echoes every `[index]` prompt line with a
 *   pseudo-translation, so coverage and fallback logic can be asserted
 * - `MockCompletion::failing(..)` - always fails with the given error kind
 * - `MockCompletion::empty()` - succeeds with unusable output
 * - `MockCompletion::fail_first(n)` - fails the first n requests transiently
 * - scripted responses via `with_response`
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::CompletionError;
use super::{CompletionRequest, CompletionService};

static INDEXED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(\d+)\]\s*(.*)$").unwrap());

/// Failure kind produced by a failing mock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockFailure {
    RateLimited,
    SafetyBlocked,
    Timeout,
    InvalidModel,
    Transient,
}

impl MockFailure {
    fn to_error(self) -> CompletionError {
        match self {
            Self::RateLimited => CompletionError::RateLimited("mock rate limit".to_string()),
            Self::SafetyBlocked => CompletionError::SafetyBlocked("mock safety block".to_string()),
            Self::Timeout => CompletionError::Timeout("mock timeout".to_string()),
            Self::InvalidModel => CompletionError::InvalidModel("mock-model".to_string()),
            Self::Transient => CompletionError::RequestFailed("mock transient failure".to_string()),
        }
    }
}

/// Behavior mode of the mock service
#[derive(Debug, Clone, Copy, PartialEq)]
enum MockBehavior {
    /// Echo `[index]` lines with a pseudo-translation
    Working,
    /// Always fail with the given failure kind
    Failing(MockFailure),
    /// Succeed with whitespace-only text
    Empty,
    /// Fail the first n requests transiently, succeed afterwards
    FailFirst { failures: usize },
}

/// Scriptable in-memory completion service
#[derive(Debug)]
pub struct MockCompletion {
    behavior: MockBehavior,
    request_count: AtomicUsize,
    /// Every prompt seen, for assertions on prompt structure
    prompts: Mutex<Vec<String>>,
    /// Fixed response overriding the behavior-generated one
    scripted_response: Option<String>,
}

impl MockCompletion {
    fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            scripted_response: None,
        }
    }

    /// A service that pseudo-translates every indexed line
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// A service that always fails with the given failure kind
    pub fn failing(failure: MockFailure) -> Self {
        Self::new(MockBehavior::Failing(failure))
    }

    /// A service that returns whitespace-only responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// A service that fails the first n requests transiently, then works
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    /// Fix the response text, regardless of the prompt
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.scripted_response = Some(response.into());
        self
    }

    /// Number of complete() calls seen so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copies of every prompt seen so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// The canonical pseudo-translation of a clean-text line
    pub fn pseudo_translate(text: &str) -> String {
        format!("\u{300c}{}\u{300d}", text)
    }

    fn echo_indexed_lines(prompt: &str) -> String {
        let mut response = String::new();
        for line in prompt.lines() {
            if let Some(caps) = INDEXED_LINE.captures(line.trim()) {
                let index = caps.get(1).map_or("", |m| m.as_str());
                let text = caps.get(2).map_or("", |m| m.as_str());
                response.push_str(&format!("[{}] {}\n", index, Self::pseudo_translate(text)));
            }
        }
        response
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts.lock().unwrap().push(request.prompt.clone());

        match self.behavior {
            MockBehavior::Failing(failure) => return Err(failure.to_error()),
            MockBehavior::FailFirst { failures } => {
                if count <= failures {
                    return Err(MockFailure::Transient.to_error());
                }
            }
            MockBehavior::Empty => return Ok("   \n".to_string()),
            MockBehavior::Working => {}
        }

        if let Some(scripted) = &self.scripted_response {
            return Ok(scripted.clone());
        }

        Ok(Self::echo_indexed_lines(&request.prompt))
    }
}
