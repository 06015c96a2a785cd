/*!
 * Prompt-based translation over the completion service.
 *
 * - `client`: batch serialization, translation map, fallback handling
 * - `prompts`: prompt templates for translation and splitting
 * - `response`: strict line-grammar parsers for model output
 * - `retry`: explicit retry policy and the generic retrying helper
 */

pub use self::client::{TranslationClient, TranslationMap};
pub use self::retry::{call_with_retry, RetryClass, RetryPolicy};

pub mod client;
pub mod prompts;
pub mod response;
pub mod retry;
