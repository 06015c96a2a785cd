/*!
 * Tests for the translation client, retry behavior, and batch fallback
 */

use std::sync::Arc;

use srtran::pipeline::grouper::group_entries;
use srtran::pipeline::planner::{plan_batches, Batch};
use srtran::providers::{CompletionService, MockCompletion};
use srtran::providers::mock::MockFailure;
use srtran::subtitle::parser::parse;
use srtran::translation::TranslationClient;

use crate::common::{test_config, SAMPLE_SRT};

fn sample_batch() -> Batch {
    let entries = parse(SAMPLE_SRT);
    let groups = group_entries(&entries, 5);
    let mut batches = plan_batches(groups, 10_000);
    assert_eq!(batches.len(), 1);
    batches.remove(0)
}

fn client_over(mock: Arc<MockCompletion>) -> TranslationClient {
    let service: Arc<dyn CompletionService> = mock;
    TranslationClient::new(service, &test_config(), "French".to_string())
}

/// Test batch serialization emits group markers and indexed lines
#[test]
fn test_serialize_batch_withSampleBatch_shouldEmitMarkersAndIndexes() {
    let batch = sample_batch();
    let text = TranslationClient::serialize_batch(&batch);

    assert!(text.contains("[GROUP START]"));
    assert!(text.contains("[GROUP END]"));
    assert!(text.contains("[1] This is a test subtitle"));
    assert!(text.contains("[2] that spans two entries."));
    // Markup never reaches the prompt
    assert!(text.contains("[3] And one with markup."));
    assert!(!text.contains("<i>"));
}

/// Test a working service translates every entry of the batch
#[tokio::test]
async fn test_translate_batch_withWorkingService_shouldCoverAllEntries() {
    let mock = Arc::new(MockCompletion::working());
    let client = client_over(mock.clone());
    let batch = sample_batch();

    let map = client.translate_batch(&batch).await;

    for entry in batch.entries() {
        assert_eq!(
            map.get(entry.index),
            Some(MockCompletion::pseudo_translate(&entry.joined_clean_text()).as_str())
        );
    }
    assert_eq!(mock.request_count(), 1);
}

/// Test the prompt carries the target language and quality clause
#[tokio::test]
async fn test_translate_batch_withWorkingService_shouldBuildLanguagePrompt() {
    let mock = Arc::new(MockCompletion::working());
    let client = client_over(mock.clone());

    client.translate_batch(&sample_batch()).await;

    let prompts = mock.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("French"));
    assert!(prompts[0].contains("[GROUP START]"));
}

/// Test a terminally failing service falls back to original text
#[tokio::test]
async fn test_translate_batch_withSafetyBlock_shouldFallBackWithoutRetry() {
    let mock = Arc::new(MockCompletion::failing(MockFailure::SafetyBlocked));
    let client = client_over(mock.clone());
    let batch = sample_batch();

    let map = client.translate_batch(&batch).await;

    for entry in batch.entries() {
        assert_eq!(map.get(entry.index), Some(entry.joined_clean_text().as_str()));
    }
    // Terminal failures never retry
    assert_eq!(mock.request_count(), 1);
}

/// Test transient failures are retried up to the attempt limit
#[tokio::test]
async fn test_translate_batch_withPersistentTransientFailure_shouldExhaustRetries() {
    let mock = Arc::new(MockCompletion::failing(MockFailure::Transient));
    let client = client_over(mock.clone());
    let batch = sample_batch();

    let map = client.translate_batch(&batch).await;

    assert_eq!(mock.request_count(), 3);
    assert_eq!(map.get(1), Some("This is a test subtitle"));
}

/// Test a transiently failing service succeeds on retry
#[tokio::test]
async fn test_translate_batch_withTransientThenSuccess_shouldSucceedOnRetry() {
    let mock = Arc::new(MockCompletion::fail_first(2));
    let client = client_over(mock.clone());
    let batch = sample_batch();

    let map = client.translate_batch(&batch).await;

    assert_eq!(mock.request_count(), 3);
    assert_eq!(
        map.get(1),
        Some(MockCompletion::pseudo_translate("This is a test subtitle").as_str())
    );
}

/// Test an empty response leaves every index to the fallback path
#[tokio::test]
async fn test_translate_batch_withEmptyResponse_shouldFillFromOriginals() {
    let mock = Arc::new(MockCompletion::empty());
    let client = client_over(mock);
    let batch = sample_batch();

    let map = client.translate_batch(&batch).await;

    for entry in batch.entries() {
        assert_eq!(map.get(entry.index), Some(entry.joined_clean_text().as_str()));
    }
}

/// Test a partial response only falls back for the missing indices
#[tokio::test]
async fn test_translate_batch_withPartialResponse_shouldFillOnlyMissing() {
    let mock = Arc::new(MockCompletion::working().with_response("[1] Ceci est un test\n"));
    let client = client_over(mock);
    let batch = sample_batch();

    let map = client.translate_batch(&batch).await;

    assert_eq!(map.get(1), Some("Ceci est un test"));
    assert_eq!(map.get(2), Some("that spans two entries."));
    assert_eq!(map.get(3), Some("And one with markup."));
}
