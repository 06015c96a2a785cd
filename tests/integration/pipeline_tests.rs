/*!
 * End-to-end pipeline tests over the mock completion service
 */

use srtran::app_config::DisplayMode;
use srtran::errors::PipelineError;
use srtran::providers::mock::MockFailure;
use srtran::providers::MockCompletion;
use srtran::subtitle::parser::parse;

use crate::common::{mock_pipeline, test_config, SAMPLE_SRT};

/// Test a full run produces a parseable file covering every entry
#[tokio::test]
async fn test_translate_withWorkingService_shouldProduceCompleteFile() {
    let pipeline = mock_pipeline(MockCompletion::working(), test_config());

    let (output, summary) = pipeline.translate_to_string(SAMPLE_SRT).await.unwrap();

    assert_eq!(summary.entry_count, 3);
    assert_eq!(summary.output_blocks, 3);
    assert_eq!(summary.split_count, 0);

    let blocks = parse(&output);
    assert_eq!(blocks.len(), 3);
    // Original timing survives
    assert_eq!(blocks[0].start_ms, 1_000);
    assert_eq!(blocks[0].end_ms, 4_000);
    // Text was pseudo-translated
    assert_eq!(
        blocks[0].joined_clean_text(),
        MockCompletion::pseudo_translate("This is a test subtitle")
    );
    // Markup is reattached around the translation
    assert_eq!(
        blocks[2].original_text(),
        format!("<i>{}</i>", MockCompletion::pseudo_translate("And one with markup."))
    );
}

/// Test target language resolution is surfaced for reporting
#[test]
fn test_pipeline_new_withLanguageCode_shouldResolveName() {
    let mut config = test_config();
    config.target_language = "fr".to_string();
    let pipeline = mock_pipeline(MockCompletion::working(), config);
    assert_eq!(pipeline.target_language(), "French");
}

/// Test an unknown target language fails construction
#[test]
fn test_pipeline_new_withUnknownLanguage_shouldFail() {
    use std::sync::Arc;
    let mut config = test_config();
    config.target_language = "xx".to_string();

    let result = srtran::pipeline::TranslationPipeline::new(
        Arc::new(MockCompletion::working()),
        config,
    );
    assert!(matches!(result, Err(PipelineError::UnsupportedLanguage(_))));
}

/// Test empty input is a run-level error
#[tokio::test]
async fn test_translate_withNoEntries_shouldFailWithNoEntries() {
    let pipeline = mock_pipeline(MockCompletion::working(), test_config());
    let result = pipeline.translate_to_string("just some text\n").await;
    assert!(matches!(result, Err(PipelineError::NoEntries)));
}

/// Test a completely failing service still yields a complete file
#[tokio::test]
async fn test_translate_withFailingService_shouldFallBackToOriginals() {
    let pipeline = mock_pipeline(
        MockCompletion::failing(MockFailure::InvalidModel),
        test_config(),
    );

    let (output, summary) = pipeline.translate_to_string(SAMPLE_SRT).await.unwrap();
    assert_eq!(summary.output_blocks, 3);

    let blocks = parse(&output);
    assert_eq!(blocks[0].joined_clean_text(), "This is a test subtitle");
    assert_eq!(blocks[1].joined_clean_text(), "that spans two entries.");
}

/// Test bilingual display mode stacks original and translation
#[tokio::test]
async fn test_translate_withOriginalAboveMode_shouldEmitBothLines() {
    let mut config = test_config();
    config.display_mode = DisplayMode::OriginalAboveTranslated;
    let pipeline = mock_pipeline(MockCompletion::working(), config);

    let (output, _) = pipeline.translate_to_string(SAMPLE_SRT).await.unwrap();

    assert!(output.contains(&format!(
        "This is a test subtitle\n{}",
        MockCompletion::pseudo_translate("This is a test subtitle")
    )));
}

/// Test small batch budgets produce several requests, merged in order
#[tokio::test]
async fn test_translate_withTinyBatchBudget_shouldStillCoverEverything() {
    let mut config = test_config();
    config.translation.batch_char_budget = 1;
    config.translation.concurrent_requests = 2;
    let pipeline = mock_pipeline(MockCompletion::working(), config);

    let (output, summary) = pipeline.translate_to_string(SAMPLE_SRT).await.unwrap();

    assert!(summary.batch_count > 1);
    let blocks = parse(&output);
    assert_eq!(blocks.len(), 3);
    let indices: Vec<usize> = blocks.iter().map(|b| b.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

/// Test a zero concurrency setting completes instead of stalling
#[tokio::test]
async fn test_translate_withZeroConcurrency_shouldStillComplete() {
    let mut config = test_config();
    config.translation.concurrent_requests = 0;
    let pipeline = mock_pipeline(MockCompletion::working(), config);

    let (_, summary) = pipeline.translate_to_string(SAMPLE_SRT).await.unwrap();
    assert_eq!(summary.output_blocks, 3);
}

/// Test the splitting pass expands a long slow entry and renumbers
#[tokio::test]
async fn test_translate_withSplitEnabled_shouldExpandLongEntry() {
    let long_text =
        "This opening narration runs on far longer than any subtitle reasonably should.";
    let content = format!(
        "1\n00:00:00,000 --> 00:00:08,000\n{}\n\n\
         2\n00:00:09,000 --> 00:00:10,000\nShort tail.\n\n",
        long_text
    );

    // Scripted response answers both the batch prompt and the split prompt
    let translated = MockCompletion::pseudo_translate(long_text);
    let scripted = format!(
        "[1] {}\n\
         [2] {}\n\
         [SPLIT-1-ORIGINAL-1] This opening narration runs on\n\
         [SPLIT-1-ORIGINAL-2] far longer than any subtitle reasonably should.\n\
         [SPLIT-1-TRANSLATED-1] part one translated\n\
         [SPLIT-1-TRANSLATED-2] part two translated\n",
        translated,
        MockCompletion::pseudo_translate("Short tail.")
    );

    let mut config = test_config();
    config.split.enabled = true;
    let pipeline = mock_pipeline(MockCompletion::working().with_response(scripted), config);

    let (output, summary) = pipeline.translate_to_string(&content).await.unwrap();

    assert_eq!(summary.entry_count, 2);
    assert_eq!(summary.split_count, 1);
    assert_eq!(summary.output_blocks, 3);

    let blocks = parse(&output);
    assert_eq!(blocks.len(), 3);
    // Renumbered sequentially after the split
    let indices: Vec<usize> = blocks.iter().map(|b| b.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);

    assert_eq!(blocks[0].joined_clean_text(), "part one translated");
    assert_eq!(blocks[1].joined_clean_text(), "part two translated");
    // The split parts tile the original range exactly
    assert_eq!(blocks[0].start_ms, 0);
    assert_eq!(blocks[0].end_ms, blocks[1].start_ms);
    assert_eq!(blocks[1].end_ms, 8_000);
    // The unsplit entry keeps its own timing
    assert_eq!(blocks[2].start_ms, 9_000);
}
