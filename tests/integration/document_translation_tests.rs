/*!
 * Integration tests for whole-document translation through mock providers
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rosetta::app_config::FailurePolicy;
use rosetta::providers::mock::MockProvider;
use rosetta::translation::DocumentTranslator;
use rosetta::{TranslationError, chunking};

use crate::common::{self, SAMPLE_DOCUMENT};

fn translator(mock: MockProvider) -> DocumentTranslator {
    DocumentTranslator::new(common::mock_service(&common::test_config(), mock))
}

fn paragraphs(count: usize) -> String {
    (0..count).map(|i| format!("paragraph {}\n\n", i)).collect()
}

#[tokio::test]
async fn test_translate_str_withSampleDocument_shouldLeaveProtectedSpansUntouched() {
    common::init_test_logger();
    let translator = translator(MockProvider::working());

    let (output, report) = translator.translate_str(SAMPLE_DOCUMENT, "en", "fr").await.unwrap();

    assert!(report.is_complete());
    assert!(output.starts_with("[fr] # Getting started\n"));
    assert!(output.contains("[fr] Install the tool with `cargo install rosetta` [fr] and run it.\n"));
    assert!(output.contains("```bash\nrosetta README.md\n```\n"));
    assert!(output.contains("[fr] The cost is $5 and $10 for total $15, while $E = mc^2$ [fr] is physics.\n"));
    assert!(output.contains("$$\n\\int_0^1 x\\,dx\n$$\n"));
    assert!(output.contains("<svg width=\"10\" height=\"10\">\n  <circle r=\"4\"/>\n</svg>\n"));
    assert!(output.contains("<https://example.com>"));
}

#[tokio::test]
async fn test_translate_str_withOutOfOrderAnswers_shouldKeepDocumentOrder() {
    let translator = translator(MockProvider::staggered(5)).with_concurrency(4);
    let input = paragraphs(8);

    let (output, report) = translator.translate_str(&input, "en", "fr").await.unwrap();

    let expected: String = (0..8).map(|i| format!("[fr] paragraph {}\n\n", i)).collect();
    assert_eq!(output, expected);
    assert_eq!(report.translated, 8);
    assert_eq!(report.skipped, 8);
}

#[tokio::test]
async fn test_translate_str_withFailingChunkAndKeepOriginal_shouldSubstituteSource() {
    let translator = translator(MockProvider::failing_on("BAD")).with_failure_policy(FailurePolicy::KeepOriginal);
    let input = "fine one\n\nBAD two\n\nfine three\n";

    let (output, report) = translator.translate_str(input, "en", "fr").await.unwrap();

    assert_eq!(output, "[fr] fine one\n\nBAD two\n\n[fr] fine three\n");
    assert_eq!(report.translated, 2);
    assert_eq!(report.substituted.len(), 1);
    assert_eq!(report.substituted[0].line, 3);
    assert!(!report.is_complete());
}

#[tokio::test]
async fn test_translate_str_withFailingChunkAndAbort_shouldReturnChunkFailed() {
    let translator = translator(MockProvider::failing_on("BAD")).with_failure_policy(FailurePolicy::Abort);
    let input = "fine one\n\nfine two\n\nBAD three\n";

    let error = translator.translate_str(input, "en", "fr").await.unwrap_err();

    match error {
        TranslationError::ChunkFailed { line, .. } => assert_eq!(line, 5),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_translate_str_withEmptyAnswers_shouldKeepOriginalText() {
    let translator = translator(MockProvider::empty());
    let input = "nothing comes back\n";

    let (output, report) = translator.translate_str(input, "en", "fr").await.unwrap();

    assert_eq!(output, input);
    assert_eq!(report.substituted.len(), 1);
    assert!(report.substituted[0].message.contains("empty"));
}

#[tokio::test]
async fn test_translate_str_withRepeatedParagraphs_shouldAnswerFromCache() {
    let mock = MockProvider::working();
    let translator = translator(mock.clone()).with_concurrency(1);

    let (output, report) = translator.translate_str("same\n\nsame\n", "en", "fr").await.unwrap();

    assert_eq!(output, "[fr] same\n\n[fr] same\n");
    assert_eq!(report.cache_hits, 1);
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_translate_str_withIntermittentProvider_shouldRecoverThroughRetries() {
    let mut config = common::test_config();
    config.translation.common.retry_count = 2;
    config.translation.common.cache_enabled = false;
    let mock = MockProvider::intermittent(2);
    let translator = DocumentTranslator::new(common::mock_service(&config, mock.clone())).with_concurrency(1);

    let (output, report) = translator.translate_str(&paragraphs(3), "en", "fr").await.unwrap();

    assert!(report.is_complete());
    assert_eq!(output, "[fr] paragraph 0\n\n[fr] paragraph 1\n\n[fr] paragraph 2\n\n");
    assert_eq!(mock.request_count(), 5);
}

#[tokio::test]
async fn test_translate_document_withSlowProvider_shouldFailWithTimeout() {
    let mut service = common::mock_service(&common::test_config(), MockProvider::slow(500));
    service.options.timeout = Duration::from_millis(20);
    let translator = DocumentTranslator::new(service).with_failure_policy(FailurePolicy::Abort);

    let error = translator.translate_str("too slow\n", "en", "fr").await.unwrap_err();

    assert!(error.is_timeout());
}

#[tokio::test]
async fn test_translate_document_withProgressCallback_shouldReportEveryChunk() {
    let translator = translator(MockProvider::working());
    let doc = chunking::parse(&paragraphs(5));
    let seen = Arc::new(AtomicUsize::new(0));
    let last_total = Arc::new(AtomicUsize::new(0));

    let (seen_cb, total_cb) = (seen.clone(), last_total.clone());
    translator
        .translate_document(&doc, "en", "fr", move |_done, total| {
            seen_cb.fetch_add(1, Ordering::SeqCst);
            total_cb.store(total, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 5);
    assert_eq!(last_total.load(Ordering::SeqCst), 5);
}
