/*!
 * Tests for per-document pipeline orchestration.
 *
 * Uses the scriptable mock provider so no backend is needed; pacing is set
 * to zero to keep the suite fast.
 */

#![allow(non_snake_case)]

use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use crate::common;
use tradoc::errors::PipelineError;
use tradoc::providers::Provider;
use tradoc::providers::mock::MockProvider;
use tradoc::translation::cache::TranslationCache;
use tradoc::translation::pipeline::{Pipeline, PipelineOutcome};

/// Build a pipeline around a mock provider inside a temp workspace
fn test_pipeline(temp_dir: &TempDir, mock: Arc<MockProvider>) -> Pipeline {
    let output_dir = temp_dir.path().join("output_docs");
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));

    Pipeline::new(
        mock as Arc<dyn Provider>,
        cache,
        output_dir,
        "windows-874",
        Duration::from_millis(0),
    )
}

fn output_path(temp_dir: &TempDir, name: &str) -> std::path::PathBuf {
    temp_dir.path().join("output_docs").join(format!("translated_{}", name))
}

#[tokio::test]
async fn test_translateDocument_withTwoParagraphs_shouldWriteReassembledOutput() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.txt", "para1\n\npara2").unwrap();

    let mock = Arc::new(MockProvider::with_responses(vec!["第一段", "第二段"]));
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    let outcome = pipeline.translate_document(&input).await.unwrap();
    assert_eq!(outcome, PipelineOutcome::Translated { units: 2 });

    let output = std::fs::read_to_string(output_path(&temp_dir, "a.txt")).unwrap();
    assert_eq!(output, "第一段\n\n第二段");
    assert_eq!(mock.translate_call_count(), 2);
    assert_eq!(mock.health_call_count(), 1);
}

#[tokio::test]
async fn test_translateDocument_shouldRecordOneTranslationPerParagraph() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.txt", "para1\n\npara2").unwrap();

    let mock = Arc::new(MockProvider::with_responses(vec!["第一段", "第二段"]));
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));
    let pipeline = Pipeline::new(
        Arc::clone(&mock) as Arc<dyn Provider>,
        Arc::clone(&cache),
        temp_dir.path().join("output_docs"),
        "windows-874",
        Duration::from_millis(0),
    );

    pipeline.translate_document(&input).await.unwrap();

    let history = cache.history("a.txt");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].source, "para1");
    assert_eq!(history[0].target, "第一段");
    assert_eq!(history[1].source, "para2");
    assert_eq!(history[1].target, "第二段");
}

#[tokio::test]
async fn test_translateDocument_withUnchangedInput_shouldSkipAndNotCallBackend() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.txt", "para1\n\npara2").unwrap();

    let mock = Arc::new(MockProvider::with_responses(vec!["第一段", "第二段"]));
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    let first = pipeline.translate_document(&input).await.unwrap();
    assert_eq!(first, PipelineOutcome::Translated { units: 2 });
    let output_after_first = std::fs::read_to_string(output_path(&temp_dir, "a.txt")).unwrap();

    let second = pipeline.translate_document(&input).await.unwrap();
    assert_eq!(second, PipelineOutcome::Skipped);

    // Output is unchanged and the backend saw no additional calls
    let output_after_second = std::fs::read_to_string(output_path(&temp_dir, "a.txt")).unwrap();
    assert_eq!(output_after_first, output_after_second);
    assert_eq!(mock.translate_call_count(), 2);
}

#[tokio::test]
async fn test_translateDocument_withSingleByteChange_shouldRetranslate() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.txt", "para1").unwrap();

    let mock = Arc::new(MockProvider::with_responses(vec!["第一版", "第二版"]));
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    pipeline.translate_document(&input).await.unwrap();

    // One-byte content change invalidates the fingerprint
    std::fs::write(&input, "para2").unwrap();
    let outcome = pipeline.translate_document(&input).await.unwrap();

    assert_eq!(outcome, PipelineOutcome::Translated { units: 1 });
    assert_eq!(mock.translate_call_count(), 2);
    let output = std::fs::read_to_string(output_path(&temp_dir, "a.txt")).unwrap();
    assert_eq!(output, "第二版");
}

#[tokio::test]
async fn test_translateDocument_withMissingOutputArtifact_shouldRetranslate() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.txt", "para1").unwrap();

    let mock = Arc::new(MockProvider::with_responses(vec!["第一版", "第二版"]));
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    pipeline.translate_document(&input).await.unwrap();
    std::fs::remove_file(output_path(&temp_dir, "a.txt")).unwrap();

    let outcome = pipeline.translate_document(&input).await.unwrap();
    assert_eq!(outcome, PipelineOutcome::Translated { units: 1 });
}

#[tokio::test]
async fn test_translateDocument_withFailingUnit_shouldLeaveNoOutputOrCacheUpdate() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input =
        common::create_test_file(temp_dir.path(), "a.txt", "para1\n\npara2\n\npara3").unwrap();

    // Unit 2 of 3 fails
    let mock = Arc::new(MockProvider::fail_at(2));
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));
    let pipeline = Pipeline::new(
        Arc::clone(&mock) as Arc<dyn Provider>,
        Arc::clone(&cache),
        temp_dir.path().join("output_docs"),
        "windows-874",
        Duration::from_millis(0),
    );

    let result = pipeline.translate_document(&input).await;
    assert!(matches!(result, Err(PipelineError::Backend(_))));

    // Partial results are discarded: no output file, no cache entry
    assert!(!output_path(&temp_dir, "a.txt").exists());
    assert!(cache.latest("a.txt").is_none());
    // Unit 3 was never attempted
    assert_eq!(mock.translate_call_count(), 2);
}

#[tokio::test]
async fn test_translateDocument_withDownBackend_shouldMakeZeroGenerateCalls() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.txt", "para1\n\npara2").unwrap();

    let mock = Arc::new(MockProvider::unhealthy());
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    let result = pipeline.translate_document(&input).await;
    assert!(matches!(result, Err(PipelineError::BackendUnavailable(_))));
    assert_eq!(mock.translate_call_count(), 0);
    assert!(!output_path(&temp_dir, "a.txt").exists());
}

#[tokio::test]
async fn test_translateDocument_withFullySanitizedUnit_shouldKeepItsSlot() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.txt", "para1\n\npara2").unwrap();

    // Second response is pure explanatory noise and sanitizes to nothing
    let mock = Arc::new(MockProvider::with_responses(vec![
        "第一段",
        "(this is merely an aside)",
    ]));
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    pipeline.translate_document(&input).await.unwrap();

    let output = std::fs::read_to_string(output_path(&temp_dir, "a.txt")).unwrap();
    assert_eq!(output.split("\n\n").count(), 2);
    assert_eq!(output, "第一段\n\n");
}

#[tokio::test]
async fn test_translateDocument_withMissingInput_shouldFailWithIoError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let mock = Arc::new(MockProvider::working());
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    let missing = temp_dir.path().join("missing.txt");
    let result = pipeline.translate_document(&missing).await;

    assert!(matches!(result, Err(PipelineError::Io(_))));
    assert_eq!(mock.translate_call_count(), 0);
}

#[tokio::test]
async fn test_translateSnippet_shouldSanitizeRawOutput() {
    let temp_dir = common::create_temp_dir().unwrap();
    let mock = Arc::new(MockProvider::with_responses(vec![
        "สวัสดี (hello) Translation: this is fine extra",
    ]));
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    let translated = pipeline.translate_snippet("hello").await.unwrap();
    assert_eq!(translated, "สวัสดี");
}

#[tokio::test]
async fn test_translateSnippet_withEmptyText_shouldShortCircuit() {
    let temp_dir = common::create_temp_dir().unwrap();
    let mock = Arc::new(MockProvider::working());
    let pipeline = test_pipeline(&temp_dir, Arc::clone(&mock));

    let translated = pipeline.translate_snippet("   ").await.unwrap();
    assert_eq!(translated, "");
    assert_eq!(mock.translate_call_count(), 0);
    assert_eq!(mock.health_call_count(), 0);
}
