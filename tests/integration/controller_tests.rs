/*!
 * Integration tests for the application controller
 */

use anyhow::Result;
use std::fs;

use rosetta::app_config::FailurePolicy;
use rosetta::app_controller::{Controller, FileOutcome, FolderSummary};
use rosetta::chunking::ChunkKind;
use rosetta::providers::mock::MockProvider;

use crate::common::{self, SAMPLE_DOCUMENT};

#[tokio::test]
async fn test_run_withIdentityProvider_shouldWriteUnchangedCopy() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "guide.md", SAMPLE_DOCUMENT)?;
    let output_dir = temp_dir.path().join("out");

    let controller = Controller::with_config(common::test_config())?;
    let outcome = controller.run(input, output_dir.clone(), false).await?;

    let expected_output = output_dir.join("guide.fr.md");
    match outcome {
        FileOutcome::Translated { output, report } => {
            assert_eq!(output, expected_output);
            assert!(report.is_complete());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(fs::read_to_string(&expected_output)?, SAMPLE_DOCUMENT);

    Ok(())
}

#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "notes.md", "hello\n")?;
    let existing = common::create_test_file(temp_dir.path(), "notes.fr.md", "old\n")?;
    let controller = common::mock_controller(common::test_config(), MockProvider::working());

    let outcome = controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(outcome, FileOutcome::Skipped { output: existing.clone() });
    assert_eq!(fs::read_to_string(&existing)?, "old\n");

    let outcome = controller.run(input, temp_dir.path().to_path_buf(), true).await?;
    assert!(matches!(outcome, FileOutcome::Translated { .. }));
    assert_eq!(fs::read_to_string(&existing)?, "[fr] hello\n");

    Ok(())
}

#[tokio::test]
async fn test_run_withAbortPolicyAndFailingChunk_shouldNotWriteOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doc.md", "ok\n\nBAD\n")?;
    let mut config = common::test_config();
    config.translation.common.failure_policy = FailurePolicy::Abort;
    let controller = common::mock_controller(config, MockProvider::failing_on("BAD"));

    let result = controller.run(input, temp_dir.path().to_path_buf(), false).await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("doc.fr.md").exists());

    Ok(())
}

#[tokio::test]
async fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::mock_controller(common::test_config(), MockProvider::working());

    let result = controller
        .run(temp_dir.path().join("absent.md"), temp_dir.path().to_path_buf(), false)
        .await;

    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_run_folder_withMixedDocuments_shouldCountOutcomes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "a.md", "alpha\n")?;
    common::create_test_file(dir, "a.fr.md", "alpha traduit\n")?;
    common::create_test_file(dir, "sub/b.markdown", "beta\n")?;
    common::create_test_file(dir, "sub/c.md", "BAD gamma\n")?;
    common::create_test_file(dir, "readme.txt", "ignored\n")?;

    let mut config = common::test_config();
    config.translation.common.failure_policy = FailurePolicy::Abort;
    let controller = common::mock_controller(config, MockProvider::failing_on("BAD"));

    let summary = controller.run_folder(dir.to_path_buf(), false).await?;

    assert_eq!(
        summary,
        FolderSummary {
            translated: 1,
            skipped: 1,
            failed: 1
        }
    );
    assert_eq!(fs::read_to_string(dir.join("sub/b.fr.markdown"))?, "[fr] beta\n");
    assert!(!dir.join("sub/c.fr.md").exists());

    Ok(())
}

#[tokio::test]
async fn test_run_folder_withNoDocuments_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "notes.txt", "plain\n")?;
    let controller = common::mock_controller(common::test_config(), MockProvider::working());

    assert!(controller.run_folder(temp_dir.path().to_path_buf(), false).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_check_provider_withFailingProvider_shouldFail() {
    let controller = common::mock_controller(common::test_config(), MockProvider::failing());
    assert!(controller.check_provider().await.is_err());

    let controller = common::mock_controller(common::test_config(), MockProvider::working());
    assert!(controller.check_provider().await.is_ok());
}

#[test]
fn test_translate_text_withBlockingRuntime_shouldTranslateProse() {
    let controller = common::mock_controller(common::test_config(), MockProvider::working());

    let (output, report) = tokio_test::block_on(controller.translate_text("Run `ls` now\n")).unwrap();

    assert_eq!(output, "[fr] Run `ls` [fr] now\n");
    assert_eq!(report.translated, 2);
}

#[test]
fn test_inspect_withDocumentOnDisk_shouldListChunks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doc.md", "Text `code`\n")?;

    let views = Controller::inspect(&input, 10)?;
    let kinds: Vec<ChunkKind> = views.iter().map(|v| v.kind).collect();

    assert_eq!(kinds, vec![ChunkKind::Text, ChunkKind::CodeInline, ChunkKind::Text]);

    Ok(())
}
