/*!
 * Tests for application configuration
 */

use anyhow::Result;
use rosetta::app_config::{Config, FailurePolicy, PipelineStage, TranslationProvider};

use crate::common;

#[test]
fn test_default_config_withNoChanges_shouldValidate() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.common.failure_policy, FailurePolicy::KeepOriginal);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("rosetta.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.source_language, created.source_language);
    assert_eq!(reloaded.translation.provider, created.translation.provider);
    assert_eq!(reloaded.files.extensions, created.files.extensions);

    Ok(())
}

#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "partial.json",
        r#"{
            "source_language": "de",
            "target_language": "es",
            "translation": {
                "provider": "command",
                "available_providers": [
                    {
                        "type": "command",
                        "pipeline": [{ "program": "tr", "args": ["a-z", "A-Z"] }]
                    }
                ]
            }
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.translation.provider, TranslationProvider::Command);
    assert_eq!(config.translation.get_pipeline(), vec![PipelineStage::new("tr", &["a-z", "A-Z"])]);
    assert_eq!(config.translation.common.retry_count, 3);
    assert_eq!(config.files.extensions, vec!["md".to_string(), "markdown".to_string()]);
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_load_or_create_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());

    Ok(())
}

#[test]
fn test_validate_withInvalidLanguage_shouldFail() {
    let mut config = common::test_config();
    config.target_language = "klingon".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withEmptyPipeline_shouldFail() {
    let mut config = common::test_config();
    config.translation.provider = TranslationProvider::Command;
    config.translation.active_provider_config_mut().pipeline.clear();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withNoExtensions_shouldFail() {
    let mut config = common::test_config();
    config.files.extensions.clear();

    assert!(config.validate().is_err());
}

#[test]
fn test_failure_policy_withCliSpellings_shouldParse() {
    assert_eq!("keep-original".parse::<FailurePolicy>().ok(), Some(FailurePolicy::KeepOriginal));
    assert_eq!("abort".parse::<FailurePolicy>().ok(), Some(FailurePolicy::Abort));
    assert!("explode".parse::<FailurePolicy>().is_err());
}
