/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use rosetta::file_utils::FileManager;

use crate::common;

fn markdown_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "notes.md", "# Notes\n")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.md"));
}

#[test]
fn test_is_stdio_withDash_shouldReturnTrue() {
    assert!(FileManager::is_stdio("-"));
    assert!(!FileManager::is_stdio("-.md"));
}

#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path(Path::new("/tmp/input/guide.md"), Path::new("/tmp/output"), "fr");
    assert_eq!(output_path, Path::new("/tmp/output/guide.fr.md"));
}

#[test]
fn test_generate_output_path_withNoExtension_shouldAppendLanguage() {
    let output_path = FileManager::generate_output_path(Path::new("README"), Path::new("out"), "de");
    assert_eq!(output_path, Path::new("out/README.de"));
}

#[test]
fn test_find_documents_withMixedFiles_shouldSkipTranslationsAndOtherTypes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "b.md", "b\n")?;
    common::create_test_file(dir, "a.md", "a\n")?;
    common::create_test_file(dir, "a.fr.md", "a traduit\n")?;
    common::create_test_file(dir, "a.de.md", "a übersetzt\n")?;
    common::create_test_file(dir, "notes.txt", "not markdown\n")?;
    common::create_test_file(dir, "nested/c.markdown", "c\n")?;

    let documents = FileManager::find_documents(dir, &markdown_extensions(), "fr")?;
    let names: Vec<String> = documents
        .iter()
        .map(|p| p.strip_prefix(dir).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.de.md", "a.md", "b.md", "nested/c.markdown"]);

    Ok(())
}

#[test]
fn test_find_documents_withThreeLetterTargetCode_shouldSkipMatchingOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "doc.md", "doc\n")?;
    common::create_test_file(temp_dir.path(), "doc.fr.md", "doc\n")?;

    let documents = FileManager::find_documents(temp_dir.path(), &markdown_extensions(), "fra")?;
    assert_eq!(documents.len(), 1);

    Ok(())
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("deep/er/out.fr.md");

    FileManager::write_to_file(&target, "bonjour\n")?;

    assert_eq!(fs::read_to_string(&target)?, "bonjour\n");
    assert_eq!(FileManager::read_to_string(&target)?, "bonjour\n");

    Ok(())
}

#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("definitely/not/here.md").is_err());
}
