use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::language_utils::language_codes_match;

// @module: File and directory utilities

/// Path argument meaning standard input or standard output
pub const STDIO_PATH: &str = "-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @checks: Path names stdin/stdout
    pub fn is_stdio<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref() == Path::new(STDIO_PATH)
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path `<stem>.<target_language>.<ext>` in output_dir
    // @params: input_file, output_dir, target_language
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();

        let mut output_filename = input_file.file_stem().unwrap_or_default().to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(target_language);
        if let Some(ext) = input_file.extension() {
            output_filename.push('.');
            output_filename.push_str(&ext.to_string_lossy());
        }

        output_dir.as_ref().join(output_filename)
    }

    // @checks: Extension is one of `extensions` (case-insensitive, leading dot optional)
    pub fn has_document_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| {
                extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            })
    }

    // @checks: File name looks like our own output for target_language
    pub fn is_translated_output<P: AsRef<Path>>(path: P, target_language: &str) -> bool {
        let stem = path.as_ref().file_stem().unwrap_or_default().to_string_lossy();
        stem.rsplit_once('.')
            .is_some_and(|(_, suffix)| language_codes_match(suffix, target_language))
    }

    /// Find documents under `dir`, skipping previous translations into `target_language`
    pub fn find_documents<P: AsRef<Path>>(
        dir: P,
        extensions: &[String],
        target_language: &str,
    ) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && Self::has_document_extension(path, extensions)
                && !Self::is_translated_output(path, target_language)
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a file to a string, `-` reads standard input
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        if Self::is_stdio(&path) {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read standard input")?;
            return Ok(buffer);
        }

        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, `-` writes standard output
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if Self::is_stdio(&path) {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes()).context("Failed to write standard output")?;
            stdout.flush().context("Failed to flush standard output")?;
            return Ok(());
        }

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
