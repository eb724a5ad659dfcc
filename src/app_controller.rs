use anyhow::{Context, Result, anyhow};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::chunking::{self, ChunkView, chunk_views};
use crate::file_utils::FileManager;
use crate::translation::{DocumentTranslator, TranslationReport, TranslationService};

// @module: Application controller for document translation

/// What `run` did with one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written
    Translated {
        output: PathBuf,
        report: TranslationReport,
    },
    /// Output already existed and overwriting was not forced
    Skipped { output: PathBuf },
}

/// Counts for a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Document translator built from the configuration
    translator: DocumentTranslator,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(config.translation.clone())
            .context("Failed to initialize translation provider")?;
        Ok(Self::with_service(config, service))
    }

    // @method: Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self {
            translator: DocumentTranslator::new(service),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check that the provider is reachable before translating anything
    pub async fn check_provider(&self) -> Result<()> {
        self.translator
            .service()
            .test_connection()
            .await
            .with_context(|| format!("Provider '{}' is not available", self.config.translation.provider))
    }

    /// Translate an in-memory document
    pub async fn translate_text(&self, input: &str) -> Result<(String, TranslationReport)> {
        let (output, report) = self
            .translator
            .translate_str(input, &self.config.source_language, &self.config.target_language)
            .await?;
        Self::log_report(&report);
        Ok((output, report))
    }

    /// Chunk a file (or stdin) and describe the chunks without translating
    pub fn inspect<P: AsRef<Path>>(input: P, preview_width: usize) -> Result<Vec<ChunkView>> {
        let content = FileManager::read_to_string(input)?;
        Ok(chunk_views(&chunking::parse(&content), preview_width))
    }

    /// Translate one file into `output_dir` (`-` writes to stdout)
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<FileOutcome> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(&input_file, &output_dir, &multi_progress, force_overwrite)
            .await
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_dir: &Path,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        let start_time = Instant::now();

        if !FileManager::is_stdio(input_file) && !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let to_stdout = FileManager::is_stdio(output_dir);
        let output_path = if to_stdout {
            output_dir.to_path_buf()
        } else {
            FileManager::generate_output_path(input_file, output_dir, &self.config.target_language)
        };

        if !to_stdout && output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {}, translation already exists (use -f to force overwrite)",
                output_path.display()
            );
            return Ok(FileOutcome::Skipped { output: output_path });
        }

        let content = FileManager::read_to_string(input_file)?;
        let doc = chunking::parse(&content);
        debug!("{}: {} chunks", input_file.display(), doc.len());

        let progress_bar = multi_progress.add(ProgressBar::new(doc.translatable().count() as u64));
        progress_bar.set_style(progress_style("chunks"));
        progress_bar.set_message(
            input_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "stdin".to_string()),
        );

        let pb = progress_bar.clone();
        let result = self
            .translator
            .translate_document(
                &doc,
                &self.config.source_language,
                &self.config.target_language,
                move |done, _total| pb.set_position(done as u64),
            )
            .await;
        progress_bar.finish_and_clear();

        let (output, report) = result.with_context(|| format!("Failed to translate {}", input_file.display()))?;
        FileManager::write_to_file(&output_path, &output)?;

        Self::log_report(&report);
        if !to_stdout {
            info!(
                "Success: {} ({})",
                output_path.display(),
                Self::format_duration(start_time.elapsed())
            );
        }

        Ok(FileOutcome::Translated {
            output: output_path,
            report,
        })
    }

    /// Translate every document under `input_dir`, writing each output next to its source
    /// Files that already have a translation are skipped unless forced
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let documents = FileManager::find_documents(
            &input_dir,
            &self.config.files.extensions,
            &self.config.target_language,
        )?;

        if documents.is_empty() {
            return Err(anyhow!("No documents found in directory: {:?}", input_dir));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(documents.len() as u64));
        folder_pb.set_style(progress_style("files"));

        let mut summary = FolderSummary::default();

        for document in &documents {
            let output_dir = document
                .parent()
                .map_or_else(|| input_dir.clone(), Path::to_path_buf);

            folder_pb.set_message(format!("Processing: {}", document.display()));
            match self
                .run_with_progress(document, &output_dir, &multi_progress, force_overwrite)
                .await
            {
                Ok(FileOutcome::Translated { .. }) => summary.translated += 1,
                Ok(FileOutcome::Skipped { .. }) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", document.display(), e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} translated, {} skipped, {} errors ({})",
            summary.translated,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    fn log_report(report: &TranslationReport) {
        info!(
            "{} chunks: {} translated, {} blank, {} from cache",
            report.chunks, report.translated, report.skipped, report.cache_hits
        );
        if !report.is_complete() {
            warn!(
                "{} chunk(s) kept their original text (lines {})",
                report.substituted.len(),
                report
                    .substituted
                    .iter()
                    .map(|f| f.line.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

fn progress_style(unit: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
            unit
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░")
}
