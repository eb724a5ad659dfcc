/*!
 * Document translation.
 *
 * Parses a document, sends its translatable chunks to the translation
 * service with bounded concurrency, and writes each result back into the
 * slot of the chunk it came from before reassembling the output.
 */

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use crate::app_config::FailurePolicy;
use crate::chunking::{self, Document, reassemble_indexed};
use crate::errors::TranslationError;

use super::core::TranslationService;

/// A chunk whose original text was kept because translation failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFailure {
    pub index: usize,
    pub line: usize,
    pub message: String,
}

/// What happened to the chunks of one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    /// Total number of chunks in the document
    pub chunks: usize,
    /// TEXT chunks replaced by a translation
    pub translated: usize,
    /// Whitespace-only TEXT chunks passed through
    pub skipped: usize,
    /// Translations answered by the cache
    pub cache_hits: usize,
    /// Chunks that kept their original text after a failure
    pub substituted: Vec<ChunkFailure>,
}

impl TranslationReport {
    pub fn is_complete(&self) -> bool {
        self.substituted.is_empty()
    }
}

enum ChunkResult {
    Translated { text: String, cached: bool },
    Failed(TranslationError),
    Cancelled,
}

/// Translator for whole documents
#[derive(Debug, Clone)]
pub struct DocumentTranslator {
    /// The translation service to use
    service: TranslationService,

    /// Maximum number of concurrent requests
    max_concurrent_requests: usize,

    /// Handling of chunks that cannot be translated
    failure_policy: FailurePolicy,
}

impl DocumentTranslator {
    /// Create a new document translator
    pub fn new(service: TranslationService) -> Self {
        Self {
            max_concurrent_requests: service.options.max_concurrent_requests.max(1),
            failure_policy: service.options.failure_policy,
            service,
        }
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn with_concurrency(mut self, max_concurrent_requests: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests.max(1);
        self
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Parse and translate `input`
    pub async fn translate_str(
        &self,
        input: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<(String, TranslationReport), TranslationError> {
        let doc = chunking::parse(input);
        self.translate_document(&doc, source_language, target_language, |_, _| {})
            .await
    }

    /// Translate every TEXT chunk of `doc` and reassemble the output
    ///
    /// `progress_callback(done, total)` is called after each dispatched chunk.
    pub async fn translate_document(
        &self,
        doc: &Document,
        source_language: &str,
        target_language: &str,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<(String, TranslationReport), TranslationError> {
        let start_time = Instant::now();
        let mut report = TranslationReport {
            chunks: doc.len(),
            ..TranslationReport::default()
        };

        let pending: Vec<(usize, &str)> = doc
            .translatable()
            .filter_map(|(index, chunk)| {
                if chunk.text.trim().is_empty() {
                    report.skipped += 1;
                    None
                } else {
                    Some((index, chunk.text.as_str()))
                }
            })
            .collect();

        let total = pending.len();
        let processed = Arc::new(AtomicUsize::new(0));
        let aborted = Arc::new(AtomicBool::new(false));
        let abort_on_failure = self.failure_policy == FailurePolicy::Abort;

        debug!(
            "Dispatching {} of {} chunks to {} ({} concurrent)",
            total,
            doc.len(),
            self.service.provider_name(),
            self.max_concurrent_requests
        );

        let mut results = stream::iter(pending)
            .map(|(index, text)| {
                let service = self.service.clone();
                let processed = processed.clone();
                let aborted = aborted.clone();
                let progress_callback = progress_callback.clone();

                async move {
                    if aborted.load(Ordering::SeqCst) {
                        return (index, ChunkResult::Cancelled);
                    }

                    let result = match service.translate_chunk(text, source_language, target_language).await {
                        Ok(outcome) => ChunkResult::Translated {
                            text: outcome.text,
                            cached: outcome.cached,
                        },
                        Err(e) => {
                            if abort_on_failure {
                                aborted.store(true, Ordering::SeqCst);
                            }
                            ChunkResult::Failed(e)
                        }
                    };

                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);

                    (index, result)
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        // Sort results by chunk index to keep failure handling deterministic
        results.sort_by_key(|(index, _)| *index);

        let mut translations: Vec<Option<String>> = vec![None; doc.len()];
        for (index, result) in results {
            let line = doc.chunks()[index].line;
            match result {
                ChunkResult::Translated { text, cached } => {
                    report.translated += 1;
                    if cached {
                        report.cache_hits += 1;
                    }
                    translations[index] = Some(text);
                }
                ChunkResult::Failed(e) if abort_on_failure => {
                    return Err(TranslationError::ChunkFailed {
                        index,
                        line,
                        source: Box::new(e),
                    });
                }
                ChunkResult::Failed(e) => {
                    warn!("Chunk {} (line {}) kept untranslated: {}", index, line, e);
                    report.substituted.push(ChunkFailure {
                        index,
                        line,
                        message: e.to_string(),
                    });
                }
                ChunkResult::Cancelled => {}
            }
        }

        debug!(
            "Translated {} chunks in {:?} ({} from cache, {} kept original)",
            report.translated,
            start_time.elapsed(),
            report.cache_hits,
            report.substituted.len()
        );

        Ok((reassemble_indexed(doc, &translations), report))
    }
}
