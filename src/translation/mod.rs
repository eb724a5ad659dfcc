/*!
 * Translation of documents through a provider.
 *
 * - `core`: per-chunk translation service (cache, timeout, retries)
 * - `batch`: whole-document translation with bounded concurrency
 * - `cache`: caching of repeated chunks
 */

// Re-export main types for easier usage
pub use self::batch::{ChunkFailure, DocumentTranslator, TranslationReport};
pub use self::core::{ProviderBackend, TranslationOptions, TranslationOutcome, TranslationService};

// Submodules
pub mod batch;
pub mod cache;
pub mod core;
