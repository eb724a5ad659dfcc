/*!
 * # Rosetta - prose-preserving Markdown translator
 *
 * A Rust library for translating Markdown-like documents without damaging
 * the parts that must not be translated.
 *
 * ## Features
 *
 * - Lossless chunking of a document into prose and protected spans:
 *   fenced code blocks, inline code, display and inline math, embedded
 *   SVG/HTML markup and autolinks
 * - Dollar-sign disambiguation (`$5 and $10` stays prose, `$x^2$` is math)
 * - Reassembly that re-emits every protected span byte for byte
 * - Concurrent translation of prose chunks with results placed back in
 *   document order
 * - Translation providers:
 *   - Identity (dry run)
 *   - External command pipelines
 *   - Ollama (local LLM)
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `chunking`: Parser, reassembler and inspection view
 * - `app_config`: Configuration management
 * - `translation`: Translation of chunks and documents:
 *   - `translation::core`: Per-chunk translation service
 *   - `translation::batch`: Whole-document translation
 *   - `translation::cache`: Caching of repeated chunks
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Translation backends
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod chunking;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, FailurePolicy};
pub use chunking::{Chunk, ChunkKind, Document, parse, reassemble};
pub use errors::{AppError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use translation::{DocumentTranslator, TranslationReport, TranslationService};
