/*!
 * Document chunker.
 *
 * Splits a Markdown-like document into translatable prose and protected
 * spans (code, math, embedded markup), and puts it back together.
 *
 * - `chunk`: chunk and document types
 * - `block`: line-level state machine for fenced code, math and markup blocks
 * - `inline`: ordered inline matchers for a single prose line
 * - `math`: dollar-sign disambiguation
 * - `markup`: SVG/HTML element and autolink recognition
 * - `reassemble`: output reconstruction
 * - `inspect`: debug view of chunking decisions
 */

pub mod block;
pub mod chunk;
pub mod inline;
pub mod inspect;
pub mod markup;
pub mod math;
pub mod reassemble;

pub use self::chunk::{Chunk, ChunkKind, Document};
pub use self::inspect::{ChunkView, chunk_views, render_table};
pub use self::reassemble::{reassemble, reassemble_indexed, try_reassemble};

/// Parse a document into its chunk stream.
///
/// Pure and total: the same input always yields the same chunks, and the
/// chunk texts concatenate back to the input.
pub fn parse(input: &str) -> Document {
    block::parse_document(input)
}
