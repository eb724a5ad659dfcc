/*!
 * Chunk and document types produced by the chunker.
 *
 * A `Document` is the ordered, immutable result of one parse call. Every
 * byte of the source belongs to exactly one `Chunk`, so concatenating the
 * chunk texts in order always reproduces the source.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChunkKind {
    /// Translatable prose
    Text,
    /// Fenced code block, fences included
    CodeBlock,
    /// Backtick code span, backticks included
    CodeInline,
    /// `$$` display math, delimiters included
    MathBlock,
    /// `$` inline math, delimiters included
    MathInline,
    /// Embedded SVG/HTML element or autolink
    Markup,
}

impl ChunkKind {
    /// All kinds, in declaration order
    pub const ALL: [ChunkKind; 6] = [
        ChunkKind::Text,
        ChunkKind::CodeBlock,
        ChunkKind::CodeInline,
        ChunkKind::MathBlock,
        ChunkKind::MathInline,
        ChunkKind::Markup,
    ];

    /// Only prose is ever handed to a translator
    pub fn is_translatable(self) -> bool {
        matches!(self, ChunkKind::Text)
    }

    pub fn is_math(self) -> bool {
        matches!(self, ChunkKind::MathBlock | ChunkKind::MathInline)
    }

    pub fn is_code(self) -> bool {
        matches!(self, ChunkKind::CodeBlock | ChunkKind::CodeInline)
    }

    /// Upper-case label used by the inspection view
    pub fn label(self) -> &'static str {
        match self {
            ChunkKind::Text => "TEXT",
            ChunkKind::CodeBlock => "CODE_BLOCK",
            ChunkKind::CodeInline => "CODE_INLINE",
            ChunkKind::MathBlock => "MATH_BLOCK",
            ChunkKind::MathInline => "MATH_INLINE",
            ChunkKind::Markup => "MARKUP",
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A contiguous, exactly-bounded span of the source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Category of the span
    pub kind: ChunkKind,

    /// Exact source text, delimiters included
    pub text: String,

    /// 1-based line number where the chunk starts
    pub line: usize,
}

impl Chunk {
    pub fn new(kind: ChunkKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Returns true if this chunk should be translated
    pub fn is_translatable(&self) -> bool {
        self.kind.is_translatable()
    }

    /// Text between the delimiters of a math or inline code chunk.
    ///
    /// For other kinds the full text is returned.
    pub fn inner_text(&self) -> &str {
        match self.kind {
            ChunkKind::MathInline => strip_delimiters(&self.text, "$"),
            ChunkKind::MathBlock if self.text.starts_with("$$") => {
                let body = self.text.trim_end();
                strip_delimiters(body, "$$")
            }
            ChunkKind::CodeInline => {
                let ticks = self.text.len() - self.text.trim_start_matches('`').len();
                let ticks = &self.text[..ticks];
                strip_delimiters(&self.text, ticks)
            }
            _ => &self.text,
        }
    }
}

fn strip_delimiters<'a>(text: &'a str, delimiter: &str) -> &'a str {
    text.strip_prefix(delimiter)
        .and_then(|rest| rest.strip_suffix(delimiter))
        .unwrap_or(text)
}

/// Ordered chunk stream produced by one parse call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    chunks: Vec<Chunk>,
}

impl Document {
    pub(crate) fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Chunks in source order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Translatable chunks with their index in the stream
    pub fn translatable(&self) -> impl Iterator<Item = (usize, &Chunk)> {
        self.chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| chunk.is_translatable())
    }

    /// Number of chunks of the given kind
    pub fn count_kind(&self, kind: ChunkKind) -> usize {
        self.chunks.iter().filter(|c| c.kind == kind).count()
    }

    /// Concatenation of all chunk texts, i.e. the original input
    pub fn source(&self) -> String {
        let capacity = self.chunks.iter().map(|c| c.text.len()).sum();
        let mut out = String::with_capacity(capacity);
        for chunk in &self.chunks {
            out.push_str(&chunk.text);
        }
        out
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
