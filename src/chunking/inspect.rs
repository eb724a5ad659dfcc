/*!
 * Inspection view of a parsed document.
 *
 * Shows chunking decisions (kind, starting line, a bounded preview) without
 * performing any translation.
 */

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::chunk::{ChunkKind, Document};

/// Default number of characters shown per chunk
pub const DEFAULT_PREVIEW_WIDTH: usize = 50;

/// One row of the inspection view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkView {
    pub index: usize,
    pub kind: ChunkKind,
    pub translatable: bool,
    pub line: usize,
    /// First `width` characters with newlines escaped
    pub preview: String,
    /// Length of the full chunk text in bytes
    pub bytes: usize,
}

/// Build the inspection rows for a document
pub fn chunk_views(doc: &Document, preview_width: usize) -> Vec<ChunkView> {
    doc.iter()
        .enumerate()
        .map(|(index, chunk)| ChunkView {
            index,
            kind: chunk.kind,
            translatable: chunk.is_translatable(),
            line: chunk.line,
            preview: preview(&chunk.text, preview_width),
            bytes: chunk.text.len(),
        })
        .collect()
}

/// Truncate to `width` characters and escape line breaks
pub fn preview(text: &str, width: usize) -> String {
    text.chars()
        .take(width)
        .collect::<String>()
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

/// Plain-text table, one line per chunk
pub fn render_table(views: &[ChunkView]) -> String {
    let mut out = format!("Parsed {} chunks:\n", views.len());
    for view in views {
        let mark = if view.translatable { '✓' } else { '✗' };
        let _ = writeln!(
            out,
            "{:3} {} {:15} L{:3}: {}",
            view.index,
            mark,
            view.kind.label(),
            view.line,
            view.preview
        );
    }
    out
}

/// Number of chunks per kind, kinds without chunks omitted
pub fn summary(doc: &Document) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for kind in ChunkKind::ALL {
        let count = doc.count_kind(kind);
        if count > 0 {
            counts.insert(kind.label(), count);
        }
    }
    counts
}
