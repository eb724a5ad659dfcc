/*!
 * Inline scanner for single lines of prose.
 *
 * Matching is strictly left to right and non-overlapping. At every offset
 * the matchers in [`MATCHERS`] are tried in order and the first one that
 * reports anything other than `NoMatch` decides what happens. Once a
 * protected span's extent is known its content is never rescanned.
 */

use super::chunk::ChunkKind;
use super::markup;
use super::math::{self, DisplayMath};

/// Outcome of trying one matcher at one offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Matcher does not apply here
    NoMatch,
    /// Consume `len` bytes as plain text without trying later matchers
    Literal(usize),
    /// Protected span of `len` bytes
    Span { len: usize, kind: ChunkKind },
    /// Unclosed `$$`: display math continues on following lines
    OpensBlock,
}

/// Signature shared by all inline matchers: `(line, offset) -> result`
pub type Matcher = fn(&str, usize) -> MatchResult;

/// Matchers in priority order
pub const MATCHERS: [(&str, Matcher); 5] = [
    ("code_span", match_code_span),
    ("display_math", match_display_math),
    ("inline_math", match_inline_math),
    ("svg", match_svg),
    ("markup", match_markup),
];

/// A piece of a scanned line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: ChunkKind,
    pub text: &'a str,
}

/// Result of scanning one line body (terminator excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan<'a> {
    /// Spans covering `line[..block_start.unwrap_or(line.len())]`
    pub spans: Vec<Span<'a>>,
    /// Offset of an unclosed `$$` that opens a block math region
    pub block_start: Option<usize>,
}

/// Scan a single line body into text and protected spans.
pub fn scan_line(line: &str) -> LineScan<'_> {
    let mut spans = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < line.len() {
        match try_matchers(line, pos) {
            MatchResult::NoMatch => {
                pos += next_char_len(line, pos);
            }
            MatchResult::Literal(len) => {
                pos += len;
            }
            MatchResult::Span { len, kind } => {
                flush_text(line, text_start, pos, &mut spans);
                spans.push(Span {
                    kind,
                    text: &line[pos..pos + len],
                });
                pos += len;
                text_start = pos;
            }
            MatchResult::OpensBlock => {
                flush_text(line, text_start, pos, &mut spans);
                return LineScan {
                    spans,
                    block_start: Some(pos),
                };
            }
        }
    }

    flush_text(line, text_start, line.len(), &mut spans);
    LineScan {
        spans,
        block_start: None,
    }
}

/// First decisive matcher result at `pos`
pub fn try_matchers(line: &str, pos: usize) -> MatchResult {
    MATCHERS
        .iter()
        .map(|(_, matcher)| matcher(line, pos))
        .find(|result| *result != MatchResult::NoMatch)
        .unwrap_or(MatchResult::NoMatch)
}

fn flush_text<'a>(line: &'a str, start: usize, end: usize, spans: &mut Vec<Span<'a>>) {
    if end > start {
        spans.push(Span {
            kind: ChunkKind::Text,
            text: &line[start..end],
        });
    }
}

fn next_char_len(line: &str, pos: usize) -> usize {
    line[pos..].chars().next().map_or(1, char::len_utf8)
}

fn backtick_run(line: &str, pos: usize) -> usize {
    line.as_bytes()[pos..].iter().take_while(|b| **b == b'`').count()
}

/// A run of n backticks closes only at another run of exactly n backticks.
/// An unclosed run is literal text as a whole.
pub fn match_code_span(line: &str, pos: usize) -> MatchResult {
    let open = backtick_run(line, pos);
    if open == 0 {
        return MatchResult::NoMatch;
    }

    let mut search = pos + open;
    while search < line.len() {
        match line[search..].find('`') {
            Some(offset) => {
                let run_start = search + offset;
                let run = backtick_run(line, run_start);
                if run == open {
                    return MatchResult::Span {
                        len: run_start + run - pos,
                        kind: ChunkKind::CodeInline,
                    };
                }
                search = run_start + run;
            }
            None => break,
        }
    }

    MatchResult::Literal(open)
}

pub fn match_display_math(line: &str, pos: usize) -> MatchResult {
    match math::display_math_at(line, pos) {
        DisplayMath::Closed(len) => MatchResult::Span {
            len,
            kind: ChunkKind::MathBlock,
        },
        DisplayMath::Unclosed => MatchResult::OpensBlock,
        DisplayMath::Absent => MatchResult::NoMatch,
    }
}

pub fn match_inline_math(line: &str, pos: usize) -> MatchResult {
    match math::inline_math_len(line, pos) {
        Some(len) => MatchResult::Span {
            len,
            kind: ChunkKind::MathInline,
        },
        None => MatchResult::NoMatch,
    }
}

pub fn match_svg(line: &str, pos: usize) -> MatchResult {
    match markup::svg_len(line, pos) {
        Some(len) => MatchResult::Span {
            len,
            kind: ChunkKind::Markup,
        },
        None => MatchResult::NoMatch,
    }
}

pub fn match_markup(line: &str, pos: usize) -> MatchResult {
    if !line[pos..].starts_with('<') {
        return MatchResult::NoMatch;
    }
    match markup::element_len(line, pos).or_else(|| markup::autolink_len(line, pos)) {
        Some(len) => MatchResult::Span {
            len,
            kind: ChunkKind::Markup,
        },
        None => MatchResult::NoMatch,
    }
}
