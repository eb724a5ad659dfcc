/*!
 * Block-level state tracker.
 *
 * The document is split into lines (terminators kept) and a `ParseState`
 * is folded over them. `transition` is a pure function from the current
 * state and one line to the next state and what to do with that line;
 * `parse_document` only applies those decisions to a chunk builder.
 */

use log::{debug, trace};

use super::chunk::{Chunk, ChunkKind, Document};
use super::inline::{self, LineScan};
use super::markup::{self, OpenElement};
use super::math;

/// Minimum run length of a code fence
const MIN_FENCE_LEN: usize = 3;

/// The fence that opened a code block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceMarker {
    /// '`' or '~'
    pub ch: char,
    /// Run length, at least three
    pub len: usize,
}

impl FenceMarker {
    /// Fence at the start of the trimmed line, language tag ignored
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let ch = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = trimmed.chars().take_while(|c| *c == ch).count();
        (len >= MIN_FENCE_LEN).then_some(Self { ch, len })
    }

    /// A closing fence is a bare run of the same character, at least as long
    pub fn is_closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim();
        !trimmed.is_empty()
            && trimmed.chars().all(|c| c == self.ch)
            && trimmed.chars().count() >= self.len
    }
}

/// Line-by-line parse state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    Text,
    InCodeBlock(FenceMarker),
    InMathBlock,
    InMarkupBlock(OpenElement),
}

/// What to do with one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction<'a> {
    /// Prose line, already split by the inline scanner. A `block_start`
    /// in the scan means a math block opens at that offset.
    Scanned(LineScan<'a>),
    /// Whole line opens a block chunk of this kind
    Open(ChunkKind),
    /// Line belongs to the open block
    Append,
    /// Line closes the open block and belongs to it
    Close,
    /// The open block ends at byte `end` of the line; the rest is scanned as prose
    CloseAt { end: usize, rest: LineScan<'a> },
}

/// Next state and line disposition for one line body (terminator excluded).
pub fn transition<'a>(state: &ParseState, body: &'a str) -> (ParseState, LineAction<'a>) {
    match state {
        ParseState::Text => open_transition(body),
        ParseState::InCodeBlock(marker) => {
            if marker.is_closed_by(body) {
                (ParseState::Text, LineAction::Close)
            } else {
                (state.clone(), LineAction::Append)
            }
        }
        ParseState::InMathBlock => match math::find_display_delimiter(body, 0) {
            Some(at) if body[at + 2..].trim().is_empty() => (ParseState::Text, LineAction::Close),
            Some(at) => {
                let end = at + 2;
                let rest = inline::scan_line(&body[end..]);
                let next = if rest.block_start.is_some() {
                    ParseState::InMathBlock
                } else {
                    ParseState::Text
                };
                (next, LineAction::CloseAt { end, rest })
            }
            None => (ParseState::InMathBlock, LineAction::Append),
        },
        ParseState::InMarkupBlock(open) => {
            let depth = open.depth + markup::depth_delta(body, &open.tag);
            if depth <= 0 {
                (ParseState::Text, LineAction::Close)
            } else {
                let open = OpenElement {
                    tag: open.tag.clone(),
                    depth,
                };
                (ParseState::InMarkupBlock(open), LineAction::Append)
            }
        }
    }
}

fn open_transition(body: &str) -> (ParseState, LineAction<'_>) {
    if let Some(marker) = FenceMarker::parse(body) {
        return (
            ParseState::InCodeBlock(marker),
            LineAction::Open(ChunkKind::CodeBlock),
        );
    }

    if let Some(open) = markup::open_element(body) {
        return (
            ParseState::InMarkupBlock(open),
            LineAction::Open(ChunkKind::Markup),
        );
    }

    let scan = inline::scan_line(body);
    let next = if scan.block_start.is_some() {
        ParseState::InMathBlock
    } else {
        ParseState::Text
    };
    (next, LineAction::Scanned(scan))
}

/// Split a line into its body and its terminator ("\n", "\r\n" or "")
pub fn split_terminator(line: &str) -> (&str, &str) {
    let body_len = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .map_or(line.len(), str::len);
    line.split_at(body_len)
}

/// Accumulator threaded through the line fold
#[derive(Default)]
struct Builder {
    chunks: Vec<Chunk>,
    /// Block chunk still being extended
    open_block: Option<Chunk>,
}

impl Builder {
    fn push_text(&mut self, text: &str, line: usize) {
        self.chunks.push(Chunk::new(ChunkKind::Text, text, line));
    }

    fn start_block(&mut self, kind: ChunkKind, text: &str, line: usize) {
        self.open_block = Some(Chunk::new(kind, text, line));
    }

    fn append_block(&mut self, text: &str) {
        if let Some(block) = self.open_block.as_mut() {
            block.text.push_str(text);
        }
    }

    fn close_block(&mut self) {
        if let Some(block) = self.open_block.take() {
            self.chunks.push(block);
        }
    }

    fn push_scan(&mut self, scan: LineScan<'_>, body: &str, terminator: &str, line: usize) {
        for span in &scan.spans {
            self.chunks.push(Chunk::new(span.kind, span.text, line));
        }

        match scan.block_start {
            Some(start) => {
                let mut text = String::with_capacity(body.len() - start + terminator.len());
                text.push_str(&body[start..]);
                text.push_str(terminator);
                self.start_block(ChunkKind::MathBlock, &text, line);
            }
            None if terminator.is_empty() => {}
            None => match self.chunks.last_mut() {
                Some(last) if last.kind == ChunkKind::Text && last.line == line => {
                    last.text.push_str(terminator);
                }
                _ => self.push_text(terminator, line),
            },
        }
    }

    fn apply(mut self, action: LineAction<'_>, line: &str, line_number: usize) -> Self {
        match action {
            LineAction::Scanned(scan) => {
                let (body, terminator) = split_terminator(line);
                self.push_scan(scan, body, terminator, line_number);
            }
            LineAction::Open(kind) => self.start_block(kind, line, line_number),
            LineAction::Append => self.append_block(line),
            LineAction::Close => {
                self.append_block(line);
                self.close_block();
            }
            LineAction::CloseAt { end, rest } => {
                let (body, terminator) = split_terminator(line);
                self.append_block(&body[..end]);
                self.close_block();
                self.push_scan(rest, &body[end..], terminator, line_number);
            }
        }
        self
    }

    fn finish(mut self) -> Vec<Chunk> {
        // Unterminated blocks run to the end of the document
        self.close_block();
        self.chunks
    }
}

/// Parse a whole document into its chunk stream.
///
/// Total over all inputs: malformed markup degrades to text or to a block
/// that extends to the end of the document.
pub fn parse_document(input: &str) -> Document {
    let (state, builder) = input.split_inclusive('\n').enumerate().fold(
        (ParseState::Text, Builder::default()),
        |(state, builder), (index, line)| {
            let (body, _) = split_terminator(line);
            let (next, action) = transition(&state, body);
            if next != state {
                trace!("line {}: {:?} -> {:?}", index + 1, state, next);
            }
            (next, builder.apply(action, line, index + 1))
        },
    );

    if let Some(open) = builder.open_block.as_ref() {
        match &state {
            ParseState::InMarkupBlock(element) => debug!(
                "<{}> opened on line {} is never closed; the rest of the document is markup",
                element.tag, open.line
            ),
            other => debug!(
                "Block opened on line {} is never closed ({:?}); it extends to the end",
                open.line, other
            ),
        }
    }

    Document::from_chunks(builder.finish())
}
