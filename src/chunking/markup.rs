/*!
 * Embedded markup recognition.
 *
 * Single-line matchers for SVG elements, generic HTML elements and
 * autolinks, plus the tag-depth tracking used for elements that span
 * several lines.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Container elements that may open a multi-line markup region
pub const BLOCK_TAGS: [&str; 15] = [
    "svg", "div", "table", "pre", "details", "figure", "math", "section", "picture", "video",
    "audio", "iframe", "script", "style", "object",
];

/// `<svg ...>` opening tag at the start of the input
static SVG_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^<svg(?:\s[^<>]*)?>").unwrap());

/// Any opening or self-closed tag; group 2 ends with `/` when self-closed
static ELEMENT_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9-]*)((?:\s[^<>]*)?/?)>").unwrap());

/// `<scheme:...>` or `<user@host>`
static AUTOLINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^<(?:[A-Za-z][A-Za-z0-9+.-]{1,31}:[^<>\s]*|[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*)>",
    )
    .unwrap()
});

/// Tag name at the start of a (left-trimmed) line
static LEADING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9-]*)").unwrap());

/// A markup element left open at the end of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenElement {
    /// Lower-case tag name
    pub tag: String,
    /// Unclosed nesting depth of `tag`, always positive while open
    pub depth: i32,
}

/// Byte length of `<svg ...>...</svg>` starting at `pos`, first closing tag wins
pub fn svg_len(line: &str, pos: usize) -> Option<usize> {
    let rest = &line[pos..];
    let open = SVG_OPEN.find(rest)?;
    if open.as_str().ends_with("/>") {
        return None;
    }
    closing_tag_end(rest, open.end(), "svg")
}

/// Byte length of a generic element `<name ...>...</name>` or `<name .../>`
pub fn element_len(line: &str, pos: usize) -> Option<usize> {
    let rest = &line[pos..];
    let caps = ELEMENT_OPEN.captures(rest)?;
    let open_end = caps.get(0)?.end();
    if caps.get(2).is_some_and(|attrs| attrs.as_str().ends_with('/')) {
        return Some(open_end);
    }
    let name = caps.get(1)?.as_str().to_ascii_lowercase();
    closing_tag_end(rest, open_end, &name)
}

/// Byte length of a bare autolink at `pos`
pub fn autolink_len(line: &str, pos: usize) -> Option<usize> {
    AUTOLINK.find(&line[pos..]).map(|m| m.end())
}

/// End offset (exclusive) of the first `</tag>` at or after `from`
fn closing_tag_end(text: &str, from: usize, tag: &str) -> Option<usize> {
    let lower = text.to_ascii_lowercase();
    let needle = format!("</{}", tag);
    let mut search = from;

    while let Some(offset) = lower[search..].find(&needle) {
        let after_name = search + offset + needle.len();
        let tail = &lower[after_name..];
        let trimmed = tail.trim_start_matches([' ', '\t']);
        if trimmed.starts_with('>') {
            return Some(after_name + (tail.len() - trimmed.len()) + 1);
        }
        search = after_name;
    }

    None
}

/// Opening of a multi-line container element on this line, if it stays open.
///
/// Only lines whose trimmed content starts with one of [`BLOCK_TAGS`] qualify;
/// an element balanced on the same line is left to the inline scanner.
pub fn open_element(line: &str) -> Option<OpenElement> {
    let caps = LEADING_TAG.captures(line.trim_start())?;
    let tag = caps.get(1)?.as_str().to_ascii_lowercase();
    if !BLOCK_TAGS.contains(&tag.as_str()) {
        return None;
    }

    let depth = depth_delta(line, &tag);
    (depth > 0).then_some(OpenElement { tag, depth })
}

/// Openings minus closings of `tag` on one line; self-closed tags count zero
pub fn depth_delta(line: &str, tag: &str) -> i32 {
    let lower = line.to_ascii_lowercase();
    let mut delta = 0;

    for (lt, _) in lower.match_indices('<') {
        let after = &lower[lt + 1..];
        if let Some(rest) = after.strip_prefix('/') {
            if starts_with_tag(rest, tag) {
                delta -= 1;
            }
        } else if starts_with_tag(after, tag) {
            let self_closed = after
                .find('>')
                .is_some_and(|gt| after[..gt].ends_with('/'));
            if !self_closed {
                delta += 1;
            }
        }
    }

    delta
}

fn starts_with_tag(text: &str, tag: &str) -> bool {
    text.strip_prefix(tag).is_some_and(|rest| {
        rest.chars()
            .next()
            .is_none_or(|c| c.is_ascii_whitespace() || c == '>' || c == '/')
    })
}
