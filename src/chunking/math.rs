/*!
 * Math delimiter handling.
 *
 * Separates `$...$` math from literal dollar signs such as prices, and
 * locates `$$` display math delimiters on a single line.
 */

/// Result of looking for `$$` display math at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMath {
    /// No unescaped `$$` at this position
    Absent,
    /// `$$...$$` closed on the same line; byte length of the whole span
    Closed(usize),
    /// `$$` with no closing `$$` later on the line
    Unclosed,
}

/// Operators that mark a `$...$` candidate as math even without letters
const MATH_OPERATORS: [char; 7] = ['^', '_', '+', '=', '/', '(', ')'];

/// True if the byte at `pos` is preceded by an odd number of backslashes
pub fn is_escaped(line: &str, pos: usize) -> bool {
    let backslashes = line.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|b| **b == b'\\')
        .count();
    backslashes % 2 == 1
}

/// Inspect the `$$` delimiter at `pos`, if any.
pub fn display_math_at(line: &str, pos: usize) -> DisplayMath {
    if !line[pos..].starts_with("$$") || is_escaped(line, pos) {
        return DisplayMath::Absent;
    }

    match find_display_delimiter(line, pos + 2) {
        Some(close) => DisplayMath::Closed(close + 2 - pos),
        None => DisplayMath::Unclosed,
    }
}

/// Offset of the first unescaped `$$` at or after `from`
pub fn find_display_delimiter(line: &str, from: usize) -> Option<usize> {
    let mut search = from;
    while let Some(offset) = line.get(search..)?.find("$$") {
        let at = search + offset;
        if !is_escaped(line, at) {
            return Some(at);
        }
        search = at + 1;
    }
    None
}

/// Byte length of an accepted inline math span starting at the `$` at `pos`.
///
/// The candidate closes at the first later unescaped `$`. It is rejected when
/// the content is empty or carries no math signal, when the closing `$` runs
/// straight into a digit ("$5 and $10"), or when the content is padded with
/// whitespace and has no operator ("$15, while $").
pub fn inline_math_len(line: &str, pos: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    if bytes.get(pos) != Some(&b'$') || is_escaped(line, pos) {
        return None;
    }

    let close = (pos + 1..bytes.len()).find(|&i| bytes[i] == b'$' && !is_escaped(line, i))?;
    let content = &line[pos + 1..close];

    let first = content.chars().next()?;
    let last = content.chars().next_back()?;
    if (first.is_whitespace() || last.is_whitespace()) && !has_operator(content) {
        return None;
    }

    if bytes.get(close + 1).is_some_and(u8::is_ascii_digit) {
        return None;
    }

    if !has_math_signal(content) {
        return None;
    }

    Some(close + 1 - pos)
}

/// Letters, backslashes and a handful of operators distinguish math from numbers
fn has_math_signal(content: &str) -> bool {
    content.chars().any(char::is_alphabetic) || has_operator(content)
}

fn has_operator(content: &str) -> bool {
    content.chars().any(|c| c == '\\' || MATH_OPERATORS.contains(&c))
}
