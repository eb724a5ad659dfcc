/*!
 * Reassembly of a chunk stream into output text.
 *
 * Protected chunks are always re-emitted byte for byte. Reassembling with
 * an identity function reproduces the parsed input exactly.
 */

use super::chunk::Document;

/// Rebuild the document, replacing each translatable chunk with `translate(text)`.
pub fn reassemble<F>(doc: &Document, mut translate: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(doc.iter().map(|c| c.text.len()).sum());
    for chunk in doc {
        if chunk.is_translatable() {
            out.push_str(&translate(&chunk.text));
        } else {
            out.push_str(&chunk.text);
        }
    }
    out
}

/// Fallible variant of [`reassemble`]; the first error aborts the document.
pub fn try_reassemble<F, E>(doc: &Document, mut translate: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut out = String::with_capacity(doc.iter().map(|c| c.text.len()).sum());
    for chunk in doc {
        if chunk.is_translatable() {
            out.push_str(&translate(&chunk.text)?);
        } else {
            out.push_str(&chunk.text);
        }
    }
    Ok(out)
}

/// Rebuild from translations indexed by chunk position.
///
/// `translations[i]` replaces chunk `i` when it is `Some` and the chunk is
/// translatable; everything else keeps its original text. Missing trailing
/// entries count as `None`.
pub fn reassemble_indexed(doc: &Document, translations: &[Option<String>]) -> String {
    let mut out = String::with_capacity(doc.iter().map(|c| c.text.len()).sum());
    for (index, chunk) in doc.iter().enumerate() {
        match translations.get(index).and_then(Option::as_deref) {
            Some(translated) if chunk.is_translatable() => out.push_str(translated),
            _ => out.push_str(&chunk.text),
        }
    }
    out
}
