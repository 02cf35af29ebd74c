//! Shared text scanning helpers.

/// Finds `needle` in `haystack` at or after byte offset `from`, comparing
/// ASCII letters case-insensitively.
///
/// Returns the byte offset of the match start. Offsets are preserved because
/// ASCII case folding never changes byte lengths. An empty needle never
/// matches.
pub fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || from > hay.len() || needle.len() > hay.len() - from {
        return None;
    }

    (from..=hay.len() - needle.len())
        .find(|&idx| hay[idx..idx + needle.len()].eq_ignore_ascii_case(needle))
}

/// Returns the offset where the line containing `pos` ends
/// (the index of the next `\n`, or `text.len()`).
pub fn line_end(text: &str, pos: usize) -> usize {
    text[pos..]
        .find('\n')
        .map_or(text.len(), |offset| pos + offset)
}

/// Returns `true` when the last non-whitespace character of `line` is the
/// continuation marker.
pub fn ends_with_continuation(line: &str) -> bool {
    line.trim_end().ends_with('\\')
}

/// Characters that glue onto a launcher token and therefore break a
/// signature match (`-Djava.io.tmp`, `picard.jar.bak`).
pub fn is_token_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/' | '=')
}
