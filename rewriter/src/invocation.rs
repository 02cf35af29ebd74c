//! Parsing of one legacy invocation.
//!
//! The text after the launcher signature is split into whitespace-separated
//! words, keeping their byte spans and physical line. Continuation markers
//! are dropped. The first word names the tool; every later `name=value`
//! pair starts an argument whose value extends over the bare words that
//! follow it on the same line. Whitespace around the `=` is tolerated.

use std::ops::Range;

use crate::segmenter::Segment;

/// One `name=value` argument as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentToken<'a> {
    pub name: &'a str,
    /// Value text, possibly empty (`NAME=`) or containing inner spaces.
    pub raw_value: &'a str,
    /// Span from the first byte of the name through the last value byte.
    pub span: Range<usize>,
}

/// A parsed legacy invocation. Spans are relative to the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Span of the launcher signature.
    pub launcher: Range<usize>,
    /// Trimmed runtime options written inside the launcher.
    pub pre_options: Option<&'a str>,
    pub tool_name: &'a str,
    pub tool_span: Range<usize>,
    /// Arguments in source order, duplicates included.
    pub arguments: Vec<ArgumentToken<'a>>,
    /// Words that belong to no argument; left untouched.
    pub stray_words: Vec<Range<usize>>,
    /// Whole candidate span.
    pub span: Range<usize>,
}

#[derive(Debug, Clone)]
struct Word {
    span: Range<usize>,
    line: usize,
}

/// Parses the invocation covered by `segment`.
///
/// Returns `None` when no tool name can be found after the signature, or
/// when the first word already belongs to a `name=value` pair. Callers pass
/// such candidates through unchanged.
pub fn parse_invocation<'a>(text: &'a str, segment: &Segment) -> Option<Invocation<'a>> {
    let body = segment.launcher.span.end..segment.span.end;
    let words = split_words(text, body);

    let (tool, rest) = words.split_first()?;
    let tool_name = &text[tool.span.clone()];
    let pair_follows = rest
        .first()
        .is_some_and(|next| next.line == tool.line && text[next.span.clone()].starts_with('='));
    if tool_name.contains('=') || pair_follows {
        tracing::debug!(word = tool_name, "Invocation has no tool name");
        return None;
    }

    let mut arguments: Vec<ArgumentToken<'a>> = Vec::new();
    let mut stray_words = Vec::new();
    // Line of the argument whose value may still grow.
    let mut open_line: Option<usize> = None;
    // Offset just past the `=` of the last argument.
    let mut value_start = 0;

    let mut idx = 0;
    while idx < rest.len() {
        let word = &rest[idx];
        if let Some((name, separator, consumed)) = pair_start(text, rest, idx) {
            value_start = separator + 1;
            let end = rest[idx + consumed - 1].span.end;
            arguments.push(ArgumentToken {
                name,
                raw_value: text[value_start..end].trim_start(),
                span: word.span.start..end,
            });
            open_line = Some(word.line);
            idx += consumed;
            continue;
        }

        match (open_line, arguments.last_mut()) {
            (Some(line), Some(argument)) if line == word.line => {
                argument.span.end = word.span.end;
                argument.raw_value = text[value_start..word.span.end].trim_start();
            }
            _ => {
                open_line = None;
                stray_words.push(word.span.clone());
            }
        }
        idx += 1;
    }

    Some(Invocation {
        launcher: segment.launcher.span.clone(),
        pre_options: segment.launcher.runtime_options(text),
        tool_name,
        tool_span: tool.span.clone(),
        arguments,
        stray_words,
        span: segment.span.clone(),
    })
}

/// Recognizes a `name=value` pair starting at `words[idx]`, allowing
/// whitespace around the `=` (`name = value`, `name =value`, `name= value`).
///
/// Returns the name, the offset of the `=` and how many words the name and
/// separator occupy.
fn pair_start<'a>(text: &'a str, words: &[Word], idx: usize) -> Option<(&'a str, usize, usize)> {
    let word = &words[idx];
    let raw = &text[word.span.clone()];
    if let Some(pos) = raw.find('=') {
        let name = &raw[..pos];
        return is_argument_name(name).then_some((name, word.span.start + pos, 1));
    }

    let next = words.get(idx + 1).filter(|next| next.line == word.line)?;
    (is_argument_name(raw) && text[next.span.clone()].starts_with('='))
        .then_some((raw, next.span.start, 2))
}

/// Argument names are non-empty and must not already carry a dash prefix.
fn is_argument_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-')
}

/// Splits `text[range]` into words, dropping continuation markers.
fn split_words(text: &str, range: Range<usize>) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut line = 0;
    let mut start: Option<usize> = None;

    for (offset, ch) in text[range.clone()].char_indices() {
        let pos = range.start + offset;
        if ch.is_whitespace() {
            if let Some(word_start) = start.take() {
                words.push(Word {
                    span: word_start..pos,
                    line,
                });
            }
            if ch == '\n' {
                line += 1;
            }
        } else if start.is_none() {
            start = Some(pos);
        }
    }
    if let Some(word_start) = start {
        words.push(Word {
            span: word_start..range.end,
            line,
        });
    }

    let last_on_line: Vec<bool> = words
        .iter()
        .enumerate()
        .map(|(idx, word)| words.get(idx + 1).is_none_or(|next| next.line != word.line))
        .collect();

    words
        .into_iter()
        .zip(last_on_line)
        .filter_map(|(mut word, last)| {
            if last {
                let trimmed = text[word.span.clone()].trim_end_matches('\\');
                word.span.end = word.span.start + trimmed.len();
            } else if &text[word.span.clone()] == "\\" {
                return None;
            }
            (!word.span.is_empty()).then_some(word)
        })
        .collect()
}
