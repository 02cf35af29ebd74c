//! Launcher signature matching.
//!
//! A legacy invocation starts with a fixed token sequence such as
//! `java -Xmx4g -jar picard.jar`: the runtime program, optional runtime
//! options, the jar selector and the jar name, all on one physical line.

use std::ops::Range;

use cmdline_rewrite_core::LauncherSignature;
use regex::Regex;

use crate::util::is_token_char;

/// One launcher signature occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherMatch {
    /// Byte span of the whole signature (program through jar name).
    pub span: Range<usize>,
    /// Byte span of the runtime options between the program and the jar
    /// selector, when any were written.
    pub options: Option<Range<usize>>,
}

impl LauncherMatch {
    /// Returns the trimmed runtime options text, if non-empty.
    pub fn runtime_options<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.options
            .clone()
            .map(|range| text[range].trim())
            .filter(|opts| !opts.is_empty())
    }
}

/// Compiled matcher for a [`LauncherSignature`].
///
/// Matching is case-insensitive. The signature must not be glued to
/// surrounding token characters, so `-Djava.io.tmp` never starts a match.
#[derive(Debug, Clone)]
pub struct LauncherPattern {
    regex: Regex,
}

impl LauncherPattern {
    /// Compiles the matcher for `signature`.
    ///
    /// The jar name may carry a directory prefix (`/opt/picard/picard.jar`)
    /// and a version or build suffix before its extension
    /// (`picard-2.18.2.jar`).
    pub fn new(signature: &LauncherSignature) -> Self {
        let (stem, extension) = split_extension(&signature.jar_name);
        let pattern = format!(
            r"(?i){program}(?P<opts>(?:[ \t]+\S+)*?)[ \t]+{selector}[ \t]+(?:\S*/)?{stem}(?:[-_][0-9A-Za-z._-]*?)?{extension}",
            program = regex::escape(&signature.program),
            selector = regex::escape(&signature.jar_selector),
            stem = regex::escape(stem),
            extension = regex::escape(extension),
        );
        let regex = Regex::new(&pattern).expect("escaped launcher pattern must compile");
        Self { regex }
    }

    /// Finds the first signature starting at or after byte offset `from`.
    pub fn find(&self, text: &str, from: usize) -> Option<LauncherMatch> {
        let mut cursor = from;
        while cursor <= text.len() {
            let caps = self.regex.captures_at(text, cursor)?;
            let whole = caps.get(0)?;
            if is_standalone(text, whole.start(), whole.end()) {
                let options = caps
                    .name("opts")
                    .filter(|m| m.start() < m.end())
                    .map(|m| m.range());
                return Some(LauncherMatch {
                    span: whole.range(),
                    options,
                });
            }
            cursor = next_char_boundary(text, whole.start());
        }
        None
    }

    /// Returns `true` if `text` contains a signature anywhere.
    pub fn is_match(&self, text: &str) -> bool {
        self.find(text, 0).is_some()
    }
}

/// Splits `picard.jar` into `picard` and `.jar`. Names without an
/// extension keep an empty one.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name.split_at(pos),
        _ => (name, ""),
    }
}

fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .is_none_or(|ch| !is_token_char(ch));
    let after_ok = text[end..].chars().next().is_none_or(|ch| !is_token_char(ch));
    before_ok && after_ok
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |ch| pos + ch.len_utf8())
}
