//! Splits a region's content into candidate invocations.
//!
//! Each candidate starts at a launcher signature. It ends at the first of:
//! the end of the region, a blank line, the end of a line whose last
//! non-whitespace character is not `\`, or the start of the next signature.

use std::ops::Range;

use crate::signature::{LauncherMatch, LauncherPattern};
use crate::util::{ends_with_continuation, line_end};

/// Why a segment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// The region's closing marker.
    CloseMarker,
    /// The end of an unclosed region (end of document).
    RegionEnd,
    /// An empty or whitespace-only line.
    BlankLine,
    /// A line without a trailing continuation marker.
    LineEnd,
    /// Another launcher signature.
    NextInvocation,
}

/// One candidate invocation, with offsets relative to the region content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// From the launcher signature to the terminator (exclusive).
    pub span: Range<usize>,
    pub launcher: LauncherMatch,
    pub terminator: Terminator,
}

/// Segments `content` (the text between a region's markers).
///
/// `closed` tells whether the region had a closing marker, which only
/// affects the reported [`Terminator`] of a segment running to the end.
pub fn segment_region(content: &str, closed: bool, pattern: &LauncherPattern) -> Vec<Segment> {
    let region_end = if closed {
        Terminator::CloseMarker
    } else {
        Terminator::RegionEnd
    };

    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(launcher) = pattern.find(content, cursor) {
        let (mut end, mut terminator) = line_rule_end(content, &launcher, region_end);

        if let Some(next) = pattern.find(content, launcher.span.end) {
            if next.span.start < end {
                end = next.span.start;
                terminator = Terminator::NextInvocation;
            }
        }

        tracing::debug!(start = launcher.span.start, end, terminator = ?terminator, "Segmented invocation");
        cursor = end;
        segments.push(Segment {
            span: launcher.span.start..end,
            launcher,
            terminator,
        });
    }

    segments
}

/// Applies the line rules, starting at the signature's line.
fn line_rule_end(
    content: &str,
    launcher: &LauncherMatch,
    region_end: Terminator,
) -> (usize, Terminator) {
    let mut line_start = launcher.span.start;

    loop {
        let eol = line_end(content, line_start);
        if !ends_with_continuation(&content[line_start..eol]) {
            if eol == content.len() {
                return (eol, region_end);
            }
            return (eol, Terminator::LineEnd);
        }
        if eol == content.len() {
            return (eol, region_end);
        }

        let next_start = eol + 1;
        let next_end = line_end(content, next_start);
        if content[next_start..next_end].trim().is_empty() {
            return (eol, Terminator::BlankLine);
        }
        line_start = next_start;
    }
}
