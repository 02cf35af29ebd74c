//! Example block location.
//!
//! Finds the regions of a document enclosed by the open/close marker pair
//! that contain at least one launcher signature.

use std::ops::Range;

use crate::signature::LauncherPattern;
use crate::util::find_ignore_ascii_case;

/// One example block, from the opening marker through the closing marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Span of the whole block including both markers. When the block is
    /// unclosed it runs to the end of the document.
    pub span: Range<usize>,
    /// Span between the markers.
    pub content: Range<usize>,
    /// Whether the closing marker was found.
    pub closed: bool,
}

/// Lazy iterator over the example blocks of a document.
///
/// Blocks that do not contain a launcher signature are skipped. Scanning
/// resumes after the end of the previous block, so regions never overlap.
pub struct BlockLocator<'a> {
    text: &'a str,
    open_marker: &'a str,
    close_marker: &'a str,
    pattern: &'a LauncherPattern,
    cursor: usize,
}

impl<'a> BlockLocator<'a> {
    /// Creates a locator over `text`.
    pub fn new(
        text: &'a str,
        open_marker: &'a str,
        close_marker: &'a str,
        pattern: &'a LauncherPattern,
    ) -> Self {
        Self {
            text,
            open_marker,
            close_marker,
            pattern,
            cursor: 0,
        }
    }
}

impl Iterator for BlockLocator<'_> {
    type Item = Region;

    fn next(&mut self) -> Option<Region> {
        if self.open_marker.is_empty() || self.close_marker.is_empty() {
            return None;
        }

        loop {
            let open = find_ignore_ascii_case(self.text, self.open_marker, self.cursor)?;
            let content_start = open + self.open_marker.len();

            let (content_end, end, closed) =
                match find_ignore_ascii_case(self.text, self.close_marker, content_start) {
                    Some(close) => (close, close + self.close_marker.len(), true),
                    None => (self.text.len(), self.text.len(), false),
                };
            self.cursor = end;

            if self.pattern.is_match(&self.text[content_start..content_end]) {
                return Some(Region {
                    span: open..end,
                    content: content_start..content_end,
                    closed,
                });
            }
        }
    }
}
