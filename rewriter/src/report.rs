//! Per-pass rewrite statistics.

use std::collections::BTreeSet;

use serde::Serialize;

/// Summary of one rewrite pass (or several, merged).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    /// Example blocks that contained at least one rewritten invocation.
    pub regions: usize,
    pub invocations: usize,
    /// Candidates passed through because no tool name was found.
    pub skipped_invocations: usize,
    pub arguments: usize,
    /// Flags whose boolean value was folded away.
    pub compressed_flags: usize,
    /// Tools absent from the registry, sorted.
    pub unknown_tools: BTreeSet<String>,
    /// Whether the output differs from the input.
    pub changed: bool,
}

impl RewriteReport {
    /// Adds `other` into `self`.
    pub fn merge(&mut self, other: &RewriteReport) {
        self.regions += other.regions;
        self.invocations += other.invocations;
        self.skipped_invocations += other.skipped_invocations;
        self.arguments += other.arguments;
        self.compressed_flags += other.compressed_flags;
        self.unknown_tools.extend(other.unknown_tools.iter().cloned());
        self.changed |= other.changed;
    }
}
