//! Block rewriting orchestration.
//!
//! A pass walks the document's example blocks and, inside each one, runs a
//! small state machine over the candidate invocations:
//!
//! ```text
//! Scanning ──segment──▶ InInvocation ──parsed──▶ Emitting ──▶ Scanning
//!                            │
//!                            └──no tool name──▶ Scanning (passed through)
//! ```
//!
//! Output is assembled by copying the untouched bytes between replaced
//! spans, so everything outside the launcher and the argument tokens is
//! reproduced exactly.

use cmdline_rewrite_core::{ArgumentRegistry, RewriteConfig};

use crate::arguments::ArgumentRewriter;
use crate::diagnostics::{DiagnosticSink, TRACING_SINK};
use crate::invocation::{Invocation, parse_invocation};
use crate::locator::BlockLocator;
use crate::report::RewriteReport;
use crate::segmenter::{Segment, segment_region};
use crate::signature::LauncherPattern;

/// Rewrites legacy invocations in documents.
///
/// A `Rewriter` holds no per-document state, so one instance can serve any
/// number of passes, including concurrent ones.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite::Rewriter;
/// use cmdline_rewrite_core::{ArgumentDefinition, ToolSchema};
///
/// let tool = ToolSchema::new("MergeVcfs")
///     .with_argument(ArgumentDefinition::with_value("INPUT").with_short("I"))
///     .with_argument(ArgumentDefinition::flag("CREATE_INDEX"));
///
/// let rewriter = Rewriter::new(&tool);
/// assert_eq!(
///     rewriter.rewrite("<pre>java -jar picard.jar MergeVcfs I=a.vcf CREATE_INDEX=true</pre>"),
///     "<pre>gatk MergeVcfs -I a.vcf --CREATE_INDEX</pre>",
/// );
/// ```
pub struct Rewriter<'r, R: ArgumentRegistry + ?Sized> {
    registry: &'r R,
    config: RewriteConfig,
    pattern: LauncherPattern,
    sink: &'r dyn DiagnosticSink,
}

enum PassState<'a> {
    Scanning,
    InInvocation(Segment),
    Emitting(Invocation<'a>),
}

impl<'r, R: ArgumentRegistry + ?Sized> Rewriter<'r, R> {
    /// Creates a rewriter with default settings that logs diagnostics
    /// through `tracing`.
    pub fn new(registry: &'r R) -> Self {
        let config = RewriteConfig::default();
        let pattern = LauncherPattern::new(&config.launcher);
        Self {
            registry,
            config,
            pattern,
            sink: &TRACING_SINK,
        }
    }

    /// Replaces the rewrite settings.
    pub fn with_config(mut self, config: RewriteConfig) -> Self {
        self.pattern = LauncherPattern::new(&config.launcher);
        self.config = config;
        self
    }

    /// Routes diagnostics to `sink`.
    pub fn with_sink(mut self, sink: &'r dyn DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrites every legacy invocation in `document`.
    ///
    /// Never fails: text that cannot be interpreted is copied unchanged.
    pub fn rewrite(&self, document: &str) -> String {
        self.rewrite_with_report(document).0
    }

    /// Like [`rewrite`](Self::rewrite), also returning pass statistics.
    pub fn rewrite_with_report(&self, document: &str) -> (String, RewriteReport) {
        let mut report = RewriteReport::default();
        if !self.config.has_markers() {
            return (document.to_string(), report);
        }

        let mut out = String::with_capacity(document.len() + document.len() / 8);
        let mut copied = 0;

        let regions = BlockLocator::new(
            document,
            &self.config.open_marker,
            &self.config.close_marker,
            &self.pattern,
        );
        for region in regions {
            out.push_str(&document[copied..region.content.start]);
            let before = report.invocations;
            self.rewrite_region(
                &document[region.content.clone()],
                region.closed,
                &mut out,
                &mut report,
            );
            if report.invocations > before {
                report.regions += 1;
            }
            copied = region.content.end;
        }
        out.push_str(&document[copied..]);

        report.changed = out != document;
        tracing::debug!(
            regions = report.regions,
            invocations = report.invocations,
            skipped = report.skipped_invocations,
            "Rewrite pass complete"
        );
        (out, report)
    }

    fn rewrite_region(
        &self,
        content: &str,
        closed: bool,
        out: &mut String,
        report: &mut RewriteReport,
    ) {
        let mut segments = segment_region(content, closed, &self.pattern).into_iter();
        let mut copied = 0;
        let mut state = PassState::Scanning;

        loop {
            state = match state {
                PassState::Scanning => match segments.next() {
                    Some(segment) => PassState::InInvocation(segment),
                    None => break,
                },
                PassState::InInvocation(segment) => match parse_invocation(content, &segment) {
                    Some(invocation) => PassState::Emitting(invocation),
                    None => {
                        tracing::debug!(
                            text = &content[segment.span.clone()],
                            "Passing through invocation without tool name"
                        );
                        report.skipped_invocations += 1;
                        PassState::Scanning
                    }
                },
                PassState::Emitting(invocation) => {
                    copied = self.emit(content, &invocation, copied, out, report);
                    PassState::Scanning
                }
            };
        }

        out.push_str(&content[copied..]);
    }

    /// Writes `invocation` in rewritten form, returning the new copy cursor.
    fn emit(
        &self,
        content: &str,
        invocation: &Invocation<'_>,
        mut copied: usize,
        out: &mut String,
        report: &mut RewriteReport,
    ) -> usize {
        out.push_str(&content[copied..invocation.launcher.start]);
        out.push_str(&self.replacement_launcher(invocation.pre_options));
        copied = invocation.launcher.end;

        let tool = invocation.tool_name;
        let rewritten =
            ArgumentRewriter::new(self.registry, self.sink).rewrite_all(tool, &invocation.arguments);
        if !rewritten.known_tool {
            report.unknown_tools.insert(tool.to_string());
        }

        for (argument, token) in invocation.arguments.iter().zip(&rewritten.tokens) {
            out.push_str(&content[copied..argument.span.start]);
            out.push_str(&token.to_string());
            copied = argument.span.end;
            if token.is_compressed() {
                report.compressed_flags += 1;
            }
        }

        tracing::debug!(
            tool,
            arguments = rewritten.tokens.len(),
            pre_options = ?invocation.pre_options,
            "Rewrote invocation"
        );
        report.invocations += 1;
        report.arguments += rewritten.tokens.len();
        copied
    }

    fn replacement_launcher(&self, pre_options: Option<&str>) -> String {
        match pre_options {
            Some(options) => format!(
                "{} {} {}",
                self.config.replacement_tool,
                self.config.runtime_options_flag,
                quote(options)
            ),
            None => self.config.replacement_tool.clone(),
        }
    }
}

/// Quotes runtime options with single quotes, or double quotes when the
/// options themselves contain a single quote.
fn quote(options: &str) -> String {
    if options.contains('\'') {
        format!("\"{options}\"")
    } else {
        format!("'{options}'")
    }
}

/// Rewrites `document` with default settings.
pub fn rewrite_document<R: ArgumentRegistry + ?Sized>(document: &str, registry: &R) -> String {
    Rewriter::new(registry).rewrite(document)
}
