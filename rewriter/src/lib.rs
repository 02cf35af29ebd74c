//! Rewrites legacy `NAME=value` tool invocations embedded in documentation.
//!
//! Example blocks (by default `<pre>...</pre>`) that contain a launcher
//! signature such as `java -Xmx4g -jar picard.jar` are rewritten so that
//!
//! ```text
//! java -jar picard.jar MergeVcfs I=file1 O=file2 CREATE_INDEX=true
//! ```
//!
//! becomes
//!
//! ```text
//! gatk MergeVcfs -I file1 -O file2 --CREATE_INDEX
//! ```
//!
//! The pass is a pipeline of small stages:
//!
//! - [`BlockLocator`] finds example blocks containing a signature.
//! - [`segment_region`] splits a block into candidate invocations using
//!   the continuation and blank-line rules.
//! - [`parse_invocation`] extracts the tool name and `name=value` tokens.
//! - [`ArgumentRewriter`] picks dash prefixes from an [`ArgumentRegistry`]
//!   and compresses boolean flags.
//! - [`Rewriter`] stitches the result back together, preserving every
//!   byte it does not rewrite.
//!
//! [`ArgumentRegistry`]: cmdline_rewrite_core::ArgumentRegistry
//!
//! # Example
//!
//! ```
//! use cmdline_rewrite::{CollectingSink, Rewriter};
//! use cmdline_rewrite_core::ToolCatalog;
//!
//! // An empty catalog: every tool is unknown, so prefixes are guessed.
//! let catalog = ToolCatalog::new("1.0.0", "2024-01-15T10:30:00Z");
//! let sink = CollectingSink::new();
//! let rewriter = Rewriter::new(&catalog).with_sink(&sink);
//!
//! let out = rewriter.rewrite("<pre>java -jar picard.jar SortSam INPUT=in.bam O=out.bam</pre>");
//! assert_eq!(out, "<pre>gatk SortSam --INPUT in.bam -O out.bam</pre>");
//! assert_eq!(sink.warnings().len(), 1);
//! ```

mod arguments;
mod diagnostics;
mod invocation;
mod locator;
mod report;
mod rewrite;
mod segmenter;
mod signature;
mod util;

pub use arguments::{
    ArgumentRewriter, Prefix, RewrittenArguments, RewrittenToken, choose_prefix, heuristic_prefix,
    is_truthy, rewrite_argument,
};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticLevel, DiagnosticSink, TracingSink};
pub use invocation::{ArgumentToken, Invocation, parse_invocation};
pub use locator::{BlockLocator, Region};
pub use report::RewriteReport;
pub use rewrite::{Rewriter, rewrite_document};
pub use segmenter::{Segment, Terminator, segment_region};
pub use signature::{LauncherMatch, LauncherPattern};
