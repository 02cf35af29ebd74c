//! Rewrite settings shared by the pipeline and the project configuration.
//!
//! Every field has a default matching the documentation conventions the
//! rewriter was built for: `<pre>` blocks containing
//! `java [options] -jar picard.jar Tool NAME=value ...` invocations that are
//! rewritten to `gatk Tool -NAME value ...`.
//!
//! # Example YAML
//!
//! ```yaml
//! open_marker: "<pre>"
//! close_marker: "</pre>"
//! launcher:
//!   program: java
//!   jar_selector: "-jar"
//!   jar_name: picard.jar
//! replacement_tool: gatk
//! runtime_options_flag: "--javaOptions"
//! ```

use serde::{Deserialize, Serialize};

/// Fixed token sequence that launches a legacy tool.
///
/// Matches `program [runtime options] jar_selector jar_name`, e.g.
/// `java -Xmx4g -jar picard.jar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSignature {
    /// Runtime program (e.g., "java").
    pub program: String,
    /// Token selecting the archive to run (e.g., "-jar").
    pub jar_selector: String,
    /// Archive name (e.g., "picard.jar").
    pub jar_name: String,
}

impl Default for LauncherSignature {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            jar_selector: "-jar".to_string(),
            jar_name: "picard.jar".to_string(),
        }
    }
}

/// Settings for one rewrite pass.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_core::RewriteConfig;
///
/// let config = RewriteConfig::default();
/// assert_eq!(config.open_marker, "<pre>");
/// assert_eq!(config.launcher.jar_name, "picard.jar");
/// assert_eq!(config.replacement_tool, "gatk");
///
/// let custom: RewriteConfig = serde_json::from_str(r#"{ "replacement_tool": "newtool" }"#).unwrap();
/// assert_eq!(custom.replacement_tool, "newtool");
/// assert_eq!(custom.close_marker, "</pre>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Literal opening an example block.
    pub open_marker: String,
    /// Literal closing an example block.
    pub close_marker: String,
    /// Signature identifying a legacy invocation.
    pub launcher: LauncherSignature,
    /// Literal substituted for the launcher signature.
    pub replacement_tool: String,
    /// Flag that re-wraps the launcher's runtime options.
    pub runtime_options_flag: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            open_marker: "<pre>".to_string(),
            close_marker: "</pre>".to_string(),
            launcher: LauncherSignature::default(),
            replacement_tool: "gatk".to_string(),
            runtime_options_flag: "--javaOptions".to_string(),
        }
    }
}

impl RewriteConfig {
    /// Returns `true` when both block markers are non-empty.
    pub fn has_markers(&self) -> bool {
        !self.open_marker.is_empty() && !self.close_marker.is_empty()
    }
}
