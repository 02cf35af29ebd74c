//! Catalog and configuration validation.
//!
//! Validates structural invariants of tool entries, catalogs and rewrite
//! settings, catching errors such as duplicate argument spellings, argument
//! names that could never appear in a `NAME=value` token, and empty markers
//! before they cause silent mistranslations downstream.
//!
//! # Examples
//!
//! ```
//! use cmdline_rewrite_core::*;
//!
//! let tool = ToolSchema::new("MergeVcfs")
//!     .with_argument(ArgumentDefinition::with_value("INPUT").with_short("I"));
//! assert!(validate_tool(&tool).is_empty());
//!
//! // Invalid: argument name contains '='
//! let bad = ToolSchema::new("MergeVcfs")
//!     .with_argument(ArgumentDefinition::with_value("INPUT=x"));
//! assert!(!validate_tool(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{RewriteConfig, ToolCatalog, ToolSchema};

/// Catalog/configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Catalog version string is empty.
    #[error("catalog version cannot be empty")]
    EmptyCatalogVersion,
    /// Tool name is empty or whitespace-only.
    #[error("tool name cannot be empty")]
    EmptyToolName,
    /// Tool name contains whitespace or '='.
    #[error("invalid tool name: {0}")]
    InvalidToolName(String),
    /// Two entries in the same catalog share a tool name.
    #[error("duplicate tool in catalog: {0}")]
    DuplicateTool(String),
    /// An argument spelling is empty.
    #[error("argument name cannot be empty in tool {0}")]
    EmptyArgumentName(String),
    /// An argument spelling contains whitespace or '=', or starts with '-'.
    #[error("invalid argument name: {0}")]
    InvalidArgumentName(String),
    /// Two arguments of the same tool share a spelling.
    #[error("duplicate argument in tool {tool}: {argument}")]
    DuplicateArgument {
        /// Tool declaring the argument.
        tool: String,
        /// Spelling declared twice.
        argument: String,
    },
    /// A required rewrite setting is empty.
    #[error("rewrite setting cannot be empty: {0}")]
    EmptySetting(&'static str),
}

/// Validates a full catalog.
///
/// Checks for an empty version string, duplicate tool names, and validates
/// each tool individually. Stops at the first problem found.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_core::*;
///
/// let mut catalog = ToolCatalog::new("1.0.0", "2024-01-01T00:00:00Z");
/// catalog.tools.push(ToolSchema::new("MergeVcfs"));
/// assert!(validate_catalog(&catalog).is_empty());
///
/// catalog.tools.push(ToolSchema::new("MergeVcfs"));
/// let errors = validate_catalog(&catalog);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateTool(_))));
/// ```
pub fn validate_catalog(catalog: &ToolCatalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if catalog.version.trim().is_empty() {
        errors.push(ValidationError::EmptyCatalogVersion);
        return errors;
    }

    let mut seen_tools: HashSet<&str> = HashSet::new();
    for tool in &catalog.tools {
        let name = tool.tool.as_str();
        if !seen_tools.insert(name) {
            errors.push(ValidationError::DuplicateTool(name.to_string()));
            return errors;
        }
        errors.extend(validate_tool(tool));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates a single tool entry.
pub fn validate_tool(tool: &ToolSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let name = tool.tool.trim();
    if name.is_empty() {
        errors.push(ValidationError::EmptyToolName);
        return errors;
    }
    if name.contains(|c: char| c.is_whitespace() || c == '=') {
        errors.push(ValidationError::InvalidToolName(name.to_string()));
        return errors;
    }

    let mut seen = HashSet::new();
    for argument in &tool.arguments {
        for spelling in argument.spellings() {
            if spelling.is_empty() {
                errors.push(ValidationError::EmptyArgumentName(name.to_string()));
                return errors;
            }
            if !is_valid_argument_name(spelling) {
                errors.push(ValidationError::InvalidArgumentName(spelling.to_string()));
                return errors;
            }
            if !seen.insert(spelling) {
                errors.push(ValidationError::DuplicateArgument {
                    tool: name.to_string(),
                    argument: spelling.to_string(),
                });
                return errors;
            }
        }
    }

    errors
}

/// Validates rewrite settings.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_core::*;
///
/// assert!(validate_config(&RewriteConfig::default()).is_empty());
///
/// let mut config = RewriteConfig::default();
/// config.launcher.jar_name.clear();
/// assert_eq!(
///     validate_config(&config),
///     vec![ValidationError::EmptySetting("launcher.jar_name")]
/// );
/// ```
pub fn validate_config(config: &RewriteConfig) -> Vec<ValidationError> {
    let required = [
        ("open_marker", config.open_marker.as_str()),
        ("close_marker", config.close_marker.as_str()),
        ("launcher.program", config.launcher.program.as_str()),
        ("launcher.jar_selector", config.launcher.jar_selector.as_str()),
        ("launcher.jar_name", config.launcher.jar_name.as_str()),
        ("replacement_tool", config.replacement_tool.as_str()),
        ("runtime_options_flag", config.runtime_options_flag.as_str()),
    ];

    required
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| ValidationError::EmptySetting(field))
        .collect()
}

fn is_valid_argument_name(name: &str) -> bool {
    !name.starts_with('-') && !name.contains(|c: char| c.is_whitespace() || c == '=')
}

#[cfg(test)]
mod tests {
    use crate::ArgumentDefinition;

    use super::*;

    #[test]
    fn test_validate_catalog_rejects_duplicate_tools() {
        let mut catalog = ToolCatalog::new("1.0.0", "2026-02-07T00:00:00Z");
        catalog.tools.push(ToolSchema::new("MergeVcfs"));
        catalog.tools.push(ToolSchema::new("MergeVcfs"));

        let errors = validate_catalog(&catalog);
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateTool("MergeVcfs".to_string())]
        );
    }

    #[test]
    fn test_validate_catalog_rejects_empty_version() {
        let catalog = ToolCatalog::new("  ", "2026-02-07T00:00:00Z");
        assert_eq!(
            validate_catalog(&catalog),
            vec![ValidationError::EmptyCatalogVersion]
        );
    }

    #[test]
    fn test_validate_tool_rejects_dashed_argument() {
        let tool = ToolSchema::new("MergeVcfs")
            .with_argument(ArgumentDefinition::with_value("--INPUT"));

        assert_eq!(
            validate_tool(&tool),
            vec![ValidationError::InvalidArgumentName("--INPUT".to_string())]
        );
    }

    #[test]
    fn test_validate_tool_rejects_short_name_colliding_with_long_name() {
        let tool = ToolSchema::new("FastqToSam")
            .with_argument(ArgumentDefinition::with_value("OUTPUT").with_short("O"))
            .with_argument(ArgumentDefinition::with_value("O"));

        assert_eq!(
            validate_tool(&tool),
            vec![ValidationError::DuplicateArgument {
                tool: "FastqToSam".to_string(),
                argument: "O".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_tool_rejects_tool_name_with_space() {
        let tool = ToolSchema::new("Merge Vcfs");
        assert_eq!(
            validate_tool(&tool),
            vec![ValidationError::InvalidToolName("Merge Vcfs".to_string())]
        );
    }

    #[test]
    fn test_validate_tool_accepts_valid_tool() {
        let tool = ToolSchema::new("MergeVcfs")
            .with_argument(ArgumentDefinition::with_value("INPUT").with_short("I"))
            .with_argument(ArgumentDefinition::with_value("OUTPUT").with_short("O"))
            .with_argument(ArgumentDefinition::flag("CREATE_INDEX"));

        assert!(validate_tool(&tool).is_empty());
    }

    #[test]
    fn test_validate_config_reports_every_empty_setting() {
        let config = RewriteConfig {
            open_marker: String::new(),
            replacement_tool: " ".to_string(),
            ..RewriteConfig::default()
        };

        assert_eq!(
            validate_config(&config),
            vec![
                ValidationError::EmptySetting("open_marker"),
                ValidationError::EmptySetting("replacement_tool"),
            ]
        );
    }
}
