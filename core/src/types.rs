//! Catalog type definitions for legacy tool argument modeling.
//!
//! This module defines the data model used to describe the arguments of
//! legacy tools whose documentation examples are translated. The types are
//! designed for serialization with [`serde`] and round-trip through JSON and
//! YAML catalog files.

use serde::{Deserialize, Serialize};

/// Version of the catalog contract (semver).
///
/// Embedded in every [`ToolSchema`] and [`ToolCatalog`](crate::ToolCatalog)
/// to track compatibility across catalog versions.
pub const CATALOG_CONTRACT_VERSION: &str = "1.0.0";

/// Source of catalog information.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_core::CatalogSource;
///
/// let source = CatalogSource::default();
/// assert_eq!(source, CatalogSource::Declared);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CatalogSource {
    /// Declared by hand in a catalog file (the default source).
    #[default]
    Declared,
    /// Exported from the legacy tool's own argument definitions.
    Exported,
    /// Added locally to patch a gap in an exported catalog.
    Override,
}

/// Definition of one legacy tool argument.
///
/// An argument always has a canonical long name and may have a short name.
/// Either spelling can appear in a legacy `NAME=value` invocation. Boolean
/// arguments are marked with `is_flag` so that `NAME=true` can be compressed
/// into a bare flag.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_core::ArgumentDefinition;
///
/// let input = ArgumentDefinition::with_value("INPUT").with_short("I");
/// assert!(input.matches("INPUT"));
/// assert!(input.matches("I"));
/// assert!(!input.is_flag);
///
/// let index = ArgumentDefinition::flag("CREATE_INDEX");
/// assert!(index.is_flag);
/// assert!(index.is_long_name("CREATE_INDEX"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    /// Canonical long name (e.g., "INPUT")
    pub long_name: String,
    /// Optional short name (e.g., "I")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Whether the argument is boolean-typed
    #[serde(default)]
    pub is_flag: bool,
    /// Description from the tool documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ArgumentDefinition {
    /// Creates a boolean argument.
    pub fn flag(long_name: &str) -> Self {
        Self {
            long_name: long_name.to_string(),
            short_name: None,
            is_flag: true,
            description: None,
        }
    }

    /// Creates an argument that takes a value.
    pub fn with_value(long_name: &str) -> Self {
        Self {
            long_name: long_name.to_string(),
            short_name: None,
            is_flag: false,
            description: None,
        }
    }

    /// Adds a short name.
    pub fn with_short(mut self, short_name: &str) -> Self {
        self.short_name = Some(short_name.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns `true` if `name` is exactly the canonical long name.
    pub fn is_long_name(&self, name: &str) -> bool {
        self.long_name == name
    }

    /// Checks if this argument is spelled `name` (long or short form).
    pub fn matches(&self, name: &str) -> bool {
        self.long_name == name || self.short_name.as_deref() == Some(name)
    }

    /// Returns every spelling of this argument, long name first.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.long_name.as_str()).chain(self.short_name.as_deref())
    }
}

/// Argument catalog for one legacy tool.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_core::{ArgumentDefinition, ToolSchema};
///
/// let tool = ToolSchema::new("MergeVcfs")
///     .with_argument(ArgumentDefinition::with_value("INPUT").with_short("I"))
///     .with_argument(ArgumentDefinition::flag("CREATE_INDEX"));
///
/// assert_eq!(tool.find_argument("I").unwrap().long_name, "INPUT");
/// assert!(tool.find_argument("CREATE_INDEX").unwrap().is_flag);
/// assert!(tool.find_argument("OUTPUT").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Catalog contract version (populated from [`CATALOG_CONTRACT_VERSION`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// The legacy tool name (e.g., "MergeVcfs")
    pub tool: String,
    /// Short description of the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared arguments
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,
    /// Where this entry came from
    #[serde(default)]
    pub source: CatalogSource,
}

impl ToolSchema {
    /// Creates an empty tool entry with the given name.
    pub fn new(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            ..Default::default()
        }
    }

    /// Adds an argument definition.
    pub fn with_argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Finds an argument by long or short name.
    ///
    /// A long-name match wins over a short-name match so that a short name
    /// shadowing another argument's long name still resolves canonically.
    pub fn find_argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments
            .iter()
            .find(|arg| arg.is_long_name(name))
            .or_else(|| {
                self.arguments
                    .iter()
                    .find(|arg| arg.short_name.as_deref() == Some(name))
            })
    }

    /// Gets all long argument names in declaration order.
    pub fn argument_names(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.long_name.as_str()).collect()
    }
}
