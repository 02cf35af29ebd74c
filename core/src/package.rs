use serde::{Deserialize, Serialize};

use crate::ToolSchema;

/// Serializable tool catalog used for curation and distribution.
///
/// A catalog groups multiple [`ToolSchema`] values with version metadata,
/// making it suitable for serializing to JSON and shipping as a single
/// bundle file alongside the documentation sources.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_core::*;
///
/// let mut catalog = ToolCatalog::new("1.0.0", "2024-01-15T10:30:00Z");
/// catalog.name = Some("picard".into());
/// catalog.tools.push(ToolSchema::new("MergeVcfs"));
/// catalog.tools.push(ToolSchema::new("FastqToSam"));
///
/// assert_eq!(catalog.tool_count(), 2);
/// assert!(catalog.find_tool("MergeVcfs").is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCatalog {
    /// Catalog contract version (populated from
    /// [`CATALOG_CONTRACT_VERSION`](crate::CATALOG_CONTRACT_VERSION)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Catalog format version (semver string).
    pub version: String,
    /// Optional catalog name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional catalog description.
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-8601 timestamp for catalog creation.
    pub generated_at: String,
    /// Optional hash of deterministic catalog content.
    #[serde(default)]
    pub bundle_hash: Option<String>,
    /// Tools included in this catalog.
    #[serde(default)]
    pub tools: Vec<ToolSchema>,
}

impl ToolCatalog {
    /// Creates a catalog with required fields.
    ///
    /// The `schema_version` is automatically set from
    /// [`CATALOG_CONTRACT_VERSION`](crate::CATALOG_CONTRACT_VERSION).
    pub fn new(version: impl Into<String>, generated_at: impl Into<String>) -> Self {
        Self {
            schema_version: Some(crate::CATALOG_CONTRACT_VERSION.to_string()),
            version: version.into(),
            name: None,
            description: None,
            generated_at: generated_at.into(),
            bundle_hash: None,
            tools: Vec::new(),
        }
    }

    /// Returns the number of tools in this catalog.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Finds a tool entry by name.
    pub fn find_tool(&self, tool: &str) -> Option<&ToolSchema> {
        self.tools.iter().find(|t| t.tool == tool)
    }
}
