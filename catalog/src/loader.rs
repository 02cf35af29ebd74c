//! Registry loading with builder pattern and fallback chains.
//!
//! Provides [`ToolRegistry`] for in-memory argument lookup and
//! [`RegistryBuilder`] for constructing a registry from multiple sources with
//! automatic fallback.
//!
//! # Loading patterns
//!
//! ```no_run
//! use cmdline_rewrite_catalog::ToolRegistry;
//!
//! // Load from a directory of per-tool JSON/YAML files
//! let registry = ToolRegistry::from_dir("catalog/tools/").unwrap();
//! assert!(registry.get("MergeVcfs").is_some());
//!
//! // Load from a single ToolCatalog bundle
//! let registry = ToolRegistry::from_bundle("catalog.json").unwrap();
//!
//! // Use the builder for a fallback chain
//! let registry = ToolRegistry::builder()
//!     .from_dir("catalog/tools/")
//!     .from_bundle("catalog.json")
//!     .build()
//!     .unwrap();
//! ```
//!
//! Tool lookups are O(1) via the internal `HashMap`.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use cmdline_rewrite_core::{
    ArgumentDefinition, ArgumentRegistry, ToolCatalog, ToolSchema, ValidationError,
    validate_catalog, validate_tool,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CatalogError, Result};

/// Describes where a [`ToolRegistry`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// Loaded from a directory of individual tool files.
    Directory(PathBuf),
    /// Loaded from a single [`ToolCatalog`] file.
    Bundle(PathBuf),
    /// Built in memory from an already parsed catalog.
    Catalog,
    /// Loaded via a fallback chain of multiple sources.
    Multiple(Vec<RegistrySource>),
}

/// In-memory argument registry with O(1) lookup by tool name.
///
/// Built once from a declarative catalog and then shared read-only by every
/// rewrite pass.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_catalog::ToolRegistry;
/// use cmdline_rewrite_core::{ArgumentDefinition, ArgumentRegistry, ToolSchema};
///
/// let registry = ToolRegistry::from_tools([
///     ToolSchema::new("MergeVcfs")
///         .with_argument(ArgumentDefinition::with_value("INPUT").with_short("I"))
///         .with_argument(ArgumentDefinition::flag("CREATE_INDEX")),
/// ]);
///
/// assert!(registry.is_known_tool("MergeVcfs"));
/// assert_eq!(registry.lookup("MergeVcfs", "I").unwrap().long_name, "INPUT");
/// assert!(registry.lookup("MergeVcfs", "OUTPUT").is_none());
/// ```
#[derive(Debug)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolSchema>,
    source: RegistrySource,
}

impl ToolRegistry {
    /// Returns a new [`RegistryBuilder`] for configuring a fallback chain.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds a registry from tool entries. Later entries replace earlier
    /// ones with the same tool name.
    pub fn from_tools(tools: impl IntoIterator<Item = ToolSchema>) -> Self {
        let tools = tools
            .into_iter()
            .map(|tool| (tool.tool.clone(), tool))
            .collect();
        Self {
            tools,
            source: RegistrySource::Catalog,
        }
    }

    /// Builds a registry from a validated [`ToolCatalog`].
    pub fn from_catalog(catalog: ToolCatalog) -> Self {
        Self::from_tools(catalog.tools)
    }

    /// Loads tool entries from a directory of `*.json`, `*.yaml` and `*.yml`
    /// files.
    ///
    /// Each file is parsed as a [`ToolSchema`], validated, and indexed by its
    /// `tool` field.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IoError`] if the directory cannot be read,
    /// [`CatalogError::JsonError`]/[`CatalogError::YamlError`] for malformed
    /// files, or [`CatalogError::Validation`] for invalid or duplicate tools.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut tools = HashMap::new();

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let file_path = entry?.path();
            if is_catalog_file(&file_path) {
                files.push(file_path);
            }
        }
        files.sort();

        for file_path in files {
            let tool: ToolSchema = read_catalog_file(&file_path)?;
            if let Some(source) = validate_tool(&tool).into_iter().next() {
                return Err(CatalogError::Validation {
                    path: file_path,
                    source,
                });
            }
            if tools.contains_key(&tool.tool) {
                return Err(CatalogError::Validation {
                    path: file_path,
                    source: ValidationError::DuplicateTool(tool.tool),
                });
            }
            tools.insert(tool.tool.clone(), tool);
        }

        debug!(path = %path.display(), tools = tools.len(), "Loaded tool directory");
        Ok(Self {
            tools,
            source: RegistrySource::Directory(path.to_path_buf()),
        })
    }

    /// Loads tool entries from a single [`ToolCatalog`] JSON or YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IoError`] if the file cannot be read, a
    /// parse error, or [`CatalogError::Validation`] if the catalog is invalid.
    pub fn from_bundle(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let catalog: ToolCatalog = read_catalog_file(path)?;
        if let Some(source) = validate_catalog(&catalog).into_iter().next() {
            return Err(CatalogError::Validation {
                path: path.to_path_buf(),
                source,
            });
        }

        debug!(path = %path.display(), tools = catalog.tool_count(), "Loaded tool catalog");
        let mut registry = Self::from_catalog(catalog);
        registry.source = RegistrySource::Bundle(path.to_path_buf());
        Ok(registry)
    }

    /// Loads a directory with [`from_dir`](Self::from_dir) or a file with
    /// [`from_bundle`](Self::from_bundle).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_bundle(path)
        }
    }

    /// Looks up a tool entry by name.
    pub fn get(&self, tool: &str) -> Option<&ToolSchema> {
        self.tools.get(tool)
    }

    /// Inserts a tool entry, replacing any existing entry for the same tool.
    pub fn insert(&mut self, tool: ToolSchema) {
        self.tools.insert(tool.tool.clone(), tool);
    }

    /// Returns `true` if the registry has an entry for `tool`.
    pub fn contains(&self, tool: &str) -> bool {
        self.tools.contains_key(tool)
    }

    /// Returns the number of tools in the registry.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns `true` if the registry contains no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Returns an iterator over tool names.
    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    /// Returns a reference to the source metadata.
    pub fn source(&self) -> &RegistrySource {
        &self.source
    }
}

impl ArgumentRegistry for ToolRegistry {
    fn lookup(&self, tool: &str, argument: &str) -> Option<&ArgumentDefinition> {
        self.tools.get(tool)?.find_argument(argument)
    }

    fn is_known_tool(&self, tool: &str) -> bool {
        self.tools.contains_key(tool)
    }
}

/// Builder for constructing a [`ToolRegistry`] with a fallback chain.
///
/// Sources are tried in the order they are added. The first successful load
/// wins; if all fail, [`CatalogError::NoSourcesAvailable`] is returned.
pub struct RegistryBuilder {
    sources: Vec<RegistrySource>,
}

impl RegistryBuilder {
    /// Creates a new builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a directory of tool files as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(RegistrySource::Directory(path.into()));
        self
    }

    /// Adds a [`ToolCatalog`] bundle file as a source.
    pub fn from_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(RegistrySource::Bundle(path.into()));
        self
    }

    /// Adds a path that is a directory or a bundle file.
    pub fn from_path(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            self.from_dir(path)
        } else {
            self.from_bundle(path)
        }
    }

    /// Attempts to load the registry from configured sources in order.
    pub fn build(self) -> Result<ToolRegistry> {
        if self.sources.is_empty() {
            return Err(CatalogError::NoSourcesAvailable);
        }

        let all_sources = self.sources.clone();

        for source in &self.sources {
            let result = match source {
                RegistrySource::Directory(path) => ToolRegistry::from_dir(path),
                RegistrySource::Bundle(path) => ToolRegistry::from_bundle(path),
                RegistrySource::Catalog | RegistrySource::Multiple(_) => continue,
            };

            match result {
                Ok(mut registry) => {
                    registry.source = RegistrySource::Multiple(all_sources);
                    return Ok(registry);
                }
                Err(err) => debug!(source = ?source, error = %err, "Catalog source failed"),
            }
        }

        Err(CatalogError::NoSourcesAvailable)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `true` for paths with a JSON or YAML extension.
pub(crate) fn is_catalog_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(OsStr::to_str),
        Some("json" | "yaml" | "yml")
    )
}

/// Reads a JSON or YAML file, choosing the format by extension.
pub(crate) fn read_catalog_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    match path.extension().and_then(OsStr::to_str) {
        Some("yaml" | "yml") => Ok(serde_yaml::from_reader(reader)?),
        _ => Ok(serde_json::from_reader(reader)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn merge_vcfs() -> ToolSchema {
        ToolSchema::new("MergeVcfs")
            .with_argument(ArgumentDefinition::with_value("INPUT").with_short("I"))
            .with_argument(ArgumentDefinition::with_value("OUTPUT").with_short("O"))
            .with_argument(ArgumentDefinition::flag("CREATE_INDEX"))
    }

    fn write_tool(dir: &Path, tool: &ToolSchema) {
        let path = dir.join(format!("{}.json", tool.tool));
        let mut f = std::fs::File::create(path).unwrap();
        serde_json::to_writer_pretty(&mut f, tool).unwrap();
        f.flush().unwrap();
    }

    #[test]
    fn test_from_dir_reads_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), &merge_vcfs());
        std::fs::write(
            dir.path().join("FastqToSam.yaml"),
            "tool: FastqToSam\narguments:\n  - long_name: FASTQ\n    short_name: F1\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let registry = ToolRegistry::from_dir(dir.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.lookup("FastqToSam", "F1").unwrap().long_name,
            "FASTQ"
        );
        assert!(registry.lookup("MergeVcfs", "CREATE_INDEX").unwrap().is_flag);
        assert_eq!(
            registry.source(),
            &RegistrySource::Directory(dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_from_dir_rejects_duplicate_tools() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), &merge_vcfs());
        std::fs::write(dir.path().join("copy.yml"), "tool: MergeVcfs\n").unwrap();

        let err = ToolRegistry::from_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation {
                source: ValidationError::DuplicateTool(_),
                ..
            }
        ));
    }

    #[test]
    fn test_from_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut catalog = ToolCatalog::new("1.0.0", "2024-01-01T00:00:00Z");
        catalog.tools.push(merge_vcfs());
        catalog.tools.push(ToolSchema::new("SortSam"));
        std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

        let registry = ToolRegistry::from_bundle(&path).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("SortSam"));
        assert_eq!(registry.source(), &RegistrySource::Bundle(path));
    }

    #[test]
    fn test_from_bundle_rejects_invalid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut catalog = ToolCatalog::new("1.0.0", "2024-01-01T00:00:00Z");
        catalog
            .tools
            .push(ToolSchema::new("MergeVcfs").with_argument(ArgumentDefinition::flag("A B")));
        std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let err = ToolRegistry::from_bundle(&path).unwrap_err();
        assert!(err.to_string().contains("invalid argument name: A B"));
    }

    #[test]
    fn test_builder_fallback_first_fails() {
        let dir = tempfile::tempdir().unwrap();
        let bundle_path = dir.path().join("catalog.json");

        let mut catalog = ToolCatalog::new("1.0.0", "2024-01-01T00:00:00Z");
        catalog.tools.push(merge_vcfs());
        std::fs::write(&bundle_path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let registry = ToolRegistry::builder()
            .from_dir("/nonexistent/dir/")
            .from_bundle(&bundle_path)
            .build()
            .unwrap();
        assert!(registry.contains("MergeVcfs"));
        assert!(matches!(registry.source(), RegistrySource::Multiple(s) if s.len() == 2));
    }

    #[test]
    fn test_builder_all_fail() {
        let result = ToolRegistry::builder()
            .from_dir("/nonexistent/dir1/")
            .from_bundle("/nonexistent/catalog.json")
            .build();
        assert!(matches!(result, Err(CatalogError::NoSourcesAvailable)));
    }

    #[test]
    fn test_builder_without_sources() {
        assert!(matches!(
            ToolRegistry::builder().build(),
            Err(CatalogError::NoSourcesAvailable)
        ));
    }

    #[test]
    fn test_hashmap_operations() {
        let mut registry = ToolRegistry::from_tools([merge_vcfs()]);
        assert!(registry.get("MergeVcfs").is_some());
        assert!(registry.get("SortSam").is_none());

        registry.insert(ToolSchema::new("SortSam"));
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());

        let mut tools: Vec<&str> = registry.tools().collect();
        tools.sort();
        assert_eq!(tools, vec!["MergeVcfs", "SortSam"]);
    }
}
