//! File workflows for assembling tool catalogs.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use cmdline_rewrite_core::{ToolCatalog, ToolSchema, validate_catalog, validate_tool};
use sha2::{Digest, Sha256};

use crate::error::{CatalogError, Result};
use crate::loader::{is_catalog_file, read_catalog_file};

/// Collects tool file paths from input files and/or directories.
///
/// Directories contribute every JSON/YAML file they contain (not
/// recursively). Explicit files must carry one of those extensions.
pub fn collect_catalog_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if inputs.is_empty() {
        return Err(CatalogError::InvalidInput(
            "No catalog paths were provided".to_string(),
        ));
    }

    let mut paths = BTreeSet::new();

    for input in inputs {
        if input.is_dir() {
            for entry in fs::read_dir(input)? {
                let path = entry?.path();
                if is_catalog_file(&path) {
                    paths.insert(path);
                }
            }
            continue;
        }

        if input.is_file() {
            if !is_catalog_file(input) {
                return Err(CatalogError::InvalidInput(format!(
                    "Catalog file '{}' must end in .json, .yaml or .yml",
                    input.display()
                )));
            }
            paths.insert(input.clone());
            continue;
        }

        return Err(CatalogError::InvalidInput(format!(
            "Catalog path '{}' does not exist",
            input.display(),
        )));
    }

    if paths.is_empty() {
        return Err(CatalogError::InvalidInput(
            "No catalog files found in provided paths".to_string(),
        ));
    }

    Ok(paths.into_iter().collect())
}

/// Loads and validates tool entries from files.
///
/// A file may hold a single [`ToolSchema`] or a whole [`ToolCatalog`]; the
/// catalog form is tried first.
pub fn load_and_validate_tools(paths: &[PathBuf]) -> Result<Vec<ToolSchema>> {
    let mut tools = Vec::with_capacity(paths.len());

    for path in paths {
        let loaded = match read_catalog_file::<ToolCatalog>(path) {
            Ok(catalog) => catalog.tools,
            Err(_) => vec![read_catalog_file::<ToolSchema>(path)?],
        };

        for tool in loaded {
            if let Some(source) = validate_tool(&tool).into_iter().next() {
                return Err(CatalogError::Validation {
                    path: path.clone(),
                    source,
                });
            }
            tools.push(tool);
        }
    }

    Ok(tools)
}

/// Bundles tool files into a validated [`ToolCatalog`].
///
/// Tools are sorted by name and the catalog carries a SHA-256 hash of the
/// serialized tool list, so identical inputs produce identical hashes.
pub fn bundle_tool_files(
    paths: &[PathBuf],
    version: &str,
    name: Option<String>,
    description: Option<String>,
) -> Result<ToolCatalog> {
    let mut tools = load_and_validate_tools(paths)?;
    tools.sort_by(|a, b| a.tool.cmp(&b.tool));

    let mut catalog = ToolCatalog::new(version, Utc::now().to_rfc3339());
    catalog.name = name;
    catalog.description = description;
    catalog.tools = tools;

    if let Some(source) = validate_catalog(&catalog).into_iter().next() {
        return Err(CatalogError::Validation {
            path: paths.first().cloned().unwrap_or_default(),
            source,
        });
    }

    catalog.bundle_hash = Some(content_hash(&catalog.tools)?);
    Ok(catalog)
}

/// Computes the hex SHA-256 digest of the JSON-serialized tool list.
pub fn content_hash(tools: &[ToolSchema]) -> Result<String> {
    let bytes = serde_json::to_vec(tools)?;
    let hash = Sha256::digest(&bytes);
    Ok(format!("{:x}", hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdline_rewrite_core::{ArgumentDefinition, ValidationError};

    fn write_json(dir: &std::path::Path, name: &str, value: &impl serde::Serialize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_collect_catalog_paths_from_dir_filters_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.yml"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let paths = collect_catalog_paths(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(paths, vec![dir.path().join("a.json"), dir.path().join("b.yml")]);
    }

    #[test]
    fn test_collect_catalog_paths_rejects_missing_path() {
        let err = collect_catalog_paths(&[PathBuf::from("/nonexistent/tools")]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_bundle_sorts_tools_and_hashes_content() {
        let dir = tempfile::tempdir().unwrap();
        let sort_sam = write_json(dir.path(), "sort.json", &ToolSchema::new("SortSam"));
        let merge = write_json(
            dir.path(),
            "merge.json",
            &ToolSchema::new("MergeVcfs").with_argument(ArgumentDefinition::flag("CREATE_INDEX")),
        );

        let catalog =
            bundle_tool_files(&[sort_sam.clone(), merge.clone()], "1.0.0", Some("picard".into()), None)
                .unwrap();
        assert_eq!(catalog.tools[0].tool, "MergeVcfs");
        assert_eq!(catalog.tools[1].tool, "SortSam");
        assert_eq!(catalog.name.as_deref(), Some("picard"));

        let again = bundle_tool_files(&[merge, sort_sam], "1.0.0", None, None).unwrap();
        assert_eq!(catalog.bundle_hash, again.bundle_hash);
        assert_eq!(catalog.bundle_hash.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn test_bundle_accepts_nested_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        let mut nested = ToolCatalog::new("0.9.0", "2024-01-01T00:00:00Z");
        nested.tools.push(ToolSchema::new("FastqToSam"));
        let nested = write_json(dir.path(), "nested.json", &nested);
        let single = write_json(dir.path(), "merge.json", &ToolSchema::new("MergeVcfs"));

        let catalog = bundle_tool_files(&[nested, single], "1.0.0", None, None).unwrap();
        assert_eq!(catalog.tool_count(), 2);
    }

    #[test]
    fn test_bundle_rejects_duplicate_tools() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_json(dir.path(), "a.json", &ToolSchema::new("MergeVcfs"));
        let second = write_json(dir.path(), "b.json", &ToolSchema::new("MergeVcfs"));

        let err = bundle_tool_files(&[first, second], "1.0.0", None, None).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation {
                source: ValidationError::DuplicateTool(_),
                ..
            }
        ));
    }
}
