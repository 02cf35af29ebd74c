//! Project configuration for documentation translation runs.
//!
//! Defines the YAML-serializable configuration naming the catalog sources
//! and the rewrite settings used for a documentation tree.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! catalogs:
//!   - docs/catalog/tools
//!   - docs/catalog.json
//! rewrite:
//!   open_marker: "<pre>"
//!   close_marker: "</pre>"
//!   launcher:
//!     program: java
//!     jar_selector: "-jar"
//!     jar_name: picard.jar
//!   replacement_tool: gatk
//!   runtime_options_flag: "--javaOptions"
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use cmdline_rewrite_core::{RewriteConfig, validate_config};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::loader::{RegistryBuilder, ToolRegistry};

/// Top-level project configuration.
///
/// Loaded from a YAML file (typically `.cmdline-rewrite.yml` next to the
/// documentation sources).
///
/// # Examples
///
/// ```
/// # let yaml = r#"
/// # version: "1.0"
/// # catalogs: [catalog.json]
/// # rewrite: { replacement_tool: newtool }
/// # "#;
/// # let config: cmdline_rewrite_catalog::ProjectConfig = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(config.rewrite.replacement_tool, "newtool");
/// assert_eq!(config.rewrite.open_marker, "<pre>");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Catalog sources tried in order (directories or bundle files).
    #[serde(default)]
    pub catalogs: Vec<PathBuf>,
    /// Rewrite settings; omitted fields use the defaults.
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            catalogs: Vec::new(),
            rewrite: RewriteConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Loads and validates configuration from a YAML file.
    ///
    /// Relative catalog paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CatalogError::IoError) if the file cannot be read,
    /// [`YamlError`](CatalogError::YamlError) if parsing fails, or
    /// [`Validation`](CatalogError::Validation) if a rewrite setting is empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: Self = serde_yaml::from_reader(reader)?;

        if let Some(source) = validate_config(&config.rewrite).into_iter().next() {
            return Err(CatalogError::Validation {
                path: path.to_path_buf(),
                source,
            });
        }

        if let Some(base) = path.parent() {
            config.catalogs = config
                .catalogs
                .into_iter()
                .map(|catalog| {
                    if catalog.is_relative() {
                        base.join(catalog)
                    } else {
                        catalog
                    }
                })
                .collect();
        }

        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns a builder over the configured catalog sources.
    pub fn registry_builder(&self) -> RegistryBuilder {
        self.catalogs
            .iter()
            .fold(ToolRegistry::builder(), |builder, path| {
                builder.from_path(path.clone())
            })
    }
}
