//! Catalog loading, bundling and project configuration for legacy
//! command-line translation.
//!
//! This crate assembles the read-only argument registry consumed by the
//! rewriter. Tool entries are declared in JSON or YAML files (one tool per
//! file, or a whole [`ToolCatalog`](cmdline_rewrite_core::ToolCatalog)
//! bundle) and loaded once at startup.
//!
//! # Quick start
//!
//! ```no_run
//! use cmdline_rewrite_catalog::{ProjectConfig, ToolRegistry};
//!
//! // Load tools from a directory
//! let registry = ToolRegistry::from_dir("catalog/tools/").unwrap();
//! if let Some(tool) = registry.get("MergeVcfs") {
//!     println!("MergeVcfs declares {} arguments", tool.arguments.len());
//! }
//!
//! // Or follow the sources named in a project configuration
//! let config = ProjectConfig::load(".cmdline-rewrite.yml").unwrap();
//! let registry = config.registry_builder().build().unwrap();
//! ```

mod bundle;
mod config;
mod error;
mod loader;

pub use bundle::{bundle_tool_files, collect_catalog_paths, content_hash, load_and_validate_tools};
pub use config::ProjectConfig;
pub use error::{CatalogError, Result};
pub use loader::{RegistryBuilder, RegistrySource, ToolRegistry};
