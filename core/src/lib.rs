//! Core catalog types and the registry contract for legacy command-line
//! translation.
//!
//! This crate defines the foundational types for describing the arguments
//! of legacy tools whose `NAME=value` invocations appear in documentation:
//!
//! - [`ArgumentDefinition`]: one argument with its canonical long name,
//!   optional short name, and whether it is boolean-typed.
//! - [`ToolSchema`]: the declared arguments of one legacy tool.
//! - [`ToolCatalog`]: a versioned bundle of tool entries for distribution.
//! - [`ArgumentRegistry`]: the read-only lookup interface consumed by the
//!   rewriter.
//! - [`RewriteConfig`]: block markers, launcher signature and replacement
//!   literals for one rewrite pass.
//!
//! Validation ([`validate_tool`], [`validate_catalog`], [`validate_config`])
//! catches structural errors such as duplicate argument spellings and empty
//! rewrite settings.
//!
//! # Example
//!
//! ```
//! use cmdline_rewrite_core::*;
//!
//! let mut catalog = ToolCatalog::new("1.0.0", "2024-01-15T10:30:00Z");
//! catalog.tools.push(
//!     ToolSchema::new("MergeVcfs")
//!         .with_argument(ArgumentDefinition::with_value("INPUT").with_short("I"))
//!         .with_argument(ArgumentDefinition::flag("CREATE_INDEX")),
//! );
//!
//! assert!(catalog.is_known_tool("MergeVcfs"));
//! assert_eq!(catalog.lookup("MergeVcfs", "I").unwrap().long_name, "INPUT");
//! assert!(validate_catalog(&catalog).is_empty());
//! ```

mod config;
mod package;
mod registry;
mod types;
mod validate;

pub use config::{LauncherSignature, RewriteConfig};
pub use package::ToolCatalog;
pub use registry::ArgumentRegistry;
pub use types::*;
pub use validate::{ValidationError, validate_catalog, validate_config, validate_tool};
