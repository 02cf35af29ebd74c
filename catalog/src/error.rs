//! Error types for catalog and configuration operations.
//!
//! Provides a unified error type covering all failure modes: I/O,
//! serialization, validation, and exhausted loader fallback chains.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading catalogs or configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Catalog or configuration failed structural validation.
    #[error("validation failed for '{}': {source}", path.display())]
    Validation {
        /// File (or directory) the invalid content came from.
        path: PathBuf,
        /// First validation problem found.
        source: cmdline_rewrite_core::ValidationError,
    },

    /// Invalid or missing input (e.g. non-existent path, wrong extension).
    #[error("{0}")]
    InvalidInput(String),

    /// All configured loader sources failed.
    #[error("no catalog sources available")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
