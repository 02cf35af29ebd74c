//! Read-only argument registry contract.
//!
//! The rewrite pipeline only ever consumes a finished registry through
//! [`ArgumentRegistry`]. How the registry is assembled (catalog files,
//! bundles, hand-built tables in tests) is the caller's concern.

use crate::{ArgumentDefinition, ToolCatalog, ToolSchema};

/// Lookup interface over legacy tool arguments.
///
/// Implementations must be cheap and non-blocking; the rewriter calls
/// [`lookup`](Self::lookup) once per argument token. The `Sync` bound lets a
/// single registry be shared by passes running on several threads.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite_core::*;
///
/// let mut catalog = ToolCatalog::new("1.0.0", "2024-01-15T10:30:00Z");
/// catalog.tools.push(
///     ToolSchema::new("MergeVcfs")
///         .with_argument(ArgumentDefinition::flag("CREATE_INDEX")),
/// );
///
/// assert!(catalog.is_known_tool("MergeVcfs"));
/// assert!(catalog.lookup("MergeVcfs", "CREATE_INDEX").unwrap().is_flag);
/// assert!(catalog.lookup("SortSam", "CREATE_INDEX").is_none());
/// ```
pub trait ArgumentRegistry: Sync {
    /// Returns the definition of `argument` under `tool`, if declared.
    fn lookup(&self, tool: &str, argument: &str) -> Option<&ArgumentDefinition>;

    /// Returns `true` if the registry has an entry for `tool`.
    fn is_known_tool(&self, tool: &str) -> bool;
}

impl ArgumentRegistry for ToolSchema {
    fn lookup(&self, tool: &str, argument: &str) -> Option<&ArgumentDefinition> {
        if self.tool != tool {
            return None;
        }
        self.find_argument(argument)
    }

    fn is_known_tool(&self, tool: &str) -> bool {
        self.tool == tool
    }
}

/// Linear lookup over the catalog; use a hashed registry for large catalogs.
impl ArgumentRegistry for ToolCatalog {
    fn lookup(&self, tool: &str, argument: &str) -> Option<&ArgumentDefinition> {
        self.find_tool(tool)?.find_argument(argument)
    }

    fn is_known_tool(&self, tool: &str) -> bool {
        self.find_tool(tool).is_some()
    }
}

impl<R: ArgumentRegistry + ?Sized> ArgumentRegistry for &R {
    fn lookup(&self, tool: &str, argument: &str) -> Option<&ArgumentDefinition> {
        (**self).lookup(tool, argument)
    }

    fn is_known_tool(&self, tool: &str) -> bool {
        (**self).is_known_tool(tool)
    }
}
