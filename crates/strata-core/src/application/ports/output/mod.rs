//! Driven (output) ports - implemented by infrastructure.

use std::path::{Path, PathBuf};

use crate::domain::TemplateContext;
use crate::error::StrataResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths handed to this port have already been through a
/// [`PathResolver`](crate::domain::PathResolver); the port does not confine.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    /// Set or clear the executable bit.
    fn set_permissions(&self, path: &Path, executable: bool) -> StrataResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> StrataResult<String>;

    /// Direct children of a directory, sorted.
    fn list_dir(&self, path: &Path) -> StrataResult<Vec<PathBuf>>;
}

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `strata_adapters::template_store::BundledStore` (compiled-in templates)
/// - `strata_adapters::template_store::DirectoryStore` (override directory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Body of the template with id `category/name.ext`.
    fn load(&self, id: &str) -> StrataResult<String>;

    /// All template ids, sorted.
    fn list(&self) -> StrataResult<Vec<String>>;

    /// Short human description of where templates come from.
    fn describe(&self) -> String;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `strata_adapters::renderer::HandlebarsRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `body` against `context`. Either the whole output or an error;
    /// never partial text.
    fn render(&self, template_id: &str, body: &str, context: &TemplateContext)
    -> StrataResult<String>;
}
