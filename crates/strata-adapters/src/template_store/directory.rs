//! Templates read from a user-supplied directory.

use std::path::{Path, PathBuf};

use strata_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::PathResolver,
    error::StrataResult,
};
use tracing::debug;
use walkdir::WalkDir;

use super::TEMPLATE_EXTENSION;

/// Store over `<dir>/<category>/<name>.<ext>.hbs`.
///
/// Ids are resolved through a [`PathResolver::Confined`] rooted at the
/// directory, so an id such as `../../etc/passwd` is refused.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    resolver: PathResolver,
    root: PathBuf,
}

impl DirectoryStore {
    pub fn open(dir: impl AsRef<Path>) -> StrataResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ApplicationError::TemplateDirectory {
                path: dir.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let resolver = PathResolver::confined(dir)?;
        let root = resolver.resolve(".")?;
        Ok(Self { resolver, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for DirectoryStore {
    fn load(&self, id: &str) -> StrataResult<String> {
        let path = self.resolver.resolve(format!("{id}.{TEMPLATE_EXTENSION}"))?;
        if !path.is_file() {
            return Err(ApplicationError::TemplateNotFound { id: id.to_string() }.into());
        }

        debug!(id, path = %path.display(), "Loading template");
        std::fs::read_to_string(&path).map_err(|e| {
            ApplicationError::FilesystemError {
                path,
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> StrataResult<Vec<String>> {
        let suffix = format!(".{TEMPLATE_EXTENSION}");
        let mut ids: Vec<String> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                let id = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                id.strip_suffix(&suffix).map(str::to_string)
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
