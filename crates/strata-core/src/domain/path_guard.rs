//! Path resolution with optional confinement to a base directory.
//!
//! Every generated file goes through a [`PathResolver::Confined`] rooted at
//! the project directory, so no template path or entity name can make the
//! generator write outside it. Generic reads of existing project files
//! (`go.mod`, entity sources) use [`PathResolver::Unconfined`], which only
//! normalizes the path. Call sites pick the variant explicitly.
//!
//! Resolution is purely lexical: `.` and `..` are folded without touching
//! the filesystem, so symlinks are not followed.

use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolver {
    /// Results must stay inside `base` (absolute and cleaned).
    Confined { base: PathBuf },
    /// Results are made absolute and cleaned, nothing more.
    Unconfined,
}

impl PathResolver {
    /// Resolver confined to `base`. The base is made absolute against the
    /// current directory and cleaned once, here.
    pub fn confined(base: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = absolute_clean(base.as_ref())?;
        Ok(Self::Confined { base })
    }

    pub fn unconfined() -> Self {
        Self::Unconfined
    }

    pub fn is_confined(&self) -> bool {
        matches!(self, Self::Confined { .. })
    }

    pub fn base(&self) -> Option<&Path> {
        match self {
            Self::Confined { base } => Some(base),
            Self::Unconfined => None,
        }
    }

    /// Resolve `path`.
    ///
    /// Confined: `path` is joined onto the base and cleaned; the result must
    /// equal the base or lie below it, compared component by component (a
    /// sibling such as `/data/app-evil` is not inside `/data/app`).
    ///
    /// # Errors
    ///
    /// - [`DomainError::PathTraversal`] when a confined result leaves the base
    /// - [`DomainError::PathResolution`] when the path cannot be made absolute
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, DomainError> {
        let path = path.as_ref();
        match self {
            Self::Confined { base } => {
                let resolved = clean(&base.join(path));
                if resolved.starts_with(base) {
                    Ok(resolved)
                } else {
                    Err(DomainError::PathTraversal {
                        path: path.display().to_string(),
                        base: base.display().to_string(),
                    })
                }
            }
            Self::Unconfined => absolute_clean(path),
        }
    }
}

/// Lexically normalize a path: drop `.`, fold `..` into its parent, and
/// never climb above the root of an absolute path.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

fn absolute_clean(path: &Path) -> Result<PathBuf, DomainError> {
    let absolute = std::path::absolute(path).map_err(|e| DomainError::PathResolution {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(clean(&absolute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confined_accepts_nested_path() {
        let resolver = PathResolver::confined("/tmp/proj").unwrap();
        let resolved = resolver.resolve("sub/dir/file.txt").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/proj/sub/dir/file.txt"));
    }

    #[test]
    fn confined_rejects_parent_traversal() {
        for base in ["/tmp/proj", "/a/b/c", "/srv"] {
            let resolver = PathResolver::confined(base).unwrap();
            let result = resolver.resolve("../../etc/passwd");
            assert!(
                matches!(result, Err(DomainError::PathTraversal { .. })),
                "base {base}"
            );
        }
    }

    #[test]
    fn confined_rejects_sibling_sharing_name_prefix() {
        // `/tmp/proj-other` starts with the string `/tmp/proj`, but it is a
        // different directory.
        let resolver = PathResolver::confined("/tmp/proj").unwrap();
        let result = resolver.resolve("../proj-other/secret.txt");
        assert!(matches!(result, Err(DomainError::PathTraversal { .. })));
    }

    #[test]
    fn confined_rejects_absolute_escape() {
        let resolver = PathResolver::confined("/tmp/proj").unwrap();
        assert!(resolver.resolve("/etc/passwd").is_err());
        assert!(resolver.resolve("/tmp/proj/ok.txt").is_ok());
    }

    #[test]
    fn confined_allows_inner_dot_dot() {
        let resolver = PathResolver::confined("/tmp/proj").unwrap();
        let resolved = resolver.resolve("a/b/../c/./d.txt").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/proj/a/c/d.txt"));
        assert_eq!(resolver.resolve(".").unwrap(), PathBuf::from("/tmp/proj"));
    }

    #[test]
    fn confined_base_is_made_absolute() {
        let resolver = PathResolver::confined("relative/base").unwrap();
        let base = resolver.base().unwrap();
        assert!(base.is_absolute());
        assert!(base.ends_with("relative/base"));
    }

    #[test]
    fn unconfined_does_not_guard_traversal() {
        let resolver = PathResolver::unconfined();
        assert!(!resolver.is_confined());
        let resolved = resolver.resolve("/tmp/proj/../../etc/passwd").unwrap();
        assert_eq!(resolved, PathBuf::from("/etc/passwd"));
    }

    #[test]
    fn unconfined_makes_relative_paths_absolute() {
        let resolved = PathResolver::unconfined().resolve("go.mod").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("go.mod"));
    }

    #[test]
    fn clean_folds_components() {
        assert_eq!(clean(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(clean(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(clean(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(clean(Path::new("")), PathBuf::from("."));
    }
}
