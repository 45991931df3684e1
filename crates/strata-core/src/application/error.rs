//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the adapters
//! behind the ports. Input and path-safety errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No template with this id in the active store.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    /// Template failed to parse or render.
    #[error("Template '{id}' failed to render: {reason}")]
    RenderingFailed { id: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The project root could not be created. Aborts the run.
    #[error("Cannot create project root {path}: {reason}")]
    RootDirectory { path: PathBuf, reason: String },

    /// Template override directory is unusable.
    #[error("Template directory {path} is not usable: {reason}")]
    TemplateDirectory { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { id } => vec![
                format!("No template '{id}' in the active template set"),
                "Try: strata templates to see available templates".into(),
                "If you use --templates, copy the missing file into that directory".into(),
            ],
            Self::RenderingFailed { id, .. } => vec![
                format!("Check the syntax of template '{id}'"),
                "Templates run in strict mode: every referenced field must exist".into(),
            ],
            Self::FilesystemError { path, .. } | Self::RootDirectory { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::TemplateDirectory { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Unset STRATA_TEMPLATES_DIR to use the bundled templates".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::FilesystemError { .. } | Self::RootDirectory { .. } => ErrorCategory::Filesystem,
            Self::TemplateDirectory { .. } => ErrorCategory::Configuration,
        }
    }
}
