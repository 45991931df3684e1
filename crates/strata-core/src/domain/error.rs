// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they end up inside per-artifact reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Output path pattern '{pattern}' has an unresolved placeholder")]
    UnresolvedPlaceholder { pattern: String },

    // ========================================================================
    // Path Safety
    // ========================================================================
    #[error("Path '{path}' escapes base directory '{base}'")]
    PathTraversal { path: String, base: String },

    #[error("Cannot resolve path '{path}': {reason}")]
    PathResolution { path: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{field}'"),
                "Use --help for usage information".into(),
            ],
            Self::InvalidValue { field, .. } => {
                vec![format!("Check the value passed for '{field}'")]
            }
            Self::PathTraversal { base, .. } => vec![
                format!("Generated paths must stay inside {base}"),
                "Remove '..' segments from entity names and template paths".into(),
            ],
            Self::UnresolvedPlaceholder { .. } => vec![
                "The generation manifest references a variable that is not set".into(),
                "This is likely a bug, please report it".into(),
            ],
            Self::PathResolution { .. } => vec!["Check that the path is not empty".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } | Self::InvalidValue { .. } => {
                ErrorCategory::Validation
            }
            Self::PathTraversal { .. } | Self::PathResolution { .. } => ErrorCategory::PathSafety,
            Self::UnresolvedPlaceholder { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    PathSafety,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_is_path_safety() {
        let err = DomainError::PathTraversal {
            path: "../x".into(),
            base: "/tmp/p".into(),
        };
        assert_eq!(err.category(), ErrorCategory::PathSafety);
        assert!(err.to_string().contains("escapes"));
        assert!(err.suggestions().iter().any(|s| s.contains("/tmp/p")));
    }

    #[test]
    fn missing_field_is_validation() {
        let err = DomainError::MissingRequiredField { field: "name" };
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
