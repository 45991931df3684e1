// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Strata.
//!
//! Pure logic only: identifier transformation, type resolution, field
//! parsing, path confinement, the render context and the static manifests.
//! Filesystem access, template storage and rendering sit behind the ports
//! in [`crate::application::ports`].
//!
//! - **No I/O**: path resolution here is lexical
//! - **Immutable values**: everything is built once and then only read

pub mod context;
pub mod error;
pub mod fields;
pub mod manifest;
pub mod naming;
pub mod path_guard;
pub mod report;
pub mod types;

pub use context::{
    DatabaseDriver, DatabaseSettings, EntityModel, FeatureFlags, GeneratorInfo, ProjectSettings,
    TemplateContext, TemplateContextBuilder,
};
pub use error::{DomainError, ErrorCategory};
pub use fields::{FieldParseReport, FieldSpec, SkippedField, parse_fields, parse_fields_with_report};
pub use manifest::{FeatureGate, GenerationMode, GenerationTask, all_template_ids, substitute_path};
pub use path_guard::PathResolver;
pub use report::{ArtifactOutcome, ArtifactReport, DirectoryFailure, GenerationReport};
pub use types::{FieldType, resolve_go_type};
