//! Application layer for Strata.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, ProjectInspector)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; naming, typing and
//! path rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerationService, ModuleSource, ProjectInspector};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
