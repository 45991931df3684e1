//! Strata Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers of the Strata scaffolding engine, which
//! turns a project description and entity field lists into a layered Go
//! service tree.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           strata-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, ProjectInspector)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (TemplateStore, TemplateRenderer,      │
//! │   Filesystem)                           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     strata-adapters (Infrastructure)    │
//! │ (BundledStore, HandlebarsRenderer, ...) │
//! └─────────────────────────────────────────┘
//!
//!   Domain layer (pure logic): naming, types, fields, path guard,
//!   TemplateContext, manifests, GenerationReport
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strata_core::prelude::*;
//!
//! let context = TemplateContext::builder(
//!     ProjectSettings::new("shop").with_module_path("example.com/shop"),
//! )
//! .build()?;
//!
//! let service = GenerationService::new(store, renderer, filesystem);
//! let report = service.generate(GenerationMode::NewProject, &context, "./shop".as_ref())?;
//! assert!(report.is_complete());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationService, ModuleSource, ProjectInspector,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        ArtifactOutcome, DatabaseDriver, DatabaseSettings, EntityModel, FeatureFlags,
        FieldParseReport, FieldSpec, GenerationMode, GenerationReport, PathResolver,
        ProjectSettings, TemplateContext, parse_fields, parse_fields_with_report,
    };
    pub use crate::error::{StrataError, StrataResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
