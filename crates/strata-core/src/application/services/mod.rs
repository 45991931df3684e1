//! Application services - orchestrate use cases.
//!
//! `GenerationService` runs a manifest; `ProjectInspector` reads back what a
//! previous run produced (module path, entity structs).

pub mod generation_service;
pub mod project_inspector;

pub use generation_service::GenerationService;
pub use project_inspector::{
    ENTITY_MARKER, ModuleSource, ProjectInspector, parse_entity_source, parse_module_line,
};
