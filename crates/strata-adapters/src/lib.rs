//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`:
//! disk and in-memory filesystems, the bundled and directory template
//! stores, and the Handlebars renderer.

pub mod filesystem;
pub mod renderer;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::HandlebarsRenderer;
pub use template_store::{BundledStore, DirectoryStore, select_store};
