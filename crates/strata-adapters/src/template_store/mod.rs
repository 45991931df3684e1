//! Template store adapters.
//!
//! Exactly one store is active per run, chosen by [`select_store`]: the
//! override directory when one is configured, the compiled-in set otherwise.
//! The two are never merged.

mod bundled;
mod directory;

use std::path::Path;

use strata_core::{application::ports::TemplateStore, error::StrataResult};
use tracing::info;

pub use bundled::BundledStore;
pub use directory::DirectoryStore;

/// File extension every template carries on disk.
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Pick the store for this run.
///
/// # Errors
///
/// When an override directory is given but is not a readable directory.
pub fn select_store(override_dir: Option<&Path>) -> StrataResult<Box<dyn TemplateStore>> {
    let store: Box<dyn TemplateStore> = match override_dir {
        Some(dir) => Box::new(DirectoryStore::open(dir)?),
        None => Box::new(BundledStore::new()),
    };
    info!(store = %store.describe(), "Template store selected");
    Ok(store)
}
