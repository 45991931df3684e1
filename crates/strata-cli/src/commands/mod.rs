//! Command handlers. Each module translates parsed arguments into core
//! calls and prints the result; no generation logic lives here.

pub mod completions;
pub mod docs;
pub mod entity;
pub mod init;
pub mod new;
pub mod templates;

use std::path::{Path, PathBuf};

use strata_adapters::{HandlebarsRenderer, LocalFilesystem, select_store};
use strata_core::application::GenerationService;
use tracing::debug;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Override directory for this run: the flag (or its env var) wins over
/// the config file.
pub(crate) fn templates_dir<'a>(global: &'a GlobalArgs, config: &'a AppConfig) -> Option<&'a Path> {
    global
        .templates
        .as_deref()
        .or(config.templates.dir.as_deref())
}

/// Wire the generation service to the disk, the selected template store
/// and the Handlebars renderer.
pub(crate) fn build_service(global: &GlobalArgs, config: &AppConfig) -> CliResult<GenerationService> {
    let store = select_store(templates_dir(global, config))?;
    debug!(store = %store.describe(), "Service wired");
    Ok(GenerationService::new(
        store,
        Box::new(HandlebarsRenderer::new()),
        Box::new(LocalFilesystem::new()),
    ))
}

/// An existing project root for the entity and docs commands.
pub(crate) fn existing_root(dir: &Path) -> CliResult<PathBuf> {
    if dir.is_dir() {
        Ok(dir.to_path_buf())
    } else {
        Err(CliError::ProjectNotFound {
            path: dir.to_path_buf(),
        })
    }
}
