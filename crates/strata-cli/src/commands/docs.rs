//! Implementation of the `strata docs` command.

use strata_adapters::LocalFilesystem;
use strata_core::{
    application::ProjectInspector,
    domain::{GenerationMode, TemplateContext},
    error::StrataError,
};
use tracing::{info, instrument};

use crate::{
    cli::{DocsArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Regenerate the docs from the entities found in the project.
///
/// Every docs artifact is written regardless of the project's feature
/// flags.
#[instrument(skip_all, fields(root = %args.output.display()))]
pub fn execute(
    args: DocsArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let root = super::existing_root(&args.output)?;

    let inspector = ProjectInspector::new(Box::new(LocalFilesystem::new()));
    let (project, database) = super::entity::resolve_project(&inspector, &root, None, config, output)?;

    let entities = inspector.scan_entities(&root)?;
    if entities.is_empty() {
        output.warning("No entities found under internal/domain/entities")?;
    } else {
        let names: Vec<_> = entities.iter().map(|e| e.pascal_name()).collect();
        output.info(&format!("Documenting {}", names.join(", ")))?;
    }

    let context = TemplateContext::builder(project)
        .database(database)
        .features(config.defaults.features)
        .entities(entities)
        .build()
        .map_err(StrataError::from)?;

    let service = super::build_service(global, config)?;
    info!(entities = context.entities().len(), "Docs generation started");
    let report = service.generate(GenerationMode::RegenerateDocs, &context, &root)?;
    output.summary(&report)?;
    Ok(())
}
