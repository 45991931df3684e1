//! Implementation of the `strata entity` command.

use std::path::Path;

use strata_adapters::LocalFilesystem;
use strata_core::{
    application::{ModuleSource, ProjectInspector},
    domain::{
        DatabaseSettings, EntityModel, GenerationMode, ProjectSettings, TemplateContext,
        parse_fields_with_report,
    },
    error::StrataError,
};
use tracing::{info, instrument, warn};

use crate::{
    cli::{EntityArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `strata entity` command.
#[instrument(skip_all, fields(entity = %args.name))]
pub fn execute(
    args: EntityArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let root = super::existing_root(&args.output)?;

    let parsed = parse_fields_with_report(&args.fields);
    for skipped in &parsed.skipped {
        output.warning(&format!("Skipping field '{}': {}", skipped.entry, skipped.reason))?;
    }
    if parsed.fields.is_empty() {
        output.warning("No fields given; the entity will only carry its ID and timestamps")?;
    }
    let entity = EntityModel::new(&args.name, parsed.fields).map_err(StrataError::from)?;
    let heading = format!(
        "Adding {} ({} fields) to {}",
        entity.pascal_name(),
        entity.fields().len(),
        root.display()
    );

    let inspector = ProjectInspector::new(Box::new(LocalFilesystem::new()));
    let (project, database) =
        resolve_project(&inspector, &root, args.module.as_deref(), config, output)?;

    let context = TemplateContext::builder(project)
        .database(database)
        .features(config.defaults.features)
        .entity(entity)
        .build()
        .map_err(StrataError::from)?;

    let service = super::build_service(global, config)?;
    output.header(&heading)?;
    info!(root = %root.display(), "Entity generation started");

    let report = service.generate(GenerationMode::AddEntity, &context, &root)?;
    output.summary(&report)?;

    if !output.is_quiet() {
        output.print("")?;
        output.print(&format!(
            "Register the handler in internal/infrastructure/http/router.go, then run: strata docs -o {}",
            root.display()
        ))?;
    }
    Ok(())
}

/// Project facts for an existing tree: the module path (flag, go.mod, or
/// directory name) and the database driver its go.mod requires.
pub(super) fn resolve_project(
    inspector: &ProjectInspector,
    root: &Path,
    module_override: Option<&str>,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<(ProjectSettings, DatabaseSettings)> {
    let module = match module_override {
        Some(module) => module.to_string(),
        None => {
            let (module, source) = inspector.module_path(root)?;
            if source == ModuleSource::DirectoryName {
                output.warning(&format!(
                    "No module path in go.mod; using '{module}'. Pass --module to override"
                ))?;
            }
            module
        }
    };

    let driver = match inspector.database_driver(root) {
        Ok(Some(driver)) => driver,
        Ok(None) => config.defaults.db_driver,
        Err(e) => {
            warn!(error = %e, "Cannot detect database driver, using configured default");
            config.defaults.db_driver
        }
    };

    let name = project_name(&module);
    let project = ProjectSettings::new(name)
        .with_module_path(module.as_str())
        .with_service_version(config.defaults.service_version.as_str())
        .with_environment(config.defaults.environment.as_str())
        .with_server_port(config.defaults.server_port);
    let database = DatabaseSettings::for_project(name, driver);
    Ok((project, database))
}

/// Last path segment of a module path: `example.com/shop` → `shop`.
fn project_name(module: &str) -> &str {
    module
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GlobalArgs;
    use strata_core::domain::DatabaseDriver;
    use tempfile::TempDir;

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            quiet: true,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn project_name_is_last_module_segment() {
        assert_eq!(project_name("example.com/shop"), "shop");
        assert_eq!(project_name("github.com/acme/order-svc/"), "order-svc");
        assert_eq!(project_name("shop"), "shop");
    }

    #[test]
    fn go_mod_drives_module_and_driver() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("go.mod"),
            "module example.com/shop\n\nrequire github.com/mattn/go-sqlite3 v1.14.22\n",
        )
        .unwrap();

        let inspector = ProjectInspector::new(Box::new(LocalFilesystem::new()));
        let (project, database) = resolve_project(
            &inspector,
            tmp.path(),
            None,
            &AppConfig::default(),
            &quiet_output(),
        )
        .unwrap();
        assert_eq!(project.module_path(), "example.com/shop");
        assert_eq!(project.name(), "shop");
        assert_eq!(database.driver(), DatabaseDriver::Sqlite);
    }

    #[test]
    fn override_wins_and_driver_falls_back_to_config() {
        let tmp = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.defaults.db_driver = DatabaseDriver::Mysql;

        let inspector = ProjectInspector::new(Box::new(LocalFilesystem::new()));
        let (project, database) = resolve_project(
            &inspector,
            tmp.path(),
            Some("example.com/billing"),
            &config,
            &quiet_output(),
        )
        .unwrap();
        assert_eq!(project.module_path(), "example.com/billing");
        assert_eq!(database.driver(), DatabaseDriver::Mysql);
    }
}
