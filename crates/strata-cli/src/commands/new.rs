//! Implementation of the `strata new` command.
//!
//! Responsibility: translate CLI arguments and config defaults into a
//! `TemplateContext`, run the new-project manifest, and display results.

use std::path::PathBuf;

use strata_core::{
    domain::{
        DatabaseDriver, DatabaseSettings, FeatureFlags, GenerationMode, ProjectSettings,
        TemplateContext,
    },
    error::StrataError,
};
use tracing::{debug, info, instrument};

use crate::{
    cli::{DbDriver, FeatureArgs, GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `strata new` command.
///
/// An existing directory is written into, not refused: every run is an
/// independent overwrite pass.
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    validate_project_name(&args.name)?;

    let context = build_context(&args, config)?;
    let root = project_root(&args);
    debug!(
        module = context.project().module_path(),
        driver = %context.database().driver(),
        features = ?context.features().enabled_names(),
        "Context resolved"
    );

    let service = super::build_service(global, config)?;

    output.header(&format!("Creating '{}' in {}", args.name, root.display()))?;
    info!(path = %root.display(), "New project started");
    let report = service.generate(GenerationMode::NewProject, &context, &root)?;
    output.summary(&report)?;

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", root.display()))?;
        output.print("  go mod tidy")?;
        output.print("  strata entity <Name> --fields name:type,...")?;
    }

    Ok(())
}

/// `DIR/NAME`.
fn project_root(args: &NewArgs) -> PathBuf {
    args.output.join(&args.name)
}

fn validate_project_name(name: &str) -> CliResult<()> {
    let reason = if name.trim().is_empty() {
        Some("name cannot be empty")
    } else if name.starts_with('.') {
        Some("name cannot start with '.'")
    } else if name.contains('/') || name.contains('\\') {
        Some("name cannot contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

/// Flags first, then config defaults, then the project name.
fn build_context(args: &NewArgs, config: &AppConfig) -> CliResult<TemplateContext> {
    let defaults = &config.defaults;

    let project = ProjectSettings::new(&args.name)
        .with_module_path(args.module.clone().unwrap_or_else(|| args.name.clone()))
        .with_service_name(args.service_name.clone().unwrap_or_else(|| args.name.clone()))
        .with_service_version(
            args.service_version
                .clone()
                .unwrap_or_else(|| defaults.service_version.clone()),
        )
        .with_environment(
            args.environment
                .clone()
                .unwrap_or_else(|| defaults.environment.clone()),
        )
        .with_server_port(args.port.unwrap_or(defaults.server_port));

    let driver = args.db_driver.map(convert_driver).unwrap_or(defaults.db_driver);
    let mut database = DatabaseSettings::for_project(&args.name, driver)
        .with_host(args.db_host.clone().unwrap_or_else(|| defaults.db_host.clone()));
    if let Some(port) = args.db_port {
        database = database.with_port(port);
    }
    if let Some(name) = &args.db_name {
        database = database.with_name(name);
    }
    match &args.db_user {
        Some(user) => database = database.with_user(user),
        None if !defaults.db_user.is_empty() => database = database.with_user(&defaults.db_user),
        None => {}
    }

    let features = apply_feature_overrides(defaults.features, &args.features);

    Ok(TemplateContext::builder(project)
        .database(database)
        .features(features)
        .build()
        .map_err(StrataError::from)?)
}

fn apply_feature_overrides(base: FeatureFlags, args: &FeatureArgs) -> FeatureFlags {
    FeatureFlags {
        telemetry: args.telemetry.unwrap_or(base.telemetry),
        swagger: args.swagger.unwrap_or(base.swagger),
        cors: args.cors.unwrap_or(base.cors),
        auth: args.auth.unwrap_or(base.auth),
        rate_limit: args.rate_limit.unwrap_or(base.rate_limit),
    }
}

fn convert_driver(driver: DbDriver) -> DatabaseDriver {
    match driver {
        DbDriver::Postgres => DatabaseDriver::Postgres,
        DbDriver::Mysql => DatabaseDriver::Mysql,
        DbDriver::Sqlite => DatabaseDriver::Sqlite,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
