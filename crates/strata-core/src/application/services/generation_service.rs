//! Generation Service - the manifest orchestrator.
//!
//! Coordinates one generation run:
//! 1. Create the project root (fatal on failure) and the mode's layout
//! 2. For each manifest task: gate, resolve the output path inside the
//!    root, load, render, write
//! 3. Record every outcome in a [`GenerationReport`]
//!
//! The service is the error boundary of a run: a failing artifact is logged,
//! recorded and skipped; only a root failure aborts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, field, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{
        ArtifactOutcome, DirectoryFailure, GenerationMode, GenerationReport, GenerationTask,
        PathResolver, TemplateContext, substitute_path,
    },
    error::StrataResult,
};

/// Manifest-driven generator.
pub struct GenerationService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerationService {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// The store this service reads templates from.
    pub fn store(&self) -> &dyn TemplateStore {
        self.store.as_ref()
    }

    /// Run every task of `mode` against `context`, writing below `root`.
    ///
    /// # Errors
    ///
    /// Only when the run cannot start: `root` cannot be made absolute or
    /// cannot be created ([`ApplicationError::RootDirectory`]). Everything
    /// after that is reported per artifact.
    #[instrument(
        skip_all,
        fields(mode = %mode, root = %root.display(), run_id = field::Empty)
    )]
    pub fn generate(
        &self,
        mode: GenerationMode,
        context: &TemplateContext,
        root: &Path,
    ) -> StrataResult<GenerationReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", field::display(run_id));

        let resolver = PathResolver::confined(root)?;
        let root = resolver.resolve(".")?;
        self.filesystem
            .create_dir_all(&root)
            .map_err(|e| ApplicationError::RootDirectory {
                path: root.clone(),
                reason: e.to_string(),
            })?;

        info!(project = %context.project().name(), "Generating {mode}");
        let mut report = GenerationReport::new(run_id, mode, root);

        self.create_layout(mode, &resolver, &mut report);

        let variables = context.path_variables();
        for task in mode.tasks() {
            if !task.gate.is_active(context.features()) {
                debug!(template = task.template, gate = ?task.gate, "Feature disabled, skipping");
                report.record(task.template, task.output.into(), ArtifactOutcome::Disabled);
                continue;
            }

            let path = match output_path(task, &resolver, &variables) {
                Ok(path) => path,
                Err(e) => {
                    warn!(template = task.template, output = task.output, error = %e, "Skipping artifact");
                    report.record(
                        task.template,
                        task.output.into(),
                        ArtifactOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            match self.write_artifact(task, &path, context) {
                Ok(()) => {
                    debug!(template = task.template, path = %path.display(), "Generated");
                    report.record(task.template, path, ArtifactOutcome::Generated);
                }
                Err(e) => {
                    warn!(template = task.template, path = %path.display(), error = %e, "Skipping artifact");
                    report.record(
                        task.template,
                        path,
                        ArtifactOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        info!(
            generated = report.generated_count(),
            disabled = report.disabled_count(),
            failed = report.failed_count(),
            "Generation finished"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Create the static layout. A failing directory is recorded, not fatal.
    fn create_layout(
        &self,
        mode: GenerationMode,
        resolver: &PathResolver,
        report: &mut GenerationReport,
    ) {
        for dir in mode.directories() {
            let created = resolver
                .resolve(dir)
                .map_err(Into::into)
                .and_then(|path| self.filesystem.create_dir_all(&path));

            match created {
                Ok(()) => report.directories_created += 1,
                Err(e) => {
                    warn!(directory = dir, error = %e, "Failed to create directory");
                    report.directory_failures.push(DirectoryFailure {
                        path: PathBuf::from(dir),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    fn write_artifact(
        &self,
        task: &GenerationTask,
        path: &Path,
        context: &TemplateContext,
    ) -> StrataResult<()> {
        let body = self.store.load(task.template)?;
        let content = self.renderer.render(task.template, &body, context)?;

        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, &content)?;

        if task.executable {
            self.filesystem.set_permissions(path, true)?;
        }
        Ok(())
    }
}

fn output_path(
    task: &GenerationTask,
    resolver: &PathResolver,
    variables: &HashMap<&'static str, String>,
) -> StrataResult<PathBuf> {
    let relative = substitute_path(task.output, variables)?;
    Ok(resolver.resolve(relative)?)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::application::ports::{MockFilesystem, MockTemplateRenderer, MockTemplateStore};
    use crate::domain::{EntityModel, FeatureFlags, ProjectSettings, parse_fields};
    use crate::error::StrataError;

    const ROOT: &str = "/tmp/strata-service-test/shop";

    fn project_context() -> TemplateContext {
        TemplateContext::builder(ProjectSettings::new("shop").with_module_path("example.com/shop"))
            .generated_at(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
            .build()
            .unwrap()
    }

    fn echo_store() -> MockTemplateStore {
        let mut store = MockTemplateStore::new();
        store
            .expect_load()
            .returning(|id| Ok(format!("template {id}")));
        store
    }

    fn echo_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|_, body, _| Ok(body.to_string()));
        renderer
    }

    fn accepting_filesystem() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| path.starts_with(ROOT))
            .returning(|_, _| Ok(()));
        fs.expect_set_permissions().returning(|_, _| Ok(()));
        fs
    }

    fn service(
        store: MockTemplateStore,
        renderer: MockTemplateRenderer,
        fs: MockFilesystem,
    ) -> GenerationService {
        GenerationService::new(Box::new(store), Box::new(renderer), Box::new(fs))
    }

    #[test]
    fn new_project_records_every_task() {
        let svc = service(echo_store(), echo_renderer(), accepting_filesystem());
        let report = svc
            .generate(GenerationMode::NewProject, &project_context(), Path::new(ROOT))
            .unwrap();

        assert_eq!(report.artifacts.len(), GenerationMode::NewProject.tasks().len());
        // auth and rate-limit are off by default
        assert_eq!(report.disabled_count(), 2);
        assert_eq!(report.failed_count(), 0);
        assert_eq!(
            report.directories_created,
            GenerationMode::NewProject.directories().len()
        );
        assert!(report.is_complete());
    }

    #[test]
    fn missing_template_is_recorded_and_run_continues() {
        let mut store = MockTemplateStore::new();
        store.expect_load().returning(|id| {
            if id == "project/Makefile" {
                Err(ApplicationError::TemplateNotFound { id: id.into() }.into())
            } else {
                Ok(String::new())
            }
        });

        let svc = service(store, echo_renderer(), accepting_filesystem());
        let report = svc
            .generate(GenerationMode::NewProject, &project_context(), Path::new(ROOT))
            .unwrap();

        let failed: Vec<_> = report.failed().map(|a| a.template).collect();
        assert_eq!(failed, vec!["project/Makefile"]);
        assert!(report.generated().any(|a| a.template == "project/main.go"));
    }

    #[test]
    fn render_failure_does_not_write() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|id, _, _| {
            Err(ApplicationError::RenderingFailed {
                id: id.into(),
                reason: "bad syntax".into(),
            }
            .into())
        });
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().never();

        let svc = service(echo_store(), renderer, fs);
        let report = svc
            .generate(GenerationMode::RegenerateDocs, &project_context(), Path::new(ROOT))
            .unwrap();

        assert_eq!(report.failed_count(), GenerationMode::RegenerateDocs.tasks().len());
        assert_eq!(report.generated_count(), 0);
    }

    #[test]
    fn root_failure_aborts_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().times(1).returning(|path| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });
        fs.expect_write_file().never();

        let svc = service(echo_store(), echo_renderer(), fs);
        let err = svc
            .generate(GenerationMode::NewProject, &project_context(), Path::new(ROOT))
            .unwrap_err();

        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::RootDirectory { .. })
        ));
    }

    #[test]
    fn leaf_directory_failure_is_not_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|path| {
            if path.ends_with("tests/e2e") {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "read-only".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_permissions().returning(|_, _| Ok(()));

        let svc = service(echo_store(), echo_renderer(), fs);
        let report = svc
            .generate(GenerationMode::NewProject, &project_context(), Path::new(ROOT))
            .unwrap();

        assert_eq!(report.directory_failures.len(), 1);
        assert_eq!(report.failed_count(), 0);
        assert!(!report.is_complete());
    }

    #[test]
    fn scripts_get_executable_bit() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .withf(|path, executable| path.ends_with("scripts/migrate.sh") && *executable)
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(echo_store(), echo_renderer(), fs);
        svc.generate(GenerationMode::NewProject, &project_context(), Path::new(ROOT))
            .unwrap();
    }

    #[test]
    fn enabled_gates_produce_middleware() {
        let ctx = TemplateContext::builder(ProjectSettings::new("shop"))
            .features(FeatureFlags::all())
            .build()
            .unwrap();
        let svc = service(echo_store(), echo_renderer(), accepting_filesystem());
        let report = svc
            .generate(GenerationMode::NewProject, &ctx, Path::new(ROOT))
            .unwrap();

        assert_eq!(report.disabled_count(), 0);
        assert!(
            report
                .generated()
                .any(|a| a.path.ends_with("http/middleware/ratelimit.go"))
        );
    }

    #[test]
    fn entity_paths_are_substituted() {
        let entity = EntityModel::new("order", parse_fields("total:decimal")).unwrap();
        let ctx = TemplateContext::builder(ProjectSettings::new("shop"))
            .entity(entity)
            .generated_at(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
            .build()
            .unwrap();

        let svc = service(echo_store(), echo_renderer(), accepting_filesystem());
        let report = svc
            .generate(GenerationMode::AddEntity, &ctx, Path::new(ROOT))
            .unwrap();

        let paths: Vec<_> = report.generated().map(|a| a.path.clone()).collect();
        assert!(paths.contains(&PathBuf::from(format!(
            "{ROOT}/internal/domain/entities/order.go"
        ))));
        assert!(paths.contains(&PathBuf::from(format!(
            "{ROOT}/migrations/20260102030405_create_orders.sql"
        ))));
    }

    #[test]
    fn traversing_entity_name_is_refused_per_artifact() {
        let entity = EntityModel::new("../../../../../../../../etc/evil", vec![]).unwrap();
        let ctx = TemplateContext::builder(ProjectSettings::new("shop"))
            .entity(entity)
            .build()
            .unwrap();

        // write_file only accepts paths under ROOT; anything else would panic
        let svc = service(echo_store(), echo_renderer(), accepting_filesystem());
        let report = svc
            .generate(GenerationMode::AddEntity, &ctx, Path::new(ROOT))
            .unwrap();

        let entity_file = report
            .artifacts
            .iter()
            .find(|a| a.template == "entity/entity.go")
            .unwrap();
        match &entity_file.outcome {
            ArtifactOutcome::Failed { reason } => assert!(reason.contains("escapes")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn entity_pattern_without_entity_fails_to_resolve() {
        let svc = service(echo_store(), echo_renderer(), accepting_filesystem());
        let report = svc
            .generate(GenerationMode::AddEntity, &project_context(), Path::new(ROOT))
            .unwrap();

        assert_eq!(report.failed_count(), GenerationMode::AddEntity.tasks().len());
    }
}
