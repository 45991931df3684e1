//! Integration tests for strata-core through its public API, with
//! in-test port implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use strata_core::{
    application::ApplicationError,
    domain::{ArtifactOutcome, GenerationMode},
    prelude::*,
};

#[derive(Clone, Default)]
struct RecordingFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl Filesystem for RecordingFs {
    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        self.dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, _path: &Path, _executable: bool) -> StrataResult<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
            || self.dirs.lock().unwrap().iter().any(|d| d == path)
    }

    fn read_to_string(&self, path: &Path) -> StrataResult<String> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn list_dir(&self, path: &Path) -> StrataResult<Vec<PathBuf>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }
}

/// Every template body is its own id; entity templates list the fields.
struct IdStore;

impl TemplateStore for IdStore {
    fn load(&self, id: &str) -> StrataResult<String> {
        Ok(id.to_string())
    }

    fn list(&self) -> StrataResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn describe(&self) -> String {
        "ids".into()
    }
}

struct FieldListRenderer;

impl TemplateRenderer for FieldListRenderer {
    fn render(
        &self,
        template_id: &str,
        body: &str,
        context: &TemplateContext,
    ) -> StrataResult<String> {
        let mut out = format!("{body} for {}\n", context.project().module_path());
        if template_id == "entity/entity.go" {
            if let Some(entity) = context.entity() {
                out.push_str(&format!("type {} struct {{\n", entity.pascal_name()));
                for field in entity.fields() {
                    out.push_str(&format!(
                        "\t{} {} `json:\"{}\"`\n",
                        field.pascal_name(),
                        field.declared_type(),
                        field.camel_name()
                    ));
                }
                out.push_str("}\n");
            }
        }
        Ok(out)
    }
}

fn service(fs: &RecordingFs) -> GenerationService {
    GenerationService::new(
        Box::new(IdStore),
        Box::new(FieldListRenderer),
        Box::new(fs.clone()),
    )
}

#[test]
fn new_project_then_entity_then_docs() {
    let fs = RecordingFs::default();
    let root = PathBuf::from("/virtual/shop");

    let project = ProjectSettings::new("shop").with_module_path("example.com/shop");
    let ctx = TemplateContext::builder(project.clone()).build().unwrap();
    let report = service(&fs)
        .generate(GenerationMode::NewProject, &ctx, &root)
        .unwrap();
    assert!(report.is_complete());
    assert!(fs.exists(&root.join("go.mod")));
    assert!(fs.exists(&root.join("main.go")));

    let parsed = parse_fields_with_report("total:decimal,status:string,oops");
    assert_eq!(parsed.skipped.len(), 1);
    let entity = EntityModel::new("Order", parsed.fields).unwrap();
    let ctx = TemplateContext::builder(project.clone())
        .entity(entity)
        .build()
        .unwrap();
    let report = service(&fs)
        .generate(GenerationMode::AddEntity, &ctx, &root)
        .unwrap();
    assert_eq!(report.failed_count(), 0);

    let entity_file = root.join("internal/domain/entities/order.go");
    let source = fs.read_to_string(&entity_file).unwrap();
    assert!(source.contains("Total float64"));
    assert!(source.contains("Status string"));

    let inspector = ProjectInspector::new(Box::new(fs.clone()));
    let entities = inspector.scan_entities(&root).unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].fields().len(), 2);

    let ctx = TemplateContext::builder(project)
        .entities(entities)
        .build()
        .unwrap();
    let report = service(&fs)
        .generate(GenerationMode::RegenerateDocs, &ctx, &root)
        .unwrap();
    assert_eq!(report.generated_count(), 6);
    assert!(
        report
            .artifacts
            .iter()
            .all(|a| a.outcome == ArtifactOutcome::Generated)
    );
}

#[test]
fn every_artifact_lands_inside_root() {
    let fs = RecordingFs::default();
    let root = PathBuf::from("/virtual/confined");
    let ctx = TemplateContext::builder(ProjectSettings::new("confined"))
        .features(FeatureFlags::all())
        .build()
        .unwrap();

    service(&fs)
        .generate(GenerationMode::NewProject, &ctx, &root)
        .unwrap();

    let files = fs.files.lock().unwrap();
    assert!(!files.is_empty());
    assert!(files.keys().all(|p| p.starts_with(&root)));
}

#[test]
fn report_serializes_for_machine_output() {
    let fs = RecordingFs::default();
    let ctx = TemplateContext::builder(ProjectSettings::new("svc"))
        .build()
        .unwrap();
    let report = service(&fs)
        .generate(GenerationMode::RegenerateDocs, &ctx, Path::new("/virtual/svc"))
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "regenerate-docs");
    assert_eq!(json["artifacts"][0]["outcome"]["status"], "generated");
}
