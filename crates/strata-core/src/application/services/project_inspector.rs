//! Reads facts back out of an existing generated project.
//!
//! Two lookups feed the entity and docs modes: the Go module path from
//! `go.mod`, and the entity structs under `internal/domain/entities`. Both
//! are plain reads of files the user owns, so paths go through
//! [`PathResolver::Unconfined`].
//!
//! Pascal-casing is lossy (`OrderItem` renders as `Orderitem`), so the
//! struct name alone cannot give back the routes and tables the entity was
//! generated with. Generated entity files carry an [`ENTITY_MARKER`] line
//! with the name as given; files without one fall back to their file stem.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::{
        DatabaseDriver, EntityModel, FieldSpec, FieldType, PathResolver,
        naming::{to_pascal_case, to_snake_case},
    },
    error::StrataResult,
};

const ENTITIES_DIR: &str = "internal/domain/entities";

/// Driver modules a generated go.mod requires, one per driver.
const DRIVER_MODULES: &[(&str, DatabaseDriver)] = &[
    ("github.com/lib/pq", DatabaseDriver::Postgres),
    ("github.com/go-sql-driver/mysql", DatabaseDriver::Mysql),
    ("github.com/mattn/go-sqlite3", DatabaseDriver::Sqlite),
];

/// Directive comment naming the entity a struct was generated from.
pub const ENTITY_MARKER: &str = "//strata:entity ";

/// Struct fields every generated entity carries; not user fields.
const BOOKKEEPING_FIELDS: &[&str] = &["ID", "CreatedAt", "UpdatedAt"];

/// Where a module path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSource {
    GoMod,
    DirectoryName,
}

pub struct ProjectInspector {
    filesystem: Box<dyn Filesystem>,
    resolver: PathResolver,
}

impl ProjectInspector {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            resolver: PathResolver::unconfined(),
        }
    }

    /// Module path declared in `root/go.mod`, if any.
    pub fn discover_module_path(&self, root: &Path) -> StrataResult<Option<String>> {
        let go_mod = self.resolver.resolve(root.join("go.mod"))?;
        if !self.filesystem.exists(&go_mod) {
            return Ok(None);
        }
        let content = self.filesystem.read_to_string(&go_mod)?;
        Ok(parse_module_line(&content))
    }

    /// Module path from `go.mod`, falling back to the directory name.
    pub fn module_path(&self, root: &Path) -> StrataResult<(String, ModuleSource)> {
        match self.discover_module_path(root) {
            Ok(Some(module)) => return Ok((module, ModuleSource::GoMod)),
            Ok(None) => warn!(root = %root.display(), "No module line in go.mod, using directory name"),
            Err(e) => warn!(root = %root.display(), error = %e, "Cannot read go.mod, using directory name"),
        }

        let absolute = self.resolver.resolve(root)?;
        let name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "app".to_string());
        Ok((name, ModuleSource::DirectoryName))
    }

    /// Database driver whose module `root/go.mod` requires, if any.
    pub fn database_driver(&self, root: &Path) -> StrataResult<Option<DatabaseDriver>> {
        let go_mod = self.resolver.resolve(root.join("go.mod"))?;
        if !self.filesystem.exists(&go_mod) {
            return Ok(None);
        }
        let content = self.filesystem.read_to_string(&go_mod)?;
        Ok(DRIVER_MODULES
            .iter()
            .find(|(module, _)| content.contains(module))
            .map(|(_, driver)| *driver))
    }

    /// Entity structs declared in `root/internal/domain/entities/*.go`,
    /// sorted by file name. Unreadable files are skipped with a warning.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn scan_entities(&self, root: &Path) -> StrataResult<Vec<EntityModel>> {
        let dir = self.resolver.resolve(root.join(ENTITIES_DIR))?;
        if !self.filesystem.exists(&dir) {
            debug!("No entities directory");
            return Ok(Vec::new());
        }

        let mut sources: Vec<PathBuf> = self
            .filesystem
            .list_dir(&dir)?
            .into_iter()
            .filter(|p| is_entity_source(p))
            .collect();
        sources.sort();

        let mut entities = Vec::new();
        for path in sources {
            let stem = path.file_stem().and_then(|s| s.to_str());
            match self.filesystem.read_to_string(&path) {
                Ok(source) => entities.extend(parse_entity_source(&source, stem)),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable entity file"),
            }
        }
        debug!(count = entities.len(), "Entities discovered");
        Ok(entities)
    }
}

fn is_entity_source(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.ends_with(".go") && !name.ends_with("_test.go")
}

/// First `module <path>` line of a go.mod file.
pub fn parse_module_line(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("module"), Some(path)) => Some(path.trim_matches('"').to_string()),
            _ => None,
        }
    })
}

/// Entities declared as `type X struct { ... }` in a Go source file.
///
/// The entity name is, in order: the [`ENTITY_MARKER`] line above the
/// struct, the file stem when it names the struct, the snake-cased struct
/// name. Field names come from the `json` tag when present, else from the
/// Go name. Fields with Go types the resolver does not know are dropped.
pub fn parse_entity_source(source: &str, file_stem: Option<&str>) -> Vec<EntityModel> {
    let mut entities = Vec::new();
    let mut marker: Option<String> = None;
    let mut current: Option<(String, Vec<FieldSpec>)> = None;

    for line in source.lines() {
        let line = line.trim();

        if let Some((name, fields)) = current.as_mut() {
            if line.starts_with('}') {
                if let Ok(entity) = EntityModel::new(name.as_str(), std::mem::take(fields)) {
                    entities.push(entity);
                }
                current = None;
            } else if let Some(field) = parse_struct_field(line) {
                fields.push(field);
            }
            continue;
        }

        if let Some(name) = line.strip_prefix(ENTITY_MARKER) {
            marker = Some(name.trim().to_string()).filter(|n| !n.is_empty());
        } else if let Some(struct_name) = struct_header(line) {
            let name = marker
                .take()
                .or_else(|| file_stem.filter(|stem| names_struct(stem, struct_name)).map(str::to_string))
                .unwrap_or_else(|| to_snake_case(struct_name));
            current = Some((name, Vec::new()));
        }
    }

    entities
}

/// `order_item` names both `OrderItem` and the merged `Orderitem`.
fn names_struct(stem: &str, struct_name: &str) -> bool {
    to_pascal_case(stem).eq_ignore_ascii_case(struct_name)
}

fn struct_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("type ")?;
    let mut parts = rest.split_whitespace();
    let name = parts.next()?;
    (parts.next() == Some("struct") && parts.next() == Some("{")).then_some(name)
}

fn parse_struct_field(line: &str) -> Option<FieldSpec> {
    let code = line.split("//").next().unwrap_or_default();
    let mut parts = code.split_whitespace();
    let go_name = parts.next()?;
    let go_type = parts.next()?;

    if BOOKKEEPING_FIELDS.contains(&go_name) {
        return None;
    }
    let kind = FieldType::from_go_name(go_type)?;

    let name = json_tag_name(code)
        .map(|tag| to_snake_case(&tag))
        .unwrap_or_else(|| to_snake_case(go_name));
    let token = if go_type.starts_with('*') {
        format!("{}?", kind.token())
    } else {
        kind.token().to_string()
    };
    Some(FieldSpec::new(name, token))
}

fn json_tag_name(code: &str) -> Option<String> {
    let start = code.find("json:\"")? + "json:\"".len();
    let rest = &code[start..];
    let end = rest.find(['"', ','])?;
    let name = &rest[..end];
    (!name.is_empty() && name != "-").then(|| name.to_string())
}
