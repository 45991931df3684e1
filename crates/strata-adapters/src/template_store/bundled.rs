//! Templates compiled into the binary.

use strata_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::StrataResult,
};

macro_rules! bundled {
    ($($id:literal),* $(,)?) => {
        &[$(($id, include_str!(concat!("../../templates/", $id, ".hbs")))),*]
    };
}

/// `(id, body)` pairs, sorted by id.
const TEMPLATES: &[(&str, &str)] = bundled![
    "config/app.yaml",
    "config/config.go",
    "docs/dataflow.md",
    "docs/erd.md",
    "docs/openapi.json",
    "docs/openapi.yaml",
    "docs/postman_collection.json",
    "docs/postman_environment.json",
    "domain/errors.go",
    "domain/valueobjects.go",
    "entity/commands.go",
    "entity/dto.go",
    "entity/entity.go",
    "entity/entity_test.go",
    "entity/http_handler.go",
    "entity/migration.sql",
    "entity/mock_repository.go",
    "entity/persistence.go",
    "entity/queries.go",
    "entity/repository.go",
    "entity/service.go",
    "http/health.go",
    "http/router.go",
    "http/server.go",
    "middleware/auth.go",
    "middleware/cors.go",
    "middleware/logging.go",
    "middleware/ratelimit.go",
    "middleware/recovery.go",
    "migrations/init.sql",
    "persistence/database.go",
    "project/Dockerfile",
    "project/Makefile",
    "project/README.md",
    "project/docker-compose.yml",
    "project/env.example",
    "project/gitignore",
    "project/go.mod",
    "project/main.go",
    "scripts/migrate.sh",
    "telemetry/telemetry.go",
    "tests/health_test.go",
];

/// Read-only store over the compiled-in template table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledStore;

impl BundledStore {
    pub fn new() -> Self {
        Self
    }

    pub fn len(&self) -> usize {
        TEMPLATES.len()
    }

    pub fn is_empty(&self) -> bool {
        TEMPLATES.is_empty()
    }
}

impl TemplateStore for BundledStore {
    fn load(&self, id: &str) -> StrataResult<String> {
        TEMPLATES
            .binary_search_by(|(candidate, _)| (*candidate).cmp(id))
            .map(|index| TEMPLATES[index].1.to_string())
            .map_err(|_| ApplicationError::TemplateNotFound { id: id.to_string() }.into())
    }

    fn list(&self) -> StrataResult<Vec<String>> {
        Ok(TEMPLATES.iter().map(|(id, _)| (*id).to_string()).collect())
    }

    fn describe(&self) -> String {
        format!("bundled ({} templates)", TEMPLATES.len())
    }
}
