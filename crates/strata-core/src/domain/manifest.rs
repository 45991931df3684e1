//! Static generation manifests.
//!
//! Each [`GenerationMode`] owns a fixed directory layout and a fixed list of
//! [`GenerationTask`]s. Both are known at compile time; only feature gates
//! and `{{VAR}}` substitution in output paths depend on runtime input.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{context::FeatureFlags, error::DomainError};

// ============================================================================
// Modes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Full service skeleton under a fresh project root.
    NewProject,
    /// One entity across every layer of an existing project.
    AddEntity,
    /// API documentation rebuilt from the entities already on disk.
    RegenerateDocs,
}

impl GenerationMode {
    pub const fn tasks(self) -> &'static [GenerationTask] {
        match self {
            Self::NewProject => NEW_PROJECT_TASKS,
            Self::AddEntity => ENTITY_TASKS,
            Self::RegenerateDocs => DOCS_TASKS,
        }
    }

    /// Directories created before any file, relative to the project root.
    pub const fn directories(self) -> &'static [&'static str] {
        match self {
            Self::NewProject => PROJECT_LAYOUT,
            Self::AddEntity => ENTITY_LAYOUT,
            Self::RegenerateDocs => DOCS_LAYOUT,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewProject => "new-project",
            Self::AddEntity => "add-entity",
            Self::RegenerateDocs => "regenerate-docs",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// Feature a task depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureGate {
    Always,
    Telemetry,
    Swagger,
    Cors,
    Auth,
    RateLimit,
}

impl FeatureGate {
    pub const fn is_active(self, features: &FeatureFlags) -> bool {
        match self {
            Self::Always => true,
            Self::Telemetry => features.telemetry,
            Self::Swagger => features.swagger,
            Self::Cors => features.cors,
            Self::Auth => features.auth,
            Self::RateLimit => features.rate_limit,
        }
    }
}

/// One artifact: which template renders it and where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationTask {
    /// Store id, `category/name.ext`.
    pub template: &'static str,
    /// Output path relative to the project root; may contain `{{VAR}}`.
    pub output: &'static str,
    pub gate: FeatureGate,
    pub executable: bool,
}

impl GenerationTask {
    const fn new(template: &'static str, output: &'static str) -> Self {
        Self {
            template,
            output,
            gate: FeatureGate::Always,
            executable: false,
        }
    }

    const fn gated(template: &'static str, output: &'static str, gate: FeatureGate) -> Self {
        Self {
            template,
            output,
            gate,
            executable: false,
        }
    }

    const fn script(template: &'static str, output: &'static str) -> Self {
        Self {
            template,
            output,
            gate: FeatureGate::Always,
            executable: true,
        }
    }
}

/// Replace every `{{KEY}}` in `pattern` with its value.
///
/// # Errors
///
/// [`DomainError::UnresolvedPlaceholder`] if a `{{` survives substitution.
pub fn substitute_path(
    pattern: &str,
    variables: &HashMap<&'static str, String>,
) -> Result<String, DomainError> {
    let mut result = pattern.to_string();
    for (key, value) in variables {
        result = result.replace(&format!("{{{{{key}}}}}"), value);
    }

    if result.contains("{{") {
        return Err(DomainError::UnresolvedPlaceholder {
            pattern: pattern.to_string(),
        });
    }
    Ok(result)
}

// ── layouts ─────────────────────────────────────────────────────────────────

const PROJECT_LAYOUT: &[&str] = &[
    "internal/domain/entities",
    "internal/domain/repositories",
    "internal/domain/valueobjects",
    "internal/application/commands",
    "internal/application/queries",
    "internal/application/handlers",
    "internal/application/dto",
    "internal/infrastructure/persistence",
    "internal/infrastructure/http",
    "internal/infrastructure/http/middleware",
    "internal/infrastructure/http/handlers",
    "internal/infrastructure/config",
    "docs",
    "migrations",
    "scripts",
    "configs",
    "tests/unit",
    "tests/integration",
    "tests/e2e",
    "tests/mocks",
    "tests/fixtures",
];

const ENTITY_LAYOUT: &[&str] = &[
    "internal/domain/entities",
    "internal/domain/repositories",
    "internal/application/commands",
    "internal/application/queries",
    "internal/application/handlers",
    "internal/application/dto",
    "internal/infrastructure/persistence",
    "internal/infrastructure/http/handlers",
    "migrations",
    "tests/unit",
    "tests/mocks",
];

const DOCS_LAYOUT: &[&str] = &["docs"];

// ── manifests ───────────────────────────────────────────────────────────────

const NEW_PROJECT_TASKS: &[GenerationTask] = &[
    GenerationTask::new("project/go.mod", "go.mod"),
    GenerationTask::new("project/main.go", "main.go"),
    GenerationTask::new("project/Makefile", "Makefile"),
    GenerationTask::new("project/README.md", "README.md"),
    GenerationTask::new("project/gitignore", ".gitignore"),
    GenerationTask::new("project/env.example", ".env.example"),
    GenerationTask::new("project/Dockerfile", "Dockerfile"),
    GenerationTask::new("project/docker-compose.yml", "docker-compose.yml"),
    GenerationTask::new("config/config.go", "internal/infrastructure/config/config.go"),
    GenerationTask::new("config/app.yaml", "configs/app.yaml"),
    GenerationTask::new(
        "domain/valueobjects.go",
        "internal/domain/valueobjects/id.go",
    ),
    GenerationTask::new("domain/errors.go", "internal/domain/errors.go"),
    GenerationTask::new(
        "persistence/database.go",
        "internal/infrastructure/persistence/database.go",
    ),
    GenerationTask::new("http/server.go", "internal/infrastructure/http/server.go"),
    GenerationTask::new("http/router.go", "internal/infrastructure/http/router.go"),
    GenerationTask::new(
        "http/health.go",
        "internal/infrastructure/http/handlers/health.go",
    ),
    GenerationTask::new(
        "middleware/logging.go",
        "internal/infrastructure/http/middleware/logging.go",
    ),
    GenerationTask::new(
        "middleware/recovery.go",
        "internal/infrastructure/http/middleware/recovery.go",
    ),
    GenerationTask::gated(
        "middleware/cors.go",
        "internal/infrastructure/http/middleware/cors.go",
        FeatureGate::Cors,
    ),
    GenerationTask::gated(
        "middleware/auth.go",
        "internal/infrastructure/http/middleware/auth.go",
        FeatureGate::Auth,
    ),
    GenerationTask::gated(
        "middleware/ratelimit.go",
        "internal/infrastructure/http/middleware/ratelimit.go",
        FeatureGate::RateLimit,
    ),
    GenerationTask::gated(
        "telemetry/telemetry.go",
        "internal/infrastructure/telemetry/telemetry.go",
        FeatureGate::Telemetry,
    ),
    GenerationTask::script("scripts/migrate.sh", "scripts/migrate.sh"),
    GenerationTask::new(
        "migrations/init.sql",
        "migrations/{{MIGRATION_VERSION}}_init.sql",
    ),
    GenerationTask::new(
        "tests/health_test.go",
        "tests/integration/health_test.go",
    ),
    GenerationTask::gated("docs/openapi.yaml", "docs/openapi.yaml", FeatureGate::Swagger),
    GenerationTask::gated("docs/openapi.json", "docs/openapi.json", FeatureGate::Swagger),
    GenerationTask::new("docs/erd.md", "docs/erd.md"),
    GenerationTask::new("docs/dataflow.md", "docs/dataflow.md"),
];

const ENTITY_TASKS: &[GenerationTask] = &[
    GenerationTask::new(
        "entity/entity.go",
        "internal/domain/entities/{{ENTITY_SNAKE}}.go",
    ),
    GenerationTask::new(
        "entity/repository.go",
        "internal/domain/repositories/{{ENTITY_SNAKE}}_repository.go",
    ),
    GenerationTask::new(
        "entity/dto.go",
        "internal/application/dto/{{ENTITY_SNAKE}}_dto.go",
    ),
    GenerationTask::new(
        "entity/commands.go",
        "internal/application/commands/{{ENTITY_SNAKE}}_commands.go",
    ),
    GenerationTask::new(
        "entity/queries.go",
        "internal/application/queries/{{ENTITY_SNAKE}}_queries.go",
    ),
    GenerationTask::new(
        "entity/service.go",
        "internal/application/handlers/{{ENTITY_SNAKE}}_service.go",
    ),
    GenerationTask::new(
        "entity/persistence.go",
        "internal/infrastructure/persistence/{{ENTITY_SNAKE}}_repository.go",
    ),
    GenerationTask::new(
        "entity/http_handler.go",
        "internal/infrastructure/http/handlers/{{ENTITY_SNAKE}}_handler.go",
    ),
    GenerationTask::new(
        "entity/migration.sql",
        "migrations/{{MIGRATION_VERSION}}_create_{{ENTITY_PLURAL_SNAKE}}.sql",
    ),
    GenerationTask::new(
        "entity/entity_test.go",
        "tests/unit/{{ENTITY_SNAKE}}_test.go",
    ),
    GenerationTask::new(
        "entity/mock_repository.go",
        "tests/mocks/{{ENTITY_SNAKE}}_repository_mock.go",
    ),
];

const DOCS_TASKS: &[GenerationTask] = &[
    GenerationTask::new("docs/openapi.yaml", "docs/openapi.yaml"),
    GenerationTask::new("docs/openapi.json", "docs/openapi.json"),
    GenerationTask::new("docs/erd.md", "docs/erd.md"),
    GenerationTask::new("docs/dataflow.md", "docs/dataflow.md"),
    GenerationTask::new(
        "docs/postman_collection.json",
        "docs/postman_collection.json",
    ),
    GenerationTask::new(
        "docs/postman_environment.json",
        "docs/postman_environment.json",
    ),
];

/// Every template id referenced by any manifest, deduplicated, in manifest
/// order.
pub fn all_template_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = Vec::new();
    for mode in [
        GenerationMode::NewProject,
        GenerationMode::AddEntity,
        GenerationMode::RegenerateDocs,
    ] {
        for task in mode.tasks() {
            if !ids.contains(&task.template) {
                ids.push(task.template);
            }
        }
    }
    ids
}
