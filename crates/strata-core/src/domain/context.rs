//! The render context shared by every artifact of a run.
//!
//! [`TemplateContext`] is assembled once per invocation through
//! [`TemplateContextBuilder`] and then only read. It serializes to the data
//! the templates see:
//!
//! ```text
//! project.{name, module_path, service_name, service_version,
//!          environment, env_prefix, server_port}
//! database.{driver, host, port, name, user}
//! features.{telemetry, swagger, cors, auth, rate_limit}
//! features_enabled[]            enabled feature names
//! entity.{name, pascal_name, camel_name, snake_name,
//!         plural_name, plural_snake, plural_camel, fields[]}   entity mode
//! entities[]                    entity summaries, docs mode
//! generator.{version, year, migration_version, generated_at}
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    fields::FieldSpec,
    naming::{pluralize, to_camel_case, to_env_prefix, to_pascal_case, to_snake_case},
};

// ============================================================================
// Project
// ============================================================================

/// Project-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSettings {
    name: String,
    module_path: String,
    service_name: String,
    service_version: String,
    environment: String,
    env_prefix: String,
    server_port: u16,
}

impl ProjectSettings {
    pub const DEFAULT_VERSION: &'static str = "0.1.0";
    pub const DEFAULT_ENVIRONMENT: &'static str = "development";
    pub const DEFAULT_SERVER_PORT: u16 = 8080;

    /// Settings with every optional value defaulted from the name: the
    /// module path and service name are the project name itself.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            module_path: name.clone(),
            service_name: name.clone(),
            service_version: Self::DEFAULT_VERSION.to_string(),
            environment: Self::DEFAULT_ENVIRONMENT.to_string(),
            env_prefix: to_env_prefix(&name),
            server_port: Self::DEFAULT_SERVER_PORT,
            name,
        }
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_server_port(mut self, port: u16) -> Self {
        self.server_port = port;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn service_version(&self) -> &str {
        &self.service_version
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }
}

// ============================================================================
// Database
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    #[default]
    Postgres,
    Mysql,
    Sqlite,
}

impl DatabaseDriver {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    pub const fn default_port(self) -> u16 {
        match self {
            Self::Postgres => 5432,
            Self::Mysql => 3306,
            Self::Sqlite => 0,
        }
    }

    pub const fn default_user(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "root",
            Self::Sqlite => "",
        }
    }
}

impl fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseDriver {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::Mysql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(DomainError::InvalidValue {
                field: "database driver",
                value: other.to_string(),
                reason: "expected postgres, mysql or sqlite".into(),
            }),
        }
    }
}

/// Database connection defaults baked into generated config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseSettings {
    driver: DatabaseDriver,
    host: String,
    port: u16,
    name: String,
    user: String,
}

impl DatabaseSettings {
    /// Defaults for `driver`: localhost, the driver's port and user, and a
    /// database named after the project.
    pub fn for_project(project_name: &str, driver: DatabaseDriver) -> Self {
        Self {
            driver,
            host: "localhost".into(),
            port: driver.default_port(),
            name: to_env_prefix(project_name).to_lowercase(),
            user: driver.default_user().into(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn driver(&self) -> DatabaseDriver {
        self.driver
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

// ============================================================================
// Features
// ============================================================================

/// Feature toggles that switch manifest entries on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub telemetry: bool,
    pub swagger: bool,
    pub cors: bool,
    pub auth: bool,
    pub rate_limit: bool,
}

impl FeatureFlags {
    pub const fn all() -> Self {
        Self {
            telemetry: true,
            swagger: true,
            cors: true,
            auth: true,
            rate_limit: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            telemetry: false,
            swagger: false,
            cors: false,
            auth: false,
            rate_limit: false,
        }
    }

    /// Names of the enabled features, in declaration order.
    pub fn enabled_names(&self) -> Vec<&'static str> {
        [
            (self.telemetry, "telemetry"),
            (self.swagger, "swagger"),
            (self.cors, "cors"),
            (self.auth, "auth"),
            (self.rate_limit, "rate-limit"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            telemetry: true,
            swagger: true,
            cors: true,
            auth: false,
            rate_limit: false,
        }
    }
}

// ============================================================================
// Entities
// ============================================================================

/// An entity and its naming variants.
///
/// Used both for the entity being generated and for the summaries listed
/// in cross-entity documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityModel {
    name: String,
    pascal_name: String,
    camel_name: String,
    snake_name: String,
    plural_name: String,
    plural_snake: String,
    plural_camel: String,
    fields: Vec<FieldSpec>,
}

impl EntityModel {
    /// Derive every naming variant from `name`.
    ///
    /// # Errors
    ///
    /// [`DomainError::MissingRequiredField`] if the name has no word
    /// characters left after splitting (`""`, `"__"`).
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        let pascal_name = to_pascal_case(&name);
        if pascal_name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "entity name",
            });
        }

        let snake_name = to_snake_case(&name);
        Ok(Self {
            camel_name: to_camel_case(&name),
            plural_name: pluralize(&pascal_name),
            plural_snake: pluralize(&snake_name),
            plural_camel: pluralize(&to_camel_case(&name)),
            pascal_name,
            snake_name,
            fields,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pascal_name(&self) -> &str {
        &self.pascal_name
    }

    pub fn camel_name(&self) -> &str {
        &self.camel_name
    }

    pub fn snake_name(&self) -> &str {
        &self.snake_name
    }

    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    pub fn plural_snake(&self) -> &str {
        &self.plural_snake
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

// ============================================================================
// Generator metadata
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorInfo {
    version: &'static str,
    year: i32,
    migration_version: String,
    generated_at: String,
}

impl GeneratorInfo {
    fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            version: crate::VERSION,
            year: timestamp.year(),
            migration_version: timestamp.format("%Y%m%d%H%M%S").to_string(),
            generated_at: timestamp.to_rfc3339(),
        }
    }

    pub fn migration_version(&self) -> &str {
        &self.migration_version
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

// ============================================================================
// TemplateContext
// ============================================================================

/// Everything a template can reference. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
    project: ProjectSettings,
    database: DatabaseSettings,
    features: FeatureFlags,
    features_enabled: Vec<&'static str>,
    entity: Option<EntityModel>,
    entities: Vec<EntityModel>,
    generator: GeneratorInfo,
}

impl TemplateContext {
    pub fn builder(project: ProjectSettings) -> TemplateContextBuilder {
        TemplateContextBuilder {
            project,
            database: None,
            features: FeatureFlags::default(),
            entity: None,
            entities: Vec::new(),
            generated_at: None,
        }
    }

    pub fn project(&self) -> &ProjectSettings {
        &self.project
    }

    pub fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub fn features(&self) -> &FeatureFlags {
        &self.features
    }

    pub fn entity(&self) -> Option<&EntityModel> {
        self.entity.as_ref()
    }

    pub fn entities(&self) -> &[EntityModel] {
        &self.entities
    }

    pub fn generator(&self) -> &GeneratorInfo {
        &self.generator
    }

    /// Variables available to output path patterns (`{{ENTITY_SNAKE}}`).
    ///
    /// Entity variables are only present in entity mode, so a pattern that
    /// uses them outside entity mode fails to resolve.
    pub fn path_variables(&self) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        vars.insert("PROJECT_NAME", self.project.name.clone());
        vars.insert(
            "MIGRATION_VERSION",
            self.generator.migration_version.clone(),
        );
        if let Some(entity) = &self.entity {
            vars.insert("ENTITY_SNAKE", entity.snake_name.clone());
            vars.insert("ENTITY_PLURAL_SNAKE", entity.plural_snake.clone());
        }
        vars
    }
}

/// Builder for [`TemplateContext`].
#[derive(Debug, Clone)]
pub struct TemplateContextBuilder {
    project: ProjectSettings,
    database: Option<DatabaseSettings>,
    features: FeatureFlags,
    entity: Option<EntityModel>,
    entities: Vec<EntityModel>,
    generated_at: Option<DateTime<Utc>>,
}

impl TemplateContextBuilder {
    pub fn database(mut self, database: DatabaseSettings) -> Self {
        self.database = Some(database);
        self
    }

    pub fn features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    pub fn entity(mut self, entity: EntityModel) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn entities(mut self, entities: Vec<EntityModel>) -> Self {
        self.entities = entities;
        self
    }

    /// Pin the generation timestamp (defaults to now).
    pub fn generated_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.generated_at = Some(timestamp);
        self
    }

    /// # Errors
    ///
    /// [`DomainError::MissingRequiredField`] for an empty project name or
    /// module path.
    pub fn build(self) -> Result<TemplateContext, DomainError> {
        if self.project.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "project name",
            });
        }
        if self.project.module_path.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "module path",
            });
        }

        let database = self.database.unwrap_or_else(|| {
            DatabaseSettings::for_project(&self.project.name, DatabaseDriver::default())
        });
        let generator = GeneratorInfo::at(self.generated_at.unwrap_or_else(Utc::now));

        Ok(TemplateContext {
            features_enabled: self.features.enabled_names(),
            project: self.project,
            database,
            features: self.features,
            entity: self.entity,
            entities: self.entities,
            generator,
        })
    }
}
