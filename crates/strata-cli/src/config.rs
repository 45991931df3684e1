//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.
//! The CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `STRATA__SECTION__KEY`
//! 3. Config file (`--config FILE`, else the platform config path)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use strata_core::domain::{DatabaseDriver, FeatureFlags};

/// Environment prefix; nested keys are separated by a double underscore.
const ENV_PREFIX: &str = "STRATA";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub service_version: String,
    pub environment: String,
    pub db_driver: DatabaseDriver,
    pub db_host: String,
    /// Empty means the driver's conventional user.
    pub db_user: String,
    pub server_port: u16,
    pub features: FeatureFlags,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            service_version: "0.1.0".into(),
            environment: "development".into(),
            db_driver: DatabaseDriver::default(),
            db_host: "localhost".into(),
            db_user: String::new(),
            server_port: 8080,
            features: FeatureFlags::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Override directory; the bundled set is used when unset.
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        let defaults = Config::try_from(&Self::default()).context("Invalid built-in defaults")?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.strata.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".strata.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_generated_project_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.server_port, 8080);
        assert_eq!(cfg.defaults.db_driver, DatabaseDriver::Postgres);
        assert!(!cfg.output.no_color);
        assert!(cfg.templates.dir.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("strata.toml");
        std::fs::write(
            &path,
            "[defaults]\nserver_port = 9000\ndb_driver = \"sqlite\"\n\n[defaults.features]\nauth = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.defaults.server_port, 9000);
        assert_eq!(cfg.defaults.db_driver, DatabaseDriver::Sqlite);
        assert!(cfg.defaults.features.auth);
        // untouched keys keep their defaults
        assert_eq!(cfg.defaults.environment, "development");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(tmp.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
