//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered Go service scaffolding",
    long_about = "Strata generates DDD-style Go services: a project skeleton, \
                  one vertical slice per entity, and API documentation.",
    after_help = "EXAMPLES:\n\
        \x20 strata new shop --module example.com/shop --db-driver postgres\n\
        \x20 strata entity Order --fields total:decimal,status:string -o shop\n\
        \x20 strata docs -o shop\n\
        \x20 strata completions bash > /usr/share/bash-completion/completions/strata",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new service project.
    #[command(
        visible_alias = "n",
        about = "Create a new Go service project",
        after_help = "EXAMPLES:\n\
            \x20 strata new shop\n\
            \x20 strata new shop --module github.com/acme/shop --db-driver mysql --port 9000\n\
            \x20 strata new shop --auth --rate-limit --telemetry=false -o ~/src"
    )]
    New(NewArgs),

    /// Add an entity slice to an existing project.
    #[command(
        visible_alias = "e",
        about = "Add an entity to a project",
        after_help = "EXAMPLES:\n\
            \x20 strata entity Order --fields total:decimal,status:string\n\
            \x20 strata entity product -f name:string,price:float,notes:text? -o shop"
    )]
    Entity(EntityArgs),

    /// Regenerate the API documentation.
    #[command(
        about = "Regenerate OpenAPI, ERD, data-flow and Postman docs",
        after_help = "EXAMPLES:\n\
            \x20 strata docs\n\
            \x20 strata docs -o shop"
    )]
    Docs(DocsArgs),

    /// List the templates in the active store.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 strata templates\n\
            \x20 strata templates --format json\n\
            \x20 strata --templates ./my-templates templates --format list"
    )]
    Templates(TemplatesArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 strata init\n\
            \x20 strata init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `strata new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; also the directory created under `--output`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Go module path (default: the project name).
    #[arg(long = "module", value_name = "PATH")]
    pub module: Option<String>,

    /// Service name reported by health checks and docs.
    #[arg(long = "service-name", value_name = "NAME")]
    pub service_name: Option<String>,

    #[arg(long = "service-version", value_name = "VERSION")]
    pub service_version: Option<String>,

    /// Deployment environment written to the generated config.
    #[arg(long = "env", value_name = "ENV")]
    pub environment: Option<String>,

    #[arg(long = "db-driver", value_enum, value_name = "DRIVER")]
    pub db_driver: Option<DbDriver>,

    #[arg(long = "db-host", value_name = "HOST")]
    pub db_host: Option<String>,

    #[arg(long = "db-port", value_name = "PORT")]
    pub db_port: Option<u16>,

    #[arg(long = "db-name", value_name = "NAME")]
    pub db_name: Option<String>,

    #[arg(long = "db-user", value_name = "USER")]
    pub db_user: Option<String>,

    /// HTTP port of the generated server.
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Parent directory of the project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Directory to create the project in"
    )]
    pub output: PathBuf,
}

/// Feature toggles. Each accepts `--flag`, `--flag=true` or `--flag=false`;
/// an absent flag keeps the configured default.
#[derive(Debug, Default, Args)]
pub struct FeatureArgs {
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub telemetry: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub swagger: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub cors: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub auth: Option<bool>,

    #[arg(
        long = "rate-limit",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub rate_limit: Option<bool>,
}

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DbDriver {
    /// Also accepted as `postgresql`, `pg`.
    #[value(alias = "postgresql", alias = "pg")]
    Postgres,
    /// Also accepted as `mariadb`.
    #[value(alias = "mariadb")]
    Mysql,
    /// Also accepted as `sqlite3`.
    #[value(alias = "sqlite3")]
    Sqlite,
}

// ── entity ────────────────────────────────────────────────────────────────────

/// Arguments for `strata entity`.
#[derive(Debug, Args)]
pub struct EntityArgs {
    /// Entity name in any case (`order`, `OrderItem`, `order_item`).
    #[arg(value_name = "NAME", help = "Entity name")]
    pub name: String,

    /// Comma-separated `name:type` pairs; a trailing `?` marks a nullable type.
    #[arg(
        short = 'f',
        long = "fields",
        value_name = "SPEC",
        default_value = "",
        help = "Fields, e.g. name:string,price:float,notes:text?"
    )]
    pub fields: String,

    /// Project root.
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Module path override; otherwise read from go.mod.
    #[arg(long = "module", value_name = "PATH")]
    pub module: Option<String>,
}

// ── docs ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata docs`.
#[derive(Debug, Args)]
pub struct DocsArgs {
    /// Project root.
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `strata templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `templates` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Ids grouped by directory.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `strata completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
