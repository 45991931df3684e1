//! Structured outcome of a generation run.

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::manifest::GenerationMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ArtifactOutcome {
    Generated,
    /// Feature gate was off.
    Disabled,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub template: &'static str,
    /// Resolved output path, or the raw pattern when resolution failed.
    pub path: PathBuf,
    pub outcome: ArtifactOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Per-artifact record of a run, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub mode: GenerationMode,
    pub root: PathBuf,
    pub directories_created: usize,
    pub directory_failures: Vec<DirectoryFailure>,
    pub artifacts: Vec<ArtifactReport>,
}

impl GenerationReport {
    pub fn new(run_id: Uuid, mode: GenerationMode, root: PathBuf) -> Self {
        Self {
            run_id,
            mode,
            root,
            directories_created: 0,
            directory_failures: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, template: &'static str, path: PathBuf, outcome: ArtifactOutcome) {
        self.artifacts.push(ArtifactReport {
            template,
            path,
            outcome,
        });
    }

    pub fn generated(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == ArtifactOutcome::Generated)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts
            .iter()
            .filter(|a| matches!(a.outcome, ArtifactOutcome::Failed { .. }))
    }

    pub fn generated_count(&self) -> usize {
        self.generated().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn disabled_count(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == ArtifactOutcome::Disabled)
            .count()
    }

    /// No artifact or directory failed.
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0 && self.directory_failures.is_empty()
    }
}
