//! Application context wiring configuration into the engine.

use std::path::{Path, PathBuf};

use crate::codegen::PathResolver;
use crate::config::Config;
use crate::error::AppError;
use crate::ledger::JsonLedgerStore;
use crate::models::Category;
use crate::preflight::MarkerFileGate;
use crate::services::ReconciliationEngine;
use crate::sources::{ProjectSettingsSource, StaticNames};

/// Root application context.
///
/// Holds the resolved project directory and configuration, and builds the
/// collaborators every command needs from them.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory containing the project (and `.enumgen.toml`).
    pub project_dir: PathBuf,
    /// Application configuration.
    pub config: Config,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(project_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            project_dir: project_dir.into(),
            config,
        }
    }

    /// Load configuration for `project_dir` and build a context.
    ///
    /// The directory is canonicalized so every path recorded in the ledger
    /// is the same however the project was named on the command line.
    pub fn load(project_dir: &Path) -> Result<Self, AppError> {
        let project_dir =
            std::fs::canonicalize(project_dir).map_err(|e| AppError::io(project_dir, e))?;
        let config = Config::load_from(&project_dir)?;
        tracing::debug!(project = %project_dir.display(), "Loaded configuration");
        Ok(Self::new(project_dir, config))
    }

    /// Build the engine with configured class names and name sources.
    ///
    /// Categories with a `[names]` entry use that list; the rest read the
    /// project's settings files.
    pub fn engine(&self) -> Result<ReconciliationEngine<JsonLedgerStore>, AppError> {
        let project = &self.config.project;
        let resolver = PathResolver::new(project.source_root_in(&self.project_dir));
        let store = JsonLedgerStore::new(project.ledger_path_in(&self.project_dir));
        let settings_dir = project.settings_dir_in(&self.project_dir);

        let mut engine = ReconciliationEngine::new(resolver, store, &project.default_base_dir)?;

        for category in Category::all() {
            engine = match self.config.names(*category) {
                Some(names) => engine.with_source(*category, StaticNames(names.to_vec())),
                None => engine.with_source(
                    *category,
                    ProjectSettingsSource::new(settings_dir.clone(), *category),
                ),
            };
            if let Some(class_name) = self.config.class_name(*category) {
                engine.set_class_name(*category, class_name)?;
            }
        }

        Ok(engine)
    }

    /// Pre-flight gate built from the configured busy markers.
    pub fn gate(&self) -> MarkerFileGate {
        MarkerFileGate::new(self.config.project.busy_markers_in(&self.project_dir))
    }
}
