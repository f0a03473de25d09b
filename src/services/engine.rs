//! Reconciliation engine: decides how a write or delete proceeds.
//!
//! # State machine
//!
//! ```text
//! Idle --generate--> Written                      (no prior file)
//! Idle --generate--> AwaitConfirm --yes--> Written (same or different folder)
//! Idle --delete----> NothingToDelete
//! Idle --delete----> AwaitConfirm --yes--> Deleted
//! AwaitConfirm --no/dismissed--> Cancelled
//! ```
//!
//! Only one confirmation can be outstanding at a time. While one is, every
//! new request for any category fails with [`AppError::Busy`] until
//! [`ReconciliationEngine::answer`] is called.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::inspector::{classify, FileState};
use crate::codegen::{normalize_base_dir, render, sanitize, sanitize_names, PathResolver};
use crate::error::AppError;
use crate::fs::{remove_file, write_atomic};
use crate::ledger::{LedgerEntry, LedgerStore, PathLedger};
use crate::models::{Category, GeneratedArtifact};
use crate::prompt::Answer;
use crate::sources::{NameSource, StaticNames};

/// Result of one engine transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The artifact was written and the ledger updated.
    Written {
        category: Category,
        path: PathBuf,
        members: usize,
    },
    /// The file was deleted and its ledger entry cleared.
    Deleted { category: Category, path: PathBuf },
    /// Confirmation needed; answer with [`ReconciliationEngine::answer`].
    Confirm(Confirmation),
    /// The user declined; nothing changed.
    Cancelled { category: Category },
    /// Delete requested but no file exists at the recorded path.
    NothingToDelete { category: Category },
}

/// A pending yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub category: Category,
    pub kind: ConfirmKind,
    pub message: String,
}

/// What accepting a confirmation will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    /// Replace the file at the same path.
    Overwrite,
    /// Delete the file in the old folder, then write the new one.
    Relocate,
    /// Delete the file.
    Delete,
}

#[derive(Debug, Clone)]
enum PendingAction {
    Overwrite {
        category: Category,
        target: PathBuf,
    },
    Relocate {
        category: Category,
        old: PathBuf,
        target: PathBuf,
    },
    Delete {
        category: Category,
        path: PathBuf,
    },
}

impl PendingAction {
    fn category(&self) -> Category {
        match self {
            PendingAction::Overwrite { category, .. }
            | PendingAction::Relocate { category, .. }
            | PendingAction::Delete { category, .. } => *category,
        }
    }
}

/// Per-category generation settings.
struct Target {
    class_name: String,
    source: Box<dyn NameSource>,
}

/// Snapshot of one category for status output.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStatus {
    pub category: Category,
    pub description: &'static str,
    pub class_name: String,
    pub target: PathBuf,
    pub recorded: Option<LedgerEntry>,
    pub state: FileState,
}

/// Owns the ledger and the generated files.
pub struct ReconciliationEngine<S: LedgerStore> {
    resolver: PathResolver,
    store: S,
    ledger: PathLedger,
    default_base_dir: String,
    targets: BTreeMap<Category, Target>,
    pending: Option<PendingAction>,
}

impl<S: LedgerStore> ReconciliationEngine<S> {
    /// Load the ledger and clear entries whose files no longer exist.
    ///
    /// Every category starts with its default class name and an empty
    /// name source; configure them with [`Self::with_source`] and
    /// [`Self::set_class_name`].
    pub fn new(resolver: PathResolver, store: S, default_base_dir: &str) -> Result<Self, AppError> {
        let ledger = store.load()?;
        let targets = Category::all()
            .iter()
            .map(|category| {
                let target = Target {
                    class_name: category.default_class_name().to_string(),
                    source: Box::new(StaticNames::default()),
                };
                (*category, target)
            })
            .collect();

        let mut engine = Self {
            resolver,
            store,
            ledger,
            default_base_dir: normalize_base_dir(default_base_dir),
            targets,
            pending: None,
        };
        engine.clear_stale_entries()?;
        Ok(engine)
    }

    /// Replace the name source for `category`.
    pub fn with_source(mut self, category: Category, source: impl NameSource + 'static) -> Self {
        if let Some(target) = self.targets.get_mut(&category) {
            target.source = Box::new(source);
        }
        self
    }

    /// Forget ledger entries whose recorded file is gone.
    ///
    /// Returns the categories that were cleared. Runs once from
    /// [`Self::new`], before any request is served.
    pub fn clear_stale_entries(&mut self) -> Result<Vec<Category>, AppError> {
        let stale: Vec<Category> = Category::all()
            .iter()
            .copied()
            .filter(|c| self.ledger.path(*c).is_some_and(|p| !p.exists()))
            .collect();

        for category in &stale {
            tracing::warn!(%category, "Recorded file no longer exists, clearing ledger entry");
            self.ledger.clear(*category);
        }
        if !stale.is_empty() {
            self.save()?;
        }
        Ok(stale)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn ledger(&self) -> &PathLedger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether a confirmation is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Base directory under the source root, always ending in `/`.
    pub fn base_dir(&self) -> &str {
        self.ledger.base_dir().unwrap_or(self.default_base_dir.as_str())
    }

    pub fn class_name(&self, category: Category) -> &str {
        self.targets
            .get(&category)
            .map(|t| t.class_name.as_str())
            .unwrap_or_else(|| category.default_class_name())
    }

    /// Path the category would be written to right now.
    pub fn target_path(&self, category: Category) -> PathBuf {
        self.resolver
            .resolve_full_path(self.base_dir(), self.class_name(category))
    }

    pub fn status(&self) -> Vec<CategoryStatus> {
        Category::all()
            .iter()
            .map(|category| {
                let target = self.target_path(*category);
                CategoryStatus {
                    category: *category,
                    description: category.description(),
                    class_name: self.class_name(*category).to_string(),
                    state: classify(self.ledger.path(*category), &target),
                    recorded: self.ledger.entry(*category).cloned(),
                    target,
                }
            })
            .collect()
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Change the generated class name for `category`.
    ///
    /// The name is sanitized like an enum member; a name with no valid
    /// characters leaves the current one in place.
    pub fn set_class_name(&mut self, category: Category, name: &str) -> Result<(), AppError> {
        self.ensure_idle()?;
        let clean = sanitize(name);
        if clean.is_empty() {
            tracing::warn!(%category, name, "Ignoring class name with no identifier characters");
            return Ok(());
        }
        if let Some(target) = self.targets.get_mut(&category) {
            target.class_name = clean;
        }
        Ok(())
    }

    /// Change and persist the base directory.
    pub fn set_base_dir(&mut self, base_dir: &str) -> Result<(), AppError> {
        self.ensure_idle()?;
        let base_dir = normalize_base_dir(base_dir);
        if self.ledger.base_dir() == Some(base_dir.as_str()) {
            return Ok(());
        }
        tracing::info!(base_dir = %base_dir, "Base directory changed");
        self.ledger.set_base_dir(base_dir);
        self.save()
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Render the artifact for `category` without touching the filesystem.
    pub fn preview(&self, category: Category) -> Result<GeneratedArtifact, AppError> {
        self.render(category)
    }

    /// Generate the file for `category`.
    pub fn request_generate(&mut self, category: Category) -> Result<Step, AppError> {
        self.ensure_idle()?;
        let target = self.target_path(category);
        let class_name = self.class_name(category).to_string();

        match classify(self.ledger.path(category), &target) {
            FileState::Absent => self.generate(category, &target, None),
            FileState::SameTarget => {
                let message = format!(
                    "{} already exists at {}. Overwrite it?",
                    class_name,
                    target.display()
                );
                Ok(self.ask(
                    PendingAction::Overwrite { category, target },
                    ConfirmKind::Overwrite,
                    message,
                ))
            }
            FileState::DifferentTarget => {
                let old = self
                    .ledger
                    .path(category)
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                let message = format!(
                    "{} already exists in another folder, so it cannot be created at {}.\nDelete {}?",
                    class_name,
                    target.display(),
                    old.display()
                );
                Ok(self.ask(
                    PendingAction::Relocate {
                        category,
                        old,
                        target,
                    },
                    ConfirmKind::Relocate,
                    message,
                ))
            }
        }
    }

    /// Delete the file last written for `category`.
    pub fn request_delete(&mut self, category: Category) -> Result<Step, AppError> {
        self.ensure_idle()?;
        match self.ledger.path(category) {
            Some(path) if path.exists() => {
                let path = path.to_path_buf();
                let message = format!("Delete {} from {}?", category, path.display());
                Ok(self.ask(
                    PendingAction::Delete { category, path },
                    ConfirmKind::Delete,
                    message,
                ))
            }
            _ => {
                tracing::info!(%category, "Nothing to delete");
                Ok(Step::NothingToDelete { category })
            }
        }
    }

    /// Resume the outstanding confirmation.
    ///
    /// Anything but [`Answer::Yes`] cancels without changing state. The
    /// engine is idle again afterwards, whether the action succeeded or not.
    pub fn answer(&mut self, answer: Answer) -> Result<Step, AppError> {
        let pending = self.pending.take().ok_or(AppError::NoPendingPrompt)?;

        if !answer.is_yes() {
            tracing::info!(category = %pending.category(), ?answer, "Cancelled");
            return Ok(Step::Cancelled {
                category: pending.category(),
            });
        }

        match pending {
            PendingAction::Overwrite { category, target } => {
                self.generate(category, &target, None)
            }
            PendingAction::Relocate {
                category,
                old,
                target,
            } => self.generate(category, &target, Some(&old)),
            PendingAction::Delete { category, path } => self.delete(category, &path),
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn ensure_idle(&self) -> Result<(), AppError> {
        if self.pending.is_some() {
            tracing::debug!("Request rejected while a confirmation is outstanding");
            return Err(AppError::Busy);
        }
        Ok(())
    }

    fn ask(&mut self, action: PendingAction, kind: ConfirmKind, message: String) -> Step {
        let category = action.category();
        tracing::debug!(%category, ?kind, "Awaiting confirmation");
        self.pending = Some(action);
        Step::Confirm(Confirmation {
            category,
            kind,
            message,
        })
    }

    fn render(&self, category: Category) -> Result<GeneratedArtifact, AppError> {
        let target = self
            .targets
            .get(&category)
            .ok_or_else(|| AppError::UndefinedCategory(category.to_string()))?;
        let raw = target.source.names()?;
        let names = sanitize_names(&raw);
        render(&target.class_name, &names)
    }

    /// Render, write, remove the file being relocated, then record.
    ///
    /// The ledger is only touched once every filesystem step succeeded, so
    /// an empty name list or a failed write leaves both the old file and
    /// its entry in place.
    fn generate(
        &mut self,
        category: Category,
        target: &Path,
        replace: Option<&Path>,
    ) -> Result<Step, AppError> {
        let artifact = self.render(category)?;

        write_atomic(target, artifact.text().as_bytes())?;
        tracing::info!(
            %category,
            class = artifact.class_name(),
            path = %target.display(),
            "Generated enum"
        );

        if let Some(old) = replace {
            if remove_file(old)? {
                tracing::info!(%category, path = %old.display(), "Deleted file in previous folder");
            } else {
                tracing::warn!(%category, path = %old.display(), "Previous file already gone");
            }
        }

        self.ledger.record(category, target.to_path_buf());
        self.save()?;

        Ok(Step::Written {
            category,
            path: target.to_path_buf(),
            members: artifact.members().len(),
        })
    }

    fn delete(&mut self, category: Category, path: &Path) -> Result<Step, AppError> {
        if remove_file(path)? {
            tracing::info!(%category, path = %path.display(), "Deleted enum file");
        } else {
            tracing::warn!(%category, path = %path.display(), "File already gone");
        }
        self.ledger.clear(category);
        self.save()?;
        Ok(Step::Deleted {
            category,
            path: path.to_path_buf(),
        })
    }

    fn save(&mut self) -> Result<(), AppError> {
        self.store.save(&self.ledger)
    }
}
