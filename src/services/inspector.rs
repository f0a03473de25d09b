//! Classification of a requested write against the ledger.

use std::path::Path;

use serde::Serialize;

/// Where a category's file stands relative to a new target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    /// Never written, or deleted since.
    Absent,
    /// Last written to the same path.
    SameTarget,
    /// Last written somewhere else.
    DifferentTarget,
}

/// Compare the ledger's recorded path with the freshly resolved target.
///
/// The recorded path is trusted as-is; whether the file still exists is
/// checked by delete and by the engine's startup pass, not here.
pub fn classify(last_recorded: Option<&Path>, new_target: &Path) -> FileState {
    let state = match last_recorded {
        None => FileState::Absent,
        Some(path) if path.as_os_str().is_empty() => FileState::Absent,
        Some(path) if path == new_target => FileState::SameTarget,
        Some(_) => FileState::DifferentTarget,
    };
    tracing::debug!(target = %new_target.display(), ?state, "Classified target");
    state
}
