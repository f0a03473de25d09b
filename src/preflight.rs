//! Pre-flight check consulted before any generate or delete command.
//!
//! Writing source files while the host is compiling or running would race
//! with it, so the CLI refuses to start a workflow while the gate is closed.
//! The engine itself does not re-check mid-operation.

use std::path::PathBuf;

use crate::error::AppError;

/// Reports whether the host is busy.
pub trait PreflightGate {
    /// `Err(AppError::HostBusy)` while generation must not start.
    fn check(&self) -> Result<(), AppError>;
}

/// Closed while any of the marker files exists.
#[derive(Debug, Clone, Default)]
pub struct MarkerFileGate {
    markers: Vec<PathBuf>,
}

impl MarkerFileGate {
    pub fn new(markers: Vec<PathBuf>) -> Self {
        Self { markers }
    }
}

impl PreflightGate for MarkerFileGate {
    fn check(&self) -> Result<(), AppError> {
        match self.markers.iter().find(|marker| marker.exists()) {
            Some(marker) => {
                tracing::warn!(marker = %marker.display(), "Host busy, refusing to generate");
                Err(AppError::HostBusy(marker.display().to_string()))
            }
            None => Ok(()),
        }
    }
}
