//! Application error types with stable notice codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Category;

/// Application-level errors for enumgen.
#[derive(Error, Debug)]
pub enum AppError {
    // Generation errors
    #[error("{class_name} has no content: no names remained after sanitizing")]
    NoContent { class_name: String },

    #[error("Undefined category: {0}")]
    UndefinedCategory(String),

    // Filesystem errors
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Prompt state errors
    #[error("A confirmation prompt is still outstanding")]
    Busy,

    #[error("No confirmation prompt is outstanding")]
    NoPendingPrompt,

    #[error("Host is busy: {0} exists")]
    HostBusy(String),

    // Name source errors
    #[error("Failed to read names for {category}: {message}")]
    NameSource { category: Category, message: String },

    // Persistence errors
    #[error("Ledger file {} is invalid: {source}", path.display())]
    Ledger {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Build an [`AppError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// Machine-readable code used to prefix user notices.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NoContent { .. } => "NO_CONTENT",
            AppError::UndefinedCategory(_) => "UNDEFINED_CATEGORY",
            AppError::Io { .. } => "IO_ERROR",
            AppError::Busy => "BUSY",
            AppError::NoPendingPrompt => "NO_PENDING_PROMPT",
            AppError::HostBusy(_) => "HOST_BUSY",
            AppError::NameSource { .. } => "NAME_SOURCE_ERROR",
            AppError::Ledger { .. } => "LEDGER_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Notice text shown to the user.
    pub fn notice(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}
