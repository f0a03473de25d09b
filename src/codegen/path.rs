//! Target path resolution for generated files.

use std::path::{Path, PathBuf};

/// Extension of generated source files.
pub const SOURCE_EXTENSION: &str = "cs";

/// Ensure a base directory string ends with a path separator.
///
/// An empty string stays empty and means "directly under the source root".
pub fn normalize_base_dir(base_dir: &str) -> String {
    let trimmed = base_dir.trim();
    if trimmed.is_empty() || trimmed.ends_with('/') || trimmed.ends_with('\\') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

/// Computes where a category's file lives.
///
/// Base directories are interpreted relative to a fixed project source
/// root, so the same base directory always maps to the same absolute path.
#[derive(Debug, Clone)]
pub struct PathResolver {
    source_root: PathBuf,
}

impl PathResolver {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    /// `<source_root>/<base_dir>/<class_name>.cs`
    pub fn resolve_full_path(&self, base_dir: &str, class_name: &str) -> PathBuf {
        let base_dir = normalize_base_dir(base_dir);
        let file_name = format!("{base_dir}{class_name}.{SOURCE_EXTENSION}");
        let path = self.source_root.join(file_name);
        tracing::debug!(path = %path.display(), "Resolved target path");
        path
    }

    /// Directory containing `path`.
    pub fn resolve_dir_of(path: &Path) -> Option<&Path> {
        path.parent().filter(|dir| !dir.as_os_str().is_empty())
    }
}
