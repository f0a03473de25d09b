//! Filesystem helpers shared by the ledger store and the engine.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::codegen::PathResolver;
use crate::error::AppError;

/// Write `contents` to `path`, creating missing parent directories.
///
/// Data goes to a temporary file in the target directory first and is
/// renamed over `path`, so readers never observe a partial file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let dir = PathResolver::resolve_dir_of(path).unwrap_or(Path::new("."));

    if !dir.exists() {
        tracing::debug!(dir = %dir.display(), "Creating directory");
        std::fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;
    }

    let mut file = NamedTempFile::new_in(dir).map_err(|e| AppError::io(dir, e))?;
    file.write_all(contents).map_err(|e| AppError::io(path, e))?;
    file.flush().map_err(|e| AppError::io(path, e))?;
    file.persist(path).map_err(|e| AppError::io(path, e.error))?;
    Ok(())
}

/// Remove the file at `path`. Returns `false` if it was already gone.
pub fn remove_file(path: &Path) -> Result<bool, AppError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AppError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.txt");

        write_atomic(&path, b"hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");

        write_atomic(&path, b"replaced").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "replaced");
    }

    #[test]
    fn test_write_atomic_fails_when_parent_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_atomic(&blocker.join("out.txt"), b"data").unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
    }

    #[test]
    fn test_remove_file_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.cs");
        std::fs::write(&path, "x").unwrap();

        assert!(remove_file(&path).unwrap());
        assert!(!remove_file(&path).unwrap());
    }
}
