//! The marker file holds the row id of the session opened by the last
//! `pre` hook, so the matching `post` hook can close it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::session_store::{Result, StoreError};

#[derive(Debug, Clone)]
pub struct SessionMarker {
    path: PathBuf,
}

impl SessionMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn write(&self, id: i64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, id.to_string())?;
        Ok(())
    }

    /// Returns the stored id, or `None` when no session is open.
    pub fn read(&self) -> Result<Option<i64>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        content
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| StoreError::InvalidMarker(content))
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_marker_lifecycle() {
        let td = TempDir::new().unwrap();
        let marker = SessionMarker::new(td.path().join("sntrack"));

        assert!(!marker.exists());
        assert_eq!(marker.read().unwrap(), None);

        marker.write(42).unwrap();
        assert!(marker.exists());
        assert_eq!(fs::read_to_string(marker.path()).unwrap(), "42");
        assert_eq!(marker.read().unwrap(), Some(42));

        marker.clear().unwrap();
        assert!(!marker.exists());
        marker.clear().unwrap();
    }

    #[test]
    fn test_marker_tolerates_trailing_newline() {
        let td = TempDir::new().unwrap();
        let marker = SessionMarker::new(td.path().join("sntrack"));
        fs::write(marker.path(), "7\n").unwrap();
        assert_eq!(marker.read().unwrap(), Some(7));
    }

    #[test]
    fn test_invalid_marker() {
        let td = TempDir::new().unwrap();
        let marker = SessionMarker::new(td.path().join("sntrack"));
        fs::write(marker.path(), "garbage").unwrap();

        match marker.read() {
            Err(StoreError::InvalidMarker(content)) => assert_eq!(content, "garbage"),
            other => panic!("expected invalid marker, got {:?}", other),
        }
    }
}
