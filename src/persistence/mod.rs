//! High score storage
//!
//! The store holds a single integer. A store that has never been written is
//! not an error: `load` returns `Ok(None)`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Errors from reading or writing the score store
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    /// Filesystem failure other than "not found"
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored contents are not a score
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Backing store for the best score
pub trait ScoreStore {
    /// Stored score, or `None` if nothing was ever saved
    fn load(&self) -> Result<Option<u64>>;
    fn save(&mut self, score: u64) -> Result<()>;
}

/// Plain-text file holding the score as a bare integer
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<Option<u64>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let score = serde_json::from_str::<u64>(text.trim())?;
        Ok(Some(score))
    }

    fn save(&mut self, score: u64) -> Result<()> {
        let text = serde_json::to_string(&score)?;
        // Write-then-rename so a crash never leaves a truncated file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests and sessions without a disk
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub value: Option<u64>,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<Option<u64>> {
        Ok(self.value)
    }

    fn save(&mut self, score: u64) -> Result<()> {
        self.value = Some(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rock_drift_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_none() {
        let store = FileScoreStore::new(temp_path("missing"));
        assert!(matches!(store.load(), Ok(None)));
    }

    #[test]
    fn test_file_roundtrip() {
        let path = temp_path("roundtrip");
        let mut store = FileScoreStore::new(&path);
        store.save(12_500).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "12500");
        assert_eq!(store.load().unwrap(), Some(12_500));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not a number").unwrap();
        let store = FileScoreStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Parse(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reads_trailing_newline() {
        let path = temp_path("newline");
        fs::write(&path, "300\n").unwrap();
        let store = FileScoreStore::new(&path);
        assert_eq!(store.load().unwrap(), Some(300));
        let _ = fs::remove_file(&path);
    }
}
