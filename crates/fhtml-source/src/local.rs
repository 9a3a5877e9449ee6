//! Pre-exported design document on disk.

use std::path::PathBuf;

use crate::{LoadError, SourceProvider};

/// Reads the design document from a local JSON export.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceProvider for LocalFile {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch(&self) -> Result<String, LoadError> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| LoadError::unavailable(self.describe(), e.to_string()))
    }
}
