use std::path::Path;

use crate::err::{IndexError, Result};

/// Lines between two indexed offsets
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Bytes read per scan step while building
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Tunables for building a [`crate::LineIndex`]
///
/// `chunk_size` trades index memory against read latency: one offset is kept
/// per `chunk_size` lines, and a read re-scans at most `chunk_size - 1` lines
/// before reaching its first requested line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub chunk_size: usize,
    pub buffer_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl IndexConfig {
    /// Default buffer size with a custom chunk size
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Self::default()
        }
    }

    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Reject sizes that would make the scan or lookup meaningless
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(IndexError::Config("chunk size must be positive".into()));
        }
        if self.buffer_size == 0 {
            return Err(IndexError::Config("buffer size must be positive".into()));
        }
        Ok(())
    }
}

/// Check that `path` names an existing regular file
pub fn validate_data_path(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(IndexError::Config(format!(
            "data path `{}` is not a regular file",
            path.display()
        ))),
        Err(_) => Err(IndexError::Config(format!(
            "data path `{}` does not exist",
            path.display()
        ))),
    }
}
