use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by building or reading a line index
///
/// A query past the end of the data is not an error: readers return an
/// empty sequence for it.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The data file could not be opened, sought or read
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid chunk size, buffer size or data path supplied at construction
    #[error("invalid index configuration: {0}")]
    Config(String),
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the underlying file rather than by configuration
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

pub type Result<T, E = IndexError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = IndexError::io(
            "data/usernames.txt",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_io());
        insta::assert_snapshot!(err.to_string(), @"I/O error on data/usernames.txt: gone");
    }

    #[test]
    fn config_error_is_not_io() {
        let err = IndexError::Config("chunk size must be positive".into());
        assert!(!err.is_io());
        assert_eq!(
            err.to_string(),
            "invalid index configuration: chunk size must be positive"
        );
    }
}
