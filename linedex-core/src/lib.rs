// Public modules
pub mod cfg;
pub mod err;
pub mod lcr;
pub mod ljm;
pub mod lix;
pub mod ofs;
#[cfg(feature = "tokio")]
mod alr;
// Re-export commonly used types for convenience
pub use cfg::{DEFAULT_BUFFER_SIZE, DEFAULT_CHUNK_SIZE, IndexConfig, validate_data_path};
pub use err::{IndexError, Result};
pub use lcr::LineCursor;
pub use ljm::{LetterJumpMap, classify};
pub use lix::{IndexBuilder, IndexStats, LineIndex};
pub use ofs::OffsetTable;

#[cfg(test)]
mod tests;
