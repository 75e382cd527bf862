use std::path::PathBuf;
use std::sync::Arc;

use linedex_core::{IndexBuilder, IndexConfig, LineIndex};

/// Shared, read-only context handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub index: Arc<LineIndex>,
}

impl AppState {
    pub fn new(index: LineIndex) -> Self {
        Self {
            index: Arc::new(index),
        }
    }

    /// Build the index on a blocking thread; the server must not accept
    /// traffic until this returns
    pub async fn load(path: PathBuf, config: IndexConfig) -> anyhow::Result<Self> {
        let builder = IndexBuilder::new(config)?;
        let index = tokio::task::spawn_blocking(move || builder.build(path)).await??;
        Ok(Self::new(index))
    }
}
