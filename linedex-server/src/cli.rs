use std::path::PathBuf;

use clap::Parser;
use linedex_core::{DEFAULT_BUFFER_SIZE, DEFAULT_CHUNK_SIZE, IndexConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Text file to index, one record per line
    #[arg(long, env = "LINEDEX_DATA_FILE", default_value = "data/usernames.txt")]
    pub data_file: PathBuf,

    /// Listening host
    #[arg(long, env = "LINEDEX_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Listening port
    #[arg(short, long, env = "LINEDEX_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Lines between two indexed byte offsets
    #[arg(long, env = "LINEDEX_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Read buffer size used while indexing
    #[arg(long, env = "LINEDEX_BUFFER_SIZE", default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer_size: usize,
}

impl Args {
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig::with_chunk_size(self.chunk_size).buffer_size(self.buffer_size)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
