use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use linedex_core::{DEFAULT_CHUNK_SIZE, IndexBuilder, IndexConfig};
use linedex_server::init_tracing;
use linedex_server::inspect::{check_letters, sample_lines};

/// Index a file once, print its stats and spot-check random access
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Opts {
    /// Text file to index
    file: PathBuf,

    /// Lines between two indexed byte offsets
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Lines printed from the start and from the middle
    #[arg(long, default_value_t = NonZeroUsize::new(5).unwrap_or(NonZeroUsize::MIN))]
    sample: NonZeroUsize,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let opts = Opts::parse();

    let index =
        IndexBuilder::new(IndexConfig::with_chunk_size(opts.chunk_size))?.build(&opts.file)?;
    println!("{}", serde_json::to_string_pretty(&index.stats())?);

    let (head, mid, middle) = sample_lines(&index, opts.sample)?;
    println!("lines 0..{}:", head.len());
    for line in &head {
        println!("  {line}");
    }
    println!("lines {}..{}:", mid, mid + middle.len() as u64);
    for line in &middle {
        println!("  {line}");
    }

    let mismatches = check_letters(&index)?;
    if mismatches.is_empty() {
        println!("jump map verified for {} letters", index.letters().len());
        Ok(ExitCode::SUCCESS)
    } else {
        for m in &mismatches {
            eprintln!("letter {} -> line {}: {:?}", m.letter, m.line, m.content);
        }
        Ok(ExitCode::FAILURE)
    }
}
