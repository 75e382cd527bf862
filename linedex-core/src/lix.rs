use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use memchr::memchr_iter;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::cfg::IndexConfig;
use crate::err::{IndexError, Result};
use crate::ljm::{LeadChar, LetterJumpMap, letter_of};
use crate::ofs::OffsetTable;

/// Immutable sparse index over one text file
///
/// Built once by [`IndexBuilder`] and then shared read-only; every read opens
/// its own cursor on the file, so the index can be used from any number of
/// threads without locking.
#[derive(Debug, Clone)]
pub struct LineIndex {
    path: PathBuf,
    chunk_size: usize,
    offsets: OffsetTable,
    letters: LetterJumpMap,
    total_lines: u64,
    byte_len: u64,
}

/// Summary of a built index
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub total_lines: u64,
    pub chunk_size: usize,
    pub chunk_offsets: usize,
    pub byte_len: u64,
    pub alphabet_map: LetterJumpMap,
}

impl LineIndex {
    /// Build with the default configuration
    pub fn build(path: impl AsRef<Path>) -> Result<Self> {
        IndexBuilder::new(IndexConfig::default())?.build(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    pub fn letters(&self) -> &LetterJumpMap {
        &self.letters
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    /// File size observed by the scan
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    /// First line whose content starts with `letter`
    pub fn line_for_letter(&self, letter: char) -> Option<u64> {
        self.letters.get(letter)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_lines: self.total_lines,
            chunk_size: self.chunk_size,
            chunk_offsets: self.offsets.len(),
            byte_len: self.byte_len,
            alphabet_map: self.letters.clone(),
        }
    }
}

/// Single-pass builder for [`LineIndex`]
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    config: IndexConfig,
}

impl IndexBuilder {
    /// Validates the configuration up front
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Scan the file at `path` once and build its index
    ///
    /// Memory use is bounded by the read buffer and the offset table; line
    /// length and file size do not matter. Any open or read failure aborts
    /// the build.
    pub fn build(&self, path: impl AsRef<Path>) -> Result<LineIndex> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IndexError::io(path, e))?;
        self.build_from_reader(file, path)
    }

    /// Build from an arbitrary byte stream that holds the contents of `path`
    ///
    /// Reads later served by the index go to `path`, so the stream must match
    /// that file byte for byte.
    pub fn build_from_reader<R: Read>(
        &self,
        reader: R,
        path: impl Into<PathBuf>,
    ) -> Result<LineIndex> {
        let path = path.into();
        let started = Instant::now();
        tracing::debug!(
            path = %path.display(),
            chunk_size = self.config.chunk_size,
            "indexing"
        );

        let mut scan = Scan::new(self.config.chunk_size);
        scan.run(reader, self.config.buffer_size)
            .map_err(|e| IndexError::io(&path, e))?;
        let index = scan.finish(path, self.config.chunk_size);

        tracing::info!(
            path = %index.path.display(),
            lines = index.total_lines,
            chunk_offsets = index.offsets.len(),
            letters = index.letters.len(),
            elapsed = ?started.elapsed(),
            "indexed {} lines with {} chunk offsets",
            index.total_lines,
            index.offsets.len()
        );
        Ok(index)
    }
}

/// Running state of one forward scan
struct Scan {
    chunk_size: u64,
    offsets: OffsetTable,
    letters: LetterJumpMap,
    line_count: u64,
    // file offset of the next byte to be fed
    cursor: u64,
    // file offset where the current, unterminated line begins
    line_start: u64,
    // first visible character of the current line, at most 4 bytes held
    lead: LeadChar,
}

impl Scan {
    fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size as u64,
            offsets: OffsetTable::new(),
            letters: LetterJumpMap::new(),
            line_count: 0,
            cursor: 0,
            line_start: 0,
            lead: LeadChar::default(),
        }
    }

    fn run<R: Read>(&mut self, mut reader: R, buffer_size: usize) -> io::Result<()> {
        let mut buf = vec![0u8; buffer_size];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(n) => self.feed(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn feed(&mut self, buf: &[u8]) {
        let mut pos = 0;
        for nl in memchr_iter(b'\n', buf) {
            if !self.letters.is_full() {
                self.lead.push(&buf[pos..nl]);
            }
            self.end_line();
            pos = nl + 1;
            self.line_start = self.cursor + pos as u64;
        }
        if !self.letters.is_full() {
            self.lead.push(&buf[pos..]);
        }
        self.cursor += buf.len() as u64;
    }

    fn end_line(&mut self) {
        if self.line_count % self.chunk_size == 0 {
            self.offsets.push(self.line_start);
        }
        if let Some(letter) = self.lead.take().and_then(letter_of) {
            self.letters.record(letter, self.line_count);
        }
        self.line_count += 1;
    }

    fn finish(mut self, path: PathBuf, chunk_size: usize) -> LineIndex {
        // A trailing record without terminator still counts when non-empty;
        // it starts at file_size - leftover_len, which is `line_start`.
        if self.cursor > self.line_start {
            self.end_line();
        }
        LineIndex {
            path,
            chunk_size,
            offsets: self.offsets,
            letters: self.letters,
            total_lines: self.line_count,
            byte_len: self.cursor,
        }
    }
}
