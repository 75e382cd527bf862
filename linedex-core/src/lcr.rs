use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::err::{IndexError, Result};
use crate::lix::LineIndex;

/// Where a bounded read starts and how much it must return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReadPlan {
    /// Byte offset of `first_line`
    pub offset: u64,
    /// Line number at `offset`, always a chunk boundary
    pub first_line: u64,
    pub start_line: u64,
    /// `min(limit, total_lines - start_line)`
    pub quota: usize,
}

impl ReadPlan {
    pub(crate) fn lines_to_skip(&self) -> u64 {
        self.start_line - self.first_line
    }
}

impl LineIndex {
    /// Resolve a request to a plan; `None` when `start_line` is past the end
    pub(crate) fn plan(&self, start_line: u64, limit: NonZeroUsize) -> Result<Option<ReadPlan>> {
        if start_line >= self.total_lines() {
            return Ok(None);
        }
        let (offset, first_line) = self
            .offsets()
            .locate(start_line, self.chunk_size())
            .ok_or_else(|| {
                IndexError::io(
                    self.path(),
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("offset table does not cover line {start_line}"),
                    ),
                )
            })?;
        let available = self.total_lines() - start_line;
        let quota = usize::try_from(available).map_or(limit.get(), |n| n.min(limit.get()));
        Ok(Some(ReadPlan {
            offset,
            first_line,
            start_line,
            quota,
        }))
    }

    /// Open a fresh read session yielding lines `start_line..` lazily
    ///
    /// The cursor owns its file handle and releases it when dropped or
    /// exhausted. Past the end of the data it yields nothing and never
    /// touches the file.
    pub fn cursor(&self, start_line: u64, limit: NonZeroUsize) -> Result<LineCursor> {
        let Some(plan) = self.plan(start_line, limit)? else {
            return Ok(LineCursor::exhausted(self.path().to_path_buf()));
        };
        let path = self.path().to_path_buf();
        let mut file = File::open(&path).map_err(|e| IndexError::io(&path, e))?;
        file.seek(SeekFrom::Start(plan.offset))
            .map_err(|e| IndexError::io(&path, e))?;
        Ok(LineCursor {
            reader: Some(BufReader::new(file)),
            path,
            to_skip: plan.lines_to_skip(),
            remaining: plan.quota,
            buf: Vec::new(),
        })
    }

    /// Up to `limit` lines starting exactly at `start_line`, in file order
    ///
    /// Returns an empty vector when `start_line >= total_lines`. A read
    /// failure, or the file ending before the expected count, is an error;
    /// a shortened result is never returned.
    pub fn get_lines(&self, start_line: u64, limit: NonZeroUsize) -> Result<Vec<String>> {
        let cursor = self.cursor(start_line, limit)?;
        let mut lines = Vec::with_capacity(cursor.remaining);
        for line in cursor {
            lines.push(line?);
        }
        Ok(lines)
    }
}

/// Lazy, finite and non-restartable sequence of lines from one read session
#[derive(Debug)]
pub struct LineCursor {
    reader: Option<BufReader<File>>,
    path: PathBuf,
    to_skip: u64,
    remaining: usize,
    buf: Vec<u8>,
}

impl LineCursor {
    fn exhausted(path: PathBuf) -> Self {
        Self {
            reader: None,
            path,
            to_skip: 0,
            remaining: 0,
            buf: Vec::new(),
        }
    }

    /// Lines this cursor will still yield if no read fails
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn advance(&mut self) -> io::Result<String> {
        let Some(reader) = self.reader.as_mut() else {
            return Err(truncated());
        };
        while self.to_skip > 0 {
            if reader.skip_until(b'\n')? == 0 {
                return Err(truncated());
            }
            self.to_skip -= 1;
        }
        self.buf.clear();
        if reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Err(truncated());
        }
        Ok(decode_line(&mut self.buf))
    }
}

impl Iterator for LineCursor {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.reader = None;
            return None;
        }
        match self.advance() {
            Ok(line) => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.reader = None;
                }
                Some(Ok(line))
            }
            Err(e) => {
                self.remaining = 0;
                self.reader = None;
                Some(Err(IndexError::io(&self.path, e)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

pub(crate) fn truncated() -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "file ended before the indexed line count",
    )
}

/// Strip `\n` or `\r\n` and decode, replacing invalid UTF-8
pub(crate) fn decode_line(raw: &mut Vec<u8>) -> String {
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    match String::from_utf8(std::mem::take(raw)) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
