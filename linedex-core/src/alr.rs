use std::io::{self, SeekFrom};
use std::num::NonZeroUsize;

use tokio::fs::File;
use memchr::memchr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncSeekExt, BufReader};

use crate::err::{IndexError, Result};
use crate::lcr::{decode_line, truncated};
use crate::lix::LineIndex;

impl LineIndex {
    /// Async twin of [`LineIndex::get_lines`]
    ///
    /// Same contract. Dropping the returned future (a client disconnecting,
    /// say) closes the read session at once; the index itself is untouched.
    pub async fn get_lines_async(
        &self,
        start_line: u64,
        limit: NonZeroUsize,
    ) -> Result<Vec<String>> {
        let Some(plan) = self.plan(start_line, limit)? else {
            return Ok(Vec::new());
        };
        let path = self.path();
        let mut file = File::open(path).await.map_err(|e| IndexError::io(path, e))?;
        file.seek(SeekFrom::Start(plan.offset))
            .await
            .map_err(|e| IndexError::io(path, e))?;
        let mut reader = BufReader::new(file);

        for _ in 0..plan.lines_to_skip() {
            let skipped = skip_line(&mut reader)
                .await
                .map_err(|e| IndexError::io(path, e))?;
            if skipped == 0 {
                return Err(IndexError::io(path, truncated()));
            }
        }

        let mut buf = Vec::new();

        let mut lines = Vec::with_capacity(plan.quota);
        while lines.len() < plan.quota {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| IndexError::io(path, e))?;
            if read == 0 {
                return Err(IndexError::io(path, truncated()));
            }
            lines.push(decode_line(&mut buf));
        }
        Ok(lines)
    }
}

/// Consume one line, terminator included, without buffering it; returns
/// the bytes consumed (0 at EOF)
async fn skip_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<usize> {
    let mut consumed = 0;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(consumed);
        }
        match memchr(b'\n', available) {
            Some(nl) => {
                reader.consume(nl + 1);
                return Ok(consumed + nl + 1);
            }
            None => {
                let n = available.len();
                reader.consume(n);
                consumed += n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IndexBuilder, IndexConfig};

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[tokio::test]
    async fn async_reads_match_blocking_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        let content: String = (0..250).map(|i| format!("name {i}\r\n")).collect();
        std::fs::write(&path, content).unwrap();

        let index = IndexBuilder::new(IndexConfig::with_chunk_size(16))
            .unwrap()
            .build(&path)
            .unwrap();

        for (start, n) in [(0, 1), (15, 3), (16, 16), (100, 50), (240, 50), (249, 1)] {
            let blocking = index.get_lines(start, limit(n)).unwrap();
            let nonblocking = index.get_lines_async(start, limit(n)).await.unwrap();
            assert_eq!(blocking, nonblocking, "start {start} limit {n}");
        }
        assert!(index.get_lines_async(250, limit(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn long_skipped_lines_are_stepped_over() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.txt");
        let wide = "w".repeat(300_000);
        let content = format!("head\n{wide}\n{}\nkeep\ntail", "v".repeat(20_000));
        std::fs::write(&path, content).unwrap();

        let index = IndexBuilder::new(IndexConfig::with_chunk_size(4))
            .unwrap()
            .build(&path)
            .unwrap();
        let lines = index.get_lines_async(3, limit(5)).await.unwrap();
        assert_eq!(lines, vec!["keep", "tail"]);
        assert_eq!(lines, index.get_lines(3, limit(5)).unwrap());
    }

    #[tokio::test]
    async fn skip_line_counts_the_terminator() {
        let mut reader = BufReader::with_capacity(2, &b"abc\nd"[..]);
        assert_eq!(skip_line(&mut reader).await.unwrap(), 4);
        assert_eq!(skip_line(&mut reader).await.unwrap(), 1);
        assert_eq!(skip_line(&mut reader).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn async_read_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "a\nb\n").unwrap();
        let index = LineIndex::build(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = index.get_lines_async(0, limit(2)).await.unwrap_err();
        assert!(err.is_io());
    }
}
