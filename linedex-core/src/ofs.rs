#[cfg(feature = "serde")]
use serde::Serialize;

/// Sparse line offset table: one byte offset per `chunk_size` lines
///
/// `offsets[k]` is the byte position where line `k * chunk_size` begins.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTable {
    // u64 so files past 4 GiB stay addressable
    offsets: Vec<u64>,
}

impl OffsetTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append the start of the next chunk; offsets must strictly increase
    pub(crate) fn push(&mut self, offset: u64) {
        debug_assert!(
            self.offsets.last().is_none_or(|&last| last < offset),
            "offset table must be strictly increasing"
        );
        debug_assert!(!self.offsets.is_empty() || offset == 0);
        self.offsets.push(offset);
    }

    /// Byte offset of the first line of chunk `chunk`
    pub fn get(&self, chunk: usize) -> Option<u64> {
        self.offsets.get(chunk).copied()
    }

    /// Chunk index and starting line for `line`, given the chunk size used to build
    pub fn locate(&self, line: u64, chunk_size: usize) -> Option<(u64, u64)> {
        let chunk = line / chunk_size as u64;
        let offset = self.get(usize::try_from(chunk).ok()?)?;
        Some((offset, chunk * chunk_size as u64))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
