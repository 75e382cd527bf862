use std::num::NonZeroUsize;

use linedex_core::{LineIndex, Result, classify};

/// A jump-map entry whose line does not start with its letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterMismatch {
    pub letter: char,
    pub line: u64,
    pub content: Option<String>,
}

/// Re-read the line behind every jump-map entry and check its leading letter
pub fn check_letters(index: &LineIndex) -> Result<Vec<LetterMismatch>> {
    let mut mismatches = Vec::new();
    for (letter, line) in index.letters().iter() {
        let content = index.get_lines(line, NonZeroUsize::MIN)?.pop();
        let found = content.as_deref().and_then(|c| classify(c.as_bytes()));
        if found != Some(letter) {
            tracing::warn!(%letter, line, ?content, "jump map entry does not match its line");
            mismatches.push(LetterMismatch {
                letter,
                line,
                content,
            });
        }
    }
    Ok(mismatches)
}

/// First `sample` lines and `sample` lines from the middle of the file
pub fn sample_lines(
    index: &LineIndex,
    sample: NonZeroUsize,
) -> Result<(Vec<String>, u64, Vec<String>)> {
    let head = index.get_lines(0, sample)?;
    let mid = index.total_lines() / 2;
    let middle = index.get_lines(mid, sample)?;
    Ok((head, mid, middle))
}
