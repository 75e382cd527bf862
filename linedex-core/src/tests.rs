#[cfg(test)]
mod test_utils {
    // Macro for declarative test setup
    macro_rules! test_suite {
        ($name:ident { $($test:ident $body:block)* }) => {
            mod $name {
                use super::*;
                $(
                    #[test]
                    fn $test() -> Result<(), IndexError> {
                        $body
                        Ok(())
                    }
                )*
            }
        };
    }

    // Macro for writing a fixture file and indexing it with a chunk size
    macro_rules! indexed {
        ($content:expr, chunk = $chunk:expr) => {{
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("fixture.txt");
            std::fs::write(&path, $content).expect("write fixture");
            let index = IndexBuilder::new(IndexConfig::with_chunk_size($chunk))?.build(&path)?;
            (dir, index)
        }};
    }

    pub(crate) use {indexed, test_suite};
}

use crate::*;
use std::num::NonZeroUsize;
use test_utils::*;

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("non-zero")
}

/// Records of `content` by a naive full scan from offset 0
fn naive_lines(content: &[u8]) -> Vec<String> {
    let mut lines: Vec<String> = content
        .split(|&b| b == b'\n')
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            String::from_utf8_lossy(line).into_owned()
        })
        .collect();
    if content.last().is_none_or(|&b| b == b'\n') {
        lines.pop();
    }
    lines
}

fn corpus() -> Vec<u8> {
    let names = ["Åsa", "amir", "  Bea", "\tcyd", "Ünal", "dora\r", "", "eli", "Zoë"];
    let mut out = Vec::new();
    for i in 0..137 {
        out.extend_from_slice(names[i % names.len()].as_bytes());
        out.extend_from_slice(format!(" #{i}").as_bytes());
        out.push(b'\n');
    }
    out.extend_from_slice("Ωmega tail".as_bytes());
    out
}

test_suite!(properties {
    every_line_matches_a_naive_scan {
        let content = corpus();
        let expected = naive_lines(&content);
        for chunk in [1, 7, 64, 1000] {
            let (_dir, index) = indexed!(&content, chunk = chunk);
            assert_eq!(index.total_lines(), expected.len() as u64);
            for (i, line) in expected.iter().enumerate() {
                assert_eq!(&index.get_lines(i as u64, nz(1))?, std::slice::from_ref(line));
            }
        }
    }

    slice_length_is_bounded_by_limit_and_end {
        let content = corpus();
        let (_dir, index) = indexed!(&content, chunk = 10);
        let total = index.total_lines();
        for skip in [0, 5, 9, 10, 11, 100, total - 1, total, total + 3] {
            for limit in [1, 2, 10, 50, 200] {
                let got = index.get_lines(skip, nz(limit))?;
                let want = if skip < total {
                    (limit as u64).min(total - skip) as usize
                } else {
                    0
                };
                assert_eq!(got.len(), want, "skip {skip} limit {limit}");
            }
        }
    }

    rebuilding_is_deterministic {
        let content = corpus();
        let (_dir, first) = indexed!(&content, chunk = 13);
        let second = IndexBuilder::new(IndexConfig::with_chunk_size(13))?.build(first.path())?;
        assert_eq!(first.offsets(), second.offsets());
        assert_eq!(first.letters(), second.letters());
        assert_eq!(first.total_lines(), second.total_lines());
    }

    chunked_reads_reconstruct_the_file {
        let content = corpus();
        let chunk = 16;
        let (_dir, index) = indexed!(&content, chunk = chunk);
        let mut rebuilt = Vec::new();
        let mut start = 0;
        loop {
            let page = index.get_lines(start, nz(chunk))?;
            if page.is_empty() {
                break;
            }
            start += page.len() as u64;
            rebuilt.extend(page);
        }
        assert_eq!(rebuilt, naive_lines(&content));
    }

    letters_point_at_their_first_line {
        let content = corpus();
        let (_dir, index) = indexed!(&content, chunk = 32);
        let lines = naive_lines(&content);
        for (letter, line) in index.letters().iter() {
            let first = lines
                .iter()
                .position(|l| classify(l.as_bytes()) == Some(letter))
                .expect("letter present");
            assert_eq!(first as u64, line);
        }
        insta::assert_snapshot!(
            index.letters().iter().map(|(l, n)| format!("{l}:{n}")).collect::<Vec<_>>().join(" "),
            @"A:1 B:2 C:3 D:5 E:7 Z:8"
        );
    }
});

test_suite!(reference {
    alice_bob_charlie {
        let (_dir, index) = indexed!("Alice\nBob\nCharlie", chunk = 2);
        assert_eq!(index.total_lines(), 3);
        assert_eq!(index.offsets().as_slice(), &[0, 10]);
        assert_eq!(index.line_for_letter('A'), Some(0));
        assert_eq!(index.line_for_letter('B'), Some(1));
        assert_eq!(index.line_for_letter('C'), Some(2));
        assert_eq!(index.get_lines(1, nz(2))?, vec!["Bob", "Charlie"]);
        assert!(index.get_lines(3, nz(5))?.is_empty());
    }

    stats_summarize_the_index {
        let (_dir, index) = indexed!("Alice\nBob\nCharlie", chunk = 2);
        let stats = index.stats();
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.chunk_offsets, 2);
        assert_eq!(stats.byte_len, 17);
        #[cfg(feature = "serde")]
        assert_eq!(
            serde_json::to_string(&stats).expect("json"),
            r#"{"totalLines":3,"chunkSize":2,"chunkOffsets":2,"byteLen":17,"alphabetMap":{"A":0,"B":1,"C":2}}"#
        );
    }
});

#[test]
fn index_is_shareable_across_threads() -> Result<(), IndexError> {
    let content = corpus();
    let (_dir, index) = indexed!(&content, chunk = 8);
    let index = std::sync::Arc::new(index);
    let expected = naive_lines(&content);

    std::thread::scope(|scope| {
        for worker in 0..4u64 {
            let index = index.clone();
            let expected = &expected;
            scope.spawn(move || {
                for start in (worker..index.total_lines()).step_by(4) {
                    let got = index.get_lines(start, nz(3)).expect("read");
                    let end = (start as usize + 3).min(expected.len());
                    assert_eq!(got, expected[start as usize..end]);
                }
            });
        }
    });
    Ok(())
}
