#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeMap, Serializer};

const LETTERS: usize = 26;

/// First line number for each leading letter `A`-`Z`
///
/// Entries are write-once: the first line that classifies to a letter wins
/// and later lines never overwrite it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterJumpMap {
    first: [Option<u64>; LETTERS],
}

impl LetterJumpMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `line` for `letter` unless the letter was already seen
    ///
    /// Returns true when the entry was written.
    pub(crate) fn record(&mut self, letter: char, line: u64) -> bool {
        let Some(slot) = slot_of(letter) else {
            return false;
        };
        match self.first[slot] {
            Some(_) => false,
            None => {
                self.first[slot] = Some(line);
                true
            }
        }
    }

    /// First line starting with `letter` (case-insensitive)
    pub fn get(&self, letter: char) -> Option<u64> {
        let upper = single_upper(letter)?;
        self.first[slot_of(upper)?]
    }

    /// Recorded letters in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.first
            .iter()
            .enumerate()
            .filter_map(|(slot, line)| line.map(|line| ((b'A' + slot as u8) as char, line)))
    }

    pub fn len(&self) -> usize {
        self.first.iter().filter(|line| line.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.first.iter().all(Option::is_none)
    }

    /// True once every letter has an entry; later lines cannot change the map
    pub(crate) fn is_full(&self) -> bool {
        self.first.iter().all(Option::is_some)
    }
}

#[cfg(feature = "serde")]
impl Serialize for LetterJumpMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        let mut key = [0u8; 4];
        for (letter, line) in self.iter() {
            map.serialize_entry(letter.encode_utf8(&mut key), &line)?;
        }
        map.end()
    }
}

/// Leading letter of a line: trim leading whitespace, upper-case the first
/// character and keep it only if that yields exactly one of `A`-`Z`
pub fn classify(content: &[u8]) -> Option<char> {
    let mut lead = LeadChar::default();
    lead.push(content);
    lead.take().and_then(letter_of)
}

/// `c` upper-cased, if that is exactly one of `A`-`Z`
pub(crate) fn letter_of(c: char) -> Option<char> {
    let upper = single_upper(c)?;
    slot_of(upper).map(|_| upper)
}

/// Incremental decoder for the first visible character of a line
///
/// Bytes may arrive in any number of pieces. Leading whitespace (Unicode
/// whitespace plus U+FEFF) is dropped as it is seen and at most one partial
/// UTF-8 sequence is held, so the state never exceeds four bytes no matter
/// how long the line is. Invalid UTF-8 resolves to U+FFFD, as a lossy
/// decode of the whole line would.
#[derive(Debug, Default)]
pub(crate) struct LeadChar {
    pending: [u8; 4],
    len: usize,
    found: Option<char>,
}

impl LeadChar {
    pub(crate) fn push(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if self.found.is_some() {
                return;
            }
            if self.len == 0 {
                if b.is_ascii() {
                    if !(b.is_ascii_whitespace() || b == 0x0b) {
                        self.found = Some(b as char);
                    }
                    continue;
                }
                if utf8_width(b) == 0 {
                    self.found = Some(char::REPLACEMENT_CHARACTER);
                    continue;
                }
            }
            self.pending[self.len] = b;
            self.len += 1;
            if self.len == utf8_width(self.pending[0]) {
                let decoded = std::str::from_utf8(&self.pending[..self.len])
                    .ok()
                    .and_then(|s| s.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                self.len = 0;
                if !(decoded.is_whitespace() || decoded == '\u{feff}') {
                    self.found = Some(decoded);
                }
            }
        }
    }

    /// End of line: the first visible character, then reset for the next line
    pub(crate) fn take(&mut self) -> Option<char> {
        let truncated = self.len > 0;
        let found = self.found.take();
        self.len = 0;
        found.or(truncated.then_some(char::REPLACEMENT_CHARACTER))
    }

    /// Bytes currently held
    pub(crate) fn buffered(&self) -> usize {
        self.len
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}

fn single_upper(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    let first = upper.next()?;
    upper.next().is_none().then_some(first)
}

fn slot_of(letter: char) -> Option<usize> {
    letter
        .is_ascii_uppercase()
        .then(|| (letter as u8 - b'A') as usize)
}
