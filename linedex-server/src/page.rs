use std::num::NonZeroUsize;

pub const DEFAULT_LIMIT: usize = 50;
pub const FALLBACK_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

/// Validated `skip` / `limit` pair handed to the line reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub skip: u64,
    pub limit: NonZeroUsize,
}

impl PageParams {
    /// Normalize raw query values
    ///
    /// - `skip`: missing or unparseable is 0, negative is clamped to 0
    /// - `limit`: missing or unparseable is 50, zero or negative is 10,
    ///   anything above 100 is 100
    pub fn from_raw(skip: Option<&str>, limit: Option<&str>) -> Self {
        let skip = skip
            .and_then(parse_leading_int)
            .map_or(0, |n| u64::try_from(n).unwrap_or(0));

        let limit = match limit.and_then(parse_leading_int) {
            None => DEFAULT_LIMIT,
            Some(n) if n <= 0 => FALLBACK_LIMIT,
            Some(n) => usize::try_from(n).map_or(MAX_LIMIT, |n| n.min(MAX_LIMIT)),
        };

        Self {
            skip,
            limit: NonZeroUsize::new(limit).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Lenient integer parse: optional leading whitespace and sign, then digits;
/// anything after the digits is ignored. Saturates instead of overflowing.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
