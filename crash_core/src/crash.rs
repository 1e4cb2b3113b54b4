use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CrashError, CrashResult};

/// One round in `INSTANT_CRASH_MODULUS` busts at 1.00x.
pub const INSTANT_CRASH_MODULUS: u32 = 20;
/// 13 hex digits = 52 bits, the mantissa width of an f64.
pub const MULTIPLIER_HEX_DIGITS: usize = 13;
const E: u64 = 1 << 52;

/// Crash point stored as an exact count of hundredths (`150` is 1.50x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct CrashMultiplier(u64);

impl CrashMultiplier {
    /// 1.00x, the floor of every crash point. Reached both by instant
    /// crashes and by ordinary rounds with a small leading value.
    pub const MIN: Self = Self(100);

    pub fn from_hundredths(hundredths: u64) -> CrashResult<Self> {
        if hundredths < 100 {
            return Err(CrashError::InvalidMultiplier(format!(
                "{hundredths} hundredths is below 1.00x"
            )));
        }
        Ok(Self(hundredths))
    }

    pub fn hundredths(self) -> u64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for CrashMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl From<CrashMultiplier> for f64 {
    fn from(m: CrashMultiplier) -> Self {
        m.as_f64()
    }
}

impl TryFrom<f64> for CrashMultiplier {
    type Error = CrashError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(CrashError::InvalidMultiplier(value.to_string()));
        }
        // Published values are already truncated; rounding absorbs the binary fraction.
        Self::from_hundredths((value * 100.0).round() as u64)
    }
}

fn parse_hex(chunk: &str) -> CrashResult<u64> {
    let invalid = || CrashError::InvalidHex {
        chunk: chunk.to_string(),
    };
    // from_str_radix alone would accept a leading '+'
    if !chunk.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u64::from_str_radix(chunk, 16).map_err(|_| invalid())
}

/// Reduce the whole hash, 16 bits at a time, modulo `modulus`; zero means instant crash.
///
/// When the length is not a multiple of four the walk starts at `o - 4`, a
/// negative index that clamps to zero, so the first chunk is the leading `o`
/// characters and every later chunk is aligned to the end of the hash.
pub fn should_insta_crash(hash: &str, modulus: u32) -> CrashResult<bool> {
    if modulus == 0 {
        return Err(CrashError::ZeroModulus);
    }
    let len = hash.len() as isize;
    let o = len % 4;
    let mut i = if o > 0 { o - 4 } else { 0 };
    let modulus = u64::from(modulus);
    let mut val = 0u64;
    while i < len {
        let start = i.max(0) as usize;
        let end = (i + 4).min(len) as usize;
        let chunk = hash.get(start..end).ok_or_else(|| CrashError::InvalidHex {
            chunk: hash.to_string(),
        })?;
        val = ((val << 16) + parse_hex(chunk)?) % modulus;
        i += 4;
    }
    Ok(val == 0)
}

/// Whether the round hash is forced to bust at 1.00x.
pub fn is_instant_crash(hash: &str) -> CrashResult<bool> {
    should_insta_crash(hash, INSTANT_CRASH_MODULUS)
}

/// Crash point for a round hash. Instant crashes short-circuit to 1.00x;
/// otherwise `floor((100e - h) / (e - h)) / 100` with `h` the leading 52 bits.
pub fn crash_point(hash: &str) -> CrashResult<CrashMultiplier> {
    if hash.len() < MULTIPLIER_HEX_DIGITS {
        return Err(CrashError::MalformedHash { len: hash.len() });
    }
    // a multi-byte character straddling the window is not hex either
    let head = hash
        .get(..MULTIPLIER_HEX_DIGITS)
        .ok_or_else(|| CrashError::InvalidHex {
            chunk: hash.to_string(),
        })?;
    let h = parse_hex(head)?;

    if is_instant_crash(hash)? {
        trace!(hash, "instant crash");
        return Ok(CrashMultiplier::MIN);
    }

    // h < e, so the quotient is at least 100.
    let hundredths = (100 * E - h) / (E - h);
    CrashMultiplier::from_hundredths(hundredths)
}
