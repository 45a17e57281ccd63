//! Seed handling for reproducible caves.
//!
//! Text seeds hash to the same 64-bit value on every platform, so a seed
//! string typed into a config always reproduces the same cave.

use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit generation seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaveSeed(u64);

impl CaveSeed {
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Hashes a text seed with FNV-1a.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in text.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash)
    }

    /// Fresh seed from the thread-local RNG, for "surprise me" generation.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for CaveSeed {
    fn from(seed: u64) -> Self {
        Self(seed)
    }
}

impl From<&str> for CaveSeed {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
