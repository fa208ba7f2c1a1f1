//! Fixed-size digest values.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The output of a finished hash: `N` bytes, accumulator words laid out
/// little-endian in order (`h1` first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest<const N: usize>([u8; N]);

/// 32-bit digest produced by [`Murmur3x86_32`](super::Murmur3x86_32).
pub type Digest32 = Digest<4>;

/// 128-bit digest produced by the two 128-bit variants.
pub type Digest128 = Digest<16>;

impl<const N: usize> Digest<N> {
    /// Size of the digest in bytes.
    pub const SIZE: usize = N;

    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; N] {
        self.0
    }

    /// Lowercase hex of the bytes in output order.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The digest read back as little-endian `u32` words.
    ///
    /// For the 128-bit variants this gives `h1..h4` (x86) or the low and high
    /// halves of `h1`, `h2` (x64).
    pub fn words_u32(&self) -> Vec<u32> {
        self.0
            .chunks_exact(4)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
            .collect()
    }
}

impl Digest<4> {
    /// The 32-bit hash value.
    pub fn as_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl Digest<16> {
    /// The whole digest as one little-endian `u128`.
    pub fn as_u128(&self) -> u128 {
        u128::from_le_bytes(self.0)
    }

    /// The first eight bytes as a little-endian `u64` (`h1` for x64_128).
    pub fn low_u64(&self) -> u64 {
        let mut low = [0u8; 8];
        low.copy_from_slice(&self.0[..8]);
        u64::from_le_bytes(low)
    }

    /// The last eight bytes as a little-endian `u64` (`h2` for x64_128).
    pub fn high_u64(&self) -> u64 {
        let mut high = [0u8; 8];
        high.copy_from_slice(&self.0[8..]);
        u64::from_le_bytes(high)
    }
}

impl<const N: usize> From<[u8; N]> for Digest<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<Digest<N>> for [u8; N] {
    fn from(digest: Digest<N>) -> Self {
        digest.0
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> TryFrom<&[u8]> for Digest<N> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != N {
            return Err(Error::DigestLength {
                expected: N,
                actual: bytes.len(),
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }
}

impl<const N: usize> FromStr for Digest<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl<const N: usize> fmt::LowerHex for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Display for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}
