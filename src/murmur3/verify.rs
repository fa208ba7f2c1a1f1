//! SMHasher-style chained-keyset verification.
//!
//! Keys `{}`, `{0}`, `{0, 1}`, ..., `{0, 1, .., 254}` are hashed with seed
//! `256 - len`, the 256 digests are concatenated and hashed again with seed 0.
//! The first four bytes of that digest, little-endian, are the verification
//! value. Every tail length of every variant takes part, which is why this is
//! a stronger check than a handful of known-answer vectors.

use crate::error::{Error, Result};

use super::StreamingHasher;

/// Verification value of [`Murmur3x86_32`](super::Murmur3x86_32).
pub const X86_32_VERIFICATION: u32 = 0xB0F57EE3;

/// Verification value of [`Murmur3x86_128`](super::Murmur3x86_128).
pub const X86_128_VERIFICATION: u32 = 0xB3ECE62A;

/// Verification value of [`Murmur3x64_128`](super::Murmur3x64_128).
pub const X64_128_VERIFICATION: u32 = 0x6384BA69;

const KEY_COUNT: usize = 256;

/// Computes the chained-keyset verification value for `H`.
pub fn verification_value<H: StreamingHasher>() -> u32 {
    let key: Vec<u8> = (0..KEY_COUNT - 1).map(|b| b as u8).collect();
    let mut hashes = Vec::with_capacity(KEY_COUNT * H::DIGEST_SIZE);
    for len in 0..KEY_COUNT {
        let seed = H::Seed::from((KEY_COUNT - len) as u32);
        hashes.extend_from_slice(H::hash(seed, &key[..len]).as_ref());
    }

    let digest = H::hash(H::Seed::from(0u32), &hashes);
    let bytes = digest.as_ref();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Checks `H` against its expected verification value.
pub fn verify<H: StreamingHasher>(expected: u32) -> Result<()> {
    let actual = verification_value::<H>();
    log::debug!(
        "murmur3 verification: expected {:#010x}, got {:#010x}",
        expected,
        actual
    );
    if actual == expected {
        Ok(())
    } else {
        Err(Error::Verification { expected, actual })
    }
}
