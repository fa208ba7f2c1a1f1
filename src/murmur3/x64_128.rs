//! MurmurHash3 **x64_128**: two 64-bit accumulators, 16-byte blocks,
//! 16-byte digest. This is the variant most other libraries call
//! "murmur3 128".

use std::hash::Hasher;
use std::io;

use super::block::{partial_u64_le, read_u64_le, BlockBuffer};
use super::digest::Digest128;
use super::StreamingHasher;

const C1: u64 = 0x87c37b91114253d5;
const C2: u64 = 0x4cf5ad432745937f;

const BLOCK_SIZE: usize = 16;

/// Streaming MurmurHash3 x64_128 state.
#[derive(Debug, Clone)]
pub struct Murmur3x64_128 {
    seed: u64,
    h1: u64,
    h2: u64,
    length: u64,
    buffer: BlockBuffer<BLOCK_SIZE>,
}

impl Murmur3x64_128 {
    /// Creates a hasher with both accumulators set to `seed`.
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            h1: seed,
            h2: seed,
            length: 0,
            buffer: BlockBuffer::new(),
        }
    }

    /// Creates a hasher from a signed seed, reinterpreting its bits as `u64`.
    pub const fn from_signed_seed(seed: i64) -> Self {
        Self::new(seed as u64)
    }

    /// Bytes passed to `update` since construction or the last reset.
    pub fn total_len(&self) -> u64 {
        self.length
    }
}

impl Default for Murmur3x64_128 {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
fn scramble_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

#[inline]
fn scramble_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

#[inline]
fn mix_block(h1: &mut u64, h2: &mut u64, block: &[u8; BLOCK_SIZE]) {
    let k1 = read_u64_le(block, 0);
    let k2 = read_u64_le(block, 1);

    *h1 = (*h1 ^ scramble_k1(k1))
        .rotate_left(27)
        .wrapping_add(*h2)
        .wrapping_mul(5)
        .wrapping_add(0x52dce729);

    *h2 = (*h2 ^ scramble_k2(k2))
        .rotate_left(31)
        .wrapping_add(*h1)
        .wrapping_mul(5)
        .wrapping_add(0x38495ab5);
}

#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^= k >> 33;
    k
}

fn mix_tail(mut h1: u64, mut h2: u64, tail: &[u8], length: u64) -> (u64, u64) {
    // Bytes 8..15 form k2, bytes 0..8 form k1.
    if tail.len() > 8 {
        h2 ^= scramble_k2(partial_u64_le(&tail[8..]));
    }
    if !tail.is_empty() {
        h1 ^= scramble_k1(partial_u64_le(&tail[..tail.len().min(8)]));
    }

    h1 ^= length;
    h2 ^= length;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix64(h1);
    h2 = fmix64(h2);

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    (h1, h2)
}

impl StreamingHasher for Murmur3x64_128 {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    const DIGEST_SIZE: usize = 16;

    type Seed = u64;
    type Output = Digest128;

    fn new(seed: u64) -> Self {
        Murmur3x64_128::new(seed)
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn reset(&mut self) {
        self.h1 = self.seed;
        self.h2 = self.seed;
        self.length = 0;
        self.buffer.clear();
    }

    fn update(&mut self, data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u64);
        let (h1, h2) = (&mut self.h1, &mut self.h2);
        self.buffer.feed(data, |block| mix_block(h1, h2, block));
    }

    fn finalize(&self) -> Digest128 {
        let tail = self.buffer.tail();
        log::trace!(
            "murmur3 x64_128: finalizing {} bytes ({} in tail)",
            self.length,
            tail.len()
        );
        let (h1, h2) = mix_tail(self.h1, self.h2, tail, self.length);
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&h1.to_le_bytes());
        out[8..].copy_from_slice(&h2.to_le_bytes());
        Digest128::from_bytes(out)
    }
}

impl Hasher for Murmur3x64_128 {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    /// `h1` of the digest.
    fn finish(&self) -> u64 {
        self.finalize().low_u64()
    }
}

impl io::Write for Murmur3x64_128 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::murmur3::test_support::{assert_chunking_invariant, hash_chunked, pattern};

    fn words_hex(digest: Digest128) -> String {
        digest
            .words_u32()
            .iter()
            .map(|w| format!("{w:08x}"))
            .collect()
    }

    #[test]
    fn test_known_answers() {
        let cases: [(u64, &[u8], &str); 4] = [
            (123, b"Hello, world!", "8743acad421c8c73d373c3f5f19732fd"),
            (321, b"Hello, world!", "f86d4004ca47f42bb9546c7979200aee"),
            (
                123,
                b"xxxxxxxxxxxxxxxxxxxxxxxxxxxx",
                "becf7e04dbcf74637751664ef66e73e0",
            ),
            (123, b"", "4cd9597081679d1abd92f8784bace33d"),
        ];
        for (seed, input, expected) in cases {
            assert_eq!(
                words_hex(Murmur3x64_128::hash(seed, input)),
                expected,
                "seed {seed}, input {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_known_answer_bytes() {
        let digest = Murmur3x64_128::hash(123, b"Hello, world!");
        assert_eq!(hex::encode(digest), "adac4387738c1c42f5c373d3fd3297f1");

        let fox = Murmur3x64_128::hash(0, b"The quick brown fox jumps over the lazy dog");
        assert_eq!(fox.to_hex(), "6c1b07bc7bbc4be347939ac4a93c437a");
        assert_eq!(fox.low_u64(), 0xe34bbc7bbc071b6c);
        assert_eq!(fox.high_u64(), 0x7a433ca9c49a9347);
    }

    #[test]
    fn test_every_tail_length_is_chunking_invariant() {
        assert_chunking_invariant::<Murmur3x64_128>(123);
        assert_chunking_invariant::<Murmur3x64_128>(u64::MAX);
    }

    #[test]
    fn test_block_boundaries() {
        let data = pattern(16 * 8);
        let expected = Murmur3x64_128::hash(321, &data);
        for chunk in [15, 16, 17, 31, 32, 33, 64] {
            assert_eq!(hash_chunked::<Murmur3x64_128>(321, &data, chunk), expected);
        }
    }

    #[test]
    fn test_seed_is_full_width() {
        let data = pattern(20);
        let low = Murmur3x64_128::hash(1, &data);
        let high = Murmur3x64_128::hash(1 | (1 << 40), &data);
        assert_ne!(low, high);
        assert_eq!(Murmur3x64_128::from_signed_seed(-1).seed(), u64::MAX);
    }

    #[test]
    fn test_determinism_and_reuse() {
        let mut hasher = Murmur3x64_128::new(123);
        for _ in 0..3 {
            hasher.update(b"Hello, world!");
            assert_eq!(hasher.total_len(), 13);
            assert_eq!(
                words_hex(hasher.finalize_reset()),
                "8743acad421c8c73d373c3f5f19732fd"
            );
        }
    }

    #[test]
    fn test_hasher_finish_is_h1() {
        let mut hasher = Murmur3x64_128::new(0);
        Hasher::write(&mut hasher, b"The quick brown fox jumps over the lazy dog");
        assert_eq!(hasher.finish(), 0xe34bbc7bbc071b6c);
    }
}
