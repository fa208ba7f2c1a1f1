//! MurmurHash3 **x86_128**: four 32-bit accumulators, 16-byte blocks,
//! 16-byte digest.
//!
//! Lane `i` of a block (bytes `4i..4i + 4`) is scrambled with the constant
//! pair `(C[i], C[i + 1])` and mixed into `h[i]`, which then absorbs
//! `h[i + 1]` (wrapping to `h[0]` for the last lane). Lanes are processed in
//! order, so lane 3 already sees the updated `h[0]`.

use std::hash::Hasher;
use std::io;

use super::block::{partial_u32_le, read_u32_le, BlockBuffer};
use super::digest::Digest128;
use super::x86_32::fmix32;
use super::StreamingHasher;

const C: [u32; 4] = [0x239b961b, 0xab0e9789, 0x38b34ae5, 0xa1e38b93];

/// Rotation applied to each lane's key word.
const K_ROTATE: [u32; 4] = [15, 16, 17, 18];

/// Rotation applied to each accumulator after absorbing its key word.
const H_ROTATE: [u32; 4] = [19, 17, 15, 13];

const H_ADD: [u32; 4] = [0x561ccd1b, 0x0bcaa747, 0x96cd1c35, 0x32ac3b17];

const BLOCK_SIZE: usize = 16;
const LANES: usize = 4;

/// Streaming MurmurHash3 x86_128 state.
#[derive(Debug, Clone)]
pub struct Murmur3x86_128 {
    seed: u32,
    h: [u32; LANES],
    /// Total bytes seen, modulo 2^32.
    length: u32,
    buffer: BlockBuffer<BLOCK_SIZE>,
}

impl Murmur3x86_128 {
    /// Creates a hasher with all four accumulators set to `seed`.
    pub const fn new(seed: u32) -> Self {
        Self {
            seed,
            h: [seed; LANES],
            length: 0,
            buffer: BlockBuffer::new(),
        }
    }

    /// Creates a hasher from a signed seed, reinterpreting its bits as `u32`.
    pub const fn from_signed_seed(seed: i32) -> Self {
        Self::new(seed as u32)
    }

    /// Bytes passed to `update` since construction or the last reset, modulo 2^32.
    pub fn total_len(&self) -> u32 {
        self.length
    }
}

impl Default for Murmur3x86_128 {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
fn scramble(lane: usize, k: u32) -> u32 {
    k.wrapping_mul(C[lane])
        .rotate_left(K_ROTATE[lane])
        .wrapping_mul(C[(lane + 1) % LANES])
}

#[inline]
fn mix_block(h: &mut [u32; LANES], block: &[u8; BLOCK_SIZE]) {
    for lane in 0..LANES {
        let k = read_u32_le(block, lane);
        h[lane] = (h[lane] ^ scramble(lane, k))
            .rotate_left(H_ROTATE[lane])
            .wrapping_add(h[(lane + 1) % LANES])
            .wrapping_mul(5)
            .wrapping_add(H_ADD[lane]);
    }
}

/// `h1 += h2 + h3 + h4`, then `h2`, `h3`, `h4` each absorb the new `h1`.
#[inline]
fn cross_add(h: &mut [u32; LANES]) {
    h[0] = h[0]
        .wrapping_add(h[1])
        .wrapping_add(h[2])
        .wrapping_add(h[3]);
    for lane in 1..LANES {
        h[lane] = h[lane].wrapping_add(h[0]);
    }
}

fn mix_tail(mut h: [u32; LANES], tail: &[u8], length: u32) -> [u32; LANES] {
    // Bytes 12..15 feed k4, 8..12 k3, 4..8 k2, 0..4 k1; a lane is mixed
    // only if the tail reaches into it.
    for (lane, bytes) in tail.chunks(4).enumerate() {
        h[lane] ^= scramble(lane, partial_u32_le(bytes));
    }

    for word in h.iter_mut() {
        *word ^= length;
    }
    cross_add(&mut h);
    for word in h.iter_mut() {
        *word = fmix32(*word);
    }
    cross_add(&mut h);
    h
}

impl StreamingHasher for Murmur3x86_128 {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    const DIGEST_SIZE: usize = 16;

    type Seed = u32;
    type Output = Digest128;

    fn new(seed: u32) -> Self {
        Murmur3x86_128::new(seed)
    }

    fn seed(&self) -> u32 {
        self.seed
    }

    fn reset(&mut self) {
        self.h = [self.seed; LANES];
        self.length = 0;
        self.buffer.clear();
    }

    fn update(&mut self, data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u32);
        let h = &mut self.h;
        self.buffer.feed(data, |block| mix_block(h, block));
    }

    fn finalize(&self) -> Digest128 {
        let tail = self.buffer.tail();
        log::trace!(
            "murmur3 x86_128: finalizing {} bytes ({} in tail)",
            self.length,
            tail.len()
        );
        let h = mix_tail(self.h, tail, self.length);
        let mut out = [0u8; 16];
        for (chunk, word) in out.chunks_exact_mut(4).zip(h) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Digest128::from_bytes(out)
    }
}

impl Hasher for Murmur3x86_128 {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    /// The first eight digest bytes (`h1`, `h2`) as a little-endian `u64`.
    fn finish(&self) -> u64 {
        self.finalize().low_u64()
    }
}

impl io::Write for Murmur3x86_128 {
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
    use crate::murmur3::test_support::{assert_chunking_invariant, pattern};

    #[test]
    fn test_known_answers() {
        let digest = Murmur3x86_128::hash(123, b"Hello, world!");
        assert_eq!(
            digest.words_u32(),
            vec![0x61c9129e, 0x5a1aacd7, 0xa4162162, 0x9e37c886]
        );
        assert_eq!(hex::encode(digest), "9e12c961d7ac1a5a622116a486c8379e");

        let empty = Murmur3x86_128::hash(123, b"");
        assert_eq!(hex::encode(empty), "4552dcfe99e7f32699e7f32699e7f326");

        assert_eq!(Murmur3x86_128::hash(0, b""), Digest128::from_bytes([0; 16]));
    }

    #[test]
    fn test_every_tail_length_is_chunking_invariant() {
        assert_chunking_invariant::<Murmur3x86_128>(123);
        assert_chunking_invariant::<Murmur3x86_128>(u32::MAX);
    }

    #[test]
    fn test_each_tail_byte_matters() {
        // Flipping any byte of a 15-byte tail changes the digest, so every
        // lane of the tail cascade participates.
        let data = pattern(16 + 15);
        let base = Murmur3x86_128::hash(7, &data);
        for i in 16..data.len() {
            let mut flipped = data.clone();
            flipped[i] ^= 0x01;
            assert_ne!(Murmur3x86_128::hash(7, &flipped), base, "byte {i}");
        }
    }

    #[test]
    fn test_state_reuse() {
        let mut hasher = Murmur3x86_128::new(123);
        hasher.update(b"Hello, ");
        hasher.update(b"world!");
        let first = hasher.finalize_reset();
        assert_eq!(hasher.total_len(), 0);
        hasher.update(b"Hello, world!");
        assert_eq!(hasher.finalize(), first);
    }

    #[test]
    fn test_seed_sensitivity() {
        let data = pattern(45);
        assert_ne!(
            Murmur3x86_128::hash(123, &data),
            Murmur3x86_128::hash(321, &data)
        );
        assert_eq!(
            Murmur3x86_128::from_signed_seed(-2).seed(),
            0xffff_fffe
        );
    }

    #[test]
    fn test_hasher_finish_is_low_half() {
        let mut hasher = Murmur3x86_128::new(123);
        Hasher::write(&mut hasher, b"Hello, world!");
        assert_eq!(hasher.finish(), 0x5a1aacd7_61c9129e);
    }
}
