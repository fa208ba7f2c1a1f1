//! MurmurHash3 **x86_32**: one 32-bit accumulator, 4-byte blocks, 4-byte digest.

use std::hash::Hasher;
use std::io;

use super::block::{partial_u32_le, read_u32_le, BlockBuffer};
use super::digest::Digest32;
use super::StreamingHasher;

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

const BLOCK_SIZE: usize = 4;

/// Streaming MurmurHash3 x86_32 state.
#[derive(Debug, Clone)]
pub struct Murmur3x86_32 {
    seed: u32,
    h1: u32,
    /// Total bytes seen, modulo 2^32.
    length: u32,
    buffer: BlockBuffer<BLOCK_SIZE>,
}

impl Murmur3x86_32 {
    /// Creates a hasher seeded with `seed`.
    pub const fn new(seed: u32) -> Self {
        Self {
            seed,
            h1: seed,
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

impl Default for Murmur3x86_32 {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
fn mix_block(h1: u32, block: &[u8; BLOCK_SIZE]) -> u32 {
    let k1 = read_u32_le(block, 0);
    (h1 ^ scramble(k1))
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe6546b64)
}

#[inline]
fn mix_tail(mut h1: u32, tail: &[u8], length: u32) -> u32 {
    if !tail.is_empty() {
        h1 ^= scramble(partial_u32_le(tail));
    }
    fmix32(h1 ^ length)
}

/// 32-bit avalanche; also used by the x86_128 variant.
#[inline]
pub(crate) fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

impl StreamingHasher for Murmur3x86_32 {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    const DIGEST_SIZE: usize = 4;

    type Seed = u32;
    type Output = Digest32;

    fn new(seed: u32) -> Self {
        Murmur3x86_32::new(seed)
    }

    fn seed(&self) -> u32 {
        self.seed
    }

    fn reset(&mut self) {
        self.h1 = self.seed;
        self.length = 0;
        self.buffer.clear();
    }

    fn update(&mut self, data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u32);
        let h1 = &mut self.h1;
        self.buffer.feed(data, |block| *h1 = mix_block(*h1, block));
    }

    fn finalize(&self) -> Digest32 {
        let tail = self.buffer.tail();
        log::trace!(
            "murmur3 x86_32: finalizing {} bytes ({} in tail)",
            self.length,
            tail.len()
        );
        Digest32::from_bytes(mix_tail(self.h1, tail, self.length).to_le_bytes())
    }
}

impl Hasher for Murmur3x86_32 {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    /// The 32-bit digest, zero-extended.
    fn finish(&self) -> u64 {
        u64::from(self.finalize().as_u32())
    }
}

impl io::Write for Murmur3x86_32 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
