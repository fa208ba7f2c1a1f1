//! Block buffering and little-endian word reads shared by all variants.
//!
//! Input arrives in arbitrarily-sized chunks, but the mixers consume whole
//! blocks. [`BlockBuffer`] carries the bytes that do not yet form a block
//! from one `update` call to the next, so the blocks fed to the mixer are the
//! same no matter how the caller split its input.

/// Holds the pending tail of a stream whose block size is `N` bytes.
///
/// The pending length is always `< N` between calls to [`BlockBuffer::feed`].
#[derive(Debug, Clone)]
pub(crate) struct BlockBuffer<const N: usize> {
    tail: [u8; N],
    tail_len: usize,
}

impl<const N: usize> BlockBuffer<N> {
    pub(crate) const fn new() -> Self {
        Self {
            tail: [0u8; N],
            tail_len: 0,
        }
    }

    /// Drops any pending bytes.
    pub(crate) fn clear(&mut self) {
        self.tail = [0u8; N];
        self.tail_len = 0;
    }

    /// The pending bytes, fewer than one block.
    pub(crate) fn tail(&self) -> &[u8] {
        &self.tail[..self.tail_len]
    }

    /// Appends `data` to the stream, calling `mix` once per completed block
    /// in stream order. Leftover bytes are kept for the next call.
    pub(crate) fn feed(&mut self, mut data: &[u8], mut mix: impl FnMut(&[u8; N])) {
        if self.tail_len != 0 {
            let fill = (N - self.tail_len).min(data.len());
            let head;
            (head, data) = data.split_at(fill);
            self.tail[self.tail_len..self.tail_len + fill].copy_from_slice(head);
            self.tail_len += fill;
            if self.tail_len < N {
                return;
            }
            mix(&self.tail);
            self.tail_len = 0;
        }

        let blocks = data.chunks_exact(N);
        let rest = blocks.remainder();
        let mut block = [0u8; N];
        for chunk in blocks {
            block.copy_from_slice(chunk);
            mix(&block);
        }

        self.tail[..rest.len()].copy_from_slice(rest);
        self.tail_len = rest.len();
    }
}

impl<const N: usize> Default for BlockBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the `index`-th little-endian `u32` of `block`.
#[inline]
pub(crate) fn read_u32_le(block: &[u8], index: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&block[index * 4..index * 4 + 4]);
    u32::from_le_bytes(word)
}

/// Reads the `index`-th little-endian `u64` of `block`.
#[inline]
pub(crate) fn read_u64_le(block: &[u8], index: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&block[index * 8..index * 8 + 8]);
    u64::from_le_bytes(word)
}

/// Builds a `u32` from up to four trailing bytes: byte `i` lands at bit `8 * i`,
/// absent bytes contribute zero.
#[inline]
pub(crate) fn partial_u32_le(bytes: &[u8]) -> u32 {
    debug_assert!(bytes.len() <= 4);
    bytes
        .iter()
        .enumerate()
        .fold(0u32, |k, (i, &b)| k ^ (u32::from(b) << (8 * i)))
}

/// Builds a `u64` from up to eight trailing bytes, same layout as
/// [`partial_u32_le`].
#[inline]
pub(crate) fn partial_u64_le(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes
        .iter()
        .enumerate()
        .fold(0u64, |k, (i, &b)| k ^ (u64::from(b) << (8 * i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_blocks<const N: usize>(chunks: &[&[u8]]) -> (Vec<[u8; N]>, Vec<u8>) {
        let mut buffer = BlockBuffer::<N>::new();
        let mut blocks = Vec::new();
        for chunk in chunks {
            buffer.feed(chunk, |block| blocks.push(*block));
        }
        (blocks, buffer.tail().to_vec())
    }

    #[test]
    fn test_feed_whole_blocks() {
        let data: Vec<u8> = (0..8).collect();
        let (blocks, tail) = collect_blocks::<4>(&[&data]);
        assert_eq!(blocks, vec![[0, 1, 2, 3], [4, 5, 6, 7]]);
        assert!(tail.is_empty());
    }

    #[test]
    fn test_feed_carries_tail_across_calls() {
        let (blocks, tail) = collect_blocks::<4>(&[&[0, 1], &[2], &[3, 4, 5, 6, 7, 8]]);
        assert_eq!(blocks, vec![[0, 1, 2, 3], [4, 5, 6, 7]]);
        assert_eq!(tail, vec![8]);
    }

    #[test]
    fn test_feed_short_chunk_stays_pending() {
        let (blocks, tail) = collect_blocks::<16>(&[&[1, 2, 3], &[], &[4, 5]]);
        assert!(blocks.is_empty());
        assert_eq!(tail, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_feed_matches_single_call_for_every_split() {
        let data: Vec<u8> = (0..53).collect();
        let (expected_blocks, expected_tail) = collect_blocks::<16>(&[&data]);
        for split in 0..=data.len() {
            let (a, b) = data.split_at(split);
            let (blocks, tail) = collect_blocks::<16>(&[a, b]);
            assert_eq!(blocks, expected_blocks, "split at {split}");
            assert_eq!(tail, expected_tail, "split at {split}");
        }
    }

    #[test]
    fn test_clear() {
        let mut buffer = BlockBuffer::<4>::new();
        buffer.feed(&[9, 9, 9], |_| panic!("no block expected"));
        buffer.clear();
        assert!(buffer.tail().is_empty());
        let mut seen = Vec::new();
        buffer.feed(&[1, 2, 3, 4], |block| seen.push(*block));
        assert_eq!(seen, vec![[1, 2, 3, 4]]);
    }

    #[test]
    fn test_word_reads() {
        let block: Vec<u8> = (1..=16).collect();
        assert_eq!(read_u32_le(&block, 0), 0x04030201);
        assert_eq!(read_u32_le(&block, 3), 0x100f0e0d);
        assert_eq!(read_u64_le(&block, 1), 0x100f0e0d0c0b0a09);
    }

    #[test]
    fn test_partial_reads() {
        assert_eq!(partial_u32_le(&[]), 0);
        assert_eq!(partial_u32_le(&[0xaa]), 0xaa);
        assert_eq!(partial_u32_le(&[0x01, 0x02, 0x03]), 0x030201);
        assert_eq!(partial_u64_le(&[1, 2, 3, 4, 5, 6, 7]), 0x07060504030201);
        assert_eq!(
            partial_u64_le(&[1, 2, 3, 4, 5, 6, 7, 8]),
            read_u64_le(&[1, 2, 3, 4, 5, 6, 7, 8], 0)
        );
    }
}
