//! # MurmurHash3
//!
//! Streaming implementations of the three **MurmurHash3** variants:
//!
//! | Type              | Block | Digest | Seed  |
//! |-------------------|-------|--------|-------|
//! | [`Murmur3x86_32`]  | 4     | 4      | `u32` |
//! | [`Murmur3x86_128`] | 16    | 16     | `u32` |
//! | [`Murmur3x64_128`] | 16    | 16     | `u64` |
//!
//! Each hasher accepts input in any number of `update` calls of any size, and
//! produces the same digest as a single call over the concatenated input.
//!
//! **Note**: MurmurHash3 is **not** cryptographically secure. The seed is not
//! a key; do not use these digests as MACs or against adversarial input.
//!
//! # Usage
//! ```rust
//! use murmur3::{Murmur3x64_128, StreamingHasher};
//!
//! let mut hasher = Murmur3x64_128::new(123);
//! hasher.update(b"Hello, ");
//! hasher.update(b"world!");
//! let digest = hasher.finalize();
//!
//! assert_eq!(digest, Murmur3x64_128::hash(123, b"Hello, world!"));
//! assert_eq!(digest.to_hex(), "adac4387738c1c42f5c373d3fd3297f1");
//! ```

mod block;
pub mod builder;
pub mod digest;
pub mod verify;
pub mod x64_128;
pub mod x86_128;
pub mod x86_32;

pub use builder::{Murmur3BuildHasher, Murmur3Builder, Murmur3Hasher, Murmur3Variant};
pub use digest::{Digest, Digest128, Digest32};
pub use verify::{
    verification_value, verify, X64_128_VERIFICATION, X86_128_VERIFICATION, X86_32_VERIFICATION,
};
pub use x64_128::Murmur3x64_128;
pub use x86_128::Murmur3x86_128;
pub use x86_32::Murmur3x86_32;

/// The Init/Update/Final shape shared by every variant.
///
/// `finalize` does not consume or disturb the stream: the hasher stays valid
/// and later `update` calls continue where the stream left off. Use
/// [`finalize_reset`](StreamingHasher::finalize_reset) to start over with the
/// same seed.
pub trait StreamingHasher: Sized {
    /// Bytes consumed per mixing step.
    const BLOCK_SIZE: usize;

    /// Bytes in the produced digest.
    const DIGEST_SIZE: usize;

    /// Seed type; stored verbatim and never changed after construction.
    type Seed: Copy + From<u32>;

    /// The digest type returned by [`finalize`](StreamingHasher::finalize).
    type Output: AsRef<[u8]> + Copy;

    /// Creates a hasher whose accumulators start at `seed`.
    fn new(seed: Self::Seed) -> Self;

    /// The seed this hasher was created with.
    fn seed(&self) -> Self::Seed;

    /// Returns to the state of a fresh hasher with the same seed.
    fn reset(&mut self);

    /// Appends `data` to the stream.
    fn update(&mut self, data: &[u8]);

    /// Digest of everything passed to `update` so far.
    fn finalize(&self) -> Self::Output;

    /// Produces the digest, then resets the hasher.
    fn finalize_reset(&mut self) -> Self::Output {
        let digest = self.finalize();
        self.reset();
        digest
    }

    /// Builder-style `update`.
    fn chain(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data.as_ref());
        self
    }

    /// One-shot hash of `data`.
    fn hash(seed: Self::Seed, data: &[u8]) -> Self::Output {
        let mut hasher = Self::new(seed);
        hasher.update(data);
        hasher.finalize()
    }
}
