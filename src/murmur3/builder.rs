//! Runtime variant selection and `std::collections` integration.
//!
//! ```rust
//! use murmur3::{Murmur3Builder, Murmur3Variant};
//! use std::collections::HashMap;
//!
//! let build_hasher = Murmur3Builder::new()
//!     .variant(Murmur3Variant::X64_128)
//!     .seed(12345)
//!     .build();
//!
//! let mut map = HashMap::with_hasher(build_hasher);
//! map.insert("hello", 42);
//! assert_eq!(map.get("hello"), Some(&42));
//! ```

use std::hash::{BuildHasher, Hasher};

use super::{Murmur3x64_128, Murmur3x86_128, Murmur3x86_32, StreamingHasher};

/// Which MurmurHash3 variant to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Murmur3Variant {
    /// 32-bit digest.
    #[default]
    X86_32,
    /// 128-bit digest from four 32-bit lanes.
    X86_128,
    /// 128-bit digest from two 64-bit lanes.
    X64_128,
}

impl Murmur3Variant {
    /// Digest size in bytes.
    pub const fn digest_size(self) -> usize {
        match self {
            Murmur3Variant::X86_32 => Murmur3x86_32::DIGEST_SIZE,
            Murmur3Variant::X86_128 => Murmur3x86_128::DIGEST_SIZE,
            Murmur3Variant::X64_128 => Murmur3x64_128::DIGEST_SIZE,
        }
    }
}

/// Builder for [`Murmur3BuildHasher`]: pick the variant and seed.
#[derive(Debug, Clone, Default)]
pub struct Murmur3Builder {
    variant: Murmur3Variant,
    seed: u32,
}

impl Murmur3Builder {
    /// Creates a builder for x86_32 with seed 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, variant: Murmur3Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the seed. The x64_128 variant zero-extends it to 64 bits.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Murmur3BuildHasher {
        log::debug!(
            "murmur3: building {:?} hasher factory with seed {}",
            self.variant,
            self.seed
        );
        Murmur3BuildHasher {
            variant: self.variant,
            seed: self.seed,
        }
    }
}

/// A `BuildHasher` producing [`Murmur3Hasher`]s, for `HashMap`, `HashSet`, etc.
#[derive(Debug, Clone, Default)]
pub struct Murmur3BuildHasher {
    variant: Murmur3Variant,
    seed: u32,
}

impl Murmur3BuildHasher {
    pub fn variant(&self) -> Murmur3Variant {
        self.variant
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl BuildHasher for Murmur3BuildHasher {
    type Hasher = Murmur3Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Murmur3Hasher::new(self.variant, self.seed)
    }
}

/// A `std::hash::Hasher` over whichever variant was selected.
#[derive(Debug, Clone)]
pub enum Murmur3Hasher {
    X86_32(Murmur3x86_32),
    X86_128(Murmur3x86_128),
    X64_128(Murmur3x64_128),
}

impl Murmur3Hasher {
    pub fn new(variant: Murmur3Variant, seed: u32) -> Self {
        match variant {
            Murmur3Variant::X86_32 => Murmur3Hasher::X86_32(Murmur3x86_32::new(seed)),
            Murmur3Variant::X86_128 => Murmur3Hasher::X86_128(Murmur3x86_128::new(seed)),
            Murmur3Variant::X64_128 => {
                Murmur3Hasher::X64_128(Murmur3x64_128::new(u64::from(seed)))
            }
        }
    }

    pub fn variant(&self) -> Murmur3Variant {
        match self {
            Murmur3Hasher::X86_32(_) => Murmur3Variant::X86_32,
            Murmur3Hasher::X86_128(_) => Murmur3Variant::X86_128,
            Murmur3Hasher::X64_128(_) => Murmur3Variant::X64_128,
        }
    }

    /// The full digest bytes of the selected variant.
    pub fn digest_bytes(&self) -> Vec<u8> {
        match self {
            Murmur3Hasher::X86_32(h) => h.finalize().as_ref().to_vec(),
            Murmur3Hasher::X86_128(h) => h.finalize().as_ref().to_vec(),
            Murmur3Hasher::X64_128(h) => h.finalize().as_ref().to_vec(),
        }
    }
}

impl Hasher for Murmur3Hasher {
    fn write(&mut self, bytes: &[u8]) {
        match self {
            Murmur3Hasher::X86_32(h) => h.update(bytes),
            Murmur3Hasher::X86_128(h) => h.update(bytes),
            Murmur3Hasher::X64_128(h) => h.update(bytes),
        }
    }

    fn finish(&self) -> u64 {
        match self {
            Murmur3Hasher::X86_32(h) => h.finish(),
            Murmur3Hasher::X86_128(h) => h.finish(),
            Murmur3Hasher::X64_128(h) => h.finish(),
        }
    }
}
