//! Error type shared by the fallible edges of the crate.
//!
//! Hashing itself never fails: every byte sequence and every seed is valid
//! input. Errors only arise when digests are parsed back from external
//! representations or when a self-verification run disagrees with its
//! expected constant.

use thiserror::Error;

/// Errors returned by digest parsing and self-verification.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The input was not valid hexadecimal.
    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The decoded byte count does not match the digest size.
    #[error("digest length mismatch: expected {expected} bytes, got {actual}")]
    DigestLength { expected: usize, actual: usize },

    /// The chained-keyset verification value did not match.
    #[error("verification failed: expected {expected:#010x}, got {actual:#010x}")]
    Verification { expected: u32, actual: u32 },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
