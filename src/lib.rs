pub mod error;
pub mod murmur3;

pub use error::{Error, Result};
pub use murmur3::*;
