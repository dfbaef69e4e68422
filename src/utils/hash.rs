//! Unified hashing utilities using FxHash.
//!
//! Used for change detection (config reload) where a fast, deterministic
//! 64-bit digest is enough.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let h = hash::compute("some content"); // -> u64
//! ```

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}
