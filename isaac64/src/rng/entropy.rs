//! System entropy for unseeded construction
//!
//! Each 64-byte block is SHA-512 over a fresh random (v4) UUID and the block
//! index. The UUID carries the operating system randomness; the hash spreads
//! it over full-width words and hides the fixed UUID version bits.

use sha2::{Digest, Sha512};
use uuid::Uuid;

/// Bytes of entropy gathered for [`Seed::Entropy`](super::Seed::Entropy)
pub(crate) const ENTROPY_BYTES: usize = 2048;

const BLOCK_BYTES: usize = 64;

/// Gather [`ENTROPY_BYTES`] bytes of system entropy
pub(crate) fn gather() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(ENTROPY_BYTES);
    for block in 0..(ENTROPY_BYTES / BLOCK_BYTES) as u64 {
        let mut hasher = Sha512::new();
        hasher.update(Uuid::new_v4().as_bytes());
        hasher.update(block.to_le_bytes());
        bytes.extend_from_slice(&hasher.finalize());
    }
    bytes
}
