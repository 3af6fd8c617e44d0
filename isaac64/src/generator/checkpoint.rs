//! Checkpoint - Save/Load Generator State
//!
//! A [`GeneratorSnapshot`] captures everything needed to resume a stream
//! exactly where it left off: mixing memory, result batch, accumulators,
//! cursor, pending sub-word slices and the draw counter.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored generator continues the original sequence
//! - **Integrity**: the SHA-256 digest must match the recorded fields
//! - **Shape**: array lengths, cursor range and bank sizes are checked

use super::Generator;
use crate::rng::{Isaac64Core, Isaac64Rng, Subword, SubwordBank, STATE_WORDS};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

const SNAPSHOT_TAG: &[u8] = b"isaac64-snapshot-v1";

/// Errors raised while saving or restoring a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),

    #[error("Snapshot field {field} has {actual} entries, expected {expected}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Snapshot cursor {cursor} is outside 0..={limit}")]
    CursorOutOfRange { cursor: usize, limit: usize },

    #[error("Snapshot bank {field} holds {len} slices, capacity is {capacity}")]
    BankOverflow {
        field: &'static str,
        len: usize,
        capacity: usize,
    },

    #[error("Snapshot digest mismatch: recorded {recorded}, computed {computed}")]
    DigestMismatch { recorded: String, computed: String },
}

/// Complete generator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSnapshot {
    pub state: Vec<u64>,
    pub results: Vec<u64>,
    pub a: u64,
    pub b: u64,
    pub c: u64,
    /// Unconsumed words left in `results`
    pub cursor: usize,
    /// Pending slices per width, bottom of the stack first
    pub bank32: Vec<u32>,
    pub bank16: Vec<u16>,
    pub bank8: Vec<u8>,
    pub words_drawn: u64,
    /// SHA-256 over all other fields
    pub digest: String,
}

impl GeneratorSnapshot {
    /// Compute the digest of every field except `digest`
    pub fn compute_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(SNAPSHOT_TAG);
        for words in [&self.state, &self.results] {
            hasher.update((words.len() as u64).to_le_bytes());
            for word in words {
                hasher.update(word.to_le_bytes());
            }
        }
        for scalar in [self.a, self.b, self.c, self.cursor as u64, self.words_drawn] {
            hasher.update(scalar.to_le_bytes());
        }
        hasher.update((self.bank32.len() as u64).to_le_bytes());
        for slice in &self.bank32 {
            hasher.update(slice.to_le_bytes());
        }
        hasher.update((self.bank16.len() as u64).to_le_bytes());
        for slice in &self.bank16 {
            hasher.update(slice.to_le_bytes());
        }
        hasher.update((self.bank8.len() as u64).to_le_bytes());
        hasher.update(&self.bank8);
        format!("{:x}", hasher.finalize())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::Serialization(e.to_string()))
    }
}

fn words_array(field: &'static str, words: &[u64]) -> Result<[u64; STATE_WORDS], CheckpointError> {
    if words.len() != STATE_WORDS {
        return Err(CheckpointError::WrongLength {
            field,
            expected: STATE_WORDS,
            actual: words.len(),
        });
    }
    let mut array = [0u64; STATE_WORDS];
    array.copy_from_slice(words);
    Ok(array)
}

fn bank<T, const N: usize>(
    field: &'static str,
    pending: &[T],
) -> Result<SubwordBank<T, N>, CheckpointError>
where
    T: Subword,
{
    SubwordBank::from_slice(pending).ok_or(CheckpointError::BankOverflow {
        field,
        len: pending.len(),
        capacity: SubwordBank::<T, N>::capacity(),
    })
}

impl Isaac64Rng {
    /// Capture the full generator state
    pub fn snapshot(&self) -> GeneratorSnapshot {
        let mut snapshot = GeneratorSnapshot {
            state: self.core.state.to_vec(),
            results: self.core.results.to_vec(),
            a: self.core.a,
            b: self.core.b,
            c: self.core.c,
            cursor: self.cursor,
            bank32: self.bank32.as_slice().to_vec(),
            bank16: self.bank16.as_slice().to_vec(),
            bank8: self.bank8.as_slice().to_vec(),
            words_drawn: self.words_drawn,
            digest: String::new(),
        };
        snapshot.digest = snapshot.compute_digest();
        snapshot
    }

    /// Rebuild a generator from a snapshot
    pub fn restore(snapshot: &GeneratorSnapshot) -> Result<Self, CheckpointError> {
        let computed = snapshot.compute_digest();
        if computed != snapshot.digest {
            return Err(CheckpointError::DigestMismatch {
                recorded: snapshot.digest.clone(),
                computed,
            });
        }
        if snapshot.cursor > STATE_WORDS {
            return Err(CheckpointError::CursorOutOfRange {
                cursor: snapshot.cursor,
                limit: STATE_WORDS,
            });
        }

        let rng = Self {
            core: Isaac64Core {
                state: words_array("state", &snapshot.state)?,
                results: words_array("results", &snapshot.results)?,
                a: snapshot.a,
                b: snapshot.b,
                c: snapshot.c,
            },
            cursor: snapshot.cursor,
            bank32: bank("bank32", &snapshot.bank32)?,
            bank16: bank("bank16", &snapshot.bank16)?,
            bank8: bank("bank8", &snapshot.bank8)?,
            words_drawn: snapshot.words_drawn,
        };
        log::debug!(
            "restored isaac64 snapshot at shuffle {} with {} words drawn",
            rng.core.c,
            rng.words_drawn
        );
        Ok(rng)
    }
}

impl Generator {
    /// Capture the full state under the lock
    pub fn snapshot(&self) -> GeneratorSnapshot {
        self.lock().snapshot()
    }

    /// New generator resuming from `snapshot`
    pub fn restore(snapshot: &GeneratorSnapshot) -> Result<Self, CheckpointError> {
        Isaac64Rng::restore(snapshot).map(Self::from_rng)
    }
}
