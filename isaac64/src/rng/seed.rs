//! Seed forms and validation
//!
//! A seed is turned into 256 words of seed material before any generator
//! state is touched, so a rejected seed never leaves a half-initialized
//! generator behind.

use super::entropy;
use super::isaac64::STATE_WORDS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of words accepted by [`Seed::Words`]
pub const SEED_WORDS_MAX: usize = STATE_WORDS;

/// Maximum number of bytes accepted by [`Seed::Bytes`]
pub const SEED_BYTES_MAX: usize = STATE_WORDS * 8;

/// Errors raised while validating a seed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("Seed {unit} array is empty")]
    Empty { unit: &'static str },

    #[error("Seed of {len} {unit} exceeds the limit of {limit}")]
    Oversized {
        len: usize,
        limit: usize,
        unit: &'static str,
    },

    #[error("Numeric seed 0 is reserved; use Seed::Testing for the unseeded reference state")]
    ZeroValue,
}

/// How strictly seed shape violations are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Empty arrays, oversized arrays and a zero value are errors
    #[default]
    Strict,
    /// Oversized arrays are truncated, empty arrays seed with zeros and a
    /// zero value selects [`Seed::Testing`]
    Lenient,
}

/// Entropy source for construction and reseeding
///
/// # Example
/// ```
/// use isaac64_core_rs::{Isaac64Rng, Seed, SeedError};
///
/// let rng = Isaac64Rng::from_seed(&Seed::Words(vec![1, 23, 456]));
/// assert!(rng.is_ok());
///
/// let err = Isaac64Rng::from_seed(&Seed::Value(0)).unwrap_err();
/// assert_eq!(err, SeedError::ZeroValue);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Seed {
    /// 2048 bytes gathered from the operating system
    #[default]
    Entropy,
    /// Unseeded reference state (zero state, no seed material folded in)
    Testing,
    /// A single non-zero word
    Value(u64),
    /// Up to 256 words
    Words(Vec<u64>),
    /// Up to 2048 bytes, packed little-endian eight bytes per word
    Bytes(Vec<u8>),
}

/// Validated seed, ready to initialize a core
#[derive(Debug, Clone)]
pub(crate) struct SeedMaterial {
    pub(crate) words: [u64; STATE_WORDS],
    /// False only for the testing form
    pub(crate) fold_in: bool,
}

impl SeedMaterial {
    pub(crate) fn testing() -> Self {
        Self {
            words: [0; STATE_WORDS],
            fold_in: false,
        }
    }

    pub(crate) fn entropy() -> Self {
        Self::from_bytes(&entropy::gather())
    }

    fn from_words(words: &[u64]) -> Self {
        let mut material = [0u64; STATE_WORDS];
        material[..words.len()].copy_from_slice(words);
        Self {
            words: material,
            fold_in: true,
        }
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        let mut material = [0u64; STATE_WORDS];
        for (word, chunk) in material.iter_mut().zip(bytes.chunks(8)) {
            let mut packed = [0u8; 8];
            packed[..chunk.len()].copy_from_slice(chunk);
            *word = u64::from_le_bytes(packed);
        }
        Self {
            words: material,
            fold_in: true,
        }
    }
}

/// Apply the length rules shared by the array forms
fn checked_len(
    len: usize,
    limit: usize,
    unit: &'static str,
    policy: SeedPolicy,
) -> Result<usize, SeedError> {
    match policy {
        SeedPolicy::Lenient => Ok(len.min(limit)),
        SeedPolicy::Strict if len == 0 => Err(SeedError::Empty { unit }),
        SeedPolicy::Strict if len > limit => Err(SeedError::Oversized { len, limit, unit }),
        SeedPolicy::Strict => Ok(len),
    }
}

impl Seed {
    /// Validate this seed and expand it into seed material
    pub(crate) fn material(&self, policy: SeedPolicy) -> Result<SeedMaterial, SeedError> {
        match self {
            Seed::Entropy => Ok(SeedMaterial::entropy()),
            Seed::Testing => Ok(SeedMaterial::testing()),
            Seed::Value(0) => match policy {
                SeedPolicy::Strict => Err(SeedError::ZeroValue),
                SeedPolicy::Lenient => Ok(SeedMaterial::testing()),
            },
            Seed::Value(value) => Ok(SeedMaterial::from_words(&[*value])),
            Seed::Words(words) => {
                let len = checked_len(words.len(), SEED_WORDS_MAX, "words", policy)?;
                Ok(SeedMaterial::from_words(&words[..len]))
            }
            Seed::Bytes(bytes) => {
                let len = checked_len(bytes.len(), SEED_BYTES_MAX, "bytes", policy)?;
                Ok(SeedMaterial::from_bytes(&bytes[..len]))
            }
        }
    }

    /// Short name of the seed form, for log lines
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Seed::Entropy => "entropy",
            Seed::Testing => "testing",
            Seed::Value(_) => "value",
            Seed::Words(_) => "words",
            Seed::Bytes(_) => "bytes",
        }
    }
}
