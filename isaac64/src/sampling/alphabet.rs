//! Character-class draws
//!
//! An [`Alphabet`] is built from [`CharClasses`] and sampled with 8-bit
//! rejection: a byte in the non-uniform remainder above the largest multiple
//! of the alphabet size is discarded and redrawn.

use crate::rng::Isaac64Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest alphabet a single byte can index
pub const ALPHABET_MAX: usize = 256;

/// Errors raised while building an alphabet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    #[error("No character classes selected")]
    Empty,

    #[error("Alphabet of {len} characters exceeds the limit of {limit}")]
    TooLarge { len: usize, limit: usize },
}

/// Character classes to draw from
///
/// # Example
/// ```
/// use isaac64_core_rs::{CharClasses, Isaac64Rng};
///
/// let alphabet = CharClasses {
///     digits: true,
///     symbols: "-_".to_string(),
///     ..CharClasses::default()
/// }
/// .build()
/// .unwrap();
/// assert_eq!(alphabet.len(), 12);
///
/// let mut rng = Isaac64Rng::testing();
/// let token = rng.rand_string(&alphabet, 16);
/// assert!(token.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '_'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharClasses {
    /// `0-9`
    pub digits: bool,
    /// `A-Z`
    pub upper: bool,
    /// `a-z`
    pub lower: bool,
    /// Extra characters, appended in order; duplicates are dropped
    pub symbols: String,
}

impl CharClasses {
    /// Digits, upper and lower case letters
    pub fn alphanumeric() -> Self {
        Self {
            digits: true,
            upper: true,
            lower: true,
            symbols: String::new(),
        }
    }

    /// Collect the selected classes into an alphabet
    pub fn build(&self) -> Result<Alphabet, AlphabetError> {
        let mut chars: Vec<char> = Vec::new();
        if self.digits {
            chars.extend('0'..='9');
        }
        if self.upper {
            chars.extend('A'..='Z');
        }
        if self.lower {
            chars.extend('a'..='z');
        }
        for symbol in self.symbols.chars() {
            if !chars.contains(&symbol) {
                chars.push(symbol);
            }
        }

        if chars.is_empty() {
            return Err(AlphabetError::Empty);
        }
        if chars.len() > ALPHABET_MAX {
            return Err(AlphabetError::TooLarge {
                len: chars.len(),
                limit: ALPHABET_MAX,
            });
        }
        Ok(Alphabet { chars })
    }
}

/// Non-empty set of at most 256 distinct characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Number of distinct characters, 1 to 256
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; construction rejects empty alphabets
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters in draw order: digits, upper, lower, then symbols
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    fn sample(&self, rng: &mut Isaac64Rng) -> char {
        let size = self.chars.len() as u16;
        let zone = 256 - 256 % size;
        loop {
            let byte = u16::from(rng.next_u8());
            if byte < zone {
                return self.chars[usize::from(byte % size)];
            }
        }
    }
}

impl Isaac64Rng {
    /// Uniform character from `alphabet`
    pub fn rand_char(&mut self, alphabet: &Alphabet) -> char {
        alphabet.sample(self)
    }

    /// `len` independent characters from `alphabet`
    pub fn rand_string(&mut self, alphabet: &Alphabet, len: usize) -> String {
        (0..len).map(|_| alphabet.sample(self)).collect()
    }
}
