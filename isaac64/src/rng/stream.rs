//! Stream cursor and sub-word banks
//!
//! [`Isaac64Rng`] hands out the core's result words one at a time, shuffling
//! when a batch runs out. Narrow draws (32, 16 and 8 bits) split one 64-bit
//! word into slices, return the lowest, and bank the rest for later calls of
//! the same width. N draws of width W therefore consume ⌈N·W/64⌉ words.

use super::isaac64::{Isaac64Core, STATE_WORDS};
use super::seed::{Seed, SeedError, SeedMaterial, SeedPolicy};

/// A slice width narrower than a full word
pub(crate) trait Subword: Copy + Default {
    const BITS: u32;

    fn truncate(word: u64) -> Self;
}

impl Subword for u32 {
    const BITS: u32 = 32;

    fn truncate(word: u64) -> Self {
        word as u32
    }
}

impl Subword for u16 {
    const BITS: u32 = 16;

    fn truncate(word: u64) -> Self {
        word as u16
    }
}

impl Subword for u8 {
    const BITS: u32 = 8;

    fn truncate(word: u64) -> Self {
        word as u8
    }
}

/// Fixed-capacity LIFO of pending slices for one width
///
/// `N` is `64 / T::BITS - 1`: everything but the slice returned immediately.
#[derive(Debug, Clone)]
pub(crate) struct SubwordBank<T, const N: usize> {
    slots: [T; N],
    len: usize,
}

impl<T: Subword, const N: usize> SubwordBank<T, N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: [T::default(); N],
            len: 0,
        }
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.slots[self.len])
    }

    /// Split `word`, bank the upper slices and return the lowest one
    ///
    /// Slices are pushed most significant first so they pop back out in
    /// ascending order.
    pub(crate) fn split(&mut self, word: u64) -> T {
        debug_assert_eq!(self.len, 0, "bank refilled before it was drained");
        for k in (1..=N as u32).rev() {
            self.slots[self.len] = T::truncate(word >> (k * T::BITS));
            self.len += 1;
        }
        T::truncate(word)
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    /// Pending slices, bottom of the stack first
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.slots[..self.len]
    }

    /// Rebuild a bank from [`SubwordBank::as_slice`] output
    pub(crate) fn from_slice(pending: &[T]) -> Option<Self> {
        if pending.len() > N {
            return None;
        }
        let mut bank = Self::new();
        bank.slots[..pending.len()].copy_from_slice(pending);
        bank.len = pending.len();
        Some(bank)
    }

    pub(crate) const fn capacity() -> usize {
        N
    }
}

impl<T: Subword + PartialEq, const N: usize> PartialEq for SubwordBank<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Subword + Eq, const N: usize> Eq for SubwordBank<T, N> {}

/// ISAAC64 generator with a read cursor and sub-word banks
///
/// This is the single-owner engine: every method takes `&mut self`. Wrap it
/// in [`Generator`](crate::Generator) to share it between threads.
///
/// # Example
/// ```
/// use isaac64_core_rs::Isaac64Rng;
///
/// let mut rng = Isaac64Rng::testing();
/// assert_eq!(rng.next_u64(), 17761629189777429372);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isaac64Rng {
    pub(crate) core: Isaac64Core,
    /// Unconsumed words remaining in `core.results`
    pub(crate) cursor: usize,
    pub(crate) bank32: SubwordBank<u32, 1>,
    pub(crate) bank16: SubwordBank<u16, 3>,
    pub(crate) bank8: SubwordBank<u8, 7>,
    /// Words consumed from the core since the last (re)seed
    pub(crate) words_drawn: u64,
}

impl Isaac64Rng {
    /// Create a generator from a seed, rejecting malformed seeds
    pub fn from_seed(seed: &Seed) -> Result<Self, SeedError> {
        Self::from_seed_with(seed, SeedPolicy::Strict)
    }

    /// Create a generator from a seed under an explicit [`SeedPolicy`]
    pub fn from_seed_with(seed: &Seed, policy: SeedPolicy) -> Result<Self, SeedError> {
        let material = seed.material(policy)?;
        log::debug!("seeding isaac64 from {} seed", seed.kind());
        Ok(Self::from_material(&material))
    }

    /// Create a generator seeded from system entropy
    pub fn from_entropy() -> Self {
        Self::from_material(&SeedMaterial::entropy())
    }

    /// Create a generator in the unseeded reference state
    ///
    /// Its output is the published ISAAC64 sequence for a zero state.
    pub fn testing() -> Self {
        Self::from_material(&SeedMaterial::testing())
    }

    pub(crate) fn from_material(material: &SeedMaterial) -> Self {
        let mut rng = Self {
            core: Isaac64Core::zeroed(),
            cursor: STATE_WORDS,
            bank32: SubwordBank::new(),
            bank16: SubwordBank::new(),
            bank8: SubwordBank::new(),
            words_drawn: 0,
        };
        rng.reseed_material(material);
        rng
    }

    /// Reseed in place. On error the generator is left untouched.
    pub fn reseed(&mut self, seed: &Seed) -> Result<(), SeedError> {
        self.reseed_with(seed, SeedPolicy::Strict)
    }

    /// Reseed in place under an explicit [`SeedPolicy`]
    pub fn reseed_with(&mut self, seed: &Seed, policy: SeedPolicy) -> Result<(), SeedError> {
        let material = seed.material(policy)?;
        log::debug!("reseeding isaac64 from {} seed", seed.kind());
        self.reseed_material(&material);
        Ok(())
    }

    /// Reset everything as if newly constructed from `material`
    pub(crate) fn reseed_material(&mut self, material: &SeedMaterial) {
        self.core.init(&material.words, material.fold_in);
        self.cursor = STATE_WORDS;
        self.bank32.clear();
        self.bank16.clear();
        self.bank8.clear();
        self.words_drawn = 0;
    }

    /// Force a new result batch without reseeding
    ///
    /// Unconsumed words of the current batch are discarded. Banked slices
    /// stay pending.
    pub fn shuffle(&mut self) {
        self.core.shuffle();
        self.cursor = STATE_WORDS;
    }

    /// Next raw 64-bit word
    pub fn next_u64(&mut self) -> u64 {
        if self.cursor == 0 {
            self.core.shuffle();
            self.cursor = STATE_WORDS;
        }
        self.cursor -= 1;
        self.words_drawn += 1;
        self.core.results[self.cursor]
    }

    /// Next 32-bit value, served from the bank when possible
    pub fn next_u32(&mut self) -> u32 {
        match self.bank32.pop() {
            Some(value) => value,
            None => {
                let word = self.next_u64();
                self.bank32.split(word)
            }
        }
    }

    /// Next 16-bit value, served from the bank when possible
    pub fn next_u16(&mut self) -> u16 {
        match self.bank16.pop() {
            Some(value) => value,
            None => {
                let word = self.next_u64();
                self.bank16.split(word)
            }
        }
    }

    /// Next 8-bit value, served from the bank when possible
    pub fn next_u8(&mut self) -> u8 {
        match self.bank8.pop() {
            Some(value) => value,
            None => {
                let word = self.next_u64();
                self.bank8.split(word)
            }
        }
    }

    /// Number of 64-bit words consumed since construction or the last reseed
    pub fn words_drawn(&self) -> u64 {
        self.words_drawn
    }

    /// Read-only view of the underlying core
    pub fn core(&self) -> &Isaac64Core {
        &self.core
    }
}
