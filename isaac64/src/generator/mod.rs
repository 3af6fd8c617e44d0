//! Shared generator
//!
//! [`Generator`] puts the engine, its cursor and all three sub-word banks
//! behind one mutex. Every operation takes the lock for its whole duration,
//! so callers never observe a half-updated state and concurrent callers
//! serialize. Entropy gathering and seed validation happen before the lock
//! is taken.

pub mod checkpoint;
pub mod config;

use crate::rng::{Isaac64Rng, Seed, SeedError, SeedPolicy};
use crate::sampling::alphabet::Alphabet;
use crate::sampling::double::{DoubleRangeError, DoubleRequest};
use crate::sampling::range::RangedInt;
use config::GeneratorConfig;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe ISAAC64 generator
///
/// # Example
/// ```
/// use isaac64_core_rs::{Generator, Seed};
///
/// let rng = Generator::from_seed(&Seed::Value(12345)).unwrap();
/// let fork = rng.clone();
///
/// let roll = rng.ranged_u8(1, 6);
/// assert_eq!(roll, fork.ranged_u8(1, 6));
///
/// let p = rng.rand_double();
/// assert!(p > 0.0 && p < 1.0);
/// ```
#[derive(Debug)]
pub struct Generator {
    inner: Mutex<Isaac64Rng>,
}

macro_rules! ranged_methods {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Uniform `", stringify!($ty), "` between `a` and `b` inclusive, in either order")]
            pub fn $name(&self, a: $ty, b: $ty) -> $ty {
                self.lock().ranged(a, b)
            }
        )*
    };
}

macro_rules! forward_methods {
    ($($(#[$doc:meta])* $name:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, $($arg: $ty),*) -> $ret {
                self.lock().$name($($arg),*)
            }
        )*
    };
}

impl Generator {
    /// Generator seeded from system entropy
    pub fn new() -> Self {
        Self::from_rng(Isaac64Rng::from_entropy())
    }

    /// Generator in the unseeded reference state
    pub fn testing() -> Self {
        Self::from_rng(Isaac64Rng::testing())
    }

    /// Generator from a seed, rejecting malformed seeds
    pub fn from_seed(seed: &Seed) -> Result<Self, SeedError> {
        Isaac64Rng::from_seed(seed).map(Self::from_rng)
    }

    /// Generator from a seed under an explicit [`SeedPolicy`]
    pub fn from_seed_with(seed: &Seed, policy: SeedPolicy) -> Result<Self, SeedError> {
        Isaac64Rng::from_seed_with(seed, policy).map(Self::from_rng)
    }

    /// Generator described by a [`GeneratorConfig`]
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, SeedError> {
        Self::from_seed_with(&config.seed, config.policy)
    }

    /// Wrap an existing engine
    pub fn from_rng(rng: Isaac64Rng) -> Self {
        Self {
            inner: Mutex::new(rng),
        }
    }

    /// Unwrap the engine
    pub fn into_inner(self) -> Isaac64Rng {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Every mutation completes before the guard drops, so a poisoned lock
    /// still holds a consistent state.
    fn lock(&self) -> MutexGuard<'_, Isaac64Rng> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reseed in place, as if newly constructed. On error nothing changes.
    pub fn reseed(&self, seed: &Seed) -> Result<(), SeedError> {
        self.reseed_with(seed, SeedPolicy::Strict)
    }

    /// Reseed in place under an explicit [`SeedPolicy`]
    pub fn reseed_with(&self, seed: &Seed, policy: SeedPolicy) -> Result<(), SeedError> {
        let material = seed.material(policy)?;
        log::debug!("reseeding shared generator from {} seed", seed.kind());
        self.lock().reseed_material(&material);
        Ok(())
    }

    /// Force a new result batch without reseeding
    pub fn shuffle(&self) {
        self.lock().shuffle();
    }

    forward_methods! {
        /// Next raw 64-bit word
        next_u64() -> u64;
        /// Next 32-bit value
        next_u32() -> u32;
        /// Next 16-bit value
        next_u16() -> u16;
        /// Next 8-bit value
        next_u8() -> u8;
        /// Uniform `u8` in `0..=max`
        rand_u8(max: u8) -> u8;
        /// Uniform `u16` in `0..=max`
        rand_u16(max: u16) -> u16;
        /// Uniform `u32` in `0..=max`
        rand_u32(max: u32) -> u32;
        /// Uniform `u64` in `0..=max`
        rand_u64(max: u64) -> u64;
        /// Uniform double in (0, 1)
        rand_double() -> f64;
        /// Double strictly between `a` and `b`; see [`DoubleRequest::new`]
        rand_double_raw(a: f64, b: f64, min_zero: f64) -> Result<f64, DoubleRangeError>;
        /// Uniform character from `alphabet`
        rand_char(alphabet: &Alphabet) -> char;
        /// `len` independent characters from `alphabet`
        rand_string(alphabet: &Alphabet, len: usize) -> String;
    }

    ranged_methods! {
        ranged_u8: u8,
        ranged_u16: u16,
        ranged_u32: u32,
        ranged_u64: u64,
        ranged_i8: i8,
        ranged_i16: i16,
        ranged_i32: i32,
        ranged_i64: i64,
    }

    /// Uniform value between `a` and `b` inclusive, for any [`RangedInt`]
    pub fn ranged<T: RangedInt>(&self, a: T, b: T) -> T {
        self.lock().ranged(a, b)
    }

    /// Draw from a pre-validated [`DoubleRequest`]
    pub fn sample_double(&self, request: &DoubleRequest) -> f64 {
        request.sample(&mut self.lock())
    }

    /// Words consumed from the core since construction or the last reseed
    pub fn words_drawn(&self) -> u64 {
        self.lock().words_drawn()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Generator {
    /// Deep copy under the lock. The copy has its own lock and shares
    /// nothing with the original afterwards.
    fn clone(&self) -> Self {
        Self::from_rng(self.lock().clone())
    }
}
