//! Deterministic random number generation
//!
//! Implements ISAAC64 (Bob Jenkins, 1996) with the reference word order:
//! results are handed out from the top of each 256-word batch downwards.
//! CRITICAL: Every derived value in this crate is built on [`Isaac64Rng`].

mod entropy;
mod isaac64;
mod mix;
mod seed;
mod stream;

pub use isaac64::{Isaac64Core, STATE_WORDS};
pub use mix::{mix, GOLDEN_RATIO, MIXED_GOLDEN};
pub use seed::{Seed, SeedError, SeedPolicy, SEED_BYTES_MAX, SEED_WORDS_MAX};
pub use stream::Isaac64Rng;

pub(crate) use stream::{Subword, SubwordBank};
