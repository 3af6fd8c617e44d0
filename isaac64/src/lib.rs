//! ISAAC64 Core - Deterministic Random Number Generation
//!
//! Bit-exact ISAAC64 generator with a derived-value layer on top of the
//! 64-bit word stream.
//!
//! # Architecture
//!
//! - **rng**: Mixing primitive, core shuffle, seeding, stream cursor and
//!   sub-word banks
//! - **sampling**: Bounded and ranged integers, bounded doubles, character
//!   class draws
//! - **generator**: Lock-guarded shared generator, configuration and
//!   checkpointing
//!
//! # Critical Invariants
//!
//! 1. Same seed → same sequence, for every width and every derived value
//! 2. The testing seed reproduces the ISAAC64 reference output exactly
//! 3. Narrow draws never discard the unused part of a 64-bit word
//! 4. Rejected inputs never mutate generator state
//!
//! Not cryptographically secure. Timing is data dependent.

// Module declarations
pub mod generator;
pub mod rng;
pub mod sampling;

// Re-exports for convenience
pub use generator::{
    checkpoint::{CheckpointError, GeneratorSnapshot},
    config::{ConfigError, GeneratorConfig},
    Generator,
};
pub use rng::{Isaac64Core, Isaac64Rng, Seed, SeedError, SeedPolicy};
pub use sampling::{
    alphabet::{Alphabet, AlphabetError, CharClasses},
    double::{DoubleRangeError, DoubleRequest},
    range::RangedInt,
};
