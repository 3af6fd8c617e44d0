//! Derived values built on the raw word stream
//!
//! - **range**: bounded and ranged integers of every width
//! - **double**: doubles strictly inside caller-specified bounds
//! - **alphabet**: characters drawn from configurable classes
//!
//! Each module adds its operations to [`Isaac64Rng`](crate::Isaac64Rng)
//! directly; [`Generator`](crate::Generator) forwards them under its lock.

pub mod alphabet;
pub mod double;
pub mod range;
