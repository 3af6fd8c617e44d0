//! Generator configuration
//!
//! A [`GeneratorConfig`] names a seed form and a [`SeedPolicy`], and can be
//! loaded from JSON. Missing fields fall back to an entropy seed under the
//! strict policy.

use crate::rng::{Seed, SeedPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid generator config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How to seed a [`Generator`](crate::Generator)
///
/// # Example
/// ```
/// use isaac64_core_rs::{Generator, GeneratorConfig, Seed};
///
/// let config = GeneratorConfig::from_json(
///     r#"{ "seed": { "kind": "words", "value": [1, 23, 456, 7890, 12345] } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.seed, Seed::Words(vec![1, 23, 456, 7890, 12345]));
///
/// let rng = Generator::from_config(&config).unwrap();
/// assert_eq!(rng.next_u64(), 547121783600835980);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed form; defaults to system entropy
    pub seed: Seed,

    /// Treatment of empty, oversized or zero seeds
    pub policy: SeedPolicy,
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
