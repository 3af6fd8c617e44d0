//! ISAAC64 core state and shuffle
//!
//! # Algorithm
//!
//! The state is 256 words of mixing memory plus three accumulators. Each
//! shuffle walks the memory once, pairing the lower half against the upper
//! half and then the reverse, and writes a fresh batch of 256 result words.
//! Two data-dependent lookups per step (`state[(x >> 3) & 255]` and
//! `state[(y >> 11) & 255]`) give the generator its nonlinearity.
//!
//! # Determinism
//!
//! The update rule matches the reference `isaac64()` bit for bit. Any change
//! to step order, shift amounts or index masks changes the output sequence.

use super::mix::{mix, MIXED_GOLDEN};

/// Number of 64-bit words in the state and in each result batch
pub const STATE_WORDS: usize = 256;

const HALF: usize = STATE_WORDS / 2;

/// Index into the state selected by bits 3..11 of `v`
///
/// Equivalent to the reference `ind()` macro, which masks a byte offset with
/// `0x7f8` and dereferences it as a word.
#[inline]
fn indirect(state: &[u64; STATE_WORDS], v: u64) -> u64 {
    state[((v & 0x7f8) >> 3) as usize]
}

/// ISAAC64 mixing memory, result batch and accumulators
///
/// This is the raw generator with no read cursor. Use
/// [`Isaac64Rng`](super::Isaac64Rng) to consume words one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isaac64Core {
    /// Internal mixing memory
    pub(crate) state: [u64; STATE_WORDS],
    /// Most recent batch of output words
    pub(crate) results: [u64; STATE_WORDS],
    pub(crate) a: u64,
    pub(crate) b: u64,
    /// Shuffle counter, folded into `b` once per shuffle
    pub(crate) c: u64,
}

impl Isaac64Core {
    /// All-zero core. Not usable for output until [`Isaac64Core::init`] runs.
    pub(crate) fn zeroed() -> Self {
        Self {
            state: [0; STATE_WORDS],
            results: [0; STATE_WORDS],
            a: 0,
            b: 0,
            c: 0,
        }
    }

    /// Build a core from seed material
    ///
    /// `material` is copied into the result buffer and, when `fold_in` is
    /// set, added into the state during two mixing passes. With `fold_in`
    /// unset this is the reference unseeded initialization.
    pub fn from_material(material: &[u64; STATE_WORDS], fold_in: bool) -> Self {
        let mut core = Self::zeroed();
        core.init(material, fold_in);
        core
    }

    /// (Re)initialize from seed material and produce the first batch
    pub(crate) fn init(&mut self, material: &[u64; STATE_WORDS], fold_in: bool) {
        self.a = 0;
        self.b = 0;
        self.c = 0;
        self.results = *material;

        let mut lanes = MIXED_GOLDEN;
        for (block, seed) in self
            .state
            .chunks_exact_mut(8)
            .zip(self.results.chunks_exact(8))
        {
            if fold_in {
                for (lane, word) in lanes.iter_mut().zip(seed) {
                    *lane = lane.wrapping_add(*word);
                }
            }
            mix(&mut lanes);
            block.copy_from_slice(&lanes);
        }

        // Second pass spreads small seeds across the whole state
        if fold_in {
            for block in self.state.chunks_exact_mut(8) {
                for (lane, word) in lanes.iter_mut().zip(block.iter()) {
                    *lane = lane.wrapping_add(*word);
                }
                mix(&mut lanes);
                block.copy_from_slice(&lanes);
            }
        }

        self.shuffle();
    }

    /// Run one full update pass, refilling all 256 result words
    pub fn shuffle(&mut self) {
        self.c = self.c.wrapping_add(1);
        let mut a = self.a;
        let mut b = self.b.wrapping_add(self.c);

        for i in 0..STATE_WORDS {
            let x = self.state[i];
            let mixed = match i % 4 {
                0 => !(a ^ (a << 21)),
                1 => a ^ (a >> 5),
                2 => a ^ (a << 12),
                _ => a ^ (a >> 33),
            };
            a = mixed.wrapping_add(self.state[(i + HALF) % STATE_WORDS]);
            let y = indirect(&self.state, x).wrapping_add(a).wrapping_add(b);
            self.state[i] = y;
            b = indirect(&self.state, y >> 8).wrapping_add(x);
            self.results[i] = b;
        }

        self.a = a;
        self.b = b;
        log::trace!("isaac64 shuffle #{}", self.c);
    }

    /// The current result batch, in buffer order
    ///
    /// Words are consumed from the end of this slice towards the start.
    pub fn results(&self) -> &[u64; STATE_WORDS] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseeded_first_batch_head() {
        let core = Isaac64Core::from_material(&[0; STATE_WORDS], false);
        assert_eq!(core.results()[0], 0xd94f_3fc3_f2d2_760e);
        assert_eq!(core.results()[1], 0x9db8_ff05_5f3a_1a65);
        assert_eq!(core.results()[15], 0xdeaa_f59b_b069_7ca1);
    }

    #[test]
    fn test_zero_material_folded_differs_from_unseeded() {
        let folded = Isaac64Core::from_material(&[0; STATE_WORDS], true);
        assert_eq!(folded.results()[0], 0x48cb_ff08_6ddf_285a);
        assert_eq!(folded.results()[15], 0x04fe_abfb_bdb6_19cb);
    }

    #[test]
    fn test_shuffle_advances_counter_and_results() {
        let mut core = Isaac64Core::from_material(&[0; STATE_WORDS], false);
        let before = *core.results();
        core.shuffle();
        assert_eq!(core.c, 2);
        assert_ne!(&before, core.results());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Isaac64Core::from_material(&[7; STATE_WORDS], true);
        let copy = original.clone();
        original.shuffle();
        assert_ne!(original, copy);
        let mut copy = copy;
        copy.shuffle();
        assert_eq!(original, copy);
    }
}
