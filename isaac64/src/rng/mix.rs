//! Eight-word avalanche mix
//!
//! Used to spread seed material across the state during initialization.
//! The shuffle itself never calls it.

/// Shift amounts for each step of [`mix`]. Even steps shift right, odd
/// steps shift left.
const MIX_SHIFTS: [u32; 8] = [9, 9, 23, 15, 14, 20, 17, 14];

/// The golden ratio constant every mix lane starts from
pub const GOLDEN_RATIO: u64 = 0x9e37_79b9_7f4a_7c13;

/// Eight copies of [`GOLDEN_RATIO`] after four passes of [`mix`]
///
/// Every initialization starts from this vector, so it is embedded rather
/// than recomputed. `test_mixed_golden_matches_mix` regenerates it.
pub const MIXED_GOLDEN: [u64; 8] = [
    0x647c_4677_a288_4b7c,
    0xb9f8_b322_c73a_c862,
    0x8c0e_a505_3d47_12a0,
    0xb29b_2e82_4a59_5524,
    0x82f0_53db_8355_e0ce,
    0x48fe_4a0f_a5a0_9315,
    0xae98_5bf2_cbfc_89ed,
    0x98f5_704f_6c44_c0ab,
];

/// Apply one avalanche pass to eight words in place
///
/// Step `i` subtracts lane `i+4`, xors a shifted copy of lane `i+7` into
/// lane `i+5`, then adds lane `i` into lane `i+7` (all indices mod 8).
///
/// # Example
/// ```
/// use isaac64_core_rs::rng::{mix, GOLDEN_RATIO, MIXED_GOLDEN};
///
/// let mut lanes = [GOLDEN_RATIO; 8];
/// for _ in 0..4 {
///     mix(&mut lanes);
/// }
/// assert_eq!(lanes, MIXED_GOLDEN);
/// ```
pub fn mix(x: &mut [u64; 8]) {
    for (i, &shift) in MIX_SHIFTS.iter().enumerate() {
        x[i] = x[i].wrapping_sub(x[(i + 4) & 7]);
        let tail = x[(i + 7) & 7];
        x[(i + 5) & 7] ^= if i % 2 == 0 {
            tail >> shift
        } else {
            tail << shift
        };
        x[(i + 7) & 7] = x[(i + 7) & 7].wrapping_add(x[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_golden_matches_mix() {
        let mut lanes = [GOLDEN_RATIO; 8];
        for _ in 0..4 {
            mix(&mut lanes);
        }
        assert_eq!(lanes, MIXED_GOLDEN, "embedded constant drifted from mix()");
    }

    #[test]
    fn test_mix_of_zero_is_zero() {
        let mut lanes = [0u64; 8];
        mix(&mut lanes);
        assert_eq!(lanes, [0u64; 8]);
    }

    #[test]
    fn test_single_bit_avalanches() {
        let mut base = [0u64; 8];
        let mut flipped = [0u64; 8];
        flipped[0] = 1;
        for _ in 0..4 {
            mix(&mut base);
            mix(&mut flipped);
        }
        let changed: u32 = base
            .iter()
            .zip(flipped.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        assert!(changed > 64, "only {} bits changed after 4 passes", changed);
    }
}
