//! Sub-word banking tests
//!
//! Narrow draws must use every slice of a 64-bit word before consuming the
//! next one, and each width banks independently.

use isaac64_core_rs::{Isaac64Rng, Seed};

fn fresh() -> Isaac64Rng {
    Isaac64Rng::from_seed(&Seed::Value(2024)).unwrap()
}

fn expected_words(draws: u64, width: u64) -> u64 {
    (draws * width).div_ceil(64)
}

#[test]
fn test_word_accounting_per_width() {
    for n in 0..200u64 {
        let mut rng = fresh();
        for _ in 0..n {
            rng.next_u8();
        }
        assert_eq!(rng.words_drawn(), expected_words(n, 8), "u8 x {}", n);

        let mut rng = fresh();
        for _ in 0..n {
            rng.next_u16();
        }
        assert_eq!(rng.words_drawn(), expected_words(n, 16), "u16 x {}", n);

        let mut rng = fresh();
        for _ in 0..n {
            rng.next_u32();
        }
        assert_eq!(rng.words_drawn(), expected_words(n, 32), "u32 x {}", n);

        let mut rng = fresh();
        for _ in 0..n {
            rng.next_u64();
        }
        assert_eq!(rng.words_drawn(), n, "u64 x {}", n);
    }
}

#[test]
fn test_accounting_across_shuffles() {
    let mut rng = fresh();
    for _ in 0..10_000 {
        rng.next_u8();
    }
    assert_eq!(rng.words_drawn(), 1250);
}

#[test]
fn test_slices_issue_low_to_high() {
    let mut rng = fresh();
    let mut reference = fresh();
    let word = reference.next_u64();

    let bytes: Vec<u8> = (0..8).map(|_| rng.next_u8()).collect();
    assert_eq!(bytes, word.to_le_bytes());

    let word = reference.next_u64();
    let halves: Vec<u16> = (0..4).map(|_| rng.next_u16()).collect();
    let expected: Vec<u16> = (0..4).map(|k| (word >> (16 * k)) as u16).collect();
    assert_eq!(halves, expected);

    let word = reference.next_u64();
    assert_eq!(rng.next_u32(), word as u32);
    assert_eq!(rng.next_u32(), (word >> 32) as u32);
}

#[test]
fn test_banks_are_independent_per_width() {
    let mut rng = fresh();
    let mut reference = fresh();
    let first = reference.next_u64();
    let second = reference.next_u64();
    let third = reference.next_u64();

    assert_eq!(rng.next_u8(), first as u8);
    assert_eq!(rng.next_u16(), second as u16);
    assert_eq!(rng.next_u8(), (first >> 8) as u8);
    assert_eq!(rng.next_u32(), third as u32);
    assert_eq!(rng.next_u16(), (second >> 16) as u16);
    assert_eq!(rng.words_drawn(), 3);
}

#[test]
fn test_u64_draws_skip_banks() {
    let mut rng = fresh();
    let mut reference = fresh();
    let first = reference.next_u64();
    let second = reference.next_u64();

    assert_eq!(rng.next_u32(), first as u32);
    // A full-width draw takes the next word and leaves the bank alone
    assert_eq!(rng.next_u64(), second);
    assert_eq!(rng.next_u32(), (first >> 32) as u32);
}
