//! Character-class draw tests

use isaac64_core_rs::{AlphabetError, CharClasses, Generator, Isaac64Rng, Seed};
use std::collections::HashMap;

#[test]
fn test_class_combinations() {
    let cases = [
        (true, false, false, 10),
        (false, true, false, 26),
        (false, false, true, 26),
        (true, true, false, 36),
        (true, true, true, 62),
    ];
    for (digits, upper, lower, expected) in cases {
        let alphabet = CharClasses {
            digits,
            upper,
            lower,
            symbols: String::new(),
        }
        .build()
        .unwrap();
        assert_eq!(alphabet.len(), expected);
        assert!(!alphabet.is_empty());
    }
}

#[test]
fn test_oversized_alphabet_rejected() {
    let symbols: String = (0x100u32..0x200)
        .filter_map(char::from_u32)
        .collect();
    let err = CharClasses {
        digits: true,
        symbols,
        ..CharClasses::default()
    }
    .build()
    .unwrap_err();
    assert_eq!(err, AlphabetError::TooLarge { len: 266, limit: 256 });
}

#[test]
fn test_full_byte_alphabet_needs_no_rejection() {
    let symbols: String = (0x100u32..0x200).filter_map(char::from_u32).collect();
    let alphabet = CharClasses {
        symbols,
        ..CharClasses::default()
    }
    .build()
    .unwrap();
    assert_eq!(alphabet.len(), 256);

    let mut rng = Isaac64Rng::testing();
    let mut reference = rng.clone();
    for _ in 0..1_000 {
        let c = rng.rand_char(&alphabet);
        assert_eq!(c, alphabet.as_slice()[usize::from(reference.next_u8())]);
    }
}

#[test]
fn test_distribution_is_flat() {
    let alphabet = CharClasses::alphanumeric().build().unwrap();
    let mut rng = Isaac64Rng::from_seed(&Seed::Value(99)).unwrap();
    let mut counts: HashMap<char, u32> = HashMap::new();
    let draws = 620_000;
    for c in rng.rand_string(&alphabet, draws).chars() {
        *counts.entry(c).or_default() += 1;
    }
    assert_eq!(counts.len(), 62);
    for (c, count) in counts {
        // expected 10_000 per symbol
        assert!((9_400..10_600).contains(&count), "{} drawn {} times", c, count);
    }
}

#[test]
fn test_string_length_and_membership() {
    let alphabet = CharClasses {
        lower: true,
        symbols: "._".to_string(),
        ..CharClasses::default()
    }
    .build()
    .unwrap();
    let mut rng = Isaac64Rng::testing();
    assert_eq!(rng.rand_string(&alphabet, 0), "");
    let s = rng.rand_string(&alphabet, 500);
    assert_eq!(s.chars().count(), 500);
    assert!(s.chars().all(|c| alphabet.as_slice().contains(&c)));
}

#[test]
fn test_shared_generator_strings() {
    let alphabet = CharClasses::alphanumeric().build().unwrap();
    let shared = Generator::from_seed(&Seed::Value(5)).unwrap();
    let mut engine = Isaac64Rng::from_seed(&Seed::Value(5)).unwrap();
    assert_eq!(shared.rand_string(&alphabet, 32), engine.rand_string(&alphabet, 32));
    assert_eq!(shared.rand_char(&alphabet), engine.rand_char(&alphabet));
}

#[test]
fn test_char_classes_from_json() {
    let classes: CharClasses = serde_json::from_str(r#"{"digits": true, "symbols": "+/"}"#).unwrap();
    assert_eq!(classes.build().unwrap().len(), 12);
    assert_eq!(
        CharClasses::default().build().unwrap_err().to_string(),
        "No character classes selected"
    );
}
