//! Integer ranges
//!
//! A bounded draw reduces one raw draw of the matching width modulo
//! `range_max + 1`. A `range_max` equal to the width's maximum skips the
//! reduction, since the raw draw is already uniform. The `+ 1` is taken in
//! `u128`, so `range_max = MAX - 1` gives a modulus of `MAX` and never wraps
//! to zero.
//!
//! Signed ranges reinterpret the ordered bounds as unsigned bit patterns of
//! the same width, sample the span, and cast back.

use crate::rng::Isaac64Rng;

/// Unsigned width served by one of the raw stream readers
pub(crate) trait RawWord: Copy + Eq {
    const MAX: Self;

    fn draw(rng: &mut Isaac64Rng) -> Self;

    fn widen(self) -> u128;

    fn narrow(wide: u128) -> Self;
}

macro_rules! impl_raw_word {
    ($($ty:ty => $next:ident),* $(,)?) => {
        $(
            impl RawWord for $ty {
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn draw(rng: &mut Isaac64Rng) -> Self {
                    rng.$next()
                }

                #[inline]
                fn widen(self) -> u128 {
                    self as u128
                }

                #[inline]
                fn narrow(wide: u128) -> Self {
                    wide as $ty
                }
            }
        )*
    };
}

impl_raw_word!(u8 => next_u8, u16 => next_u16, u32 => next_u32, u64 => next_u64);

/// One raw draw reduced into `0..=range_max`
pub(crate) fn bounded_raw<T: RawWord>(rng: &mut Isaac64Rng, range_max: T) -> T {
    let raw = T::draw(rng);
    if range_max == T::MAX {
        return raw;
    }
    T::narrow(raw.widen() % (range_max.widen() + 1))
}

/// Integer types that support inclusive range draws
///
/// Implemented for every 8, 16, 32 and 64-bit integer, signed and unsigned.
/// Narrow widths draw from the matching sub-word bank.
///
/// # Example
/// ```
/// use isaac64_core_rs::Isaac64Rng;
///
/// let mut rng = Isaac64Rng::testing();
/// let die = rng.ranged(1u8, 6u8);
/// assert!((1..=6).contains(&die));
///
/// // Reversed bounds are accepted
/// let offset = rng.ranged(10i32, -10i32);
/// assert!((-10..=10).contains(&offset));
/// ```
pub trait RangedInt: Copy + PartialOrd {
    /// Uniform value in `[min(a, b), max(a, b)]`. Equal bounds consume
    /// nothing from the stream.
    fn sample_ranged(rng: &mut Isaac64Rng, a: Self, b: Self) -> Self;
}

/// Sort two bounds
#[inline]
fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

macro_rules! impl_ranged_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RangedInt for $ty {
                fn sample_ranged(rng: &mut Isaac64Rng, a: Self, b: Self) -> Self {
                    if a == b {
                        return a;
                    }
                    let (min, max) = ordered(a, b);
                    min + bounded_raw(rng, max - min)
                }
            }
        )*
    };
}

macro_rules! impl_ranged_signed {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl RangedInt for $ty {
                fn sample_ranged(rng: &mut Isaac64Rng, a: Self, b: Self) -> Self {
                    if a == b {
                        return a;
                    }
                    let (min, max) = ordered(a, b);
                    let span = (max as $unsigned).wrapping_sub(min as $unsigned);
                    (min as $unsigned).wrapping_add(bounded_raw(rng, span)) as $ty
                }
            }
        )*
    };
}

impl_ranged_unsigned!(u8, u16, u32, u64);
impl_ranged_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64);

impl Isaac64Rng {
    /// Uniform value in the inclusive range between `a` and `b`
    pub fn ranged<T: RangedInt>(&mut self, a: T, b: T) -> T {
        T::sample_ranged(self, a, b)
    }

    /// `u8` in `0..=max`. Always consumes one draw, even for `max == 0`.
    pub fn rand_u8(&mut self, max: u8) -> u8 {
        bounded_raw(self, max)
    }

    /// `u16` in `0..=max`
    pub fn rand_u16(&mut self, max: u16) -> u16 {
        bounded_raw(self, max)
    }

    /// `u32` in `0..=max`
    pub fn rand_u32(&mut self, max: u32) -> u32 {
        bounded_raw(self, max)
    }

    /// `u64` in `0..=max`
    pub fn rand_u64(&mut self, max: u64) -> u64 {
        bounded_raw(self, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_width_returns_raw_word() {
        let mut rng = Isaac64Rng::testing();
        let mut reference = rng.clone();
        assert_eq!(bounded_raw(&mut rng, u64::MAX), reference.next_u64());
        assert_eq!(rng.ranged(0u64, u64::MAX), reference.next_u64());
    }

    #[test]
    fn test_max_minus_one_does_not_alias_to_zero() {
        let mut rng = Isaac64Rng::testing();
        let mut seen_nonzero = false;
        for _ in 0..64 {
            let v = bounded_raw(&mut rng, u8::MAX - 1);
            assert!(v < u8::MAX);
            seen_nonzero |= v != 0;
        }
        assert!(seen_nonzero);
    }

    #[test]
    fn test_zero_bound_draws_zero() {
        let mut rng = Isaac64Rng::testing();
        for _ in 0..16 {
            assert_eq!(bounded_raw(&mut rng, 0u32), 0);
        }
    }

    #[test]
    fn test_bounded_draw_is_plain_modulo() {
        let mut rng = Isaac64Rng::testing();
        let mut reference = rng.clone();
        for i in 0..1000 {
            assert_eq!(rng.rand_u8(99), reference.next_u8() % 100, "draw {}", i);
        }
        // 1000 bytes, eight per word
        assert_eq!(rng.words_drawn(), 125);
        assert_eq!(rng, reference);
    }

    #[test]
    fn test_zero_max_still_draws() {
        let mut rng = Isaac64Rng::testing();
        let mut reference = rng.clone();
        assert_eq!(rng.rand_u32(0), 0);
        assert_eq!(rng.words_drawn(), 1);
        reference.next_u32();
        assert_eq!(rng.next_u32(), reference.next_u32());
    }

    #[test]
    fn test_signed_full_width() {
        let mut rng = Isaac64Rng::testing();
        let mut reference = rng.clone();
        let v = rng.ranged(i64::MIN, i64::MAX);
        assert_eq!(v, (i64::MIN as u64).wrapping_add(reference.next_u64()) as i64);
    }
}
