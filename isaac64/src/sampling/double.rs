//! Doubles with caller-specified open bounds
//!
//! A value is assembled from independently drawn IEEE-754 fields:
//!
//! 1. **Sign**: shared by both bounds, or drawn when they straddle zero.
//! 2. **Exponent**: drawn between the exponents of the low and high
//!    magnitude on the chosen side. Always 0 for subnormal bounds.
//! 3. **Fraction**: pinned to a bound's fraction when the exponent lands on
//!    that bound's exponent, otherwise the full 52-bit range.
//!
//! A candidate equal to either bound is redrawn, so results are strictly
//! inside `(min, max)`. Because exponents are drawn uniformly the result is
//! log-distributed across binades; within one binade it is uniform.
//!
//! A zero bound has no useful exponent. In the normal regime it is replaced
//! by the caller's `min_zero` magnitude; in the subnormal regime it stays 0.

use crate::rng::Isaac64Rng;
use thiserror::Error;

const FRACTION_BITS: u32 = 52;
const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;
const EXPONENT_MASK: u64 = 0x7ff;
const SIGN_BIT: u64 = 1 << 63;

/// Errors raised while validating double bounds
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DoubleRangeError {
    #[error("Bound {value} is not finite")]
    NonFinite { value: f64 },

    #[error("Bounds {min} and {max} mix subnormal and normal values")]
    MixedRegime { min: f64, max: f64 },

    #[error("No double lies strictly between {min} and {max}")]
    EmptyInterval { min: f64, max: f64 },

    #[error("Zero substitute {epsilon} must be a normal, non-zero value")]
    InvalidEpsilon { epsilon: f64 },

    #[error("Zero substitute {epsilon} is not below bound magnitude {bound}")]
    EpsilonTooLarge { epsilon: f64, bound: f64 },
}

/// Closed range of positive bit patterns on one side of zero
#[derive(Debug, Clone, Copy, PartialEq)]
struct Magnitude {
    lo: u64,
    hi: u64,
}

impl Magnitude {
    fn sample(&self, rng: &mut Isaac64Rng, subnormal: bool) -> u64 {
        let (lo_exp, lo_frac) = (self.lo >> FRACTION_BITS, self.lo & FRACTION_MASK);
        let (hi_exp, hi_frac) = (self.hi >> FRACTION_BITS, self.hi & FRACTION_MASK);

        let mut exponent = if subnormal {
            0
        } else {
            u64::from(rng.ranged(lo_exp as u16, hi_exp as u16))
        };

        let mut frac_lo = if exponent == lo_exp { lo_frac } else { 0 };
        let mut frac_hi = if exponent == hi_exp {
            hi_frac
        } else {
            FRACTION_MASK
        };

        // An exact power of two pins the fraction to 0, which only reaches
        // the bound itself. Drop to the binade below instead.
        if exponent == hi_exp && hi_frac == 0 && exponent > lo_exp {
            exponent -= 1;
            frac_hi = FRACTION_MASK;
            frac_lo = if exponent == lo_exp { lo_frac } else { 0 };
        }

        let fraction = rng.ranged(frac_lo, frac_hi);
        (exponent << FRACTION_BITS) | fraction
    }
}

/// Sides of zero a request can land on
#[derive(Debug, Clone, Copy, PartialEq)]
enum Sides {
    Negative(Magnitude),
    Positive(Magnitude),
    Both {
        negative: Magnitude,
        positive: Magnitude,
    },
}

/// Validated bounds for repeated double draws
///
/// Construct once with [`DoubleRequest::new`] and sample as often as needed.
/// Validation never touches a generator, so a rejected request consumes no
/// entropy.
///
/// # Example
/// ```
/// use isaac64_core_rs::{DoubleRequest, Isaac64Rng};
///
/// let request = DoubleRequest::new(-2.5, 10.0, 1e-6).unwrap();
/// let mut rng = Isaac64Rng::testing();
/// for _ in 0..100 {
///     let v = request.sample(&mut rng);
///     assert!(v > -2.5 && v < 10.0);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleRequest {
    min: f64,
    max: f64,
    sides: Sides,
    subnormal: bool,
}

/// Smallest double strictly greater than `x` (finite input)
fn next_up(x: f64) -> f64 {
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

fn is_subnormal_bits(x: f64) -> bool {
    x != 0.0 && (x.to_bits() >> FRACTION_BITS) & EXPONENT_MASK == 0
}

fn magnitude_bits(x: f64) -> u64 {
    x.to_bits() & !SIGN_BIT
}

impl DoubleRequest {
    /// Validate bounds for draws strictly between `a` and `b`
    ///
    /// `min_zero` is the magnitude substituted for an exact zero bound, and
    /// the smallest magnitude reachable when the bounds straddle zero. It is
    /// ignored (treated as +0) when the bounds are subnormal.
    pub fn new(a: f64, b: f64, min_zero: f64) -> Result<Self, DoubleRangeError> {
        for value in [a, b, min_zero] {
            if !value.is_finite() {
                return Err(DoubleRangeError::NonFinite { value });
            }
        }
        let (min, max) = if a <= b { (a, b) } else { (b, a) };

        let has_subnormal = is_subnormal_bits(min) || is_subnormal_bits(max);
        let has_normal = min.is_normal() || max.is_normal();
        if has_subnormal && has_normal {
            return Err(DoubleRangeError::MixedRegime { min, max });
        }
        if next_up(min) >= max {
            return Err(DoubleRangeError::EmptyInterval { min, max });
        }

        let subnormal = has_subnormal;
        let epsilon = if subnormal { 0.0 } else { min_zero.abs() };
        let zero_bits = magnitude_bits(epsilon);

        let needs_epsilon = !subnormal && (min == 0.0 || max == 0.0 || (min < 0.0 && max > 0.0));
        if needs_epsilon && !epsilon.is_normal() {
            return Err(DoubleRangeError::InvalidEpsilon { epsilon: min_zero });
        }

        let too_large = |bound: f64| DoubleRangeError::EpsilonTooLarge {
            epsilon,
            bound: bound.abs(),
        };

        let sides = if min >= 0.0 {
            // Both non-negative; a zero min adopts the positive side
            let lo = if min == 0.0 {
                if epsilon >= max {
                    return Err(too_large(max));
                }
                zero_bits
            } else {
                magnitude_bits(min)
            };
            Sides::Positive(Magnitude {
                lo,
                hi: magnitude_bits(max),
            })
        } else if max <= 0.0 {
            // Both non-positive; a zero max adopts the negative side
            let lo = if max == 0.0 {
                if epsilon >= -min {
                    return Err(too_large(min));
                }
                zero_bits
            } else {
                magnitude_bits(max)
            };
            Sides::Negative(Magnitude {
                lo,
                hi: magnitude_bits(min),
            })
        } else {
            // Straddling zero: each side reaches down to the effective zero
            let side = |bound: f64| {
                (bound.abs() > epsilon).then(|| Magnitude {
                    lo: zero_bits,
                    hi: magnitude_bits(bound),
                })
            };
            match (side(min), side(max)) {
                (Some(negative), Some(positive)) => Sides::Both { negative, positive },
                (Some(negative), None) => Sides::Negative(negative),
                (None, Some(positive)) => Sides::Positive(positive),
                (None, None) => return Err(too_large(if -min > max { min } else { max })),
            }
        };

        Ok(Self {
            min,
            max,
            sides,
            subnormal,
        })
    }

    /// Bounds (1, 2), the source of [`Isaac64Rng::rand_double`]
    pub fn unit_binade() -> Self {
        Self {
            min: 1.0,
            max: 2.0,
            sides: Sides::Positive(Magnitude {
                lo: 1.0f64.to_bits(),
                hi: 2.0f64.to_bits(),
            }),
            subnormal: false,
        }
    }

    /// Lower bound after ordering
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound after ordering
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Draw one value strictly inside the bounds
    pub fn sample(&self, rng: &mut Isaac64Rng) -> f64 {
        loop {
            let (sign, magnitude) = match self.sides {
                Sides::Negative(negative) => (SIGN_BIT, negative),
                Sides::Positive(positive) => (0, positive),
                Sides::Both { negative, positive } => {
                    if rng.ranged(0u8, 1u8) == 1 {
                        (SIGN_BIT, negative)
                    } else {
                        (0, positive)
                    }
                }
            };
            let value = f64::from_bits(sign | magnitude.sample(rng, self.subnormal));
            if value > self.min && value < self.max {
                return value;
            }
        }
    }
}

impl Isaac64Rng {
    /// Double strictly between `a` and `b`
    ///
    /// See [`DoubleRequest::new`] for the meaning of `min_zero` and the
    /// validation rules. On error nothing is drawn.
    pub fn rand_double_raw(
        &mut self,
        a: f64,
        b: f64,
        min_zero: f64,
    ) -> Result<f64, DoubleRangeError> {
        let request = DoubleRequest::new(a, b, min_zero)?;
        Ok(request.sample(self))
    }

    /// Uniform double in (0, 1)
    ///
    /// Draws from (1, 2), where every value shares one exponent, then
    /// subtracts the implicit leading 1.
    pub fn rand_double(&mut self) -> f64 {
        DoubleRequest::unit_binade().sample(self) - 1.0
    }
}
