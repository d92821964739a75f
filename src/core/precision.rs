//! Outcome Precision Boundary
//!
//! Turns a hex digest into the uniformly distributed float that feeds the
//! house-edge transform.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  digest  "c3dcf8533ecda7f4..."                               │
//! │     │  first 13 hex chars (52 bits)                          │
//! │     ▼                                                        │
//! │  r       0xc3dcf8533ecda                                     │
//! │     │  r / 2^52                                              │
//! │     ▼                                                        │
//! │  X       0.76509... in [0, 1)                                │
//! │     │  round to 9 significant digits, ties to even           │
//! │     ▼                                                        │
//! │  X9      nearest f64 to the 9-digit decimal                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rounding step deliberately discards precision to match the reference
//! verification tool. It is significant-digit rounding (`%.9g`), not fixed
//! decimal places; the two differ for every `X < 0.1`.
//!
//! Rounding is done on the exact rational `r / 2^52` with integer arithmetic,
//! so no intermediate float formatting can perturb the digits.

use super::seed::InputError;
use crate::{OUTCOME_BITS, SIGNIFICANT_DIGITS};

/// Number of hex characters holding [`OUTCOME_BITS`].
pub const OUTCOME_HEX_CHARS: usize = (OUTCOME_BITS / 4) as usize;

/// Exactly representable powers of ten.
const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Parse the leading [`OUTCOME_HEX_CHARS`] characters of `hex` as an integer.
///
/// Shorter strings use every character they have.
pub fn extract_bits(hex: &str) -> Result<u64, InputError> {
    if let Some((position, found)) = hex
        .char_indices()
        .take(OUTCOME_HEX_CHARS)
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(InputError::NonHexSeed { position, found });
    }
    Ok(leading_bits(hex))
}

/// [`extract_bits`] for text already known to be hex (validated seeds and
/// digests).
#[inline]
pub(crate) fn leading_bits(hex: &str) -> u64 {
    hex.bytes()
        .take(OUTCOME_HEX_CHARS)
        .fold(0u64, |r, b| (r << 4) | nibble(b))
}

#[inline]
fn nibble(b: u8) -> u64 {
    let value = match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    };
    value as u64
}

/// `r / 2^52` without any rounding beyond the float conversion (exact for
/// every 52-bit `r`).
#[inline]
pub fn unit_interval(r: u64) -> f64 {
    r as f64 / (1u64 << OUTCOME_BITS) as f64
}

/// `r / 2^52` rounded to [`SIGNIFICANT_DIGITS`] significant decimal digits,
/// returned as the nearest `f64` to that decimal.
///
/// `r` must be below `2^52`. The result can be exactly `1.0` for `r` within
/// `5e-10` of `2^52`.
pub fn normalize_significant(r: u64) -> f64 {
    debug_assert!(r < 1u64 << OUTCOME_BITS);
    if r == 0 {
        return 0.0;
    }

    // X * 10^k = r * 5^k / 2^(52 - k). Find the k that puts X * 10^k in
    // [10^8, 10^9). X < 1 so k starts at 9; r >= 1 bounds k by 24.
    let lowest = 10u128.pow(SIGNIFICANT_DIGITS - 1);
    let mut k = SIGNIFICANT_DIGITS;
    let mut numerator = r as u128 * 5u128.pow(k);
    while numerator < lowest << (OUTCOME_BITS - k) {
        k += 1;
        numerator *= 5;
    }

    let shift = OUTCOME_BITS - k;
    let mut digits = numerator >> shift;
    let remainder = numerator & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);
    if remainder > half || (remainder == half && digits & 1 == 1) {
        digits += 1;
    }

    decimal_to_f64(digits as u64, k)
}

/// Nearest `f64` to `digits * 10^-exponent`.
fn decimal_to_f64(digits: u64, exponent: u32) -> f64 {
    match POW10.get(exponent as usize) {
        // Both operands exact, so one correctly rounded division.
        Some(scale) => digits as f64 / scale,
        None => scaled_quotient(digits, exponent),
    }
}

/// `digits * 10^-exponent` rounded to nearest, ties to even, for divisors
/// past the exact `f64` range. Requires `digits > 0` and `exponent <= 24`.
///
/// `digits / 10^e = (digits / 5^e) * 2^-e`: one integer division yields the
/// 53-bit mantissa, a guard bit and a sticky remainder.
fn scaled_quotient(digits: u64, exponent: u32) -> f64 {
    let divisor = 5u128.pow(exponent);
    let bits = |x: u128| 128 - x.leading_zeros();
    // Quotient lands on 55 or 56 bits.
    let shift = 55 + bits(divisor) - bits(digits as u128);
    let scaled = (digits as u128) << shift;
    let mut mantissa = scaled / divisor;
    let sticky = scaled % divisor != 0;

    let excess = bits(mantissa) - 53;
    let dropped = mantissa & ((1u128 << excess) - 1);
    let half = 1u128 << (excess - 1);
    mantissa >>= excess;
    if dropped > half || (dropped == half && (sticky || mantissa & 1 == 1)) {
        mantissa += 1;
    }

    // mantissa <= 2^53 converts exactly; scaling by a normal power of two is exact.
    let scale = 1023 + excess as i64 - shift as i64 - exponent as i64;
    mantissa as f64 * f64::from_bits((scale as u64) << 52)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_bits() {
        let digest = "c3dcf8533ecda7f4c258fe2dbb3f5f04c3d1a0e5e3ddef1bf07610241730e829";
        assert_eq!(extract_bits(digest).unwrap(), 0xc3dcf8533ecda);
        assert_eq!(extract_bits("abc").unwrap(), 0xabc);
        assert_eq!(extract_bits("ABC").unwrap(), 0xabc);
        assert_eq!(extract_bits("fffffffffffffffff").unwrap(), (1u64 << 52) - 1);
        assert_eq!(
            extract_bits("12x4"),
            Err(InputError::NonHexSeed { position: 2, found: 'x' })
        );
        // Characters past the 52-bit prefix are never looked at.
        assert_eq!(extract_bits("0000000000000zz").unwrap(), 0);
    }

    #[test]
    fn test_unit_interval() {
        assert_eq!(unit_interval(0), 0.0);
        assert_eq!(unit_interval(1 << 51), 0.5);
        assert!(unit_interval((1 << 52) - 1) < 1.0);
    }

    #[test]
    fn test_normalize_exact_values() {
        assert_eq!(normalize_significant(0), 0.0);
        assert_eq!(normalize_significant(1 << 51), 0.5);
        assert_eq!(normalize_significant(1 << 50), 0.25);
        assert_eq!(normalize_significant(0xc3dcf8533ecda), 0.765090485);
    }

    #[test]
    fn test_normalize_ties_to_even() {
        // 0.1025390625 exactly: the ninth digit 2 is even, so round down.
        assert_eq!(normalize_significant(0x1a40000000000), 0.102539062);
        // 0.1005859375 exactly: the ninth digit 7 is odd, so round up.
        assert_eq!(normalize_significant(0x19c0000000000), 0.100585938);
    }

    #[test]
    fn test_normalize_is_significant_not_fixed() {
        // 2^-20 = 9.5367431640625e-7 keeps nine significant digits.
        assert_eq!(normalize_significant(1 << 32), 9.53674316e-7);
        // The smallest draw still has nine digits of its own.
        assert_eq!(normalize_significant(1), 2.22044605e-16);
    }

    #[test]
    fn test_smallest_draws_round_like_decimal_literals() {
        // X < 1e-14 needs more than 22 decimal places.
        assert_eq!(normalize_significant(1), 2.22044605e-16);
        assert_eq!(normalize_significant(3), 6.66133815e-16);
        assert_eq!(normalize_significant(44), 9.76996262e-15);
        for exponent in 23..=24 {
            for digits in [100_000_000, 123_456_789, 999_999_999, 1_000_000_000] {
                let literal: f64 = format!("{digits}e-{exponent}").parse().unwrap();
                assert_eq!(decimal_to_f64(digits, exponent), literal);
            }
        }
    }

    #[test]
    fn test_normalize_reaches_one() {
        assert_eq!(normalize_significant(0xfffffffdda3e8), 0.999999999);
        assert_eq!(normalize_significant(0xfffffffdda3e9), 1.0);
        assert_eq!(normalize_significant((1 << 52) - 1), 1.0);
    }

    proptest! {
        #[test]
        fn prop_scaled_quotient_matches_parser(
            digits in 100_000_000u64..=1_000_000_000,
            exponent in 9u32..=24,
        ) {
            let literal: f64 = format!("{digits}e-{exponent}").parse().unwrap();
            prop_assert_eq!(scaled_quotient(digits, exponent), literal);
        }

        #[test]
        fn prop_normalize_within_half_digit(r in 1u64..(1u64 << 52)) {
            let exact = unit_interval(r);
            let rounded = normalize_significant(r);
            prop_assert!(((rounded - exact) / exact).abs() <= 5.0000001e-9);
        }

        #[test]
        fn prop_normalize_is_idempotent_under_formatting(r in 0u64..(1u64 << 52)) {
            let rounded = normalize_significant(r);
            let reparsed: f64 = format!("{:.8e}", rounded).parse().unwrap();
            prop_assert_eq!(rounded, reparsed);
        }

        #[test]
        fn prop_normalize_monotonic(r in 0u64..((1u64 << 52) - 1)) {
            prop_assert!(normalize_significant(r) <= normalize_significant(r + 1));
        }
    }
}
