// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Implementation details
//!
//! This module is not considered part of the public API.  Everything that
//! produces a float, from parsing to narrowing, ends in [`round`], so there is
//! exactly one rounding step per result.

use crate::format::{BinaryFloat, FloatFormat};
use num_bigint::BigUint;
use num_traits::Zero;

/// Outcome of rounding an exact binary value into a format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounded {
    Exact(BinaryFloat),
    Inexact(BinaryFloat),
    Overflow,
    Underflow,
}

/// The low 128 bits of a big integer
#[must_use]
pub fn low_u128(x: &BigUint) -> u128 {
    x.iter_u64_digits()
        .take(2)
        .zip([0, 64])
        .fold(0, |acc, (digit, shift)| acc | u128::from(digit) << shift)
}

/// Pack a sign, a biased exponent and a significand with its leading bit
#[must_use]
pub const fn encode(format: FloatFormat, negative: bool, biased: u128, significand: u128) -> BinaryFloat {
    let stored = if format.has_explicit_integer_bit() {
        significand
    } else {
        significand & format.fraction_mask()
    };
    let sign = if negative { format.sign_bit() } else { 0 };
    BinaryFloat::from_bits(format, sign | biased << format.exponent_shift() | stored)
}

/// Round `mantissa * 2^exponent` to the nearest value of `format`, ties to even
///
/// `sticky` flags a nonzero tail below the last bit of `mantissa`.  Callers
/// setting it must provide at least two bits beyond the precision of the
/// format, so that the tail never reaches the rounding bit.
#[must_use]
pub fn round(format: FloatFormat, negative: bool, mantissa: &BigUint, exponent: i64, sticky: bool) -> Rounded {
    if mantissa.is_zero() {
        return if sticky {
            Rounded::Underflow
        } else {
            Rounded::Exact(BinaryFloat::zero(format, negative))
        };
    }

    let digits = i64::from(format.significand_bits());
    #[allow(clippy::cast_possible_wrap)]
    let top = exponent + mantissa.bits() as i64 - 1;

    if top > i64::from(format.max_exponent()) {
        return Rounded::Overflow;
    }

    let mut lsb = top.max(i64::from(format.min_exponent())) - digits;
    let shift = lsb - exponent;

    let (mut significand, inexact, round_up) = if shift <= 0 {
        debug_assert!(!sticky, "sticky tail without guard bits");
        (low_u128(&(mantissa << shift.unsigned_abs())), false, false)
    } else {
        let shift = shift.unsigned_abs();
        let kept = mantissa >> shift;
        let half = mantissa.bit(shift - 1);
        let tail = sticky || mantissa.trailing_zeros().is_some_and(|zeros| zeros < shift - 1);
        (low_u128(&kept), half || tail, half && (tail || kept.bit(0)))
    };

    if round_up {
        significand += 1;

        if significand >> (digits + 1) != 0 {
            significand >>= 1;
            lsb += 1;
        }
    }

    if lsb + digits > i64::from(format.max_exponent()) {
        return Rounded::Overflow;
    }

    if significand == 0 {
        return Rounded::Underflow;
    }

    #[allow(clippy::cast_sign_loss)]
    let biased = if significand >> digits == 0 {
        0
    } else {
        (lsb + digits + i64::from(format.bias())) as u128
    };

    let result = encode(format, negative, biased, significand);

    if inexact {
        Rounded::Inexact(result)
    } else {
        Rounded::Exact(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_f32(mantissa: u64, exponent: i64) -> Rounded {
        round(FloatFormat::BINARY32, false, &BigUint::from(mantissa), exponent, false)
    }

    fn bits(x: f32) -> BinaryFloat {
        BinaryFloat::from_bits(FloatFormat::BINARY32, x.to_bits().into())
    }

    #[test]
    fn exact_values() {
        assert_eq!(round_f32(3, -1), Rounded::Exact(bits(1.5)));
        assert_eq!(round_f32(1, -149), Rounded::Exact(bits(f32::from_bits(1))));
        assert_eq!(round_f32(1, -126), Rounded::Exact(bits(f32::MIN_POSITIVE)));
        assert_eq!(round_f32(0xff_ffff, 104), Rounded::Exact(bits(f32::MAX)));
    }

    #[test]
    fn ties_to_even() {
        // 2^24 + 1 is halfway between 2^24 and 2^24 + 2
        assert_eq!(round_f32(0x100_0001, 0), Rounded::Inexact(bits(16_777_216.0)));
        assert_eq!(round_f32(0x100_0003, 0), Rounded::Inexact(bits(16_777_220.0)));
        assert_eq!(round_f32(1, -150), Rounded::Underflow);
        assert_eq!(round_f32(3, -151), Rounded::Inexact(bits(f32::from_bits(1))));
    }

    #[test]
    fn carry_into_next_binade() {
        assert_eq!(round_f32(0x1ff_ffff, 0), Rounded::Inexact(bits(33_554_432.0)));
        assert_eq!(round_f32(0x1ff_ffff, 103), Rounded::Overflow);
        assert_eq!(round_f32(0x7f_ffff << 1 | 1, -150), Rounded::Inexact(bits(f32::MIN_POSITIVE)));
    }

    #[test]
    fn sticky_breaks_ties() {
        let mantissa = BigUint::from(0x200_0002_u64);
        let rounded = round(FloatFormat::BINARY32, true, &mantissa, 0, true);
        assert_eq!(rounded, Rounded::Inexact(bits(-33_554_436.0)));
    }
}
