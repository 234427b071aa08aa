// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::ConversionOutcome;
use crate::detail;
use crate::format::{BinaryFloat, Decoded, FixedWidthInt, FloatFormat, IntFormat};
use crate::nan::{self, NanPayload};
use num_bigint::BigUint;

impl BinaryFloat {
    /// Round to the nearest value of another float format
    ///
    /// NaN has no exact counterpart in any format and gives
    /// [`ConversionOutcome::Failure`].
    #[must_use]
    pub fn round(self, format: FloatFormat) -> ConversionOutcome<Self> {
        match self.decode() {
            Decoded::Nan { .. } => ConversionOutcome::Failure,
            Decoded::Infinite { negative } => ConversionOutcome::Exact(Self::infinity(format, negative)),
            Decoded::Zero { negative } => ConversionOutcome::Exact(Self::zero(format, negative)),
            Decoded::Finite {
                negative,
                significand,
                exponent,
            } => {
                let significand = BigUint::from(significand);
                let rounded = detail::round(format, negative, &significand, exponent.into(), false);
                ConversionOutcome::from_rounded(rounded, negative)
            }
        }
    }

    /// Truncate toward zero into an integer format
    #[must_use]
    pub const fn to_int(self, format: IntFormat) -> ConversionOutcome<FixedWidthInt> {
        let (negative, significand, exponent) = match self.decode() {
            Decoded::Nan { .. } => return ConversionOutcome::Failure,
            Decoded::Infinite { negative } => return ConversionOutcome::Overflow { negative },
            Decoded::Zero { .. } => return ConversionOutcome::Exact(FixedWidthInt::zero(format)),
            Decoded::Finite {
                negative,
                significand,
                exponent,
            } => (negative, significand, exponent),
        };

        let shift = exponent.unsigned_abs();

        let (magnitude, lost) = if exponent >= 0 {
            if shift >= 128 || significand.leading_zeros() < shift {
                return ConversionOutcome::Overflow { negative };
            }
            (significand << shift, false)
        } else if shift >= 128 {
            (0, true)
        } else {
            (significand >> shift, significand & ((1 << shift) - 1) != 0)
        };

        match FixedWidthInt::from_sign_magnitude(format, negative, magnitude) {
            Some(x) if lost => ConversionOutcome::Inexact(x),
            Some(x) => ConversionOutcome::Exact(x),
            None => ConversionOutcome::Overflow { negative },
        }
    }

    /// Truncate toward zero, saturating at the bounds; NaN becomes zero
    #[must_use]
    pub const fn clamping_to_int(self, format: IntFormat) -> FixedWidthInt {
        match self.to_int(format) {
            ConversionOutcome::Exact(x) | ConversionOutcome::Inexact(x) => x,
            ConversionOutcome::Overflow { negative: true } => FixedWidthInt::min(format),
            ConversionOutcome::Overflow { negative: false } => FixedWidthInt::max(format),
            ConversionOutcome::Underflow { .. } | ConversionOutcome::Failure => FixedWidthInt::zero(format),
        }
    }

    /// Carry a NaN into another format
    ///
    /// The result is quiet with the same sign, keeping the low bits of the
    /// payload that fit.
    pub(crate) fn nan_to(self, format: FloatFormat) -> Self {
        let payload = self.nan_payload().map_or(0, |p| p.payload);
        nan::encode_nan_truncating(format, self.is_sign_negative(), NanPayload::quiet(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_value(x: f64) -> BinaryFloat {
        BinaryFloat::from_bits(FloatFormat::BINARY64, x.to_bits().into())
    }

    fn f32_value(x: f32) -> BinaryFloat {
        BinaryFloat::from_bits(FloatFormat::BINARY32, x.to_bits().into())
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn narrowing_rounds_once() {
        // Halfway between two f32 after an f64 rounding, but not before it
        let x = f64::from_bits(0x3FF0_0000_1000_0000 | 1);
        let narrowed = f64_value(x).round(FloatFormat::BINARY32);
        assert_eq!(narrowed, ConversionOutcome::Inexact(f32_value(x as f32)));
        assert_eq!(narrowed.value().map(BinaryFloat::to_bits), Some(0x3F80_0001));
    }

    #[test]
    fn narrowing_saturates_by_outcome() {
        assert_eq!(f64_value(1e300).round(FloatFormat::BINARY32), ConversionOutcome::Overflow { negative: false });
        assert_eq!(f64_value(-1e-300).round(FloatFormat::BINARY32), ConversionOutcome::Underflow { negative: true });
        assert_eq!(f64_value(f64::NAN).round(FloatFormat::BINARY32), ConversionOutcome::Failure);
        assert_eq!(
            f64_value(f64::NEG_INFINITY).round(FloatFormat::BINARY16),
            ConversionOutcome::Exact(BinaryFloat::infinity(FloatFormat::BINARY16, true))
        );
    }

    #[test]
    fn widening_is_exact() {
        let x87 = FloatFormat::X87_EXTENDED;
        let one = f64_value(1.0).round(x87);
        assert_eq!(one.map(BinaryFloat::to_bits), ConversionOutcome::Exact(0x3fff_8000_0000_0000_0000));

        let tiny = f64_value(f64::from_bits(1)).round(x87).value();
        assert_eq!(tiny.and_then(|x| x.round(FloatFormat::BINARY64).exact()), Some(f64_value(f64::from_bits(1))));
    }

    #[test]
    fn to_integers() {
        assert_eq!(f64_value(-3.75).to_int(IntFormat::I8).value().and_then(FixedWidthInt::to_i128), Some(-3));
        assert!(f64_value(-3.75).to_int(IntFormat::I8).exact().is_none());
        assert_eq!(f64_value(128.0).to_int(IntFormat::I8), ConversionOutcome::Overflow { negative: false });
        assert_eq!(f64_value(-128.0).to_int(IntFormat::I8).exact().and_then(FixedWidthInt::to_i128), Some(-128));
        assert_eq!(f64_value(1e300).clamping_to_int(IntFormat::U64).to_u128(), Some(u128::from(u64::MAX)));
        assert_eq!(f64_value(f64::NAN).clamping_to_int(IntFormat::I32).to_i128(), Some(0));
        assert_eq!(f64_value(2.0_f64.powi(127)).to_int(IntFormat::U128).exact().and_then(FixedWidthInt::to_u128), Some(1 << 127));
    }

    #[test]
    fn nan_payload_survives_narrowing() {
        let nan = nan::encode_nan_truncating(FloatFormat::BINARY64, true, NanPayload::signaling(0x1_0000_0123));
        let narrowed = nan.nan_to(FloatFormat::BINARY32);
        assert!(narrowed.is_sign_negative());
        assert_eq!(narrowed.nan_payload(), Some(NanPayload::quiet(0x123)));
    }
}
