// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::ConversionOutcome;
use crate::detail;
use crate::format::{BinaryFloat, FixedWidthInt, FloatFormat, IntFormat};
use num_bigint::BigUint;

impl FixedWidthInt {
    /// Convert to another integer format if the value fits
    #[must_use]
    pub const fn to_int(self, format: IntFormat) -> ConversionOutcome<Self> {
        let negative = self.is_negative();

        match Self::from_sign_magnitude(format, negative, self.unsigned_abs()) {
            Some(x) => ConversionOutcome::Exact(x),
            None => ConversionOutcome::Overflow { negative },
        }
    }

    /// Keep the low bits after extending by the signedness of the source
    ///
    /// A negative source widened into an unsigned format gives
    /// `2^bits - |source|`, the two's complement of its magnitude.
    #[must_use]
    pub const fn truncating(self, format: IntFormat) -> Self {
        Self::from_bits(format, self.sign_extended())
    }

    /// Saturate to the bounds of another integer format
    #[must_use]
    pub const fn clamping(self, format: IntFormat) -> Self {
        match self.to_int(format) {
            ConversionOutcome::Exact(x) => x,
            _ if self.is_negative() => Self::min(format),
            _ => Self::max(format),
        }
    }

    /// Reinterpret the bits with the opposite signedness
    #[must_use]
    pub const fn bit_pattern(self) -> Self {
        Self::from_bits(self.format().flipped(), self.to_bits())
    }

    /// Round to the nearest value of a float format
    #[must_use]
    pub fn round(self, format: FloatFormat) -> ConversionOutcome<BinaryFloat> {
        let negative = self.is_negative();
        let magnitude = BigUint::from(self.unsigned_abs());
        ConversionOutcome::from_rounded(detail::round(format, negative, &magnitude, 0, false), negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_sign_loss)]
    fn int(format: IntFormat, value: i128) -> FixedWidthInt {
        FixedWidthInt::from_bits(format, value as u128)
    }

    #[test]
    fn widening_negative_into_unsigned() {
        let x = int(IntFormat::I8, -5);
        assert_eq!(x.truncating(IntFormat::U16).to_u128(), Some(65_531));
        assert_eq!(x.truncating(IntFormat::U128).to_u128(), Some(u128::MAX - 4));
        assert_eq!(x.truncating(IntFormat::I64).to_i128(), Some(-5));
    }

    #[test]
    fn unsigned_sources_zero_extend() {
        let x = FixedWidthInt::max(IntFormat::U8);
        assert_eq!(x.truncating(IntFormat::I16).to_i128(), Some(255));
        assert_eq!(x.truncating(IntFormat::I8).to_i128(), Some(-1));
    }

    #[test]
    fn odd_widths() {
        let i24 = IntFormat::new(24, true);
        assert_eq!(FixedWidthInt::min(i24).to_i128(), Some(-8_388_608));
        assert_eq!(int(IntFormat::I32, 1 << 23).to_int(i24), ConversionOutcome::Overflow { negative: false });
        assert_eq!(int(IntFormat::I32, -(1 << 23)).to_int(i24).exact().and_then(FixedWidthInt::to_i128), Some(-8_388_608));
    }

    #[test]
    fn bit_patterns() {
        let x = int(IntFormat::I16, -1);
        assert_eq!(x.bit_pattern().format(), IntFormat::U16);
        assert_eq!(x.bit_pattern().to_u128(), Some(0xFFFF));
        assert_eq!(x.bit_pattern().bit_pattern(), x);
    }

    #[test]
    fn to_float() {
        let big = FixedWidthInt::max(IntFormat::U128);
        assert_eq!(big.round(FloatFormat::BINARY32), ConversionOutcome::Overflow { negative: false });

        let two_128 = BinaryFloat::from_bits(FloatFormat::BINARY64, 2.0_f64.powi(128).to_bits().into());
        assert_eq!(big.round(FloatFormat::BINARY64), ConversionOutcome::Inexact(two_128));

        let min = FixedWidthInt::min(IntFormat::I64);
        let expected = BinaryFloat::from_bits(FloatFormat::BINARY64, (i64::MIN as f64).to_bits().into());
        assert_eq!(min.round(FloatFormat::BINARY64), ConversionOutcome::Exact(expected));
    }
}
