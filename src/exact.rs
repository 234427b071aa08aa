// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lossless intermediates produced by the parsers
//!
//! Neither type is rounded before it meets its target format, which then
//! takes exactly one rounding step.

use crate::convert::ConversionOutcome;
use crate::detail::{self, Rounded};
use crate::format::{BinaryFloat, FixedWidthInt, FloatFormat, IntFormat, NumericType, Value};
use core::fmt;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

/// Decimal magnitude beyond which every supported format overflows or
/// underflows.  The widest formats span about 10^±4966.
const DECIMAL_LIMIT: i64 = 5100;

/// Integer of unbounded width
///
/// There is no negative zero: `-0` parses to plain zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ExactInteger(BigInt);

impl ExactInteger {
    #[must_use]
    pub const fn new(value: BigInt) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn as_big_int(&self) -> &BigInt {
        &self.0
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    #[must_use]
    pub fn magnitude(&self) -> &BigUint {
        self.0.magnitude()
    }

    /// Narrow to a fixed width, reporting overflow
    #[must_use]
    pub fn to_fixed(&self, format: IntFormat) -> ConversionOutcome<FixedWidthInt> {
        let negative = self.is_negative();

        self.magnitude()
            .to_u128()
            .and_then(|magnitude| FixedWidthInt::from_sign_magnitude(format, negative, magnitude))
            .map_or(ConversionOutcome::Overflow { negative }, ConversionOutcome::Exact)
    }

    /// Keep the low bits of the two's-complement representation
    #[must_use]
    pub fn truncating(&self, format: IntFormat) -> FixedWidthInt {
        let low = detail::low_u128(self.magnitude());
        let bits = if self.is_negative() { low.wrapping_neg() } else { low };
        FixedWidthInt::from_bits(format, bits)
    }

    /// Saturate to the bounds of the format
    #[must_use]
    pub fn clamping(&self, format: IntFormat) -> FixedWidthInt {
        match self.to_fixed(format) {
            ConversionOutcome::Exact(x) => x,
            _ if self.is_negative() => FixedWidthInt::min(format),
            _ => FixedWidthInt::max(format),
        }
    }

    /// Round to the nearest value of a float format
    #[must_use]
    pub fn round(&self, format: FloatFormat) -> ConversionOutcome<BinaryFloat> {
        // Integers have no signed zero
        let negative = self.is_negative();
        let rounded = detail::round(format, negative, self.magnitude(), 0, false);
        ConversionOutcome::from_rounded(rounded, negative)
    }

    /// Convert to any numeric type, rounding when the target is a float
    #[must_use]
    pub fn convert(&self, to: NumericType) -> ConversionOutcome<Value> {
        match to {
            NumericType::Int(format) => self.to_fixed(format).map(Value::Int),
            NumericType::Float(format) => self.round(format).map(Value::Float),
        }
    }
}

impl From<BigInt> for ExactInteger {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl From<i128> for ExactInteger {
    fn from(value: i128) -> Self {
        Self(value.into())
    }
}

impl From<u128> for ExactInteger {
    fn from(value: u128) -> Self {
        Self(value.into())
    }
}

impl From<FixedWidthInt> for ExactInteger {
    fn from(value: FixedWidthInt) -> Self {
        let sign = if value.is_negative() { Sign::Minus } else { Sign::Plus };
        Self(BigInt::from_biguint(sign, value.unsigned_abs().into()))
    }
}

impl fmt::Display for ExactInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Base of the exponent of an [`ExactFloat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    /// `mantissa * 10^exponent`
    Decimal,
    /// `mantissa * 2^exponent`, as written by hexadecimal floats
    Binary,
}

/// Real number of unbounded precision, kept as written
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExactFloat {
    negative: bool,
    mantissa: BigUint,
    exponent: i64,
    radix: Radix,
}

impl ExactFloat {
    #[must_use]
    pub const fn new(negative: bool, mantissa: BigUint, exponent: i64, radix: Radix) -> Self {
        Self {
            negative,
            mantissa,
            exponent,
            radix,
        }
    }

    #[must_use]
    pub const fn is_sign_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub const fn mantissa(&self) -> &BigUint {
        &self.mantissa
    }

    #[must_use]
    pub const fn exponent(&self) -> i64 {
        self.exponent
    }

    #[must_use]
    pub const fn radix(&self) -> Radix {
        self.radix
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub(crate) fn round_to(&self, format: FloatFormat) -> Rounded {
        match self.radix {
            Radix::Binary => detail::round(format, self.negative, &self.mantissa, self.exponent, false),
            Radix::Decimal => round_decimal(format, self.negative, &self.mantissa, self.exponent),
        }
    }

    /// Round once to the nearest value of `format`
    #[must_use]
    pub fn round(&self, format: FloatFormat) -> ConversionOutcome<BinaryFloat> {
        ConversionOutcome::from_rounded(self.round_to(format), self.negative)
    }

    /// Round to nearest, overflowing to infinity and underflowing to zero
    #[must_use]
    pub fn to_float(&self, format: FloatFormat) -> BinaryFloat {
        self.round(format).or_saturate(format)
    }

    /// Convert to a float type.  Float literals never become integers.
    #[must_use]
    pub fn convert(&self, to: NumericType) -> ConversionOutcome<Value> {
        match to {
            NumericType::Int(_) => ConversionOutcome::Failure,
            NumericType::Float(format) => self.round(format).map(Value::Float),
        }
    }
}

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10_u32).pow(exponent)
}

/// Correctly rounded `mantissa * 10^exponent`
fn round_decimal(format: FloatFormat, negative: bool, mantissa: &BigUint, exponent: i64) -> Rounded {
    if mantissa.is_zero() {
        return detail::round(format, negative, mantissa, 0, false);
    }

    #[allow(clippy::cast_possible_wrap)]
    let bits = mantissa.bits() as i64;

    // 0.3 < log10(2) < 0.31
    if ((bits - 1) * 3 / 10).saturating_add(exponent) > DECIMAL_LIMIT {
        return Rounded::Overflow;
    }
    if (bits * 31 / 100 + 1).saturating_add(exponent) < -DECIMAL_LIMIT {
        return Rounded::Underflow;
    }

    let Ok(power) = u32::try_from(exponent.unsigned_abs()) else {
        return if exponent > 0 { Rounded::Overflow } else { Rounded::Underflow };
    };

    if exponent >= 0 {
        return detail::round(format, negative, &(mantissa * pow10(power)), 0, false);
    }

    // Scale the quotient to two bits beyond the precision so the remainder
    // only ever acts as a sticky bit
    let divisor = pow10(power);
    #[allow(clippy::cast_possible_wrap)]
    let shift = (i64::from(format.precision()) + 2 + divisor.bits() as i64 - bits).max(0);
    let dividend = mantissa << shift.unsigned_abs();
    let quotient = &dividend / &divisor;
    let remainder = &dividend % &divisor;

    detail::round(format, negative, &quotient, -shift, !remainder.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(mantissa: u64, exponent: i64) -> ExactFloat {
        ExactFloat::new(false, mantissa.into(), exponent, Radix::Decimal)
    }

    fn f64_of(x: &ExactFloat) -> f64 {
        #[allow(clippy::cast_possible_truncation)]
        f64::from_bits(x.to_float(FloatFormat::BINARY64).to_bits() as u64)
    }

    #[test]
    fn decimal_rounding() {
        assert_eq!(f64_of(&decimal(1, -1)).to_bits(), 0.1_f64.to_bits());
        assert_eq!(f64_of(&decimal(17_976_931_348_623_157, 292)), f64::MAX);
        assert_eq!(f64_of(&decimal(5, -324)).to_bits(), 1);
        assert_eq!(f64_of(&decimal(2, -324)), 0.0);
        assert_eq!(f64_of(&decimal(1, 400)), f64::INFINITY);
        assert_eq!(decimal(1, 400).round(FloatFormat::BINARY64), ConversionOutcome::Overflow { negative: false });
        assert_eq!(decimal(1, -400).round(FloatFormat::BINARY64), ConversionOutcome::Underflow { negative: false });
    }

    #[test]
    fn huge_exponents_do_not_allocate() {
        assert_eq!(decimal(1, i64::MAX).round(FloatFormat::BINARY128), ConversionOutcome::Overflow { negative: false });
        assert_eq!(decimal(1, i64::MIN).round(FloatFormat::BINARY128), ConversionOutcome::Underflow { negative: false });
        assert_eq!(decimal(0, i64::MAX).round(FloatFormat::BINARY128), ConversionOutcome::Exact(BinaryFloat::zero(FloatFormat::BINARY128, false)));
    }

    #[test]
    fn integers_narrow() {
        let x = ExactInteger::from(-300_i128);
        assert_eq!(x.to_fixed(IntFormat::I8), ConversionOutcome::Overflow { negative: true });
        assert_eq!(x.clamping(IntFormat::I8), FixedWidthInt::min(IntFormat::I8));
        assert_eq!(x.truncating(IntFormat::I8).to_i128(), Some(-44));
        assert_eq!(x.truncating(IntFormat::U16).to_u128(), Some(65_236));
    }

    #[test]
    fn integer_zero_is_unsigned() {
        let zero = ExactInteger::from(BigInt::from(0) * -1);
        assert_eq!(zero.round(FloatFormat::BINARY32), ConversionOutcome::Exact(BinaryFloat::zero(FloatFormat::BINARY32, false)));
    }
}
