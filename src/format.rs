// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Runtime descriptions of numeric types and their values
//!
//! Every value here is stored as raw bits in a `u128`, masked to the width of
//! its format.  Typed code reaches these through [`crate::Numeric`].

use core::fmt;

/// Fixed-width two's-complement integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntFormat {
    bits: u32,
    signed: bool,
}

impl IntFormat {
    pub const I8: Self = Self::new(8, true);
    pub const I16: Self = Self::new(16, true);
    pub const I32: Self = Self::new(32, true);
    pub const I64: Self = Self::new(64, true);
    pub const I128: Self = Self::new(128, true);
    pub const U8: Self = Self::new(8, false);
    pub const U16: Self = Self::new(16, false);
    pub const U32: Self = Self::new(32, false);
    pub const U64: Self = Self::new(64, false);
    pub const U128: Self = Self::new(128, false);

    /// Describe an integer type of `bits` bits
    ///
    /// # Panics
    ///
    /// If `bits` is not in `1..=128`
    #[must_use]
    pub const fn new(bits: u32, signed: bool) -> Self {
        assert!(bits >= 1 && bits <= 128, "integer width must be in 1..=128");
        Self { bits, signed }
    }

    #[must_use]
    pub const fn bit_width(self) -> u32 {
        self.bits
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.signed
    }

    /// The same width with the opposite signedness
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.bits, !self.signed)
    }

    pub(crate) const fn mask(self) -> u128 {
        u128::MAX >> (128 - self.bits)
    }

    /// Largest magnitude of a nonnegative value
    pub(crate) const fn max_magnitude(self) -> u128 {
        if self.signed {
            self.mask() >> 1
        } else {
            self.mask()
        }
    }

    /// Largest magnitude of a negative value
    pub(crate) const fn min_magnitude(self) -> u128 {
        if self.signed {
            1 << (self.bits - 1)
        } else {
            0
        }
    }
}

impl fmt::Display for IntFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.signed { 'i' } else { 'u' }, self.bits)
    }
}

/// A value of an [`IntFormat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedWidthInt {
    format: IntFormat,
    bits: u128,
}

impl FixedWidthInt {
    /// Wrap raw bits, discarding those above the width of `format`
    #[must_use]
    pub const fn from_bits(format: IntFormat, bits: u128) -> Self {
        Self {
            format,
            bits: bits & format.mask(),
        }
    }

    #[must_use]
    pub const fn to_bits(self) -> u128 {
        self.bits
    }

    #[must_use]
    pub const fn format(self) -> IntFormat {
        self.format
    }

    #[must_use]
    pub const fn zero(format: IntFormat) -> Self {
        Self { format, bits: 0 }
    }

    #[must_use]
    pub const fn min(format: IntFormat) -> Self {
        Self::from_bits(format, format.min_magnitude().wrapping_neg())
    }

    #[must_use]
    pub const fn max(format: IntFormat) -> Self {
        Self {
            format,
            bits: format.max_magnitude(),
        }
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.format.signed && self.bits >> (self.format.bits - 1) & 1 == 1
    }

    /// The bits extended to 128 bits according to the signedness of the format
    #[must_use]
    pub const fn sign_extended(self) -> u128 {
        if self.is_negative() {
            self.bits | !self.format.mask()
        } else {
            self.bits
        }
    }

    #[must_use]
    pub const fn unsigned_abs(self) -> u128 {
        if self.is_negative() {
            self.sign_extended().wrapping_neg()
        } else {
            self.bits
        }
    }

    /// Build a value from its sign and magnitude if it is representable
    #[must_use]
    pub const fn from_sign_magnitude(format: IntFormat, negative: bool, magnitude: u128) -> Option<Self> {
        if magnitude == 0 {
            return Some(Self::zero(format));
        }

        if negative {
            if magnitude > format.min_magnitude() {
                return None;
            }
            return Some(Self::from_bits(format, magnitude.wrapping_neg()));
        }

        if magnitude > format.max_magnitude() {
            return None;
        }
        Some(Self { format, bits: magnitude })
    }

    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_i128(self) -> Option<i128> {
        let magnitude = self.unsigned_abs();

        if self.is_negative() {
            if magnitude > 1 << 127 {
                return None;
            }
            return Some(magnitude.wrapping_neg() as i128);
        }

        if magnitude > i128::MAX as u128 {
            return None;
        }
        Some(magnitude as i128)
    }

    #[must_use]
    pub const fn to_u128(self) -> Option<u128> {
        if self.is_negative() {
            None
        } else {
            Some(self.bits)
        }
    }
}

impl fmt::Display for FixedWidthInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}", self.unsigned_abs())
    }
}

/// Binary interchange format in the style of IEEE 754
///
/// `significand_bits` counts the stored fraction bits.  The x87 extended
/// format also stores the leading integer bit, which is marked by
/// [`FloatFormat::with_explicit_integer_bit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatFormat {
    exponent_bits: u32,
    significand_bits: u32,
    explicit_integer_bit: bool,
}

impl FloatFormat {
    pub const BINARY16: Self = Self::new(5, 10);
    pub const BFLOAT16: Self = Self::new(8, 7);
    pub const BINARY32: Self = Self::new(8, 23);
    pub const BINARY64: Self = Self::new(11, 52);
    pub const X87_EXTENDED: Self = Self::with_explicit_integer_bit(15, 63);
    pub const BINARY128: Self = Self::new(15, 112);

    /// Format with an implicit leading significand bit
    ///
    /// # Panics
    ///
    /// If the exponent is not in `2..=15` bits, the significand has fewer than
    /// 2 bits, or the whole encoding exceeds 128 bits.
    #[must_use]
    pub const fn new(exponent_bits: u32, significand_bits: u32) -> Self {
        Self::build(exponent_bits, significand_bits, false)
    }

    /// Format that stores the leading significand bit, like x87 `long double`
    ///
    /// # Panics
    ///
    /// Same as [`FloatFormat::new`]
    #[must_use]
    pub const fn with_explicit_integer_bit(exponent_bits: u32, significand_bits: u32) -> Self {
        Self::build(exponent_bits, significand_bits, true)
    }

    const fn build(exponent_bits: u32, significand_bits: u32, explicit_integer_bit: bool) -> Self {
        assert!(exponent_bits >= 2 && exponent_bits <= 15, "exponent must have 2..=15 bits");
        assert!(significand_bits >= 2, "significand must have at least 2 bits");
        assert!(
            1 + exponent_bits + significand_bits + explicit_integer_bit as u32 <= 128,
            "encoding must fit in 128 bits"
        );
        Self {
            exponent_bits,
            significand_bits,
            explicit_integer_bit,
        }
    }

    #[must_use]
    pub const fn exponent_bits(self) -> u32 {
        self.exponent_bits
    }

    #[must_use]
    pub const fn significand_bits(self) -> u32 {
        self.significand_bits
    }

    #[must_use]
    pub const fn has_explicit_integer_bit(self) -> bool {
        self.explicit_integer_bit
    }

    #[must_use]
    pub const fn bit_width(self) -> u32 {
        1 + self.exponent_bits + self.significand_bits + self.explicit_integer_bit as u32
    }

    /// Number of significant bits including the leading one
    #[must_use]
    pub const fn precision(self) -> u32 {
        self.significand_bits + 1
    }

    #[must_use]
    pub const fn bias(self) -> i32 {
        (1 << (self.exponent_bits - 1)) - 1
    }

    /// Exponent of the smallest positive normal number
    #[must_use]
    pub const fn min_exponent(self) -> i32 {
        1 - self.bias()
    }

    /// Exponent of the largest finite number
    #[must_use]
    pub const fn max_exponent(self) -> i32 {
        self.bias()
    }

    /// Width of a NaN payload, one bit short of IEEE 754's minimum because
    /// the bit below the quiet bit flags signaling NaNs
    #[must_use]
    pub const fn payload_bits(self) -> u32 {
        self.significand_bits - 2
    }

    pub(crate) const fn mask(self) -> u128 {
        u128::MAX >> (128 - self.bit_width())
    }

    pub(crate) const fn sign_bit(self) -> u128 {
        1 << (self.bit_width() - 1)
    }

    pub(crate) const fn fraction_mask(self) -> u128 {
        (1 << self.significand_bits) - 1
    }

    pub(crate) const fn exponent_shift(self) -> u32 {
        self.significand_bits + self.explicit_integer_bit as u32
    }

    pub(crate) const fn max_biased_exponent(self) -> u128 {
        (1 << self.exponent_bits) - 1
    }

    /// The stored integer bit, or 0 if it is implicit
    pub(crate) const fn integer_bit(self) -> u128 {
        if self.explicit_integer_bit {
            1 << self.significand_bits
        } else {
            0
        }
    }

    pub(crate) const fn quiet_bit(self) -> u128 {
        1 << (self.significand_bits - 1)
    }

    pub(crate) const fn signaling_bit(self) -> u128 {
        1 << (self.significand_bits - 2)
    }

    pub(crate) const fn payload_mask(self) -> u128 {
        self.signaling_bit() - 1
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}e{}m{}", self.bit_width(), self.exponent_bits, self.significand_bits)
    }
}

/// Classification of a [`BinaryFloat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatClass {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    Nan,
}

/// Unpacked fields of a [`BinaryFloat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Zero {
        negative: bool,
    },
    /// `significand * 2^exponent`, where `significand` is nonzero
    Finite {
        negative: bool,
        significand: u128,
        exponent: i32,
    },
    Infinite {
        negative: bool,
    },
    /// `fraction` holds the stored fraction bits, quiet bit included
    Nan {
        negative: bool,
        fraction: u128,
    },
}

/// A value of a [`FloatFormat`]
///
/// Equality is bitwise: `NaN == NaN` with the same bits and `-0 != +0`.  The
/// generated float types provide IEEE comparisons instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryFloat {
    format: FloatFormat,
    bits: u128,
}

impl BinaryFloat {
    /// Wrap raw bits, discarding those above the width of `format`
    #[must_use]
    pub const fn from_bits(format: FloatFormat, bits: u128) -> Self {
        Self {
            format,
            bits: bits & format.mask(),
        }
    }

    #[must_use]
    pub const fn to_bits(self) -> u128 {
        self.bits
    }

    #[must_use]
    pub const fn format(self) -> FloatFormat {
        self.format
    }

    #[must_use]
    pub const fn zero(format: FloatFormat, negative: bool) -> Self {
        Self {
            format,
            bits: if negative { format.sign_bit() } else { 0 },
        }
    }

    #[must_use]
    pub const fn infinity(format: FloatFormat, negative: bool) -> Self {
        let bits = format.max_biased_exponent() << format.exponent_shift() | format.integer_bit();
        Self::zero(format, negative).with_magnitude(bits)
    }

    /// Positive quiet NaN without payload
    #[must_use]
    pub const fn nan(format: FloatFormat) -> Self {
        let infinity = Self::infinity(format, false);
        Self::from_bits(format, infinity.bits | format.quiet_bit())
    }

    /// Largest finite magnitude with the given sign
    #[must_use]
    pub const fn greatest_finite(format: FloatFormat, negative: bool) -> Self {
        let exponent = (format.max_biased_exponent() - 1) << format.exponent_shift();
        let bits = exponent | format.integer_bit() | format.fraction_mask();
        Self::zero(format, negative).with_magnitude(bits)
    }

    /// Smallest positive normal number
    #[must_use]
    pub const fn min_positive(format: FloatFormat) -> Self {
        Self::from_bits(format, 1 << format.exponent_shift() | format.integer_bit())
    }

    const fn with_magnitude(self, magnitude: u128) -> Self {
        Self::from_bits(self.format, self.bits & self.format.sign_bit() | magnitude)
    }

    #[must_use]
    pub const fn is_sign_negative(self) -> bool {
        self.bits & self.format.sign_bit() != 0
    }

    /// Flip the sign bit, which is exact for every encoding
    #[must_use]
    pub const fn negate(self) -> Self {
        Self::from_bits(self.format, self.bits ^ self.format.sign_bit())
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self::from_bits(self.format, self.bits & !self.format.sign_bit())
    }

    const fn biased_exponent(self) -> u128 {
        self.bits >> self.format.exponent_shift() & self.format.max_biased_exponent()
    }

    #[must_use]
    pub const fn decode(self) -> Decoded {
        let format = self.format;
        let negative = self.is_sign_negative();
        let fraction = self.bits & format.fraction_mask();
        let biased = self.biased_exponent();
        let integer = if format.explicit_integer_bit {
            self.bits & format.integer_bit() != 0
        } else {
            biased != 0
        };

        if biased == format.max_biased_exponent() {
            if fraction == 0 && integer {
                return Decoded::Infinite { negative };
            }
            return Decoded::Nan { negative, fraction };
        }

        // Unnormals are invalid operands on x87 hardware
        if biased != 0 && !integer {
            return Decoded::Nan { negative, fraction };
        }

        let significand = if integer { fraction | 1 << format.significand_bits } else { fraction };

        if significand == 0 {
            return Decoded::Zero { negative };
        }

        let biased = if biased == 0 { 1 } else { biased };
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let exponent = biased as i32 - format.bias() - format.significand_bits as i32;

        Decoded::Finite {
            negative,
            significand,
            exponent,
        }
    }

    #[must_use]
    pub const fn class(self) -> FloatClass {
        match self.decode() {
            Decoded::Zero { .. } => FloatClass::Zero,
            Decoded::Infinite { .. } => FloatClass::Infinite,
            Decoded::Nan { .. } => FloatClass::Nan,
            Decoded::Finite { significand, .. } => {
                if significand >> self.format.significand_bits == 0 {
                    FloatClass::Subnormal
                } else {
                    FloatClass::Normal
                }
            }
        }
    }

    #[must_use]
    pub const fn is_nan(self) -> bool {
        matches!(self.class(), FloatClass::Nan)
    }

    #[must_use]
    pub const fn is_infinite(self) -> bool {
        matches!(self.class(), FloatClass::Infinite)
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        matches!(self.class(), FloatClass::Zero)
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        !matches!(self.class(), FloatClass::Infinite | FloatClass::Nan)
    }

    /// The preferred encoding of the same datum
    ///
    /// Only the explicit-integer-bit format has more than one encoding per
    /// datum.  Pseudo-denormals become normals, and every NaN-classified
    /// encoding becomes a real NaN with its fraction kept.
    #[must_use]
    pub const fn canonical(self) -> Self {
        let format = self.format;

        if !format.explicit_integer_bit {
            return self;
        }

        match self.decode() {
            Decoded::Nan { fraction, .. } => {
                let fraction = if fraction == 0 { format.quiet_bit() } else { fraction };
                let exponent = format.max_biased_exponent() << format.exponent_shift();
                Self::zero(format, self.is_sign_negative()).with_magnitude(exponent | format.integer_bit() | fraction)
            }
            Decoded::Finite { significand, .. } if self.biased_exponent() == 0 && significand >> format.significand_bits != 0 => {
                self.with_magnitude(1 << format.exponent_shift() | significand)
            }
            _ => self,
        }
    }
}

/// Runtime descriptor of a numeric type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    Int(IntFormat),
    Float(FloatFormat),
}

impl From<IntFormat> for NumericType {
    fn from(format: IntFormat) -> Self {
        Self::Int(format)
    }
}

impl From<FloatFormat> for NumericType {
    fn from(format: FloatFormat) -> Self {
        Self::Float(format)
    }
}

/// A value of a [`NumericType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Int(FixedWidthInt),
    Float(BinaryFloat),
}

impl Value {
    #[must_use]
    pub const fn numeric_type(self) -> NumericType {
        match self {
            Self::Int(x) => NumericType::Int(x.format()),
            Self::Float(x) => NumericType::Float(x.format()),
        }
    }

    #[must_use]
    pub const fn to_bits(self) -> u128 {
        match self {
            Self::Int(x) => x.to_bits(),
            Self::Float(x) => x.to_bits(),
        }
    }
}

impl From<FixedWidthInt> for Value {
    fn from(x: FixedWidthInt) -> Self {
        Self::Int(x)
    }
}

impl From<BinaryFloat> for Value {
    fn from(x: BinaryFloat) -> Self {
        Self::Float(x)
    }
}
