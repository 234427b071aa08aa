// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Numeric literals, width conversions and IEEE 754 NaN semantics
//!
//! Literals and float strings parse into lossless intermediates
//! ([`ExactInteger`], [`ExactFloat`]) that meet their target type in exactly
//! one rounding step.  Conversions between fixed-width integers and binary
//! floats pick an explicit [policy](convert), and integer arithmetic makes
//! overflow explicit with [`OverflowReporting`].
//!
//! Every algorithm works on runtime formats ([`IntFormat`], [`FloatFormat`]),
//! so the same code serves `i8` and `u128`, `f32` and the x87 80-bit format.
//! The traits in this module connect Rust types to those formats.
//!
//! ```
//! use numlit::convert::clamping;
//! use numlit::literal::parse_literal;
//! use numlit::string::parse_float;
//! use numlit::F16;
//!
//! assert_eq!(parse_literal("-128").unwrap().to::<i8>().exact(), Some(-128));
//! assert_eq!(clamping::<i32, u8>(-5), 0);
//! assert_eq!(parse_float::<F16>("65504").map(F16::to_f64), Ok(65504.0));
//! ```

pub mod arith;
pub mod convert;
mod detail;
pub mod error;
pub mod exact;
pub mod format;
pub mod hex;
pub mod literal;
pub mod nan;
mod scan;
pub mod string;
pub mod types;


pub use arith::OverflowReporting;
pub use convert::{ConversionOutcome, Policy};
pub use exact::{ExactFloat, ExactInteger, Radix};
pub use format::{BinaryFloat, FixedWidthInt, FloatClass, FloatFormat, IntFormat, NumericType, Value};
pub use literal::Literal;
pub use nan::NanPayload;
pub use types::{BF16, F128, F16, F80};

use core::fmt::Debug;
use error::EncodingError;
use num_traits::ops::overflowing::{OverflowingAdd, OverflowingMul, OverflowingSub};
use num_traits::PrimInt;

/// A Rust type with a runtime [`NumericType`]
pub trait Numeric: Copy + Debug {
    /// Runtime descriptor of the type
    const TYPE: NumericType;

    /// Reinterpret the bits of a value of [`Numeric::TYPE`]
    fn from_value(value: Value) -> Self;

    /// Runtime counterpart of `self`
    fn into_value(self) -> Value;
}

/// Integer types
pub trait IntegerLike: Numeric + PrimInt {
    const IS_SIGNED: bool;

    /// Widen losslessly
    fn to_exact(self) -> ExactInteger;
}

/// Two's-complement integers of a fixed width
///
/// ```
/// use numlit::FixedWidthIntegerLike;
///
/// assert_eq!(u8::BIT_WIDTH, 8);
/// assert_eq!((-1_i16).bit_pattern(), u16::MAX);
/// assert_eq!(0x80_u8.bit_pattern(), i8::MIN);
/// ```
pub trait FixedWidthIntegerLike: IntegerLike + OverflowingAdd + OverflowingSub + OverflowingMul {
    const FORMAT: IntFormat;
    const BIT_WIDTH: u32 = Self::FORMAT.bit_width();

    /// The type of the same width and the opposite signedness
    type BitPattern: FixedWidthIntegerLike<BitPattern = Self>;

    fn to_fixed(self) -> FixedWidthInt;

    /// Inverse of [`FixedWidthIntegerLike::to_fixed`], keeping the low bits
    /// of values of other formats
    fn from_fixed(x: FixedWidthInt) -> Self;

    /// Reinterpret the bits as the type of opposite signedness
    fn bit_pattern(self) -> Self::BitPattern {
        Self::BitPattern::from_fixed(self.to_fixed().bit_pattern())
    }
}

/// Binary floating-point types
///
/// The provided methods follow IEEE 754, including its NaN rules, on any
/// [`FloatFormat`].
pub trait BinaryFloatLike: Numeric + PartialOrd {
    const FORMAT: FloatFormat;

    fn from_binary_float(x: BinaryFloat) -> Self;
    fn to_binary_float(self) -> BinaryFloat;

    fn float_class(self) -> FloatClass {
        self.to_binary_float().class()
    }

    fn is_signaling_nan(self) -> bool {
        self.to_binary_float().is_signaling_nan()
    }

    fn nan_payload(self) -> Option<NanPayload> {
        self.to_binary_float().nan_payload()
    }

    /// Encode a NaN
    ///
    /// ```
    /// use numlit::{BinaryFloatLike, NanPayload};
    ///
    /// let nan = f32::with_nan_payload(false, NanPayload::signaling(1)).unwrap();
    /// assert_eq!(nan.to_bits(), 0x7fa0_0001);
    /// assert!(f32::with_nan_payload(false, NanPayload::quiet(1 << 21)).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// If the payload needs more than [`FloatFormat::payload_bits`] bits
    fn with_nan_payload(negative: bool, nan: NanPayload) -> Result<Self, EncodingError> {
        nan::encode_nan(Self::FORMAT, negative, nan).map(Self::from_binary_float)
    }

    /// IEEE 754-2008 `minNum`, see [`BinaryFloat::min_num`]
    #[must_use]
    fn min_num(self, other: Self) -> Self {
        Self::from_binary_float(self.to_binary_float().min_num(other.to_binary_float()))
    }

    /// IEEE 754-2008 `maxNum`, see [`BinaryFloat::max_num`]
    #[must_use]
    fn max_num(self, other: Self) -> Self {
        Self::from_binary_float(self.to_binary_float().max_num(other.to_binary_float()))
    }

    /// IEEE 754 `totalOrder`, see [`BinaryFloat::total_order`]
    fn total_order(self, other: Self) -> bool {
        self.to_binary_float().total_order(other.to_binary_float())
    }
}

macro_rules! impl_fixed_width {
    ($($signed:ty, $unsigned:ty, $bits:expr;)*) => {$(
        impl_fixed_width!(@impl $signed, $unsigned, IntFormat::new($bits, true));
        impl_fixed_width!(@impl $unsigned, $signed, IntFormat::new($bits, false));
    )*};

    (@impl $t:ty, $pattern:ty, $format:expr) => {
        impl Numeric for $t {
            const TYPE: NumericType = NumericType::Int($format);

            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            fn from_value(value: Value) -> Self {
                value.to_bits() as Self
            }

            fn into_value(self) -> Value {
                Value::Int(self.to_fixed())
            }
        }

        impl IntegerLike for $t {
            const IS_SIGNED: bool = $format.is_signed();

            fn to_exact(self) -> ExactInteger {
                self.to_fixed().into()
            }
        }

        impl FixedWidthIntegerLike for $t {
            const FORMAT: IntFormat = $format;
            type BitPattern = $pattern;

            #[allow(clippy::cast_sign_loss, clippy::cast_lossless, clippy::unnecessary_cast)]
            fn to_fixed(self) -> FixedWidthInt {
                FixedWidthInt::from_bits(Self::FORMAT, self as u128)
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            fn from_fixed(x: FixedWidthInt) -> Self {
                x.to_bits() as Self
            }
        }
    };
}

impl_fixed_width! {
    i8, u8, 8;
    i16, u16, 16;
    i32, u32, 32;
    i64, u64, 64;
    i128, u128, 128;
    isize, usize, usize::BITS;
}

macro_rules! impl_primitive_float {
    ($t:ty, $bits:ty, $format:expr) => {
        impl Numeric for $t {
            const TYPE: NumericType = NumericType::Float($format);

            #[allow(clippy::cast_possible_truncation)]
            fn from_value(value: Value) -> Self {
                Self::from_bits(value.to_bits() as $bits)
            }

            fn into_value(self) -> Value {
                Value::Float(self.to_binary_float())
            }
        }

        impl BinaryFloatLike for $t {
            const FORMAT: FloatFormat = $format;

            #[allow(clippy::cast_possible_truncation)]
            fn from_binary_float(x: BinaryFloat) -> Self {
                Self::from_bits(x.to_bits() as $bits)
            }

            fn to_binary_float(self) -> BinaryFloat {
                BinaryFloat::from_bits(Self::FORMAT, self.to_bits().into())
            }
        }
    };
}

impl_primitive_float!(f32, u32, FloatFormat::BINARY32);
impl_primitive_float!(f64, u64, FloatFormat::BINARY64);

/// Define a soft float type of a [`FloatFormat`]
///
/// The type stores the bits in the given unsigned integer, which must be at
/// least as wide as the format.  `EXPLICIT` selects a format whose integer
/// bit is stored, like [`FloatFormat::X87_EXTENDED`].
///
/// ```
/// numlit::binary_float!(pub struct F8E4M3(u8): 4, 3);
///
/// assert_eq!(F8E4M3::from_f64(1.5).to_bits(), 0x3c);
/// assert_eq!(F8E4M3::MAX.to_f64(), 240.0);
/// assert!("1e3".parse::<F8E4M3>().is_err());
/// ```
///
/// Storage narrower than the format is rejected at compile time.
///
/// ```compile_fail
/// numlit::binary_float!(struct Narrow(u8): 5, 10);
///
/// assert_eq!(Narrow::from_f64(1.0).to_f64(), 1.0);
/// ```
#[macro_export]
macro_rules! binary_float {
    (@impl $(#[$attr:meta])* $vis:vis struct $name:ident($bits:ty), $format:expr) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default)]
        #[repr(transparent)]
        $vis struct $name($bits);

        #[allow(clippy::cast_lossless, clippy::cast_possible_truncation, clippy::unnecessary_cast)]
        impl $name {
            /// Positive quiet NaN without payload
            pub const NAN: Self = Self::from_binary($crate::format::BinaryFloat::nan($format));

            pub const INFINITY: Self = Self::from_binary($crate::format::BinaryFloat::infinity($format, false));

            pub const NEG_INFINITY: Self = Self::from_binary($crate::format::BinaryFloat::infinity($format, true));

            /// Largest finite value
            pub const MAX: Self = Self::from_binary($crate::format::BinaryFloat::greatest_finite($format, false));

            /// Smallest finite value
            pub const MIN: Self = Self::from_binary($crate::format::BinaryFloat::greatest_finite($format, true));

            /// Smallest positive normal value
            pub const MIN_POSITIVE: Self = Self::from_binary($crate::format::BinaryFloat::min_positive($format));

            const _HAS_VALID_STORAGE: () = assert!(
                $crate::format::FloatFormat::bit_width($format) <= <$bits>::BITS,
                "storage is narrower than the format"
            );

            const fn from_binary(x: $crate::format::BinaryFloat) -> Self {
                let () = Self::_HAS_VALID_STORAGE;
                Self(x.to_bits() as $bits)
            }

            const fn binary(self) -> $crate::format::BinaryFloat {
                let () = Self::_HAS_VALID_STORAGE;
                $crate::format::BinaryFloat::from_bits($format, self.0 as u128)
            }

            /// Raw transmutation from bits, discarding those beyond the format
            #[must_use]
            pub const fn from_bits(v: $bits) -> Self {
                Self::from_binary($crate::format::BinaryFloat::from_bits($format, v as u128))
            }

            /// Raw transmutation to bits
            #[must_use]
            pub const fn to_bits(self) -> $bits {
                self.0
            }

            /// Round once to the nearest value
            #[must_use]
            pub fn from_f64(x: f64) -> Self {
                $crate::convert::exact(x)
            }

            /// Round once to the nearest `f64`
            #[must_use]
            pub fn to_f64(self) -> f64 {
                $crate::convert::exact(self)
            }

            #[must_use]
            pub const fn is_nan(self) -> bool {
                self.binary().is_nan()
            }

            #[must_use]
            pub const fn is_infinite(self) -> bool {
                self.binary().is_infinite()
            }

            #[must_use]
            pub const fn is_finite(self) -> bool {
                self.binary().is_finite()
            }

            #[must_use]
            pub const fn is_sign_negative(self) -> bool {
                self.binary().is_sign_negative()
            }

            #[must_use]
            pub const fn abs(self) -> Self {
                Self::from_binary(self.binary().abs())
            }
        }

        impl ::core::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self::from_binary(self.binary().negate())
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.binary().ieee_cmp(other.binary()) == Some(::core::cmp::Ordering::Equal)
            }
        }

        impl ::core::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::core::cmp::Ordering> {
                self.binary().ieee_cmp(other.binary())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::error::ParseFloatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::string::parse_float(s)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.binary(), f)
            }
        }

        impl $crate::Numeric for $name {
            const TYPE: $crate::format::NumericType = $crate::format::NumericType::Float($format);

            #[allow(clippy::cast_possible_truncation, clippy::unnecessary_cast)]
            fn from_value(value: $crate::format::Value) -> Self {
                Self::from_bits(value.to_bits() as $bits)
            }

            fn into_value(self) -> $crate::format::Value {
                $crate::format::Value::Float(self.binary())
            }
        }

        impl $crate::BinaryFloatLike for $name {
            const FORMAT: $crate::format::FloatFormat = $format;

            fn from_binary_float(x: $crate::format::BinaryFloat) -> Self {
                Self::from_binary(x)
            }

            fn to_binary_float(self) -> $crate::format::BinaryFloat {
                self.binary()
            }
        }
    };

    ($(#[$attr:meta])* $vis:vis struct $name:ident($bits:ty): $e:expr, $m:expr, EXPLICIT) => {
        $crate::binary_float!(@impl $(#[$attr])* $vis struct $name($bits),
            $crate::format::FloatFormat::with_explicit_integer_bit($e, $m));
    };

    ($(#[$attr:meta])* $vis:vis struct $name:ident($bits:ty): $e:expr, $m:expr) => {
        $crate::binary_float!(@impl $(#[$attr])* $vis struct $name($bits), $crate::format::FloatFormat::new($e, $m));
    };
}
