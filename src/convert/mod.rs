// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversions between fixed-width numeric types
//!
//! | Policy | int → int | → float | float → int |
//! |---|---|---|---|
//! | [`exact`] | panics if unrepresentable | nearest, ±∞ on overflow, ±0 on underflow, NaN kept | toward zero, panics if out of range |
//! | [`exact_or_none`] | `None` if unrepresentable | `None` unless exact | `None` unless integral and in range |
//! | [`clamping`] | saturates | as [`exact`], finite overflow saturates | saturates, NaN becomes 0 |
//! | [`truncating`] | keeps the low bits | n/a | n/a |
//!
//! Bit-pattern reinterpretation between types of the same width is
//! [`crate::FixedWidthIntegerLike::bit_pattern`].
//!
//! Every float result is rounded exactly once, straight from the source to
//! the target.

mod float;
mod integer;

use crate::detail::Rounded;
use crate::error::OverflowError;
use crate::format::{BinaryFloat, FloatFormat, NumericType, Value};
use crate::{FixedWidthIntegerLike, Numeric};

/// Raw result of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionOutcome<T> {
    /// The value is represented exactly
    Exact(T),
    /// The value was rounded, or truncated toward zero for integer targets
    Inexact(T),
    /// The value is beyond the finite range of the target
    Overflow { negative: bool },
    /// The nonzero value rounds to zero in the target
    Underflow { negative: bool },
    /// The value has no counterpart in the target, like NaN in an integer
    Failure,
}

impl<T> ConversionOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ConversionOutcome<U> {
        match self {
            Self::Exact(x) => ConversionOutcome::Exact(f(x)),
            Self::Inexact(x) => ConversionOutcome::Inexact(f(x)),
            Self::Overflow { negative } => ConversionOutcome::Overflow { negative },
            Self::Underflow { negative } => ConversionOutcome::Underflow { negative },
            Self::Failure => ConversionOutcome::Failure,
        }
    }

    /// The converted value, exact or not
    pub fn value(self) -> Option<T> {
        match self {
            Self::Exact(x) | Self::Inexact(x) => Some(x),
            _ => None,
        }
    }

    /// The converted value only if nothing was lost
    pub fn exact(self) -> Option<T> {
        match self {
            Self::Exact(x) => Some(x),
            _ => None,
        }
    }

    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl ConversionOutcome<BinaryFloat> {
    pub(crate) const fn from_rounded(rounded: Rounded, negative: bool) -> Self {
        match rounded {
            Rounded::Exact(x) => Self::Exact(x),
            Rounded::Inexact(x) => Self::Inexact(x),
            Rounded::Overflow => Self::Overflow { negative },
            Rounded::Underflow => Self::Underflow { negative },
        }
    }

    /// Resolve as IEEE 754 does by default: overflow to infinity, underflow
    /// to zero, failure to NaN
    #[must_use]
    pub const fn or_saturate(self, format: FloatFormat) -> BinaryFloat {
        match self {
            Self::Exact(x) | Self::Inexact(x) => x,
            Self::Overflow { negative } => BinaryFloat::infinity(format, negative),
            Self::Underflow { negative } => BinaryFloat::zero(format, negative),
            Self::Failure => BinaryFloat::nan(format),
        }
    }
}

/// Conversion policy for the runtime API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Exact,
    ExactOrNone,
    Clamping,
    Truncating,
}

impl Value {
    /// Convert to another type, reporting what was lost
    #[must_use]
    pub fn convert(self, to: NumericType) -> ConversionOutcome<Self> {
        let outcome = match (self, to) {
            (Self::Int(x), NumericType::Int(format)) => x.to_int(format).map(Self::Int),
            (Self::Int(x), NumericType::Float(format)) => x.round(format).map(Self::Float),
            (Self::Float(x), NumericType::Int(format)) => x.to_int(format).map(Self::Int),
            (Self::Float(x), NumericType::Float(format)) => x.round(format).map(Self::Float),
        };

        if !outcome.is_exact() {
            tracing::trace!(from = ?self.numeric_type(), ?to, ?outcome, "lossy conversion");
        }
        outcome
    }

    /// Convert under a runtime-selected policy
    ///
    /// Returns `None` where [`Policy::ExactOrNone`] fails, and for
    /// [`Policy::Truncating`] unless both sides are integers.
    ///
    /// # Panics
    ///
    /// Under [`Policy::Exact`], if an integer target cannot hold the value
    #[must_use]
    #[track_caller]
    pub fn convert_with(self, to: NumericType, policy: Policy) -> Option<Self> {
        match policy {
            Policy::Exact => Some(self.exact(to)),
            Policy::ExactOrNone => self.convert(to).exact(),
            Policy::Clamping => Some(self.clamping(to)),
            Policy::Truncating => match (self, to) {
                (Self::Int(x), NumericType::Int(format)) => Some(Self::Int(x.truncating(format))),
                _ => None,
            },
        }
    }

    /// Convert with rounding, trapping on integer overflow
    ///
    /// # Panics
    ///
    /// If an integer target cannot hold the value, or the value is a NaN or
    /// an infinity converted to an integer
    #[must_use]
    #[track_caller]
    pub fn exact(self, to: NumericType) -> Self {
        if let (Self::Float(x), NumericType::Float(format)) = (self, to) {
            if x.is_nan() {
                return Self::Float(x.nan_to(format));
            }
        }

        match (self.convert(to), to) {
            (ConversionOutcome::Exact(x) | ConversionOutcome::Inexact(x), _) => x,
            (ConversionOutcome::Overflow { negative }, NumericType::Float(format)) => {
                Self::Float(BinaryFloat::infinity(format, negative))
            }
            (ConversionOutcome::Underflow { negative }, NumericType::Float(format)) => {
                Self::Float(BinaryFloat::zero(format, negative))
            }
            (ConversionOutcome::Failure, NumericType::Float(format)) => Self::Float(BinaryFloat::nan(format)),
            (_, NumericType::Int(_)) => match self {
                Self::Float(x) if !x.is_finite() => panic!("{}", OverflowError::NotFinite),
                _ => panic!("{}", OverflowError::Conversion),
            },
        }
    }

    /// Convert with rounding, saturating to the finite range of the target
    #[must_use]
    pub fn clamping(self, to: NumericType) -> Self {
        match (self, to) {
            (Self::Int(x), NumericType::Int(format)) => Self::Int(x.clamping(format)),
            (Self::Float(x), NumericType::Int(format)) => Self::Int(x.clamping_to_int(format)),
            (Self::Float(x), NumericType::Float(format)) if x.is_nan() => Self::Float(x.nan_to(format)),
            (Self::Float(x), NumericType::Float(format)) if x.is_infinite() => {
                Self::Float(BinaryFloat::infinity(format, x.is_sign_negative()))
            }
            (_, NumericType::Float(format)) => Self::Float(match self.convert(to) {
                ConversionOutcome::Exact(Self::Float(x)) | ConversionOutcome::Inexact(Self::Float(x)) => x,
                ConversionOutcome::Overflow { negative } => BinaryFloat::greatest_finite(format, negative),
                ConversionOutcome::Underflow { negative } => BinaryFloat::zero(format, negative),
                _ => BinaryFloat::nan(format),
            }),
        }
    }
}

/// Convert between numeric types, reporting what was lost
pub fn convert<S: Numeric, T: Numeric>(x: S) -> ConversionOutcome<T> {
    x.into_value().convert(T::TYPE).map(T::from_value)
}

/// Convert with rounding, trapping on integer overflow
///
/// ```
/// use numlit::convert::exact;
///
/// assert_eq!(exact::<i32, u8>(200), 200);
/// assert_eq!(exact::<f64, f32>(1e300), f32::INFINITY);
/// assert_eq!(exact::<f64, i8>(-3.75), -3);
/// ```
///
/// # Panics
///
/// If an integer target cannot hold the value
#[must_use]
#[track_caller]
pub fn exact<S: Numeric, T: Numeric>(x: S) -> T {
    T::from_value(x.into_value().exact(T::TYPE))
}

/// Convert only if the value survives unchanged
///
/// NaN never does.
///
/// ```
/// use numlit::convert::exact_or_none;
///
/// assert_eq!(exact_or_none::<i32, u8>(256), None);
/// assert_eq!(exact_or_none::<f64, f32>(0.5), Some(0.5));
/// assert_eq!(exact_or_none::<f64, f32>(0.1), None);
/// ```
pub fn exact_or_none<S: Numeric, T: Numeric>(x: S) -> Option<T> {
    x.into_value().convert(T::TYPE).exact().map(T::from_value)
}

/// Convert, saturating to the bounds of the target
///
/// ```
/// use numlit::convert::clamping;
///
/// assert_eq!(clamping::<i32, i8>(300), 127);
/// assert_eq!(clamping::<i32, i8>(-300), -128);
/// assert_eq!(clamping::<f64, f32>(1e300), f32::MAX);
/// ```
#[must_use]
pub fn clamping<S: Numeric, T: Numeric>(x: S) -> T {
    T::from_value(x.into_value().clamping(T::TYPE))
}

/// Keep the low bits of the two's-complement representation
///
/// The source is first sign-extended if signed, or zero-extended otherwise.
///
/// ```
/// use numlit::convert::truncating;
///
/// assert_eq!(truncating::<i8, u16>(-1), 0xFFFF);
/// assert_eq!(truncating::<u8, i16>(0xFF), 0xFF);
/// assert_eq!(truncating::<i32, i8>(300), 44);
/// ```
#[must_use]
pub fn truncating<S: FixedWidthIntegerLike, T: FixedWidthIntegerLike>(x: S) -> T {
    T::from_fixed(x.to_fixed().truncating(T::FORMAT))
}
