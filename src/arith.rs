// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integer arithmetic with explicit overflow handling
//!
//! Each operation comes in flavors:
//!
//! - `*_reporting_overflow` returns the wrapped result with an overflow flag.
//! - `trapping_*` panics on overflow in every build.
//! - `wrapping_*` wraps around silently.
//! - `fast_*` assumes no overflow.  The assumption is checked with
//!   `debug_assertions` or the `checked-fast-ops` feature.  Otherwise the
//!   result wraps.

use crate::error::OverflowError;
use crate::FixedWidthIntegerLike;
use num_traits::ops::overflowing::{OverflowingAdd, OverflowingMul, OverflowingSub};

/// Whether `fast_*` operations check their precondition
const CHECK_FAST_OPS: bool = cfg!(any(debug_assertions, feature = "checked-fast-ops"));

#[track_caller]
fn trap<T>((value, overflow): (T, bool), operation: &'static str) -> T {
    if overflow {
        panic!("{}", OverflowError::Arithmetic(operation));
    }
    value
}

#[track_caller]
fn assume<T>((value, overflow): (T, bool), operation: &'static str) -> T {
    if CHECK_FAST_OPS && overflow {
        panic!("{}", OverflowError::Arithmetic(operation));
    }
    value
}

/// Arithmetic of fixed-width integers with overflow made explicit
///
/// ```
/// use numlit::arith::OverflowReporting;
///
/// assert_eq!(100_i8.add_reporting_overflow(28), (-128, true));
/// assert_eq!(7_u8.div_reporting_overflow(0), (7, true));
/// assert_eq!(i32::MIN.rem_reporting_overflow(-1), (0, true));
/// assert_eq!(200_u8.trapping_sub(55), 145);
/// ```
pub trait OverflowReporting: Sized {
    fn add_reporting_overflow(self, rhs: Self) -> (Self, bool);
    fn sub_reporting_overflow(self, rhs: Self) -> (Self, bool);
    fn mul_reporting_overflow(self, rhs: Self) -> (Self, bool);

    /// Division truncating toward zero
    ///
    /// Division by zero reports overflow and returns the dividend.  So does
    /// `MIN / -1`, whose quotient is not representable.
    fn div_reporting_overflow(self, rhs: Self) -> (Self, bool);

    /// Remainder with the sign of the dividend
    ///
    /// Remainder by zero reports overflow and returns the dividend.  Signed
    /// remainder by -1 reports overflow and returns 0 for every dividend.
    fn rem_reporting_overflow(self, rhs: Self) -> (Self, bool);

    /// `0 - self`, which overflows for `MIN` and for nonzero unsigned values
    fn neg_reporting_overflow(self) -> (Self, bool);

    /// Absolute value, which overflows for `MIN`
    fn abs_reporting_overflow(self) -> (Self, bool);

    fn wrapping_add(self, rhs: Self) -> Self {
        self.add_reporting_overflow(rhs).0
    }

    fn wrapping_sub(self, rhs: Self) -> Self {
        self.sub_reporting_overflow(rhs).0
    }

    fn wrapping_mul(self, rhs: Self) -> Self {
        self.mul_reporting_overflow(rhs).0
    }

    /// # Panics
    ///
    /// On overflow
    #[track_caller]
    fn trapping_add(self, rhs: Self) -> Self {
        trap(self.add_reporting_overflow(rhs), "add")
    }

    /// # Panics
    ///
    /// On overflow
    #[track_caller]
    fn trapping_sub(self, rhs: Self) -> Self {
        trap(self.sub_reporting_overflow(rhs), "sub")
    }

    /// # Panics
    ///
    /// On overflow
    #[track_caller]
    fn trapping_mul(self, rhs: Self) -> Self {
        trap(self.mul_reporting_overflow(rhs), "mul")
    }

    /// # Panics
    ///
    /// On division by zero or `MIN / -1`
    fn trapping_div(self, rhs: Self) -> Self;

    /// # Panics
    ///
    /// On division by zero or signed remainder by -1
    fn trapping_rem(self, rhs: Self) -> Self;

    /// # Panics
    ///
    /// On overflow
    #[track_caller]
    fn trapping_neg(self) -> Self {
        trap(self.neg_reporting_overflow(), "neg")
    }

    /// # Panics
    ///
    /// If `self` is `MIN` of a signed type
    #[track_caller]
    fn trapping_abs(self) -> Self {
        trap(self.abs_reporting_overflow(), "abs")
    }

    /// Addition assumed not to overflow
    ///
    /// # Panics
    ///
    /// On overflow, if built with `debug_assertions` or `checked-fast-ops`
    #[track_caller]
    fn fast_add(self, rhs: Self) -> Self {
        assume(self.add_reporting_overflow(rhs), "fast_add")
    }

    /// Subtraction assumed not to overflow
    ///
    /// # Panics
    ///
    /// On overflow, if built with `debug_assertions` or `checked-fast-ops`
    #[track_caller]
    fn fast_sub(self, rhs: Self) -> Self {
        assume(self.sub_reporting_overflow(rhs), "fast_sub")
    }

    /// Multiplication assumed not to overflow
    ///
    /// # Panics
    ///
    /// On overflow, if built with `debug_assertions` or `checked-fast-ops`
    #[track_caller]
    fn fast_mul(self, rhs: Self) -> Self {
        assume(self.mul_reporting_overflow(rhs), "fast_mul")
    }
}

fn is_minus_one<T: FixedWidthIntegerLike>(x: T) -> bool {
    T::IS_SIGNED && x == !T::zero()
}

impl<T: FixedWidthIntegerLike> OverflowReporting for T {
    fn add_reporting_overflow(self, rhs: Self) -> (Self, bool) {
        OverflowingAdd::overflowing_add(&self, &rhs)
    }

    fn sub_reporting_overflow(self, rhs: Self) -> (Self, bool) {
        OverflowingSub::overflowing_sub(&self, &rhs)
    }

    fn mul_reporting_overflow(self, rhs: Self) -> (Self, bool) {
        OverflowingMul::overflowing_mul(&self, &rhs)
    }

    fn div_reporting_overflow(self, rhs: Self) -> (Self, bool) {
        if rhs.is_zero() || (is_minus_one(rhs) && self == T::min_value()) {
            return (self, true);
        }
        (self / rhs, false)
    }

    fn rem_reporting_overflow(self, rhs: Self) -> (Self, bool) {
        if rhs.is_zero() {
            return (self, true);
        }
        if is_minus_one(rhs) {
            return (T::zero(), true);
        }
        (self % rhs, false)
    }

    fn neg_reporting_overflow(self) -> (Self, bool) {
        T::zero().sub_reporting_overflow(self)
    }

    fn abs_reporting_overflow(self) -> (Self, bool) {
        if self < T::zero() {
            self.neg_reporting_overflow()
        } else {
            (self, false)
        }
    }

    #[track_caller]
    fn trapping_div(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            panic!("{}", OverflowError::DivisionByZero("div"));
        }
        trap(self.div_reporting_overflow(rhs), "div")
    }

    #[track_caller]
    fn trapping_rem(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            panic!("{}", OverflowError::DivisionByZero("rem"));
        }
        trap(self.rem_reporting_overflow(rhs), "rem")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporting() {
        assert_eq!(i8::MAX.add_reporting_overflow(1), (i8::MIN, true));
        assert_eq!(0_u16.sub_reporting_overflow(1), (u16::MAX, true));
        assert_eq!(16_u8.mul_reporting_overflow(16), (0, true));
        assert_eq!(12_i64.mul_reporting_overflow(-3), (-36, false));
        assert_eq!(i128::MIN.neg_reporting_overflow(), (i128::MIN, true));
        assert_eq!(5_u32.neg_reporting_overflow(), (u32::MAX - 4, true));
        assert_eq!(0_u32.neg_reporting_overflow(), (0, false));
        assert_eq!((-5_i16).abs_reporting_overflow(), (5, false));
    }

    #[test]
    fn division() {
        assert_eq!((-7_i32).div_reporting_overflow(2), (-3, false));
        assert_eq!((-7_i32).rem_reporting_overflow(2), (-1, false));
        assert_eq!(42_i32.div_reporting_overflow(0), (42, true));
        assert_eq!(42_u8.rem_reporting_overflow(0), (42, true));
        assert_eq!(i8::MIN.div_reporting_overflow(-1), (i8::MIN, true));
        assert_eq!(i8::MIN.rem_reporting_overflow(-1), (0, true));
        assert_eq!(9_i8.rem_reporting_overflow(-1), (0, true));
        assert_eq!(9_i8.div_reporting_overflow(-1), (-9, false));
        assert_eq!(255_u8.div_reporting_overflow(255), (1, false));
        assert_eq!(255_u8.rem_reporting_overflow(255), (0, false));
    }

    #[test]
    fn wrapping() {
        assert_eq!(OverflowReporting::wrapping_add(250_u8, 10), 4);
        assert_eq!(OverflowReporting::wrapping_sub(i16::MIN, 1), i16::MAX);
        assert_eq!(OverflowReporting::wrapping_mul(-128_i8, -1), -128);
    }

    #[test]
    fn trapping_in_range() {
        assert_eq!(100_i8.trapping_add(27), 127);
        assert_eq!(7_u64.trapping_div(2), 3);
        assert_eq!((-7_i32).trapping_rem(3), -1);
        assert_eq!((-128_i16).trapping_abs(), 128);
        assert_eq!(0_u8.trapping_neg(), 0);
        assert_eq!(1_000_u32.fast_mul(1_000), 1_000_000);
    }

    #[test]
    #[should_panic(expected = "arithmetic overflow in `add`")]
    fn trapping_add_overflow() {
        let _ = u8::MAX.trapping_add(1);
    }

    #[test]
    #[should_panic(expected = "arithmetic overflow in `abs`")]
    fn trapping_abs_of_min() {
        let _ = i32::MIN.trapping_abs();
    }

    #[test]
    #[should_panic(expected = "arithmetic overflow in `neg`")]
    fn trapping_neg_of_unsigned() {
        let _ = 1_u8.trapping_neg();
    }

    #[test]
    #[should_panic(expected = "division by zero in `div`")]
    fn trapping_division_by_zero() {
        let _ = 1_i32.trapping_div(0);
    }

    #[test]
    #[should_panic(expected = "arithmetic overflow in `rem`")]
    fn trapping_rem_by_minus_one() {
        let _ = 5_i32.trapping_rem(-1);
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "checked-fast-ops"))]
    #[should_panic(expected = "arithmetic overflow in `fast_sub`")]
    fn fast_ops_are_checked() {
        let _ = 0_u32.fast_sub(1);
    }
}
