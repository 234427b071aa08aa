// This file is part of the numlit project.
//
// Copyright (C) 2024-2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
#![allow(clippy::float_cmp)]

use core::cmp::Ordering;
use core::fmt::Debug;
use numlit::convert::{convert, exact};
use numlit::format::BinaryFloat;
use numlit::literal::{parse_float_literal, parse_integer_literal};
use numlit::string::{from_str_lossless, parse_binary_float, parse_float};
use numlit::{binary_float, BinaryFloatLike, FloatClass, BF16, F16};

binary_float!(struct F8E2M5(u8): 2, 5);
binary_float!(struct F8E3M4(u8): 3, 4);
binary_float!(struct F8E4M3(u8): 4, 3);
binary_float!(struct F8E5M2(u8): 5, 2);

/// Test floating-point identity like Object.is in JavaScript
///
/// NaNs are considered identical to each other, while +0 and -0 are
/// considered different.
fn same<T: BinaryFloatLike>(x: T, y: T) -> bool {
    let (x, y) = (x.to_binary_float(), y.to_binary_float());
    x.to_bits() == y.to_bits() || x.is_nan() && y.is_nan()
}

/// Every value of a format up to 16 bits wide
fn all<T: BinaryFloatLike>() -> impl Iterator<Item = T> {
    (0..1_u128 << T::FORMAT.bit_width()).map(|bits| T::from_binary_float(BinaryFloat::from_bits(T::FORMAT, bits)))
}

fn check_equality<T: BinaryFloatLike + Debug>() {
    for x in all::<T>() {
        assert_eq!(x.ne(&x), x.float_class() == FloatClass::Nan, "{x:?}");
    }
}

fn check_f64_round_trip<T: BinaryFloatLike + Debug>() {
    for x in all::<T>() {
        let wide: f64 = exact(x);
        assert!(same(exact::<f64, T>(wide), x), "{x:?}");
        assert_eq!(convert::<T, f64>(x).is_exact(), x.float_class() != FloatClass::Nan, "{x:?}");
    }
}

fn check_decimal_round_trip<T: BinaryFloatLike + Debug>() {
    for x in all::<T>().filter(|x| x.float_class() != FloatClass::Nan) {
        let text = exact::<T, f64>(x).to_string();
        assert!(same(parse_float::<T>(&text).unwrap(), x), "{text}");
    }
}

fn check_hex_round_trip<T: BinaryFloatLike + Debug>() {
    for x in all::<T>() {
        let text = x.to_binary_float().to_hex_string();
        let y = parse_float::<T>(&text).unwrap();

        if x.float_class() == FloatClass::Nan {
            assert!(y.to_binary_float().is_nan(), "{text}");
            assert_eq!(y.to_binary_float().is_sign_negative(), x.to_binary_float().is_sign_negative());
        } else {
            assert!(same(x, y), "{text}");
        }
    }
}

fn check_total_order<T: BinaryFloatLike + Debug>() {
    let values: Vec<T> = all().collect();

    for &x in &values {
        for &y in &values {
            assert!(x.total_order(y) || y.total_order(x), "{x:?} {y:?}");
            assert_eq!(x.total_order(y) && y.total_order(x), x.to_binary_float() == y.to_binary_float());

            if let Some(ordering) = x.partial_cmp(&y).filter(|&o| o != Ordering::Equal) {
                assert_eq!(x.to_binary_float().total_cmp(y.to_binary_float()), ordering, "{x:?} {y:?}");
            }
        }
    }
}

fn check_min_max<T: BinaryFloatLike + Debug>() {
    let nan = T::from_binary_float(BinaryFloat::nan(T::FORMAT));

    for x in all::<T>().filter(|x| x.float_class() != FloatClass::Nan) {
        assert!(same(x.min_num(nan), x));
        assert!(same(nan.max_num(x), x));
    }
}

fn check_all<T: BinaryFloatLike + Debug>() {
    check_equality::<T>();
    check_f64_round_trip::<T>();
    check_decimal_round_trip::<T>();
    check_hex_round_trip::<T>();
    check_min_max::<T>();
}

#[test]
fn test_eight_bit_formats() {
    check_all::<F8E2M5>();
    check_all::<F8E3M4>();
    check_all::<F8E4M3>();
    check_all::<F8E5M2>();

    check_total_order::<F8E3M4>();
    check_total_order::<F8E5M2>();
}

#[test]
fn test_sixteen_bit_formats() {
    check_all::<F16>();
    check_all::<BF16>();
}

#[test]
fn test_minus_zero_precedes_plus_zero() {
    let (negative, positive) = (-0.0_f64, 0.0_f64);
    assert_eq!(negative, positive);
    assert!(negative.total_order(positive));
    assert!(!positive.total_order(negative));
}

#[test]
fn test_hex_floats() {
    let literal = |text| parse_float_literal(text).map(|x| x.to_float(numlit::FloatFormat::BINARY64).to_bits());
    let expected = libm::ldexp(f64::from(0xffff), -15);

    assert_eq!(literal("0x1.8p-1"), Ok(0.75_f64.to_bits().into()));
    assert_eq!(literal("0xf.fffp-3"), Ok(expected.to_bits().into()));
    assert_eq!(expected, 1.999_969_482_421_875);

    assert_eq!(parse_float::<f64>("0x1.8p-1"), Ok(0.75));
    assert_eq!(parse_float::<f64>("0xf.fffp-3"), Ok(expected));
}

#[test]
fn test_strings_are_more_permissive_than_literals() {
    for text in [".5", "5.", "0x1.", "0x1.8", "0X1p0", "+1", "nan", "-inf"] {
        assert!(parse_float_literal(text).is_err(), "{text}");
        assert!(from_str_lossless::<f64>(text).is_some(), "{text}");
    }
    assert_eq!(parse_float::<f64>("0x1."), Ok(1.0));

    for text in ["1_000", "0x1_0p0", "0b101", "0o17"] {
        assert!(from_str_lossless::<f64>(text).is_none(), "{text}");
        assert!(parse_float_literal(text).is_ok() || parse_integer_literal(text).is_ok(), "{text}");
    }
}

#[test]
fn test_nan_payload_radix() {
    let payload = |text| {
        let format = numlit::FloatFormat::BINARY64;
        parse_binary_float(text, format).ok().and_then(BinaryFloat::nan_payload).map(|p| p.payload)
    };
    assert_eq!(payload("nan(123)"), Some(123));
    assert_eq!(payload("nan(0123)"), Some(83));
    assert_eq!(payload("NAN(0x7b)"), Some(123));
}
