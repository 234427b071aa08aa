// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Runtime string-to-float parsing
//!
//! The grammar is more permissive than literals in some ways and stricter
//! in others:
//!
//! ```text
//! string   = ["+" | "-"] (infinity | nan | hex | decimal)
//! infinity = "inf" | "infinity"
//! nan      = ["s"] "nan" ["(" payload ")"]
//! hex      = ("0x" | "0X") mantissa(16) [("p" | "P") exponent]
//! decimal  = mantissa(10) [("e" | "E") exponent]
//! mantissa = digits ["." [digits]] | "." digits
//! ```
//!
//! Keywords ignore ASCII case.  Separators and whitespace are not allowed
//! anywhere.  A NaN payload is hexadecimal after `0x`, octal after a leading
//! `0` and decimal otherwise.  It is truncated to the payload width of the
//! format.

use crate::detail::Rounded;
use crate::error::{ParseFloatError, SyntaxError, SyntaxErrorKind};
use crate::exact::{ExactFloat, Radix};
use crate::format::{BinaryFloat, FloatFormat};
use crate::nan::{self, NanPayload};
use crate::scan::Cursor;
use crate::BinaryFloatLike;
use num_bigint::BigUint;

/// Parse a float string into a format
///
/// ```
/// use numlit::format::FloatFormat;
/// use numlit::string::parse_binary_float;
///
/// let x = parse_binary_float("0x.8", FloatFormat::BINARY32).unwrap();
/// assert_eq!(x.to_bits(), 0.5_f32.to_bits().into());
///
/// let nan = parse_binary_float("-nan(0123)", FloatFormat::BINARY64).unwrap();
/// assert!(nan.is_sign_negative());
/// assert_eq!(nan.nan_payload().map(|p| p.payload), Some(0o123));
/// ```
///
/// # Errors
///
/// [`ParseFloatError::Syntax`] if the string is malformed, or
/// [`ParseFloatError::Overflow`] and [`ParseFloatError::Underflow`] if the
/// finite value is out of the range of the format
pub fn parse_binary_float(text: &str, format: FloatFormat) -> Result<BinaryFloat, ParseFloatError> {
    parse(text, format).inspect_err(|error| tracing::trace!(input = text, %format, %error, "rejected float string"))
}

/// Parse a float string into a typed float
///
/// ```
/// use numlit::string::parse_float;
///
/// assert_eq!(parse_float::<f64>("1e-1"), Ok(0.1));
/// assert_eq!(parse_float::<f32>("-INFINITY"), Ok(f32::NEG_INFINITY));
/// assert!(parse_float::<f32>("1e39").is_err());
/// ```
///
/// # Errors
///
/// See [`parse_binary_float`]
pub fn parse_float<F: BinaryFloatLike>(text: &str) -> Result<F, ParseFloatError> {
    parse_binary_float(text, F::FORMAT).map(F::from_binary_float)
}

/// Parse a float string, discarding the reason of a failure
#[must_use]
pub fn from_str_lossless<F: BinaryFloatLike>(text: &str) -> Option<F> {
    parse_float(text).ok()
}

fn parse(text: &str, format: FloatFormat) -> Result<BinaryFloat, ParseFloatError> {
    let mut cursor = Cursor::new(text);
    let negative = cursor.eat_any(b"+-") == Some(b'-');

    if cursor.is_end() {
        return Err(cursor.error(SyntaxErrorKind::Empty).into());
    }

    if cursor.eat_ignore_case(b"infinity") || cursor.eat_ignore_case(b"inf") {
        if !cursor.is_end() {
            return Err(cursor.unexpected().into());
        }
        return Ok(BinaryFloat::infinity(format, negative));
    }

    let signaling = cursor.eat_ignore_case(b"snan");

    if signaling || cursor.eat_ignore_case(b"nan") {
        let payload = if cursor.eat(b'(') { payload(&mut cursor)? } else { 0 };
        if !cursor.is_end() {
            return Err(cursor.unexpected().into());
        }
        return Ok(nan::encode_nan_truncating(format, negative, NanPayload { signaling, payload }));
    }

    let value = mantissa(&mut cursor, negative)?;
    if !cursor.is_end() {
        return Err(cursor.invalid_digit().into());
    }

    match value.round_to(format) {
        Rounded::Exact(x) | Rounded::Inexact(x) => Ok(x),
        Rounded::Overflow => Err(ParseFloatError::Overflow),
        Rounded::Underflow => Err(ParseFloatError::Underflow),
    }
}

/// Digits of a NaN payload up to the closing parenthesis
fn payload(cursor: &mut Cursor<'_>) -> Result<u128, SyntaxError> {
    let radix = if cursor.eat_ignore_case(b"0x") {
        16
    } else if cursor.peek() == Some(b'0') {
        8
    } else {
        10
    };

    let mut digits = Vec::new();
    cursor.digits(radix, false, &mut digits);

    if !cursor.eat(b')') {
        return Err(match cursor.peek() {
            None => cursor.error(SyntaxErrorKind::UnexpectedEnd),
            Some(_) => cursor.invalid_digit(),
        });
    }

    Ok(digits.iter().fold(0, |acc: u128, &d| {
        let digit = char::from(d).to_digit(radix).map_or(0, u128::from);
        acc.wrapping_mul(radix.into()).wrapping_add(digit)
    }))
}

fn mantissa(cursor: &mut Cursor<'_>, negative: bool) -> Result<ExactFloat, SyntaxError> {
    let hex = cursor.eat_ignore_case(b"0x");
    let radix = if hex { 16 } else { 10 };

    let mut digits = Vec::new();
    let whole = cursor.digits(radix, false, &mut digits);
    let fraction = if cursor.eat(b'.') {
        cursor.digits(radix, false, &mut digits)
    } else {
        0
    };

    if whole + fraction == 0 {
        return Err(cursor.error(SyntaxErrorKind::MissingDigits));
    }

    let marker = if hex { b"pP" } else { b"eE" };
    let exponent = match cursor.eat_any(marker) {
        Some(_) => cursor.exponent(false)?,
        None => 0,
    };

    let mantissa = BigUint::parse_bytes(&digits, radix).unwrap_or_default();
    #[allow(clippy::cast_possible_wrap)]
    let fraction = fraction as i64;

    Ok(if hex {
        ExactFloat::new(negative, mantissa, exponent - 4 * fraction, Radix::Binary)
    } else {
        ExactFloat::new(negative, mantissa, exponent - fraction, Radix::Decimal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const F32: FloatFormat = FloatFormat::BINARY32;

    fn bits(text: &str) -> Result<u128, ParseFloatError> {
        parse_binary_float(text, F32).map(BinaryFloat::to_bits)
    }

    fn syntax(offset: usize, kind: SyntaxErrorKind) -> Result<u128, ParseFloatError> {
        Err(SyntaxError::new(offset, kind).into())
    }

    #[test]
    fn permissive_mantissas() {
        assert_eq!(bits("1."), Ok(0x3f80_0000));
        assert_eq!(bits(".5"), Ok(0x3f00_0000));
        assert_eq!(bits("+0x1p1"), Ok(0x4000_0000));
        assert_eq!(bits("0X.8"), Ok(0x3f00_0000));
        assert_eq!(bits("0x1.8"), Ok(0x3fc0_0000));
        assert_eq!(bits("0x1."), Ok(0x3f80_0000));
        assert_eq!(bits("1E+1"), Ok(0x4120_0000));
        assert_eq!(bits("-0"), Ok(0x8000_0000));
        assert_eq!(bits("00012"), Ok(0x4140_0000));
    }

    #[test]
    fn keywords() {
        assert_eq!(bits("inf"), Ok(0x7f80_0000));
        assert_eq!(bits("-Infinity"), Ok(0xff80_0000));
        assert_eq!(bits("NaN"), Ok(0x7fc0_0000));
        assert_eq!(bits("sNaN"), Ok(0x7fa0_0000));
        assert_eq!(bits("nan()"), Ok(0x7fc0_0000));
        assert_eq!(bits("nan(0x10)"), Ok(0x7fc0_0010));
        assert_eq!(bits("-snan(10)"), Ok(0xffa0_000a));
    }

    #[test]
    fn payload_radix() {
        let payload = |text| parse_binary_float(text, F32).ok().and_then(BinaryFloat::nan_payload).map(|p| p.payload);
        assert_eq!(payload("nan(123)"), Some(123));
        assert_eq!(payload("nan(0123)"), Some(83));
        assert_eq!(payload("nan(0x123)"), Some(0x123));
        assert_eq!(payload("nan(0)"), Some(0));
        // Truncated to 21 bits
        assert_eq!(payload("nan(0xffffff)"), Some(0x1f_ffff));
    }

    #[test]
    fn malformed() {
        assert_eq!(bits(""), syntax(0, SyntaxErrorKind::Empty));
        assert_eq!(bits("-"), syntax(1, SyntaxErrorKind::Empty));
        assert_eq!(bits("."), syntax(1, SyntaxErrorKind::MissingDigits));
        assert_eq!(bits("0x"), syntax(2, SyntaxErrorKind::MissingDigits));
        assert_eq!(bits("1e"), syntax(2, SyntaxErrorKind::MissingDigits));
        assert_eq!(bits("1_000"), syntax(1, SyntaxErrorKind::UnexpectedChar('_')));
        assert_eq!(bits(" 1"), syntax(0, SyntaxErrorKind::MissingDigits));
        assert_eq!(bits("1 "), syntax(1, SyntaxErrorKind::UnexpectedChar(' ')));
        assert_eq!(bits("12a"), syntax(2, SyntaxErrorKind::InvalidDigit('a')));
        assert_eq!(bits("infinit"), syntax(3, SyntaxErrorKind::UnexpectedChar('i')));
        assert_eq!(bits("nan(12"), syntax(6, SyntaxErrorKind::UnexpectedEnd));
        assert_eq!(bits("nan(09)"), syntax(5, SyntaxErrorKind::InvalidDigit('9')));
        assert_eq!(bits("nan(1)x"), syntax(6, SyntaxErrorKind::UnexpectedChar('x')));
        assert_eq!(bits("--1"), syntax(1, SyntaxErrorKind::MissingDigits));
    }

    #[test]
    fn range_errors() {
        assert_eq!(bits("1e39"), Err(ParseFloatError::Overflow));
        assert_eq!(bits("-0x1p128"), Err(ParseFloatError::Overflow));
        assert_eq!(bits("1e-46"), Err(ParseFloatError::Underflow));
        assert_eq!(bits("0e999999999999999999999"), Ok(0));
        assert_eq!(bits("0x1p-149"), Ok(1));
        assert_eq!(bits("3.4028235e38"), Ok(0x7f7f_ffff));
    }
}
