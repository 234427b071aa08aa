// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Numeric literals as written in source code
//!
//! ```text
//! literal  = ["-"] (binary | octal | hex | decimal)
//! binary   = "0b" run(2)
//! octal    = "0o" run(8)
//! hex      = "0x" run(16) ["." run(16)] [("p" | "P") exponent]
//! decimal  = run(10) ["." run(10)] [("e" | "E") exponent]
//! exponent = ["+" | "-"] run(10)
//! run(r)   = digit(r) (digit(r) | "_")*
//! ```
//!
//! A hexadecimal literal with a fraction must have a binary exponent.  The
//! minus sign belongs to the literal, so `-128` is an `i8` literal rather than
//! the negation of an out-of-range `128`.

use crate::convert::ConversionOutcome;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::exact::{ExactFloat, ExactInteger, Radix};
use crate::format::{NumericType, Value};
use crate::scan::Cursor;
use crate::Numeric;
use num_bigint::{BigInt, BigUint, Sign};

/// A parsed literal of either kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Integer(ExactInteger),
    Float(ExactFloat),
}

impl Literal {
    /// Convert to a numeric type
    ///
    /// Float literals have no integer conversion and give
    /// [`ConversionOutcome::Failure`] for integer targets.
    #[must_use]
    pub fn convert(&self, to: NumericType) -> ConversionOutcome<Value> {
        match self {
            Self::Integer(x) => x.convert(to),
            Self::Float(x) => x.convert(to),
        }
    }

    /// Typed version of [`Literal::convert`]
    ///
    /// ```
    /// use numlit::literal::parse_literal;
    ///
    /// let min = parse_literal("-128").unwrap();
    /// assert_eq!(min.to::<i8>().exact(), Some(-128));
    /// assert_eq!(min.to::<u8>().exact(), None);
    ///
    /// let half = parse_literal("0x1p-1").unwrap();
    /// assert_eq!(half.to::<f32>().exact(), Some(0.5));
    /// ```
    #[must_use]
    pub fn to<T: Numeric>(&self) -> ConversionOutcome<T> {
        self.convert(T::TYPE).map(T::from_value)
    }
}

/// Lexical pieces of a literal
struct Parts {
    negative: bool,
    radix: u32,
    /// Whole and fraction digits, without separators
    digits: Vec<u8>,
    fraction_digits: usize,
    exponent: Option<i64>,
    /// Offset of the first `.`, `e` or `p`, which make a float literal
    float_marker: Option<usize>,
    /// Offset of the radix prefix
    prefix: Option<usize>,
}

impl Parts {
    fn mantissa(&self) -> BigUint {
        BigUint::parse_bytes(&self.digits, self.radix).unwrap_or_default()
    }
}

fn scan(text: &str) -> Result<Parts, SyntaxError> {
    let mut cursor = Cursor::new(text);
    let negative = cursor.eat(b'-');

    if cursor.is_end() {
        return Err(cursor.error(SyntaxErrorKind::Empty));
    }

    let rest = cursor.rest();
    let prefix = (rest.len() >= 2 && rest[0] == b'0' && matches!(rest[1], b'b' | b'o' | b'x')).then(|| cursor.offset() + 1);
    let radix = match prefix.map(|_| rest[1]) {
        Some(b'b') => 2,
        Some(b'o') => 8,
        Some(_) => 16,
        None => 10,
    };

    if prefix.is_some() {
        cursor.bump();
        cursor.bump();
    }

    let mut parts = Parts {
        negative,
        radix,
        digits: Vec::new(),
        fraction_digits: 0,
        exponent: None,
        float_marker: None,
        prefix,
    };

    if cursor.digits(radix, true, &mut parts.digits) == 0 {
        return Err(cursor.error(SyntaxErrorKind::MissingDigits));
    }

    if matches!(radix, 10 | 16) && cursor.peek() == Some(b'.') {
        parts.float_marker = Some(cursor.offset());
        cursor.bump();
        parts.fraction_digits = cursor.digits(radix, true, &mut parts.digits);

        if parts.fraction_digits == 0 {
            return Err(cursor.error(SyntaxErrorKind::MissingDigits));
        }
    }

    let marker = match radix {
        10 => cursor.eat_any(b"eE"),
        16 => cursor.eat_any(b"pP"),
        _ => None,
    };

    if marker.is_some() {
        parts.float_marker.get_or_insert(cursor.offset() - 1);
        parts.exponent = Some(cursor.exponent(true)?);
    } else if radix == 16 && parts.float_marker.is_some() {
        return Err(match cursor.peek() {
            None => cursor.error(SyntaxErrorKind::MissingExponent),
            Some(_) => cursor.invalid_digit(),
        });
    }

    if !cursor.is_end() {
        return Err(cursor.invalid_digit());
    }

    Ok(parts)
}

fn to_integer(parts: &Parts) -> ExactInteger {
    let sign = if parts.negative { Sign::Minus } else { Sign::Plus };
    BigInt::from_biguint(sign, parts.mantissa()).into()
}

/// Parse a literal, choosing its kind by its syntax
///
/// # Errors
///
/// If the text is not a literal of either kind
pub fn parse_literal(text: &str) -> Result<Literal, SyntaxError> {
    let parts = scan(text).inspect_err(|error| tracing::trace!(input = text, %error, "rejected literal"))?;

    Ok(match parts.float_marker {
        Some(_) => Literal::Float(to_float(&parts)),
        None => Literal::Integer(to_integer(&parts)),
    })
}

/// Parse an integer literal
///
/// ```
/// use numlit::literal::parse_integer_literal;
///
/// assert!(parse_integer_literal("0x_ff").is_err());
/// assert_eq!(parse_integer_literal("0xff_ff").unwrap().to_string(), "65535");
/// assert_eq!(parse_integer_literal("-0o17").unwrap().to_string(), "-15");
/// assert_eq!(parse_integer_literal("0017").unwrap().to_string(), "17");
/// ```
///
/// # Errors
///
/// If the text is not an integer literal, including float literals
pub fn parse_integer_literal(text: &str) -> Result<ExactInteger, SyntaxError> {
    let parts = scan(text).inspect_err(|error| tracing::trace!(input = text, %error, "rejected integer literal"))?;

    if let Some(offset) = parts.float_marker {
        let c = char::from(text.as_bytes()[offset]);
        return Err(SyntaxError::new(offset, SyntaxErrorKind::UnexpectedChar(c)));
    }
    Ok(to_integer(&parts))
}

fn to_float(parts: &Parts) -> ExactFloat {
    #[allow(clippy::cast_possible_wrap)]
    let fraction_digits = parts.fraction_digits as i64;
    let exponent = parts.exponent.unwrap_or(0);

    if parts.radix == 16 {
        ExactFloat::new(parts.negative, parts.mantissa(), exponent - 4 * fraction_digits, Radix::Binary)
    } else {
        ExactFloat::new(parts.negative, parts.mantissa(), exponent - fraction_digits, Radix::Decimal)
    }
}

/// Parse a floating-point literal
///
/// Decimal integers are valid float literals.  Hexadecimal ones need the
/// binary exponent.
///
/// ```
/// use numlit::format::FloatFormat;
/// use numlit::literal::parse_float_literal;
///
/// let x = parse_float_literal("0x1.8p-1").unwrap();
/// assert_eq!(x.to_float(FloatFormat::BINARY64).to_bits(), 0.75_f64.to_bits().into());
/// assert!(parse_float_literal(".5").is_err());
/// assert!(parse_float_literal("5.").is_err());
/// assert!(parse_float_literal("0x1.").is_err());
/// ```
///
/// # Errors
///
/// If the text is not a float literal
pub fn parse_float_literal(text: &str) -> Result<ExactFloat, SyntaxError> {
    let parts = scan(text).inspect_err(|error| tracing::trace!(input = text, %error, "rejected float literal"))?;

    if let Some(offset) = parts.prefix {
        if parts.radix != 16 {
            let c = char::from(text.as_bytes()[offset]);
            return Err(SyntaxError::new(offset, SyntaxErrorKind::UnexpectedChar(c)));
        }
        if parts.exponent.is_none() {
            return Err(SyntaxError::new(text.len(), SyntaxErrorKind::MissingExponent));
        }
    }
    Ok(to_float(&parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(text: &str) -> SyntaxError {
        parse_literal(text).expect_err(text)
    }

    #[test]
    fn integer_radixes() {
        let value = |text| parse_integer_literal(text).map(|x| x.to_string());
        assert_eq!(value("0b1010"), Ok("10".into()));
        assert_eq!(value("0o777"), Ok("511".into()));
        assert_eq!(value("0xDEAD_beef"), Ok("3735928559".into()));
        assert_eq!(value("1_000_000"), Ok("1000000".into()));
        assert_eq!(value("-0"), Ok("0".into()));
        assert_eq!(value("340282366920938463463374607431768211456"), Ok("340282366920938463463374607431768211456".into()));
    }

    #[test]
    fn kind_follows_syntax() {
        assert!(matches!(parse_literal("12"), Ok(Literal::Integer(_))));
        assert!(matches!(parse_literal("1e2"), Ok(Literal::Float(_))));
        assert!(matches!(parse_literal("1.0"), Ok(Literal::Float(_))));
        assert!(matches!(parse_literal("0x1p0"), Ok(Literal::Float(_))));
        assert!(matches!(parse_literal("0x1e2"), Ok(Literal::Integer(_))));
    }

    #[test]
    fn malformed() {
        assert_eq!(error(""), SyntaxError::new(0, SyntaxErrorKind::Empty));
        assert_eq!(error("-"), SyntaxError::new(1, SyntaxErrorKind::Empty));
        assert_eq!(error(".5"), SyntaxError::new(0, SyntaxErrorKind::MissingDigits));
        assert_eq!(error("5."), SyntaxError::new(2, SyntaxErrorKind::MissingDigits));
        assert_eq!(error("0x1."), SyntaxError::new(4, SyntaxErrorKind::MissingDigits));
        assert_eq!(error("0x1.8"), SyntaxError::new(5, SyntaxErrorKind::MissingExponent));
        assert_eq!(error("0x.8p1"), SyntaxError::new(2, SyntaxErrorKind::MissingDigits));
        assert_eq!(error("1e"), SyntaxError::new(2, SyntaxErrorKind::MissingDigits));
        assert_eq!(error("0b102"), SyntaxError::new(4, SyntaxErrorKind::InvalidDigit('2')));
        assert_eq!(error("0X10"), SyntaxError::new(1, SyntaxErrorKind::InvalidDigit('X')));
        assert_eq!(error("+1"), SyntaxError::new(0, SyntaxErrorKind::MissingDigits));
        assert_eq!(error("1 "), SyntaxError::new(1, SyntaxErrorKind::UnexpectedChar(' ')));
        assert_eq!(error("_1"), SyntaxError::new(0, SyntaxErrorKind::MissingDigits));
        assert_eq!(error("0b1.0"), SyntaxError::new(3, SyntaxErrorKind::UnexpectedChar('.')));
    }

    #[test]
    fn integer_parser_rejects_floats() {
        assert_eq!(parse_integer_literal("1.5"), Err(SyntaxError::new(1, SyntaxErrorKind::UnexpectedChar('.'))));
        assert_eq!(parse_integer_literal("1e5"), Err(SyntaxError::new(1, SyntaxErrorKind::UnexpectedChar('e'))));
    }

    #[test]
    fn float_parser_rejects_other_radixes() {
        assert_eq!(parse_float_literal("0b1"), Err(SyntaxError::new(1, SyntaxErrorKind::UnexpectedChar('b'))));
        assert_eq!(parse_float_literal("0x10"), Err(SyntaxError::new(4, SyntaxErrorKind::MissingExponent)));
        assert!(parse_float_literal("10").is_ok());
    }

    #[test]
    fn float_parts() {
        let x = parse_float_literal("-1_2.5_0e-1_0").unwrap();
        assert!(x.is_sign_negative());
        assert_eq!(x.mantissa(), &BigUint::from(1250_u32));
        assert_eq!(x.exponent(), -12);
        assert_eq!(x.radix(), Radix::Decimal);

        let x = parse_float_literal("0xf.fffp-3").unwrap();
        assert_eq!(x.mantissa(), &BigUint::from(0xffff_u32));
        assert_eq!(x.exponent(), -15);
        assert_eq!(x.radix(), Radix::Binary);
    }
}
