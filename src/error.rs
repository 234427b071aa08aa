// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types
//!
//! Syntax and encoding errors are returned to the caller.  Arithmetic and
//! conversion overflow is fatal: [`OverflowError`] only exists to format the
//! panic message of the trapping operations.

use thiserror::Error;

/// What went wrong in a literal or a float string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The input is empty, or holds only a sign
    Empty,
    /// A character that the grammar does not allow at this position
    UnexpectedChar(char),
    /// A digit run (whole part, fraction, exponent or payload) is empty
    MissingDigits,
    /// A digit that is not valid in the radix of its run
    InvalidDigit(char),
    /// A hexadecimal float literal without the binary exponent
    MissingExponent,
    /// The input ends in the middle of a token
    UnexpectedEnd,
}

/// Malformed literal or float string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid numeric syntax at byte {offset}: {kind:?}")]
pub struct SyntaxError {
    /// Byte offset of the offending position
    pub offset: usize,
    /// Reason of the rejection
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub(crate) const fn new(offset: usize, kind: SyntaxErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// Failure of [`crate::string::parse_float`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFloatError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The finite value is too large for the format
    #[error("value overflows the target format")]
    Overflow,

    /// The nonzero value rounds to zero in the format
    #[error("value underflows the target format")]
    Underflow,
}

/// Failure to encode a NaN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("NaN payload {payload:#x} does not fit in {max_bits} bits")]
    PayloadTooWide { payload: u128, max_bits: u32 },
}

/// Message of a fatal overflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverflowError {
    #[error("arithmetic overflow in `{0}`")]
    Arithmetic(&'static str),

    #[error("division by zero in `{0}`")]
    DivisionByZero(&'static str),

    #[error("value is not representable in the target type")]
    Conversion,

    #[error("NaN or infinity cannot be converted to an integer")]
    NotFinite,
}
