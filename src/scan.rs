// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Byte cursor shared by the literal and string parsers

use crate::error::{SyntaxError, SyntaxErrorKind};

/// Cap of parsed exponents, far beyond any format yet safe to offset by a
/// digit count
const EXPONENT_CAP: i64 = 1 << 50;

pub struct Cursor<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub const fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub fn rest(&self) -> &'a [u8] {
        &self.text.as_bytes()[self.offset..]
    }

    pub fn peek(&self) -> Option<u8> {
        self.rest().first().copied()
    }

    pub fn is_end(&self) -> bool {
        self.offset == self.text.len()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;
        Some(byte)
    }

    pub fn eat(&mut self, byte: u8) -> bool {
        let matched = self.peek() == Some(byte);
        self.offset += usize::from(matched);
        matched
    }

    /// Consume one of `set`
    pub fn eat_any(&mut self, set: &[u8]) -> Option<u8> {
        let byte = self.peek().filter(|b| set.contains(b))?;
        self.offset += 1;
        Some(byte)
    }

    /// Consume `word` regardless of ASCII case
    pub fn eat_ignore_case(&mut self, word: &[u8]) -> bool {
        let rest = self.rest();
        let matched = rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word);
        if matched {
            self.offset += word.len();
        }
        matched
    }

    pub const fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(self.offset, kind)
    }

    /// Error for whatever stands at the cursor
    pub fn unexpected(&self) -> SyntaxError {
        match self.text[self.offset..].chars().next() {
            Some(c) => self.error(SyntaxErrorKind::UnexpectedChar(c)),
            None => self.error(SyntaxErrorKind::UnexpectedEnd),
        }
    }

    /// Like [`Cursor::unexpected`], but blames alphanumerics as bad digits
    pub fn invalid_digit(&self) -> SyntaxError {
        match self.text[self.offset..].chars().next() {
            Some(c) if c.is_ascii_alphanumeric() => self.error(SyntaxErrorKind::InvalidDigit(c)),
            _ => self.unexpected(),
        }
    }

    /// Append a run of digits in `radix` to `out`, returning how many
    ///
    /// With `separators`, underscores may follow the first digit.
    pub fn digits(&mut self, radix: u32, separators: bool, out: &mut Vec<u8>) -> usize {
        let mut count = 0;

        while let Some(byte) = self.peek() {
            if char::from(byte).is_digit(radix) {
                out.push(byte);
                count += 1;
            } else if !(separators && count > 0 && byte == b'_') {
                break;
            }
            self.offset += 1;
        }
        count
    }

    /// A signed decimal exponent, saturated far beyond any format
    pub fn exponent(&mut self, separators: bool) -> Result<i64, SyntaxError> {
        let negative = self.eat_any(b"+-") == Some(b'-');
        let mut digits = Vec::new();

        if self.digits(10, separators, &mut digits) == 0 {
            return Err(self.error(SyntaxErrorKind::MissingDigits));
        }

        let magnitude = digits
            .iter()
            .fold(0, |acc: i64, &d| (acc * 10 + i64::from(d - b'0')).min(EXPONENT_CAP));

        Ok(if negative { -magnitude } else { magnitude })
    }
}
