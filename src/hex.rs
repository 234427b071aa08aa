// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Hexadecimal rendering of floats
//!
//! The output is accepted by [`crate::string::parse_binary_float`], which
//! maps it back to the same encoding.  Two kinds of encodings print as
//! another one of the same datum:
//!
//! - non-canonical encodings of the explicit-integer-bit format;
//! - NaNs whose flags disagree with the signaling-bit convention of
//!   [`crate::nan`].

use crate::format::{BinaryFloat, Decoded};
use crate::nan::NanPayload;
use core::fmt;

impl BinaryFloat {
    /// Render as `[-]0x1.<hex>p<exponent>`
    ///
    /// ```
    /// use numlit::format::{BinaryFloat, FloatFormat};
    ///
    /// let x = BinaryFloat::from_bits(FloatFormat::BINARY64, 0.75_f64.to_bits().into());
    /// assert_eq!(x.to_hex_string(), "0x1.8p-1");
    ///
    /// let max = BinaryFloat::greatest_finite(FloatFormat::BINARY16, true);
    /// assert_eq!(max.to_hex_string(), "-0x1.ffcp+15");
    /// ```
    #[must_use]
    pub fn to_hex_string(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BinaryFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.canonical();
        let format = x.format();

        if x.is_sign_negative() {
            f.write_str("-")?;
        }

        let (significand, exponent) = match x.decode() {
            Decoded::Zero { .. } => return f.write_str("0x0p+0"),
            Decoded::Infinite { .. } => return f.write_str("inf"),
            Decoded::Nan { .. } => {
                let NanPayload { signaling, payload } = x.nan_payload().unwrap_or_default();
                f.write_str(if signaling { "snan" } else { "nan" })?;
                return match payload {
                    0 => Ok(()),
                    _ => write!(f, "({payload:#x})"),
                };
            }
            Decoded::Finite {
                significand, exponent, ..
            } => (significand, exponent),
        };

        let digits = format.significand_bits();
        let fraction = significand & format.fraction_mask();
        #[allow(clippy::cast_possible_wrap)]
        let exponent = exponent + digits as i32;

        write!(f, "0x{}", significand >> digits)?;

        if fraction != 0 {
            let pad = (4 - digits % 4) % 4;
            let width = ((digits + pad) / 4) as usize;
            let nibbles = format!("{:0width$x}", fraction << pad);
            write!(f, ".{}", nibbles.trim_end_matches('0'))?;
        }

        write!(f, "p{exponent:+}")
    }
}
