// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! NaN payloads and IEEE 754 comparisons
//!
//! The top fraction bit of a NaN is the quiet bit, as IEEE 754-2008
//! recommends.  This crate also reserves the next bit: a signaling NaN has
//! the quiet bit clear and that bit set, so a signaling NaN with a zero
//! payload is still distinct from infinity.  The reserved bit goes beyond
//! IEEE 754 and costs one payload bit, which leaves
//! [`FloatFormat::payload_bits`] for the payload.

use crate::error::EncodingError;
use crate::format::{BinaryFloat, Decoded, FloatFormat};
use core::cmp::Ordering;

/// Contents of a NaN besides its sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NanPayload {
    pub signaling: bool,
    pub payload: u128,
}

impl NanPayload {
    #[must_use]
    pub const fn quiet(payload: u128) -> Self {
        Self {
            signaling: false,
            payload,
        }
    }

    #[must_use]
    pub const fn signaling(payload: u128) -> Self {
        Self {
            signaling: true,
            payload,
        }
    }
}

/// Encode a NaN
///
/// # Errors
///
/// [`EncodingError::PayloadTooWide`] if the payload needs more than
/// [`FloatFormat::payload_bits`] bits.
pub fn encode_nan(format: FloatFormat, negative: bool, nan: NanPayload) -> Result<BinaryFloat, EncodingError> {
    if nan.payload > format.payload_mask() {
        tracing::trace!(payload = nan.payload, %format, "NaN payload too wide");
        return Err(EncodingError::PayloadTooWide {
            payload: nan.payload,
            max_bits: format.payload_bits(),
        });
    }
    Ok(encode_nan_truncating(format, negative, nan))
}

/// Encode a NaN, keeping only the low bits of the payload that fit
#[must_use]
pub const fn encode_nan_truncating(format: FloatFormat, negative: bool, nan: NanPayload) -> BinaryFloat {
    let flag = if nan.signaling {
        format.signaling_bit()
    } else {
        format.quiet_bit()
    };
    let sign = if negative { format.sign_bit() } else { 0 };
    let exponent = format.max_biased_exponent() << format.exponent_shift();
    let payload = nan.payload & format.payload_mask();
    BinaryFloat::from_bits(format, sign | exponent | format.integer_bit() | flag | payload)
}

impl BinaryFloat {
    /// Flag and payload of a NaN, or `None` for other values
    #[must_use]
    pub const fn nan_payload(self) -> Option<NanPayload> {
        match self.decode() {
            Decoded::Nan { fraction, .. } => Some(NanPayload {
                signaling: fraction & self.format().quiet_bit() == 0,
                payload: fraction & self.format().payload_mask(),
            }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_signaling_nan(self) -> bool {
        matches!(self.nan_payload(), Some(NanPayload { signaling: true, .. }))
    }

    /// The quiet NaN propagated by an operation on a signaling NaN
    #[must_use]
    pub const fn quieted(self) -> Self {
        match self.nan_payload() {
            Some(NanPayload { signaling: true, payload }) => {
                encode_nan_truncating(self.format(), self.is_sign_negative(), NanPayload::quiet(payload))
            }
            _ => self,
        }
    }

    /// Unsigned key of the bits, ascending in the total order
    const fn sign_folded(self) -> u128 {
        let format = self.format();

        if self.is_sign_negative() {
            !self.to_bits() & format.mask()
        } else {
            self.to_bits() | format.sign_bit()
        }
    }

    /// Key that orders the encodings by IEEE 754 `totalOrder`
    ///
    /// NaNs rank by [`BinaryFloat::nan_payload`], then by their bits.
    const fn total_key(self) -> (u128, u128) {
        let x = self.canonical();
        let conventional = match x.nan_payload() {
            Some(nan) => encode_nan_truncating(x.format(), x.is_sign_negative(), nan),
            None => x,
        };
        (conventional.sign_folded(), x.sign_folded())
    }

    /// IEEE 754 `totalOrder` as an [`Ordering`]
    ///
    /// `-NaN < -∞ < ... < -0 < +0 < ... < +∞ < +NaN`.  Signaling NaNs sort
    /// inside quiet ones, and NaNs with larger payloads sort outward.  A NaN
    /// with stray bits above its payload sorts by its flag and payload, next
    /// to the conventional encoding of the same datum.
    ///
    /// # Panics
    ///
    /// If the formats differ
    #[must_use]
    pub fn total_cmp(self, other: Self) -> Ordering {
        assert_eq!(self.format(), other.format(), "comparing values of different formats");
        self.total_key().cmp(&other.total_key())
    }

    /// IEEE 754 `totalOrder(self, other)`, i.e. `self <= other` in the total order
    ///
    /// # Panics
    ///
    /// If the formats differ
    #[must_use]
    pub fn total_order(self, other: Self) -> bool {
        self.total_cmp(other) != Ordering::Greater
    }

    /// Numeric comparison: `None` if either is NaN, and `-0 == +0`
    ///
    /// # Panics
    ///
    /// If the formats differ
    #[must_use]
    pub fn ieee_cmp(self, other: Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        if self.is_zero() && other.is_zero() {
            return Some(Ordering::Equal);
        }
        Some(self.total_cmp(other))
    }

    fn pick_number(self, other: Self, keep: Ordering) -> Self {
        if self.is_signaling_nan() {
            return self.quieted();
        }
        if other.is_signaling_nan() {
            return other.quieted();
        }

        match self.ieee_cmp(other) {
            Some(ordering) if ordering == keep.reverse() => other,
            Some(_) => self,
            None if self.is_nan() => other,
            None => self,
        }
    }

    /// IEEE 754-2008 `minNum`
    ///
    /// A number beats a quiet NaN, while a signaling NaN turns the result
    /// into a quiet NaN.  Of two zeros, `self` is returned.
    ///
    /// # Panics
    ///
    /// If the formats differ
    #[must_use]
    pub fn min_num(self, other: Self) -> Self {
        self.pick_number(other, Ordering::Less)
    }

    /// IEEE 754-2008 `maxNum`
    ///
    /// See [`BinaryFloat::min_num`] for NaN and zero handling.
    ///
    /// # Panics
    ///
    /// If the formats differ
    #[must_use]
    pub fn max_num(self, other: Self) -> Self {
        self.pick_number(other, Ordering::Greater)
    }
}
