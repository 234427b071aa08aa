// This file is part of the numlit project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Soft float types of the well-known formats without a Rust primitive

crate::binary_float!(
    /// IEEE 754 binary16
    pub struct F16(u16): 5, 10
);

crate::binary_float!(
    /// Brain floating point, the upper half of binary32
    pub struct BF16(u16): 8, 7
);

crate::binary_float!(
    /// The x87 80-bit extended precision format
    pub struct F80(u128): 15, 63, EXPLICIT
);

crate::binary_float!(
    /// IEEE 754 binary128
    pub struct F128(u128): 15, 112
);
