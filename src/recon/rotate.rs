// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Cyclic 3-bit rotation (pipeline stage 3).
//!
//! The forward encoder rotates every byte right by 3 bits; rotating left by
//! 3 is its exact two-sided inverse for every value in `0..=255`.

use crate::pixel::PixelBuffer;

/// Number of bit positions rotated by the forward encoder.
const ROTATION_BITS: u32 = 3;

/// Rotate every byte left by 3 bits (undoes the forward rotate-right-3).
pub fn rotate_left_3(mut buffer: PixelBuffer) -> PixelBuffer {
    for b in buffer.data_mut() {
        *b = b.rotate_left(ROTATION_BITS);
    }
    buffer
}

/// Rotate every byte right by 3 bits (the forward half; kept for generating
/// paired artifacts and round-trip tests).
pub fn rotate_right_3(mut buffer: PixelBuffer) -> PixelBuffer {
    for b in buffer.data_mut() {
        *b = b.rotate_right(ROTATION_BITS);
    }
    buffer
}
