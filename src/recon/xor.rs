// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Companion-image XOR (pipeline stages 1 and 4).
//!
//! The forward encoder XORs the target against a same-dimension companion
//! image; XORing again with the same companion reverses it. Both pipeline
//! uses (undoing the outer layer, and the final reconstruction) are this one
//! operation.

use crate::pixel::PixelBuffer;

use super::error::{ReconError, Result};

/// XOR every byte of `target` against the corresponding byte of `companion`.
///
/// Consumes `target` and returns the transformed buffer; `companion` is
/// read-only. Self-inverse: `xor_images(xor_images(a, b)?, b)? == a`.
///
/// # Errors
/// [`ReconError::DimensionMismatch`] if the buffers differ in width or
/// height. The target is dropped without producing output; the companion is
/// untouched.
pub fn xor_images(mut target: PixelBuffer, companion: &PixelBuffer) -> Result<PixelBuffer> {
    if !target.same_dimensions(companion) {
        return Err(ReconError::DimensionMismatch {
            left: (target.width(), target.height()),
            right: (companion.width(), companion.height()),
        });
    }
    for (t, c) in target.data_mut().iter_mut().zip(companion.data()) {
        *t ^= c;
    }
    Ok(target)
}
