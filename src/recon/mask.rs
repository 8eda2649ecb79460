// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Seed-indexed mask reversal (pipeline stage 2) and its forward half.
//!
//! The forward encoder walked `n` positions of the target, XORing each
//! against a cyclically-sampled pixel of a smaller mask image and recording
//! the masked RGB result in a side-channel file. Positions in the target
//! rotate from a seed offset so the touched set is not contiguous; the mask
//! is tiled by taking the position index modulo its pixel count. The
//! reversal must reproduce this addressing exactly or recovered pixels land
//! in the wrong places.
//!
//! Position arithmetic for index `i`:
//!
//! ```text
//! pos_target = (seed + i) mod target.pixel_count()
//! pos_mask   = i mod mask.pixel_count()
//! ```

use crate::pixel::PixelBuffer;

use super::error::{ReconError, Result};
use super::record::MaskRecord;

/// Check the stage preconditions shared by both directions.
///
/// The mask must have at least one pixel before any modulo is computed, and
/// the target must be non-empty whenever any position will be touched.
fn check_degenerate(target: &PixelBuffer, mask: &PixelBuffer, touched: usize) -> Result<()> {
    if mask.pixel_count() == 0 {
        return Err(ReconError::EmptyMask);
    }
    if touched > 0 && target.pixel_count() == 0 {
        return Err(ReconError::EmptyTarget);
    }
    Ok(())
}

/// Undo the masking step, repairing the touched positions of `target`.
///
/// For each triple `i` of `record`, writes `triples[i][c] XOR
/// mask[pos_mask*3 + c]` into `target[pos_target*3 + c]`. Bytes outside the
/// touched positions pass through unchanged from the input buffer.
///
/// Consumes `target`; `mask` and `record` are read-only.
///
/// # Errors
/// - [`ReconError::EmptyMask`] if the mask has zero pixels (checked before
///   any modulo).
/// - [`ReconError::EmptyTarget`] if the record is non-empty but the target
///   has zero pixels.
pub fn reverse_mask(
    mut target: PixelBuffer,
    mask: &PixelBuffer,
    record: &MaskRecord,
) -> Result<PixelBuffer> {
    check_degenerate(&target, mask, record.len())?;

    let target_pixels = target.pixel_count() as u64;
    let mask_pixels = mask.pixel_count();
    let mask_data = mask.data();
    let data = target.data_mut();

    for (i, triple) in record.triples.iter().enumerate() {
        let pos = ((record.seed + i as u64) % target_pixels) as usize;
        let pos_mask = i % mask_pixels;
        for c in 0..3 {
            data[pos * 3 + c] = triple[c] ^ mask_data[pos_mask * 3 + c];
        }
    }

    Ok(target)
}

/// The forward half: mask `count` positions of `target` starting at `seed`,
/// producing the side-channel record the reversal consumes.
///
/// Does not modify `target`; the record holds `target[pos] XOR mask[pos_m]`
/// for each position, which is exactly what [`reverse_mask`] needs to
/// restore those positions later.
///
/// # Errors
/// Same degenerate-input conditions as [`reverse_mask`].
pub fn apply_mask(
    target: &PixelBuffer,
    mask: &PixelBuffer,
    seed: u64,
    count: usize,
) -> Result<MaskRecord> {
    check_degenerate(target, mask, count)?;

    let target_pixels = target.pixel_count() as u64;
    let mask_pixels = mask.pixel_count();
    let data = target.data();
    let mask_data = mask.data();

    let mut triples = Vec::with_capacity(count);
    for i in 0..count {
        let pos = ((seed + i as u64) % target_pixels) as usize;
        let pos_mask = i % mask_pixels;
        let mut triple = [0u8; 3];
        for c in 0..3 {
            triple[c] = data[pos * 3 + c] ^ mask_data[pos_mask * 3 + c];
        }
        triples.push(triple);
    }

    Ok(MaskRecord { seed, triples })
}
