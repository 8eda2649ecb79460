// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Pipeline orchestration: stage ordering and the on-disk artifact contract.
//!
//! The four stages run strictly in order, each consuming the previous
//! stage's output buffer in memory:
//!
//! 1. XOR the outer artifact against the companion image
//! 2. Reverse the seed-indexed masking using the mask image + side channel
//! 3. Rotate every byte left by 3 bits
//! 4. XOR against the companion image again, yielding the original
//!
//! Stage dependencies are data dependencies — a missing upstream result is
//! unrepresentable, and the pipeline halts on the first failed stage rather
//! than continuing over stale on-disk artifacts. Each intermediate is still
//! written to disk after its stage completes, preserving the artifact layout
//! of paired encoders.
//!
//! File names live here and nowhere else; no stage function knows a path.

use std::path::{Path, PathBuf};

use log::info;

use crate::bmp;
use crate::pixel::PixelBuffer;

use super::error::{ReconError, Result};
use super::mask::reverse_mask;
use super::record::MaskRecord;
use super::rotate::rotate_left_3;
use super::xor::xor_images;

/// The fixed artifact-name contract shared with the (unknown) forward
/// encoder. Renaming any of these breaks compatibility with paired
/// artifact sets.
pub mod names {
    /// Original base image (driver input).
    pub const BASE_IMAGE: &str = "I_O.bmp";
    /// Gradient-modified copy of the base image (driver output).
    pub const GRADIENT_IMAGE: &str = "I_D.bmp";
    /// First side-channel file; listed on the console by the driver.
    pub const DISPLAY_RECORD: &str = "M1.txt";
    /// Outermost pipeline artifact (stage 1 input).
    pub const OUTER_ARTIFACT: &str = "P3.bmp";
    /// Companion image XORed in stages 1 and 4.
    pub const COMPANION_IMAGE: &str = "I_M.bmp";
    /// Small mask image tiled over the target in stage 2.
    pub const MASK_IMAGE: &str = "M.bmp";
    /// Side-channel record consumed by stage 2.
    pub const MASK_RECORD: &str = "M2.txt";
    /// Stage 1 output.
    pub const STAGE1_OUTPUT: &str = "P2_reconstruida.bmp";
    /// Stage 2 output.
    pub const STAGE2_OUTPUT: &str = "P2_sin_enmascaramiento.bmp";
    /// Stage 3 output.
    pub const STAGE3_OUTPUT: &str = "P1_reconstruida.bmp";
    /// Stage 4 output — the reconstructed original.
    pub const FINAL_OUTPUT: &str = "IO_reconstruida.bmp";
}

/// A directory holding one artifact set.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    root: PathBuf,
}

impl ArtifactDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Load one BMP artifact, tagging failures with the offending path.
    pub fn load_image(&self, name: &str) -> Result<PixelBuffer> {
        let path = self.path(name);
        bmp::load(&path).map_err(|source| ReconError::Load { path, source })
    }

    /// Save one BMP artifact, tagging failures with the offending path.
    pub fn save_image(&self, buffer: &PixelBuffer, name: &str) -> Result<()> {
        let path = self.path(name);
        bmp::save(buffer, &path).map_err(|source| ReconError::Save { path, source })
    }

    /// Load and parse one mask-record artifact.
    pub fn load_record(&self, name: &str) -> Result<MaskRecord> {
        MaskRecord::load(&self.path(name))
    }
}

/// Run all four stages in memory, with no I/O.
///
/// `outer` is the outermost artifact (stage 1 input); `companion` is XORed
/// in stages 1 and 4; `mask` and `record` drive the stage-2 reversal.
///
/// # Errors
/// The first stage precondition violation aborts the pipeline:
/// [`ReconError::DimensionMismatch`], [`ReconError::EmptyMask`], or
/// [`ReconError::EmptyTarget`].
pub fn reconstruct(
    outer: PixelBuffer,
    companion: &PixelBuffer,
    mask: &PixelBuffer,
    record: &MaskRecord,
) -> Result<PixelBuffer> {
    let stage1 = xor_images(outer, companion)?;
    let stage2 = reverse_mask(stage1, mask, record)?;
    let stage3 = rotate_left_3(stage2);
    xor_images(stage3, companion)
}

/// Run the pipeline against an artifact directory, writing each
/// intermediate artifact after its stage completes.
///
/// Returns the reconstructed original (also written as
/// [`names::FINAL_OUTPUT`]).
pub fn run(dir: &ArtifactDir) -> Result<PixelBuffer> {
    let outer = dir.load_image(names::OUTER_ARTIFACT)?;
    let companion = dir.load_image(names::COMPANION_IMAGE)?;
    info!(
        "loaded {} ({}x{}) and {} ({}x{})",
        names::OUTER_ARTIFACT,
        outer.width(),
        outer.height(),
        names::COMPANION_IMAGE,
        companion.width(),
        companion.height()
    );

    let stage1 = xor_images(outer, &companion)?;
    dir.save_image(&stage1, names::STAGE1_OUTPUT)?;
    info!("stage 1 (companion XOR) -> {}", names::STAGE1_OUTPUT);

    let mask = dir.load_image(names::MASK_IMAGE)?;
    let record = dir.load_record(names::MASK_RECORD)?;
    info!(
        "loaded {} ({}x{}) and {} (seed {}, {} triples)",
        names::MASK_IMAGE,
        mask.width(),
        mask.height(),
        names::MASK_RECORD,
        record.seed,
        record.len()
    );

    let stage2 = reverse_mask(stage1, &mask, &record)?;
    dir.save_image(&stage2, names::STAGE2_OUTPUT)?;
    info!("stage 2 (mask reversal) -> {}", names::STAGE2_OUTPUT);

    let stage3 = rotate_left_3(stage2);
    dir.save_image(&stage3, names::STAGE3_OUTPUT)?;
    info!("stage 3 (rotate left 3) -> {}", names::STAGE3_OUTPUT);

    let restored = xor_images(stage3, &companion)?;
    dir.save_image(&restored, names::FINAL_OUTPUT)?;
    info!("stage 4 (final XOR) -> {}", names::FINAL_OUTPUT);

    Ok(restored)
}
