// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Flat RGB pixel buffer shared by the codec and the reconstruction pipeline.

use crate::recon::error::ReconError;

/// An owned, flat, row-major RGB raster: `width * height * 3` bytes,
/// channel order R, G, B, no row padding.
///
/// Created by the BMP codec on load or by a pipeline stage as its output.
/// Stages consume their primary input buffer and return a freshly owned
/// output; there is no aliasing between stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Build a buffer from raw bytes, validating the size invariant.
    ///
    /// # Errors
    /// [`ReconError::InvalidBufferLength`] if `data.len() != width * height * 3`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ReconError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(ReconError::InvalidBufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Internal constructor for callers that produce the exact byte count
    /// by construction (the codec and the transform stages).
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 3);
        Self { width, height, data }
    }

    /// An all-zero (black) buffer of the given dimensions.
    pub fn zeroed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of bytes (`width * height * 3`).
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, yielding the raw bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
