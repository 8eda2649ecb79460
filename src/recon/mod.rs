// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Image reconstruction pipeline.
//!
//! Reverses a four-layer forward encoding applied to a BMP image:
//! companion-image XOR, seed-indexed masking against a smaller mask image
//! (with the masked values recorded in a text side channel), a cyclic 3-bit
//! rotation, and a second companion XOR. Each stage is a pure function from
//! owned input buffers to one owned output buffer; [`pipeline`] fixes the
//! stage order and owns the on-disk artifact names.
//!
//! The forward halves ([`mask::apply_mask`], [`rotate::rotate_right_3`]) are
//! exported too, so paired artifact sets can be generated and the reversal
//! tested as an exact round trip.

pub mod error;
pub mod mask;
pub mod pipeline;
pub mod record;
pub mod rotate;
pub mod xor;

pub use error::ReconError;
pub use record::MaskRecord;
