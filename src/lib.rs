// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! # unmask-core
//!
//! Reconstructs an original BMP image from the artifacts of an unknown
//! forward-encoding pipeline by applying the inverse of each stage in exact
//! reverse order:
//!
//! 1. XOR against a companion image of the same dimensions
//! 2. Seed-indexed mask reversal (mask image + a text side channel of
//!    masked RGB triples)
//! 3. Cyclic rotation of every byte left by 3 bits
//! 4. A final companion XOR yielding the original
//!
//! The BMP container codec (`bmp` module) is zero-dependency (std only).
//! The pipeline (`recon` module) passes buffers between stages in memory —
//! a stage can never run against a stale on-disk artifact — and halts on
//! the first failed stage, reporting which stage and which artifact failed.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use unmask_core::recon::pipeline::{self, ArtifactDir};
//!
//! let dir = ArtifactDir::new("artifacts");
//! let restored = pipeline::run(&dir).unwrap();
//! println!("reconstructed {}x{}", restored.width(), restored.height());
//! ```

pub mod bmp;
pub mod pixel;
pub mod recon;

pub use bmp::error::{BmpError, Result as BmpResult};
pub use pixel::PixelBuffer;
pub use recon::error::{ReconError, Result as ReconResult};
pub use recon::pipeline::{reconstruct, ArtifactDir};
pub use recon::MaskRecord;
