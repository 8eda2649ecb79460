// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Error types for the reconstruction pipeline.
//!
//! [`ReconError`] covers all failure modes from artifact loading through
//! mask-record parsing and the transform stages themselves.

use std::fmt;
use std::path::PathBuf;

use crate::bmp::error::BmpError;

/// Errors that can occur while reconstructing an image from its artifacts.
#[derive(Debug)]
pub enum ReconError {
    /// An input artifact could not be decoded as a BMP.
    Load { path: PathBuf, source: BmpError },
    /// An output artifact could not be encoded or written.
    Save { path: PathBuf, source: BmpError },
    /// Two buffers expected to share dimensions do not.
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },
    /// A raw byte slice does not match `width * height * 3`.
    InvalidBufferLength { expected: usize, actual: usize },
    /// The mask-record file has no parseable seed on its first line.
    MalformedSeed,
    /// The seed is negative; positions are non-negative offsets.
    NegativeSeed(i64),
    /// A mask-record line is not three whitespace-separated integers.
    MalformedTriple { line: usize },
    /// A mask-record channel value falls outside `0..=255`.
    ChannelOutOfRange { line: usize, value: i64 },
    /// The mask image has zero pixels; cyclic sampling is undefined.
    EmptyMask,
    /// The target image has zero pixels but the record is non-empty.
    EmptyTarget,
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { path, source } => {
                write!(f, "could not load {}: {source}", path.display())
            }
            Self::Save { path, source } => {
                write!(f, "could not save {}: {source}", path.display())
            }
            Self::DimensionMismatch { left, right } => write!(
                f,
                "dimension mismatch: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Self::InvalidBufferLength { expected, actual } => write!(
                f,
                "pixel data length {actual} does not match dimensions (expected {expected})"
            ),
            Self::MalformedSeed => write!(f, "mask record has no valid seed line"),
            Self::NegativeSeed(s) => write!(f, "mask record seed is negative: {s}"),
            Self::MalformedTriple { line } => {
                write!(f, "mask record line {line} is not an RGB triple")
            }
            Self::ChannelOutOfRange { line, value } => write!(
                f,
                "mask record line {line}: channel value {value} outside 0..=255"
            ),
            Self::EmptyMask => write!(f, "mask image has zero pixels"),
            Self::EmptyTarget => write!(f, "target image has zero pixels"),
        }
    }
}

impl std::error::Error for ReconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { source, .. } | Self::Save { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
