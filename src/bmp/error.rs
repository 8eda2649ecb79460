// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Error types for BMP decoding and encoding.

use std::fmt;
use std::io;

/// Errors that can occur while decoding or encoding a BMP container.
#[derive(Debug)]
pub enum BmpError {
    /// Input data is too short or truncated.
    UnexpectedEof,
    /// Missing the `BM` signature at the start of the file.
    InvalidSignature,
    /// DIB header is smaller than BITMAPINFOHEADER (40 bytes).
    UnsupportedHeader(u32),
    /// Bit depth other than 24 or 32 bits per pixel.
    UnsupportedBitDepth(u16),
    /// Compression other than BI_RGB (uncompressed).
    UnsupportedCompression(u32),
    /// Zero, negative, or overflow-inducing image dimensions.
    InvalidDimensions,
    /// Underlying file I/O failure.
    Io(io::Error),
}

impl fmt::Display for BmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of BMP data"),
            Self::InvalidSignature => write!(f, "missing BM signature (not a BMP)"),
            Self::UnsupportedHeader(size) => write!(f, "unsupported DIB header size: {size}"),
            Self::UnsupportedBitDepth(bpp) => write!(f, "unsupported bit depth: {bpp} bpp"),
            Self::UnsupportedCompression(c) => write!(f, "unsupported compression method: {c}"),
            Self::InvalidDimensions => write!(f, "invalid image dimensions"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for BmpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BmpError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, BmpError>;
