// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Pure-Rust BMP container codec (zero external dependencies).
//!
//! Reads and writes Windows bitmap files, exposing the pixel data as a flat
//! row-major RGB [`PixelBuffer`] with no row padding. This is the I/O
//! boundary for the reconstruction pipeline, which operates entirely on
//! flat buffers.
//!
//! Supports:
//! - BITMAPINFOHEADER (40-byte) and larger DIB headers
//! - 24-bit and 32-bit uncompressed (BI_RGB) pixel data
//! - Bottom-up and top-down row order
//! - 4-byte row padding (stripped on read, emitted on write)
//!
//! Does NOT support:
//! - Palettized images (1/4/8 bpp) — rejected at parse time
//! - RLE or bitfields compression — rejected at parse time
//!
//! Output is always 24-bit BI_RGB, bottom-up, rows padded to 4 bytes.

pub mod error;

use std::path::Path;

use crate::pixel::PixelBuffer;
use error::{BmpError, Result};

/// Byte offset of the pixel-data offset field in BITMAPFILEHEADER.
const PIXEL_OFFSET_FIELD: usize = 10;
/// Byte offset of the DIB header (BITMAPFILEHEADER is 14 bytes).
const DIB_START: usize = 14;
/// Total header size written by [`encode`]: 14-byte file header + 40-byte
/// BITMAPINFOHEADER.
const HEADERS_LEN: usize = 54;

fn read_u16(data: &[u8], at: usize) -> Result<u16> {
    let bytes = data
        .get(at..at + 2)
        .ok_or(BmpError::UnexpectedEof)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], at: usize) -> Result<u32> {
    let bytes = data
        .get(at..at + 4)
        .ok_or(BmpError::UnexpectedEof)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_i32(data: &[u8], at: usize) -> Result<i32> {
    Ok(read_u32(data, at)? as i32)
}

/// Padded byte length of one stored row.
fn row_stride(width: usize, bytes_per_pixel: usize) -> usize {
    (width * bytes_per_pixel + 3) & !3
}

/// Decode a BMP byte stream into a flat RGB buffer.
///
/// Stored rows are BGR(A) with padding; the returned buffer is RGB,
/// top-down, unpadded.
///
/// # Errors
/// - [`BmpError::InvalidSignature`] if the `BM` magic is missing.
/// - [`BmpError::UnsupportedHeader`] for pre-BITMAPINFOHEADER DIB headers.
/// - [`BmpError::UnsupportedBitDepth`] / [`BmpError::UnsupportedCompression`]
///   for anything but 24/32-bit BI_RGB.
/// - [`BmpError::UnexpectedEof`] if the pixel array is truncated.
pub fn decode(data: &[u8]) -> Result<PixelBuffer> {
    if data.len() < 2 || &data[0..2] != b"BM" {
        return Err(BmpError::InvalidSignature);
    }

    let pixel_offset = read_u32(data, PIXEL_OFFSET_FIELD)? as usize;
    let dib_size = read_u32(data, DIB_START)?;
    if dib_size < 40 {
        return Err(BmpError::UnsupportedHeader(dib_size));
    }

    let width_raw = read_i32(data, DIB_START + 4)?;
    let height_raw = read_i32(data, DIB_START + 8)?;
    let bpp = read_u16(data, DIB_START + 14)?;
    let compression = read_u32(data, DIB_START + 16)?;

    if compression != 0 {
        return Err(BmpError::UnsupportedCompression(compression));
    }
    if bpp != 24 && bpp != 32 {
        return Err(BmpError::UnsupportedBitDepth(bpp));
    }
    if width_raw <= 0 || height_raw == 0 || height_raw == i32::MIN {
        return Err(BmpError::InvalidDimensions);
    }

    // Negative height means top-down row order.
    let top_down = height_raw < 0;
    let width = width_raw as usize;
    let height = height_raw.unsigned_abs() as usize;

    let out_len = width
        .checked_mul(height)
        .and_then(|p| p.checked_mul(3))
        .ok_or(BmpError::InvalidDimensions)?;

    let bytes_per_pixel = (bpp / 8) as usize;
    let stride = row_stride(width, bytes_per_pixel);
    let needed = stride
        .checked_mul(height)
        .and_then(|n| n.checked_add(pixel_offset))
        .ok_or(BmpError::InvalidDimensions)?;
    if data.len() < needed {
        return Err(BmpError::UnexpectedEof);
    }

    let mut out = Vec::with_capacity(out_len);
    for y in 0..height {
        let stored_row = if top_down { y } else { height - 1 - y };
        let row_start = pixel_offset + stored_row * stride;
        for x in 0..width {
            let px = row_start + x * bytes_per_pixel;
            // Stored order is B, G, R(, A).
            out.push(data[px + 2]);
            out.push(data[px + 1]);
            out.push(data[px]);
        }
    }

    Ok(PixelBuffer::from_parts(width as u32, height as u32, out))
}

/// Encode a flat RGB buffer as a 24-bit bottom-up BI_RGB bitmap.
///
/// Serialization cannot fail; file-level errors surface in [`save`].
pub fn encode(buffer: &PixelBuffer) -> Vec<u8> {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let stride = row_stride(width, 3);
    let image_size = stride * height;
    let file_size = HEADERS_LEN + image_size;

    let mut out = Vec::with_capacity(file_size);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(HEADERS_LEN as u32).to_le_bytes());

    // BITMAPINFOHEADER
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(buffer.width() as i32).to_le_bytes());
    out.extend_from_slice(&(buffer.height() as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes()); // 72 DPI
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // palette size
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    let data = buffer.data();
    let padding = stride - width * 3;
    for y in (0..height).rev() {
        let row = &data[y * width * 3..(y + 1) * width * 3];
        for px in row.chunks_exact(3) {
            out.push(px[2]);
            out.push(px[1]);
            out.push(px[0]);
        }
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    out
}

/// Read and decode a BMP file.
pub fn load(path: &Path) -> Result<PixelBuffer> {
    let data = std::fs::read(path)?;
    decode(&data)
}

/// Encode and write a BMP file. Does not take ownership of the buffer.
pub fn save(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    std::fs::write(path, encode(buffer))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_signature() {
        match decode(b"not a bitmap") {
            Err(BmpError::InvalidSignature) => {}
            other => panic!("expected InvalidSignature, got {other:?}"),
        }
    }

    #[test]
    fn rejects_truncated_header() {
        match decode(b"BM\x00\x00") {
            Err(BmpError::UnexpectedEof) => {}
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }

    #[test]
    fn decodes_hand_built_2x1() {
        // 2x1, 24bpp, bottom-up. One row: blue pixel then red pixel,
        // stored as BGR: (FF 00 00) (00 00 FF) + 2 pad bytes.
        let mut bmp = Vec::new();
        bmp.extend_from_slice(b"BM");
        bmp.extend_from_slice(&62u32.to_le_bytes());
        bmp.extend_from_slice(&[0u8; 4]);
        bmp.extend_from_slice(&54u32.to_le_bytes());
        bmp.extend_from_slice(&40u32.to_le_bytes());
        bmp.extend_from_slice(&2i32.to_le_bytes());
        bmp.extend_from_slice(&1i32.to_le_bytes());
        bmp.extend_from_slice(&1u16.to_le_bytes());
        bmp.extend_from_slice(&24u16.to_le_bytes());
        bmp.extend_from_slice(&0u32.to_le_bytes());
        bmp.extend_from_slice(&8u32.to_le_bytes());
        bmp.extend_from_slice(&2835i32.to_le_bytes());
        bmp.extend_from_slice(&2835i32.to_le_bytes());
        bmp.extend_from_slice(&0u32.to_le_bytes());
        bmp.extend_from_slice(&0u32.to_le_bytes());
        bmp.extend_from_slice(&[0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00]);

        let buf = decode(&bmp).unwrap();
        assert_eq!((buf.width(), buf.height()), (2, 1));
        assert_eq!(buf.data(), &[0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00]);
    }

    #[test]
    fn top_down_rows_match_bottom_up() {
        // Same 2x2 image stored both ways must decode identically.
        let rgb: Vec<u8> = vec![
            1, 2, 3, 4, 5, 6, // top row
            7, 8, 9, 10, 11, 12, // bottom row
        ];
        let buf = PixelBuffer::new(2, 2, rgb).unwrap();
        let mut encoded = encode(&buf);

        // Flip to top-down: negate height and swap stored rows.
        encoded[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        let (a, b) = (54usize, 54 + 8);
        for i in 0..8 {
            encoded.swap(a + i, b + i);
        }

        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn rejects_compressed_data() {
        let buf = PixelBuffer::zeroed(2, 2);
        let mut encoded = encode(&buf);
        encoded[30..34].copy_from_slice(&1u32.to_le_bytes()); // BI_RLE8
        match decode(&encoded) {
            Err(BmpError::UnsupportedCompression(1)) => {}
            other => panic!("expected UnsupportedCompression, got {other:?}"),
        }
    }
}
