// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! The seed + RGB-triple side channel produced by the forward masking step.
//!
//! Text format: the first non-empty line holds one integer (the seed), and
//! every following non-empty line holds three whitespace-separated integers
//! (one masked RGB triple). Triple order is significant — triple `i` belongs
//! to position index `i` of the masking pass, not to an image coordinate.
//!
//! Out-of-range channel values and negative seeds are rejected rather than
//! clamped: the XOR reversal is only correct for faithful 8-bit values, so
//! clamping would silently corrupt the reconstructed image.

use std::fmt::Write as _;
use std::path::Path;

use super::error::{ReconError, Result};

/// Parsed contents of a mask side-channel file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskRecord {
    /// Starting offset into the target buffer for position index 0.
    pub seed: u64,
    /// Masked RGB values, one per touched position, in masking order.
    pub triples: Vec<[u8; 3]>,
}

impl MaskRecord {
    /// Number of masked positions (the file's derived pixel count).
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Parse a record from text.
    ///
    /// # Errors
    /// - [`ReconError::MalformedSeed`] if the first line is not an integer.
    /// - [`ReconError::NegativeSeed`] if the seed is negative.
    /// - [`ReconError::MalformedTriple`] if a line does not hold exactly
    ///   three integers (carries the 1-based line number).
    /// - [`ReconError::ChannelOutOfRange`] for values outside `0..=255`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty());

        let (_, seed_line) = lines.next().ok_or(ReconError::MalformedSeed)?;
        let seed: i64 = seed_line
            .trim()
            .parse()
            .map_err(|_| ReconError::MalformedSeed)?;
        if seed < 0 {
            return Err(ReconError::NegativeSeed(seed));
        }

        let mut triples = Vec::new();
        for (idx, line) in lines {
            let line_no = idx + 1;
            let mut channels = [0u8; 3];
            let mut tokens = line.split_whitespace();
            for channel in &mut channels {
                let token = tokens
                    .next()
                    .ok_or(ReconError::MalformedTriple { line: line_no })?;
                let value: i64 = token
                    .parse()
                    .map_err(|_| ReconError::MalformedTriple { line: line_no })?;
                *channel = u8::try_from(value)
                    .map_err(|_| ReconError::ChannelOutOfRange { line: line_no, value })?;
            }
            if tokens.next().is_some() {
                return Err(ReconError::MalformedTriple { line: line_no });
            }
            triples.push(channels);
        }

        Ok(Self { seed: seed as u64, triples })
    }

    /// Read and parse a record file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ReconError::Load {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Self::parse(&text)
    }

    /// Serialize back to the text format (seed line + one triple per line).
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.seed);
        for [r, g, b] in &self.triples {
            let _ = writeln!(out, "{r} {g} {b}");
        }
        out
    }

    /// Serialize and write a record file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text()).map_err(|e| ReconError::Save {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
