// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! Demonstration driver: gradient export, side-channel listing, and the
//! full four-stage reconstruction over an artifact directory.

use std::path::Path;
use std::process::ExitCode;

use unmask_core::recon::pipeline::{self, names, ArtifactDir};
use unmask_core::recon::MaskRecord;

/// Overwrite every pixel's channels with the low byte of the pixel's
/// starting byte index — the synthetic gradient of the original demo.
fn apply_gradient(data: &mut [u8]) {
    for i in (0..data.len()).step_by(3) {
        let v = i as u8;
        data[i] = v;
        data[i + 1] = v;
        data[i + 2] = v;
    }
}

/// Load the base image, apply the gradient, and export it.
/// Failures here do not block the reconstruction pipeline.
fn gradient_demo(dir: &ArtifactDir) {
    let mut base = match dir.load_image(names::BASE_IMAGE) {
        Ok(buf) => buf,
        Err(e) => {
            eprintln!("gradient step skipped: {e}");
            return;
        }
    };
    apply_gradient(base.data_mut());
    let saved = dir.save_image(&base, names::GRADIENT_IMAGE);
    println!("{}", saved.is_ok());
    if let Err(e) = saved {
        eprintln!("gradient export failed: {e}");
    }
}

/// Parse and list the display-only side-channel file.
fn list_record(path: &Path) {
    match MaskRecord::load(path) {
        Ok(record) => {
            println!("Seed: {}", record.seed);
            println!("Pixels read: {}", record.len());
            for (i, [r, g, b]) in record.triples.iter().enumerate() {
                println!("Pixel {i}: ({r}, {g}, {b})");
            }
        }
        Err(e) => eprintln!("could not list {}: {e}", path.display()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: reconstruct [artifact-dir]");
        return ExitCode::FAILURE;
    }
    let root = args.get(1).map(String::as_str).unwrap_or(".");
    let dir = ArtifactDir::new(root);

    gradient_demo(&dir);
    list_record(&dir.path(names::DISPLAY_RECORD));

    match pipeline::run(&dir) {
        Ok(restored) => {
            println!(
                "Reconstructed {} ({}x{})",
                names::FINAL_OUTPUT,
                restored.width(),
                restored.height()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("reconstruction failed: {e}");
            ExitCode::FAILURE
        }
    }
}
