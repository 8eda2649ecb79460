// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unmask-core

//! End-to-end reconstruction tests: forward-encode a synthetic image, then
//! verify the pipeline recovers it exactly, both in memory and through a
//! real artifact directory on disk.

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use unmask_core::recon::mask::apply_mask;
use unmask_core::recon::pipeline::{self, names, ArtifactDir};
use unmask_core::recon::rotate::rotate_right_3;
use unmask_core::recon::xor::xor_images;
use unmask_core::recon::MaskRecord;
use unmask_core::{bmp, PixelBuffer, ReconError};

fn random_buffer(rng: &mut ChaCha20Rng, width: u32, height: u32) -> PixelBuffer {
    let len = width as usize * height as usize * 3;
    let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
    PixelBuffer::new(width, height, data).unwrap()
}

/// Apply the unknown encoder's four forward layers.
fn forward_encode(
    original: &PixelBuffer,
    companion: &PixelBuffer,
    mask: &PixelBuffer,
    seed: u64,
    touched: usize,
) -> (PixelBuffer, MaskRecord) {
    let p1 = xor_images(original.clone(), companion).unwrap();
    let p2 = rotate_right_3(p1);
    let record = apply_mask(&p2, mask, seed, touched).unwrap();
    let p3 = xor_images(p2, companion).unwrap();
    (p3, record)
}

/// Fresh scratch directory under the system temp dir.
fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("unmask-{}-{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn in_memory_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let original = random_buffer(&mut rng, 17, 9);
    let companion = random_buffer(&mut rng, 17, 9);
    let mask = random_buffer(&mut rng, 4, 2);

    let (outer, record) = forward_encode(&original, &companion, &mask, 37, 80);
    let restored = pipeline::reconstruct(outer, &companion, &mask, &record).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn roundtrip_with_seed_wraparound() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let original = random_buffer(&mut rng, 4, 4);
    let companion = random_buffer(&mut rng, 4, 4);
    let mask = random_buffer(&mut rng, 2, 2);

    // Seed 14 on a 16-pixel target: index 3 wraps to position 1.
    let (outer, record) = forward_encode(&original, &companion, &mask, 14, 8);
    assert_eq!(record.seed, 14);
    let restored = pipeline::reconstruct(outer, &companion, &mask, &record).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn file_level_pipeline_writes_all_artifacts() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let original = random_buffer(&mut rng, 11, 7);
    let companion = random_buffer(&mut rng, 11, 7);
    let mask = random_buffer(&mut rng, 3, 1);
    let (outer, record) = forward_encode(&original, &companion, &mask, 29, 40);

    let root = scratch_dir("pipeline");
    let dir = ArtifactDir::new(&root);
    bmp::save(&outer, &dir.path(names::OUTER_ARTIFACT)).unwrap();
    bmp::save(&companion, &dir.path(names::COMPANION_IMAGE)).unwrap();
    bmp::save(&mask, &dir.path(names::MASK_IMAGE)).unwrap();
    record.save(&dir.path(names::MASK_RECORD)).unwrap();

    let restored = pipeline::run(&dir).unwrap();
    assert_eq!(restored, original);

    // Every intermediate artifact must exist and decode.
    for name in [
        names::STAGE1_OUTPUT,
        names::STAGE2_OUTPUT,
        names::STAGE3_OUTPUT,
        names::FINAL_OUTPUT,
    ] {
        let buf = bmp::load(&dir.path(name)).unwrap();
        assert_eq!((buf.width(), buf.height()), (11, 7), "{name} has wrong dimensions");
    }

    let on_disk = bmp::load(&dir.path(names::FINAL_OUTPUT)).unwrap();
    assert_eq!(on_disk, original);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_artifact_names_the_path() {
    let root = scratch_dir("missing");
    let dir = ArtifactDir::new(&root);

    match pipeline::run(&dir) {
        Err(ReconError::Load { path, .. }) => {
            assert!(path.ends_with(names::OUTER_ARTIFACT), "unexpected path {path:?}");
        }
        other => panic!("expected Load error, got {other:?}"),
    }

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn mismatched_companion_halts_pipeline() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let outer = random_buffer(&mut rng, 6, 6);
    let companion = random_buffer(&mut rng, 6, 5);
    let mask = random_buffer(&mut rng, 2, 2);
    let record = MaskRecord { seed: 0, triples: Vec::new() };

    match pipeline::reconstruct(outer, &companion, &mask, &record) {
        Err(ReconError::DimensionMismatch { left, right }) => {
            assert_eq!(left, (6, 6));
            assert_eq!(right, (6, 5));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}
