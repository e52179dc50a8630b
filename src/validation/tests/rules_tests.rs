//! Tests for the dataset-level rules

use std::fs;
use std::path::PathBuf;

use crate::tiff::errors::CogError;
use crate::validation::rules::evaluate;
use crate::validation::tests::fake_raster::{append_block, FakeBand, FakeDataset};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cogcheck-rules-{}-{}", std::process::id(), name))
}

/// Writes accessor bytes for one evaluation and returns the path
fn write_temp(name: &str, bytes: &[u8]) -> String {
    let path = temp_path(name);
    fs::write(&path, bytes).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn rejects_non_tiff_drivers_before_any_findings() {
    let mut dataset = FakeDataset::new(FakeBand::new(64, 64, 32, 32));
    dataset.driver = "PNG";

    let result = evaluate(&dataset, "/nonexistent/ignored.png");
    assert!(matches!(result, Err(CogError::NotGeoTiff)));
}

#[test]
fn each_external_ovr_file_is_flagged() {
    let path = write_temp("ovr", &[0u8; 16]);
    let mut dataset = FakeDataset::new(FakeBand::new(64, 64, 32, 32));
    dataset.files = vec![
        path.clone(),
        format!("{}.ovr", path),
        "other.ovr".to_string(),
    ];

    let findings = evaluate(&dataset, &path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(
        findings.errors(),
        [
            "Overviews found in external .ovr file. They should be internal.",
            "Overviews found in external .ovr file. They should be internal.",
        ]
    );
}

#[test]
fn full_width_block_over_1024_is_an_error() {
    let path = write_temp("wide", &[0u8; 16]);
    let dataset = FakeDataset::new(FakeBand::new(2000, 100, 2000, 100));

    let findings = evaluate(&dataset, &path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(findings.errors(), ["Tile size exceeds the image width."]);
    assert_eq!(findings.warnings(), ["No overviews found for large image."]);
}

#[test]
fn thousand_pixel_band_cannot_trip_the_tile_size_rule() {
    // Block width can be at most 1000 here, which never exceeds 1024;
    // only the overview warning applies.
    let path = write_temp("thousand", &[0u8; 16]);
    let dataset = FakeDataset::new(FakeBand::new(1000, 1000, 1000, 1000));

    let findings = evaluate(&dataset, &path).unwrap();
    let _ = fs::remove_file(&path);

    assert!(findings.errors().is_empty());
    assert_eq!(findings.warnings(), ["No overviews found for large image."]);
}

#[test]
fn full_width_block_under_threshold_is_not_an_error() {
    let path = write_temp("strips", &[0u8; 16]);
    let dataset = FakeDataset::new(FakeBand::new(600, 600, 600, 600));

    let findings = evaluate(&dataset, &path).unwrap();
    let _ = fs::remove_file(&path);

    assert!(findings.errors().is_empty());
    assert_eq!(findings.warnings(), ["No overviews found for large image."]);
}

#[test]
fn small_images_skip_size_and_overview_rules() {
    let path = write_temp("small", &[0u8; 16]);
    let dataset = FakeDataset::new(FakeBand::new(512, 512, 512, 512));

    let findings = evaluate(&dataset, &path).unwrap();
    let _ = fs::remove_file(&path);

    assert!(findings.errors().is_empty());
    assert!(findings.warnings().is_empty());
}

#[test]
fn main_band_masks_and_overviews_are_all_checked() {
    // Four blocks with corrupted trailers, one per band, so the labels
    // show up in evaluation order.
    let mut file = vec![0u8; 8];
    let mut offsets = Vec::new();
    for i in 0..4u8 {
        let (offset, byte_count) = append_block(&mut file, &[i + 1; 8]);
        let trailer_copy = (offset + byte_count) as usize;
        file[trailer_copy] ^= 0xFF;
        offsets.push((offset, byte_count));
    }
    let path = write_temp("bands", &file);

    let mut main = FakeBand::new(1024, 1024, 512, 1024);
    main.set_block(0, 0, offsets[0].0, offsets[0].1);
    main.set_block(1, 0, offsets[0].0, offsets[0].1);

    let mut main_mask = FakeBand::new(1024, 1024, 1024, 1024);
    main_mask.set_block(0, 0, offsets[1].0, offsets[1].1);
    main.mask = Some(Box::new(main_mask));

    let mut overview = FakeBand::new(512, 512, 512, 512);
    overview.set_block(0, 0, offsets[2].0, offsets[2].1);

    let mut overview_mask = FakeBand::new(512, 512, 512, 512);
    overview_mask.set_block(0, 0, offsets[3].0, offsets[3].1);
    overview.mask = Some(Box::new(overview_mask));

    main.overviews.push(overview);

    let dataset = FakeDataset::new(main);
    let findings = evaluate(&dataset, &path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(
        findings.errors(),
        [
            "Main resolution image block (0, 0) trailer bytes do not match.",
            "Main resolution image block (1, 0) trailer bytes do not match.",
            "Mask band of Main resolution image block (0, 0) trailer bytes do not match.",
            "Overview 0 block (0, 0) trailer bytes do not match.",
            "Mask band of Overview 0 block (0, 0) trailer bytes do not match.",
        ]
    );
    assert!(findings.warnings().is_empty());
}
