//! Dataset-level COG structure rules
//!
//! Applies the rules that involve the whole dataset (external overview
//! files, tile size, overview presence) and drives the per-band block
//! checks across the main band, its mask, and every overview level.

use log::{debug, info};
use std::path::Path;

use crate::io::range_reader::open_range_reader;
use crate::raster::{RasterBand, RasterDataset, MASK_PER_DATASET};
use crate::tiff::errors::{CogError, CogResult};
use crate::validation::band_check::check_band;
use crate::validation::report::Findings;

/// Drivers recognized as the TIFF family
const TIFF_DRIVERS: [&str; 2] = ["GTiff", "COG"];

/// Images up to this size in both dimensions are exempt from the
/// tile-size and overview-presence rules
const SMALL_IMAGE_LIMIT: u64 = 512;

/// Block widths above this are flagged when the image is not tiled
/// (block width equal to image width)
const MAX_UNTILED_BLOCK_WIDTH: u64 = 1024;

const ERROR_EXTERNAL_OVERVIEWS: &str =
    "Overviews found in external .ovr file. They should be internal.";
const ERROR_TILE_SIZE: &str = "Tile size exceeds the image width.";
const WARNING_NO_OVERVIEWS: &str = "No overviews found for large image.";

/// Evaluates all COG structure rules for an opened dataset
///
/// Findings accumulate across every rule and band; nothing short of an
/// I/O failure stops the evaluation early. The byte accessor on
/// `file_path` is scoped to this call and released on every exit path.
pub fn evaluate(dataset: &dyn RasterDataset, file_path: &str) -> CogResult<Findings> {
    let driver = dataset.driver_short_name();
    if !TIFF_DRIVERS.contains(&driver) {
        return Err(CogError::NotGeoTiff);
    }

    info!("Validating {} (driver: {})", file_path, driver);
    let mut findings = Findings::new();

    check_external_overviews(dataset, &mut findings);

    let main_band = dataset.band(1)?;
    check_tile_size_and_overviews(main_band, &mut findings);

    let mut accessor = open_range_reader(Path::new(file_path))?;

    check_band(&mut accessor, "Main resolution image", main_band, &mut findings)?;
    if main_band.mask_flags() & MASK_PER_DATASET != 0 {
        if let Some(mask) = main_band.mask_band() {
            check_band(
                &mut accessor,
                "Mask band of Main resolution image",
                mask,
                &mut findings,
            )?;
        }
    }

    for i in 0..main_band.overview_count() {
        let overview = main_band.overview(i)?;
        check_band(&mut accessor, &format!("Overview {}", i), overview, &mut findings)?;

        if overview.mask_flags() & MASK_PER_DATASET != 0 {
            if let Some(mask) = overview.mask_band() {
                check_band(
                    &mut accessor,
                    &format!("Mask band of Overview {}", i),
                    mask,
                    &mut findings,
                )?;
            }
        }
    }

    info!(
        "Validation finished: {} error(s), {} warning(s)",
        findings.errors().len(),
        findings.warnings().len()
    );

    Ok(findings)
}

/// Flags every associated file that stores overviews externally
///
/// One finding per offending sidecar; the list is not deduplicated.
fn check_external_overviews(dataset: &dyn RasterDataset, findings: &mut Findings) {
    for file in dataset.file_list() {
        if file.ends_with(".ovr") {
            debug!("External overview file: {}", file);
            findings.error(ERROR_EXTERNAL_OVERVIEWS.to_string());
        }
    }
}

/// Tile-size and overview-presence rules for large images
///
/// The tile-size rule fires only when the block width equals the image
/// width (untiled or full-width strips) and exceeds 1024. A wide image
/// below that threshold never triggers it.
fn check_tile_size_and_overviews(main_band: &dyn RasterBand, findings: &mut Findings) {
    if main_band.x_size() <= SMALL_IMAGE_LIMIT && main_band.y_size() <= SMALL_IMAGE_LIMIT {
        return;
    }

    let (block_width, _) = main_band.block_size();
    if block_width == main_band.x_size() && block_width > MAX_UNTILED_BLOCK_WIDTH {
        findings.error(ERROR_TILE_SIZE.to_string());
    }

    if main_band.overview_count() == 0 {
        findings.warning(WARNING_NO_OVERVIEWS.to_string());
    }
}
