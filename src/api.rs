//! Library facade
//!
//! One-call entry point for validating a file, used by the CLI command
//! and by integration tests.

use crate::raster::GeoTiffDataset;
use crate::tiff::errors::CogResult;
use crate::validation::{evaluate, render_report};

/// Validates a GeoTIFF file and returns the rendered report text
///
/// Fails when the file cannot be opened as a TIFF-family raster or
/// when an I/O error interrupts the block checks; a structurally
/// non-compliant file is not an error, its problems appear in the
/// returned report.
pub fn validate_file(path: &str) -> CogResult<String> {
    let dataset = GeoTiffDataset::open(path)?;
    let findings = evaluate(&dataset, path)?;
    Ok(render_report(path, &findings))
}
