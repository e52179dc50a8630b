//! Block layout checks for a single band
//!
//! Walks a band's tile/strip grid in row-major order and verifies the
//! properties a range-reading client depends on: non-decreasing block
//! offsets, a leader (4-byte little-endian length prefix) matching each
//! block's byte count, and a duplicated 4-byte trailer marking that the
//! block's declared extent was written in full.

use log::debug;
use std::io;

use crate::io::range_reader::RangeRead;
use crate::raster::RasterBand;
use crate::tiff::errors::CogResult;
use crate::validation::report::Findings;

/// Validates the block layout of one band
///
/// `label` names the band in findings ("Main resolution image",
/// "Overview 0", ...). Structural violations become error findings;
/// only I/O failures abort the walk.
pub fn check_band(
    accessor: &mut dyn RangeRead,
    label: &str,
    band: &dyn RasterBand,
    findings: &mut Findings,
) -> CogResult<()> {
    let (block_width, block_height) = band.block_size();
    let xblocks = band.x_size().div_ceil(block_width);
    let yblocks = band.y_size().div_ceil(block_height);

    debug!(
        "Checking {}: {}x{} pixels, {}x{} blocks",
        label,
        band.x_size(),
        band.y_size(),
        xblocks,
        yblocks
    );

    let mut last_offset: u64 = 0;

    for y in 0..yblocks {
        for x in 0..xblocks {
            let block = band.block_metadata(x, y);
            let offset = block.offset;
            let byte_count = block.byte_count;

            if offset > 0 {
                if offset < last_offset {
                    findings.error(format!(
                        "{} block ({}, {}) offset is less than previous block.",
                        label, x, y
                    ));
                }

                // Leader: the block's byte count, little-endian, in the
                // 4 bytes directly before the block data.
                if byte_count > 4 && offset >= 4 {
                    let leader_size = accessor.read_u32_le_at(offset - 4)? as u64;
                    if leader_size != byte_count {
                        findings.error(format!(
                            "{} block ({}, {}) leader size ({}) does not match byte count ({}).",
                            label, x, y, leader_size, byte_count
                        ));
                    }
                }

                // Trailer: the block's last 4 bytes repeated directly
                // after it.
                if byte_count >= 4 {
                    // Offset and byte count come straight from the file
                    // and may not fit the addressable range together.
                    let block_end = offset.checked_add(byte_count).ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!(
                                "{} block ({}, {}) extent overflows the addressable range",
                                label, x, y
                            ),
                        )
                    })?;
                    let (first, second) = accessor.read_u32_pair_le_at(block_end - 4)?;
                    if first != second {
                        findings.error(format!(
                            "{} block ({}, {}) trailer bytes do not match.",
                            label, x, y
                        ));
                    }
                }
            }

            // Sparse blocks (offset 0) skip the checks but still reset
            // the running offset, matching the walk's single-pass state.
            last_offset = offset;
        }
    }

    Ok(())
}
