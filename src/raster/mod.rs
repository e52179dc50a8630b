//! Raster access facade
//!
//! The validation rules are written against these traits rather than a
//! concrete file format implementation. Production code uses the
//! TIFF-backed adapter in [`geotiff`]; tests substitute fakes with
//! hand-built block layouts.

pub mod geotiff;

pub use geotiff::GeoTiffDataset;

use crate::tiff::errors::CogResult;

/// Mask flag: the band has no mask, all pixels are valid
pub const MASK_ALL_VALID: u32 = 0x01;

/// Mask flag: the mask is shared between all bands of the dataset
pub const MASK_PER_DATASET: u32 = 0x02;

/// File offset and length of one block's bytes
///
/// An offset of 0 is the defined "no offset recorded" state of a
/// sparse (unwritten) block, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockMetadata {
    /// Absolute file offset of the block data, 0 when unwritten
    pub offset: u64,
    /// Length of the block data in bytes, 0 when unwritten
    pub byte_count: u64,
}

/// An opened raster file
pub trait RasterDataset {
    /// Short identifier of the format driver (e.g. "GTiff")
    fn driver_short_name(&self) -> &str;

    /// All files belonging to this dataset, including sidecars
    fn file_list(&self) -> Vec<String>;

    /// Gets a band by 1-based index; band 1 is the main band
    fn band(&self, index: usize) -> CogResult<&dyn RasterBand>;
}

/// One band of a dataset, or one overview level of a band
pub trait RasterBand {
    /// Width in pixels
    fn x_size(&self) -> u64;

    /// Height in pixels
    fn y_size(&self) -> u64;

    /// Block (tile or strip) width and height in pixels
    fn block_size(&self) -> (u64, u64);

    /// Number of overview levels attached to this band
    fn overview_count(&self) -> usize;

    /// Gets an overview level by index
    fn overview(&self, index: usize) -> CogResult<&dyn RasterBand>;

    /// Mask flags for this band (`MASK_ALL_VALID`, `MASK_PER_DATASET`)
    fn mask_flags(&self) -> u32;

    /// The per-dataset mask band, when `MASK_PER_DATASET` is set
    fn mask_band(&self) -> Option<&dyn RasterBand>;

    /// File location of the block at grid position (x, y)
    fn block_metadata(&self, x: u64, y: u64) -> BlockMetadata;
}
