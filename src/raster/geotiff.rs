//! TIFF-backed implementation of the raster facade
//!
//! Maps the IFD chain of a TIFF file onto the dataset/band model the
//! validator consumes. IFD 0 is the main band; further IFDs are
//! classified by their NewSubfileType flags into overviews, the main
//! mask, and overview masks.

use log::{debug, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::raster::{BlockMetadata, RasterBand, RasterDataset, MASK_ALL_VALID, MASK_PER_DATASET};
use crate::tiff::constants::{subfile_types, tags};
use crate::tiff::errors::{CogError, CogResult};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;

use crate::io::seekable::SeekableReader;

/// Sidecar extensions GDAL-style tooling drops next to a GeoTIFF
const SIDECAR_EXTENSIONS: [&str; 3] = ["ovr", "msk", "aux.xml"];

/// One band (or overview level, or mask plane) of a GeoTIFF file
pub struct GeoTiffBand {
    x_size: u64,
    y_size: u64,
    block_width: u64,
    block_height: u64,
    /// Blocks across, used to index the row-major layout arrays
    xblocks: u64,
    /// Per-block file offsets in row-major order, 0 for sparse blocks
    offsets: Vec<u64>,
    /// Per-block byte counts in row-major order
    byte_counts: Vec<u64>,
    /// Per-dataset mask plane, when the file carries one
    mask: Option<Box<GeoTiffBand>>,
    /// Overview levels, only populated on the main band
    overviews: Vec<GeoTiffBand>,
}

impl GeoTiffBand {
    /// Builds a band from one IFD, reading its block layout arrays
    fn from_ifd(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
    ) -> CogResult<Self> {
        let (x_size, y_size) = ifd
            .get_dimensions()
            .ok_or_else(|| CogError::GenericError(format!(
                "IFD #{} has no image dimensions",
                ifd.number
            )))?;

        let (block_width, block_height, offsets_tag, byte_counts_tag) = if ifd.is_tiled() {
            let tile_width = ifd.get_tag_value(tags::TILE_WIDTH).unwrap_or(0);
            let tile_length = ifd.get_tag_value(tags::TILE_LENGTH).unwrap_or(0);
            (tile_width, tile_length, tags::TILE_OFFSETS, tags::TILE_BYTE_COUNTS)
        } else {
            // Strips: one block spans the full width. A missing
            // RowsPerStrip means the image is a single strip.
            let rows = ifd.get_tag_value(tags::ROWS_PER_STRIP).unwrap_or(y_size);
            (x_size, rows, tags::STRIP_OFFSETS, tags::STRIP_BYTE_COUNTS)
        };

        if block_width == 0 || block_height == 0 {
            return Err(CogError::GenericError(format!(
                "IFD #{} has a degenerate block size {}x{}",
                ifd.number, block_width, block_height
            )));
        }

        let offsets = Self::read_layout_array(tiff_reader, reader, ifd, offsets_tag)?;
        let byte_counts = Self::read_layout_array(tiff_reader, reader, ifd, byte_counts_tag)?;

        let xblocks = x_size.div_ceil(block_width);

        debug!(
            "Band from IFD #{}: {}x{}, blocks {}x{}, {} offsets",
            ifd.number, x_size, y_size, block_width, block_height, offsets.len()
        );

        Ok(GeoTiffBand {
            x_size,
            y_size,
            block_width,
            block_height,
            xblocks,
            offsets,
            byte_counts,
            mask: None,
            overviews: Vec::new(),
        })
    }

    /// Reads a tile/strip layout array, empty when the tag is absent
    fn read_layout_array(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
        tag: u16,
    ) -> CogResult<Vec<u64>> {
        if !ifd.has_tag(tag) {
            return Ok(Vec::new());
        }
        tiff_reader.read_tag_values(reader, ifd, tag)
    }
}

impl RasterBand for GeoTiffBand {
    fn x_size(&self) -> u64 {
        self.x_size
    }

    fn y_size(&self) -> u64 {
        self.y_size
    }

    fn block_size(&self) -> (u64, u64) {
        (self.block_width, self.block_height)
    }

    fn overview_count(&self) -> usize {
        self.overviews.len()
    }

    fn overview(&self, index: usize) -> CogResult<&dyn RasterBand> {
        self.overviews
            .get(index)
            .map(|band| band as &dyn RasterBand)
            .ok_or_else(|| CogError::GenericError(format!("No overview at index {}", index)))
    }

    fn mask_flags(&self) -> u32 {
        if self.mask.is_some() {
            MASK_PER_DATASET
        } else {
            MASK_ALL_VALID
        }
    }

    fn mask_band(&self) -> Option<&dyn RasterBand> {
        self.mask.as_deref().map(|band| band as &dyn RasterBand)
    }

    fn block_metadata(&self, x: u64, y: u64) -> BlockMetadata {
        let index = (y * self.xblocks + x) as usize;
        BlockMetadata {
            offset: self.offsets.get(index).copied().unwrap_or(0),
            byte_count: self.byte_counts.get(index).copied().unwrap_or(0),
        }
    }
}

/// A GeoTIFF file opened for structure validation
pub struct GeoTiffDataset {
    path: String,
    main: GeoTiffBand,
}

impl GeoTiffDataset {
    /// Opens a GeoTIFF file and reads its directory structure
    ///
    /// Anything that prevents the structure from being read (missing
    /// file, bad magic, truncated directories) is an open failure; no
    /// structural findings are derived from such files.
    pub fn open(path: &str) -> CogResult<Self> {
        info!("Opening GeoTIFF dataset: {}", path);

        let main = Self::read_bands(path)
            .map_err(|e| CogError::InvalidFile(e.to_string()))?;

        Ok(GeoTiffDataset {
            path: path.to_string(),
            main,
        })
    }

    /// Reads all IFDs and assembles the main band with its overviews
    /// and mask planes attached
    fn read_bands(path: &str) -> CogResult<GeoTiffBand> {
        let file = File::open(Path::new(path))?;
        let mut reader = BufReader::with_capacity(64 * 1024, file);

        let mut tiff_reader = TiffReader::new();
        let structure = tiff_reader.read(&mut reader)?;

        let mut ifds = structure.ifds.iter();
        let main_ifd = ifds
            .next()
            .ok_or_else(|| CogError::GenericError("File contains no image directories".to_string()))?;

        let mut main = GeoTiffBand::from_ifd(&tiff_reader, &mut reader, main_ifd)?;
        let mut overview_masks: Vec<GeoTiffBand> = Vec::new();

        for ifd in ifds {
            let band = GeoTiffBand::from_ifd(&tiff_reader, &mut reader, ifd)?;
            let subfile = ifd.subfile_type();

            if subfile & subfile_types::MASK != 0 {
                if subfile & subfile_types::REDUCED_RESOLUTION != 0 {
                    overview_masks.push(band);
                } else if main.mask.is_none() {
                    main.mask = Some(Box::new(band));
                } else {
                    warn!("Ignoring duplicate mask plane in IFD #{}", ifd.number);
                }
            } else if subfile & subfile_types::REDUCED_RESOLUTION != 0 {
                main.overviews.push(band);
            } else {
                // A second full-resolution image is not part of the
                // overview pyramid; it plays no role in validation.
                warn!("Ignoring extra full-resolution image in IFD #{}", ifd.number);
            }
        }

        Self::attach_overview_masks(&mut main.overviews, overview_masks);

        info!(
            "Dataset has {} overview(s), main mask: {}",
            main.overviews.len(),
            main.mask.is_some()
        );

        Ok(main)
    }

    /// Pairs mask planes with overview levels
    ///
    /// Matching is by pixel dimensions first, falling back to file
    /// order for masks whose dimensions match no overview.
    fn attach_overview_masks(overviews: &mut [GeoTiffBand], masks: Vec<GeoTiffBand>) {
        let mut unmatched = Vec::new();

        for mask in masks {
            let slot = overviews.iter_mut().find(|ovr| {
                ovr.mask.is_none() && ovr.x_size == mask.x_size && ovr.y_size == mask.y_size
            });
            match slot {
                Some(ovr) => ovr.mask = Some(Box::new(mask)),
                None => unmatched.push(mask),
            }
        }

        for mask in unmatched {
            match overviews.iter_mut().find(|ovr| ovr.mask.is_none()) {
                Some(ovr) => {
                    warn!(
                        "Pairing {}x{} mask with {}x{} overview by file order",
                        mask.x_size, mask.y_size, ovr.x_size, ovr.y_size
                    );
                    ovr.mask = Some(Box::new(mask));
                }
                None => warn!("Dropping mask plane with no overview to pair with"),
            }
        }
    }
}

impl RasterDataset for GeoTiffDataset {
    fn driver_short_name(&self) -> &str {
        "GTiff"
    }

    fn file_list(&self) -> Vec<String> {
        let mut files = vec![self.path.clone()];
        for ext in SIDECAR_EXTENSIONS {
            let sidecar = format!("{}.{}", self.path, ext);
            if Path::new(&sidecar).exists() {
                files.push(sidecar);
            }
        }
        files
    }

    fn band(&self, index: usize) -> CogResult<&dyn RasterBand> {
        if index == 1 {
            Ok(&self.main)
        } else {
            Err(CogError::GenericError(format!("No band at index {}", index)))
        }
    }
}
