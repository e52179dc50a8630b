//! Hand-built raster fakes for exercising the validation rules
//! without constructing real TIFF files.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::raster::{BlockMetadata, RasterBand, RasterDataset, MASK_ALL_VALID, MASK_PER_DATASET};
use crate::tiff::errors::{CogError, CogResult};

pub struct FakeBand {
    pub x_size: u64,
    pub y_size: u64,
    pub block_width: u64,
    pub block_height: u64,
    pub blocks: HashMap<(u64, u64), BlockMetadata>,
    pub overviews: Vec<FakeBand>,
    pub mask: Option<Box<FakeBand>>,
    /// Records every block coordinate the walk looked up, in order
    pub visited: RefCell<Vec<(u64, u64)>>,
}

impl FakeBand {
    pub fn new(x_size: u64, y_size: u64, block_width: u64, block_height: u64) -> Self {
        FakeBand {
            x_size,
            y_size,
            block_width,
            block_height,
            blocks: HashMap::new(),
            overviews: Vec::new(),
            mask: None,
            visited: RefCell::new(Vec::new()),
        }
    }

    pub fn set_block(&mut self, x: u64, y: u64, offset: u64, byte_count: u64) {
        self.blocks.insert((x, y), BlockMetadata { offset, byte_count });
    }
}

impl RasterBand for FakeBand {
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
        self.visited.borrow_mut().push((x, y));
        self.blocks.get(&(x, y)).copied().unwrap_or_default()
    }
}

pub struct FakeDataset {
    pub driver: &'static str,
    pub files: Vec<String>,
    pub main: FakeBand,
}

impl FakeDataset {
    pub fn new(main: FakeBand) -> Self {
        FakeDataset {
            driver: "GTiff",
            files: Vec::new(),
            main,
        }
    }
}

impl RasterDataset for FakeDataset {
    fn driver_short_name(&self) -> &str {
        self.driver
    }

    fn file_list(&self) -> Vec<String> {
        self.files.clone()
    }

    fn band(&self, index: usize) -> CogResult<&dyn RasterBand> {
        if index == 1 {
            Ok(&self.main)
        } else {
            Err(CogError::GenericError(format!("No band at index {}", index)))
        }
    }
}

/// Appends one block (leader, data, duplicated trailer) to a buffer,
/// returning the (offset, byte_count) pair describing it
pub fn append_block(buf: &mut Vec<u8>, data: &[u8]) -> (u64, u64) {
    buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
    let offset = buf.len() as u64;
    buf.extend_from_slice(data);
    let tail_start = data.len().saturating_sub(4);
    buf.extend_from_slice(&data[tail_start..]);
    (offset, data.len() as u64)
}
