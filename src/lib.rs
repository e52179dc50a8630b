pub mod io;
pub mod tiff;
pub mod raster;
pub mod validation;
pub mod commands;
pub mod utils;
pub mod api;

pub use crate::api::validate_file;

pub use tiff::errors::{CogError, CogResult};
pub use raster::{BlockMetadata, RasterBand, RasterDataset};
pub use validation::{evaluate, render_report, Findings};
