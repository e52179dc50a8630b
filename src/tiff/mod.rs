//! TIFF file format parsing module
//!
//! This module provides structures and functions for reading the
//! directory layout of TIFF and BigTIFF format files.

pub mod errors;
pub mod ifd;
pub(crate) mod constants;
pub mod reader;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{CogError, CogResult};
pub use ifd::{IFD, IFDEntry};
pub use reader::{TiffReader, TiffStructure};
