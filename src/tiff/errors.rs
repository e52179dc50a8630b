//! Custom error types for COG validation

use std::fmt;
use std::io;

/// Errors raised while opening or validating a file
///
/// Structural problems with an otherwise readable COG are never errors;
/// they become findings in the report. These variants cover the cases
/// where the validator cannot produce a report at all.
#[derive(Debug)]
pub enum CogError {
    /// I/O error
    IoError(io::Error),
    /// File could not be opened as a raster at all
    InvalidFile(String),
    /// File opened, but its driver is not the TIFF family
    NotGeoTiff,
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Invalid BigTIFF header
    InvalidBigTiffHeader,
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// Tag not found
    TagNotFound(u16),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CogError::IoError(e) => write!(f, "I/O error: {}", e),
            CogError::InvalidFile(msg) => write!(f, "Invalid file: {}", msg),
            CogError::NotGeoTiff => write!(f, "The file is not a GeoTIFF"),
            CogError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            CogError::InvalidBigTiffHeader => write!(f, "Invalid BigTIFF header"),
            CogError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            CogError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            CogError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            CogError::GenericError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for CogError {}

impl From<io::Error> for CogError {
    fn from(error: io::Error) -> Self {
        CogError::IoError(error)
    }
}

impl From<String> for CogError {
    fn from(msg: String) -> Self {
        CogError::GenericError(msg)
    }
}

/// Result type for validation operations
pub type CogResult<T> = Result<T, CogError>;
