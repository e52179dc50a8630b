//! TIFF format constants
//!
//! Constants for the subset of the TIFF specification the validator
//! reads: header markers, field types, and the tags describing image
//! geometry and block layout.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43)
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// BigTIFF offset size (8 bytes)
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;      // 8-bit unsigned integer
    pub const ASCII: u16 = 2;     // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;     // 16-bit unsigned integer
    pub const LONG: u16 = 4;      // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;  // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;     // 8-bit signed integer
    pub const UNDEFINED: u16 = 7; // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;    // 16-bit signed integer
    pub const SLONG: u16 = 9;     // 32-bit signed integer
    pub const DOUBLE: u16 = 12;   // Double precision IEEE floating point
    pub const LONG8: u16 = 16;    // BigTIFF 64-bit unsigned integer
    pub const SLONG8: u16 = 17;   // BigTIFF 64-bit signed integer
    pub const IFD8: u16 = 18;     // BigTIFF 64-bit IFD offset
}

/// Standard TIFF tags
pub mod tags {
    pub const NEW_SUBFILE_TYPE: u16 = 254;   // Subfile data descriptor
    pub const IMAGE_WIDTH: u16 = 256;        // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257;       // Height of the image in pixels
    pub const ROWS_PER_STRIP: u16 = 278;     // Rows per strip of data
    pub const STRIP_OFFSETS: u16 = 273;      // Offsets to the data strips
    pub const STRIP_BYTE_COUNTS: u16 = 279;  // Byte counts for strips
    pub const TILE_WIDTH: u16 = 322;         // Width of a tile
    pub const TILE_LENGTH: u16 = 323;        // Length of a tile
    pub const TILE_OFFSETS: u16 = 324;       // Offsets to the data tiles
    pub const TILE_BYTE_COUNTS: u16 = 325;   // Byte counts for tiles
}

/// Bit flags for the NewSubfileType tag
pub mod subfile_types {
    /// Reduced-resolution version of another image (an overview)
    pub const REDUCED_RESOLUTION: u64 = 0x1;

    /// Transparency mask for another image
    pub const MASK: u64 = 0x4;
}
