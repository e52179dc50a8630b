//! Absolute-offset range reads for block checks
//!
//! COG leader/trailer markers live at fixed byte positions relative to
//! each tile, so the block checks issue positioned reads rather than
//! carrying an implicit file cursor between reads. A short read is an
//! error: the caller always knows exactly how many bytes must exist.

use byteorder::{ByteOrder as _, LittleEndian};
use std::fs::File;
use std::io::{Read, Result, Seek, SeekFrom};
use std::path::Path;

/// Read-only access to arbitrary byte ranges of an open file
///
/// Implemented for anything `Read + Seek`, which lets the block checks
/// run against a plain `File` in production and a `Cursor` in tests.
pub trait RangeRead {
    /// Fills `buf` from the absolute position `offset`
    ///
    /// Either the whole buffer is filled or an error is returned.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()>;

    /// Reads a little-endian u32 at the absolute position `offset`
    ///
    /// Tile leaders and trailers are little-endian regardless of the
    /// byte order declared in the TIFF header.
    fn read_u32_le_at(&mut self, offset: u64) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact_at(offset, &mut buf)?;
        Ok(LittleEndian::read_u32(&buf))
    }

    /// Reads two consecutive little-endian u32 values at `offset`
    fn read_u32_pair_le_at(&mut self, offset: u64) -> Result<(u32, u32)> {
        let mut buf = [0u8; 8];
        self.read_exact_at(offset, &mut buf)?;
        Ok((LittleEndian::read_u32(&buf[..4]), LittleEndian::read_u32(&buf[4..])))
    }
}

impl<T: Read + Seek> RangeRead for T {
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf)
    }
}

/// Opens a file for range reading
///
/// The returned handle is dropped (and the descriptor released) when it
/// goes out of scope, on success and error paths alike.
pub fn open_range_reader(path: &Path) -> Result<File> {
    File::open(path)
}
