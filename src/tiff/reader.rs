//! TIFF file reader implementation
//!
//! Reads the directory structure of TIFF and BigTIFF files: the header,
//! the IFD chain, and tag value arrays. Pixel data is never touched;
//! the validator only needs geometry and block layout metadata.

use log::{debug, info, warn};
use std::io::SeekFrom;

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{field_types, header};
use crate::tiff::errors::{CogError, CogResult};
use crate::tiff::ifd::{IFD, IFDEntry};

/// Upper bound on IFD chain length, guards against offset cycles
const MAX_IFDS: usize = 100;

/// Parsed directory structure of a TIFF file
#[derive(Debug)]
pub struct TiffStructure {
    /// All IFDs in file-chain order
    pub ifds: Vec<IFD>,
    /// Whether the file uses the BigTIFF layout
    pub is_big_tiff: bool,
}

impl TiffStructure {
    /// Gets the number of IFDs
    pub fn ifd_count(&self) -> usize {
        self.ifds.len()
    }
}

/// Reader for TIFF and BigTIFF files
pub struct TiffReader {
    /// Current byte order handler, set once the header has been read
    byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Byte order declared in the header
    byte_order: Option<ByteOrder>,
    /// Whether currently reading BigTIFF format
    is_big_tiff: bool,
}

impl TiffReader {
    /// Creates a new TIFF reader
    pub fn new() -> Self {
        TiffReader {
            byte_order_handler: None,
            byte_order: None,
            is_big_tiff: false,
        }
    }

    fn handler(&self) -> CogResult<&Box<dyn ByteOrderHandler>> {
        self.byte_order_handler
            .as_ref()
            .ok_or_else(|| CogError::GenericError("Byte order not yet determined".to_string()))
    }

    /// Reads the directory structure from the given reader
    ///
    /// 1. Detect byte order (little/big endian)
    /// 2. Check for TIFF or BigTIFF format
    /// 3. Read all IFDs in the chain
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> CogResult<TiffStructure> {
        debug!("TiffReader::read starting");

        let byte_order = ByteOrder::detect(reader)?;
        debug!("Detected byte order: {}", byte_order.name());
        self.byte_order = Some(byte_order);
        self.byte_order_handler = Some(byte_order.create_handler());

        self.is_big_tiff = self.read_version(reader)?;

        let handler = self.handler()?;
        let first_ifd_offset = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };
        debug!("First IFD offset: {}", first_ifd_offset);

        let file_size = file_size(reader)?;
        if first_ifd_offset < 8 || first_ifd_offset >= file_size {
            return Err(CogError::GenericError(format!(
                "Invalid first IFD offset: {} (file size: {})",
                first_ifd_offset, file_size
            )));
        }

        let ifds = self.read_ifd_chain(reader, first_ifd_offset, file_size)?;
        info!("Read {} IFDs from TIFF file", ifds.len());

        Ok(TiffStructure {
            ifds,
            is_big_tiff: self.is_big_tiff,
        })
    }

    /// Reads the version word and, for BigTIFF, the extended header
    fn read_version(&self, reader: &mut dyn SeekableReader) -> CogResult<bool> {
        let handler = self.handler()?;
        let version = handler.read_u16(reader)?;
        debug!("TIFF version: {}", version);

        match version {
            header::TIFF_VERSION => Ok(false),
            header::BIG_TIFF_VERSION => {
                // After the version come the offset size (8) and a
                // reserved word that must be zero.
                let offset_size = handler.read_u16(reader)?;
                let zeros = handler.read_u16(reader)?;
                if offset_size != header::BIGTIFF_OFFSET_SIZE || zeros != 0 {
                    return Err(CogError::InvalidBigTiffHeader);
                }
                Ok(true)
            }
            _ => Err(CogError::UnsupportedVersion(version)),
        }
    }

    /// Reads a chain of IFDs starting from the given offset
    fn read_ifd_chain(
        &self,
        reader: &mut dyn SeekableReader,
        first_ifd_offset: u64,
        file_size: u64,
    ) -> CogResult<Vec<IFD>> {
        let handler = self.handler()?;
        let mut ifds = Vec::new();
        let mut ifd_offset = first_ifd_offset;
        let mut ifd_number = 0;

        while ifd_offset != 0 && ifd_number < MAX_IFDS {
            if ifd_offset >= file_size {
                warn!(
                    "IFD offset {} exceeds file size {}, stopping IFD chain",
                    ifd_offset, file_size
                );
                break;
            }

            let ifd = self.read_ifd(reader, ifd_offset, ifd_number)?;
            debug!("Read IFD #{} with {} entries", ifd_number, ifd.entry_count());

            // The next-IFD offset sits directly after the entry table
            let next_offset_position = ifd_offset + self.ifd_size(&ifd) - self.offset_field_size();
            if next_offset_position >= file_size {
                warn!(
                    "Next IFD offset position {} exceeds file size {}",
                    next_offset_position, file_size
                );
                ifds.push(ifd);
                break;
            }

            reader.seek(SeekFrom::Start(next_offset_position))?;
            let next_ifd_offset = if self.is_big_tiff {
                handler.read_u64(reader)?
            } else {
                handler.read_u32(reader)? as u64
            };
            debug!("Next IFD offset: {}", next_ifd_offset);

            if next_ifd_offset != 0 && (next_ifd_offset >= file_size || next_ifd_offset < 8) {
                warn!("Invalid next IFD offset: {}, stopping IFD chain", next_ifd_offset);
                ifds.push(ifd);
                break;
            }

            ifds.push(ifd);
            ifd_offset = next_ifd_offset;
            ifd_number += 1;
        }

        Ok(ifds)
    }

    /// Total size of an IFD in bytes, including the next-IFD offset
    fn ifd_size(&self, ifd: &IFD) -> u64 {
        if self.is_big_tiff {
            8 + 20 * ifd.entry_count() as u64 + 8
        } else {
            2 + 12 * ifd.entry_count() as u64 + 4
        }
    }

    fn offset_field_size(&self) -> u64 {
        if self.is_big_tiff {
            8
        } else {
            4
        }
    }

    /// Reads a single IFD at the given offset
    pub fn read_ifd(
        &self,
        reader: &mut dyn SeekableReader,
        offset: u64,
        number: usize,
    ) -> CogResult<IFD> {
        let handler = self.handler()?;
        reader.seek(SeekFrom::Start(offset))?;

        let entry_count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u16(reader)? as u64
        };

        let mut ifd = IFD::new(number, offset);
        for _ in 0..entry_count {
            ifd.add_entry(self.read_ifd_entry(reader)?);
        }

        Ok(ifd)
    }

    /// Reads a single IFD entry
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> CogResult<IFDEntry> {
        let handler = self.handler()?;

        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };
        let value_offset = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        Ok(IFDEntry::new(tag, field_type, count, value_offset))
    }

    /// Reads a tag's values as a vector of u64
    ///
    /// Handles both inline storage and values stored at an offset,
    /// converting every supported integer field type to u64.
    pub fn read_tag_values(
        &self,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
        tag: u16,
    ) -> CogResult<Vec<u64>> {
        let entry = ifd.get_entry(tag).ok_or(CogError::TagNotFound(tag))?;

        if entry.is_value_inline(self.is_big_tiff) {
            return self.unpack_inline_values(entry);
        }

        let handler = self.handler()?;

        // The declared count is unvalidated; the file can hold at most
        // file_size / value_size values.
        let value_size = entry.field_type_size().max(1);
        let max_count = file_size(reader)? / value_size;
        if entry.count > max_count {
            return Err(CogError::InvalidFile(format!(
                "Tag {} declares {} values, more than the file can hold",
                tag, entry.count
            )));
        }

        reader.seek(SeekFrom::Start(entry.value_offset))?;

        let mut values = Vec::with_capacity(entry.count as usize);
        for _ in 0..entry.count {
            let value = match entry.field_type {
                field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED => {
                    let mut byte = [0u8; 1];
                    reader.read_exact(&mut byte)?;
                    byte[0] as u64
                }
                field_types::SHORT | field_types::SSHORT => handler.read_u16(reader)? as u64,
                field_types::LONG | field_types::SLONG => handler.read_u32(reader)? as u64,
                field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => {
                    handler.read_u64(reader)?
                }
                _ => return Err(CogError::UnsupportedFieldType(entry.field_type)),
            };
            values.push(value);
        }

        Ok(values)
    }

    /// Unpacks values stored inline in the entry's value field
    ///
    /// The inline field was read as a full-width integer in the file's
    /// byte order, so the k-th packed value sits at a byte position that
    /// depends on the endianness: counted from the low end for
    /// little-endian files, from the high end for big-endian ones.
    fn unpack_inline_values(&self, entry: &IFDEntry) -> CogResult<Vec<u64>> {
        let size = entry.field_type_size();
        match entry.field_type {
            field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED
            | field_types::SHORT | field_types::SSHORT
            | field_types::LONG | field_types::SLONG
            | field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => {}
            _ => return Err(CogError::UnsupportedFieldType(entry.field_type)),
        }

        let field_bytes = self.offset_field_size();
        let byte_order = self
            .byte_order
            .ok_or_else(|| CogError::GenericError("Byte order not yet determined".to_string()))?;

        let mut values = Vec::with_capacity(entry.count as usize);
        for k in 0..entry.count {
            let shift_bytes = match byte_order {
                ByteOrder::LittleEndian => k * size,
                ByteOrder::BigEndian => field_bytes - (k + 1) * size,
            };
            let value = if size >= 8 {
                entry.value_offset
            } else {
                (entry.value_offset >> (shift_bytes * 8)) & ((1u64 << (size * 8)) - 1)
            };
            values.push(value);
        }

        Ok(values)
    }
}

impl Default for TiffReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Gets the total size of the underlying stream, restoring the position
fn file_size(reader: &mut dyn SeekableReader) -> CogResult<u64> {
    let current = reader.seek(SeekFrom::Current(0))?;
    let size = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(current))?;
    Ok(size)
}
