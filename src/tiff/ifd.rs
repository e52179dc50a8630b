//! Image File Directory (IFD) structures and methods
//!
//! An IFD stores the metadata for one image in a TIFF file as a series
//! of tag entries. A COG carries several IFDs in one file: the full
//! resolution image, its overviews, and optionally mask planes, all
//! distinguished by the NewSubfileType tag.

use std::collections::HashMap;
use std::fmt;

use crate::tiff::constants::{field_types, tags};

/// Represents an Image File Directory (IFD) in a TIFF file
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in this IFD
    pub entries: Vec<IFDEntry>,
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Cached tag values for quick lookup
    tag_map: HashMap<u16, IFDEntry>,
}

/// Represents an entry in an Image File Directory (IFD)
///
/// For small values, `value_offset` holds the value itself; for larger
/// ones it holds the file offset where the values are stored.
#[derive(Debug, Clone)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Value or offset to values
    pub value_offset: u64,
}

impl IFDEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64) -> Self {
        Self {
            tag,
            field_type,
            count,
            value_offset,
        }
    }

    /// Get the size in bytes for this entry's field type
    pub fn field_type_size(&self) -> u64 {
        match self.field_type {
            field_types::BYTE | field_types::ASCII | field_types::SBYTE
            | field_types::UNDEFINED => 1,
            field_types::SHORT | field_types::SSHORT => 2,
            field_types::LONG | field_types::SLONG => 4,
            field_types::RATIONAL | field_types::DOUBLE => 8,
            field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => 8,
            _ => 1,
        }
    }

    /// Determines if the value is stored inline in `value_offset`
    /// rather than at the offset location
    ///
    /// Classic TIFF offers 4 inline bytes per entry, BigTIFF 8.
    pub fn is_value_inline(&self, is_big_tiff: bool) -> bool {
        // A BigTIFF count is a full u64 and can overflow the product
        let total_size = self.field_type_size().saturating_mul(self.count);
        let inline_size = if is_big_tiff { 8 } else { 4 };
        total_size <= inline_size
    }
}

impl IFD {
    /// Creates a new, empty IFD
    pub fn new(number: usize, offset: u64) -> Self {
        Self {
            entries: Vec::new(),
            number,
            offset,
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry to this IFD and updates the lookup cache
    pub fn add_entry(&mut self, entry: IFDEntry) {
        self.tag_map.insert(entry.tag, entry.clone());
        self.entries.push(entry);
    }

    /// Gets a tag value (value_offset) directly
    pub fn get_tag_value(&self, tag: u16) -> Option<u64> {
        self.tag_map.get(&tag).map(|entry| entry.value_offset)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Gets an IFD entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.tag_map.get(&tag)
    }

    /// Gets the dimensions of the image described by this IFD
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_tag_value(tags::IMAGE_WIDTH)?;
        let height = self.get_tag_value(tags::IMAGE_LENGTH)?;
        Some((width, height))
    }

    /// NewSubfileType flags for this IFD, 0 when the tag is absent
    pub fn subfile_type(&self) -> u64 {
        self.get_tag_value(tags::NEW_SUBFILE_TYPE).unwrap_or(0)
    }

    /// Whether this IFD uses tiled organization (as opposed to strips)
    pub fn is_tiled(&self) -> bool {
        self.has_tag(tags::TILE_WIDTH) && self.has_tag(tags::TILE_LENGTH)
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;
        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }
        writeln!(f, "  Subfile type: {:#x}", self.subfile_type())?;
        Ok(())
    }
}
