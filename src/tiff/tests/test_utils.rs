use std::io::Cursor;
use byteorder::{LittleEndian, WriteBytesExt};

/// Writes a classic little-endian IFD entry
pub fn write_entry_le(buf: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32) {
    buf.write_u16::<LittleEndian>(tag).unwrap();
    buf.write_u16::<LittleEndian>(field_type).unwrap();
    buf.write_u32::<LittleEndian>(count).unwrap();
    buf.write_u32::<LittleEndian>(value).unwrap();
}

/// Creates a classic TIFF with one tiled IFD and external layout arrays
///
/// 64x64 image, 32x32 tiles. The tile offset and byte count arrays
/// (4 LONGs each) live after the IFD.
pub fn create_tiled_tiff_buffer() -> Cursor<Vec<u8>> {
    let mut buf = Vec::new();

    // Header: II, version 42, first IFD at offset 8
    buf.write_u16::<LittleEndian>(0x4949).unwrap();
    buf.write_u16::<LittleEndian>(42).unwrap();
    buf.write_u32::<LittleEndian>(8).unwrap();

    // IFD: 7 entries, 2 + 7 * 12 + 4 = 90 bytes, so arrays start at 98
    let offsets_pos: u32 = 8 + 90;
    let byte_counts_pos: u32 = offsets_pos + 16;

    buf.write_u16::<LittleEndian>(7).unwrap();
    write_entry_le(&mut buf, 254, 4, 1, 0); // NewSubfileType
    write_entry_le(&mut buf, 256, 4, 1, 64); // ImageWidth
    write_entry_le(&mut buf, 257, 4, 1, 64); // ImageLength
    write_entry_le(&mut buf, 322, 4, 1, 32); // TileWidth
    write_entry_le(&mut buf, 323, 4, 1, 32); // TileLength
    write_entry_le(&mut buf, 324, 4, 4, offsets_pos); // TileOffsets
    write_entry_le(&mut buf, 325, 4, 4, byte_counts_pos); // TileByteCounts
    buf.write_u32::<LittleEndian>(0).unwrap(); // no next IFD

    for offset in [200u32, 300, 400, 500] {
        buf.write_u32::<LittleEndian>(offset).unwrap();
    }
    for byte_count in [10u32, 11, 12, 13] {
        buf.write_u32::<LittleEndian>(byte_count).unwrap();
    }

    Cursor::new(buf)
}

/// Creates a BigTIFF buffer with a single two-entry IFD
pub fn create_bigtiff_buffer() -> Cursor<Vec<u8>> {
    let mut buf = Vec::new();

    buf.write_u16::<LittleEndian>(0x4949).unwrap(); // II
    buf.write_u16::<LittleEndian>(43).unwrap(); // BigTIFF version
    buf.write_u16::<LittleEndian>(8).unwrap(); // offset size
    buf.write_u16::<LittleEndian>(0).unwrap(); // reserved
    buf.write_u64::<LittleEndian>(16).unwrap(); // first IFD offset

    buf.write_u64::<LittleEndian>(2).unwrap(); // entry count

    buf.write_u16::<LittleEndian>(256).unwrap(); // ImageWidth
    buf.write_u16::<LittleEndian>(4).unwrap();
    buf.write_u64::<LittleEndian>(1).unwrap();
    buf.write_u64::<LittleEndian>(1024).unwrap();

    buf.write_u16::<LittleEndian>(257).unwrap(); // ImageLength
    buf.write_u16::<LittleEndian>(4).unwrap();
    buf.write_u64::<LittleEndian>(1).unwrap();
    buf.write_u64::<LittleEndian>(768).unwrap();

    buf.write_u64::<LittleEndian>(0).unwrap(); // no next IFD

    Cursor::new(buf)
}
