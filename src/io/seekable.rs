//! Seekable reader trait and implementations
//!
//! A unified trait for readers that support both reading and seeking,
//! used wherever the TIFF structures are walked.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
