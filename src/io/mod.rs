//! I/O utilities for file handling
//!
//! This module provides traits and implementations for the low-level
//! read operations the validator performs: sequential header/IFD reads
//! and absolute-offset range reads into tile data.

pub mod seekable;
pub mod byte_order;
pub mod range_reader;
