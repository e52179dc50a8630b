//! Unit tests for the TIFF parsing layer

mod test_utils;
