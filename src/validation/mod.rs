//! COG structure validation
//!
//! The rules that decide whether a GeoTIFF's internal layout lets a
//! range-reading client fetch exactly the tiles and overview levels it
//! needs: block offset ordering, leader/trailer integrity markers,
//! internal overviews, and mask planes.

pub mod report;
pub mod band_check;
pub mod rules;
#[cfg(test)]
mod tests;

pub use band_check::check_band;
pub use report::{render_report, Findings};
pub use rules::evaluate;
