//! Unit tests for the validation rules

mod fake_raster;
mod report_tests;
mod rules_tests;
