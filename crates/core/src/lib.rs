//! # TerraFlow Core
//!
//! Raster types and I/O for the TerraFlow agricultural suitability pipeline.
//!
//! This crate provides:
//! - `Raster<T>`: Generic georeferenced raster grid type
//! - `GeoTransform`: Affine transformation between pixel and geographic space
//! - GeoTIFF reading and writing (band 1, native `tiff` backend)

pub mod error;
pub mod io;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};
